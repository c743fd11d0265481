/// API route handlers, organized by resource:
///
/// - `health`: Liveness and health check
/// - `users`: Registration, login and profile
/// - `shifts`: Shift CRUD
/// - `analytics`: Statistics, percentile, best/worst shifts and earnings buckets

pub mod analytics;
pub mod health;
pub mod shifts;
pub mod users;
