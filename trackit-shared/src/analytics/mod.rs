/// Earnings analytics
///
/// Everything here is recomputed from the current shift records on every
/// call; nothing is cached or maintained incrementally.
///
/// - [`store`]: the [`store::RecordStore`] seam plus PostgreSQL and in-memory stores
/// - [`summary`]: totals, averages and tip extrema over a set of shifts
/// - [`ranking`]: a user's lifetime earnings ranked against every other user
/// - [`buckets`]: earnings rolled up by day, ISO week or month
/// - [`selection`]: best, worst and most recent shifts
/// - [`engine`]: [`engine::AnalyticsEngine`], which wires the above to a store
///   and composes the dashboard
///
/// ```
/// use trackit_shared::analytics::{engine::AnalyticsEngine, store::InMemoryRecordStore};
/// use trackit_shared::models::shift::DateRange;
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), trackit_shared::analytics::AnalyticsError> {
/// let engine = AnalyticsEngine::new(InMemoryRecordStore::new());
/// let stats = engine.compute_summary(Uuid::new_v4(), DateRange::UNBOUNDED).await?;
/// assert_eq!(stats.total_shifts, 0);
/// # Ok(())
/// # }
/// ```

pub mod buckets;
pub mod engine;
pub mod ranking;
pub mod selection;
pub mod store;
pub mod summary;

#[cfg(test)]
mod fixtures;

/// Failure to read shift records
///
/// No-data conditions are never errors; they produce zeroed statistics or
/// absent shifts instead.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
