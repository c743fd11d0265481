/// Database models for TrackIt
///
/// - `user`: accounts and credential lookup
/// - `shift`: shift records, owner-scoped CRUD and the per-owner earnings rollup
///
/// # Example
///
/// ```no_run
/// use trackit_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     username: "sam".to_string(),
///     email: "sam@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod shift;
pub mod user;
