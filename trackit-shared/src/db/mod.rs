/// Database layer for TrackIt
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: sqlx migration runner for the workspace `migrations/` directory
///
/// Row types and their queries live in the `models` module.
///
/// # Example
///
/// ```no_run
/// use trackit_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig::from_url(std::env::var("DATABASE_URL")?)).await?;
///     trackit_shared::db::migrations::run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
