/// Configuration for the API server
///
/// Everything is read from environment variables; a `.env` file in the
/// working directory is loaded first when present.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 3000)
/// - `JWT_SECRET`: Secret key for signing session tokens (required, 32+ characters)
/// - `JWT_EXPIRATION_HOURS`: Session token lifetime (default: 24)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, or `*` (default: *)
/// - `PRODUCTION`: Enables HSTS when `true` (default: false)
/// - `LOG_FORMAT`: `json` for structured logs, anything else for human-readable
/// - `RUST_LOG`: Log filter (default: trackit_api=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use trackit_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `["*"]` allows any
    pub cors_origins: Vec<String>,

    /// Production deployments sit behind HTTPS and get HSTS
    pub production: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HS256 signing key
    ///
    /// Must be at least 32 characters. Generate with: `openssl rand -hex 32`
    #[serde(skip_serializing)]
    pub secret: String,

    /// Session token lifetime in hours
    pub expiration_hours: i64,
}

/// Minimum accepted `JWT_SECRET` length
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted session lifetime (one year)
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

/// Checks `JWT_EXPIRATION_HOURS` is within `1..=MAX_EXPIRATION_HOURS`
pub fn check_expiration_hours(hours: i64) -> anyhow::Result<i64> {
    if !(1..=MAX_EXPIRATION_HOURS).contains(&hours) {
        anyhow::bail!(
            "JWT_EXPIRATION_HOURS must be between 1 and {}, got {}",
            MAX_EXPIRATION_HOURS,
            hours
        );
    }
    Ok(hours)
}

fn var_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value: {}", name, e)),
        Err(_) => Ok(default),
    }
}

/// Splits `CORS_ORIGINS`, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` or `JWT_SECRET` is missing
    /// - `JWT_SECRET` is shorter than 32 characters
    /// - `JWT_EXPIRATION_HOURS` is not between 1 and 8760
    /// - A numeric or boolean variable does not parse
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < MIN_SECRET_LEN {
            anyhow::bail!("JWT_SECRET must be at least {} characters long", MIN_SECRET_LEN);
        }

        let expiration_hours = check_expiration_hours(var_or("JWT_EXPIRATION_HOURS", 24)?)?;

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Self {
            api: ApiConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: var_or("API_PORT", 3000)?,
                cors_origins: if cors_origins.is_empty() {
                    vec!["*".to_string()]
                } else {
                    cors_origins
                },
                production: var_or("PRODUCTION", false)?,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: var_or("DATABASE_MAX_CONNECTIONS", 10)?,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_hours,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/trackit_test".to_string(),
            max_connections: 2,
        },
        jwt: JwtConfig {
            secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            expiration_hours: 24,
        },
    }
}
