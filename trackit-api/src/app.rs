/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use trackit_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{from_fn_with_state, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use trackit_shared::auth::middleware::authenticate_bearer;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /                        # Liveness message (public)
/// ├── GET  /health                  # Health check (public)
/// └── /api/
///     ├── /users/
///     │   ├── POST /register        # public
///     │   ├── POST /login           # public
///     │   └── GET  /me              # authenticated
///     ├── /shifts/                  # authenticated
///     │   ├── GET    /
///     │   ├── POST   /
///     │   ├── GET    /:id
///     │   ├── PUT    /:id
///     │   └── DELETE /:id
///     └── /analytics/               # authenticated
///         ├── GET /dashboard
///         ├── GET /stats
///         ├── GET /best-worst
///         ├── GET /percentile
///         └── GET /earnings
/// ```
///
/// Outermost first: security headers, CORS, request tracing, then bearer
/// authentication on the protected groups.
pub fn build_router(state: AppState) -> Router {
    let auth = from_fn_with_state(state.clone(), jwt_auth_layer);

    let user_routes = Router::new()
        .route("/me", get(routes::users::me))
        .route_layer(auth.clone())
        .route("/register", post(routes::users::register))
        .route("/login", post(routes::users::login));

    let shift_routes = Router::new()
        .route(
            "/",
            get(routes::shifts::list_shifts).post(routes::shifts::create_shift),
        )
        .route(
            "/:id",
            get(routes::shifts::get_shift)
                .put(routes::shifts::update_shift)
                .delete(routes::shifts::delete_shift),
        )
        .route_layer(auth.clone());

    let analytics_routes = Router::new()
        .route("/dashboard", get(routes::analytics::dashboard))
        .route("/stats", get(routes::analytics::stats))
        .route("/best-worst", get(routes::analytics::best_worst))
        .route("/percentile", get(routes::analytics::percentile))
        .route("/earnings", get(routes::analytics::earnings))
        .route_layer(auth);

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/shifts", shift_routes)
        .nest("/analytics", analytics_routes);

    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Validates the bearer token and stores the caller's `AuthContext` in
/// request extensions
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = authenticate_bearer(req.headers(), state.jwt_secret())?;

    tracing::debug!(user_id = %auth.user_id, "Authenticated request");
    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
