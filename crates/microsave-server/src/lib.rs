//! Microsave Web Server
//!
//! Axum-based REST API over the Microsave core pipeline. Every endpoint is a
//! pure computation over the request body; the only shared state is the
//! immutable projection config and the server start time.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use microsave_core::ProjectionConfig;

mod handlers;

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = any origin)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub projection: ProjectionConfig,
    /// Uptime reference for `/api/performance`
    pub started_at: Instant,
}

/// Create the application router
pub fn create_router(projection: ProjectionConfig, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        projection,
        started_at: Instant::now(),
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Transactions
        .route("/transactions/parse", post(handlers::parse_transactions))
        .route("/transactions/validator", post(handlers::validate))
        .route("/transactions/filter", post(handlers::filter))
        // Returns
        .route("/returns/nps", post(handlers::returns_nps))
        .route("/returns/index", post(handlers::returns_index))
        // Performance
        .route("/performance", get(handlers::performance));

    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(
    projection: ProjectionConfig,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    info!(
        nps_rate = projection.nps_rate,
        index_rate = projection.index_rate,
        retirement_age = projection.retirement_age,
        "Projection config loaded"
    );

    let app = create_router(projection, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<microsave_core::Error> for AppError {
    fn from(err: microsave_core::Error) -> Self {
        if err.is_client_error() {
            Self::bad_request(&err.to_string())
        } else {
            Self::internal(err.into())
        }
    }
}
