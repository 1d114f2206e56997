use axum::{
    http::{HeaderName, HeaderValue},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer, ExposeHeaders},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::middleware::{request_id_middleware, X_REQUEST_ID};
use crate::routes;
use crate::services::SwapActionHandler;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub settings: Settings,
    /// Collaborator that applies swap transitions
    pub swap_actions: Arc<dyn SwapActionHandler>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        settings: Settings,
        swap_actions: Arc<dyn SwapActionHandler>,
    ) -> Arc<Self> {
        Arc::new(Self {
            db,
            settings,
            swap_actions,
        })
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // Build trace layer (use DEBUG for spans to reduce overhead at INFO level)
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    Router::new()
        .merge(routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(trace_layer)
        .layer(cors)
        // Outermost so CORS preflight answers carry the id too
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // Longer preflight cache in development to cut down on OPTIONS requests
    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    let request_id = HeaderName::from_static(X_REQUEST_ID);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            request_id.clone(),
        ]))
        .expose_headers(ExposeHeaders::list([request_id]))
        .allow_credentials(true)
        .max_age(max_age)
}
