use crate::{config::Config, handlers::view_handler::ViewHandler, AppState};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub fn create_routes(app_state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .merge(view_routes())
        .with_state(app_state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
}

/// Every path is a counter key: `/` counts as `home`.
///
/// `get` would also answer HEAD, so HEAD is routed to the 405 handler.
fn view_routes() -> Router<AppState> {
    let counter = get(ViewHandler::get_views)
        .head(ViewHandler::method_not_allowed)
        .post(ViewHandler::record_view)
        .fallback(ViewHandler::method_not_allowed);

    Router::new()
        .route("/", counter.clone())
        .route("/{*path}", counter)
}

/// The site posts views cross-origin, so the configured origins (or any
/// origin when none are configured) are allowed.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
