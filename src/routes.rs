use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/translate", post(handlers::translate))
        .route("/api/health", get(handlers::health_check))
        .route("/api/languages", get(handlers::list_languages))
}

/// Full application: routes, optional static front-end, CORS and tracing.
pub fn app(state: AppState) -> Router {
    let mut router = create_routes();

    if let Some(dir) = &state.config.server.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
