pub mod error;
pub mod routes;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let session_routes = Router::new()
        .route("/", post(routes::session::create))
        .route("/{session_id}", get(routes::session::get))
        .route(
            "/{session_id}/turn",
            get(routes::session::list_turns).post(routes::session::add_turn),
        )
        .route(
            "/{session_id}/evaluation",
            get(routes::evaluation::get).post(routes::evaluation::run),
        );

    let api = Router::new().nest("/session", session_routes);

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
