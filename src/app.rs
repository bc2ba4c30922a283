use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/histogram", get(handlers::get_histogram))
        .route("/api/map", get(handlers::get_map))
        .route("/api/date-bounds", get(handlers::get_date_bounds))
        .route("/api/regions", get(handlers::get_regions))
        .route("/api/selection", post(handlers::post_selection))
        .with_state(state)
}
