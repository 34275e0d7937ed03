use axum::{routing::{get, post}, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::AppState;
use crate::handlers::site::{echo_info, index};

pub fn router(state: AppState) -> Router {
    let images = ServeDir::new(state.site_root.join("img"));

    Router::new()
        .route("/", get(index))
        .route("/info", post(echo_info))
        .nest_service("/img", images)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
