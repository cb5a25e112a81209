pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze;
use crate::pdf::{self, handlers::handle_extract};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handle_analyze))
        .route(
            "/api/v1/extract",
            // Axum's default body limit is below the PDF cap; the cap itself
            // is enforced in pdf::extract_pdf with a typed error.
            post(handle_extract).layer(DefaultBodyLimit::max(pdf::MAX_PDF_BYTES + 64 * 1024)),
        )
        .with_state(state)
}
