mod annotate;
mod health;
mod metrics;

use crate::server::SharedState;
use axum::{
    routing::{get, post},
    Router,
};

pub use annotate::{AnnotateError, AnnotateResponse};

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(health::home))
        .route("/api/image/annotate", post(annotate::annotate_image))
        .route("/metrics", get(metrics::metrics_handler))
}
