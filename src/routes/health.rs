use axum::response::IntoResponse;

pub async fn home() -> impl IntoResponse {
    "Leaf annotation API is running"
}
