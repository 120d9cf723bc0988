use axum::response::Html;

/// The single-page UI, compiled into the binary.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}
