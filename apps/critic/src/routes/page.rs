use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET /
/// Interactive analysis page. Posts to `/api/v1/analyze` and renders the record.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
