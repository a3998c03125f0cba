//! Upload form page

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// GET /
///
/// Serves the upload form. All client behaviour lives in the page's inline script.
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
