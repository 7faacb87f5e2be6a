//! Demo chat page served at `/app`.

use axum::response::Html;

const APP_PAGE: &str = include_str!("../../assets/app.html");

/// `GET /app` — self-contained HTML page that talks to `/chat`.
pub async fn app_page_handler() -> Html<&'static str> {
    Html(APP_PAGE)
}
