//! Root status endpoint.

/// `GET /` — plain-text liveness string.
pub async fn index_handler() -> &'static str {
    "Virtual Mum relay is running. POST /chat to talk, GET /app for the demo page."
}
