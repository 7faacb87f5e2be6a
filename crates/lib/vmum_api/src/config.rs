//! API server configuration.

/// Origins allowed when no explicit list is configured.
///
/// Covers local development and the app builder's preview hosts.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "https://x.thunkable.com",
    "https://*.thunkable.com",
    "https://*.vercel.app",
];

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:3000").
    pub bind_addr: String,
    /// Origin allow-list. Entries may use a `*` subdomain wildcard
    /// (`https://*.example.app`). An empty list allows every origin.
    pub allowed_origins: Vec<String>,
}

impl ApiConfig {
    pub fn new(host: &str, port: u16, allowed_origins: Vec<String>) -> Self {
        Self {
            bind_addr: format!("{host}:{port}"),
            allowed_origins,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(
            "0.0.0.0",
            3000,
            DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

/// Splits a comma-separated origin list, dropping blanks.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
