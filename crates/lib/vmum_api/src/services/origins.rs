//! Origin allow-list matching.
//!
//! Patterns are either exact origins (`https://app.example.com`) or a
//! single leading subdomain wildcard (`https://*.example.app`), which matches
//! any subdomain under that host. Patterns and request origins are parsed as
//! URLs and compared on scheme, host and effective port, so any path in a
//! pattern is ignored and default ports are normalised. A lone `*` allows
//! everything, as does a list with no entries.

use tracing::warn;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
struct OriginPattern {
    scheme: String,
    host: String,
    port: Option<u16>,
    /// Matches strict subdomains of `host` rather than `host` itself.
    subdomains: bool,
}

impl OriginPattern {
    fn parse(pattern: &str) -> Option<Self> {
        let (raw, subdomains) = match pattern.split_once("://*.") {
            Some((scheme, rest)) => (format!("{scheme}://{rest}"), true),
            None => (pattern.to_string(), false),
        };
        let url = Url::parse(&raw).ok()?;
        Some(Self {
            scheme: url.scheme().to_string(),
            host: url.host_str()?.to_string(),
            port: url.port_or_known_default(),
            subdomains,
        })
    }

    fn matches(&self, origin: &Url) -> bool {
        let Some(host) = origin.host_str() else {
            return false;
        };
        if origin.scheme() != self.scheme || origin.port_or_known_default() != self.port {
            return false;
        }
        if self.subdomains {
            host.strip_suffix(self.host.as_str())
                .and_then(|sub| sub.strip_suffix('.'))
                .is_some_and(|sub| !sub.is_empty())
        } else {
            host == self.host
        }
    }
}

/// Compiled origin allow-list.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allow_all: bool,
    patterns: Vec<OriginPattern>,
}

impl OriginPolicy {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut policy = Self::default();
        let mut configured = 0usize;
        for raw in patterns {
            let pattern = raw.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            configured += 1;
            if pattern == "*" {
                policy.allow_all = true;
            } else if let Some(parsed) = OriginPattern::parse(pattern) {
                policy.patterns.push(parsed);
            } else {
                warn!(pattern, "ignoring unparseable origin pattern");
            }
        }
        if configured == 0 {
            policy.allow_all = true;
        }
        policy
    }

    /// Whether every origin is accepted.
    pub fn allows_any(&self) -> bool {
        self.allow_all
    }

    /// Checks a request's `Origin` header value. Requests without one
    /// (server-to-server calls, embedded mobile web views) are always allowed.
    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        let Some(origin) = origin else {
            return true;
        };
        if self.allow_all {
            return true;
        }
        match Url::parse(origin) {
            Ok(url) => self.patterns.iter().any(|p| p.matches(&url)),
            Err(_) => false,
        }
    }
}
