use std::env;

use url::Url;

use crate::error::{SentiscopeError, SentiscopeResult};

/// Environment variable selecting the classifier endpoint.
pub const ENDPOINT_ENV: &str = "SENTIMENT_API_URL";

/// Local development fallback used when the variable is unset or empty.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/analyze";

/// Process-wide settings, resolved once at startup and constant afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: Url,
}

impl Settings {
    /// Resolve the endpoint from `SENTIMENT_API_URL` (a `.env` file is
    /// honored because `dotenv` runs before this in `main`).
    pub fn from_env() -> SentiscopeResult<Self> {
        let endpoint = parse_endpoint(env::var(ENDPOINT_ENV).ok())?;
        Ok(Settings { endpoint })
    }

    /// Scheme://host[:port] part of the endpoint, used in transport error
    /// hints and as the base of the health probe.
    pub fn endpoint_origin(&self) -> String {
        self.endpoint.origin().ascii_serialization()
    }
}

fn parse_endpoint(raw: Option<String>) -> SentiscopeResult<Url> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_ENDPOINT.to_string(),
    };
    let url = Url::parse(raw.trim())
        .map_err(|e| SentiscopeError::config(format!("invalid endpoint URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SentiscopeError::config(format!(
            "endpoint URL '{}' must be http or https, got '{}'",
            raw, other
        ))),
    }
}
