//! IndexNow submission logic: input validation, parameter derivation,
//! GET/POST dispatch and response interpretation.

use serde::Serialize;
use serde_json::{Value, json};
use url::Url;

use crate::client::IndexNowTransport;
use crate::config::Config;

/// Result of a submission attempt, passed through to the tool caller
/// unchanged.
///
/// Serializes untagged, so callers see `{"status": 200, "message": "OK"}` on
/// success and `{"status": 4xx, "error": "..."}` on failure, with exactly one
/// of `message`/`error` present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Success { status: u16, message: String },
    Failure { status: u16, error: String },
}

impl Outcome {
    fn success(status: u16, message: impl Into<String>) -> Self {
        Self::Success {
            status,
            message: message.into(),
        }
    }

    fn failure(status: u16, error: impl Into<String>) -> Self {
        Self::Failure {
            status,
            error: error.into(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Submits URL batches to an IndexNow endpoint through an injected transport.
pub struct IndexNowService<C> {
    api_base: String,
    default_key: Option<String>,
    client: C,
}

impl<C: IndexNowTransport> IndexNowService<C> {
    pub fn new(config: &Config, client: C) -> Self {
        Self {
            api_base: config.api_base.clone(),
            default_key: config.default_key.clone(),
            client,
        }
    }

    /// Submit one or more URLs to the IndexNow endpoint.
    ///
    /// A single URL goes out as a GET with query parameters; two or more go
    /// out as a POST with a JSON body. Every failure path returns a
    /// structured [`Outcome`]; this method never errors.
    pub async fn submit_urls(
        &self,
        urls: &[String],
        key: Option<&str>,
        host: Option<&str>,
        key_location: Option<&str>,
    ) -> Outcome {
        if urls.is_empty() {
            return Outcome::failure(400, "URL list cannot be empty");
        }

        let key = match self.resolve_key(key) {
            Ok(key) => key,
            Err(outcome) => return outcome,
        };
        let host = match resolve_host(host, urls) {
            Ok(host) => host,
            Err(outcome) => return outcome,
        };

        let (status, body) = if urls.len() == 1 {
            log::debug!("Submitting 1 URL via GET to {}", self.api_base);
            let mut params = vec![("url", urls[0].clone()), ("key", key)];
            // keyLocation is only forwarded on GET when the caller asked for
            // it; the endpoint infers the default itself.
            if let Some(location) = key_location.filter(|l| !l.is_empty()) {
                params.push(("keyLocation", location.to_string()));
            }
            self.client.get(&self.api_base, &params).await
        } else {
            log::debug!(
                "Submitting {} URLs via POST to {} for host {host}",
                urls.len(),
                self.api_base
            );
            let key_location = key_location
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("https://{host}/{key}.txt"));
            let body = json!({
                "host": host,
                "key": key,
                "urlList": urls,
                "keyLocation": key_location,
            });
            self.client.post(&self.api_base, &body).await
        };

        let outcome = interpret_response(status, body.as_ref());
        match &outcome {
            Outcome::Success { status, message } => {
                log::info!("IndexNow submission accepted: {status} {message}");
            }
            Outcome::Failure { status, error } => {
                log::warn!("IndexNow submission failed: {status} {error}");
            }
        }
        outcome
    }

    fn resolve_key(&self, key: Option<&str>) -> Result<String, Outcome> {
        key.filter(|k| !k.is_empty())
            .or(self.default_key.as_deref())
            .map(str::to_string)
            .ok_or_else(|| {
                Outcome::failure(
                    400,
                    "No secret key provided and INDEXNOW_SECRET_KEY \
                     environment variable not set",
                )
            })
    }
}

/// Determine the host to report, preferring an explicit value over the
/// authority of the first URL.
fn resolve_host(host: Option<&str>, urls: &[String]) -> Result<String, Outcome> {
    if let Some(host) = host.filter(|h| !h.is_empty()) {
        return Ok(host.to_string());
    }
    match urls.first() {
        Some(first) => authority_of(first)
            .ok_or_else(|| Outcome::failure(400, "Could not determine host from the first URL")),
        // Unreachable through submit_urls, which rejects empty lists first.
        None => Err(Outcome::failure(
            400,
            "Host must be provided if URL list is empty",
        )),
    }
}

/// Authority component of a URL: host, plus `:port` when one is present.
///
/// `Url::port` omits ports already implied by the scheme, so
/// `https://example.com:443/a` derives `example.com` — the redundant port is
/// dropped rather than echoed back, and IndexNow sees one spelling of the
/// host either way.
fn authority_of(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Map an IndexNow response to an [`Outcome`]. Pure and total over all status
/// codes; body content only matters for codes outside the documented set.
pub fn interpret_response(status: u16, body: Option<&Value>) -> Outcome {
    match status {
        200 => Outcome::success(200, "OK"),
        202 => Outcome::success(202, "Accepted"),
        400 => Outcome::failure(400, "Bad Request (Invalid format)"),
        403 => Outcome::failure(403, "Forbidden (Invalid key)"),
        422 => Outcome::failure(422, "Unprocessable Entity (URL does not belong to host)"),
        429 => Outcome::failure(429, "Too Many Requests"),
        other => match body.and_then(|b| b.get("error")) {
            // Errors synthesized by the transport carry their own message.
            Some(error) => {
                let error = match error.as_str() {
                    Some(s) => s.to_string(),
                    None => error.to_string(),
                };
                // A zero status means the transport never produced a real
                // code; report it as a server-side failure.
                let status = if other == 0 { 500 } else { other };
                Outcome::failure(status, error)
            }
            None => Outcome::failure(
                other,
                format!("Received unexpected HTTP status code {other}"),
            ),
        },
    }
}
