use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

use super::result::ProbeResult;
use super::spec::RequestSpec;

/// An ordered batch of request specs plus the shared context they run
/// against: base URL, bearer token, default headers and session policy.
///
/// The context is read-only during a run; a session produces one
/// [`ProbeResult`] per spec, in spec order.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSession {
    /// Base URL every spec path is joined to, e.g. `https://api.example.com`.
    pub base_url: String,

    /// Bearer token injected as `Authorization: Bearer <token>` unless a
    /// spec or default header overrides `Authorization` explicitly.
    #[serde(default)]
    pub token: Option<String>,

    /// Headers applied to every request, overridable per spec.
    #[serde(default)]
    pub default_headers: HashMap<String, String>,

    /// Per-request timeout in milliseconds. Defaults to 5000.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional overall deadline for the whole session. Probes still in
    /// flight when it expires are abandoned and recorded as timed out.
    #[serde(default)]
    pub deadline_ms: Option<u64>,

    /// Exit-code policy when run as a command.
    #[serde(default)]
    pub fail_on: FailOn,

    /// Suppress the per-probe report line.
    #[serde(default)]
    pub quiet: bool,

    pub requests: Vec<RequestSpec>,
}

fn default_request_timeout_ms() -> u64 {
    5000
}

/// Which probe outcomes make the command exit nonzero.
///
/// The default treats an HTTP error status as valid probe data (the server
/// answered) and only fails on transport-level errors (the network did not).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailOn {
    /// Always exit 0, results are informational only.
    Never,
    /// Exit nonzero when any probe could not be completed at the transport
    /// level (connection refused, DNS failure, timeout).
    #[default]
    TransportError,
    /// Exit nonzero on transport errors and on any 4xx/5xx status.
    HttpError,
}

impl FailOn {
    pub fn exit_code(self, results: &[ProbeResult]) -> i32 {
        let failed = match self {
            FailOn::Never => false,
            FailOn::TransportError => results.iter().any(|r| !r.transport_ok()),
            FailOn::HttpError => results.iter().any(|r| !r.transport_ok() || !r.http_ok()),
        };
        if failed { 1 } else { 0 }
    }
}

/// A fully resolved request, produced by [`ProbeSession::prepare`]: URL
/// joined, headers merged, token injected, body serialized. Everything that
/// can fail for configuration reasons has already failed by the time a plan
/// exists, so executing one can only fail at the transport level.
#[derive(Debug, Clone)]
pub struct ProbePlan {
    pub spec: RequestSpec,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl ProbeSession {
    /// Validate the session and resolve every spec into a [`ProbePlan`].
    ///
    /// Fails fast with a [`ConfigError`] before any probe executes; once it
    /// returns `Ok`, the runner yields exactly one result per spec.
    pub fn prepare(&self) -> Result<Vec<ProbePlan>, ConfigError> {
        let base = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;

        let token = match self.token.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ConfigError::MissingToken),
        };
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ConfigError::InvalidToken)?;

        let mut plans = Vec::with_capacity(self.requests.len());
        for (index, spec) in self.requests.iter().enumerate() {
            if spec.path.is_empty() {
                return Err(ConfigError::EmptyPath { index });
            }
            let url = base
                .join(&spec.path)
                .map_err(|source| ConfigError::InvalidPath {
                    path: spec.path.clone(),
                    source,
                })?;

            let mut headers = HeaderMap::new();
            for (name, value) in self.default_headers.iter().chain(spec.headers.iter()) {
                let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                    ConfigError::InvalidHeaderName { name: name.clone() }
                })?;
                let header_value = HeaderValue::from_str(value).map_err(|_| {
                    ConfigError::InvalidHeaderValue { name: name.clone() }
                })?;
                // insert() replaces, so a per-spec header wins over a default
                headers.insert(header_name, header_value);
            }
            if !headers.contains_key(AUTHORIZATION) {
                headers.insert(AUTHORIZATION, bearer.clone());
            }

            let body = match &spec.body {
                Some(value) => {
                    let bytes =
                        serde_json::to_vec(value).map_err(|source| ConfigError::InvalidBody {
                            path: spec.path.clone(),
                            source,
                        })?;
                    if !headers.contains_key(CONTENT_TYPE) {
                        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                    }
                    Some(bytes)
                }
                None => None,
            };

            plans.push(ProbePlan {
                spec: spec.clone(),
                url,
                headers,
                body,
            });
        }

        Ok(plans)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}
