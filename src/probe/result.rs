use chrono::{DateTime, Utc};

use super::spec::RequestSpec;

/// Outcome of a single probe. Created exactly once per executed spec and
/// never mutated; `spec` identifies which input the result answers,
/// regardless of completion order.
///
/// An HTTP error status (4xx/5xx) is valid probe data, not a failure of the
/// runner: `status` is only absent when the request never completed, in
/// which case `error` carries a transport-level description.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub spec: RequestSpec,
    pub started_at: DateTime<Utc>,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub duration_ms: f64,
    pub error: Option<String>,
}

impl ProbeResult {
    /// True when the request reached the server and any HTTP status came back.
    pub fn transport_ok(&self) -> bool {
        self.error.is_none()
    }

    /// True when the server answered with a non-error status.
    pub fn http_ok(&self) -> bool {
        matches!(self.status, Some(code) if code < 400)
    }
}
