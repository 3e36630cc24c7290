use serde::Deserialize;

use crate::probe::session::ProbeSession;

/// On-disk shape of the probe configuration: the session fields plus the
/// runner's concurrency bound, which is a `run()` argument rather than part
/// of the session context.
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(flatten)]
    pub session: ProbeSession,

    /// How many probes may be in flight at once. Defaults to 1 so the
    /// report stays strictly sequential.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::session::FailOn;
    use crate::probe::spec::HttpMethod;

    #[test]
    fn test_file_config_deserialization() {
        let yaml = r#"
                    base_url: https://api.example.com
                    token: eyJhbGciOiJIUzI1NiJ9.smoke
                    default_headers:
                        X-Env: staging
                    concurrency: 4
                    deadline_ms: 30000
                    fail_on: http-error
                    requests:
                        - method: GET
                          path: /api/v1/admin/users
                        - method: POST
                          path: /api/v1/admin/product
                          body:
                            name: Test Product
                            price: 100
                    "#;

        let config: FileConfig = serde_yaml::from_str(yaml).expect("Invalid YAML");
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.session.base_url, "https://api.example.com");
        assert_eq!(
            config.session.token.as_deref(),
            Some("eyJhbGciOiJIUzI1NiJ9.smoke")
        );
        assert_eq!(
            config.session.default_headers.get("X-Env"),
            Some(&"staging".to_string())
        );
        assert_eq!(config.session.deadline_ms, Some(30_000));
        assert_eq!(config.session.fail_on, FailOn::HttpError);
        assert_eq!(config.session.requests.len(), 2);
        assert_eq!(config.session.requests[1].method, HttpMethod::POST);
    }

    #[test]
    fn test_defaults_when_omitted() {
        let yaml = r#"
                    base_url: https://api.example.com
                    requests:
                        - method: GET
                          path: /health
                    "#;

        let config: FileConfig = serde_yaml::from_str(yaml).expect("Invalid YAML");
        assert_eq!(config.concurrency, 1);
        assert!(config.session.token.is_none());
        assert!(config.session.default_headers.is_empty());
        assert_eq!(config.session.request_timeout_ms, 5000);
        assert_eq!(config.session.deadline_ms, None);
        assert_eq!(config.session.fail_on, FailOn::TransportError);
        assert!(!config.session.quiet);
    }
}
