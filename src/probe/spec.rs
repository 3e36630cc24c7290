use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// The subset of HTTP methods a probe may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
}

impl HttpMethod {
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::PATCH => reqwest::Method::PATCH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declarative request to probe. Immutable once constructed.
///
/// The path is appended to the session base URL; headers are merged over the
/// session defaults, with the per-spec value winning on conflict.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSpec {
    pub method: HttpMethod,

    /// Path appended to the session base URL, e.g. `/api/v1/admin/users`.
    pub path: String,

    /// Extra headers for this request only.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Optional JSON body, sent as `application/json` unless the spec sets
    /// its own `Content-Type`.
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::GET.to_string(), "GET");
        assert_eq!(HttpMethod::DELETE.to_string(), "DELETE");
        assert_eq!(HttpMethod::PATCH.as_reqwest(), reqwest::Method::PATCH);
    }

    #[test]
    fn test_request_spec_deserialization() {
        let yaml = r#"
                    - method: GET
                      path: /api/v1/admin/users
                    - method: POST
                      path: /api/v1/admin/product
                      headers:
                        X-Request-Id: smoke-1
                      body:
                        name: Test Product
                        price: 100
                    "#;

        let specs: Vec<RequestSpec> = serde_yaml::from_str(yaml).expect("Invalid YAML");
        assert_eq!(specs.len(), 2);

        assert_eq!(specs[0].method, HttpMethod::GET);
        assert_eq!(specs[0].path, "/api/v1/admin/users");
        assert!(specs[0].headers.is_empty());
        assert!(specs[0].body.is_none());

        assert_eq!(specs[1].method, HttpMethod::POST);
        assert_eq!(
            specs[1].headers.get("X-Request-Id"),
            Some(&"smoke-1".to_string())
        );
        assert_eq!(
            specs[1].body,
            Some(json!({"name": "Test Product", "price": 100}))
        );
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let yaml = "method: TRACE\npath: /x";
        assert!(serde_yaml::from_str::<RequestSpec>(yaml).is_err());
    }
}
