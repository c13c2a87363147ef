use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;

/// A request on its way to a transport.
///
/// The URL may be relative until the client completes it against the
/// configured base URI.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub params: Option<BTreeMap<String, String>>,
    pub json: Option<Value>,
    pub headers: HeaderMap,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: None,
            json: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Attach query parameters, dropping the ones without a value.
    pub fn with_params<I, K>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        self.params = strip_null_params(params);
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }
}

/// Remove `None` entries; an empty result means "no parameters".
pub(crate) fn strip_null_params<I, K>(params: I) -> Option<BTreeMap<String, String>>
where
    I: IntoIterator<Item = (K, Option<String>)>,
    K: Into<String>,
{
    let params: BTreeMap<String, String> = params
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.into(), v)))
        .collect();

    if params.is_empty() { None } else { Some(params) }
}

/// What a transport hands back: status, final URL, parsed JSON object (if any)
/// and the raw headers.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub url: String,
    pub content: Option<Value>,
    pub headers: HeaderMap,
}

impl Response {
    pub fn new(status: StatusCode, url: impl Into<String>, content: Option<Value>) -> Self {
        Self {
            status,
            url: url.into(),
            content,
            headers: HeaderMap::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }
}

/// Parse a response body; anything that is not a JSON object counts as no content.
pub(crate) fn parse_content(body: &[u8]) -> Option<Value> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .filter(Value::is_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_params_are_dropped() {
        let request = Request::get("stations").with_params([
            ("station_id", Some("5".to_string())),
            ("units_temp", None),
        ]);

        let params = request.params.expect("one param survives");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("station_id").map(String::as_str), Some("5"));
    }

    #[test]
    fn all_null_params_become_no_params() {
        let request =
            Request::get("stations").with_params([("a", None::<String>), ("b", None)]);
        assert!(request.params.is_none());

        let request = Request::get("stations").with_params(Vec::<(String, Option<String>)>::new());
        assert!(request.params.is_none());
    }

    #[test]
    fn only_json_objects_count_as_content() {
        assert_eq!(parse_content(br#"{"a":1}"#), Some(json!({"a": 1})));
        assert_eq!(parse_content(b""), None);
        assert_eq!(parse_content(b"<html>oops</html>"), None);
        assert_eq!(parse_content(b"null"), None);
        assert_eq!(parse_content(b"[1,2]"), None);
    }

    #[test]
    fn error_statuses_are_detected() {
        assert!(Response::new(StatusCode::NOT_FOUND, "u", None).is_error());
        assert!(Response::new(StatusCode::BAD_GATEWAY, "u", None).is_error());
        assert!(!Response::new(StatusCode::OK, "u", None).is_error());
    }
}
