use serde_json::Value;

use crate::error::{Error, HttpError, HttpErrorKind};
use crate::http::{Request, Response};

/// Turn an error status into an [`HttpError`]; other responses pass through.
pub(crate) fn classify(request: Request, response: Response) -> Result<Response, Error> {
    let Some(kind) = HttpErrorKind::from_status(response.status) else {
        return Ok(response);
    };

    let message = format!(
        "Error in {}: {}: {}",
        response.url,
        response.status.as_u16(),
        reason(&response)
    );
    Err(HttpError::new(kind, message, request, response).into())
}

/// The API's own status message, else the reason phrase, else the bare code.
fn reason(response: &Response) -> String {
    response
        .content
        .as_ref()
        .and_then(|content| content.get("status"))
        .and_then(|status| status.get("status_message"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .or_else(|| response.status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| response.status.as_u16().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    const URL: &str = "https://swd.test/rest/stations/9";

    fn run(code: u16, content: Option<Value>) -> Result<Response, Error> {
        let status = StatusCode::from_u16(code).unwrap();
        classify(Request::get(URL), Response::new(status, URL, content))
    }

    #[test]
    fn success_passes_through() {
        let response = run(200, Some(json!({"ok": true}))).unwrap();
        assert_eq!(response.content, Some(json!({"ok": true})));
        assert!(run(302, None).is_ok());
    }

    #[test]
    fn api_message_is_preferred() {
        let err = run(
            404,
            Some(json!({"status": {"status_code": 404, "status_message": " NOT FOUND "}})),
        )
        .unwrap_err();
        let http = err.http().unwrap();
        assert_eq!(http.kind(), HttpErrorKind::NotFound);
        assert_eq!(http.message(), format!("Error in {URL}: 404: NOT FOUND"));
        assert_eq!(http.request().url, URL);
        assert_eq!(http.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn reason_phrase_is_the_fallback() {
        let err = run(401, Some(json!({"status": {"status_message": ""}}))).unwrap_err();
        assert!(err.is_unauthorised());
        assert_eq!(err.to_string(), format!("Error in {URL}: 401: Unauthorized"));

        let err = run(503, None).unwrap_err();
        assert_eq!(err.http().unwrap().kind(), HttpErrorKind::ServiceUnavailable);
        assert!(err.to_string().ends_with("503: Service Unavailable"));
    }

    #[test]
    fn unnamed_codes_fall_back_to_the_number() {
        let err = run(599, None).unwrap_err();
        assert_eq!(err.http().unwrap().kind(), HttpErrorKind::ServerError);
        assert_eq!(err.to_string(), format!("Error in {URL}: 599: 599"));
    }
}
