use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use crate::http::{Request, Response};

/// Everything that can go wrong between an endpoint call and a typed model.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid {param}: {value:?}. Valid: {valid:?}")]
    InvalidEnumValue {
        param: String,
        value: String,
        valid: Vec<String>,
    },

    #[error("Network request failed for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to deserialize {model} from response content")]
    Deserialize {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response carried no content to build {model} from")]
    EmptyContent { model: &'static str },

    #[error("Invalid value for header '{0}'")]
    InvalidHeader(&'static str),

    #[error("Call was dispatched on an asynchronous transport and must be awaited")]
    PendingCall,

    #[error("Transport has been closed")]
    TransportClosed,

    #[error(transparent)]
    Settings(#[from] anyhow::Error),
}

impl Error {
    /// The HTTP failure behind this error, if the server answered with an error status.
    pub fn http(&self) -> Option<&HttpError> {
        match self {
            Error::Http(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_unauthorised(&self) -> bool {
        self.http()
            .is_some_and(|e| e.kind() == HttpErrorKind::Unauthorised)
    }
}

/// Classification of an error status returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpErrorKind {
    BadRequest,
    Unauthorised,
    Forbidden,
    NotFound,
    TooManyRequests,
    ClientError,
    InternalServerError,
    BadGateway,
    ServiceUnavailable,
    ServerError,
}

impl HttpErrorKind {
    /// Map an error status code onto the taxonomy.
    ///
    /// Codes outside 400..=599 have no kind.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        let kind = match status.as_u16() {
            400 => HttpErrorKind::BadRequest,
            401 => HttpErrorKind::Unauthorised,
            403 => HttpErrorKind::Forbidden,
            404 => HttpErrorKind::NotFound,
            429 => HttpErrorKind::TooManyRequests,
            500 => HttpErrorKind::InternalServerError,
            502 => HttpErrorKind::BadGateway,
            503 => HttpErrorKind::ServiceUnavailable,
            400..=499 => HttpErrorKind::ClientError,
            500..=599 => HttpErrorKind::ServerError,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_client_error(self) -> bool {
        matches!(
            self,
            HttpErrorKind::BadRequest
                | HttpErrorKind::Unauthorised
                | HttpErrorKind::Forbidden
                | HttpErrorKind::NotFound
                | HttpErrorKind::TooManyRequests
                | HttpErrorKind::ClientError
        )
    }

    pub fn is_server_error(self) -> bool {
        !self.is_client_error()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpErrorKind::BadRequest => "BadRequest",
            HttpErrorKind::Unauthorised => "Unauthorised",
            HttpErrorKind::Forbidden => "Forbidden",
            HttpErrorKind::NotFound => "NotFound",
            HttpErrorKind::TooManyRequests => "TooManyRequests",
            HttpErrorKind::ClientError => "ClientError",
            HttpErrorKind::InternalServerError => "InternalServerError",
            HttpErrorKind::BadGateway => "BadGateway",
            HttpErrorKind::ServiceUnavailable => "ServiceUnavailable",
            HttpErrorKind::ServerError => "ServerError",
        }
    }
}

impl fmt::Display for HttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error status from the API, with the exchange that produced it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpError {
    kind: HttpErrorKind,
    message: String,
    request: Box<Request>,
    response: Box<Response>,
}

impl HttpError {
    pub(crate) fn new(
        kind: HttpErrorKind,
        message: String,
        request: Request,
        response: Response,
    ) -> Self {
        Self {
            kind,
            message,
            request: Box::new(request),
            response: Box::new(response),
        }
    }

    pub fn kind(&self) -> HttpErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn response(&self) -> &Response {
        &self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(code: u16) -> Option<HttpErrorKind> {
        HttpErrorKind::from_status(StatusCode::from_u16(code).unwrap())
    }

    #[test]
    fn named_statuses_map_to_their_kind() {
        assert_eq!(kind(400), Some(HttpErrorKind::BadRequest));
        assert_eq!(kind(401), Some(HttpErrorKind::Unauthorised));
        assert_eq!(kind(403), Some(HttpErrorKind::Forbidden));
        assert_eq!(kind(404), Some(HttpErrorKind::NotFound));
        assert_eq!(kind(429), Some(HttpErrorKind::TooManyRequests));
        assert_eq!(kind(500), Some(HttpErrorKind::InternalServerError));
        assert_eq!(kind(502), Some(HttpErrorKind::BadGateway));
        assert_eq!(kind(503), Some(HttpErrorKind::ServiceUnavailable));
    }

    #[test]
    fn other_statuses_fall_back_to_range_kinds() {
        assert_eq!(kind(418), Some(HttpErrorKind::ClientError));
        assert_eq!(kind(422), Some(HttpErrorKind::ClientError));
        assert_eq!(kind(504), Some(HttpErrorKind::ServerError));
        assert_eq!(kind(599), Some(HttpErrorKind::ServerError));
        assert_eq!(kind(200), None);
        assert_eq!(kind(302), None);
    }

    #[test]
    fn kinds_know_their_family() {
        assert!(HttpErrorKind::NotFound.is_client_error());
        assert!(HttpErrorKind::TooManyRequests.is_client_error());
        assert!(HttpErrorKind::BadGateway.is_server_error());
        assert!(!HttpErrorKind::ServerError.is_client_error());
    }

    #[test]
    fn enum_error_lists_valid_values() {
        let err = Error::InvalidEnumValue {
            param: "units_temp".into(),
            value: "kelvin".into(),
            valid: vec!["c".into(), "f".into()],
        };
        assert_eq!(
            err.to_string(),
            r#"Invalid units_temp: "kelvin". Valid: ["c", "f"]"#
        );
    }
}
