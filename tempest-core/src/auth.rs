use std::fmt;

use serde_json::Value;

use crate::error::Error;

/// Something that can hand out a bearer token.
pub trait AccessToken: Send + Sync + fmt::Debug {
    fn access_token(&self) -> &str;
}

/// A personal access token.
///
/// Displays as the raw token so it can be dropped straight into a header;
/// `Debug` output keeps it hidden.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    access_token: String,
}

impl Token {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Build from a token payload such as `{"access_token": "..."}`.
    pub fn from_details(details: &Value) -> Result<Self, Error> {
        details
            .get("access_token")
            .and_then(Value::as_str)
            .map(Self::new)
            .ok_or_else(|| {
                Error::InvalidArgument("token details must contain an `access_token` string".into())
            })
    }
}

impl AccessToken for Token {
    fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.access_token)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token").field("access_token", &"***").finish()
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn displays_as_the_raw_token() {
        let token = Token::new("abc123");
        assert_eq!(token.to_string(), "abc123");
        assert_eq!(token.access_token(), "abc123");
        assert!(!format!("{token:?}").contains("abc123"));
    }

    #[test]
    fn built_from_details() {
        let token = Token::from_details(&json!({"access_token": "xyz", "token_type": "bearer"}))
            .unwrap();
        assert_eq!(token, Token::from("xyz"));

        let err = Token::from_details(&json!({"token": "xyz"})).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
