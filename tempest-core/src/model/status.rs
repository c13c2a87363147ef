use serde::{Deserialize, Serialize};

use super::serializer::{Discarded, Model, non_empty_trimmed};

/// The `status` envelope most responses carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub status_code: Option<i64>,
    /// Blank messages are normalized to `None`.
    #[serde(default, deserialize_with = "non_empty_trimmed")]
    pub status_message: Option<String>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<Status>,
}

impl Model for Status {
    const NAME: &'static str = "Status";
    const ACCEPTED_KEYS: &'static [&'static str] = &["status_code", "status_message"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::serializer::tests::{assert_accepts_all_keys, parse_with_warnings};
    use serde_json::json;

    #[test]
    fn accepts_its_declared_keys() {
        assert_accepts_all_keys::<Status>();
    }

    #[test]
    fn blank_messages_become_none() {
        for message in ["", "   ", "\t"] {
            let (status, _) =
                parse_with_warnings::<Status>(json!({"status_code": 0, "status_message": message}));
            assert_eq!(status.status_message, None);
            assert_eq!(status.status_code, Some(0));
        }

        let (status, _) = parse_with_warnings::<Status>(json!({"status_message": "  SUCCESS "}));
        assert_eq!(status.status_message.as_deref(), Some("SUCCESS"));
    }
}
