//! Judge API response envelope

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `{ "error": string | null, "response": T }` wrapper of every judge response
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default = "Option::default")]
    pub response: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Payload of a successful response
    ///
    /// A non-null `error` wins over any payload sent alongside it.
    pub fn into_result(self) -> AppResult<T> {
        if let Some(error) = self.error {
            return Err(AppError::FetchFailed(error));
        }
        self.response
            .ok_or_else(|| AppError::FetchFailed("judge API sent an empty response".to_string()))
    }

    /// Payload that the judge may legitimately send as `null`
    pub fn into_optional(self) -> AppResult<Option<T>> {
        match self.error {
            Some(error) => Err(AppError::FetchFailed(error)),
            None => Ok(self.response),
        }
    }

    /// Acknowledgement without payload
    pub fn into_ack(self) -> AppResult<()> {
        match self.error {
            Some(error) => Err(AppError::FetchFailed(error)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceData;

    #[test]
    fn test_error_short_circuits_payload() {
        let envelope: ApiEnvelope<ResourceData> = serde_json::from_str(
            r#"{"ok": false, "error": "Output for submission 3 test 2 does not exist",
                "response": {"data": "partial"}}"#,
        )
        .unwrap();

        let err = envelope.into_result().unwrap_err();
        assert_eq!(
            err.display_message(),
            "Output for submission 3 test 2 does not exist"
        );
    }

    #[test]
    fn test_success_payload() {
        let envelope: ApiEnvelope<ResourceData> = serde_json::from_str(
            r#"{"ok": true, "response": {"filename": "input.txt", "data": "1 2", "size": 3}}"#,
        )
        .unwrap();

        let data = envelope.into_result().unwrap();
        assert_eq!(data.data, "1 2");
        assert_eq!(data.filename.as_deref(), Some("input.txt"));
    }

    #[test]
    fn test_ack_and_missing_payload() {
        let ack: ApiEnvelope<serde_json::Value> = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(ack.into_ack().is_ok());

        let empty: ApiEnvelope<u64> = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(matches!(empty.into_result(), Err(AppError::FetchFailed(_))));
    }
}
