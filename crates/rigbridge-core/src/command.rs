//! The JSON command envelope.
//!
//! One full JSON object per request over the stream socket, one full JSON
//! object back. The `status` field is the success/error discriminator; on
//! success the payload rides in `result`, on failure the text rides in
//! `message`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound command request.
///
/// # Examples
///
/// ```
/// use rigbridge_core::Request;
///
/// let req: Request = serde_json::from_str(
///     r#"{"type": "inspect_humanoid_rig", "params": {"mesh_name": "Body"}}"#,
/// )
/// .unwrap();
/// assert_eq!(req.command, "inspect_humanoid_rig");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// The command name to dispatch on.
    #[serde(rename = "type")]
    pub command: String,

    /// Named parameters for the command. Missing means "no parameters".
    #[serde(default = "empty_params")]
    pub params: Value,
}

impl Request {
    /// Creates a request with the given command name and parameters.
    #[must_use]
    pub fn new(command: impl Into<String>, params: Value) -> Self {
        Self {
            command: command.into(),
            params,
        }
    }

    /// Returns the parameters, substituting an empty object for `null`.
    #[must_use]
    pub fn params_or_empty(&self) -> Value {
        if self.params.is_null() {
            empty_params()
        } else {
            self.params.clone()
        }
    }
}

fn empty_params() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Success/error discriminator on a [`Response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The command completed and `result` holds its payload.
    Success,
    /// The command failed and `message` holds the failure text.
    Error,
}

/// An outbound command response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Success/error discriminator.
    pub status: ResponseStatus,

    /// Result payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Failure text, present on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    /// Builds a success response carrying `result`.
    #[must_use]
    pub const fn success(result: Value) -> Self {
        Self {
            status: ResponseStatus::Success,
            result: Some(result),
            message: None,
        }
    }

    /// Builds an error response carrying `message`.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            result: None,
            message: Some(message.into()),
        }
    }

    /// Returns `true` if the status is `success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_without_params_gets_empty_object() {
        let req: Request = serde_json::from_str(r#"{"type": "get_scene_info"}"#).unwrap();
        assert_eq!(req.command, "get_scene_info");
        assert_eq!(req.params_or_empty(), json!({}));
    }

    #[test]
    fn null_params_normalize_to_empty_object() {
        let req: Request =
            serde_json::from_str(r#"{"type": "get_scene_info", "params": null}"#).unwrap();
        assert_eq!(req.params_or_empty(), json!({}));
    }

    #[test]
    fn success_response_omits_message() {
        let resp = Response::success(json!({"ok": true}));
        let text = serde_json::to_string(&resp).unwrap();
        assert!(text.contains("\"status\":\"success\""));
        assert!(!text.contains("message"));
    }

    #[test]
    fn error_response_carries_text() {
        let resp = Response::error("Object not found: Cube");
        assert!(!resp.is_success());
        let text = serde_json::to_string(&resp).unwrap();
        assert!(text.contains("\"status\":\"error\""));
        assert!(text.contains("Object not found: Cube"));
    }
}
