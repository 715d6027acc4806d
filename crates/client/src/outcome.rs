//! Call outcomes and status classification.

use std::borrow::Cow;

use serde_json::{json, Value};

/// Message shown when the backend could not be reached at all.
pub const CONTACT_SUPPORT_MESSAGE: &str =
    "Ooops, we are expecting technical difficulties. Please contact hello@openmeal.org.";

/// `error` field of the synthesized fallback payload.
pub const UNKNOWN_ERROR: &str = "unknown error calling API";

/// Payload used when no server response body is available.
pub fn generic_failure_payload() -> Value {
    json!({
        "error": UNKNOWN_ERROR,
        "errorMessage": CONTACT_SUPPORT_MESSAGE,
    })
}

/// Result of one backend call. Both arms carry the response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure(Value),
}

impl Outcome {
    /// Failure with [`generic_failure_payload`].
    pub fn generic_failure() -> Self {
        Outcome::Failure(generic_failure_payload())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn payload(&self) -> &Value {
        match self {
            Outcome::Success(v) | Outcome::Failure(v) => v,
        }
    }

    pub fn into_payload(self) -> Value {
        match self {
            Outcome::Success(v) | Outcome::Failure(v) => v,
        }
    }

    /// String field of an object payload.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.payload().get(name).and_then(Value::as_str)
    }

    /// User-facing message of a failure: `errorMessage`, then `error`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(_) => self.str_field("errorMessage").or(self.str_field("error")),
        }
    }

    /// What to show the user for a failure: [`Outcome::error_message`], else
    /// a text body as is, else the compact JSON body. `None` for a success
    /// and for a failure with nothing to show (`null`, `""` or `{}`).
    pub fn user_message(&self) -> Option<Cow<'_, str>> {
        let Outcome::Failure(payload) = self else {
            return None;
        };
        if let Some(message) = self.error_message() {
            return Some(Cow::Borrowed(message));
        }
        match payload {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(Cow::Borrowed(text.as_str())),
            Value::Object(map) if map.is_empty() => None,
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

/// Lifecycle of a tracked call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingStage {
    #[default]
    NotAttempted,
    Loading,
    Succeeded,
    Failed,
}

impl LoadingStage {
    pub fn label(&self) -> &'static str {
        match self {
            LoadingStage::NotAttempted => "Not Attempted Yet",
            LoadingStage::Loading => "Loading",
            LoadingStage::Succeeded => "Success",
            LoadingStage::Failed => "Failed",
        }
    }
}

impl From<&Outcome> for LoadingStage {
    fn from(outcome: &Outcome) -> Self {
        if outcome.is_success() {
            LoadingStage::Succeeded
        } else {
            LoadingStage::Failed
        }
    }
}

/// Decode a response body: JSON when it parses, the text as a JSON string
/// otherwise, `null` when empty.
pub fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()),
    }
}

/// Classify a received response. 200 and 201 succeed; everything else
/// fails, carrying the body when there is one.
pub fn classify(status: u16, body: &[u8]) -> Outcome {
    let payload = decode_body(body);
    match status {
        200 | 201 => Outcome::Success(payload),
        _ if payload.is_null() => Outcome::generic_failure(),
        _ => Outcome::Failure(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_iff_200_or_201() {
        for status in [100u16, 199, 200, 201, 202, 204, 301, 400, 401, 404, 409, 500, 503] {
            let outcome = classify(status, br#"{"ok":true}"#);
            assert_eq!(
                outcome.is_success(),
                status == 200 || status == 201,
                "status {}",
                status
            );
        }
    }

    #[test]
    fn failure_carries_server_body() {
        let outcome = classify(409, br#"{"errorMessage":"email taken"}"#);
        assert_eq!(outcome, Outcome::Failure(json!({"errorMessage": "email taken"})));
        assert_eq!(outcome.error_message(), Some("email taken"));
    }

    #[test]
    fn failure_without_body_is_generic() {
        assert_eq!(classify(502, b""), Outcome::generic_failure());
    }

    #[test]
    fn empty_success_body_is_null() {
        assert_eq!(classify(200, b""), Outcome::Success(Value::Null));
    }

    #[test]
    fn non_json_body_kept_as_text() {
        let outcome = classify(500, b"Internal Server Error");
        assert_eq!(
            outcome,
            Outcome::Failure(Value::String("Internal Server Error".into()))
        );
    }

    #[test]
    fn generic_payload_shape() {
        let outcome = Outcome::generic_failure();
        assert_eq!(outcome.str_field("error"), Some(UNKNOWN_ERROR));
        assert_eq!(outcome.error_message(), Some(CONTACT_SUPPORT_MESSAGE));
    }

    #[test]
    fn error_message_falls_back_to_error_field() {
        let outcome = Outcome::Failure(json!({"error": "could not connect to database"}));
        assert_eq!(outcome.error_message(), Some("could not connect to database"));
        assert_eq!(
            Outcome::Success(json!({"errorMessage": "x"})).error_message(),
            None
        );
    }

    #[test]
    fn user_message_surfaces_any_server_body() {
        let text = classify(500, b"database down");
        assert_eq!(text.user_message().as_deref(), Some("database down"));

        let other = classify(400, br#"{"message":"restaurant closed"}"#);
        assert_eq!(
            other.user_message().as_deref(),
            Some(r#"{"message":"restaurant closed"}"#)
        );

        let keyed = Outcome::Failure(json!({"errorMessage": "email taken", "error": "x"}));
        assert_eq!(keyed.user_message().as_deref(), Some("email taken"));
    }

    #[test]
    fn user_message_is_none_without_content() {
        assert_eq!(Outcome::Failure(Value::Null).user_message(), None);
        assert_eq!(Outcome::Failure(json!({})).user_message(), None);
        assert_eq!(Outcome::Success(json!("ok")).user_message(), None);
        assert_eq!(
            Outcome::generic_failure().user_message().as_deref(),
            Some(CONTACT_SUPPORT_MESSAGE)
        );
    }

    #[test]
    fn stage_from_outcome() {
        assert_eq!(
            LoadingStage::from(&Outcome::Success(Value::Null)),
            LoadingStage::Succeeded
        );
        assert_eq!(
            LoadingStage::from(&Outcome::generic_failure()),
            LoadingStage::Failed
        );
        assert_eq!(LoadingStage::default(), LoadingStage::NotAttempted);
        assert_eq!(LoadingStage::Failed.label(), "Failed");
    }
}
