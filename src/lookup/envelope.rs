//! The JSON envelope returned by every lookup endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const INVALID_INPUT: &str = "Invalid input";
pub const WORDLIST_UNAVAILABLE: &str = "Unable to load wordlist";

/// Either the matched words or a fixed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Words(Vec<String>),
    Message(String),
}

/// `{success, result}` body. Clients read these exact lowercase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    pub success: bool,
    pub result: Payload,
}

impl LookupResult {
    /// Success is true iff at least one word was found.
    pub fn words(words: Vec<String>) -> Self {
        Self {
            success: !words.is_empty(),
            result: Payload::Words(words),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            result: Payload::Message(message.to_string()),
        }
    }
}

/// A result paired with its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    pub status: StatusCode,
    pub body: LookupResult,
}

impl LookupResponse {
    pub fn found(words: Vec<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: LookupResult::words(words),
        }
    }

    pub fn invalid_input() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: LookupResult::failure(INVALID_INPUT),
        }
    }

    pub fn wordlist_unavailable() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: LookupResult::failure(WORDLIST_UNAVAILABLE),
        }
    }
}

impl IntoResponse for LookupResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn words_serialize_as_array() {
        let body = serde_json::to_value(LookupResult::words(vec!["silent".into()])).unwrap();
        assert_eq!(body, json!({"success": true, "result": ["silent"]}));
    }

    #[test]
    fn keys_are_lowercase() {
        let text = serde_json::to_string(&LookupResult::failure(INVALID_INPUT)).unwrap();
        assert_eq!(text, r#"{"success":false,"result":"Invalid input"}"#);
    }

    #[test]
    fn empty_result_is_unsuccessful_array() {
        let response = LookupResponse::found(Vec::new());
        assert_eq!(response.status, StatusCode::OK);
        let body = serde_json::to_value(response.body).unwrap();
        assert_eq!(body, json!({"success": false, "result": []}));
    }

    #[test]
    fn failures_serialize_as_string() {
        let response = LookupResponse::invalid_input();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body = serde_json::to_value(response.body).unwrap();
        assert_eq!(body, json!({"success": false, "result": "Invalid input"}));

        let response = LookupResponse::wordlist_unavailable();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body.result, Payload::Message(WORDLIST_UNAVAILABLE.into()));
    }
}
