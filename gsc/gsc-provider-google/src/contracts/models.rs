use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GoogleAccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: i64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/*
{
    "error": "invalid_grant",
    "error_description": "Invalid JWT Signature."
}
*/
/// Error body of the OAuth token endpoint.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GoogleTokenError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

/*
{
    "error": {
        "code": 403,
        "message": "User does not have sufficient permission for site 'https://example.com/'. See also: https://support.google.com/webmasters/answer/2451999.",
        "status": "PERMISSION_DENIED"
    }
}
*/
/// Standard error envelope of Google REST APIs.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GoogleApiError {
    pub error: GoogleApiErrorBody,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GoogleApiErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Human-readable reason for a rejected token exchange.
pub fn describe_token_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<GoogleTokenError>(body) {
        Ok(GoogleTokenError { error, error_description: Some(description) }) => {
            format!("{error}: {description}")
        }
        Ok(GoogleTokenError { error, error_description: None }) => error,
        Err(_) => fallback_message(status, body),
    }
}

/// Human-readable reason for a rejected API call: the envelope's `message`
/// when present, else the raw body.
pub fn describe_api_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<GoogleApiError>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => fallback_message(status, body),
    }
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        body.to_string()
    }
}
