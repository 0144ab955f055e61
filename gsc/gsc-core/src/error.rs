use std::io;

/// Every way a report run can fail.
///
/// `Display` is the single line printed to the user; the fields keep the
/// structured detail for logging.
#[derive(Debug, thiserror::Error)]
pub enum GscError {
    /// A required setting is missing or malformed. Raised before any network call.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The key could not be used or the token exchange was rejected.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// The search-analytics call failed. `status` is `None` for transport failures.
    #[error("query failed{}: {message}", status_suffix(.status))]
    Query { status: Option<u16>, message: String },

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

impl GscError {
    pub fn config(message: impl Into<String>) -> Self {
        GscError::Config { message: message.into() }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        GscError::Auth { message: message.into() }
    }

    pub fn query(status: Option<u16>, message: impl Into<String>) -> Self {
        GscError::Query { status, message: message.into() }
    }

    /// Process exit code for this kind of failure. Success is 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            GscError::Output(_) => 1,
            GscError::Config { .. } => 2,
            GscError::Auth { .. } => 3,
            GscError::Query { .. } => 4,
        }
    }

    /// HTTP status of a rejected query, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GscError::Query { status, .. } => *status,
            _ => None,
        }
    }
}
