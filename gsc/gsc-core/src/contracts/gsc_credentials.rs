use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::GscError;

/// Fields read from a Google service-account JSON key file. Other fields in
/// the file are ignored.
#[derive(Serialize, Deserialize, Clone)]
pub struct ServiceAccountKey {
    pub private_key: String,
    pub client_email: String,
}

/// Service-account identity with a normalized PEM private key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_email: String,
    private_key: String,
}

impl Credentials {
    /// Builds credentials from the stored form of the key, where newlines may
    /// be written as the two characters `\n`.
    pub fn new(client_email: impl Into<String>, raw_private_key: &str) -> Result<Self, GscError> {
        let client_email = client_email.into().trim().to_string();
        if client_email.is_empty() {
            return Err(GscError::config("client email is empty"));
        }
        let private_key = normalize_private_key(raw_private_key)?;
        Ok(Self { client_email, private_key })
    }

    pub fn from_key_file(path: &Path) -> Result<Self, GscError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GscError::config(format!("cannot read key file {}: {e}", path.display()))
        })?;
        let key: ServiceAccountKey = serde_json::from_str(&content).map_err(|e| {
            GscError::config(format!("key file {} is not a service account key: {e}", path.display()))
        })?;
        Self::new(key.client_email, &key.private_key)
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Replaces literal `\n` escapes with real newlines and checks that the
/// result is a single well-formed PEM block.
pub fn normalize_private_key(raw: &str) -> Result<String, GscError> {
    let key = raw.trim().replace("\\n", "\n");
    if key.is_empty() {
        return Err(GscError::config("private key is empty"));
    }
    validate_pem(&key)?;
    let mut key = key.trim_end().to_string();
    key.push('\n');
    Ok(key)
}

fn validate_pem(key: &str) -> Result<(), GscError> {
    let invalid = |reason: &str| GscError::config(format!("private key is not a valid PEM block: {reason}"));

    let mut lines = key.lines().map(str::trim).filter(|l| !l.is_empty());
    let first = lines.next().ok_or_else(|| invalid("no content"))?;
    let label = first
        .strip_prefix("-----BEGIN ")
        .and_then(|rest| rest.strip_suffix("-----"))
        .filter(|label| !label.is_empty())
        .ok_or_else(|| invalid("missing BEGIN line"))?;

    let rest: Vec<&str> = lines.collect();
    let (last, body) = rest.split_last().ok_or_else(|| invalid("missing END line"))?;
    if *last != format!("-----END {label}-----") {
        return Err(invalid("missing END line"));
    }
    if body.is_empty() {
        return Err(invalid("empty body"));
    }
    let is_base64 = |c: char| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=');
    if body.iter().any(|line| !line.chars().all(is_base64)) {
        return Err(invalid("body is not base64"));
    }
    Ok(())
}
