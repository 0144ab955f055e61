use serde::{Deserialize, Serialize};

/// JWT claim set for the service-account token exchange.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}
