pub mod google_claims;
pub use google_claims::GoogleClaims;

pub mod models;
pub use models::{
    GoogleAccessToken,
    GoogleTokenError,
    GoogleApiError,
    GoogleApiErrorBody,
    describe_api_error,
    describe_token_error,
};
