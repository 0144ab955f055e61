use async_trait::async_trait;
use serde_json::Value;

use crate::contracts::{AuthContext, Credentials, QueryRequest};
pub mod contracts;
pub mod error;
pub mod logging;
pub mod report_fetcher;

pub use error::GscError;
pub use report_fetcher::{ReportFetcher, run_report};

/// A backend able to answer Search Console search-analytics queries.
///
/// `authenticate` turns service-account credentials into a bearer context;
/// `query` performs exactly one remote call with it. Implementations must
/// report failures through the matching [`GscError`] variant so callers can
/// map them to exit codes.
#[mockall::automock]
#[async_trait]
pub trait SearchAnalyticsClient: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthContext, GscError>;

    async fn query(&self, auth: &AuthContext, request: &QueryRequest) -> Result<Value, GscError>;
}
