use serde_json::Value;
use std::fmt::Debug;

use crate::GscError;

pub trait IGscLogger: Send + Sync + Debug {
    fn log_request(&self, site_url: &str, request_json: Value);
    fn log_response(&self, site_url: &str, response_json: &Value);
    fn log_error(&self, site_url: &str, error: &GscError);
}

/// Default logger; emits `tracing` events and never touches stdout.
#[derive(Debug, Default)]
pub struct TracingGscLogger;

impl IGscLogger for TracingGscLogger {
    fn log_request(&self, site_url: &str, request_json: Value) {
        tracing::debug!(site_url, request = %request_json, "sending search analytics query");
    }

    fn log_response(&self, site_url: &str, response_json: &Value) {
        let rows = response_json
            .get("rows")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        tracing::info!(site_url, rows, "search analytics query completed");
    }

    fn log_error(&self, site_url: &str, error: &GscError) {
        tracing::error!(
            site_url,
            status = error.status(),
            exit_code = error.exit_code(),
            error = ?error,
            "search analytics query failed"
        );
    }
}
