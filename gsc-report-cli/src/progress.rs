use std::fmt;
use std::time::Duration;

use anyhow::Result;
use gsc_core::GscError;
use gsc_core::logging::{IGscLogger, TracingGscLogger};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

/// Shows a spinner on stderr while the query is in flight, then hands the
/// event on to the tracing logger. The spinner stays hidden when stderr is
/// not a terminal.
pub struct SpinnerLogger {
    inner: TracingGscLogger,
    spinner: ProgressBar,
}

impl SpinnerLogger {
    pub fn new() -> Result<Self> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
                .template("{spinner:.green} {msg}")?,
        );
        Ok(Self {
            inner: TracingGscLogger,
            spinner,
        })
    }
}

impl fmt::Debug for SpinnerLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinnerLogger").finish_non_exhaustive()
    }
}

impl IGscLogger for SpinnerLogger {
    fn log_request(&self, site_url: &str, request_json: Value) {
        self.spinner.set_message(format!("Querying search analytics for {site_url}"));
        self.spinner.enable_steady_tick(Duration::from_millis(100));
        self.inner.log_request(site_url, request_json);
    }

    fn log_response(&self, site_url: &str, response_json: &Value) {
        self.spinner.finish_and_clear();
        self.inner.log_response(site_url, response_json);
    }

    fn log_error(&self, site_url: &str, error: &GscError) {
        self.spinner.finish_and_clear();
        self.inner.log_error(site_url, error);
    }
}
