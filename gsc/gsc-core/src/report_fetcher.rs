use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::SearchAnalyticsClient;
use crate::contracts::{AuthContext, ReportConfig, ReportSettings};
use crate::error::GscError;
use crate::logging::{IGscLogger, TracingGscLogger};

/// Authenticates, runs the configured query once and prints the outcome.
pub struct ReportFetcher {
    config: ReportConfig,
    client: Arc<dyn SearchAnalyticsClient>,
    logger: Arc<dyn IGscLogger>,
}

impl ReportFetcher {
    pub fn new(config: ReportConfig, client: Arc<dyn SearchAnalyticsClient>) -> Self {
        Self {
            config,
            client,
            logger: Arc::new(TracingGscLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn IGscLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub async fn authenticate(&self) -> Result<AuthContext, GscError> {
        let credentials = &self.config.credentials;
        tracing::debug!(client_email = credentials.client_email(), "authenticating service account");
        self.client.authenticate(credentials).await
    }

    pub async fn query(&self, auth: &AuthContext) -> Result<Value, GscError> {
        let request = &self.config.request;
        request.validate()?;

        self.logger
            .log_request(&request.site_url, serde_json::to_value(request).unwrap_or_default());
        match self.client.query(auth, request).await {
            Ok(response) => {
                self.logger.log_response(&request.site_url, &response);
                Ok(response)
            }
            Err(err) => {
                self.logger.log_error(&request.site_url, &err);
                Err(err)
            }
        }
    }

    pub async fn fetch(&self) -> Result<Value, GscError> {
        let auth = self.authenticate().await?;
        self.query(&auth).await
    }

    /// Prints the response as indented JSON, or the error message as a
    /// single line. The error is still returned so the caller can choose
    /// an exit code.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<(), GscError> {
        match self.fetch().await {
            Ok(response) => write_report(out, &response),
            Err(err) => Err(report_failure(out, err)),
        }
    }
}

/// Validates `settings` and runs one report. Configuration problems are
/// printed like any other failure and the client is never called.
pub async fn run_report<W: Write>(
    settings: &ReportSettings,
    today: NaiveDate,
    client: Arc<dyn SearchAnalyticsClient>,
    out: &mut W,
    logger: Option<Arc<dyn IGscLogger>>,
) -> Result<(), GscError> {
    let config = match ReportConfig::from_settings(settings, today) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = ?err, "invalid configuration");
            return Err(report_failure(out, err));
        }
    };

    let mut fetcher = ReportFetcher::new(config, client);
    if let Some(logger) = logger {
        fetcher = fetcher.with_logger(logger);
    }
    fetcher.run(out).await
}

pub fn write_report<W: Write>(out: &mut W, response: &Value) -> Result<(), GscError> {
    let text = serde_json::to_string_pretty(response).map_err(std::io::Error::from)?;
    writeln!(out, "{text}")?;
    out.flush()?;
    Ok(())
}

/// The error message on one line; provider messages may span several.
pub fn failure_line(err: &GscError) -> String {
    err.to_string()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn report_failure<W: Write>(out: &mut W, err: GscError) -> GscError {
    let written = writeln!(out, "{}", failure_line(&err)).and_then(|_| out.flush());
    if let Err(io_err) = written {
        tracing::warn!(error = %io_err, "could not print failure message");
    }
    err
}
