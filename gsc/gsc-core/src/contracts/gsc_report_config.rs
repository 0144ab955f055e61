use std::fmt;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate};

use super::{Credentials, Dimension, QueryRequest, SearchType};
use crate::GscError;

pub const ENV_PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const ENV_CLIENT_EMAIL: &str = "CLIENT_EMAIL";
pub const ENV_WEBSITE: &str = "WEBSITE";
pub const ENV_KEY_FILE: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const ENV_START_DATE: &str = "START_DATE";
pub const ENV_END_DATE: &str = "END_DATE";
pub const ENV_DIMENSIONS: &str = "DIMENSIONS";
pub const ENV_SEARCH_TYPE: &str = "SEARCH_TYPE";
pub const ENV_ROW_LIMIT: &str = "ROW_LIMIT";

/// Length of the date range used when no dates are configured.
pub const DEFAULT_RANGE_DAYS: i64 = 28;

/// Raw settings as found in the environment or on the command line.
/// Nothing here is validated; see [`ReportConfig::from_settings`].
#[derive(Clone, Default)]
pub struct ReportSettings {
    pub private_key: Option<String>,
    pub client_email: Option<String>,
    pub key_file: Option<PathBuf>,
    pub website: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dimensions: Vec<String>,
    pub search_type: Option<String>,
    pub row_limit: Option<String>,
}

impl ReportSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads every setting through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            private_key: get(ENV_PRIVATE_KEY),
            client_email: get(ENV_CLIENT_EMAIL),
            key_file: get(ENV_KEY_FILE).map(PathBuf::from),
            website: get(ENV_WEBSITE),
            start_date: get(ENV_START_DATE),
            end_date: get(ENV_END_DATE),
            dimensions: get(ENV_DIMENSIONS)
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|d| !d.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            search_type: get(ENV_SEARCH_TYPE),
            row_limit: get(ENV_ROW_LIMIT),
        }
    }
}

impl fmt::Debug for ReportSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportSettings")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("client_email", &self.client_email)
            .field("key_file", &self.key_file)
            .field("website", &self.website)
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("dimensions", &self.dimensions)
            .field("search_type", &self.search_type)
            .field("row_limit", &self.row_limit)
            .finish()
    }
}

/// Validated configuration for one report run.
#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub credentials: Credentials,
    pub request: QueryRequest,
}

impl ReportConfig {
    /// Validates `settings` once. `today` anchors the default date range.
    pub fn from_settings(settings: &ReportSettings, today: NaiveDate) -> Result<Self, GscError> {
        let site_url = settings
            .website
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GscError::config(format!("missing required setting {ENV_WEBSITE}")))?;

        let credentials = load_credentials(settings)?;
        let (start_date, end_date) = date_range(settings, today)?;

        let dimensions = settings
            .dimensions
            .iter()
            .map(|d| d.parse::<Dimension>())
            .collect::<Result<Vec<_>, _>>()?;
        let search_type = settings
            .search_type
            .as_deref()
            .map(str::parse::<SearchType>)
            .transpose()?;
        let row_limit = settings
            .row_limit
            .as_deref()
            .map(|v| {
                v.trim().parse::<u32>().map_err(|_| {
                    GscError::config(format!("{ENV_ROW_LIMIT} must be a positive integer, got '{v}'"))
                })
            })
            .transpose()?;

        let request = QueryRequest {
            search_type,
            row_limit,
            ..QueryRequest::new(site_url, start_date, end_date).with_dimensions(dimensions)
        };
        request.validate()?;

        Ok(Self { credentials, request })
    }
}

fn load_credentials(settings: &ReportSettings) -> Result<Credentials, GscError> {
    match (&settings.private_key, &settings.client_email, &settings.key_file) {
        (Some(key), Some(email), _) => Credentials::new(email.as_str(), key),
        (None, None, Some(path)) => Credentials::from_key_file(path),
        (Some(_), None, _) => Err(GscError::config(format!("missing required setting {ENV_CLIENT_EMAIL}"))),
        (None, Some(_), _) => Err(GscError::config(format!("missing required setting {ENV_PRIVATE_KEY}"))),
        (None, None, None) => Err(GscError::config(format!(
            "missing required settings {ENV_PRIVATE_KEY} and {ENV_CLIENT_EMAIL} (or {ENV_KEY_FILE})"
        ))),
    }
}

fn date_range(settings: &ReportSettings, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), GscError> {
    let start = settings.start_date.as_deref().map(|v| parse_date(ENV_START_DATE, v)).transpose()?;
    let end = settings.end_date.as_deref().map(|v| parse_date(ENV_END_DATE, v)).transpose()?;
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        (None, None) => Ok((today - Duration::days(DEFAULT_RANGE_DAYS - 1), today)),
        (Some(_), None) => Err(GscError::config(format!("{ENV_END_DATE} is required when {ENV_START_DATE} is set"))),
        (None, Some(_)) => Err(GscError::config(format!("{ENV_START_DATE} is required when {ENV_END_DATE} is set"))),
    }
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate, GscError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| GscError::config(format!("{name} must be a date in YYYY-MM-DD form, got '{value}'")))
}
