use chrono::NaiveDate;
use serde::Serialize;

use super::{Dimension, SearchType};
use crate::GscError;

/// Largest `rowLimit` the search-analytics endpoint accepts.
pub const MAX_ROW_LIMIT: u32 = 25_000;

/// One search-analytics query. Serializes to the JSON request body; the site
/// URL travels in the request path instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    #[serde(skip)]
    pub site_url: String,

    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,

    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub search_type: Option<SearchType>,

    #[serde(rename = "rowLimit", skip_serializing_if = "Option::is_none")]
    pub row_limit: Option<u32>,
}

impl QueryRequest {
    pub fn new(site_url: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            site_url: site_url.into(),
            start_date,
            end_date,
            dimensions: vec![],
            search_type: None,
            row_limit: None,
        }
    }

    pub fn with_dimensions(mut self, dimensions: Vec<Dimension>) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Local checks that would otherwise be a wasted round trip.
    pub fn validate(&self) -> Result<(), GscError> {
        if self.site_url.trim().is_empty() {
            return Err(GscError::config("site url is empty"));
        }
        if self.start_date > self.end_date {
            return Err(GscError::config(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        if let Some(limit) = self.row_limit
            && !(1..=MAX_ROW_LIMIT).contains(&limit)
        {
            return Err(GscError::config(format!(
                "row limit must be between 1 and {MAX_ROW_LIMIT}, got {limit}"
            )));
        }
        Ok(())
    }
}
