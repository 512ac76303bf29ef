//! Data-source resolution for charts.

use serde::Serialize;
use serde_json::Value;

use crate::error::ChartError;
use crate::window::TimeWindow;

/// The page a chart is being built for, identified by its URI path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    path: String,
}

impl PageContext {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resource portion of the page path (`/sensor/10`), without any
    /// trailing slash. `None` for the site root or an empty path.
    #[must_use]
    pub fn resource_path(&self) -> Option<&str> {
        let trimmed = self.path.trim_end_matches('/');
        if trimmed.is_empty() || !trimmed.starts_with('/') {
            return None;
        }
        Some(trimmed)
    }
}

/// Dotted key path to the row array inside a JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractionPath(String);

impl ExtractionPath {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Walk the path through nested objects.
    #[must_use]
    pub fn extract<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.0
            .split('.')
            .filter(|key| !key.is_empty())
            .try_fold(value, |node, key| node.get(key))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource<'a> {
    /// Readings of the resource the page displays, limited to a window.
    PageRelative {
        page: &'a PageContext,
        window: TimeWindow,
    },
    /// Daily energy stats of the resource the page displays.
    PageStats { page: &'a PageContext },
    /// Literal URL with any parameters already baked in.
    Fixed { url: &'a str },
}

/// Where a chart's rows come from and where they sit in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryTarget {
    pub url: String,
    pub extraction_path: ExtractionPath,
}

/// Resolve the fetch URL for a chart.
///
/// # Errors
///
/// Returns `ChartError::MissingResourcePath` when a page-scoped source is
/// requested from a page whose path names no resource.
pub fn resolve(
    source: QuerySource<'_>,
    extraction_path: ExtractionPath,
) -> Result<QueryTarget, ChartError> {
    let url = match source {
        QuerySource::PageRelative { page, window } => {
            let resource = require_resource(page)?;
            format!(
                "/api{resource}/readings?start={}&end={}",
                window.start, window.end
            )
        }
        QuerySource::PageStats { page } => {
            let resource = require_resource(page)?;
            format!("/api{resource}/energy_stats")
        }
        QuerySource::Fixed { url } => url.to_string(),
    };

    tracing::debug!(url = %url, extraction_path = %extraction_path.as_str(), "Resolved query target");

    Ok(QueryTarget {
        url,
        extraction_path,
    })
}

fn require_resource(page: &PageContext) -> Result<&str, ChartError> {
    page.resource_path()
        .ok_or_else(|| ChartError::MissingResourcePath(page.path().to_string()))
}
