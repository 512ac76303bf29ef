use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{RenderBackend, RenderTarget};
use crate::chart::ChartSpec;
use crate::error::ChartError;

/// Server-side backend: fetches the chart's data source, extracts the row
/// array and pins each panel's y scale to the data it will show.
pub struct FetchBackend {
    http_client: Client,
    base_url: String,
}

/// A chart resolved against live data.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub mount_id: String,
    pub spec: ChartSpec,
    pub rows: Vec<Value>,
}

impl RenderedChart {
    /// Pinned y-domain of the panel plotting `field`.
    #[must_use]
    pub fn y_domain(&self, field: &str) -> Option<[f64; 2]> {
        self.spec
            .panels()
            .iter()
            .find(|panel| panel.descriptor.field == field)
            .and_then(|panel| panel.y_domain)
    }
}

impl FetchBackend {
    /// # Errors
    ///
    /// Returns `ChartError::BackendFetch` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ChartError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ChartError::BackendFetch(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(&self, path_and_query: &str) -> Result<Value, ChartError> {
        let url = format!("{}{}", self.base_url, path_and_query);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ChartError::BackendFetch(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ChartError::BackendFetch(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ChartError::BackendFetch(format!("Failed to get response text: {e}")))?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body_preview = %text.chars().take(500).collect::<String>(),
                "Failed to parse chart data response"
            );
            ChartError::SchemaMismatch(format!("Response is not JSON: {e}"))
        })
    }
}

impl RenderBackend for FetchBackend {
    type Output = RenderedChart;

    async fn render(
        &self,
        target: &RenderTarget,
        spec: ChartSpec,
    ) -> Result<RenderedChart, ChartError> {
        let body = self.fetch(&spec.data_source().url).await?;

        let path = &spec.data_source().extraction_path;
        let mut rows = path
            .extract(&body)
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                ChartError::SchemaMismatch(format!("No row array at '{}'", path.as_str()))
            })?;

        for row in &mut rows {
            spec.apply_transforms(row);
        }

        let spec = spec.pin_y_domains(&rows);
        for panel in spec.panels().iter().filter(|panel| panel.y_domain.is_none()) {
            tracing::warn!(
                field = panel.descriptor.field,
                rows = rows.len(),
                "No numeric values for panel field"
            );
        }

        tracing::debug!(mount = %target.mount_id, rows = rows.len(), "Chart data resolved");

        Ok(RenderedChart {
            mount_id: target.mount_id.clone(),
            spec,
            rows,
        })
    }
}
