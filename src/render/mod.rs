//! Hand-off of built charts to a rendering backend.
//!
//! Backends own fetching and drawing. Their errors pass through untouched:
//! nothing here retries or swallows a failure.

pub mod embed;
pub mod fetch;

use std::future::Future;

use serde::Serialize;

use crate::chart::ChartSpec;
use crate::error::ChartError;

pub use embed::{EmbedBackend, EmbedFragment};
pub use fetch::{FetchBackend, RenderedChart};

/// Options passed to the renderer alongside the spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    /// Export / view-source action menu.
    pub actions: bool,
}

impl RenderOptions {
    #[must_use]
    pub fn non_interactive() -> Self {
        Self { actions: false }
    }
}

/// Mount point a chart is drawn into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub mount_id: String,
    pub options: RenderOptions,
}

impl RenderTarget {
    #[must_use]
    pub fn new(mount_id: impl Into<String>) -> Self {
        Self {
            mount_id: mount_id.into(),
            options: RenderOptions::non_interactive(),
        }
    }
}

pub trait RenderBackend {
    type Output;

    fn render(
        &self,
        target: &RenderTarget,
        spec: ChartSpec,
    ) -> impl Future<Output = Result<Self::Output, ChartError>> + Send;
}

/// Hand `spec` to `backend` for drawing into `target`.
///
/// # Errors
///
/// Whatever the backend reports, unchanged.
pub async fn render<B: RenderBackend>(
    backend: &B,
    target: &RenderTarget,
    spec: ChartSpec,
) -> Result<B::Output, ChartError> {
    tracing::debug!(
        mount = %target.mount_id,
        url = %spec.data_source().url,
        panels = spec.panels().len(),
        "Rendering chart"
    );
    backend.render(target, spec).await
}
