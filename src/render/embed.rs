use serde::Serialize;

use super::{RenderBackend, RenderTarget};
use crate::chart::ChartSpec;
use crate::error::ChartError;

/// Browser backend: emits the mount element and a `vegaEmbed` call. The
/// page's vega-embed script performs the fetch and drawing client-side.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedBackend;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFragment {
    pub mount_id: String,
    pub html: String,
}

impl RenderBackend for EmbedBackend {
    type Output = EmbedFragment;

    async fn render(
        &self,
        target: &RenderTarget,
        spec: ChartSpec,
    ) -> Result<EmbedFragment, ChartError> {
        let spec_json = script_safe(&spec.to_vega_lite().to_string());
        // A single-bool struct always serializes.
        let options_json = script_safe(&serde_json::to_string(&target.options).unwrap_or_default());
        let html = format!(
            "<div id=\"{id}\"></div>\n<script>\nvegaEmbed('#{id}', {spec_json}, {options_json});\n</script>\n",
            id = target.mount_id,
        );

        Ok(EmbedFragment {
            mount_id: target.mount_id.clone(),
            html,
        })
    }
}

// JSON inside <script> must not close the tag early.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
