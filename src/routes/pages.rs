use axum::{
    extract::{OriginalUri, Path, State},
    response::Html,
};

use crate::common::AppState;
use crate::error::AppResult;
use crate::pipeline::{page_chart, PageRequest};
use crate::query::PageContext;
use crate::render::{render, EmbedBackend, EmbedFragment};
use crate::window::{SystemClock, WindowMode};

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{{title}}</title>
    <script src="https://cdn.jsdelivr.net/npm/vega@4"></script>
    <script src="https://cdn.jsdelivr.net/npm/vega-lite@3"></script>
    <script src="https://cdn.jsdelivr.net/npm/vega-embed@3"></script>
</head>
<body>
    <h1>{{title}}</h1>
{{charts}}</body>
</html>
"#;

fn page_html(title: &str, fragments: &[EmbedFragment]) -> String {
    let charts: String = fragments.iter().map(|f| f.html.as_str()).collect();
    PAGE_TEMPLATE
        .replace("{{title}}", title)
        .replace("{{charts}}", &charts)
}

/// Sensor page: recent readings and daily energy stats for one sensor.
#[utoipa::path(
    get,
    path = "/sensor/{id}",
    params(
        ("id" = i32, Path, description = "Sensor id"),
    ),
    responses(
        (status = 200, description = "HTML page with embedded charts", body = String, content_type = "text/html"),
    ),
    tag = "pages"
)]
pub async fn sensor_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Html<String>> {
    let config = &state.config;
    let page = PageContext::new(uri.path());
    let requests = [
        PageRequest::Readings {
            page: &page,
            window: WindowMode::Relative {
                offset_days: config.readings_window_days,
            },
        },
        PageRequest::EnergyStats { page: &page },
    ];

    let backend = EmbedBackend;
    let mut fragments = Vec::with_capacity(requests.len());
    for request in requests {
        let chart = page_chart(request, &SystemClock, config.panel_width)?;
        fragments.push(render(&backend, &chart.target, chart.spec).await?);
    }

    tracing::debug!(sensor_id = id, path = %page.path(), "Serving sensor page");

    Ok(Html(page_html(&format!("Sensor {id}"), &fragments)))
}

/// Demo page: a fixed window of sensor 10's readings.
#[utoipa::path(
    get,
    path = "/demo",
    responses(
        (status = 200, description = "HTML page with embedded chart", body = String, content_type = "text/html"),
    ),
    tag = "pages"
)]
pub async fn demo_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let chart = page_chart(PageRequest::Demo, &SystemClock, state.config.panel_width)?;
    let fragment = render(&EmbedBackend, &chart.target, chart.spec).await?;

    Ok(Html(page_html("Sensor Data", &[fragment])))
}
