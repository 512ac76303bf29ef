use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::pipeline::{page_chart, PageChart, PageRequest};
use crate::query::PageContext;
use crate::render::render;
use crate::window::{self, SystemClock, WindowMode, MAX_OFFSET_DAYS};

#[derive(Debug, Deserialize, IntoParams)]
pub struct WindowQuery {
    /// Days of history ending now (default from `READINGS_WINDOW_DAYS`)
    pub days: Option<i64>,
}

fn readings_chart(state: &AppState, id: i32, query: &WindowQuery) -> AppResult<PageChart> {
    let offset_days = query.days.unwrap_or(state.config.readings_window_days);
    if !window::is_valid_offset(offset_days) {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {MAX_OFFSET_DAYS}, got {offset_days}"
        )));
    }

    let page = PageContext::new(format!("/sensor/{id}"));
    Ok(page_chart(
        PageRequest::Readings {
            page: &page,
            window: WindowMode::Relative { offset_days },
        },
        &SystemClock,
        state.config.panel_width,
    )?)
}

/// Vega-Lite spec for a sensor's recent readings
#[utoipa::path(
    get,
    path = "/specs/sensor/{id}/readings",
    params(
        ("id" = i32, Path, description = "Sensor id"),
        WindowQuery,
    ),
    responses(
        (status = 200, description = "Vega-Lite v3 document", body = serde_json::Value),
        (status = 400, description = "Invalid window"),
    ),
    tag = "specs"
)]
pub async fn readings_spec(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<WindowQuery>,
) -> AppResult<Json<Value>> {
    let chart = readings_chart(&state, id, &query)?;
    Ok(Json(chart.spec.to_vega_lite()))
}

/// Readings spec with y scales pinned to the data currently in the window
#[utoipa::path(
    get,
    path = "/specs/sensor/{id}/readings/resolved",
    params(
        ("id" = i32, Path, description = "Sensor id"),
        WindowQuery,
    ),
    responses(
        (status = 200, description = "Vega-Lite v3 document with pinned y domains", body = serde_json::Value),
        (status = 400, description = "Invalid window"),
        (status = 502, description = "Data API unreachable or returned an unexpected shape"),
    ),
    tag = "specs"
)]
pub async fn resolved_readings_spec(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<WindowQuery>,
) -> AppResult<Json<Value>> {
    let chart = readings_chart(&state, id, &query)?;
    let rendered = render(state.fetch_backend.as_ref(), &chart.target, chart.spec).await?;
    Ok(Json(rendered.spec.to_vega_lite()))
}

/// Vega-Lite spec for a sensor's daily energy stats
#[utoipa::path(
    get,
    path = "/specs/sensor/{id}/energy_stats",
    params(
        ("id" = i32, Path, description = "Sensor id"),
    ),
    responses(
        (status = 200, description = "Vega-Lite v3 document", body = serde_json::Value),
    ),
    tag = "specs"
)]
pub async fn energy_stats_spec(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Value>> {
    let page = PageContext::new(format!("/sensor/{id}"));
    let chart = page_chart(
        PageRequest::EnergyStats { page: &page },
        &SystemClock,
        state.config.panel_width,
    )?;
    Ok(Json(chart.spec.to_vega_lite()))
}
