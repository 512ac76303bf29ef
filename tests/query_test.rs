//! Tests for query target resolution and the page pipeline.
//!
//! Run with: cargo test --test query_test

use chrono::{TimeZone, Utc};
use serde_json::json;
use sensor_charts::error::ChartError;
use sensor_charts::pipeline::{page_chart, PageRequest};
use sensor_charts::query::{self, ExtractionPath, PageContext, QuerySource};
use sensor_charts::window::{FixedClock, TimeWindow, WindowMode};

#[test]
fn page_relative_url_embeds_resource_and_window() {
    let page = PageContext::new("/sensor/10");
    let target = query::resolve(
        QuerySource::PageRelative {
            page: &page,
            window: TimeWindow::new(100, 200),
        },
        ExtractionPath::new("data.readings"),
    )
    .expect("resource present");

    assert_eq!(target.url, "/api/sensor/10/readings?start=100&end=200");
    assert_eq!(target.extraction_path.as_str(), "data.readings");
}

#[test]
fn trailing_slash_does_not_change_resource() {
    let page = PageContext::new("/sensor/10/");
    assert_eq!(page.resource_path(), Some("/sensor/10"));
}

#[test]
fn missing_resource_fails_fast() {
    for path in ["", "/"] {
        let page = PageContext::new(path);
        let err = query::resolve(
            QuerySource::PageRelative {
                page: &page,
                window: TimeWindow::new(100, 200),
            },
            ExtractionPath::new("data.readings"),
        )
        .unwrap_err();

        assert!(
            matches!(err, ChartError::MissingResourcePath(ref p) if p == path),
            "path {path:?} gave {err:?}"
        );
    }
}

#[test]
fn stats_url_has_no_window() {
    let page = PageContext::new("/sensor/7");
    let target = query::resolve(QuerySource::PageStats { page: &page }, ExtractionPath::new("stats"))
        .expect("resource present");

    assert_eq!(target.url, "/api/sensor/7/energy_stats");
}

#[test]
fn fixed_url_bypasses_page() {
    let url = "/api/sensor/10/readings?start=1548210420&end=1548220420";
    let target = query::resolve(QuerySource::Fixed { url }, ExtractionPath::new("data.readings"))
        .expect("fixed urls always resolve");

    assert_eq!(target.url, url);
}

#[test]
fn extraction_path_walks_nested_objects() {
    let body = json!({
        "message": "ok",
        "data": { "readings": [{ "batt_V": 1.2 }] },
    });

    let rows = ExtractionPath::new("data.readings").extract(&body);
    assert_eq!(rows, Some(&json!([{ "batt_V": 1.2 }])));

    assert!(ExtractionPath::new("stats").extract(&body).is_none());
    assert!(ExtractionPath::new("data.readings.missing").extract(&body).is_none());
}

#[test]
fn readings_page_chart_uses_relative_window() {
    let now = Utc.timestamp_opt(1_548_220_420, 0).single().expect("valid timestamp");
    let page = PageContext::new("/sensor/10");

    let chart = page_chart(
        PageRequest::Readings {
            page: &page,
            window: WindowMode::Relative { offset_days: 5 },
        },
        &FixedClock(now),
        1000,
    )
    .expect("chart builds");

    assert_eq!(
        chart.spec.data_source().url,
        "/api/sensor/10/readings?start=1547788420&end=1548220420"
    );
    assert_eq!(chart.target.mount_id, "reading-charts");
    assert!(!chart.target.options.actions);
    assert_eq!(chart.spec.panels().len(), 5);
}

#[test]
fn energy_stats_page_chart_needs_no_window() {
    let now = Utc.timestamp_opt(0, 0).single().expect("valid timestamp");
    let page = PageContext::new("/sensor/3");

    let chart = page_chart(PageRequest::EnergyStats { page: &page }, &FixedClock(now), 1000)
        .expect("chart builds");

    assert_eq!(chart.spec.data_source().url, "/api/sensor/3/energy_stats");
    assert_eq!(chart.target.mount_id, "stats-charts");
}

#[test]
fn demo_page_chart_uses_fixed_window_regardless_of_clock() {
    for epoch in [0, 1_700_000_000] {
        let now = Utc.timestamp_opt(epoch, 0).single().expect("valid timestamp");
        let chart = page_chart(PageRequest::Demo, &FixedClock(now), 1000)
            .expect("demo chart has a fixed source");

        assert_eq!(
            chart.spec.data_source().url,
            "/api/sensor/10/readings?start=1548210420&end=1548220420"
        );
        assert_eq!(chart.target.mount_id, "charts");
        assert_eq!(chart.spec.panels().len(), 4);
    }
}

#[test]
fn page_missing_resource_fails_pipeline() {
    let now = Utc.timestamp_opt(0, 0).single().expect("valid timestamp");
    let page = PageContext::new("/");

    let err = page_chart(PageRequest::EnergyStats { page: &page }, &FixedClock(now), 1000)
        .unwrap_err();
    assert!(matches!(err, ChartError::MissingResourcePath(_)));
}
