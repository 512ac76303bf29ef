//! Sensor Charts - multi-panel Vega-Lite charts for sensor telemetry
//!
//! Builds chart specifications from page context and a time window, and
//! hands them to a rendering backend. The library modules are exposed for
//! testing and reuse by the HTTP service.

pub mod chart;
pub mod common;
pub mod config;
pub mod contract;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod render;
pub mod routes;
pub mod window;
