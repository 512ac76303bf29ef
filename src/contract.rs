//! Response shapes of the sensor data API the charts read from.
//!
//! `GET /api/<resource>/readings?start=..&end=..` returns a
//! [`ReadingsEnvelope`], rows under `data.readings`.
//! `GET /api/<resource>/energy_stats` returns an [`EnergyStatsResponse`],
//! rows under `stats`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingsEnvelope {
    pub message: String,
    pub data: ReadingsData,
}

impl ReadingsEnvelope {
    #[must_use]
    pub fn new(readings: Vec<Reading>) -> Self {
        Self {
            message: "found all readings for sensor in range".to_string(),
            data: ReadingsData { readings },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingsData {
    pub readings: Vec<Reading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Epoch seconds
    pub timestamp: i64,
    #[serde(rename = "peak_current_mA")]
    pub peak_current_ma: f64,
    #[serde(rename = "peak_power_mW")]
    pub peak_power_mw: f64,
    #[serde(rename = "peak_voltage_V")]
    pub peak_voltage_v: f64,
    pub temp_celsius: f64,
    #[serde(rename = "batt_V")]
    pub batt_v: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyStatsResponse {
    pub stats: Vec<EnergyStat>,
}

/// One day of derived savings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyStat {
    pub date: NaiveDate,
    pub dollars_saved: f64,
    pub co2_saved: f64,
    #[serde(rename = "equiv_kWh")]
    pub equiv_kwh: f64,
    pub cap_factor: f64,
}
