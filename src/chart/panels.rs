//! Panel descriptors and the per-page layout registry.

use serde::Serialize;

/// Temporal granularity of the shared x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeUnit {
    #[serde(rename = "yearmonthdatehoursminutesseconds")]
    YearMonthDateHoursMinutesSeconds,
    #[serde(rename = "yearmonthdate")]
    YearMonthDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Quantitative,
}

/// How the shared time field is encoded in the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEncoding {
    /// Raw reading stream, epoch seconds. Needs `1000 * x` before the
    /// renderer can treat it as a temporal value.
    EpochSeconds,
    /// Pre-aggregated rows already carrying date values.
    Date,
}

/// The x axis every panel of a chart shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    pub field: &'static str,
    pub unit: TimeUnit,
    pub encoding: TimeEncoding,
}

impl TimeAxis {
    #[must_use]
    pub fn needs_ms_transform(&self) -> bool {
        self.encoding == TimeEncoding::EpochSeconds
    }
}

/// One row of a stacked chart: a single field plotted against time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelDescriptor {
    pub field: &'static str,
    pub axis_title: &'static str,
    pub value_type: ValueType,
    /// Linear multiplier applied to the field before plotting.
    pub unit_scale: Option<f64>,
}

impl PanelDescriptor {
    #[must_use]
    pub const fn new(field: &'static str, axis_title: &'static str) -> Self {
        Self {
            field,
            axis_title,
            value_type: ValueType::Quantitative,
            unit_scale: None,
        }
    }

    #[must_use]
    pub const fn scaled(mut self, factor: f64) -> Self {
        self.unit_scale = Some(factor);
        self
    }
}

pub const READINGS_AXIS: TimeAxis = TimeAxis {
    field: "timestamp",
    unit: TimeUnit::YearMonthDateHoursMinutesSeconds,
    encoding: TimeEncoding::EpochSeconds,
};

pub const STATS_AXIS: TimeAxis = TimeAxis {
    field: "date",
    unit: TimeUnit::YearMonthDate,
    encoding: TimeEncoding::Date,
};

pub const READINGS_PANELS: &[PanelDescriptor] = &[
    PanelDescriptor::new("peak_current_mA", "peak current (mA)"),
    PanelDescriptor::new("peak_power_mW", "peak power (mW)"),
    PanelDescriptor::new("peak_voltage_V", "peak voltage (V)"),
    PanelDescriptor::new("temp_celsius", "temp (C)"),
    PanelDescriptor::new("batt_V", "battery (V)"),
];

pub const ENERGY_STATS_PANELS: &[PanelDescriptor] = &[
    PanelDescriptor::new("dollars_saved", "dollars saved"),
    PanelDescriptor::new("co2_saved", "lbs CO2 equivalent saved"),
    PanelDescriptor::new("equiv_kWh", "kWh"),
    PanelDescriptor::new("cap_factor", "capacity factor"),
];

/// Kinds of chart page the service knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Readings,
    EnergyStats,
    Demo,
}

/// Static description of one page's chart.
#[derive(Debug)]
pub struct PageLayout {
    pub mount_id: &'static str,
    pub extraction_path: &'static str,
    pub axis: TimeAxis,
    pub panels: &'static [PanelDescriptor],
}

static READINGS_LAYOUT: PageLayout = PageLayout {
    mount_id: "reading-charts",
    extraction_path: "data.readings",
    axis: READINGS_AXIS,
    panels: READINGS_PANELS,
};

static ENERGY_STATS_LAYOUT: PageLayout = PageLayout {
    mount_id: "stats-charts",
    extraction_path: "stats",
    axis: STATS_AXIS,
    panels: ENERGY_STATS_PANELS,
};

// The demo page predates the battery column.
static DEMO_LAYOUT: PageLayout = PageLayout {
    mount_id: "charts",
    extraction_path: "data.readings",
    axis: READINGS_AXIS,
    panels: READINGS_PANELS.split_at(4).0,
};

impl PageKind {
    #[must_use]
    pub fn layout(self) -> &'static PageLayout {
        match self {
            Self::Readings => &READINGS_LAYOUT,
            Self::EnergyStats => &ENERGY_STATS_LAYOUT,
            Self::Demo => &DEMO_LAYOUT,
        }
    }
}
