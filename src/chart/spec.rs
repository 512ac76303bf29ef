//! Composite chart specifications.
//!
//! A [`ChartSpec`] describes a vertical stack of line panels sharing one
//! time axis. It serializes to a Vega-Lite v3 document: `data` carries the
//! fetch URL and extraction path, `transform` any derived fields, and
//! `vconcat` one entry per panel in the order the caller gave them.

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::panels::{PanelDescriptor, TimeAxis, TimeUnit, ValueType};
use crate::error::ChartError;
use crate::query::QueryTarget;

const SCHEMA_URL: &str = "https://vega.github.io/schema/vega-lite/v3.json";
const DESCRIPTION: &str = "Sensor Data";

/// A panel as placed in a built chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub descriptor: PanelDescriptor,
    /// Pinned `[min, max]` of the y scale, when known.
    pub y_domain: Option<[f64; 2]>,
}

impl Panel {
    /// Field the y encoding reads, after any unit scaling.
    #[must_use]
    pub fn y_field(&self) -> String {
        match self.descriptor.unit_scale {
            Some(_) => format!("{}_scaled", self.descriptor.field),
            None => self.descriptor.field.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    data_source: QueryTarget,
    axis: TimeAxis,
    panels: Vec<Panel>,
    panel_width: u32,
}

/// Assemble a stacked chart. Panels keep the given order.
///
/// # Errors
///
/// Returns `ChartError::EmptyPanelSet` if `panels` is empty.
pub fn build(
    target: QueryTarget,
    axis: TimeAxis,
    panels: &[PanelDescriptor],
    width: u32,
) -> Result<ChartSpec, ChartError> {
    if panels.is_empty() {
        return Err(ChartError::EmptyPanelSet);
    }

    tracing::debug!(
        url = %target.url,
        panels = panels.len(),
        ms_transform = axis.needs_ms_transform(),
        "Building chart spec"
    );

    Ok(ChartSpec {
        data_source: target,
        axis,
        panels: panels
            .iter()
            .map(|descriptor| Panel {
                descriptor: *descriptor,
                y_domain: None,
            })
            .collect(),
        panel_width: width,
    })
}

impl ChartSpec {
    #[must_use]
    pub fn data_source(&self) -> &QueryTarget {
        &self.data_source
    }

    #[must_use]
    pub fn axis(&self) -> TimeAxis {
        self.axis
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    #[must_use]
    pub fn panel_width(&self) -> u32 {
        self.panel_width
    }

    /// Field every panel's x encoding reads.
    #[must_use]
    pub fn x_field(&self) -> String {
        if self.axis.needs_ms_transform() {
            format!("{}ms", self.axis.field)
        } else {
            self.axis.field.to_string()
        }
    }

    /// Derived fields, in evaluation order.
    #[must_use]
    pub fn transforms(&self) -> Vec<Calculate> {
        let mut transforms = Vec::new();
        if self.axis.needs_ms_transform() {
            transforms.push(Calculate {
                calculate: format!("1000*datum.{}", self.axis.field),
                as_field: self.x_field(),
                factor: 1000.0,
                source: self.axis.field.to_string(),
            });
        }
        for panel in &self.panels {
            if let Some(factor) = panel.descriptor.unit_scale {
                transforms.push(Calculate {
                    calculate: format!("{factor}*datum.{}", panel.descriptor.field),
                    as_field: panel.y_field(),
                    factor,
                    source: panel.descriptor.field.to_string(),
                });
            }
        }
        transforms
    }

    /// Apply the spec's transforms to one data row in place.
    pub fn apply_transforms(&self, row: &mut Value) {
        for transform in self.transforms() {
            let derived = row.get(&transform.source).and_then(Value::as_f64);
            if let (Some(value), Some(object)) = (derived, row.as_object_mut()) {
                object.insert(transform.as_field, Value::from(value * transform.factor));
            }
        }
    }

    /// Pin each panel's y scale to the extent of its field in `rows`.
    ///
    /// Rows must already be transformed. Panels whose field is absent or
    /// non-numeric in every row stay unpinned.
    #[must_use]
    pub fn pin_y_domains(mut self, rows: &[Value]) -> Self {
        for panel in &mut self.panels {
            let field = panel.y_field();
            panel.y_domain = rows
                .iter()
                .filter_map(|row| row.get(&field).and_then(Value::as_f64))
                .fold(None, |extent: Option<[f64; 2]>, v| match extent {
                    None => Some([v, v]),
                    Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
                });
        }
        self
    }

    /// Render as a Vega-Lite document.
    #[must_use]
    pub fn to_vega_lite(&self) -> Value {
        // The document is string-keyed structs, strings, integers and f64
        // (non-finite f64 become null), none of which serde_json rejects.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn document(&self) -> VegaLite<'_> {
        let x_field = self.x_field();
        VegaLite {
            schema: SCHEMA_URL,
            description: DESCRIPTION,
            data: Data {
                url: &self.data_source.url,
                format: Format {
                    property: self.data_source.extraction_path.as_str(),
                },
            },
            transform: self.transforms(),
            vconcat: self
                .panels
                .iter()
                .map(|panel| PanelSpec {
                    width: self.panel_width,
                    mark: Mark {
                        mark_type: "line",
                        point: true,
                    },
                    encoding: Encoding {
                        x: XEncoding {
                            field: x_field.clone(),
                            field_type: "temporal",
                            time_unit: self.axis.unit,
                            axis: Axis { title: "" },
                        },
                        y: YEncoding {
                            field: panel.y_field(),
                            field_type: panel.descriptor.value_type,
                            axis: Axis {
                                title: panel.descriptor.axis_title,
                            },
                            scale: panel.y_domain.map(|domain| Scale { domain }),
                        },
                    },
                })
                .collect(),
        }
    }
}

impl Serialize for ChartSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document().serialize(serializer)
    }
}

/// A `calculate` transform entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculate {
    pub calculate: String,
    #[serde(rename = "as")]
    pub as_field: String,
    #[serde(skip)]
    factor: f64,
    #[serde(skip)]
    source: String,
}

#[derive(Serialize)]
struct VegaLite<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    description: &'static str,
    data: Data<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    transform: Vec<Calculate>,
    vconcat: Vec<PanelSpec>,
}

#[derive(Serialize)]
struct Data<'a> {
    url: &'a str,
    format: Format<'a>,
}

#[derive(Serialize)]
struct Format<'a> {
    property: &'a str,
}

#[derive(Serialize)]
struct PanelSpec {
    width: u32,
    mark: Mark,
    encoding: Encoding,
}

#[derive(Serialize)]
struct Mark {
    #[serde(rename = "type")]
    mark_type: &'static str,
    point: bool,
}

#[derive(Serialize)]
struct Encoding {
    x: XEncoding,
    y: YEncoding,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct XEncoding {
    field: String,
    #[serde(rename = "type")]
    field_type: &'static str,
    time_unit: TimeUnit,
    axis: Axis,
}

#[derive(Serialize)]
struct YEncoding {
    field: String,
    #[serde(rename = "type")]
    field_type: ValueType,
    axis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<Scale>,
}

#[derive(Serialize)]
struct Axis {
    title: &'static str,
}

#[derive(Serialize)]
struct Scale {
    domain: [f64; 2],
}
