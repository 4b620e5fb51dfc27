//! Envelope (bounding rectangle) type.

use serde::{Deserialize, Serialize};

use crate::spatial_reference::SpatialReference;

fn missing_coordinate() -> f64 {
    f64::NAN
}

/// An axis-aligned bounding rectangle tagged with its spatial reference.
///
/// Coordinates follow the spatial reference: degrees for 4326, meters for
/// 102100. `xmin <= xmax` and `ymin <= ymax` are expected but not checked;
/// that is the data provider's responsibility. Members missing from the
/// source document deserialize as `NaN` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default = "missing_coordinate")]
    pub xmin: f64,
    #[serde(default = "missing_coordinate")]
    pub ymin: f64,
    #[serde(default = "missing_coordinate")]
    pub xmax: f64,
    #[serde(default = "missing_coordinate")]
    pub ymax: f64,
    #[serde(default)]
    pub spatial_reference: SpatialReference,
}

impl Envelope {
    /// Create a new envelope from corner coordinates.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64, spatial_reference: SpatialReference) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            spatial_reference,
        }
    }
}
