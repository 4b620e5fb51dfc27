//! Feature records returned by data providers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::spatial_reference::SpatialReference;

/// A point geometry in the Esri JSON shape: `{x, y, spatialReference?}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub x: f64,
    pub y: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

impl Point {
    /// An untagged point; input coordinates are read as degrees.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            spatial_reference: None,
        }
    }

    pub fn with_spatial_reference(mut self, spatial_reference: SpatialReference) -> Self {
        self.spatial_reference = Some(spatial_reference);
        self
    }
}

/// A single feature: a geometry plus whatever else the provider attaches.
///
/// Everything besides `geometry` (usually an `attributes` object) is kept
/// verbatim in `properties` and serialized back flattened, so the output
/// layer never has to understand it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Point,

    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Point) -> Self {
        Self {
            geometry,
            properties: Map::new(),
        }
    }

    /// Attach an `attributes` object.
    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.properties
            .insert("attributes".to_string(), Value::Object(attributes));
        self
    }

    /// Look up one attribute value.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.properties.get("attributes")?.get(name)
    }
}
