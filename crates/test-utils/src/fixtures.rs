//! Common test fixtures for feature service output tests.
//!
//! This module provides pre-defined data that represents common
//! scenarios when rendering feature services.

use fs_common::field::field_types;
use fs_common::{Envelope, Feature, Field, Point, SpatialReference};
use serde_json::{json, Map, Value};

/// Reference coordinates for Web Mercator checks.
pub mod cities {
    /// (name, lon, lat, x, y) with x/y in Web Mercator meters.
    pub const ALL: &[(&str, f64, f64, f64, f64)] = &[
        ("London", -0.1278, 51.5074, -14_226.630923380362, 6_711_542.475587636),
        ("New York", -74.006, 40.7128, -8_238_310.235647004, 4_970_071.579142427),
        ("Sydney", 151.2093, -33.8688, 16_832_542.27920734, -4_011_198.647307572),
        ("Null Island", 0.0, 0.0, 0.0, 0.0),
    ];
}

/// The fields of the sample "cities" layer.
pub fn sample_fields() -> Vec<Field> {
    vec![
        Field::object_id("OBJECTID"),
        Field::new("NAME", field_types::STRING)
            .with_alias("City Name")
            .with_length(64),
        Field::new("POPULATION", field_types::INTEGER),
    ]
}

/// One feature per entry of [`cities::ALL`], attributes keyed by [`sample_fields`].
pub fn sample_features() -> Vec<Feature> {
    cities::ALL
        .iter()
        .enumerate()
        .map(|(i, (name, lon, lat, _, _))| {
            let mut attributes = Map::new();
            attributes.insert("OBJECTID".to_string(), json!(i + 1));
            attributes.insert("NAME".to_string(), json!(name));
            attributes.insert("POPULATION".to_string(), Value::Null);
            Feature::new(Point::new(*lon, *lat)).with_attributes(attributes)
        })
        .collect()
}

/// Envelope used in the formatter examples.
pub fn unit_envelope() -> Envelope {
    Envelope::new(-1.0, -1.0, 1.0, 1.0, SpatialReference::wgs84())
}

/// A small static provider definition, in the YAML format the
/// data-providers crate loads.
pub const DEMO_PROVIDER_YAML: &str = r#"
name: Demo
version: 10.1
services:
  - id: cities
    type: FeatureServer
    layers:
      - id: 0
        name: Cities
        display_field: NAME
        id_field: OBJECTID
        fields:
          - { name: OBJECTID, type: esriFieldTypeOID, alias: OBJECTID, nullable: false }
          - { name: NAME, type: esriFieldTypeString, alias: City Name, nullable: true }
        features:
          - geometry: { x: -0.1278, y: 51.5074 }
            attributes: { OBJECTID: 1, NAME: London }
          - geometry: { x: -74.006, y: 40.7128 }
            attributes: { OBJECTID: 2, NAME: New York }
      - id: 1
        name: Capitals
        fields:
          - { name: FID, type: esriFieldTypeOID, alias: FID, nullable: false }
        features: []
  - id: rivers
    type: FeatureServer
    layers: []
"#;
