//! Layer field descriptors.

use serde::{Deserialize, Serialize};

/// Esri field type tags commonly reported by providers.
pub mod field_types {
    pub const OID: &str = "esriFieldTypeOID";
    pub const STRING: &str = "esriFieldTypeString";
    pub const INTEGER: &str = "esriFieldTypeInteger";
    pub const DOUBLE: &str = "esriFieldTypeDouble";
    pub const DATE: &str = "esriFieldTypeDate";
    pub const GEOMETRY: &str = "esriFieldTypeGeometry";
}

/// A single attribute field of a layer.
///
/// `type_` is kept as the provider's string tag rather than an enum so
/// unknown tags pass through to clients unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default)]
    pub alias: String,

    #[serde(default)]
    pub nullable: bool,

    /// Provider-reported editability. Markup always reports `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

impl Field {
    /// Create a field whose alias is its name.
    pub fn new(name: impl Into<String>, type_: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            alias: name.clone(),
            name,
            type_: type_.into(),
            nullable: true,
            editable: None,
            length: None,
        }
    }

    /// The object id field of a layer: non-nullable `esriFieldTypeOID`.
    pub fn object_id(name: impl Into<String>) -> Self {
        Self::new(name, field_types::OID).with_nullable(false)
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_json_uses_type_key() {
        let field = Field::object_id("OBJECTID");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "esriFieldTypeOID");
        assert_eq!(json["alias"], "OBJECTID");
        assert_eq!(json["nullable"], false);
        assert!(json.get("editable").is_none());
    }

    #[test]
    fn test_field_defaults_when_deserializing() {
        let field: Field =
            serde_json::from_str(r#"{"name":"NAME","type":"esriFieldTypeString"}"#).unwrap();
        assert_eq!(field.alias, "");
        assert!(!field.nullable);
        assert_eq!(field.editable, None);
    }
}
