//! Spatial reference identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known spatial reference identifiers used by feature services.
pub struct Wkid;

impl Wkid {
    /// WGS84 geographic coordinates (degrees).
    pub const WGS84: u32 = 4326;
    /// Web Mercator auxiliary sphere (meters), the Esri code.
    pub const WEB_MERCATOR: u32 = 102100;
    /// Web Mercator as registered by EPSG. Reported as `latestWkid`.
    pub const WEB_MERCATOR_LATEST: u32 = 3857;
}

/// A `spatialReference` member as it appears in feature service JSON.
///
/// `wkid` is optional so that partially filled skeletons deserialize;
/// the markup formatter renders a missing id as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkid: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_wkid: Option<u32>,
}

impl SpatialReference {
    pub fn new(wkid: u32) -> Self {
        Self {
            wkid: Some(wkid),
            latest_wkid: None,
        }
    }

    /// Geographic WGS84.
    pub fn wgs84() -> Self {
        Self::new(Wkid::WGS84)
    }

    /// Web Mercator, tagged the way projected output is tagged.
    pub fn web_mercator() -> Self {
        Self::new(Wkid::WEB_MERCATOR)
    }

    pub fn is_web_mercator(&self) -> bool {
        self.wkid == Some(Wkid::WEB_MERCATOR)
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wkid {
            Some(wkid) => write!(f, "{}", wkid),
            None => write!(f, "NaN"),
        }
    }
}
