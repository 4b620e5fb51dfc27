//! Layer query requests and result assembly.

use fs_common::{Feature, FeatureServerError, FeatureServerResult, Wkid};
use projection::WebMercator;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::metadata::set_member;
use crate::provider::{CountResult, DataProvider, LayerId, ObjectIdsResult, Query};
use crate::render::OutputFormat;
use crate::templates::TemplateSet;

/// Which provider call answers a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Count,
    Ids,
    Features,
}

impl QueryMode {
    /// `count_only` wins when both flags are set.
    pub fn select(count_only: bool, ids_only: bool) -> Self {
        if count_only {
            QueryMode::Count
        } else if ids_only {
            QueryMode::Ids
        } else {
            QueryMode::Features
        }
    }
}

/// A parsed layer query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerQueryRequest {
    /// Everything the output layer does not interpret, for the provider.
    pub query: Query,
    pub count_only: bool,
    pub ids_only: bool,
    /// Requested output spatial reference.
    pub out_sr: Option<u32>,
}

impl LayerQueryRequest {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn count_only(mut self) -> Self {
        self.count_only = true;
        self
    }

    pub fn ids_only(mut self) -> Self {
        self.ids_only = true;
        self
    }

    pub fn with_out_sr(mut self, wkid: u32) -> Self {
        self.out_sr = Some(wkid);
        self
    }

    pub fn mode(&self) -> QueryMode {
        QueryMode::select(self.count_only, self.ids_only)
    }

    /// Parse ArcGIS REST query parameters.
    ///
    /// `f`, `returnCountOnly`, `returnIdsOnly` and `outSR` are consumed;
    /// every other pair goes into the opaque [`Query`]. `outSR` may be a
    /// bare wkid or a spatial reference object such as `{"wkid":102100}`.
    pub fn from_params<'a, I>(params: I) -> FeatureServerResult<(OutputFormat, Self)>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut format = OutputFormat::default();
        let mut request = Self::default();

        for (key, value) in params {
            match key {
                "f" => format = OutputFormat::from_tag(value),
                "returnCountOnly" => request.count_only = parse_flag(value),
                "returnIdsOnly" => request.ids_only = parse_flag(value),
                "outSR" => request.out_sr = parse_out_sr(value)?,
                _ => request.query.insert(key, value),
            }
        }

        Ok((format, request))
    }
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn parse_out_sr(value: &str) -> FeatureServerResult<Option<u32>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    if let Ok(wkid) = value.parse::<u32>() {
        return Ok(Some(wkid));
    }

    let parsed: Value = serde_json::from_str(value)
        .map_err(|_| FeatureServerError::invalid_parameter("outSR", format!("'{}' is not a wkid", value)))?;

    parsed
        .get("wkid")
        .and_then(Value::as_u64)
        .and_then(|wkid| u32::try_from(wkid).ok())
        .map(Some)
        .ok_or_else(|| {
            FeatureServerError::invalid_parameter("outSR", format!("'{}' has no integer wkid", value))
        })
}

/// What a layer query resolves to.
///
/// Count and ids results are the provider's own answers; only the
/// features mode produces a feature set built here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    Count(CountResult),
    Ids(ObjectIdsResult),
    Features(Value),
}

impl QueryResult {
    /// Pretty-printed JSON body.
    pub fn to_json_string(&self) -> FeatureServerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run one layer query against the provider.
///
/// Exactly one provider query call is made. In features mode the
/// provider's features are reprojected to Web Mercator when `out_sr` is
/// 102100, preserving order one-to-one; for any other `out_sr` they are
/// passed through untouched and the skeleton's spatial reference stands.
#[instrument(skip(templates, provider, request), fields(provider = provider.name(), mode = ?request.mode()))]
pub async fn layer_query(
    templates: &TemplateSet,
    provider: &dyn DataProvider,
    service_id: &str,
    layer_id: LayerId,
    request: &LayerQueryRequest,
) -> FeatureServerResult<QueryResult> {
    match request.mode() {
        QueryMode::Count => {
            let count = provider
                .count_for_query(service_id, layer_id, &request.query)
                .await?;
            Ok(QueryResult::Count(count))
        }
        QueryMode::Ids => {
            let ids = provider
                .ids_for_query(service_id, layer_id, &request.query)
                .await?;
            Ok(QueryResult::Ids(ids))
        }
        QueryMode::Features => {
            let features = provider
                .features_for_query(service_id, layer_id, &request.query)
                .await?;

            let mut feature_set = templates.feature_set.instantiate();
            set_member(&mut feature_set, "fields", provider.fields(service_id, layer_id)?)?;

            if request.out_sr == Some(Wkid::WEB_MERCATOR) {
                debug!(count = features.len(), "Projecting features to Web Mercator");
                set_member(&mut feature_set, "features", project_features(&features))?;
                set_member(
                    spatial_reference_member(&mut feature_set)?,
                    "wkid",
                    Wkid::WEB_MERCATOR,
                )?;
            } else {
                set_member(&mut feature_set, "features", features)?;
            }

            Ok(QueryResult::Features(feature_set))
        }
    }
}

/// Copies of `features` with every geometry in Web Mercator.
pub fn project_features(features: &[Feature]) -> Vec<Feature> {
    let merc = WebMercator::default();
    features
        .iter()
        .map(|feature| Feature {
            geometry: merc.project_point(&feature.geometry),
            properties: feature.properties.clone(),
        })
        .collect()
}

fn spatial_reference_member(feature_set: &mut Value) -> FeatureServerResult<&mut Value> {
    feature_set
        .get_mut("spatialReference")
        .filter(|sr| sr.is_object())
        .ok_or_else(|| {
            FeatureServerError::Template("feature set has no spatialReference object".to_string())
        })
}
