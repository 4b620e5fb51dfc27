//! Response skeletons.
//!
//! Every structured payload starts life as a deep copy of one of the JSON
//! skeletons here, and every markup page is a positional substitution into
//! one of the HTML skeletons. A [`TemplateSet`] is loaded once at startup
//! and shared read-only (usually behind an `Arc`) for the life of the
//! process.

use std::path::Path;

use fs_common::{FeatureServerError, FeatureServerResult};
use serde_json::Value;
use tracing::{debug, info};

/// Names of the individual template documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    InfoJson,
    ServicesJson,
    FeatureServiceJson,
    FeatureServiceLayerJson,
    FeatureSetJson,
    DataProvidersHtml,
    InfoHtml,
    ServicesHtml,
    FeatureServiceHtml,
    FeatureServiceLayerHtml,
}

impl TemplateName {
    pub const ALL: [TemplateName; 10] = [
        TemplateName::InfoJson,
        TemplateName::ServicesJson,
        TemplateName::FeatureServiceJson,
        TemplateName::FeatureServiceLayerJson,
        TemplateName::FeatureSetJson,
        TemplateName::DataProvidersHtml,
        TemplateName::InfoHtml,
        TemplateName::ServicesHtml,
        TemplateName::FeatureServiceHtml,
        TemplateName::FeatureServiceLayerHtml,
    ];

    /// File name inside a template directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateName::InfoJson => "info.json",
            TemplateName::ServicesJson => "services.json",
            TemplateName::FeatureServiceJson => "featureService.json",
            TemplateName::FeatureServiceLayerJson => "featureServiceLayer.json",
            TemplateName::FeatureSetJson => "featureSet.json",
            TemplateName::DataProvidersHtml => "dataProviders.html",
            TemplateName::InfoHtml => "info.html",
            TemplateName::ServicesHtml => "services.html",
            TemplateName::FeatureServiceHtml => "featureService.html",
            TemplateName::FeatureServiceLayerHtml => "featureServiceLayer.html",
        }
    }

    /// Template text compiled into the crate.
    pub fn builtin(&self) -> &'static str {
        match self {
            TemplateName::InfoJson => include_str!("../templates/info.json"),
            TemplateName::ServicesJson => include_str!("../templates/services.json"),
            TemplateName::FeatureServiceJson => include_str!("../templates/featureService.json"),
            TemplateName::FeatureServiceLayerJson => {
                include_str!("../templates/featureServiceLayer.json")
            }
            TemplateName::FeatureSetJson => include_str!("../templates/featureSet.json"),
            TemplateName::DataProvidersHtml => include_str!("../templates/dataProviders.html"),
            TemplateName::InfoHtml => include_str!("../templates/info.html"),
            TemplateName::ServicesHtml => include_str!("../templates/services.html"),
            TemplateName::FeatureServiceHtml => include_str!("../templates/featureService.html"),
            TemplateName::FeatureServiceLayerHtml => {
                include_str!("../templates/featureServiceLayer.html")
            }
        }
    }
}

/// A parsed JSON skeleton. Only ever copied out, never written.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton(Value);

impl Skeleton {
    fn parse(name: TemplateName, text: &str) -> FeatureServerResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| FeatureServerError::TemplateLoad {
                path: name.file_name().to_string(),
                message: e.to_string(),
            })?;

        if !value.is_object() {
            return Err(FeatureServerError::TemplateLoad {
                path: name.file_name().to_string(),
                message: "skeleton must be a JSON object".to_string(),
            });
        }

        Ok(Self(value))
    }

    /// A fresh deep copy to fill in for one response.
    pub fn instantiate(&self) -> Value {
        self.0.clone()
    }

    /// Read-only view of the skeleton.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// The full set of skeletons used by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSet {
    pub info: Skeleton,
    pub services: Skeleton,
    pub feature_service: Skeleton,
    pub feature_service_layer: Skeleton,
    pub feature_set: Skeleton,

    pub data_providers_html: String,
    pub info_html: String,
    pub services_html: String,
    pub feature_service_html: String,
    pub feature_service_layer_html: String,
}

impl TemplateSet {
    /// The templates compiled into the crate.
    pub fn builtin() -> FeatureServerResult<Self> {
        Self::from_source(|name| Ok(name.builtin().to_string()))
    }

    /// Load templates from a directory, falling back to the built-in
    /// document for every file the directory does not provide.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> FeatureServerResult<Self> {
        let dir = dir.as_ref();

        let set = Self::from_source(|name| {
            let path = dir.join(name.file_name());
            if !path.exists() {
                return Ok(name.builtin().to_string());
            }

            debug!(template = name.file_name(), path = %path.display(), "Using template override");
            std::fs::read_to_string(&path).map_err(|e| FeatureServerError::TemplateLoad {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        info!("Loaded templates from {}", dir.display());
        Ok(set)
    }

    fn from_source<F>(mut source: F) -> FeatureServerResult<Self>
    where
        F: FnMut(TemplateName) -> FeatureServerResult<String>,
    {
        let mut json = |name: TemplateName| -> FeatureServerResult<Skeleton> {
            let text = source(name)?;
            Skeleton::parse(name, &text)
        };

        let info = json(TemplateName::InfoJson)?;
        let services = json(TemplateName::ServicesJson)?;
        let feature_service = json(TemplateName::FeatureServiceJson)?;
        let feature_service_layer = json(TemplateName::FeatureServiceLayerJson)?;
        let feature_set = json(TemplateName::FeatureSetJson)?;

        Ok(Self {
            info,
            services,
            feature_service,
            feature_service_layer,
            feature_set,
            data_providers_html: source(TemplateName::DataProvidersHtml)?,
            info_html: source(TemplateName::InfoHtml)?,
            services_html: source(TemplateName::ServicesHtml)?,
            feature_service_html: source(TemplateName::FeatureServiceHtml)?,
            feature_service_layer_html: source(TemplateName::FeatureServiceLayerHtml)?,
        })
    }
}
