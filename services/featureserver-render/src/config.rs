//! Renderer configuration loading and types.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Used when neither the config file nor the command line sets a base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";

/// Configuration loaded from a YAML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Prefix of every canonical resource URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Providers to register, in registration order.
    #[serde(default)]
    pub providers: Vec<ProviderEntry>,
}

/// A provider to register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// Registry key; also the first path segment of the provider's URLs.
    pub id: String,

    /// Static provider definition file.
    pub path: PathBuf,
}

impl ServiceConfig {
    /// Load a config file. Relative provider paths are resolved against
    /// the directory holding the config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;

        let mut config: ServiceConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        for provider in &mut config.providers {
            if provider.path.is_relative() {
                provider.path = base_dir.join(&provider.path);
            }
        }

        tracing::info!(
            "Loaded config with {} providers from {:?}",
            config.providers.len(),
            path
        );
        Ok(config)
    }

    /// Command-line value first, then the file, then [`DEFAULT_BASE_URL`].
    pub fn resolve_base_url(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{config_dir, temp_test_dir, write_test_file};

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = temp_test_dir();
        let path = write_test_file(
            dir.path(),
            "featureserver.yaml",
            "base_url: http://example.com/arcgis\nproviders:\n  - id: a\n    path: providers/a.yaml\n  - id: b\n    path: /abs/b.yaml\n",
        );

        let config = ServiceConfig::load(&path).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://example.com/arcgis"));
        assert_eq!(config.providers[0].path, dir.path().join("providers/a.yaml"));
        assert_eq!(config.providers[1].path, PathBuf::from("/abs/b.yaml"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let dir = temp_test_dir();
        let err = ServiceConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config"));
    }

    #[test]
    fn test_base_url_precedence() {
        let config = ServiceConfig {
            base_url: Some("http://file".to_string()),
            providers: Vec::new(),
        };
        assert_eq!(config.resolve_base_url(Some("http://cli")), "http://cli");
        assert_eq!(config.resolve_base_url(None), "http://file");
        assert_eq!(ServiceConfig::default().resolve_base_url(None), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_bundled_config_loads() {
        let config = ServiceConfig::load(config_dir().join("featureserver.yaml")).unwrap();
        assert_eq!(config.providers[0].id, "demo");
        assert!(config.providers[0].path.exists());
    }
}
