//! Layer configuration.
//!
//! ```yaml
//! areas: [home-widgetlayer-1, footer-widgets]
//! container_class: brick
//! breakpoints:
//!   desktop_min: 1200
//! options:
//!   - key: bayleaf_overlay
//!     type: checkbox
//!     label: Dark overlay
//! ```
//!
//! Every field is optional; missing fields take the theme defaults.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::css::Breakpoints;
use crate::error::{Error, Result};
use crate::registry::RawOptionSpec;

/// Widget areas tracked when none are configured.
pub const DEFAULT_AREAS: [&str; 3] = [
    "home-widgetlayer-1",
    "home-widgetlayer-2",
    "home-widgetlayer-3",
];

/// Class of the element wrapping every tracked widget.
pub const DEFAULT_CONTAINER_CLASS: &str = "brick";

/// Configuration of one widget layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Tracked widget areas, in traversal order.
    pub areas: Vec<String>,
    /// Wrapper class used in widget selectors and as the class injection marker.
    pub container_class: String,
    pub breakpoints: Breakpoints,
    /// Extra option contributions, appended after hook-contributed ones.
    pub options: Vec<RawOptionSpec>,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            areas: DEFAULT_AREAS.iter().map(|a| a.to_string()).collect(),
            container_class: DEFAULT_CONTAINER_CLASS.to_string(),
            breakpoints: Breakpoints::default(),
            options: Vec::new(),
        }
    }
}

impl LayerConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a configuration from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_file(path.as_ref())
    }

    /// Replaces the tracked areas.
    pub fn with_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.areas = areas.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }
}

/// Reads and parses a YAML or JSON file, chosen by extension.
pub(crate) fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    match extension.as_deref() {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LayerConfig::default();
        assert_eq!(config.areas, DEFAULT_AREAS);
        assert_eq!(config.container_class, "brick");
        assert_eq!(config.breakpoints, Breakpoints::default());
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = LayerConfig::from_yaml("container_class: widgetlayer\n").unwrap();
        assert_eq!(config.container_class, "widgetlayer");
        assert_eq!(config.areas.len(), 3);
    }

    #[test]
    fn test_yaml_with_options() {
        let yaml = r#"
areas: [footer-widgets]
breakpoints:
  desktop_min: 1200
options:
  - key: bayleaf_overlay
    type: checkbox
    label: Dark overlay
"#;
        let config = LayerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.areas, vec!["footer-widgets"]);
        assert_eq!(config.breakpoints.desktop_min, 1200);
        assert_eq!(config.breakpoints.tablet_max, 1024);
        assert_eq!(config.options[0].key, "bayleaf_overlay");
    }

    #[test]
    fn test_json_config() {
        let config = LayerConfig::from_json(r#"{"areas": ["a", "b"]}"#).unwrap();
        assert_eq!(config.areas, vec!["a", "b"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layer.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "areas: [sidebar-1]").unwrap();

        let config = LayerConfig::load(&path).unwrap();
        assert_eq!(config.areas, vec!["sidebar-1"]);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layer.toml");
        std::fs::write(&path, "areas = []").unwrap();

        assert!(matches!(
            LayerConfig::load(&path),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = LayerConfig::load("/nonexistent/widgetlayer.yaml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_builder() {
        let config = LayerConfig::default()
            .with_areas(["x"])
            .with_container_class("widgetlayer");
        assert_eq!(config.areas, vec!["x"]);
        assert_eq!(config.container_class, "widgetlayer");
    }
}
