//! Chart manifest model
//!
//! A [`Manifest`] wraps the raw key/value document of a `Chart.yaml`.
//! Only `name`, `version` and `apiVersion` are interpreted; every other key
//! is carried through untouched so that a load → edit → save cycle never
//! drops metadata the tool does not know about.
//!
//! Manifests are values: every edit returns a new instance and leaves the
//! receiver as it was.

use indexmap::IndexMap;
use serde_yaml::Value;
use std::path::Path;

use crate::error::{CoreError, Result};

/// Schema tag used for index entries when the manifest does not declare one
pub const DEFAULT_API_VERSION: &str = "v2";

/// Ordered raw key/value view of a manifest document
pub type RawMap = IndexMap<String, Value>;

/// Keys whose scalar values are always stored as strings
const STRING_KEYS: [&str; 3] = ["name", "version", "apiVersion"];

/// A parsed chart manifest
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    raw: RawMap,
}

impl Manifest {
    /// Create a minimal manifest with only a name and a version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Result<Self> {
        let mut raw = RawMap::new();
        raw.insert("name".to_string(), Value::String(name.into()));
        raw.insert("version".to_string(), Value::String(version.into()));
        Self::from_raw(raw)
    }

    /// Load a manifest from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse a manifest from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::parse(yaml, "<inline>")
    }

    /// Build a manifest from an already-decoded raw map
    ///
    /// Applies the same string coercion and validation as [`Manifest::load`].
    pub fn from_raw(mut raw: RawMap) -> Result<Self> {
        for key in STRING_KEYS {
            if let Some(value) = raw.get_mut(key) {
                if let Some(text) = scalar_to_string(value) {
                    *value = Value::String(text);
                }
            }
        }

        let manifest = Self { raw };
        if manifest.name().trim().is_empty() {
            return Err(CoreError::MissingField {
                field: "name".to_string(),
            });
        }
        Ok(manifest)
    }

    fn parse(content: &str, origin: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content).map_err(|e| CoreError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let Value::Mapping(mapping) = document else {
            return Err(CoreError::Parse {
                path: origin.to_string(),
                message: "expected a key/value document".to_string(),
            });
        };

        let mut raw = RawMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = scalar_to_string(&key).ok_or_else(|| CoreError::Parse {
                path: origin.to_string(),
                message: "manifest keys must be scalars".to_string(),
            })?;
            raw.insert(key, value);
        }

        Self::from_raw(raw)
    }

    /// Chart name (never empty)
    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or_default()
    }

    /// Chart version, if the manifest declares one
    pub fn version(&self) -> Option<&str> {
        self.str_field("version")
    }

    /// Declared schema tag, if any
    pub fn api_version(&self) -> Option<&str> {
        self.str_field("apiVersion")
    }

    /// Look up a single raw field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// Copy of the raw key/value map
    ///
    /// Mutating the returned map has no effect on this manifest.
    pub fn raw(&self) -> RawMap {
        self.raw.clone()
    }

    /// Iterate over all fields in document order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.raw.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Return a new manifest with `version` replaced
    pub fn with_version(&self, version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(CoreError::InvalidInput {
                message: "version must not be empty".to_string(),
            });
        }
        self.with_field("version", Value::String(version))
    }

    /// Return a new manifest with one field replaced or added
    pub fn with_field(&self, key: impl Into<String>, value: Value) -> Result<Self> {
        let mut raw = self.raw.clone();
        raw.insert(key.into(), value);
        Self::from_raw(raw).map_err(|e| match e {
            CoreError::MissingField { field } => CoreError::InvalidInput {
                message: format!("{} must not be empty", field),
            },
            other => other,
        })
    }

    /// Serialize the manifest back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.raw)?)
    }

    /// Write the manifest to `path`, creating parent directories as needed
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::io(parent, e))?;
        }
        let content = self.to_yaml()?;
        std::fs::write(path, content).map_err(|e| CoreError::io(path, e))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }
}

/// Render a YAML scalar as a string; `None` for null, sequences and mappings
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CHART: &str = r#"
apiVersion: v2
name: web
version: 1.2.3
description: Web frontend
appVersion: 42
keywords:
  - http
x-custom:
  team: platform
"#;

    #[test]
    fn test_load_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Chart.yaml");
        std::fs::write(&path, CHART).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.name(), "web");
        assert_eq!(manifest.version(), Some("1.2.3"));
        assert_eq!(manifest.api_version(), Some("v2"));
        assert_eq!(
            manifest.get("description").and_then(Value::as_str),
            Some("Web frontend")
        );
        assert!(manifest.get("x-custom").is_some());
    }

    #[test]
    fn test_numeric_fields_coerced_to_strings() {
        let manifest = Manifest::from_yaml("name: 7\nversion: 2\napiVersion: 1\n").unwrap();
        assert_eq!(manifest.name(), "7");
        assert_eq!(manifest.version(), Some("2"));
        assert_eq!(manifest.api_version(), Some("1"));
    }

    #[test]
    fn test_app_version_left_untouched() {
        let manifest = Manifest::from_yaml(CHART).unwrap();
        assert!(manifest.get("appVersion").unwrap().is_number());
    }

    #[test]
    fn test_version_optional() {
        let manifest = Manifest::from_yaml("name: lib\n").unwrap();
        assert_eq!(manifest.version(), None);
        assert_eq!(manifest.api_version(), None);
    }

    #[test]
    fn test_missing_name_fails() {
        let err = Manifest::from_yaml("version: 1.0.0\n").unwrap_err();
        assert!(matches!(err, CoreError::MissingField { ref field } if field == "name"));

        let err = Manifest::from_yaml("name: \"\"\nversion: 1.0.0\n").unwrap_err();
        assert!(matches!(err, CoreError::MissingField { .. }));
    }

    #[test]
    fn test_non_mapping_fails() {
        let err = Manifest::from_yaml("- just\n- a list\n").unwrap_err();
        assert!(matches!(err, CoreError::Parse { .. }));

        let err = Manifest::from_yaml("name: [unclosed\n").unwrap_err();
        assert!(matches!(err, CoreError::Parse { .. }));
    }

    #[test]
    fn test_unreadable_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
        assert_eq!(err.kind(), crate::ErrorKind::File);
    }

    #[test]
    fn test_with_version_returns_new_instance() {
        let original = Manifest::from_yaml(CHART).unwrap();
        let bumped = original.with_version("2.0.0").unwrap();

        assert_eq!(bumped.version(), Some("2.0.0"));
        assert_eq!(original.version(), Some("1.2.3"));
        assert_eq!(bumped.get("x-custom"), original.get("x-custom"));
    }

    #[test]
    fn test_with_version_rejects_empty() {
        let manifest = Manifest::from_yaml(CHART).unwrap();
        let err = manifest.with_version("  ").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_with_field_cannot_blank_name() {
        let manifest = Manifest::from_yaml(CHART).unwrap();
        let err = manifest
            .with_field("name", Value::String(String::new()))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[test]
    fn test_raw_is_a_copy() {
        let manifest = Manifest::from_yaml(CHART).unwrap();
        let mut raw = manifest.raw();
        raw.insert("name".to_string(), Value::String("hijacked".to_string()));
        raw.shift_remove("description");

        assert_eq!(manifest.name(), "web");
        assert!(manifest.get("description").is_some());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let source = Manifest::from_yaml(CHART).unwrap();
        let target = dir.path().join("nested").join("out").join("Chart.yaml");

        source.with_version("1.2.4").unwrap().save_to(&target).unwrap();

        let reloaded = Manifest::load(&target).unwrap();
        assert_eq!(reloaded.version(), Some("1.2.4"));
        let keys: Vec<_> = reloaded.raw().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "apiVersion",
                "name",
                "version",
                "description",
                "appVersion",
                "keywords",
                "x-custom"
            ]
        );
        assert_eq!(reloaded.get("x-custom"), source.get("x-custom"));
    }
}
