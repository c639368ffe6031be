//! Job configuration
//!
//! A flat set of string properties, as handed to an output format by the
//! batch framework. Loaded from YAML (or JSON, which YAML accepts):
//!
//! ```yaml
//! output.table: events
//! store.cluster.address: zk1.example.com,zk2.example.com
//! ```

use crate::error::{Error, Result};
use crate::store::StoreSettings;
use crate::types::{OptionStringExt, StringMap};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Property naming the table mutations are written to (required)
pub const OUTPUT_TABLE: &str = "output.table";

/// Property overriding the store cluster's coordination endpoint
pub const CLUSTER_ADDRESS: &str = "store.cluster.address";

/// Job properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobConfig {
    properties: StringMap,
}

impl JobConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, builder style
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a property
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get a property
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Load properties from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Parse properties from a YAML or JSON document
    ///
    /// The document must be a mapping of scalars. Numbers and booleans are
    /// kept in their textual form; null entries are ignored.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let raw: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(content)?;
        let mut properties = StringMap::with_capacity(raw.len());
        for (key, value) in raw {
            let text = match value {
                serde_yaml::Value::Null => continue,
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                _ => {
                    return Err(Error::config(format!(
                        "Property '{key}' must be a scalar value"
                    )))
                }
            };
            properties.insert(key, text);
        }
        Ok(Self { properties })
    }

    /// Name of the output table
    ///
    /// This is the single check shared by job validation and writer
    /// construction. A missing or blank value fails with
    /// [`Error::MissingTableName`].
    pub fn table_name(&self) -> Result<String> {
        self.properties
            .get(OUTPUT_TABLE)
            .none_if_blank()
            .ok_or_else(|| Error::missing_table(OUTPUT_TABLE))
    }

    /// Cluster address override, if configured
    pub fn cluster_address(&self) -> Option<String> {
        self.properties.get(CLUSTER_ADDRESS).none_if_blank()
    }

    /// Connection parameters for the store client
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            cluster_address: self.cluster_address(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_table_name_present() {
        let config = JobConfig::new().with(OUTPUT_TABLE, "events");
        assert_eq!(config.table_name().unwrap(), "events");
    }

    #[test]
    fn test_table_name_missing() {
        let err = JobConfig::new().table_name().unwrap_err();
        assert!(matches!(err, Error::MissingTableName { ref key } if key == OUTPUT_TABLE));
    }

    #[test]
    fn test_table_name_blank() {
        let config = JobConfig::new().with(OUTPUT_TABLE, "   ");
        assert!(matches!(
            config.table_name(),
            Err(Error::MissingTableName { .. })
        ));
    }

    #[test]
    fn test_store_settings() {
        let config = JobConfig::new()
            .with(OUTPUT_TABLE, "events")
            .with(CLUSTER_ADDRESS, "zk1:2181");
        assert_eq!(
            config.store_settings().cluster_address.as_deref(),
            Some("zk1:2181")
        );

        let config = JobConfig::new().with(OUTPUT_TABLE, "events");
        assert_eq!(config.store_settings(), StoreSettings::default());
    }

    #[test]
    fn test_from_yaml() {
        let config = JobConfig::from_yaml(
            "output.table: events\nstore.cluster.address: zk1\nbatch.size: 500\nspeculative: false\nunused: null\n",
        )
        .unwrap();

        assert_eq!(config.get(OUTPUT_TABLE), Some("events"));
        assert_eq!(config.get(CLUSTER_ADDRESS), Some("zk1"));
        assert_eq!(config.get("batch.size"), Some("500"));
        assert_eq!(config.get("speculative"), Some("false"));
        assert_eq!(config.get("unused"), None);
    }

    #[test]
    fn test_from_json() {
        let config = JobConfig::from_yaml(r#"{"output.table": "events"}"#).unwrap();
        assert_eq!(config.table_name().unwrap(), "events");
    }

    #[test]
    fn test_from_yaml_rejects_nested() {
        let err = JobConfig::from_yaml("output:\n  table: events\n").unwrap_err();
        assert!(err.to_string().contains("must be a scalar value"));
    }

    #[test]
    fn test_from_yaml_empty() {
        assert_eq!(JobConfig::from_yaml("").unwrap(), JobConfig::new());
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.yaml");
        std::fs::write(&path, "output.table: events\n").unwrap();

        let config = JobConfig::from_file(&path).unwrap();
        assert_eq!(config.table_name().unwrap(), "events");

        let missing = JobConfig::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(missing, Error::FileNotFound { .. }));
    }
}
