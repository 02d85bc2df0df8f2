//! Codegen settings loading from JSON or YAML files
//!
//! Settings are injected configuration: nothing downstream reads versions or
//! package names from globals. Load them once, validate, and pass them along.

use crate::{GeneratorError, Result, ShapeId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+(-[0-9A-Za-z.-]+)?$").expect("valid version regex")
});

static PACKAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$").expect("valid package regex")
});

/// Default name of the catch-all union variant
pub const DEFAULT_UNKNOWN_VARIANT_NAME: &str = "SdkUnknown";

fn default_package_version() -> String {
    "0.1.0".to_string()
}

fn default_unknown_variant_name() -> String {
    DEFAULT_UNKNOWN_VARIANT_NAME.to_string()
}

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenSettings {
    /// Root Kotlin package of the generated SDK (e.g. "com.example.weather")
    pub package_name: String,

    /// Version of the generated package
    #[serde(default = "default_package_version")]
    pub package_version: String,

    /// Version of the client runtime that generated code depends on
    pub runtime_version: String,

    /// Only render shapes in this service's namespace
    #[serde(default)]
    pub service: Option<ShapeId>,

    /// Keep going past shapes that fail to render
    #[serde(default)]
    pub continue_on_error: bool,

    /// Identifier of the catch-all variant emitted for every union
    #[serde(default = "default_unknown_variant_name")]
    pub unknown_variant_name: String,
}

impl CodegenSettings {
    pub fn new(package_name: impl Into<String>, runtime_version: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            package_version: default_package_version(),
            runtime_version: runtime_version.into(),
            service: None,
            continue_on_error: false,
            unknown_variant_name: default_unknown_variant_name(),
        }
    }

    /// Load settings from a `.json`, `.yaml` or `.yml` file and validate them
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("Failed to read settings file {:?}: {}", path, e))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let settings: CodegenSettings = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") | None => serde_json::from_str(&content)?,
            Some(other) => {
                return Err(GeneratorError::Config(format!(
                    "Unsupported settings file extension '{}' (expected json, yaml or yml)",
                    other
                )))
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Fail fast on malformed settings
    pub fn validate(&self) -> Result<()> {
        if self.runtime_version.trim().is_empty() {
            return Err(GeneratorError::Config(
                "runtimeVersion is required".to_string(),
            ));
        }
        if !VERSION_REGEX.is_match(&self.runtime_version) {
            return Err(GeneratorError::Config(format!(
                "runtimeVersion '{}' is not a valid version (expected MAJOR.MINOR.PATCH[-QUALIFIER])",
                self.runtime_version
            )));
        }
        if !VERSION_REGEX.is_match(&self.package_version) {
            return Err(GeneratorError::Config(format!(
                "packageVersion '{}' is not a valid version",
                self.package_version
            )));
        }
        if !PACKAGE_REGEX.is_match(&self.package_name) {
            return Err(GeneratorError::Config(format!(
                "packageName '{}' is not a valid Kotlin package",
                self.package_name
            )));
        }
        let unknown = &self.unknown_variant_name;
        let valid_identifier = unknown
            .chars()
            .next()
            .map(|c| c.is_ascii_uppercase())
            .unwrap_or(false)
            && unknown.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid_identifier {
            return Err(GeneratorError::Config(format!(
                "unknownVariantName '{}' must be a PascalCase identifier",
                unknown
            )));
        }
        Ok(())
    }

    /// Package holding generated model types
    pub fn model_package(&self) -> String {
        format!("{}.model", self.package_name)
    }
}
