//! Smithy model file parser

use super::types::SmithyModel;
use smithy_sdk_generator_common::{GeneratorError, Model, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Smithy specification parser
///
/// Reads and parses Smithy JSON AST files
pub struct SmithyParser {
    /// Loaded Smithy AST
    model: SmithyModel,
}

impl SmithyParser {
    /// Load Smithy model from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = SmithyParser::from_file("models/weather.json")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read Smithy file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        info!(path = %path.as_ref().display(), "loaded Smithy model file");
        Self::from_json(&content)
    }

    /// Parse Smithy model from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let model: SmithyModel = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse Smithy JSON: {}", e)))?;

        Ok(Self { model })
    }

    /// Convert the AST into the shape graph
    pub fn parse(&self) -> Result<Model> {
        super::converter::convert_smithy_to_model(&self.model)
    }

    /// Smithy IDL version declared by the document
    pub fn version(&self) -> &str {
        &self.model.smithy
    }

    /// Get reference to the underlying Smithy AST
    pub fn ast(&self) -> &SmithyModel {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_smithy() {
        let smithy_json = r#"{
            "smithy": "2.0",
            "shapes": {
                "com.example#MyService": {
                    "type": "service",
                    "version": "1.0.0",
                    "operations": []
                }
            }
        }"#;

        let parser = SmithyParser::from_json(smithy_json);
        assert!(parser.is_ok());

        let parser = parser.unwrap();
        assert_eq!(parser.version(), "2.0");
        assert_eq!(parser.ast().shapes.len(), 1);
        assert!(parser.ast().find_service().is_some());
    }

    #[test]
    fn test_missing_version_is_parse_error() {
        let result = SmithyParser::from_json(r#"{ "shapes": {} }"#);
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }

    #[test]
    fn test_unknown_shape_type_is_parse_error() {
        let result = SmithyParser::from_json(
            r#"{ "smithy": "2.0", "shapes": { "com.example#X": { "type": "mystery" } } }"#,
        );
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SmithyParser::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }
}
