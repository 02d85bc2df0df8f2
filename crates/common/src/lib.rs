//! Common types and utilities for the Smithy SDK Generator
//!
//! This crate contains the read-only shape graph, symbol types, codegen
//! settings and the error type shared by the parser, generator and CLI.

pub mod model;
pub mod settings;
pub mod shape_id;
pub mod shape_type;
pub mod symbol;

pub use model::{MemberShape, Model, Shape, TraitMap};
pub use settings::CodegenSettings;
pub use shape_id::ShapeId;
pub use shape_type::ShapeType;
pub use symbol::{Symbol, SymbolDependency};

use thiserror::Error;

/// Errors that can occur during SDK generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    /// A generation-time invariant does not hold for `shape`.
    ///
    /// Fatal for that shape; there is no partial output.
    #[error("Invariant violated for shape {shape}: {message}")]
    InvariantViolation { shape: ShapeId, message: String },

    /// A member targets a shape that is not in the model.
    #[error("Shape not found in model: {0}")]
    UnresolvedShape(ShapeId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Well-known Smithy trait ids
pub mod traits {
    pub const DOCUMENTATION: &str = "smithy.api#documentation";
    pub const REQUIRED: &str = "smithy.api#required";
    pub const DEFAULT: &str = "smithy.api#default";
    pub const SENSITIVE: &str = "smithy.api#sensitive";
    pub const STREAMING: &str = "smithy.api#streaming";
    pub const ERROR: &str = "smithy.api#error";
    pub const DEPRECATED: &str = "smithy.api#deprecated";
    pub const INPUT: &str = "smithy.api#input";
    pub const OUTPUT: &str = "smithy.api#output";
}
