//! Model parsing for Smithy SDK Generator
//!
//! This crate turns Smithy JSON AST documents into the read-only shape graph
//! ([`Model`](smithy_sdk_generator_common::Model)) that the generator renders.
//! It adds the `smithy.api` prelude and resolves `apply` statements, but does
//! not validate the model beyond what conversion needs.

pub mod smithy;
mod summary;

pub use smithy::SmithyParser;
pub use summary::ModelSummary;

use smithy_sdk_generator_common::{Model, Result};
use std::path::Path;

/// Parse a Smithy JSON AST file into a model (convenience function)
pub fn parse_model_file(path: &Path) -> Result<Model> {
    SmithyParser::from_file(path)?.parse()
}
