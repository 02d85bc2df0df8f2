//! Smithy specification parser
//!
//! Parses the Smithy JSON AST format into the shape graph consumed by the
//! generator.
//!
//! ## Format
//! Smithy JSON AST contains:
//! - Shape definitions (structures, unions, simple types, services, operations)
//! - Traits (metadata like documentation, streaming, error)
//! - `apply` statements that attach traits to shapes defined elsewhere
//!
//! ## Usage
//! ```rust,ignore
//! use smithy_sdk_generator_parser::smithy::SmithyParser;
//!
//! let parser = SmithyParser::from_file("weather.json")?;
//! let model = parser.parse()?;
//! ```

mod converter;
mod parser;
mod prelude;
mod types;

pub use parser::SmithyParser;
pub use prelude::{prelude_shapes, PRELUDE_NAMESPACE};
pub use types::*;
