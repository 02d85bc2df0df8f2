//! Closed set of Smithy shape kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape type enumeration, mirroring the Smithy 2.0 shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeType {
    // Simple types
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    String,
    Blob,
    Timestamp,
    Document,
    Enum,
    IntEnum,

    // Aggregate types
    List,
    Map,
    Structure,
    Union,

    // Service types
    Service,
    Operation,
    Resource,

    Member,
}

impl ShapeType {
    /// Returns true if this is a simple type.
    pub fn is_simple(&self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Byte
                | Self::Short
                | Self::Integer
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::BigInteger
                | Self::BigDecimal
                | Self::String
                | Self::Blob
                | Self::Timestamp
                | Self::Document
                | Self::Enum
                | Self::IntEnum
        )
    }

    /// Returns true if this is an aggregate type.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::List | Self::Map | Self::Structure | Self::Union)
    }

    /// Returns true for the numeric kinds that map onto JVM primitives.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Byte
                | Self::Short
                | Self::Integer
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::IntEnum
        )
    }

    /// The Smithy JSON AST `type` name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::BigInteger => "bigInteger",
            Self::BigDecimal => "bigDecimal",
            Self::String => "string",
            Self::Blob => "blob",
            Self::Timestamp => "timestamp",
            Self::Document => "document",
            Self::Enum => "enum",
            Self::IntEnum => "intEnum",
            Self::List => "list",
            Self::Map => "map",
            Self::Structure => "structure",
            Self::Union => "union",
            Self::Service => "service",
            Self::Operation => "operation",
            Self::Resource => "resource",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(ShapeType::Blob.is_simple());
        assert!(!ShapeType::Blob.is_primitive());
        assert!(ShapeType::Byte.is_primitive());
        assert!(ShapeType::Union.is_aggregate());
        assert!(!ShapeType::Service.is_simple());
    }

    #[test]
    fn test_serde_names() {
        let ty: ShapeType = serde_json::from_str("\"bigInteger\"").unwrap();
        assert_eq!(ty, ShapeType::BigInteger);
        assert_eq!(ShapeType::IntEnum.to_string(), "intEnum");
    }
}
