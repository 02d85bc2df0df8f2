//! Smithy JSON AST type definitions
//!
//! These types represent the structure of Smithy JSON files. Member maps use
//! `IndexMap` so declaration order survives deserialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Trait values keyed by trait shape ID
pub type AstTraits = IndexMap<String, serde_json::Value>;

/// Root Smithy model document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmithyModel {
    /// Smithy version (e.g., "2.0")
    pub smithy: String,

    /// Shape definitions (operations, structures, services, etc.)
    #[serde(default)]
    pub shapes: IndexMap<String, AstShape>,

    /// Metadata about the model
    #[serde(default)]
    pub metadata: IndexMap<String, serde_json::Value>,
}

/// Reference to another shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeReference {
    /// Target shape ID (e.g., "com.example#Forecast")
    pub target: String,
}

/// Aggregate member definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstMember {
    /// Target shape for this member
    pub target: String,

    /// Traits (metadata)
    #[serde(default)]
    pub traits: AstTraits,
}

/// A Smithy shape as it appears in the JSON AST
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AstShape {
    Blob {
        #[serde(default)]
        traits: AstTraits,
    },
    Boolean {
        #[serde(default)]
        traits: AstTraits,
    },
    String {
        #[serde(default)]
        traits: AstTraits,
    },
    Byte {
        #[serde(default)]
        traits: AstTraits,
    },
    Short {
        #[serde(default)]
        traits: AstTraits,
    },
    Integer {
        #[serde(default)]
        traits: AstTraits,
    },
    Long {
        #[serde(default)]
        traits: AstTraits,
    },
    Float {
        #[serde(default)]
        traits: AstTraits,
    },
    Double {
        #[serde(default)]
        traits: AstTraits,
    },
    BigInteger {
        #[serde(default)]
        traits: AstTraits,
    },
    BigDecimal {
        #[serde(default)]
        traits: AstTraits,
    },
    Timestamp {
        #[serde(default)]
        traits: AstTraits,
    },
    Document {
        #[serde(default)]
        traits: AstTraits,
    },

    /// String enum; members target `smithy.api#Unit` and carry `@enumValue`
    Enum {
        #[serde(default)]
        members: IndexMap<String, AstMember>,
        #[serde(default)]
        traits: AstTraits,
    },

    IntEnum {
        #[serde(default)]
        members: IndexMap<String, AstMember>,
        #[serde(default)]
        traits: AstTraits,
    },

    List {
        member: AstMember,
        #[serde(default)]
        traits: AstTraits,
    },

    /// Smithy 1.0 set, read as a list with unique items
    Set {
        member: AstMember,
        #[serde(default)]
        traits: AstTraits,
    },

    Map {
        key: AstMember,
        value: AstMember,
        #[serde(default)]
        traits: AstTraits,
    },

    Structure {
        #[serde(default)]
        members: IndexMap<String, AstMember>,
        #[serde(default)]
        traits: AstTraits,
    },

    Union {
        #[serde(default)]
        members: IndexMap<String, AstMember>,
        #[serde(default)]
        traits: AstTraits,
    },

    Service {
        #[serde(default)]
        version: Option<String>,
        #[serde(default)]
        operations: Vec<ShapeReference>,
        #[serde(default)]
        resources: Vec<ShapeReference>,
        #[serde(default)]
        errors: Vec<ShapeReference>,
        #[serde(default)]
        traits: AstTraits,
    },

    Operation {
        #[serde(default)]
        input: Option<ShapeReference>,
        #[serde(default)]
        output: Option<ShapeReference>,
        #[serde(default)]
        errors: Vec<ShapeReference>,
        #[serde(default)]
        traits: AstTraits,
    },

    Resource {
        #[serde(default)]
        identifiers: IndexMap<String, ShapeReference>,
        #[serde(default)]
        operations: Vec<ShapeReference>,
        #[serde(default)]
        resources: Vec<ShapeReference>,
        #[serde(default)]
        traits: AstTraits,
    },

    /// Applies traits to a shape defined elsewhere
    Apply {
        #[serde(default)]
        traits: AstTraits,
    },
}

impl SmithyModel {
    /// Find the first service shape in the model
    pub fn find_service(&self) -> Option<(&String, &AstShape)> {
        self.shapes
            .iter()
            .find(|(_, shape)| matches!(shape, AstShape::Service { .. }))
    }

    /// Get a shape by its ID
    pub fn get_shape(&self, shape_id: &str) -> Option<&AstShape> {
        self.shapes.get(shape_id)
    }
}
