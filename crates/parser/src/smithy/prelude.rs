//! `smithy.api` prelude shapes
//!
//! JSON AST files reference prelude shapes without defining them, so they are
//! added to every parsed model.

use serde_json::json;
use smithy_sdk_generator_common::{traits, Shape, ShapeType};

pub const PRELUDE_NAMESPACE: &str = "smithy.api";

const SIMPLE: &[(&str, ShapeType)] = &[
    ("String", ShapeType::String),
    ("Blob", ShapeType::Blob),
    ("BigInteger", ShapeType::BigInteger),
    ("BigDecimal", ShapeType::BigDecimal),
    ("Timestamp", ShapeType::Timestamp),
    ("Document", ShapeType::Document),
    ("Boolean", ShapeType::Boolean),
    ("Byte", ShapeType::Byte),
    ("Short", ShapeType::Short),
    ("Integer", ShapeType::Integer),
    ("Long", ShapeType::Long),
    ("Float", ShapeType::Float),
    ("Double", ShapeType::Double),
];

const PRIMITIVES: &[(&str, ShapeType)] = &[
    ("PrimitiveBoolean", ShapeType::Boolean),
    ("PrimitiveByte", ShapeType::Byte),
    ("PrimitiveShort", ShapeType::Short),
    ("PrimitiveInteger", ShapeType::Integer),
    ("PrimitiveLong", ShapeType::Long),
    ("PrimitiveFloat", ShapeType::Float),
    ("PrimitiveDouble", ShapeType::Double),
];

/// All prelude shapes that generated code can target
pub fn prelude_shapes() -> Vec<Shape> {
    let mut shapes: Vec<Shape> = SIMPLE
        .iter()
        .map(|(name, ty)| Shape::new(format!("{}#{}", PRELUDE_NAMESPACE, name), *ty))
        .collect();

    shapes.extend(PRIMITIVES.iter().map(|(name, ty)| {
        let default = if *ty == ShapeType::Boolean {
            json!(false)
        } else {
            json!(0)
        };
        Shape::new(format!("{}#{}", PRELUDE_NAMESPACE, name), *ty)
            .with_trait(traits::DEFAULT, default)
    }));

    shapes.push(
        Shape::new(
            format!("{}#Unit", PRELUDE_NAMESPACE),
            ShapeType::Structure,
        )
        .with_trait("smithy.api#unitType", json!({})),
    );

    shapes
}
