//! Converts the Smithy JSON AST into the shape graph

use super::prelude::{prelude_shapes, PRELUDE_NAMESPACE};
use super::types::{AstMember, AstShape, AstTraits, SmithyModel};
use indexmap::IndexMap;
use smithy_sdk_generator_common::{
    GeneratorError, MemberShape, Model, Result, Shape, ShapeId, ShapeType, TraitMap,
};
use tracing::{debug, warn};

const UNIQUE_ITEMS: &str = "smithy.api#uniqueItems";

/// Convert a Smithy JSON AST document to a [`Model`]
pub fn convert_smithy_to_model(ast: &SmithyModel) -> Result<Model> {
    check_version(&ast.smithy)?;

    let mut model = Model::new();
    for shape in prelude_shapes() {
        model.insert(shape);
    }

    let mut applies = Vec::new();
    for (raw_id, ast_shape) in &ast.shapes {
        let id = parse_shape_id(raw_id)?;

        if let AstShape::Apply { traits } = ast_shape {
            applies.push((id, to_trait_map(traits)));
            continue;
        }

        if id.namespace() == Some(PRELUDE_NAMESPACE) && model.contains(&id) {
            debug!(shape = %id, "skipping redefinition of prelude shape");
            continue;
        }

        model.insert(convert_shape(id, ast_shape)?);
    }

    // Applied traits may target shapes declared later in the file
    for (id, traits) in applies {
        model.apply_traits(&id, traits).map_err(|_| {
            GeneratorError::Parse(format!("apply targets unknown shape {}", id))
        })?;
    }

    for (key, value) in &ast.metadata {
        model.insert_metadata(key.clone(), value.clone());
    }

    debug!(shapes = model.len(), "converted Smithy model");
    Ok(model)
}

fn check_version(version: &str) -> Result<()> {
    match version.split('.').next() {
        Some("1") | Some("2") => Ok(()),
        _ => Err(GeneratorError::Parse(format!(
            "Unsupported Smithy IDL version '{}'",
            version
        ))),
    }
}

fn parse_shape_id(raw: &str) -> Result<ShapeId> {
    match raw.split_once('#') {
        Some((ns, name)) if !ns.is_empty() && !name.is_empty() => Ok(ShapeId::new(raw)),
        _ => Err(GeneratorError::Parse(format!("Invalid shape ID '{}'", raw))),
    }
}

/// Convert a single non-apply shape
fn convert_shape(id: ShapeId, ast_shape: &AstShape) -> Result<Shape> {
    let simple = |shape_type: ShapeType, traits: &AstTraits| {
        let mut shape = Shape::new(id.clone(), shape_type);
        shape.traits = to_trait_map(traits);
        shape
    };

    let shape = match ast_shape {
        AstShape::Blob { traits } => simple(ShapeType::Blob, traits),
        AstShape::Boolean { traits } => simple(ShapeType::Boolean, traits),
        AstShape::String { traits } => simple(ShapeType::String, traits),
        AstShape::Byte { traits } => simple(ShapeType::Byte, traits),
        AstShape::Short { traits } => simple(ShapeType::Short, traits),
        AstShape::Integer { traits } => simple(ShapeType::Integer, traits),
        AstShape::Long { traits } => simple(ShapeType::Long, traits),
        AstShape::Float { traits } => simple(ShapeType::Float, traits),
        AstShape::Double { traits } => simple(ShapeType::Double, traits),
        AstShape::BigInteger { traits } => simple(ShapeType::BigInteger, traits),
        AstShape::BigDecimal { traits } => simple(ShapeType::BigDecimal, traits),
        AstShape::Timestamp { traits } => simple(ShapeType::Timestamp, traits),
        AstShape::Document { traits } => simple(ShapeType::Document, traits),
        AstShape::Enum { members, traits } => {
            with_members(simple(ShapeType::Enum, traits), members)?
        }
        AstShape::IntEnum { members, traits } => {
            with_members(simple(ShapeType::IntEnum, traits), members)?
        }
        AstShape::List { member, traits } => {
            let shape = simple(ShapeType::List, traits);
            let member = convert_member(&shape.id, "member", member)?;
            shape.with_member_shape(member)
        }
        AstShape::Set { member, traits } => {
            let shape = simple(ShapeType::List, traits)
                .with_trait(UNIQUE_ITEMS, serde_json::json!({}));
            let member = convert_member(&shape.id, "member", member)?;
            shape.with_member_shape(member)
        }
        AstShape::Map { key, value, traits } => {
            let shape = simple(ShapeType::Map, traits);
            let key = convert_member(&shape.id, "key", key)?;
            let value = convert_member(&shape.id, "value", value)?;
            shape.with_member_shape(key).with_member_shape(value)
        }
        AstShape::Structure { members, traits } => {
            with_members(simple(ShapeType::Structure, traits), members)?
        }
        AstShape::Union { members, traits } => {
            if members.is_empty() {
                warn!(shape = %id, "union has no members");
            }
            with_members(simple(ShapeType::Union, traits), members)?
        }
        // Service-level shapes only matter for namespace selection; their
        // operation and resource bindings are not part of the type graph.
        AstShape::Service { traits, .. } => simple(ShapeType::Service, traits),
        AstShape::Operation { traits, .. } => simple(ShapeType::Operation, traits),
        AstShape::Resource { traits, .. } => simple(ShapeType::Resource, traits),
        AstShape::Apply { .. } => {
            return Err(GeneratorError::Parse(format!(
                "apply statement for {} cannot be converted to a shape",
                id
            )))
        }
    };

    Ok(shape)
}

fn with_members(mut shape: Shape, members: &IndexMap<String, AstMember>) -> Result<Shape> {
    for (name, member) in members {
        let member = convert_member(&shape.id, name, member)?;
        shape.members.push(member);
    }
    Ok(shape)
}

fn convert_member(container: &ShapeId, name: &str, member: &AstMember) -> Result<MemberShape> {
    let target = parse_shape_id(&member.target)?;
    let mut converted = MemberShape::new(container, name, target);
    converted.traits = to_trait_map(&member.traits);
    Ok(converted)
}

fn to_trait_map(traits: &AstTraits) -> TraitMap {
    let mut map = TraitMap::new();
    for (id, value) in traits {
        map.insert(id.as_str(), value.clone());
    }
    map
}
