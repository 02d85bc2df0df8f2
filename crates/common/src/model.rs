//! Read-only Smithy shape graph
//!
//! The parser builds a [`Model`] once; everything downstream only borrows it.
//! Members keep their declaration order here. Anything that needs a stable
//! order for code generation sorts explicitly.

use crate::{traits, GeneratorError, Result, ShapeId, ShapeType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Traits applied to a shape or member, keyed by trait shape ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitMap {
    traits: BTreeMap<ShapeId, serde_json::Value>,
}

impl TraitMap {
    /// Creates a new empty TraitMap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a trait value, replacing any previous value for the same ID.
    pub fn insert(&mut self, id: impl Into<ShapeId>, value: serde_json::Value) {
        self.traits.insert(id.into(), value);
    }

    /// Gets a trait value by its Shape ID.
    pub fn get(&self, id: &str) -> Option<&serde_json::Value> {
        self.traits.get(id)
    }

    /// Returns true if the map contains a trait with the given Shape ID.
    pub fn contains(&self, id: &str) -> bool {
        self.traits.contains_key(id)
    }

    /// Copies every trait from `other` into this map.
    pub fn merge(&mut self, other: TraitMap) {
        self.traits.extend(other.traits);
    }

    /// Returns an iterator over all traits.
    pub fn iter(&self) -> impl Iterator<Item = (&ShapeId, &serde_json::Value)> {
        self.traits.iter()
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    /// Value of `smithy.api#documentation`, if present.
    pub fn documentation(&self) -> Option<&str> {
        self.get(traits::DOCUMENTATION).and_then(|v| v.as_str())
    }

    /// True when `smithy.api#default` is present with a non-null value.
    pub fn has_non_null_default(&self) -> bool {
        self.get(traits::DEFAULT)
            .map(|v| !v.is_null())
            .unwrap_or(false)
    }
}

/// A member of an aggregate shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberShape {
    /// Member ID, e.g. `com.example#Choice$memberA`
    pub id: ShapeId,
    /// Member name as declared in the model
    pub name: String,
    /// Shape this member points at
    pub target: ShapeId,
    #[serde(default)]
    pub traits: TraitMap,
}

impl MemberShape {
    pub fn new(container: &ShapeId, name: &str, target: impl Into<ShapeId>) -> Self {
        Self {
            id: container.with_member(name),
            name: name.to_string(),
            target: target.into(),
            traits: TraitMap::new(),
        }
    }

    /// Builder-style trait application
    pub fn with_trait(mut self, id: &str, value: serde_json::Value) -> Self {
        self.traits.insert(id, value);
        self
    }

    pub fn has_trait(&self, id: &str) -> bool {
        self.traits.contains(id)
    }

    pub fn is_required(&self) -> bool {
        self.has_trait(traits::REQUIRED)
    }

    pub fn is_sensitive(&self) -> bool {
        self.has_trait(traits::SENSITIVE)
    }

    pub fn documentation(&self) -> Option<&str> {
        self.traits.documentation()
    }
}

/// A node in the shape graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub shape_type: ShapeType,
    /// Members in declaration order. Lists expose `member`, maps `key` and `value`.
    #[serde(default)]
    pub members: Vec<MemberShape>,
    #[serde(default)]
    pub traits: TraitMap,
}

impl Shape {
    pub fn new(id: impl Into<ShapeId>, shape_type: ShapeType) -> Self {
        Self {
            id: id.into(),
            shape_type,
            members: Vec::new(),
            traits: TraitMap::new(),
        }
    }

    /// Builder-style member addition
    pub fn with_member(mut self, name: &str, target: impl Into<ShapeId>) -> Self {
        let member = MemberShape::new(&self.id, name, target);
        self.members.push(member);
        self
    }

    /// Builder-style addition of a fully built member
    pub fn with_member_shape(mut self, member: MemberShape) -> Self {
        self.members.push(member);
        self
    }

    /// Builder-style trait application
    pub fn with_trait(mut self, id: &str, value: serde_json::Value) -> Self {
        self.traits.insert(id, value);
        self
    }

    pub fn member(&self, name: &str) -> Option<&MemberShape> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn has_trait(&self, id: &str) -> bool {
        self.traits.contains(id)
    }

    pub fn documentation(&self) -> Option<&str> {
        self.traits.documentation()
    }

    /// `@streaming` blob or event-stream union
    pub fn is_streaming(&self) -> bool {
        self.has_trait(traits::STREAMING)
    }

    /// Structure marked with `@error`
    pub fn is_error(&self) -> bool {
        self.shape_type == ShapeType::Structure && self.has_trait(traits::ERROR)
    }

    /// Union marked with `@streaming`
    pub fn is_event_stream(&self) -> bool {
        self.shape_type == ShapeType::Union && self.is_streaming()
    }
}

/// The shape graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    shapes: BTreeMap<ShapeId, Shape>,
    #[serde(default)]
    metadata: BTreeMap<String, serde_json::Value>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape, replacing any shape with the same ID.
    pub fn insert(&mut self, shape: Shape) {
        self.shapes.insert(shape.id.clone(), shape);
    }

    /// Builder-style insertion, mostly for tests
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.insert(shape);
        self
    }

    pub fn insert_metadata(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
    }

    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }

    pub fn get_shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Looks up a shape that must exist.
    pub fn expect_shape(&self, id: &ShapeId) -> Result<&Shape> {
        self.get_shape(id)
            .ok_or_else(|| GeneratorError::UnresolvedShape(id.clone()))
    }

    /// Applies traits to an existing shape or member, as the `apply` statement does.
    pub fn apply_traits(&mut self, id: &ShapeId, traits: TraitMap) -> Result<()> {
        let container = ShapeId::new(format!(
            "{}#{}",
            id.namespace().unwrap_or_default(),
            id.name()
        ));
        let shape = self
            .shapes
            .get_mut(&container)
            .ok_or_else(|| GeneratorError::UnresolvedShape(id.clone()))?;

        match id.member_name() {
            None => shape.traits.merge(traits),
            Some(member_name) => {
                let member = shape
                    .members
                    .iter_mut()
                    .find(|m| m.name == member_name)
                    .ok_or_else(|| GeneratorError::UnresolvedShape(id.clone()))?;
                member.traits.merge(traits);
            }
        }
        Ok(())
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// All shapes, ordered by shape ID
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn shapes_of_type(&self, shape_type: ShapeType) -> impl Iterator<Item = &Shape> {
        self.shapes
            .values()
            .filter(move |shape| shape.shape_type == shape_type)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_model() -> Model {
        Model::new()
            .with_shape(Shape::new("smithy.api#Integer", ShapeType::Integer))
            .with_shape(
                Shape::new("com.example#Events", ShapeType::Union)
                    .with_member("data", "com.example#Data")
                    .with_member("failure", "com.example#Failure")
                    .with_trait(traits::STREAMING, json!({})),
            )
            .with_shape(Shape::new("com.example#Data", ShapeType::Structure))
            .with_shape(
                Shape::new("com.example#Failure", ShapeType::Structure)
                    .with_trait(traits::ERROR, json!("client")),
            )
    }

    #[test]
    fn test_expect_shape_missing() {
        let model = sample_model();
        let err = model
            .expect_shape(&ShapeId::new("com.example#Nope"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnresolvedShape(id) if id.as_str() == "com.example#Nope"));
    }

    #[test]
    fn test_trait_introspection() {
        let model = sample_model();
        let events = model
            .expect_shape(&ShapeId::new("com.example#Events"))
            .unwrap();
        assert!(events.is_event_stream());
        assert!(!events.is_error());

        let failure = model
            .expect_shape(&ShapeId::new("com.example#Failure"))
            .unwrap();
        assert!(failure.is_error());
    }

    #[test]
    fn test_members_keep_declaration_order() {
        let shape = Shape::new("com.example#U", ShapeType::Union)
            .with_member("zeta", "smithy.api#Integer")
            .with_member("alpha", "smithy.api#Integer");
        let names: Vec<&str> = shape.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(shape.members[1].id.as_str(), "com.example#U$alpha");
    }

    #[test]
    fn test_apply_traits() {
        let mut model = sample_model();
        let mut applied = TraitMap::new();
        applied.insert(traits::DOCUMENTATION, json!("Applied docs"));
        model
            .apply_traits(&ShapeId::new("com.example#Data"), applied)
            .unwrap();
        let data = model.expect_shape(&ShapeId::new("com.example#Data")).unwrap();
        assert_eq!(data.documentation(), Some("Applied docs"));
    }

    #[test]
    fn test_apply_traits_to_member() {
        let mut model = sample_model();
        let mut applied = TraitMap::new();
        applied.insert(traits::DOCUMENTATION, json!("Member docs"));
        model
            .apply_traits(&ShapeId::new("com.example#Events$data"), applied.clone())
            .unwrap();
        let events = model
            .expect_shape(&ShapeId::new("com.example#Events"))
            .unwrap();
        assert_eq!(
            events.member("data").unwrap().documentation(),
            Some("Member docs")
        );

        let missing = model.apply_traits(&ShapeId::new("com.example#Events$nope"), applied);
        assert!(matches!(missing, Err(GeneratorError::UnresolvedShape(_))));
    }

    #[test]
    fn test_non_null_default() {
        let mut map = TraitMap::new();
        assert!(!map.has_non_null_default());
        map.insert(traits::DEFAULT, serde_json::Value::Null);
        assert!(!map.has_non_null_default());
        map.insert(traits::DEFAULT, json!(0));
        assert!(map.has_non_null_default());
    }
}
