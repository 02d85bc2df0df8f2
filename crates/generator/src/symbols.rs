//! Shape to Kotlin symbol resolution
//!
//! Renderers only depend on the [`SymbolProvider`] trait. The
//! [`KotlinSymbolProvider`] is the default used by the CLI.

use crate::naming::pascal_case;
use smithy_sdk_generator_common::{
    traits, CodegenSettings, GeneratorError, MemberShape, Model, Result, Shape, ShapeType, Symbol,
    SymbolDependency,
};

pub const RUNTIME_CORE_ARTIFACT: &str = "aws.smithy.kotlin:runtime-core";
pub const RUNTIME_CONTENT_NAMESPACE: &str = "aws.smithy.kotlin.runtime.content";
pub const RUNTIME_TIME_NAMESPACE: &str = "aws.smithy.kotlin.runtime.time";
pub const RUNTIME_NAMESPACE: &str = "aws.smithy.kotlin.runtime";

const SPARSE: &str = "smithy.api#sparse";
const UNIT_TYPE: &str = "smithy.api#unitType";

/// Resolves shapes and members to target-language symbols.
///
/// Shared read-only across rendering threads.
#[cfg_attr(test, mockall::automock)]
pub trait SymbolProvider: Send + Sync {
    /// Symbol for a shape used as a type
    fn shape_symbol(&self, model: &Model, shape: &Shape) -> Result<Symbol>;

    /// Symbol for a member, including its nullability
    fn member_symbol(&self, model: &Model, member: &MemberShape) -> Result<Symbol>;
}

/// Maps Smithy shapes onto Kotlin and smithy-kotlin runtime types
#[derive(Debug, Clone)]
pub struct KotlinSymbolProvider {
    model_package: String,
    runtime_version: String,
}

impl KotlinSymbolProvider {
    pub fn new(settings: &CodegenSettings) -> Self {
        Self {
            model_package: settings.model_package(),
            runtime_version: settings.runtime_version.clone(),
        }
    }

    fn builtin(name: &str) -> Symbol {
        Symbol::new("kotlin", name)
    }

    fn runtime(&self, namespace: &str, name: &str) -> Symbol {
        Symbol::new(namespace, name).with_dependency(SymbolDependency::new(
            RUNTIME_CORE_ARTIFACT,
            self.runtime_version.clone(),
        ))
    }

    fn collection_member(&self, model: &Model, shape: &Shape, name: &str) -> Result<Symbol> {
        let member = shape.member(name).ok_or_else(|| {
            GeneratorError::Generation(format!("{} has no `{}` member", shape.id, name))
        })?;
        let target = model.expect_shape(&member.target)?;
        let symbol = self.shape_symbol(model, target)?;
        if shape.has_trait(SPARSE) && name != "key" {
            let boxed = target.shape_type.is_primitive();
            Ok(symbol.into_nullable(boxed))
        } else {
            Ok(symbol)
        }
    }
}

impl SymbolProvider for KotlinSymbolProvider {
    fn shape_symbol(&self, model: &Model, shape: &Shape) -> Result<Symbol> {
        let symbol = match shape.shape_type {
            ShapeType::Boolean => Self::builtin("Boolean"),
            ShapeType::Byte => Self::builtin("Byte"),
            ShapeType::Short => Self::builtin("Short"),
            ShapeType::Integer | ShapeType::IntEnum => Self::builtin("Int"),
            ShapeType::Long => Self::builtin("Long"),
            ShapeType::Float => Self::builtin("Float"),
            ShapeType::Double => Self::builtin("Double"),
            ShapeType::String | ShapeType::Enum => Self::builtin("String"),
            ShapeType::BigInteger => self.runtime(RUNTIME_CONTENT_NAMESPACE, "BigInteger"),
            ShapeType::BigDecimal => self.runtime(RUNTIME_CONTENT_NAMESPACE, "BigDecimal"),
            ShapeType::Blob if shape.is_streaming() => {
                self.runtime(RUNTIME_CONTENT_NAMESPACE, "ByteStream")
            }
            ShapeType::Blob => Self::builtin("ByteArray"),
            ShapeType::Timestamp => self.runtime(RUNTIME_TIME_NAMESPACE, "Instant"),
            ShapeType::Document => self.runtime(RUNTIME_CONTENT_NAMESPACE, "Document"),
            ShapeType::List => {
                let element = self.collection_member(model, shape, "member")?;
                let deps = element.dependencies.clone();
                Symbol::new("kotlin.collections", format!("List<{}>", element))
                    .with_dependencies(deps)
            }
            ShapeType::Map => {
                let key = self.collection_member(model, shape, "key")?;
                let value = self.collection_member(model, shape, "value")?;
                let deps: Vec<_> = key
                    .dependencies
                    .iter()
                    .chain(value.dependencies.iter())
                    .cloned()
                    .collect();
                Symbol::new("kotlin.collections", format!("Map<{}, {}>", key, value))
                    .with_dependencies(deps)
            }
            ShapeType::Structure if shape.has_trait(UNIT_TYPE) => Self::builtin("Unit"),
            ShapeType::Structure | ShapeType::Union => {
                Symbol::new(self.model_package.clone(), pascal_case(shape.id.name()))
            }
            ShapeType::Service | ShapeType::Operation | ShapeType::Resource | ShapeType::Member => {
                return Err(GeneratorError::Generation(format!(
                    "{} shape {} has no Kotlin type",
                    shape.shape_type, shape.id
                )))
            }
        };
        Ok(symbol)
    }

    fn member_symbol(&self, model: &Model, member: &MemberShape) -> Result<Symbol> {
        let target = model.expect_shape(&member.target)?;
        let symbol = self.shape_symbol(model, target)?;

        let non_null = member.is_required()
            || member.traits.has_non_null_default()
            || (target.traits.has_non_null_default() && !member.traits.contains(traits::DEFAULT));

        if non_null {
            Ok(symbol)
        } else {
            Ok(symbol.into_nullable(target.shape_type.is_primitive()))
        }
    }
}
