//! Union rendering
//!
//! A Smithy union becomes a Kotlin `sealed class`:
//!
//! - one `data class` per qualifying member, sorted by member name, each
//!   wrapping the member's value;
//! - a trailing zero-payload `object` for members added to the model after
//!   the client was generated;
//! - an `asX()` / `asXOrNull()` accessor pair per member.
//!
//! [`UnionRenderer::render`] makes every decision and returns a
//! [`UnionDeclaration`]. [`UnionDeclaration::emit`] only replays it into a
//! [`CodeWriter`].

use crate::docs::{deprecation_message, emit_documentation};
use crate::filter::filter_qualifying_members;
use crate::hashing::{select_strategy, StrategyFragment};
use crate::naming::{assert_accessor_name, optional_accessor_name, pascal_case};
use crate::symbols::SymbolProvider;
use crate::writer::{with_block, CodeWriter};
use smithy_sdk_generator_common::{
    CodegenSettings, GeneratorError, MemberShape, Model, Result, Shape, ShapeId, ShapeType,
    Symbol,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Always reserved, whatever the configured catch-all is called
pub const RESERVED_VARIANT_NAME: &str = "UnknownVariant";

/// A union and its qualifying members, sorted by member name
#[derive(Debug, Clone)]
pub struct UnionDescriptor<'a> {
    pub shape: &'a Shape,
    pub members: Vec<&'a MemberShape>,
}

impl<'a> UnionDescriptor<'a> {
    pub fn new(shape: &'a Shape, model: &Model) -> Result<Self> {
        Ok(Self {
            shape,
            members: filter_qualifying_members(shape, model)?,
        })
    }

    pub fn id(&self) -> &ShapeId {
        &self.shape.id
    }
}

/// A qualifying member with its target and resolved symbol
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDescriptor {
    pub name: String,
    pub member_id: ShapeId,
    pub target: ShapeId,
    pub target_type: ShapeType,
    pub streaming_blob: bool,
    pub symbol: Symbol,
    pub documentation: Option<String>,
    pub deprecated: Option<String>,
}

impl MemberDescriptor {
    pub fn resolve(
        model: &Model,
        symbols: &dyn SymbolProvider,
        member: &MemberShape,
    ) -> Result<Self> {
        let target = model.expect_shape(&member.target)?;
        let symbol = symbols.member_symbol(model, member)?;

        Ok(Self {
            name: member.name.clone(),
            member_id: member.id.clone(),
            target: target.id.clone(),
            target_type: target.shape_type,
            streaming_blob: target.shape_type == ShapeType::Blob && target.is_streaming(),
            symbol,
            documentation: member
                .documentation()
                .or_else(|| target.documentation())
                .map(str::to_string),
            deprecated: deprecation_message(&member.traits),
        })
    }
}

/// Naming and equality decisions for one variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPlan {
    pub variant_name: String,
    pub assert_accessor: String,
    pub optional_accessor: String,
    pub strategy: StrategyFragment,
    /// Only non-streaming blob values need explicit `hashCode`/`equals`
    pub requires_custom_equality: bool,
}

impl VariantPlan {
    pub fn for_member(member: &MemberDescriptor) -> Self {
        let variant_name = pascal_case(&member.name);
        let strategy = select_strategy(
            member.target_type,
            member.symbol.nullable,
            member.streaming_blob,
        );

        Self {
            assert_accessor: assert_accessor_name(&variant_name),
            optional_accessor: optional_accessor_name(&variant_name),
            requires_custom_equality: strategy.requires_custom_equality(),
            strategy,
            variant_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariantKind {
    Member {
        member: MemberDescriptor,
        plan: VariantPlan,
    },
    /// Catch-all for members this client does not know about
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: String,
    pub kind: VariantKind,
}

impl Variant {
    pub fn plan(&self) -> Option<&VariantPlan> {
        match &self.kind {
            VariantKind::Member { plan, .. } => Some(plan),
            VariantKind::Unknown => None,
        }
    }
}

/// Everything needed to emit one union
#[derive(Debug, Clone, PartialEq)]
pub struct UnionDeclaration {
    pub shape_id: ShapeId,
    pub symbol: Symbol,
    pub documentation: Option<String>,
    pub deprecated: Option<String>,
    /// Member variants in name order, catch-all last
    pub variants: Vec<Variant>,
}

impl UnionDeclaration {
    pub fn variant_names(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// `(assert, optional)` accessor names in variant order
    pub fn accessors(&self) -> Vec<(&str, &str)> {
        self.variants
            .iter()
            .filter_map(Variant::plan)
            .map(|p| (p.assert_accessor.as_str(), p.optional_accessor.as_str()))
            .collect()
    }

    pub fn emit(&self, writer: &mut dyn CodeWriter) {
        let union_name = self.symbol.fully_qualified_name();
        let shadowed: HashSet<&str> = self.variant_names().into_iter().collect();

        emit_documentation(
            writer,
            self.documentation.as_deref(),
            self.deprecated.as_deref(),
        );
        let header = format!("public sealed class {} {{", self.symbol.name);
        with_block(writer, &header, "}", |w| {
            for (i, variant) in self.variants.iter().enumerate() {
                if i > 0 {
                    w.blank_line();
                }
                emit_variant(w, &union_name, &shadowed, variant);
            }

            for variant in &self.variants {
                if let VariantKind::Member { member, plan } = &variant.kind {
                    w.blank_line();
                    emit_accessors(w, &union_name, &shadowed, member, plan);
                }
            }
        });
    }
}

fn emit_variant(
    writer: &mut dyn CodeWriter,
    union_name: &str,
    shadowed: &HashSet<&str>,
    variant: &Variant,
) {
    match &variant.kind {
        VariantKind::Unknown => {
            writer.write_doc("A variant this client does not recognize.");
            writer.write(&format!(
                "public object {} : {}()",
                variant.name, union_name
            ));
        }
        VariantKind::Member { member, plan } => {
            emit_documentation(
                writer,
                member.documentation.as_deref(),
                member.deprecated.as_deref(),
            );
            let value_type = value_reference(writer, &member.symbol, shadowed);
            let declaration = format!(
                "public data class {}(val value: {}) : {}()",
                variant.name, value_type, union_name
            );

            if !plan.requires_custom_equality {
                writer.write(&declaration);
                return;
            }

            with_block(writer, &format!("{} {{", declaration), "}", |w| {
                with_block(w, "override fun hashCode(): kotlin.Int {", "}", |w| {
                    w.write(&format!("return {}", plan.strategy.hash_expr("value")));
                });
                w.blank_line();
                with_block(
                    w,
                    "override fun equals(other: kotlin.Any?): kotlin.Boolean {",
                    "}",
                    |w| {
                        w.write("if (this === other) return true");
                        w.write("if (other == null || this::class != other::class) return false");
                        w.blank_line();
                        w.write(&format!("other as {}", variant.name));
                        w.blank_line();
                        w.write(&format!(
                            "return {}",
                            plan.strategy.equals_expr("value", "other.value")
                        ));
                    },
                );
            });
        }
    }
}

fn emit_accessors(
    writer: &mut dyn CodeWriter,
    union_name: &str,
    shadowed: &HashSet<&str>,
    member: &MemberDescriptor,
    plan: &VariantPlan,
) {
    let value_type = value_reference(writer, &member.symbol, shadowed);
    let optional = member.symbol.clone().into_nullable(member.symbol.boxed);
    let optional_type = value_reference(writer, &optional, shadowed);
    let variant = format!("{}.{}", union_name, plan.variant_name);

    writer.write_doc(&format!(
        "Casts and retrieves the value of the [{}] variant.\n@throws kotlin.ClassCastException if this union is a different variant",
        plan.variant_name
    ));
    writer.write(&format!(
        "public fun {}(): {} = (this as {}).value",
        plan.assert_accessor, value_type, variant
    ));
    writer.blank_line();
    writer.write_doc(&format!(
        "Retrieves the value of the [{}] variant, or null if this union is a different variant.",
        plan.variant_name
    ));
    writer.write(&format!(
        "public fun {}(): {} = (this as? {})?.value",
        plan.optional_accessor, optional_type, variant
    ));
}

/// Type text for a variant value.
///
/// Inside the sealed class a variant name shadows any type with the same
/// simple name, so those are written fully qualified.
fn value_reference(
    writer: &mut dyn CodeWriter,
    symbol: &Symbol,
    shadowed: &HashSet<&str>,
) -> String {
    if shadowed.contains(symbol.raw_name()) {
        writer.qualified_reference(symbol)
    } else {
        writer.reference(symbol)
    }
}

/// Renders unions against a shared read-only model and symbol provider
pub struct UnionRenderer<'a> {
    model: &'a Model,
    symbols: &'a dyn SymbolProvider,
    settings: &'a CodegenSettings,
}

impl<'a> UnionRenderer<'a> {
    pub fn new(
        model: &'a Model,
        symbols: &'a dyn SymbolProvider,
        settings: &'a CodegenSettings,
    ) -> Self {
        Self {
            model,
            symbols,
            settings,
        }
    }

    pub fn render(&self, union_id: &ShapeId) -> Result<UnionDeclaration> {
        let shape = self.model.expect_shape(union_id)?;
        if shape.shape_type != ShapeType::Union {
            return Err(GeneratorError::Generation(format!(
                "{} is a {}, not a union",
                union_id, shape.shape_type
            )));
        }

        let descriptor = UnionDescriptor::new(shape, self.model)?;
        self.check_variant_names(&descriptor)?;

        let mut variants = Vec::with_capacity(descriptor.members.len() + 1);
        for member in &descriptor.members {
            let member = MemberDescriptor::resolve(self.model, self.symbols, member)?;
            let plan = VariantPlan::for_member(&member);
            variants.push(Variant {
                name: plan.variant_name.clone(),
                kind: VariantKind::Member { member, plan },
            });
        }
        variants.push(Variant {
            name: self.settings.unknown_variant_name.clone(),
            kind: VariantKind::Unknown,
        });

        debug!(
            union = %union_id,
            variants = variants.len(),
            event_stream = shape.is_event_stream(),
            "planned union"
        );

        Ok(UnionDeclaration {
            shape_id: union_id.clone(),
            symbol: self.symbols.shape_symbol(self.model, shape)?,
            documentation: shape.documentation().map(str::to_string),
            deprecated: deprecation_message(&shape.traits),
            variants,
        })
    }

    /// Variant names must be unique and must not shadow the catch-all.
    /// Runs before any symbol is resolved.
    fn check_variant_names(&self, descriptor: &UnionDescriptor<'_>) -> Result<()> {
        let configured = self.settings.unknown_variant_name.as_str();
        let mut seen: HashMap<String, &str> = HashMap::new();

        for member in &descriptor.members {
            let variant = pascal_case(&member.name);
            let collision = [configured, RESERVED_VARIANT_NAME].into_iter().find(|reserved| {
                member.name.eq_ignore_ascii_case(reserved) || variant.eq_ignore_ascii_case(reserved)
            });
            if let Some(reserved) = collision {
                return Err(GeneratorError::InvariantViolation {
                    shape: descriptor.id().clone(),
                    message: format!(
                        "member `{}` collides with the reserved variant name `{}`",
                        member.name, reserved
                    ),
                });
            }

            if let Some(previous) = seen.insert(variant.to_ascii_lowercase(), &member.name) {
                return Err(GeneratorError::InvariantViolation {
                    shape: descriptor.id().clone(),
                    message: format!(
                        "members `{}` and `{}` map to the same variant name `{}`",
                        previous, member.name, variant
                    ),
                });
            }
        }
        Ok(())
    }
}
