//! Structure rendering
//!
//! Structures become plain Kotlin classes with `public val` constructor
//! properties and hand-written `toString`, `hashCode` and `equals`. Member
//! hashing and equality reuse the union strategy table so blobs compare by
//! content here too.

use crate::docs::{deprecation_message, emit_documentation};
use crate::hashing::{select_strategy, StrategyFragment};
use crate::naming::{kotlin_string_literal, property_name};
use crate::symbols::{SymbolProvider, RUNTIME_CORE_ARTIFACT, RUNTIME_NAMESPACE};
use crate::writer::{with_block, CodeWriter};
use serde_json::Value;
use smithy_sdk_generator_common::{
    traits, CodegenSettings, GeneratorError, MemberShape, Model, Result, Shape, ShapeId,
    ShapeType, Symbol, SymbolDependency,
};
use tracing::debug;

const REDACTED: &str = "*** Sensitive Data Redacted ***";

/// One constructor property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPlan {
    pub member_name: String,
    pub property_name: String,
    pub symbol: Symbol,
    /// Kotlin literal for the constructor default, if any
    pub default_value: Option<String>,
    pub strategy: StrategyFragment,
    pub sensitive: bool,
    /// Overrides `Throwable.message` on error structures
    pub overrides_message: bool,
    pub documentation: Option<String>,
    pub deprecated: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructureDeclaration {
    pub shape_id: ShapeId,
    pub symbol: Symbol,
    pub superclass: Option<Symbol>,
    pub documentation: Option<String>,
    pub deprecated: Option<String>,
    /// Properties in member declaration order
    pub properties: Vec<PropertyPlan>,
}

impl StructureDeclaration {
    pub fn property(&self, member_name: &str) -> Option<&PropertyPlan> {
        self.properties.iter().find(|p| p.member_name == member_name)
    }

    pub fn emit(&self, writer: &mut dyn CodeWriter) {
        emit_documentation(
            writer,
            self.class_documentation().as_deref(),
            self.deprecated.as_deref(),
        );

        let header = self.header(writer);
        with_block(writer, &header, "}", |w| {
            self.emit_to_string(w);
            w.blank_line();
            self.emit_hash_code(w);
            w.blank_line();
            self.emit_equals(w);
        });
    }

    /// Class KDoc with `@property` tags for documented members
    fn class_documentation(&self) -> Option<String> {
        let tags: Vec<String> = self
            .properties
            .iter()
            .filter_map(|p| {
                p.documentation
                    .as_deref()
                    .map(|doc| format!("@property {} {}", p.property_name, doc.trim()))
            })
            .collect();

        match (&self.documentation, tags.is_empty()) {
            (None, true) => None,
            (Some(doc), true) => Some(doc.clone()),
            (None, false) => Some(tags.join("\n")),
            (Some(doc), false) => Some(format!("{}\n\n{}", doc.trim(), tags.join("\n"))),
        }
    }

    fn header(&self, writer: &mut dyn CodeWriter) -> String {
        let supertype = match &self.superclass {
            Some(symbol) => format!(" : {}()", writer.reference(symbol)),
            None => String::new(),
        };

        if self.properties.is_empty() {
            return format!("public class {}{} {{", self.symbol.name, supertype);
        }

        let mut header = format!("public class {}(\n", self.symbol.name);
        for property in &self.properties {
            let modifier = if property.overrides_message {
                "override val"
            } else {
                "public val"
            };
            let ty = writer.reference(&property.symbol);
            header.push_str(&format!("    {} {}: {}", modifier, property.property_name, ty));
            if let Some(default) = &property.default_value {
                header.push_str(&format!(" = {}", default));
            }
            header.push_str(",\n");
        }
        header.push_str(&format!("){} {{", supertype));
        header
    }

    fn emit_to_string(&self, writer: &mut dyn CodeWriter) {
        if self.properties.is_empty() {
            writer.write(&format!(
                "override fun toString(): kotlin.String = \"{}()\"",
                self.symbol.name
            ));
            return;
        }

        with_block(
            writer,
            "override fun toString(): kotlin.String = buildString {",
            "}",
            |w| {
                w.write(&format!("append(\"{}(\")", self.symbol.name));
                let last = self.properties.len() - 1;
                for (i, property) in self.properties.iter().enumerate() {
                    let separator = if i == last { "" } else { "," };
                    let value = if property.sensitive {
                        REDACTED.to_string()
                    } else {
                        template_reference(&property.property_name)
                    };
                    w.write(&format!(
                        "append(\"{}={}{}\")",
                        property.property_name.trim_matches('`'),
                        value,
                        separator
                    ));
                }
                w.write("append(\")\")");
            },
        );
    }

    fn emit_hash_code(&self, writer: &mut dyn CodeWriter) {
        let Some((first, rest)) = self.properties.split_first() else {
            writer.write("override fun hashCode(): kotlin.Int = this::class.hashCode()");
            return;
        };

        with_block(writer, "override fun hashCode(): kotlin.Int {", "}", |w| {
            w.write(&format!(
                "var result = {}",
                first.strategy.hash_expr(&first.property_name)
            ));
            for property in rest {
                w.write(&format!(
                    "result = 31 * result + ({})",
                    property.strategy.hash_expr(&property.property_name)
                ));
            }
            w.write("return result");
        });
    }

    fn emit_equals(&self, writer: &mut dyn CodeWriter) {
        with_block(
            writer,
            "override fun equals(other: kotlin.Any?): kotlin.Boolean {",
            "}",
            |w| {
                w.write("if (this === other) return true");
                w.write("if (other == null || this::class != other::class) return false");
                if !self.properties.is_empty() {
                    w.blank_line();
                    w.write(&format!("other as {}", self.symbol.name));
                    w.blank_line();
                    for property in &self.properties {
                        let other = format!("other.{}", property.property_name);
                        w.write(&format!(
                            "if ({}) return false",
                            property
                                .strategy
                                .not_equals_expr(&property.property_name, &other)
                        ));
                    }
                }
                w.blank_line();
                w.write("return true");
            },
        );
    }
}

/// String-template reference to a property, braced when it needs backticks
fn template_reference(property: &str) -> String {
    if property.starts_with('`') {
        format!("${{{}}}", property)
    } else {
        format!("${}", property)
    }
}

/// Renders structures against a shared read-only model and symbol provider
pub struct StructureRenderer<'a> {
    model: &'a Model,
    symbols: &'a dyn SymbolProvider,
    settings: &'a CodegenSettings,
}

impl<'a> StructureRenderer<'a> {
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

    pub fn render(&self, structure_id: &ShapeId) -> Result<StructureDeclaration> {
        let shape = self.model.expect_shape(structure_id)?;
        if shape.shape_type != ShapeType::Structure {
            return Err(GeneratorError::Generation(format!(
                "{} is a {}, not a structure",
                structure_id, shape.shape_type
            )));
        }

        let error = shape.is_error();
        let properties = shape
            .members
            .iter()
            .map(|member| self.plan_property(member, error))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            structure = %structure_id,
            properties = properties.len(),
            error,
            "planned structure"
        );

        Ok(StructureDeclaration {
            shape_id: structure_id.clone(),
            symbol: self.symbols.shape_symbol(self.model, shape)?,
            superclass: error.then(|| self.service_exception()),
            documentation: shape.documentation().map(str::to_string),
            deprecated: deprecation_message(&shape.traits),
            properties,
        })
    }

    fn plan_property(&self, member: &MemberShape, error: bool) -> Result<PropertyPlan> {
        let target = self.model.expect_shape(&member.target)?;
        let symbol = self.symbols.member_symbol(self.model, member)?;
        let streaming_blob = target.shape_type == ShapeType::Blob && target.is_streaming();

        let default_value = if symbol.nullable {
            Some("null".to_string())
        } else {
            default_literal(member, target)
        };

        Ok(PropertyPlan {
            member_name: member.name.clone(),
            property_name: property_name(&member.name),
            strategy: select_strategy(target.shape_type, symbol.nullable, streaming_blob),
            sensitive: member.is_sensitive() || target.has_trait(traits::SENSITIVE),
            overrides_message: error
                && member.name.eq_ignore_ascii_case("message")
                && target.shape_type == ShapeType::String,
            documentation: member
                .documentation()
                .or_else(|| target.documentation())
                .map(str::to_string),
            deprecated: deprecation_message(&member.traits),
            default_value,
            symbol,
        })
    }

    fn service_exception(&self) -> Symbol {
        Symbol::new(RUNTIME_NAMESPACE, "ServiceException").with_dependency(SymbolDependency::new(
            RUNTIME_CORE_ARTIFACT,
            self.settings.runtime_version.clone(),
        ))
    }
}

/// Kotlin literal for a member's `@default`, falling back to the target's.
///
/// Values without a sensible literal (blobs, timestamps, documents) get no
/// default and must be passed explicitly.
fn default_literal(member: &MemberShape, target: &Shape) -> Option<String> {
    let value = member
        .traits
        .get(traits::DEFAULT)
        .or_else(|| target.traits.get(traits::DEFAULT))?;

    match (target.shape_type, value) {
        (_, Value::Null) => None,
        (ShapeType::Boolean, Value::Bool(b)) => Some(b.to_string()),
        (ShapeType::Byte | ShapeType::Short | ShapeType::Integer | ShapeType::IntEnum, Value::Number(n)) => {
            Some(n.to_string())
        }
        (ShapeType::Long, Value::Number(n)) => Some(format!("{}L", n)),
        (ShapeType::Float, Value::Number(n)) => Some(format!("{}f", n)),
        (ShapeType::Double, Value::Number(n)) => {
            let text = n.to_string();
            if text.contains(['.', 'e', 'E']) {
                Some(text)
            } else {
                Some(format!("{}.0", text))
            }
        }
        (ShapeType::String | ShapeType::Enum, Value::String(s)) => Some(kotlin_string_literal(s)),
        (ShapeType::List, Value::Array(items)) if items.is_empty() => Some("emptyList()".to_string()),
        (ShapeType::Map, Value::Object(entries)) if entries.is_empty() => Some("emptyMap()".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::HashStrategy;
    use crate::symbols::KotlinSymbolProvider;
    use crate::writer::KotlinWriter;
    use serde_json::json;

    fn settings() -> CodegenSettings {
        CodegenSettings::new("com.example.weather", "1.3.0")
    }

    fn model() -> Model {
        let input = ShapeId::new("com.example#GetForecastInput");
        Model::new()
            .with_shape(Shape::new("smithy.api#String", ShapeType::String))
            .with_shape(Shape::new("smithy.api#Blob", ShapeType::Blob))
            .with_shape(Shape::new("smithy.api#Long", ShapeType::Long))
            .with_shape(
                Shape::new("smithy.api#PrimitiveInteger", ShapeType::Integer)
                    .with_trait(traits::DEFAULT, json!(0)),
            )
            .with_shape(
                Shape::new("com.example#Token", ShapeType::String)
                    .with_trait(traits::SENSITIVE, json!({})),
            )
            .with_shape(
                Shape::new("com.example#GetForecastInput", ShapeType::Structure)
                    .with_member_shape(
                        MemberShape::new(&input, "cityId", "smithy.api#String")
                            .with_trait(traits::REQUIRED, json!({}))
                            .with_trait(traits::DOCUMENTATION, json!("City to look up")),
                    )
                    .with_member("days", "smithy.api#PrimitiveInteger")
                    .with_member("token", "com.example#Token")
                    .with_member("snapshot", "smithy.api#Blob")
                    .with_member_shape(
                        MemberShape::new(&input, "window", "smithy.api#Long")
                            .with_trait(traits::DEFAULT, json!(7)),
                    )
                    .with_trait(traits::DOCUMENTATION, json!("Forecast request")),
            )
            .with_shape(
                Shape::new("com.example#NoSuchCity", ShapeType::Structure)
                    .with_member("message", "smithy.api#String")
                    .with_trait(traits::ERROR, json!("client")),
            )
            .with_shape(Shape::new("com.example#Empty", ShapeType::Structure))
    }

    fn render(id: &str) -> Result<StructureDeclaration> {
        let model = model();
        let settings = settings();
        let symbols = KotlinSymbolProvider::new(&settings);
        StructureRenderer::new(&model, &symbols, &settings).render(&ShapeId::new(id))
    }

    fn emit(declaration: &StructureDeclaration) -> KotlinWriter {
        let mut writer = KotlinWriter::new("com.example.weather.model");
        declaration.emit(&mut writer);
        writer
    }

    #[test]
    fn test_property_plans() {
        let declaration = render("com.example#GetForecastInput").unwrap();

        let city = declaration.property("cityId").unwrap();
        assert!(!city.symbol.nullable);
        assert_eq!(city.default_value, None);
        assert_eq!(city.strategy.strategy, HashStrategy::Structural);

        let days = declaration.property("days").unwrap();
        assert_eq!(days.default_value.as_deref(), Some("0"));
        assert_eq!(days.strategy.strategy, HashStrategy::DirectNumeric);

        let window = declaration.property("window").unwrap();
        assert_eq!(window.default_value.as_deref(), Some("7L"));

        let snapshot = declaration.property("snapshot").unwrap();
        assert_eq!(snapshot.default_value.as_deref(), Some("null"));
        assert_eq!(snapshot.strategy.strategy, HashStrategy::Content);

        assert!(declaration.property("token").unwrap().sensitive);
    }

    #[test]
    fn test_emitted_class() {
        let source = emit(&render("com.example#GetForecastInput").unwrap()).body();

        assert!(source.starts_with(
            "/**\n * Forecast request\n *\n * @property cityId City to look up\n */\n"
        ));
        assert!(source.contains(
            "public class GetForecastInput(\n    public val cityId: kotlin.String,\n    public val days: kotlin.Int = 0,\n"
        ));
        assert!(source.contains("    public val window: kotlin.Long = 7L,\n) {"));
        assert!(source.contains("append(\"token=*** Sensitive Data Redacted ***,\")"));
        assert!(source.contains("append(\"cityId=$cityId,\")"));
        assert!(source.contains("append(\"window=$window\")"));
        assert!(source.contains("var result = cityId.hashCode()"));
        assert!(source.contains("result = 31 * result + (days)"));
        assert!(source.contains("result = 31 * result + (snapshot?.contentHashCode() ?: 0)"));
        assert!(source.contains("if (!snapshot.contentEquals(other.snapshot)) return false"));
        assert!(source.contains("if (cityId != other.cityId) return false"));
    }

    #[test]
    fn test_error_structure_extends_service_exception() {
        let declaration = render("com.example#NoSuchCity").unwrap();
        assert!(declaration.property("message").unwrap().overrides_message);

        let writer = emit(&declaration);
        assert!(writer
            .body()
            .contains("    override val message: kotlin.String? = null,\n) : ServiceException() {"));
        assert_eq!(
            writer.imports(),
            vec!["aws.smithy.kotlin.runtime.ServiceException".to_string()]
        );
        assert_eq!(
            writer.dependencies()[0].to_string(),
            "aws.smithy.kotlin:runtime-core:1.3.0"
        );
    }

    #[test]
    fn test_empty_structure() {
        let source = emit(&render("com.example#Empty").unwrap()).body();
        assert!(source.starts_with("public class Empty {\n"));
        assert!(source.contains("override fun toString(): kotlin.String = \"Empty()\""));
        assert!(source.contains("override fun hashCode(): kotlin.Int = this::class.hashCode()"));
        assert!(!source.contains("other as Empty"));
    }

    #[test]
    fn test_rejects_union() {
        let model = model().with_shape(Shape::new("com.example#Choice", ShapeType::Union));
        let settings = settings();
        let symbols = KotlinSymbolProvider::new(&settings);
        let err = StructureRenderer::new(&model, &symbols, &settings)
            .render(&ShapeId::new("com.example#Choice"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Generation(_)));
    }

    #[test]
    fn test_keyword_property_in_template() {
        assert_eq!(template_reference("`class`"), "${`class`}");
        assert_eq!(template_reference("days"), "$days");
    }
}
