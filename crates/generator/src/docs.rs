//! Documentation and deprecation propagation

use crate::naming::kotlin_string_literal;
use crate::writer::CodeWriter;
use smithy_sdk_generator_common::{traits, TraitMap};

const DEFAULT_DEPRECATION: &str = "No longer recommended for use.";

/// Deprecation message from `@deprecated`, if the trait is present
pub fn deprecation_message(traits: &TraitMap) -> Option<String> {
    let value = traits.get(traits::DEPRECATED)?;
    let message = value.get("message").and_then(|m| m.as_str());
    let since = value.get("since").and_then(|s| s.as_str());

    Some(match (message, since) {
        (Some(message), Some(since)) => format!("{} (since {})", message, since),
        (Some(message), None) => message.to_string(),
        (None, Some(since)) => format!("{} (since {})", DEFAULT_DEPRECATION, since),
        (None, None) => DEFAULT_DEPRECATION.to_string(),
    })
}

/// Writes KDoc and `@Deprecated` ahead of a declaration
pub fn emit_documentation(
    writer: &mut dyn CodeWriter,
    documentation: Option<&str>,
    deprecated: Option<&str>,
) {
    if let Some(doc) = documentation.filter(|d| !d.trim().is_empty()) {
        writer.write_doc(doc);
    }
    if let Some(message) = deprecated {
        writer.write(&format!("@Deprecated({})", kotlin_string_literal(message)));
    }
}
