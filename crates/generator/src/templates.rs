//! Template loading and management

use smithy_sdk_generator_common::{GeneratorError, Result};
use tera::Tera;

/// Name of the per-file Kotlin wrapper template
pub const KOTLIN_FILE: &str = "kotlin_file.kt";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template(KOTLIN_FILE, include_str!("../templates/kotlin_file.kt.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load {} template: {}", KOTLIN_FILE, e))
        })?;

    Ok(tera)
}

/// Render a template, mapping tera errors into generation errors
pub fn render(tera: &Tera, name: &str, context: &tera::Context) -> Result<String> {
    tera.render(name, context)
        .map_err(|e| GeneratorError::Generation(format!("Template error in {}: {:?}", name, e)))
}

/// Directory path for a dotted package name
pub fn package_path(package: &str) -> String {
    package.replace('.', "/")
}
