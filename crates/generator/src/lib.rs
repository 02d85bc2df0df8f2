//! Kotlin code generation for Smithy models
//!
//! This crate turns a parsed shape graph into Kotlin model sources:
//! - unions as sealed classes with accessors and a catch-all variant
//! - structures and errors as classes with value semantics
//! - a `codegen-manifest.json` listing files and runtime dependencies

mod docs;
pub mod driver;
pub mod filter;
pub mod hashing;
pub mod naming;
pub mod structure;
pub mod symbols;
mod templates;
pub mod union;
pub mod writer;

pub use driver::{CodegenDriver, RenderOutcome, RenderedFile};
pub use symbols::{KotlinSymbolProvider, SymbolProvider};
pub use union::{UnionDeclaration, UnionRenderer};

use serde::Serialize;
use smithy_sdk_generator_common::{
    CodegenSettings, GeneratorError, Model, Result, ShapeId, SymbolDependency,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::info;

/// File name of the manifest written next to the sources
pub const MANIFEST_FILE: &str = "codegen-manifest.json";

/// What the build layer needs to compile the generated sources
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenManifest {
    pub generator_version: String,
    pub package_name: String,
    pub package_version: String,
    pub runtime_version: String,
    pub files: Vec<String>,
    pub dependencies: Vec<String>,
}

/// Result of writing generated sources to disk
#[derive(Debug)]
pub struct GenerationReport {
    pub manifest: CodegenManifest,
    pub written: Vec<PathBuf>,
    /// Shapes skipped under `continue_on_error`
    pub failures: BTreeMap<ShapeId, GeneratorError>,
}

/// SDK model generator
///
/// Owns the model, validated settings and loaded templates, and drives
/// rendering of every union and structure in the model.
pub struct SdkGenerator {
    model: Model,
    settings: CodegenSettings,
    symbols: KotlinSymbolProvider,
    tera: Tera,
}

impl SdkGenerator {
    /// Create a generator, failing fast on invalid settings
    pub fn new(model: Model, settings: CodegenSettings) -> Result<Self> {
        settings.validate()?;
        let tera = templates::load_templates()?;
        let symbols = KotlinSymbolProvider::new(&settings);
        Ok(Self {
            model,
            settings,
            symbols,
            tera,
        })
    }

    pub fn settings(&self) -> &CodegenSettings {
        &self.settings
    }

    /// Render every file in memory
    pub fn render(&self) -> Result<RenderOutcome> {
        CodegenDriver::new(&self.model, &self.symbols, &self.settings, &self.tera).render_all()
    }

    /// Render and write all sources plus the manifest under `output_dir`
    pub fn generate_to_directory(&self, output_dir: &Path) -> Result<GenerationReport> {
        let outcome = self.render()?;

        fs::create_dir_all(output_dir).map_err(|e| {
            GeneratorError::Generation(format!("Failed to create output directory: {}", e))
        })?;

        let mut written = Vec::with_capacity(outcome.files.len());
        for file in outcome.files.values() {
            let path = output_dir.join(&file.relative_path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    GeneratorError::Generation(format!(
                        "Failed to create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
            fs::write(&path, &file.contents).map_err(|e| {
                GeneratorError::Generation(format!("Failed to write {}: {}", path.display(), e))
            })?;
            written.push(path);
        }

        let manifest = self.manifest(&outcome);
        let manifest_path = output_dir.join(MANIFEST_FILE);
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write {}: {}", MANIFEST_FILE, e))
        })?;

        info!(
            files = written.len(),
            failures = outcome.failures.len(),
            output = %output_dir.display(),
            "generated sources"
        );

        Ok(GenerationReport {
            manifest,
            written,
            failures: outcome.failures,
        })
    }

    fn manifest(&self, outcome: &RenderOutcome) -> CodegenManifest {
        CodegenManifest {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            package_name: self.settings.package_name.clone(),
            package_version: self.settings.package_version.clone(),
            runtime_version: self.settings.runtime_version.clone(),
            files: outcome
                .files
                .values()
                .map(|f| f.relative_path.to_string_lossy().replace('\\', "/"))
                .collect(),
            dependencies: outcome
                .dependencies()
                .iter()
                .map(SymbolDependency::to_string)
                .collect(),
        }
    }
}

/// Generate SDK sources (convenience function)
pub fn generate_sdk(
    model: Model,
    settings: CodegenSettings,
    output_dir: &Path,
) -> Result<GenerationReport> {
    SdkGenerator::new(model, settings)?.generate_to_directory(output_dir)
}
