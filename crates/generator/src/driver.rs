//! Parallel rendering of every generated shape
//!
//! Each union and structure is rendered independently against the shared
//! read-only model, symbol provider and templates. Results are merged into
//! maps keyed by shape id so output never depends on scheduling order.

use crate::structure::StructureRenderer;
use crate::symbols::SymbolProvider;
use crate::templates::{self, package_path, KOTLIN_FILE};
use crate::union::UnionRenderer;
use crate::writer::KotlinWriter;
use rayon::prelude::*;
use smithy_sdk_generator_common::{
    CodegenSettings, GeneratorError, Model, Result, Shape, ShapeId, ShapeType, SymbolDependency,
};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tera::Tera;
use tracing::{debug, info_span, warn};

const PRELUDE_NAMESPACE: &str = "smithy.api";
const UNIT_TYPE: &str = "smithy.api#unitType";

/// One generated Kotlin source file
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub shape: ShapeId,
    /// Path relative to the output root
    pub relative_path: PathBuf,
    pub contents: String,
    pub dependencies: Vec<SymbolDependency>,
}

/// Files that rendered plus shapes that failed, both keyed by shape id
#[derive(Debug, Default)]
pub struct RenderOutcome {
    pub files: BTreeMap<ShapeId, RenderedFile>,
    pub failures: BTreeMap<ShapeId, GeneratorError>,
}

impl RenderOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Runtime dependencies across all files, deduplicated and sorted
    pub fn dependencies(&self) -> Vec<SymbolDependency> {
        let mut deps: Vec<_> = self
            .files
            .values()
            .flat_map(|f| f.dependencies.iter().cloned())
            .collect();
        deps.sort();
        deps.dedup();
        deps
    }
}

pub struct CodegenDriver<'a> {
    model: &'a Model,
    symbols: &'a dyn SymbolProvider,
    settings: &'a CodegenSettings,
    tera: &'a Tera,
}

impl<'a> CodegenDriver<'a> {
    pub fn new(
        model: &'a Model,
        symbols: &'a dyn SymbolProvider,
        settings: &'a CodegenSettings,
        tera: &'a Tera,
    ) -> Self {
        Self {
            model,
            symbols,
            settings,
            tera,
        }
    }

    /// Unions and structures that get a file of their own
    pub fn targets(&self) -> Vec<&'a Shape> {
        let namespace = self.settings.service.as_ref().and_then(|s| s.namespace());

        self.model
            .shapes()
            .filter(|shape| matches!(shape.shape_type, ShapeType::Union | ShapeType::Structure))
            .filter(|shape| shape.id.namespace() != Some(PRELUDE_NAMESPACE))
            .filter(|shape| !shape.has_trait(UNIT_TYPE))
            .filter(|shape| namespace.is_none() || shape.id.namespace() == namespace)
            .collect()
    }

    /// Render every target shape.
    ///
    /// Without `continue_on_error`, the first failure in shape id order is
    /// returned and nothing else is reported.
    pub fn render_all(&self) -> Result<RenderOutcome> {
        let targets = self.targets();
        debug!(shapes = targets.len(), "rendering shapes");

        let results: Vec<(ShapeId, Result<RenderedFile>)> = targets
            .par_iter()
            .map(|shape| {
                let _span = info_span!("render", shape = %shape.id).entered();
                (shape.id.clone(), self.render_shape(shape))
            })
            .collect();

        let mut outcome = RenderOutcome::default();
        for (id, result) in results {
            match result {
                Ok(file) => {
                    outcome.files.insert(id, file);
                }
                Err(e) => {
                    outcome.failures.insert(id, e);
                }
            }
        }

        reject_path_collisions(&mut outcome);

        if !self.settings.continue_on_error {
            if let Some((_, error)) = outcome.failures.pop_first() {
                return Err(error);
            }
        }

        for (id, error) in &outcome.failures {
            warn!(shape = %id, error = %error, "skipping shape that failed to render");
        }
        Ok(outcome)
    }

    /// Render a single union or structure into a complete file
    pub fn render_shape(&self, shape: &Shape) -> Result<RenderedFile> {
        let package = self.settings.model_package();
        let mut writer = KotlinWriter::new(package.clone());

        let name = match shape.shape_type {
            ShapeType::Union => {
                let declaration =
                    UnionRenderer::new(self.model, self.symbols, self.settings).render(&shape.id)?;
                declaration.emit(&mut writer);
                declaration.symbol.name
            }
            ShapeType::Structure => {
                let declaration = StructureRenderer::new(self.model, self.symbols, self.settings)
                    .render(&shape.id)?;
                declaration.emit(&mut writer);
                declaration.symbol.name
            }
            other => {
                return Err(GeneratorError::Generation(format!(
                    "cannot render {} shape {}",
                    other, shape.id
                )))
            }
        };

        let mut context = tera::Context::new();
        context.insert("generator_version", env!("CARGO_PKG_VERSION"));
        context.insert("runtime_version", &self.settings.runtime_version);
        context.insert("package", &package);
        context.insert("imports", &writer.imports());
        context.insert("body", &writer.body());

        Ok(RenderedFile {
            shape: shape.id.clone(),
            relative_path: PathBuf::from("src/main/kotlin")
                .join(package_path(&package))
                .join(format!("{}.kt", name)),
            contents: templates::render(self.tera, KOTLIN_FILE, &context)?,
            dependencies: writer.dependencies(),
        })
    }
}

/// Shapes with the same name in different namespaces map to the same file.
/// The first in shape id order keeps it; the others become failures.
fn reject_path_collisions(outcome: &mut RenderOutcome) {
    let mut owners: HashMap<&PathBuf, &ShapeId> = HashMap::new();
    let mut collisions = Vec::new();
    for (id, file) in &outcome.files {
        match owners.entry(&file.relative_path) {
            Entry::Occupied(owner) => collisions.push((id.clone(), (*owner.get()).clone())),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
    }

    for (id, owner) in collisions {
        if let Some(file) = outcome.files.remove(&id) {
            let message = format!(
                "{} and {} both generate {}",
                owner,
                id,
                file.relative_path.display()
            );
            outcome
                .failures
                .insert(id.clone(), GeneratorError::InvariantViolation { shape: id, message });
        }
    }
}
