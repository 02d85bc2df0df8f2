//! Shape-count summary of a parsed model

use smithy_sdk_generator_common::{Model, ShapeId, ShapeType};
use std::collections::BTreeMap;

use crate::smithy::PRELUDE_NAMESPACE;

/// What a model contains, excluding prelude shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub services: Vec<ShapeId>,
    pub counts: BTreeMap<ShapeType, usize>,
    pub event_streams: Vec<ShapeId>,
}

impl ModelSummary {
    pub fn from_model(model: &Model) -> Self {
        let mut counts = BTreeMap::new();
        let mut services = Vec::new();
        let mut event_streams = Vec::new();

        for shape in model
            .shapes()
            .filter(|s| s.id.namespace() != Some(PRELUDE_NAMESPACE))
        {
            *counts.entry(shape.shape_type).or_insert(0) += 1;
            match shape.shape_type {
                ShapeType::Service => services.push(shape.id.clone()),
                ShapeType::Union if shape.is_event_stream() => {
                    event_streams.push(shape.id.clone())
                }
                _ => {}
            }
        }

        Self {
            services,
            counts,
            event_streams,
        }
    }

    pub fn count(&self, shape_type: ShapeType) -> usize {
        self.counts.get(&shape_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}
