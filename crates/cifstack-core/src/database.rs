use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::geometry::{Point, ShapeId, ShapeRecord, ShapeSource};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Shape needs at least one coordinate pair")]
    NoPoints,
}

/// All shapes read from one layout, keyed by id in parse order.
///
/// Shapes are independent of each other; the database owns the id counter so
/// ids stay dense across every record kind.
#[derive(Debug, Default, Serialize)]
pub struct ShapeDatabase {
    /// Layout name, usually the source file stem.
    pub name: String,
    shapes: BTreeMap<ShapeId, ShapeRecord>,
    next_id: ShapeId,
}

impl ShapeDatabase {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            shapes: BTreeMap::new(),
            next_id: 0,
        }
    }

    // ── Shape management ─────────────────────────────────────────────

    /// Store a new shape under the next free id and return that id.
    pub fn add_shape(
        &mut self,
        layer: Option<String>,
        points: Vec<Point>,
        source: ShapeSource,
    ) -> Result<ShapeId, ShapeError> {
        if points.is_empty() {
            return Err(ShapeError::NoPoints);
        }
        let id = self.next_id;
        self.shapes
            .insert(id, ShapeRecord::new(id, layer, points, source));
        self.next_id += 1;
        Ok(id)
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&ShapeRecord> {
        self.shapes.get(&id)
    }

    /// Shapes in ascending id order.
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.shapes.values()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of shapes per layer; shapes without a layer count under `None`.
    pub fn layer_histogram(&self) -> BTreeMap<Option<&str>, usize> {
        let mut histogram = BTreeMap::new();
        for shape in self.shapes.values() {
            *histogram.entry(shape.layer()).or_insert(0) += 1;
        }
        histogram
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
