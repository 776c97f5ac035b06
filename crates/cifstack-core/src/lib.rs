//! # cifstack Core
//!
//! Layer registry, shape records and shape normalization shared by the
//! reader, the admission filter and the extrusion engine.

pub mod geometry;
pub mod database;
pub mod layer;
pub mod settings;
pub mod shape;

pub use database::{ShapeDatabase, ShapeError};
pub use geometry::{BBox, Point, ShapeId, ShapeRecord, ShapeSource};
pub use layer::{Layer, LayerColor, LayerError, LayerStack};
pub use settings::ExtrusionSettings;
pub use shape::{NormalizedShape, ShapeKind};
