//! # cifstack Renderer
//!
//! Extrudes parsed layout shapes into closed solids stacked by layer and
//! hands them, with their layer colors, to whatever displays them.
//!
//! Camera, lighting and the display itself belong to the consumer of
//! [`RenderSink`] or of the JSON [`RenderFrame`].

pub mod extrude;
pub mod mesh;
pub mod scene;

pub use extrude::{extrude_ring, extrude_shape};
pub use mesh::Mesh;
pub use scene::{RenderFrame, RenderItem, RenderSink, SceneBuilder, SceneStats};
