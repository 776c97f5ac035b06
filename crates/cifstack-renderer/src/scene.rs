use serde::Serialize;

use cifstack_core::{
    ExtrusionSettings, LayerColor, LayerStack, NormalizedShape, ShapeDatabase, ShapeId,
    ShapeRecord,
};
use cifstack_filter::{DiagnosticSink, SizeFilter, SkipNotice};

use crate::extrude::extrude_shape;
use crate::mesh::Mesh;

/// One extruded shape, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    pub shape_id: ShapeId,
    pub layer: String,
    pub color: LayerColor,
    pub mesh: Mesh,
}

/// Receiver for extruded shapes, in parse order.
pub trait RenderSink {
    fn draw(&mut self, item: RenderItem);
}

impl RenderSink for Vec<RenderItem> {
    fn draw(&mut self, item: RenderItem) {
        self.push(item);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SceneStats {
    pub rendered: usize,
    pub skipped: usize,
}

/// Turns parsed shapes into layer-stacked solids.
pub struct SceneBuilder<'a> {
    layers: &'a LayerStack,
    settings: ExtrusionSettings,
    filter: SizeFilter,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(layers: &'a LayerStack, settings: ExtrusionSettings) -> Self {
        Self {
            layers,
            settings,
            filter: SizeFilter::new(settings.max_size_threshold),
        }
    }

    /// Normalize, filter and extrude one record. Rejected records are
    /// reported to `diagnostics` and yield `None`.
    pub fn build_shape(
        &self,
        record: &ShapeRecord,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Option<RenderItem> {
        let shape = NormalizedShape::from_record(record);
        if !self.filter.admit(&shape, self.layers, diagnostics) {
            return None;
        }

        let base_z = self.layers.base_z(shape.layer);
        let color = self.layers.color_of(shape.layer);
        let mesh = extrude_shape(&shape, base_z, &self.settings);
        log::debug!(
            "Shape {} ({:?}) on {:?}: {} vertices at z={}",
            shape.id,
            shape.kind,
            shape.layer,
            mesh.vertex_count(),
            base_z
        );

        Some(RenderItem {
            shape_id: shape.id,
            layer: shape.layer.unwrap_or_default().to_string(),
            color,
            mesh,
        })
    }

    /// Extrude every shape in `db`, sending accepted shapes to `sink` in id
    /// order and skipped ones to `diagnostics`.
    pub fn build(
        &self,
        db: &ShapeDatabase,
        sink: &mut dyn RenderSink,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> SceneStats {
        let mut stats = SceneStats::default();
        for record in db.shapes() {
            match self.build_shape(record, diagnostics) {
                Some(item) => {
                    sink.draw(item);
                    stats.rendered += 1;
                }
                None => stats.skipped += 1,
            }
        }
        log::info!(
            "Scene '{}': {} shapes rendered, {} skipped",
            db.name,
            stats.rendered,
            stats.skipped
        );
        stats
    }
}

/// Complete scene handed to a frontend as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    pub name: String,
    pub items: Vec<RenderItem>,
    pub skipped: Vec<SkipNotice>,
}

impl RenderFrame {
    pub fn build(db: &ShapeDatabase, layers: &LayerStack, settings: ExtrusionSettings) -> Self {
        let mut items = Vec::new();
        let mut skipped = Vec::new();
        SceneBuilder::new(layers, settings).build(db, &mut items, &mut skipped);
        Self {
            name: db.name.clone(),
            items,
            skipped,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
