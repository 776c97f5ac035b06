//! # cifstack Filter
//!
//! Admission check run on every normalized shape before extrusion. A shape
//! is kept only when both of its extents are within the size threshold and
//! its layer belongs to the stack. Rejections become one [`SkipNotice`] per
//! shape and never stop the run.

pub mod notice;

pub use notice::{Axis, DiagnosticSink, LogSink, SkipNotice, SkipReason};

use cifstack_core::{LayerStack, NormalizedShape};

/// Size and layer admission filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFilter {
    /// Largest accepted X or Y extent, inclusive.
    pub max_extent: i64,
}

impl SizeFilter {
    pub fn new(max_extent: i64) -> Self {
        Self { max_extent }
    }

    /// Evaluate every check and return the ones that failed. An empty list
    /// means the shape is admitted.
    pub fn check(&self, shape: &NormalizedShape<'_>, layers: &LayerStack) -> Vec<SkipReason> {
        let mut reasons = Vec::new();

        if let Some(bbox) = shape.bbox() {
            for (axis, extent) in [(Axis::X, bbox.width()), (Axis::Y, bbox.height())] {
                // A negative limit admits nothing.
                let over = u64::try_from(self.max_extent).map_or(true, |limit| extent > limit);
                if over {
                    reasons.push(SkipReason::Oversized {
                        axis,
                        extent,
                        limit: self.max_extent,
                    });
                }
            }
        }

        let known = shape.layer.map(|name| layers.contains(name)).unwrap_or(false);
        if !known {
            reasons.push(SkipReason::UnknownLayer {
                layer: shape.layer.map(str::to_string),
            });
        }

        reasons
    }

    /// Admit `shape`, or report it to `sink` and return `false`.
    pub fn admit(
        &self,
        shape: &NormalizedShape<'_>,
        layers: &LayerStack,
        sink: &mut dyn DiagnosticSink,
    ) -> bool {
        let reasons = self.check(shape, layers);
        if reasons.is_empty() {
            return true;
        }
        sink.report(SkipNotice {
            shape_id: shape.id,
            reasons,
        });
        false
    }
}

impl Default for SizeFilter {
    fn default() -> Self {
        Self::new(cifstack_core::ExtrusionSettings::default().max_size_threshold)
    }
}
