//! Shape classification and normalization.
//!
//! A record with a single coordinate pair is widened to two identical
//! points, so every normalized shape is either a two-point marker or a
//! polygon of three or more points.

use serde::Serialize;

use crate::geometry::{BBox, Point, ShapeId, ShapeRecord};

/// Extrusion rule a normalized shape falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShapeKind {
    /// Exactly two points: a single point (after duplication) or a segment.
    Marker,
    /// Three or more points.
    Polygon,
}

/// A shape ready for filtering and extrusion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedShape<'a> {
    pub id: ShapeId,
    pub layer: Option<&'a str>,
    pub points: Vec<Point>,
    pub kind: ShapeKind,
}

impl<'a> NormalizedShape<'a> {
    pub fn from_record(record: &'a ShapeRecord) -> Self {
        let mut points = record.points().to_vec();
        if points.len() == 1 {
            points.push(points[0]);
        }
        let kind = if points.len() == 2 {
            ShapeKind::Marker
        } else {
            ShapeKind::Polygon
        };
        Self {
            id: record.id(),
            layer: record.layer(),
            points,
            kind,
        }
    }

    pub fn xs(&self) -> impl Iterator<Item = i64> + '_ {
        self.points.iter().map(|p| p.x)
    }

    pub fn ys(&self) -> impl Iterator<Item = i64> + '_ {
        self.points.iter().map(|p| p.y)
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.points)
    }
}
