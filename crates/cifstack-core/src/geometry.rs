use serde::{Deserialize, Serialize};

/// Sequential shape identifier, dense from 0 in parse order.
pub type ShapeId = usize;

/// A 2D point in layout database units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Extent along X. Unsigned, so the full `i64` coordinate range fits.
    pub fn width(&self) -> u64 {
        self.max.x.abs_diff(self.min.x)
    }

    /// Extent along Y.
    pub fn height(&self) -> u64 {
        self.max.y.abs_diff(self.min.y)
    }
}

/// Which kind of layout line produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeSource {
    /// A `P` polygon line, placed on the layer declared before it.
    Polygon,
    /// A self-contained `4N` contact line naming its own layer family.
    Contact,
}

/// One parsed shape. Records are created by [`crate::ShapeDatabase`] and
/// are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeRecord {
    id: ShapeId,
    layer: Option<String>,
    points: Vec<Point>,
    source: ShapeSource,
}

impl ShapeRecord {
    pub(crate) fn new(
        id: ShapeId,
        layer: Option<String>,
        points: Vec<Point>,
        source: ShapeSource,
    ) -> Self {
        Self {
            id,
            layer,
            points,
            source,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn source(&self) -> ShapeSource {
        self.source
    }

    /// Coordinates as the flat `x0 y0 x1 y1 ...` sequence they were read from.
    pub fn flat_coords(&self) -> Vec<i64> {
        flatten(&self.points)
    }
}

/// Pair a flat coordinate list into points. Returns `None` for an odd count.
pub fn pair_coords(coords: &[i64]) -> Option<Vec<Point>> {
    if coords.len() % 2 != 0 {
        return None;
    }
    Some(
        coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect(),
    )
}

/// Inverse of [`pair_coords`].
pub fn flatten(points: &[Point]) -> Vec<i64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}
