//! Shape-to-solid extrusion.
//!
//! Polygons become prisms `layer_thickness` tall. Markers (points and
//! two-point segments) become a pair of square posts `spike_thickness` tall,
//! one per endpoint, joined into a single eight-point ring.

use cifstack_core::{ExtrusionSettings, NormalizedShape, Point, ShapeKind};

use crate::mesh::Mesh;

/// Extrude a normalized shape whose bottom face sits at `base_z`.
pub fn extrude_shape(
    shape: &NormalizedShape<'_>,
    base_z: f64,
    settings: &ExtrusionSettings,
) -> Mesh {
    match shape.kind {
        ShapeKind::Polygon => {
            let ring: Vec<[f64; 2]> = shape
                .points
                .iter()
                .map(|p| [p.x as f64, p.y as f64])
                .collect();
            extrude_ring(&ring, base_z, settings.layer_thickness)
        }
        ShapeKind::Marker => {
            let ring = marker_ring(&shape.points, settings.spike_width);
            extrude_ring(&ring, base_z, settings.spike_thickness)
        }
    }
}

/// Corners of a square of half-width `half_width` around each point,
/// counter-clockwise from the lower-left, concatenated in point order.
fn marker_ring(points: &[Point], half_width: f64) -> Vec<[f64; 2]> {
    let w = half_width;
    points
        .iter()
        .flat_map(|p| {
            let (x, y) = (p.x as f64, p.y as f64);
            [
                [x - w, y - w],
                [x + w, y - w],
                [x + w, y + w],
                [x - w, y + w],
            ]
        })
        .collect()
}

/// Prism over a closed ring: `2n` vertices and `n + 2` faces.
///
/// Vertices `0..n` are the ring at `base_z` and `n..2n` the ring at
/// `base_z + height`. Faces are the bottom cap, the top cap, then one quad
/// per ring edge with the last edge wrapping to vertex 0. Degenerate rings
/// are extruded as given.
pub fn extrude_ring(ring: &[[f64; 2]], base_z: f64, height: f64) -> Mesh {
    let n = ring.len();
    let mut mesh = Mesh::with_capacity(2 * n, n + 2);

    let bottom = mesh.push_ring(ring, base_z);
    let top = mesh.push_ring(ring, base_z + height);

    mesh.faces.push((bottom..bottom + n).collect());
    mesh.faces.push((top..top + n).collect());

    for i in 0..n {
        let j = (i + 1) % n;
        mesh.faces
            .push(vec![bottom + i, bottom + j, top + j, top + i]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use cifstack_core::{ShapeDatabase, ShapeSource};

    fn shape_db(points: Vec<Point>) -> ShapeDatabase {
        let mut db = ShapeDatabase::new("test");
        db.add_shape(Some("M1".into()), points, ShapeSource::Polygon)
            .unwrap();
        db
    }

    fn square() -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]
    }

    #[test]
    fn test_square_prism() {
        let db = shape_db(square());
        let shape = NormalizedShape::from_record(db.get_shape(0).unwrap());
        let mesh = extrude_shape(&shape, 375.0, &ExtrusionSettings::default());

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);

        assert_eq!(mesh.faces[0], vec![0, 1, 2, 3]);
        assert_eq!(mesh.faces[1], vec![4, 5, 6, 7]);
        for &i in &mesh.faces[0] {
            assert_eq!(mesh.vertices[i][2], 375.0);
        }
        for &i in &mesh.faces[1] {
            assert_eq!(mesh.vertices[i][2], 425.0);
        }
        assert_eq!(mesh.vertices[6], [10.0, 10.0, 425.0]);

        assert_eq!(mesh.faces[2], vec![0, 1, 5, 4]);
        assert_eq!(mesh.faces[5], vec![3, 0, 4, 7]);
    }

    #[test]
    fn test_polygon_counts() {
        let pts: Vec<Point> = (0..7).map(|i| Point::new(i * 3, (i * i) % 5)).collect();
        let db = shape_db(pts);
        let shape = NormalizedShape::from_record(db.get_shape(0).unwrap());
        let mesh = extrude_shape(&shape, 0.0, &ExtrusionSettings::default());
        assert_eq!(mesh.vertex_count(), 14);
        assert_eq!(mesh.face_count(), 9);
    }

    #[test]
    fn test_bottom_face_reproduces_input_order() {
        let pts = vec![
            Point::new(-5, 40),
            Point::new(30, 2),
            Point::new(12, -9),
            Point::new(0, 0),
            Point::new(7, 7),
        ];
        let db = shape_db(pts);
        let record = db.get_shape(0).unwrap();
        let shape = NormalizedShape::from_record(record);
        let mesh = extrude_shape(&shape, 0.0, &ExtrusionSettings::default());

        let flat: Vec<i64> = mesh
            .bottom_face_coords()
            .iter()
            .map(|&v| v as i64)
            .collect();
        assert_eq!(flat, record.flat_coords());
    }

    #[test]
    fn test_single_point_marker() {
        let db = shape_db(vec![Point::new(5, 5)]);
        let shape = NormalizedShape::from_record(db.get_shape(0).unwrap());
        let settings = ExtrusionSettings::default();
        let mesh = extrude_shape(&shape, 425.0, &settings);

        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.face_count(), 10);
        assert_eq!(mesh.vertices[0], [-15.0, -15.0, 425.0]);
        assert_eq!(mesh.vertices[2], [25.0, 25.0, 425.0]);
        // Both posts coincide for a single point.
        assert_eq!(mesh.vertices[4], mesh.vertices[0]);
        assert_eq!(mesh.vertices[8], [-15.0, -15.0, 925.0]);
        assert_eq!(mesh.faces[9], vec![7, 0, 8, 15]);
    }

    #[test]
    fn test_segment_marker_posts() {
        let db = shape_db(vec![Point::new(0, 0), Point::new(100, 50)]);
        let shape = NormalizedShape::from_record(db.get_shape(0).unwrap());
        let settings = ExtrusionSettings {
            spike_width: 2.0,
            spike_thickness: 10.0,
            ..Default::default()
        };
        let mesh = extrude_shape(&shape, 0.0, &settings);

        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.face_count(), 10);
        assert_eq!(mesh.vertices[1], [2.0, -2.0, 0.0]);
        assert_eq!(mesh.vertices[4], [98.0, 48.0, 0.0]);
        assert_eq!(mesh.vertices[15], [98.0, 52.0, 10.0]);
    }

    #[test]
    fn test_collinear_polygon_extruded() {
        let db = shape_db(vec![Point::new(0, 0), Point::new(5, 0), Point::new(10, 0)]);
        let shape = NormalizedShape::from_record(db.get_shape(0).unwrap());
        let mesh = extrude_shape(&shape, 0.0, &ExtrusionSettings::default());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 5);
    }
}
