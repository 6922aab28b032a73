//! End-to-end dissection scenarios on fixed triangles.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use gerwien::geom::{triangle_contains, vertex_centroid};
use gerwien::prelude::*;
use gerwien::ShapeKind;

fn triangle(base: f64, height: f64, peak_x: f64) -> (Shape, TriangleDims) {
    let dims = TriangleDims::new(base, height, peak_x).unwrap();
    (Shape::triangle(dims).unwrap(), dims)
}

fn assert_all_vertices_inside(shape: &Shape, target: &TriangleDims) {
    let verts = target.vertices();
    for (i, poly) in shape.world_polygons(1.0).iter().enumerate() {
        for p in poly {
            assert!(
                triangle_contains(&verts, *p, 1e-4),
                "part {i} vertex {p:?} leaves the target"
            );
        }
    }
}

#[test]
fn triangle_to_rectangle_reference() {
    let (mut shape, _) = triangle(100.0, 200.0, 40.0);
    let rect = shape.triangle_to_rectangle().unwrap();
    assert_eq!(shape.info(), Some(&ShapeInfo::Rectangle(rect)));
    assert_relative_eq!(rect.width, 100.0);
    assert_relative_eq!(rect.height, 100.0);
    assert_abs_diff_eq!(shape.area(), 10000.0, epsilon = 1e-6);
}

#[test]
fn rectangle_resize_reference() {
    let mut shape = Shape::rectangle(RectDims::new(100.0, 100.0).unwrap()).unwrap();
    let rect = shape.rectangle_to_fixed_width_rectangle(250.0).unwrap();
    assert_relative_eq!(rect.width, 250.0, epsilon = 1e-9);
    assert_relative_eq!(rect.height, 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shape.area(), 10000.0, epsilon = 1e-6);
}

#[test]
fn full_dissection_reference() {
    let (mut shape, _) = triangle(100.0, 200.0, 40.0);
    let (target_shape, target) = triangle(250.0, 80.0, 180.0);
    shape.triangle_to_triangle(&target).unwrap();

    assert_eq!(shape.kind(), ShapeKind::AxisAlignedTriangle);
    assert_eq!(shape.info(), Some(&ShapeInfo::AxisAlignedTriangle(target)));
    assert_abs_diff_eq!(shape.area(), 10000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(shape.area(), target_shape.area(), epsilon = 1e-6);
    assert_all_vertices_inside(&shape, &target);
    assert!(shape.parts().len() > 3);
}

#[test]
fn full_dissection_many_resize_steps() {
    // base ratio 10: several 1.5x steps before the final one
    let (mut shape, _) = triangle(40.0, 500.0, 10.0);
    let target = TriangleDims::new(400.0, 50.0, 300.0).unwrap();
    shape.triangle_to_triangle(&target).unwrap();
    assert_abs_diff_eq!(shape.area(), 10000.0, epsilon = 1e-6);
    assert_all_vertices_inside(&shape, &target);
}

#[test]
fn interpolation_starts_at_source() {
    let (mut shape, source) = triangle(100.0, 200.0, 40.0);
    let target = TriangleDims::new(250.0, 80.0, 180.0).unwrap();
    shape.triangle_to_triangle(&target).unwrap();
    // at amount = 0 every piece is still where it was cut, inside the source
    for part in shape.parts() {
        let c = vertex_centroid(&part.transformed_points(0.0));
        assert!(triangle_contains(&source.vertices(), c, 1e-6));
    }
}

#[test]
fn random_pairs_dissect() {
    for index in 0..20 {
        let (mut shape, target) =
            random_dissection_input(10000.0, ReplayToken::new(11, index)).unwrap();
        shape.triangle_to_triangle(&target).unwrap();
        assert!((shape.area() - 10000.0).abs() < 1e-4, "pair {index}");
        let verts = target.vertices();
        for part in shape.parts() {
            assert!(triangle_contains(&verts, part.world_centroid(), 1e-4));
        }
    }
}

#[test]
fn wrong_stage_order_is_rejected_without_mutation() {
    let (mut shape, _) = triangle(100.0, 200.0, 40.0);
    let err = shape.rectangle_to_fixed_width_rectangle(250.0).unwrap_err();
    assert_eq!(
        err,
        DissectError::WrongShape {
            expected: ShapeKind::Rectangle,
            found: ShapeKind::AxisAlignedTriangle
        }
    );
    assert_eq!(shape.parts().len(), 1);

    let mut untagged = Shape::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ],
        None,
    )
    .unwrap();
    assert!(matches!(
        untagged.triangle_to_rectangle(),
        Err(DissectError::WrongShape {
            found: ShapeKind::Unknown,
            ..
        })
    ));
}
