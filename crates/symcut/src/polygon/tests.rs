use super::*;
use crate::error::PuzzleError;
use crate::geom2::Affine2;
use nalgebra::vector;

fn square(c: Point2, h: f64) -> Vec<Point2> {
    vec![
        c + vector![-h, -h],
        c + vector![h, -h],
        c + vector![h, h],
        c + vector![-h, h],
    ]
}

fn tri_area(t: &Triangle) -> f64 {
    0.5 * crate::geom2::orient(t[0], t[1], t[2])
}

#[test]
fn orientation_is_normalized() {
    let mut cw = square(Point2::zeros(), 1.0);
    cw.reverse();
    let p = Polygon::new(cw);
    assert!(p.contours()[0].signed_area() > 0.0);
    let h = Contour::hole(square(Point2::zeros(), 0.5));
    assert!(h.signed_area() < 0.0);
    assert_eq!(h.kind(), ContourKind::Hole);
}

#[test]
fn area_subtracts_holes() {
    let p = Polygon::with_holes(
        square(Point2::zeros(), 2.0),
        vec![square(Point2::zeros(), 1.0)],
    );
    assert!((p.area() - 12.0).abs() < 1e-12);
    assert_eq!(p.outers().count(), 1);
    assert_eq!(p.holes().count(), 1);
    assert_eq!(p.vertex_count(), 8);
    assert!(!p.contains(Point2::zeros()));
    assert!(p.contains(vector![1.5, 0.0]));
    assert!(!p.contains(vector![2.5, 0.0]));
}

#[test]
fn transformed_does_not_mutate_and_keeps_orientation() {
    let p = Polygon::new(square(vector![1.0, 0.0], 1.0));
    let before = p.clone();
    let f = Affine2::reflection(Point2::zeros(), vector![0.0, 1.0]);
    let q = p.transformed(&f);
    assert_eq!(p, before);
    assert!(q.contours()[0].signed_area() > 0.0);
    assert!((q.area() - p.area()).abs() < 1e-12);
    assert!(q.contains(vector![-1.0, 0.0]));
}

#[test]
fn clone_is_independent() {
    let mut p = Polygon::new(square(Point2::zeros(), 1.0));
    let q = p.clone();
    p.push_contour(Contour::hole(square(Point2::zeros(), 0.25)));
    assert_eq!(q.contours().len(), 1);
    assert_eq!(p.contours().len(), 2);
}

#[test]
fn tessellates_square_and_caches() {
    let mut p = Polygon::new(square(Point2::zeros(), 1.0));
    assert!(p.triangles().is_none());
    let n = {
        let tris = p.tesselate_if_needed().unwrap();
        let covered: f64 = tris.iter().map(tri_area).sum();
        assert!((covered - 4.0).abs() < 1e-12);
        assert!(tris.iter().all(|t| tri_area(t) >= 0.0));
        tris.len()
    };
    assert_eq!(n, 2);
    assert!(p.triangles().is_some());
    p.push_contour(Contour::hole(square(Point2::zeros(), 0.5)));
    assert!(p.triangles().is_none(), "geometry change must drop the cache");
    let covered: f64 = p.tesselate_if_needed().unwrap().iter().map(tri_area).sum();
    assert!((covered - 3.0).abs() < 1e-12);
}

#[test]
fn tessellates_two_outers_with_one_hole() {
    let mut p = Polygon::from_contours(vec![
        Contour::outer(square(Point2::zeros(), 1.0)),
        Contour::outer(square(vector![5.0, 0.0], 1.0)),
        Contour::hole(square(vector![5.0, 0.0], 0.5)),
    ]);
    let covered: f64 = p.tesselate_if_needed().unwrap().iter().map(tri_area).sum();
    assert!((covered - 7.0).abs() < 1e-12);
}

#[test]
fn tessellates_l_shape() {
    let mut p = Polygon::new(vec![
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 1.0],
        vector![1.0, 1.0],
        vector![1.0, 2.0],
        vector![0.0, 2.0],
    ]);
    let covered: f64 = p.tesselate_if_needed().unwrap().iter().map(tri_area).sum();
    assert!((covered - 3.0).abs() < 1e-12);
}

#[test]
fn degenerate_input_reports_failure() {
    let mut line = Polygon::new(vec![vector![0.0, 0.0], vector![1.0, 0.0]]);
    assert!(matches!(
        line.tesselate_if_needed(),
        Err(PuzzleError::TriangulationFailure { .. })
    ));
    assert!(line.triangles().is_none());

    let mut empty = Polygon::default();
    assert!(empty.is_empty());
    assert!(matches!(
        empty.tesselate_if_needed(),
        Err(PuzzleError::TriangulationFailure { .. })
    ));

    // Bow-tie: signed area cancels out, no valid triangulation exists.
    let mut bowtie = Polygon::new(vec![
        vector![0.0, 0.0],
        vector![1.0, 1.0],
        vector![1.0, 0.0],
        vector![0.0, 1.0],
    ]);
    assert!(bowtie.tesselate_if_needed().is_err());
}
