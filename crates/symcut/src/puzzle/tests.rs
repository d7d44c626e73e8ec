use super::def::{CutterDef, PuzzleDef, TransformDef};
use super::*;
use crate::error::IndexKind;
use nalgebra::{vector, Matrix2};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};

/// Axis-aligned square of half-side `h` with its dihedral group.
fn square(center: Point2, h: f64) -> Cutter {
    Cutter::regular(4, center, h * SQRT_2, FRAC_PI_4)
}

/// Two unit-half-side squares overlapping in a 1×2 strip; union area 6.
fn two_squares() -> Puzzle {
    Puzzle::new(vec![
        square(vector![-0.5, 0.0], 1.0),
        square(vector![0.5, 0.0], 1.0),
    ])
    .unwrap()
}

fn hexagons() -> Puzzle {
    Puzzle::new(vec![
        Cutter::regular(6, vector![-0.75, 0.0], 1.0, 0.0),
        Cutter::regular(6, vector![0.75, 0.0], 1.0, 0.0),
        Cutter::regular(6, vector![0.0, 1.1], 1.0, 0.3),
    ])
    .unwrap()
}

fn assert_no_overlap(p: &Puzzle, tol: f64) {
    let world: Vec<Polygon> = p.shapes().iter().map(Shape::world).collect();
    for i in 0..world.len() {
        for j in (i + 1)..world.len() {
            let overlap = world[i].cut_against(&world[j]).inside_area();
            assert!(overlap < tol, "shapes {i} and {j} overlap by {overlap}");
        }
    }
}

fn same_point_set(a: &[Point2], b: &[Point2], eps: f64) -> bool {
    a.len() == b.len() && a.iter().all(|p| b.iter().any(|q| (p - q).norm() < eps))
}

#[test]
fn builder_covers_union_exactly_once() {
    let p = two_squares();
    assert_eq!(p.shapes().len(), 2);
    assert!((p.total_area() - 6.0).abs() < 1e-9);
    assert!(p.is_solved());
    assert!(p.moves().is_empty());
    assert_no_overlap(&p, 1e-9);
}

#[test]
fn builder_is_repeatable() {
    let mut a = hexagons();
    let b = hexagons();
    assert_eq!(a.shapes(), b.shapes());
    let area = a.total_area();
    a.apply_cut(0, 2).unwrap();
    a.reset();
    assert!(a.is_solved());
    assert!(a.moves().is_empty());
    assert_eq!(a.shapes(), b.shapes());
    assert!((a.total_area() - area).abs() < 1e-12);
}

#[test]
fn cut_conserves_area_and_moves_inside_pieces() {
    let mut p = two_squares();
    let before = p.total_area();
    let mv = p.apply_cut(0, 2).unwrap();
    assert_eq!(mv, Move { cutter: 0, symmetry: 2 });
    assert_eq!(p.shapes().len(), 3);
    assert!((p.total_area() - before).abs() < 1e-9);
    assert!(!p.is_solved());
    assert_no_overlap(&p, 1e-9);

    // The part of square 1 outside square 0 stays put; the rest turned.
    let still: Vec<&Shape> = p
        .shapes()
        .iter()
        .filter(|s| s.transform.is_identity_eps(1e-9))
        .collect();
    assert_eq!(still.len(), 1);
    assert!((still[0].polygon.area() - 2.0).abs() < 1e-9);
    assert!(still[0].polygon.contains(vector![1.0, 0.0]));
}

#[test]
fn invalid_indices_leave_state_untouched() {
    let mut p = two_squares();
    let before = p.shapes().to_vec();
    assert_eq!(
        p.apply_cut(5, 0),
        Err(PuzzleError::InvalidIndex {
            kind: IndexKind::Cutter,
            index: 5,
            len: 2
        })
    );
    assert_eq!(
        p.apply_cut(1, 8),
        Err(PuzzleError::InvalidIndex {
            kind: IndexKind::Symmetry,
            index: 8,
            len: 8
        })
    );
    assert_eq!(p.shapes(), before.as_slice());
    assert!(p.moves().is_empty());
}

#[test]
fn quarter_then_three_quarter_turn_solves() {
    let mut p = two_squares();
    // Symmetries alternate rotation/reflection: 2 = +90°, 6 = +270°.
    p.apply_cut(0, 2).unwrap();
    assert!(!p.is_solved());
    p.apply_cut(0, 6).unwrap();
    assert!(p.is_solved());
    assert!((p.total_area() - 6.0).abs() < 1e-9);
}

#[test]
fn reflection_twice_solves() {
    let mut p = two_squares();
    p.apply_cut(1, 3).unwrap();
    assert!(!p.is_solved());
    p.apply_cut(1, 3).unwrap();
    assert!(p.is_solved());
}

#[test]
fn undo_restores_previous_lists() {
    let mut p = two_squares();
    let solved = p.shapes().to_vec();
    p.apply_cut(0, 2).unwrap();
    let after_first = p.shapes().to_vec();
    p.apply_cut(1, 1).unwrap();
    assert_eq!(p.moves().len(), 2);

    assert_eq!(p.undo(), Some(Move { cutter: 1, symmetry: 1 }));
    assert_eq!(p.shapes(), after_first.as_slice());
    assert_eq!(p.undo(), Some(Move { cutter: 0, symmetry: 2 }));
    assert_eq!(p.shapes(), solved.as_slice());
    assert!(p.is_solved());
    assert_eq!(p.undo(), None);
}

#[test]
fn scripted_scramble_uses_given_indices() {
    let mut p = two_squares();
    let mut src = ScriptedIndices::new(vec![1, 2, 0, 6]);
    let moves = p.scramble(2, &mut src).unwrap();
    assert_eq!(
        moves,
        vec![
            Move { cutter: 1, symmetry: 2 },
            Move { cutter: 0, symmetry: 6 }
        ]
    );
    assert_eq!(p.moves(), moves);
    assert!((p.total_area() - 6.0).abs() < 1e-9);
}

#[test]
fn seeded_scramble_is_reproducible() {
    let mut a = hexagons();
    let mut b = hexagons();
    let ma = a.scramble(10, &mut RandIndices::seeded(7)).unwrap();
    let mb = b.scramble(10, &mut RandIndices::seeded(7)).unwrap();
    assert_eq!(ma, mb);
    assert_eq!(a.shapes(), b.shapes());
}

#[test]
fn random_cuts_keep_a_partition() {
    let mut p = hexagons();
    let area = p.total_area();
    let mut src = RandIndices::seeded(2024);
    for _ in 0..12 {
        p.apply_random_cut(&mut src).unwrap();
        assert!((p.total_area() - area).abs() < 1e-6);
    }
    assert_no_overlap(&p, 1e-6);
    assert!(p.tesselate_shapes().unwrap() >= p.shapes().len());
}

#[test]
fn empty_puzzle_rejects_random_cut() {
    let mut p = Puzzle::new(Vec::new()).unwrap();
    assert!(p.shapes().is_empty());
    assert!(p.is_solved());
    assert!(matches!(
        p.apply_random_cut(&mut ScriptedIndices::new(vec![0])),
        Err(PuzzleError::InvalidIndex { len: 0, .. })
    ));
}

#[test]
fn regular_polygon_symmetries_close() {
    for n in 3..=8 {
        let c = Cutter::regular(n, vector![0.3, -0.2], 1.5, 0.1);
        assert_eq!(c.symmetries().len(), 2 * n);
        assert!(c.symmetries()[0].is_identity_eps(1e-12));
        c.validate(0, &GeomCfg::default()).unwrap();
        let pts = c.polygon().contours()[0].points();
        for s in c.symmetries() {
            let image = c.polygon().transformed(s);
            assert!(same_point_set(image.contours()[0].points(), pts, 1e-9));
        }
    }
}

#[test]
fn cutter_validation_reports_index() {
    let sq = square(Point2::zeros(), 1.0);
    let no_identity = Cutter::new(
        sq.polygon().clone(),
        vec![Affine2::rotation(Point2::zeros(), FRAC_PI_2)],
    );
    let err = Puzzle::new(vec![sq.clone(), no_identity]).unwrap_err();
    assert!(matches!(err, PuzzleError::InvalidCutter { index: 1, .. }));

    let stretch = Affine2 {
        m: Matrix2::new(2.0, 0.0, 0.0, 1.0),
        t: Point2::zeros(),
    };
    let scaled = Cutter::new(sq.polygon().clone(), vec![Affine2::identity(), stretch]);
    assert!(matches!(
        Puzzle::new(vec![scaled]),
        Err(PuzzleError::InvalidCutter { index: 0, .. })
    ));

    let flat = Cutter::regular(2, Point2::zeros(), 1.0, 0.0);
    assert!(Puzzle::new(vec![flat]).is_err());
}

#[test]
fn cutter_at_prefers_smallest() {
    let p = Puzzle::new(vec![
        square(Point2::zeros(), 2.0),
        Cutter::regular(3, vector![1.0, 0.0], 0.5, 0.0),
    ])
    .unwrap();
    assert_eq!(p.cutter_at(vector![1.0, 0.0]), Some(1));
    assert_eq!(p.cutter_at(vector![-1.0, -1.0]), Some(0));
    assert_eq!(p.cutter_at(vector![5.0, 5.0]), None);
    // Triangle sits inside the square: the square's piece has a hole.
    assert_eq!(p.shapes().len(), 2);
    assert!((p.total_area() - 16.0).abs() < 1e-9);
}

#[test]
fn definition_file_parses_and_builds() {
    let json = r#"{
        "name": "square and diamond",
        "cutters": [
            { "kind": "regular", "sides": 4, "center": { "x": -0.5, "y": 0 }, "radius": 1 },
            {
                "kind": "polygon",
                "points": [
                    { "x": 0.5, "y": -1 }, { "x": 1.5, "y": 0 },
                    { "x": 0.5, "y": 1 }, { "x": -0.5, "y": 0 }
                ],
                "symmetry_list": [
                    { "linear_transform": { "x_axis": { "x": 1, "y": 0 }, "y_axis": { "x": 0, "y": 1 } },
                      "translation": { "x": 0, "y": 0 } },
                    { "linear_transform": { "x_axis": { "x": -1, "y": 0 }, "y_axis": { "x": 0, "y": -1 } },
                      "translation": { "x": 1, "y": 0 } }
                ]
            }
        ]
    }"#;
    let def: PuzzleDef = serde_json::from_str(json).unwrap();
    assert_eq!(def.name, "square and diamond");
    assert!(matches!(def.cutters[0], CutterDef::Regular { sides: 4, .. }));

    let mut p = def.build(GeomCfg::default()).unwrap();
    assert_eq!(p.cutters().len(), 2);
    assert_eq!(p.cutters()[1].symmetries().len(), 2);
    let area = p.total_area();
    p.apply_cut(1, 1).unwrap();
    assert!((p.total_area() - area).abs() < 1e-9);
    p.apply_cut(1, 1).unwrap();
    assert!(p.is_solved());

    let cutters = def.into_cutters(&GeomCfg::default()).unwrap();
    assert_eq!(cutters.len(), 2);
}

#[test]
fn definition_rejects_unknown_kind() {
    let json = r#"{ "cutters": [ { "kind": "circle", "radius": 1 } ] }"#;
    assert!(serde_json::from_str::<PuzzleDef>(json).is_err());
}

#[test]
fn transform_def_matches_axes() {
    let r = Affine2::rotation(vector![1.0, 2.0], 0.7);
    let d = TransformDef::from(&r);
    let back = Affine2::from(&d);
    assert!(back.approx_eq(&r, 1e-15));
    assert!((d.linear_transform.x_axis.x - 0.7f64.cos()).abs() < 1e-15);
    assert!((d.linear_transform.x_axis.y - 0.7f64.sin()).abs() < 1e-15);
}
