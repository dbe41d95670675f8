use super::*;
use nalgebra::vector;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};

/// One representative per matrix state, exercised by the pair-dispatch tests.
fn state_reps() -> [Affine2; 8] {
    let reps = [
        Affine2::identity(),
        Affine2::from_translate(3.0, -2.0),
        Affine2::from_scale(2.0, 0.5),
        Affine2::new(2.0, 0.0, 0.0, 0.5, 1.0, 2.0),
        Affine2::new(0.0, 1.5, -0.5, 0.0, 0.0, 0.0),
        Affine2::new(0.0, 1.5, -0.5, 0.0, 3.0, 1.0),
        Affine2::new(2.0, 1.0, -1.0, 0.5, 0.0, 0.0),
        Affine2::new(2.0, 1.0, -1.0, 0.5, 3.0, -1.0),
    ];
    let want = [
        MatrixState::Identity,
        MatrixState::Translate,
        MatrixState::Scale,
        MatrixState::ScaleTranslate,
        MatrixState::Shear,
        MatrixState::ShearTranslate,
        MatrixState::ShearScale,
        MatrixState::General,
    ];
    for (a, w) in reps.iter().zip(want) {
        assert_eq!(a.state(), w, "representative has wrong state");
    }
    reps
}

fn assert_invariants(a: &Affine2) {
    assert_eq!(a.state(), a.recomputed_state(), "state out of sync: {a:?}");
    assert_eq!(a.class(), a.classify(), "cached class disagrees: {a:?}");
}

#[test]
fn identity_basics() {
    let a = Affine2::identity();
    assert!(a.is_identity());
    assert_eq!(a.determinant(), 1.0);
    assert_eq!(a.apply(vector![3.0, 4.0]), vector![3.0, 4.0]);
    assert!(a.class().is_identity());
}

#[test]
fn factories_classify_correctly() {
    assert_eq!(
        Affine2::from_translate(1.0, 0.0).class(),
        Class::TRANSLATION
    );
    assert!(Affine2::from_scale(2.0, 2.0)
        .class()
        .contains(Class::UNIFORM_SCALE));
    assert!(Affine2::from_scale(2.0, 3.0)
        .class()
        .contains(Class::GENERAL_SCALE));
    assert!(Affine2::from_scale(-1.0, 1.0).class().contains(Class::FLIP));
    assert!(Affine2::from_rotation(0.3)
        .class()
        .contains(Class::GENERAL_ROTATION));
    assert!(Affine2::from_quadrant_rotation(1)
        .class()
        .contains(Class::QUADRANT_ROTATION));
}

#[test]
fn quadrant_rotation_is_exact() {
    for theta in [FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
        let mut a = Affine2::identity();
        a.rotate(theta);
        assert_invariants(&a);
        let cls = a.class();
        assert!(
            cls.contains(Class::QUADRANT_ROTATION),
            "rotate({theta}) classified {cls:?}"
        );
        assert!(
            !cls.contains(Class::GENERAL_ROTATION),
            "rotate({theta}) left trig residue: {:?}",
            a.matrix()
        );
        for v in a.matrix() {
            assert!(
                v == 0.0 || v == 1.0 || v == -1.0,
                "rotate({theta}) entry {v} not in {{-1, 0, 1}}"
            );
        }
    }
}

#[test]
fn quadrant_rotate_composes_to_identity() {
    let mut a = Affine2::identity();
    for _ in 0..4 {
        a.quadrant_rotate(1);
        assert_invariants(&a);
    }
    assert!(a.is_identity());

    let mut b = Affine2::from_quadrant_rotation(3);
    b.quadrant_rotate(1);
    assert_eq!(b, Affine2::from_quadrant_rotation(0));
}

#[test]
fn rotation_about_anchor_fixes_anchor() {
    let anchor = vector![2.0, -1.0];
    let a = Affine2::from_rotation_about(0.7, anchor);
    assert!((a.apply(anchor) - anchor).norm() < 1e-12);
    let mut b = Affine2::identity();
    b.rotate_about(0.7, anchor);
    assert!((b.apply(anchor) - anchor).norm() < 1e-12);
    assert_invariants(&b);
}

#[test]
fn rotation_vector_matches_angle() {
    let a = Affine2::from_rotation_vector(3.0, 4.0);
    let b = Affine2::from_rotation((4.0f64).atan2(3.0));
    let p = vector![1.0, 2.0];
    assert!((a.apply(p) - b.apply(p)).norm() < 1e-12);
    // Axis-aligned vectors take the exact quadrant path.
    assert_eq!(
        Affine2::from_rotation_vector(0.0, 5.0),
        Affine2::from_quadrant_rotation(1)
    );
    assert_eq!(
        Affine2::from_rotation_vector(-2.0, 0.0),
        Affine2::from_quadrant_rotation(2)
    );
}

#[test]
fn composition_associativity_over_all_state_pairs() {
    let reps = state_reps();
    let pts = [
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![-2.5, 3.5],
        vector![10.0, -7.0],
    ];
    for a in &reps {
        for b in &reps {
            // concatenate agrees with the matrix product applied to points.
            let mut ab = *a;
            ab.concatenate(b);
            assert_invariants(&ab);
            for p in pts {
                let want = a.apply(b.apply(p));
                let got = ab.apply(p);
                assert!(
                    (got - want).norm() < 1e-9,
                    "concat mismatch for states {:?}∘{:?}",
                    a.state(),
                    b.state()
                );
            }
            // pre_concatenate is the mirrored composition.
            let mut ba = *b;
            ba.pre_concatenate(a);
            assert_invariants(&ba);
            for p in pts {
                assert!((ba.apply(p) - ab.apply(p)).norm() < 1e-9);
            }
            for c in &reps {
                let mut ab_c = ab;
                ab_c.concatenate(c);
                let mut bc = *b;
                bc.concatenate(c);
                let mut a_bc = *a;
                a_bc.concatenate(&bc);
                for p in pts {
                    let lhs = ab_c.apply(p);
                    let rhs = a_bc.apply(p);
                    assert!(
                        (lhs - rhs).norm() < 1e-9,
                        "associativity broke for {:?}, {:?}, {:?}",
                        a.state(),
                        b.state(),
                        c.state()
                    );
                }
            }
        }
    }
}

#[test]
fn state_stays_exact_under_random_mutation() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let mut a = Affine2::identity();
        for _ in 0..12 {
            match rng.gen_range(0..7) {
                0 => a.translate(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)),
                1 => a.scale(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)),
                2 => a.shear(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
                3 => a.rotate(rng.gen_range(-4.0..4.0)),
                4 => a.quadrant_rotate(rng.gen_range(0..4)),
                5 => a.concatenate(&Affine2::from_scale(2.0, 2.0)),
                _ => a.pre_concatenate(&Affine2::from_translate(1.0, 1.0)),
            }
            assert_invariants(&a);
        }
    }
}

#[test]
fn translate_back_and_forth_restores_state() {
    let mut a = Affine2::from_translate(5.0, -3.0);
    a.translate(-5.0, 3.0);
    assert!(a.is_identity());
    assert_invariants(&a);

    let mut b = Affine2::from_scale(2.0, 2.0);
    b.translate(1.0, 1.0);
    assert_eq!(b.state(), MatrixState::ScaleTranslate);
    b.translate(-1.0, -1.0);
    assert_eq!(b.state(), MatrixState::Scale);
    assert_invariants(&b);
}

#[test]
fn scale_to_unity_collapses_state() {
    let mut a = Affine2::from_scale(2.0, 4.0);
    a.scale(0.5, 0.25);
    assert!(a.is_identity());
    assert_invariants(&a);
}

#[test]
fn determinant_per_state() {
    assert_eq!(Affine2::identity().determinant(), 1.0);
    assert_eq!(Affine2::from_translate(9.0, 9.0).determinant(), 1.0);
    assert_eq!(Affine2::from_scale(2.0, 3.0).determinant(), 6.0);
    let sh = Affine2::new(0.0, 2.0, 3.0, 0.0, 0.0, 0.0);
    assert_eq!(sh.determinant(), -6.0);
    let g = Affine2::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    assert_eq!(g.determinant(), 1.0 * 4.0 - 3.0 * 2.0);
}

#[test]
fn inverse_round_trip_well_conditioned() {
    let mut rng = StdRng::seed_from_u64(21);
    for rep in state_reps() {
        let inv = rep.inverse().expect("representatives are invertible");
        for _ in 0..50 {
            let p = vector![rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)];
            let q = inv.apply(rep.apply(p));
            assert!(
                (q - p).norm() <= 1e-9 * (1.0 + p.norm()),
                "round trip failed for state {:?}",
                rep.state()
            );
        }
    }
}

#[test]
fn invert_in_place_matches_inverse() {
    let a = Affine2::new(2.0, 1.0, -1.0, 0.5, 3.0, -1.0);
    let mut b = a;
    b.invert().unwrap();
    assert_eq!(b, a.inverse().unwrap());
    let mut c = a;
    c.concatenate(&b);
    let p = vector![4.0, 5.0];
    assert!((c.apply(p) - p).norm() < 1e-12);
}

#[test]
fn noninvertible_transforms_are_reported() {
    // Collapsed general matrix.
    let a = Affine2::new(1.0, 2.0, 2.0, 4.0, 0.0, 1.0);
    let err = a.inverse().unwrap_err();
    assert_eq!(err.det, 0.0);
    // Pure scale with a dead axis fails on the zero component.
    let s = Affine2::from_scale(0.0, 2.0);
    assert!(s.inverse().is_err());
    assert!(s.inverse_apply(vector![1.0, 1.0]).is_err());
    // Shear with a zero component.
    let sh = Affine2::new(0.0, 0.0, 3.0, 0.0, 0.0, 0.0);
    assert!(sh.inverse().is_err());
}

#[test]
fn inverse_apply_matches_inverse() {
    let mut rng = StdRng::seed_from_u64(33);
    for rep in state_reps() {
        let inv = rep.inverse().unwrap();
        for _ in 0..20 {
            let p = vector![rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)];
            let a = rep.inverse_apply(p).unwrap();
            let b = inv.apply(p);
            assert!((a - b).norm() < 1e-9);
        }
    }
}

#[test]
fn aliased_transform_matches_fresh_copy() {
    let a = Affine2::new(2.0, 1.0, -1.0, 0.5, 3.0, -1.0);
    let base: Vec<f64> = (0..20).map(|i| i as f64 * 0.37 - 3.0).collect();

    // Reference: transform a disjoint copy.
    let mut want = vec![0.0; 20];
    a.transform_coords(&base[0..16], &mut want[..16], 8);

    // Overlapping: destination two scalars ahead of the source.
    let mut buf = base.clone();
    a.transform_coords_within(&mut buf, 0, 2, 8);
    for i in 0..16 {
        assert_eq!(buf[2 + i], want[i], "aliased overwrite at {i}");
    }

    // Equal offsets transform in place.
    let mut buf2 = base.clone();
    a.transform_coords_within(&mut buf2, 0, 0, 8);
    for i in 0..16 {
        assert_eq!(buf2[i], want[i]);
    }

    // Destination behind the source is safe without the copy.
    let mut buf3 = base.clone();
    a.transform_coords_within(&mut buf3, 4, 0, 8);
    let mut want3 = vec![0.0; 16];
    a.transform_coords(&base[4..20], &mut want3, 8);
    for i in 0..16 {
        assert_eq!(buf3[i], want3[i]);
    }
}

#[test]
fn apply_vector_ignores_translation() {
    let a = Affine2::new(2.0, 0.5, -0.5, 1.5, 100.0, -100.0);
    let v = vector![1.0, 1.0];
    assert_eq!(a.apply_vector(v), vector![2.0 - 0.5, 0.5 + 1.5]);
    assert_eq!(Affine2::from_translate(9.0, 9.0).apply_vector(v), v);
}

#[test]
fn transform_points_matches_apply() {
    let a = Affine2::from_rotation(1.1);
    let mut pts = [vector![1.0, 0.0], vector![0.0, 1.0], vector![2.0, 2.0]];
    let want: Vec<_> = pts.iter().map(|&p| a.apply(p)).collect();
    a.transform_points(&mut pts);
    for (got, want) in pts.iter().zip(want) {
        assert_eq!(*got, want);
    }
}

#[test]
fn set_matrix_recomputes_state() {
    let mut a = Affine2::from_rotation(0.5);
    a.set_matrix(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    assert!(a.is_identity());
    a.set_matrix(1.0, 0.0, 0.0, 1.0, 2.0, 0.0);
    assert_eq!(a.state(), MatrixState::Translate);
    assert_eq!(a.class(), Class::TRANSLATION);
}

#[test]
fn shear_of_identity_has_shear_and_scale_state() {
    let mut a = Affine2::identity();
    a.shear(1.5, 0.0);
    assert_eq!(a.state(), MatrixState::ShearScale);
    assert_invariants(&a);
}

proptest! {
    // Inverse round-trip over random matrices; the tolerance follows the
    // conditioning of the matrix so near-singular draws do not produce
    // spurious failures.
    #[test]
    fn prop_inverse_round_trip(
        m00 in -3.0f64..3.0,
        m10 in -3.0f64..3.0,
        m01 in -3.0f64..3.0,
        m11 in -3.0f64..3.0,
        m02 in -10.0f64..10.0,
        m12 in -10.0f64..10.0,
        px in -100.0f64..100.0,
        py in -100.0f64..100.0,
    ) {
        let a = Affine2::new(m00, m10, m01, m11, m02, m12);
        prop_assume!(a.determinant().abs() > 1e-6);
        let inv = a.inverse().unwrap();
        let p = vector![px, py];
        let q = inv.apply(a.apply(p));
        let cond = 1.0_f64.max(
            (m00.abs() + m01.abs() + m11.abs() + m10.abs()).powi(2) / a.determinant().abs(),
        );
        let tol = (1.0 + p.norm()) * (1e-9_f64).max(64.0 * f64::EPSILON * cond);
        prop_assert!((q - p).norm() <= tol, "|q - p| = {}", (q - p).norm());
    }

    #[test]
    fn prop_concat_matches_pointwise(
        sx in 0.1f64..3.0,
        sy in 0.1f64..3.0,
        theta in -6.3f64..6.3,
        tx in -5.0f64..5.0,
        ty in -5.0f64..5.0,
        px in -20.0f64..20.0,
        py in -20.0f64..20.0,
    ) {
        let mut a = Affine2::from_scale(sx, sy);
        a.rotate(theta);
        a.translate(tx, ty);
        let mut b = Affine2::from_rotation(theta);
        b.pre_concatenate(&Affine2::from_scale(sx, sy));
        b.concatenate(&Affine2::from_translate(tx, ty));
        let p = vector![px, py];
        prop_assert!((a.apply(p) - b.apply(p)).norm() < 1e-9 * (1.0 + p.norm()));
    }
}
