//! The gradient-tracked (per-event, generic) path and the batch (ndarray)
//! path are separate implementations of the same maps. These properties
//! check they agree, and that round trips hold, on random batches.

use std::collections::HashMap;

use ndarray::{Array2, ArrayD, Axis, IxDyn};
use proptest::prelude::*;
use xo_bijectors::transforms::{
    AbsoluteValue, Angle, ImpactParameter, Periodic, QuadLimbDark, RadiusImpact, UnitVector,
    unit_disk,
};
use xo_bijectors::{NoPoint, Point, Transform, VarId};

fn batch2(pairs: &[(f64, f64)]) -> ArrayD<f64> {
    let flat: Vec<f64> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
    Array2::from_shape_vec((pairs.len(), 2), flat).unwrap().into_dyn()
}

fn rows(a: &ArrayD<f64>) -> Vec<Vec<f64>> {
    a.outer_iter().map(|r| r.iter().copied().collect()).collect()
}

/// Batch `backward_numeric` equals per-event `backward` on every row.
fn backward_agrees<T: Transform, P: Point<f64>>(t: &T, y: &ArrayD<f64>, point: &P, tol: f64) {
    let x = t.backward_numeric(y.view(), point).unwrap();
    for (ev, got) in rows(y).iter().zip(x.outer_iter()) {
        let want = t.backward(ev, point).unwrap();
        for (g, w) in got.iter().zip(&want) {
            assert!((g - w).abs() <= tol, "{}: {:?} -> {} vs {}", t.name(), ev, g, w);
        }
    }
}

/// Batch `forward_numeric` equals per-event `forward` on every row.
fn forward_agrees<T: Transform, P: Point<f64>>(t: &T, x: &ArrayD<f64>, point: &P, tol: f64) {
    let y = t.forward_numeric(x.view(), point).unwrap();
    for (ev, got) in rows(x).iter().zip(y.outer_iter()) {
        let want = t.forward(ev, point).unwrap();
        for (g, w) in got.iter().zip(&want) {
            assert!((g - w).abs() <= tol, "{}: {:?} -> {} vs {}", t.name(), ev, g, w);
        }
    }
}

proptest! {
    #[test]
    fn prop_quad_limb_dark_paths_agree_and_invert(
        pairs in proptest::collection::vec((-6.0f64..6.0, -6.0f64..6.0), 1..32),
    ) {
        let y = batch2(&pairs);
        backward_agrees(&QuadLimbDark, &y, &NoPoint, 1e-13);
        let x = QuadLimbDark.backward_numeric(y.view(), &NoPoint).unwrap();
        forward_agrees(&QuadLimbDark, &x, &NoPoint, 1e-12);
        let back = QuadLimbDark.forward_numeric(x.view(), &NoPoint).unwrap();
        for (a, b) in back.iter().zip(y.iter()) {
            prop_assert!((a - b).abs() < 1e-7, "{} vs {}", a, b);
        }
    }

    #[test]
    fn prop_radius_impact_paths_agree_and_invert(
        pairs in proptest::collection::vec((-6.0f64..6.0, -6.0f64..6.0), 1..32),
        pl in 0.0f64..0.1,
        width in 0.05f64..0.5,
    ) {
        let t = RadiusImpact::new(pl, pl + width).unwrap();
        let y = batch2(&pairs);
        backward_agrees(&t, &y, &NoPoint, 1e-13);
        let x = t.backward_numeric(y.view(), &NoPoint).unwrap();
        forward_agrees(&t, &x, &NoPoint, 1e-12);
        let back = t.forward_numeric(x.view(), &NoPoint).unwrap();
        for (a, b) in back.iter().zip(y.iter()) {
            prop_assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }

    #[test]
    fn prop_unit_disk_paths_agree_and_invert(
        pairs in proptest::collection::vec((-8.0f64..8.0, -8.0f64..8.0), 1..32),
    ) {
        let t = unit_disk().unwrap();
        let y = batch2(&pairs);
        backward_agrees(&t, &y, &NoPoint, 1e-13);
        let x = t.backward_numeric(y.view(), &NoPoint).unwrap();
        for r in rows(&x) {
            prop_assert!(r[0] * r[0] + r[1] * r[1] < 1.0);
        }
        let back = t.forward_numeric(x.view(), &NoPoint).unwrap();
        for (a, b) in back.iter().zip(y.iter()) {
            prop_assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }

    #[test]
    fn prop_periodic_recovers_represented_value(
        pairs in proptest::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 1..32),
        lower in -10.0f64..10.0,
        width in 0.1f64..20.0,
    ) {
        prop_assume!(pairs.iter().all(|&(a, b)| a * a + b * b > 1e-6));
        let t = Periodic::new(lower, lower + width).unwrap();
        let y = batch2(&pairs);
        backward_agrees(&t, &y, &NoPoint, 1e-12);
        let x = t.backward_numeric(y.view(), &NoPoint).unwrap();
        // forward(backward(y)) is the unit vector along y, not y itself
        let z = t.forward_numeric(x.view(), &NoPoint).unwrap();
        for (zr, &(a, b)) in rows(&z).iter().zip(&pairs) {
            let r = (a * a + b * b).sqrt();
            prop_assert!((zr[0] - a / r).abs() < 1e-9);
            prop_assert!((zr[1] - b / r).abs() < 1e-9);
        }
        let again = t.backward_numeric(z.view(), &NoPoint).unwrap();
        for (a, b) in again.iter().zip(x.iter()) {
            prop_assert!((a - b).abs() < 1e-9 * width.max(1.0));
        }
    }

    #[test]
    fn prop_angle_forward_agrees(xs in proptest::collection::vec(-3.1f64..3.1, 1..32)) {
        let t = Angle::new();
        let x = ArrayD::from_shape_vec(IxDyn(&[xs.len()]), xs.clone()).unwrap();
        let y = t.forward_numeric(x.view(), &NoPoint).unwrap();
        for (row, &xi) in rows(&y).iter().zip(&xs) {
            let g = t.forward(&[xi], &NoPoint).unwrap();
            prop_assert!((row[0] - g[0]).abs() < 1e-13 && (row[1] - g[1]).abs() < 1e-13);
        }
        let back = t.backward_numeric(y.view(), &NoPoint).unwrap();
        for (a, b) in back.iter().zip(&xs) {
            prop_assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn prop_unit_vector_has_unit_norm(
        dim in prop::sample::select(vec![2usize, 3, 10]),
        seed in proptest::collection::vec(-10.0f64..10.0, 40),
    ) {
        let n_events = seed.len() / dim;
        let data = seed[..n_events * dim].to_vec();
        prop_assume!(data.chunks(dim).all(|c| c.iter().map(|v| v * v).sum::<f64>() > 1e-8));
        let y = Array2::from_shape_vec((n_events, dim), data).unwrap().into_dyn();
        backward_agrees(&UnitVector, &y, &NoPoint, 1e-13);
        let x = UnitVector.backward_numeric(y.view(), &NoPoint).unwrap();
        for lane in x.lanes(Axis(1)) {
            prop_assert!((lane.dot(&lane) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn prop_absolute_value_agrees(ys in proptest::collection::vec(-8.0f64..8.0, 1..32)) {
        let y = ArrayD::from_shape_vec(IxDyn(&[ys.len()]), ys.clone()).unwrap();
        let x = AbsoluteValue.backward_numeric(y.view(), &NoPoint).unwrap();
        for (xi, &yi) in x.iter().zip(&ys) {
            let g = AbsoluteValue.backward(&[yi], &NoPoint).unwrap();
            prop_assert!((xi - g[0]).abs() < 1e-13);
        }
        // backward folds +-y together
        let z = AbsoluteValue.forward_numeric(x.view(), &NoPoint).unwrap();
        for (zi, &yi) in z.iter().zip(&ys) {
            prop_assert!((zi - yi.abs()).abs() < 1e-6, "{} vs {}", zi, yi);
        }
    }

    #[test]
    fn prop_impact_parameter_forward_agrees(
        bs in proptest::collection::vec(0.001f64..0.999, 1..32),
        ror in 0.01f64..0.3,
    ) {
        let t = ImpactParameter::new("ror");
        let point = HashMap::from([(VarId::new("ror"), ror)]);
        let scaled: Vec<f64> = bs.iter().map(|b| b * (1.0 + ror)).collect();
        let x = ArrayD::from_shape_vec(IxDyn(&[bs.len()]), scaled).unwrap();
        let y = t.forward_numeric(x.view(), &point).unwrap();
        for (yi, xi) in y.iter().zip(x.iter()) {
            let g = t.forward(&[*xi], &point).unwrap();
            prop_assert!((yi - g[0]).abs() < 1e-12);
            let back = t.backward(&g, &point).unwrap();
            prop_assert!((back[0] - xi).abs() < 1e-10);
        }
    }
}
