use approx::assert_abs_diff_eq;
use vizij_curve_core::{bake, AnimationCurve, Keyframe};

#[test]
fn empty_curve_evaluates_to_zero() {
    let baked = bake(&[]);
    for t in [-1.0, 0.0, 0.5, 1e6] {
        assert_eq!(baked.evaluate(t), 0.0);
    }
}

#[test]
fn single_key_holds_value_everywhere() {
    let baked = bake(&[Keyframe::with_tangents(0.75, -3.5, 10.0, -10.0)]);
    for t in [-100.0, 0.0, 0.75, 0.7500001, 1.0, 1e9] {
        assert_eq!(baked.evaluate(t), -3.5);
    }
}

#[test]
fn queries_outside_range_clamp_to_end_values() {
    let curve = AnimationCurve::new(vec![
        Keyframe::with_tangents(1.0, 5.0, 3.0, 3.0),
        Keyframe::with_tangents(2.0, 7.0, -2.0, -2.0),
        Keyframe::with_tangents(4.0, -1.0, 8.0, 8.0),
    ]);
    let baked = curve.bake();
    for t in [f32::NEG_INFINITY, -50.0, 0.0, 0.999, 1.0] {
        assert_eq!(baked.evaluate(t), 5.0);
    }
    for t in [4.0, 4.001, 100.0, f32::INFINITY] {
        assert_eq!(baked.evaluate(t), -1.0);
    }
}

#[test]
fn ease_in_out_sanity() {
    let baked = AnimationCurve::ease_in_out(0.0, 0.0, 1.0, 1.0).bake();
    assert_eq!(baked.evaluate(0.0), 0.0);
    assert_eq!(baked.evaluate(1.0), 1.0);
    assert_abs_diff_eq!(baked.evaluate(0.5), 0.5, epsilon = 1e-6);
    // Symmetric easing: f(t) + f(1 - t) == 1.
    for i in 1..10 {
        let t = i as f32 / 10.0;
        assert_abs_diff_eq!(
            baked.evaluate(t) + baked.evaluate(1.0 - t),
            1.0,
            epsilon = 1e-5
        );
    }
}

#[test]
fn out_tangent_only_changes_interior() {
    let flat = AnimationCurve::ease_in_out(0.0, 0.0, 1.0, 1.0);
    let mut steep = flat.clone();
    steep.key_mut(0).unwrap().out_tangent = 55.0f32.to_radians().tan();

    let flat = flat.bake();
    let steep = steep.bake();
    assert_eq!(flat.evaluate(0.0), steep.evaluate(0.0));
    assert_eq!(flat.evaluate(1.0), steep.evaluate(1.0));
    let eps = 0.01;
    assert!(steep.evaluate(eps) > flat.evaluate(eps) + 1e-3);
}

#[test]
fn tangents_scale_with_segment_duration() {
    // The same slope over a stretched segment must keep the line straight.
    let baked = AnimationCurve::linear(0.0, 0.0, 10.0, 5.0).bake();
    for i in 0..=20 {
        let t = i as f32 * 0.5;
        assert_abs_diff_eq!(baked.evaluate(t), 0.5 * t, epsilon = 1e-4);
    }
}

#[test]
fn duplicate_time_keys_do_not_fail() {
    let keys = vec![
        Keyframe::new(0.0, 0.0),
        Keyframe::new(0.5, 2.0),
        Keyframe::new(0.5, 3.0),
        Keyframe::new(1.0, 1.0),
    ];
    let baked = bake(&keys);
    let at = baked.evaluate(0.5);
    assert!(at == 2.0 || at == 3.0, "got {at}");
    for i in 0..=100 {
        assert!(baked.evaluate(i as f32 / 100.0).is_finite());
    }
}

#[test]
fn all_keys_at_one_time_do_not_fail() {
    let baked = bake(&[Keyframe::new(1.0, 4.0), Keyframe::new(1.0, 6.0)]);
    assert_eq!(baked.evaluate(0.0), 4.0);
    assert_eq!(baked.evaluate(2.0), 6.0);
    let at = baked.evaluate(1.0);
    assert!(at == 4.0 || at == 6.0);
}

#[test]
fn evaluation_is_idempotent() {
    let curve = AnimationCurve::new(vec![
        Keyframe::with_tangents(0.0, 0.3, 0.0, 4.0),
        Keyframe::with_tangents(0.4, 0.9, -1.0, 2.0),
        Keyframe::with_tangents(1.0, 0.1, 0.5, 0.0),
    ]);
    let baked = curve.bake();
    for i in 0..50 {
        let t = i as f32 / 49.0;
        let first = baked.evaluate(t);
        for _ in 0..10 {
            assert_eq!(baked.evaluate(t).to_bits(), first.to_bits());
        }
    }
}

#[test]
fn bake_is_a_snapshot() {
    let mut curve = AnimationCurve::ease_in_out(0.0, 0.0, 1.0, 1.0);
    let baked = curve.bake();
    let before = baked.evaluate(0.5);

    curve.key_mut(1).unwrap().value = 100.0;
    curve.add_key(Keyframe::new(0.5, -20.0));

    assert_eq!(baked.len(), 2);
    assert_eq!(baked.evaluate(0.5), before);
    assert_eq!(baked.evaluate(1.0), 1.0);
    assert_ne!(curve.bake().evaluate(0.5), before);
}

#[test]
fn segment_boundaries_are_continuous() {
    let curve = AnimationCurve::new(vec![
        Keyframe::with_tangents(0.0, 0.0, 0.0, 2.0),
        Keyframe::with_tangents(0.3, 1.0, -3.0, 5.0),
        Keyframe::with_tangents(0.7, -0.5, 1.0, 1.0),
        Keyframe::with_tangents(1.0, 0.25, 0.0, 0.0),
    ]);
    let baked = curve.bake();
    for key in &curve.keys()[1..3] {
        let eps = 1e-4;
        assert_abs_diff_eq!(baked.evaluate(key.time), key.value, epsilon = 1e-6);
        assert_abs_diff_eq!(baked.evaluate(key.time - eps), key.value, epsilon = 1e-2);
        assert_abs_diff_eq!(baked.evaluate(key.time + eps), key.value, epsilon = 1e-2);
    }
}

#[test]
fn analytic_derivative_matches_finite_difference() {
    let curve = AnimationCurve::new(vec![
        Keyframe::with_tangents(0.0, 0.0, 0.0, 1.5),
        Keyframe::with_tangents(2.0, 1.0, -0.5, -0.5),
        Keyframe::with_tangents(3.0, 4.0, 2.0, 0.0),
    ]);
    let baked = curve.bake();
    let h = 1e-3;
    for t in [0.3, 0.9, 1.5, 2.2, 2.8] {
        let (value, slope) = baked.evaluate_with_derivative(t);
        assert_eq!(value, baked.evaluate(t));
        let fd = (baked.evaluate(t + h) - baked.evaluate(t - h)) / (2.0 * h);
        assert_abs_diff_eq!(slope, fd, epsilon = 1e-2);
    }
}
