// Host-side tests for the scalar shaping helpers.

use face_core::easing::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn clamp_limits_both_sides() {
    assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
    assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    // Inverted limits do not panic; the upper limit wins
    assert_eq!(clamp(0.5, 1.0, 0.0), 0.0);
}

#[test]
fn smoothstep_matches_glsl() {
    assert_eq!(smoothstep(0.0, 1.0, -3.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 4.0), 1.0);
    assert!(close(smoothstep(0.0, 1.0, 0.5), 0.5));
    assert!(close(smoothstep(0.0, 1.0, 0.25), 0.15625));
    // Edges are normalized before shaping
    assert!(close(smoothstep(10.0, 20.0, 15.0), 0.5));
    assert!(close(smoothstep(10.0, 20.0, 12.5), 0.15625));
}

#[test]
fn smoothstep_is_monotonic_between_edges() {
    let mut prev = smoothstep(2.0, 6.0, 2.0);
    for i in 1..=100 {
        let x = 2.0 + 4.0 * i as f64 / 100.0;
        let y = smoothstep(2.0, 6.0, x);
        assert!(y >= prev, "smoothstep decreased at x={x}");
        prev = y;
    }
}

#[test]
fn easing_curves_hit_endpoints() {
    let curves: [(&str, fn(f64) -> f64); 5] = [
        ("in_out_cubic", ease_in_out_cubic),
        ("out_expo", ease_out_expo),
        ("in_out_expo", ease_in_out_expo),
        ("out_circ", ease_out_circ),
        ("out_quint", ease_out_quint),
    ];
    for (name, f) in curves {
        assert!(f(0.0).abs() < 1e-3, "{name}(0) = {}", f(0.0));
        assert!(close(f(1.0), 1.0), "{name}(1) = {}", f(1.0));
    }
}

#[test]
fn symmetric_easings_pass_through_half() {
    assert!(close(ease_in_out_cubic(0.5), 0.5));
    assert!(close(ease_in_out_expo(0.5), 0.5));
}

#[test]
fn blink_curve_closes_at_midpoint_and_reopens() {
    assert!(close(blink_curve(0.0), 1.0));
    assert!(close(blink_curve(0.5), 0.0));
    assert!(close(blink_curve(1.0), 1.0));
}

#[test]
fn blink_curve_is_symmetric_and_saturated() {
    for i in 0..=50 {
        let u = i as f64 / 100.0;
        assert!(close(blink_curve(u), blink_curve(1.0 - u)), "asymmetric at u={u}");
        let v = blink_curve(u);
        assert!((0.0..=1.0 + 1e-12).contains(&v));
    }
    assert!(close(blink_curve(1.7), 1.0));
    assert!(close(blink_curve(-0.3), 1.0));
}
