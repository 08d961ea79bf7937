//! Small scalar shaping helpers.
//!
//! None of these are used by the default blink curve; they are building
//! blocks for alternative curves and UI transitions. Inputs are expected in
//! `[0, 1]` unless stated otherwise.

use std::f64::consts::PI;

/// Constrain `x` to `[lo, hi]`.
///
/// Unlike `f64::clamp` this never panics when `lo > hi`; the upper limit wins.
#[inline]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    let mut v = x;
    if v < lo {
        v = lo;
    }
    if v > hi {
        v = hi;
    }
    v
}

/// GLSL `smoothstep`: cubic Hermite interpolation of `x` between two edges.
///
/// `x` is normalized into `[0, 1]` relative to the edges, saturated, and then
/// shaped with `t * t * (3 - 2t)`.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn ease_in_out_cubic(x: f64) -> f64 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

#[inline]
pub fn ease_out_expo(x: f64) -> f64 {
    if x == 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * x)
    }
}

#[inline]
pub fn ease_in_out_expo(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else if x == 1.0 {
        1.0
    } else if x < 0.5 {
        2f64.powf(20.0 * x - 10.0) / 2.0
    } else {
        (2.0 - 2f64.powf(-20.0 * x + 10.0)) / 2.0
    }
}

#[inline]
pub fn ease_out_circ(x: f64) -> f64 {
    (1.0 - (x - 1.0).powi(2)).sqrt()
}

#[inline]
pub fn ease_out_quint(x: f64) -> f64 {
    1.0 - (1.0 - x).powi(5)
}

/// Half-sine dip used for blinks: 1 at `u = 0`, 0 at `u = 0.5`, back to 1 at
/// `u = 1`. `u` is saturated to `[0, 1]`.
#[inline]
pub fn blink_curve(u: f64) -> f64 {
    let u = clamp(u, 0.0, 1.0);
    1.0 - (u * PI).sin()
}
