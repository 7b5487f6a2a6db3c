//! Easing curves
//!
//! Each curve maps a normalized time `t` in [0, 1] onto [0, 1] with
//! `f(0) = 0` and `f(1) = 1`. Used by color and vector interpolation.

/// Signature shared by every easing curve
pub type EasingFn = fn(f32) -> f32;

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

#[inline]
pub fn in_quad(t: f32) -> f32 {
    t * t
}

#[inline]
pub fn out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

#[inline]
pub fn in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[inline]
pub fn in_cubic(t: f32) -> f32 {
    t * t * t
}

#[inline]
pub fn out_cubic(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * t + 1.0
}

#[inline]
pub fn in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let t = 2.0 * t - 2.0;
        0.5 * t * t * t + 1.0
    }
}

/// Smoothstep: 3t² - 2t³
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingFn; 8] = [
        linear,
        in_quad,
        out_quad,
        in_out_quad,
        in_cubic,
        out_cubic,
        in_out_cubic,
        smoothstep,
    ];

    #[test]
    fn test_curves_hit_endpoints() {
        for curve in CURVES {
            assert!(curve(0.0).abs() < 1e-6);
            assert!((curve(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for curve in CURVES {
            let mut prev = curve(0.0);
            for i in 1..=100 {
                let v = curve(i as f32 / 100.0);
                assert!(v + 1e-6 >= prev);
                prev = v;
            }
        }
    }

    #[test]
    fn test_in_out_quad_midpoint() {
        assert!((in_out_quad(0.5) - 0.5).abs() < 1e-6);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    }
}
