use super::is_equal;
use crate::easing::EasingFn;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector in screen space (+x right, +y down)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z of the 3D cross)
    #[inline]
    pub fn cross(&self, other: &Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn mag2(&self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn mag(&self) -> f32 {
        self.mag2().sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*other - *self).mag()
    }

    /// Unit vector, or zero for a zero-length vector
    pub fn unit(&self) -> Self {
        let mag = self.mag();
        if mag > f32::EPSILON {
            *self / mag
        } else {
            Self::ZERO
        }
    }

    pub fn normalize(&mut self) -> &mut Self {
        *self = self.unit();
        self
    }

    pub fn project_onto(&self, other: &Self) -> Self {
        let unit = other.unit();
        unit * self.dot(&unit)
    }

    /// Unsigned angle in radians
    pub fn angle_between(&self, other: &Self) -> f32 {
        let denom = self.mag() * other.mag();
        if denom <= f32::EPSILON {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Reflect against a unit normal
    pub fn reflect(&self, normal: &Self) -> Self {
        *self - *normal * (2.0 * self.dot(normal))
    }

    /// Rotate in place by `angle` radians around `around`
    pub fn rotate(&mut self, angle: f32, around: Self) {
        *self = self.rotated(angle, around);
    }

    pub fn rotated(&self, angle: f32, around: Self) -> Self {
        let (sin, cos) = angle.sin_cos();
        let d = *self - around;
        Self::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + around
    }

    pub fn clockwise_perpendicular(&self) -> Self {
        Self::new(-self.y, self.x).unit()
    }

    pub fn counter_clockwise_perpendicular(&self) -> Self {
        Self::new(self.y, -self.x).unit()
    }

    pub fn lerp(v1: &Self, v2: &Self, t: f32, ease: EasingFn) -> Self {
        let t = ease(t.clamp(0.0, 1.0));
        *v1 + (*v2 - *v1) * t
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        is_equal(self.x, other.x) && is_equal(self.y, other.y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, scale: f32) -> Self {
        debug_assert!(scale.abs() > f32::EPSILON, "Vec2 divided by zero");
        Self::new(self.x / scale, self.y / scale)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl MulAssign<f32> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, scale: f32) {
        *self = *self * scale;
    }
}

impl DivAssign<f32> for Vec2 {
    #[inline]
    fn div_assign(&mut self, scale: f32) {
        *self = *self / scale;
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from(p: (f32, f32)) -> Self {
        Self::new(p.0, p.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotate_quarter_turn_about_point() {
        let p = Vec2::new(2.0, 1.0).rotated(FRAC_PI_2, Vec2::new(1.0, 1.0));
        assert!(p.approx_eq(&Vec2::new(1.0, 2.0), 1e-5));
    }

    #[test]
    fn test_projection_and_angle() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.project_onto(&Vec2::new(10.0, 0.0)), Vec2::new(3.0, 0.0));
        assert!((Vec2::new(1.0, 0.0).angle_between(&Vec2::new(-1.0, 0.0)) - PI).abs() < 1e-5);
        assert_eq!(v.mag(), 5.0);
    }

    #[test]
    fn test_reflect_off_floor() {
        let v = Vec2::new(1.0, 1.0).reflect(&Vec2::new(0.0, -1.0));
        assert_eq!(v, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_perpendiculars_are_unit_and_orthogonal() {
        let v = Vec2::new(5.0, 0.0);
        let cw = v.clockwise_perpendicular();
        let ccw = v.counter_clockwise_perpendicular();
        assert_eq!(cw, Vec2::new(0.0, 1.0));
        assert_eq!(ccw, Vec2::new(0.0, -1.0));
        assert!(cw.dot(&v).abs() < 1e-6);
    }

    #[test]
    fn test_unit_of_zero_is_zero() {
        assert_eq!(Vec2::ZERO.unit(), Vec2::ZERO);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec2::new(-3.0, 8.0);
        let b = Vec2::new(5.0, 2.0);
        assert_eq!(Vec2::lerp(&a, &b, 0.0, easing::linear), a);
        assert_eq!(Vec2::lerp(&a, &b, 1.0, easing::out_cubic), b);
    }
}
