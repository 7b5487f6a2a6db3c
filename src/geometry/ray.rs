use super::{Circle, Line2D, Vec2};
use crate::easing::EasingFn;

/// Moving point: `origin + velocity * t`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ray2D {
    pub origin: Vec2,
    pub velocity: Vec2,
}

impl Ray2D {
    pub const fn new(origin: Vec2, velocity: Vec2) -> Self {
        Self { origin, velocity }
    }

    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.velocity * t
    }

    /// Segment from the origin to the eased position at time `t`
    pub fn segment_for_time(&self, t: f32, ease: EasingFn) -> Line2D {
        Line2D::new(self.origin, self.point_at(ease(t)))
    }

    /// Both parametric roots `(t0, t1)` with `t0 <= t1` where the ray meets the
    /// circle, or None when it misses or has no velocity.
    pub fn intersect_circle(&self, circle: &Circle) -> Option<(f32, f32)> {
        let a = self.velocity.mag2();
        if a <= f32::EPSILON {
            return None;
        }
        let to_origin = self.origin - circle.center;
        let b = 2.0 * self.velocity.dot(&to_origin);
        let c = to_origin.mag2() - circle.radius * circle.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        Some(((-b - root) / (2.0 * a), (-b + root) / (2.0 * a)))
    }
}
