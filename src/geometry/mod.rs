//! Geometry primitives: vectors, segments, rays and closed shapes

mod line;
mod ray;
mod shapes;
mod vec2;

pub use line::Line2D;
pub use ray::Ray2D;
pub use shapes::{AARect, Circle, Shape, Triangle};
pub use vec2::Vec2;

/// Tolerance used for float comparisons
pub const EPSILON: f32 = 0.0001;

#[inline]
pub fn is_equal(x: f32, y: f32) -> bool {
    (x - y).abs() < EPSILON
}

#[inline]
pub fn is_greater_or_equal(x: f32, y: f32) -> bool {
    x > y || is_equal(x, y)
}

#[inline]
pub fn is_less_or_equal(x: f32, y: f32) -> bool {
    x < y || is_equal(x, y)
}

#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Check if a point is inside a polygon using ray casting
pub fn point_in_polygon(p: Vec2, vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);

        // Skip horizontal edges (avoid division by zero)
        let dy = vj.y - vi.y;
        if dy.abs() > f32::EPSILON && ((vi.y > p.y) != (vj.y > p.y)) {
            let x_intersect = (vj.x - vi.x) * (p.y - vi.y) / dy + vi.x;
            if p.x < x_intersect {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Axis-aligned bounds of a point set as (min, max), None when empty
pub fn bounds(points: &[Vec2]) -> Option<(Vec2, Vec2)> {
    let first = *points.first()?;
    Some(points.iter().skip(1).fold((first, first), |(lo, hi), p| {
        (
            Vec2::new(lo.x.min(p.x), lo.y.min(p.y)),
            Vec2::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_helpers() {
        assert!(is_equal(1.0, 1.00005));
        assert!(!is_equal(1.0, 1.001));
        assert!(is_greater_or_equal(2.0, 2.00001));
        assert!(is_less_or_equal(1.0, 3.0));
        assert_eq!(lerp_f32(2.0, 4.0, 0.25), 2.5);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Vec2::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Vec2::new(15.0, 5.0), &square));
        assert!(!point_in_polygon(Vec2::new(5.0, 5.0), &square[..2]));
    }

    #[test]
    fn test_bounds() {
        let pts = [Vec2::new(3.0, -1.0), Vec2::new(-2.0, 4.0), Vec2::new(1.0, 1.0)];
        let (lo, hi) = bounds(&pts).unwrap();
        assert_eq!(lo, Vec2::new(-2.0, -1.0));
        assert_eq!(hi, Vec2::new(3.0, 4.0));
        assert!(bounds(&[]).is_none());
    }
}
