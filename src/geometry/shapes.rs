//! Closed shapes sharing the [`Shape`] contract

use super::{is_equal, Vec2};
use std::f32::consts::TAU;

/// Common operations over closed shapes
pub trait Shape {
    /// Outline vertices in drawing order
    fn points(&self) -> Vec<Vec2>;
    fn center(&self) -> Vec2;
    fn move_by(&mut self, delta: Vec2);

    fn move_to(&mut self, position: Vec2) {
        let delta = position - self.center();
        self.move_by(delta);
    }
}

// ============================================================================
// Axis-aligned rectangle
// ============================================================================

/// Axis-aligned rectangle with inclusive pixel corners:
/// a 10x10 rectangle at the origin spans (0,0)..=(9,9).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AARect {
    top_left: Vec2,
    bottom_right: Vec2,
}

impl AARect {
    pub fn new(top_left: Vec2, width: u32, height: u32) -> Self {
        Self {
            top_left,
            bottom_right: Vec2::new(
                top_left.x + width as f32 - 1.0,
                top_left.y + height as f32 - 1.0,
            ),
        }
    }

    pub const fn from_corners(top_left: Vec2, bottom_right: Vec2) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.top_left
    }

    #[inline]
    pub fn bottom_right(&self) -> Vec2 {
        self.bottom_right
    }

    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.top_left.x + 1.0
    }

    pub fn height(&self) -> f32 {
        self.bottom_right.y - self.top_left.y + 1.0
    }

    pub fn intersects(&self, other: &Self) -> bool {
        !(other.bottom_right.x < self.top_left.x
            || other.top_left.x > self.bottom_right.x
            || other.bottom_right.y < self.top_left.y
            || other.top_left.y > self.bottom_right.y)
    }

    pub fn contains_point(&self, p: &Vec2) -> bool {
        p.x >= self.top_left.x
            && p.x <= self.bottom_right.x
            && p.y >= self.top_left.y
            && p.y <= self.bottom_right.y
    }

    /// Shrink by `insets` on every side
    pub fn inset(&self, insets: Vec2) -> Self {
        Self::from_corners(self.top_left + insets, self.bottom_right - insets)
    }

    /// Corners of the covered pixel area (right and bottom edges exclusive),
    /// used as the polygon for scanline fills.
    pub fn fill_points(&self) -> Vec<Vec2> {
        let right = self.bottom_right.x + 1.0;
        let bottom = self.bottom_right.y + 1.0;
        vec![
            self.top_left,
            Vec2::new(right, self.top_left.y),
            Vec2::new(right, bottom),
            Vec2::new(self.top_left.x, bottom),
        ]
    }
}

impl Shape for AARect {
    fn points(&self) -> Vec<Vec2> {
        vec![
            self.top_left,
            Vec2::new(self.bottom_right.x, self.top_left.y),
            self.bottom_right,
            Vec2::new(self.top_left.x, self.bottom_right.y),
        ]
    }

    fn center(&self) -> Vec2 {
        Vec2::new(
            self.top_left.x + self.width() / 2.0,
            self.top_left.y + self.height() / 2.0,
        )
    }

    fn move_by(&mut self, delta: Vec2) {
        self.top_left += delta;
        self.bottom_right += delta;
    }

    fn move_to(&mut self, position: Vec2) {
        let (w, h) = (self.width(), self.height());
        self.top_left = position;
        self.bottom_right = Vec2::new(position.x + w - 1.0, position.y + h - 1.0);
    }
}

// ============================================================================
// Circle
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    /// Outline segment count used when a circle is rasterized
    pub const SEGMENTS: usize = 30;

    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.center.distance(&other.center) < self.radius + other.radius
    }

    pub fn contains_point(&self, p: &Vec2) -> bool {
        let d = self.center.distance(p);
        d < self.radius || is_equal(d, self.radius)
    }
}

impl Shape for Circle {
    /// Polygon approximation with [`Circle::SEGMENTS`] vertices
    fn points(&self) -> Vec<Vec2> {
        let step = TAU / Self::SEGMENTS as f32;
        let start = Vec2::new(self.center.x + self.radius, self.center.y);
        (1..=Self::SEGMENTS)
            .map(|i| start.rotated(step * i as f32, self.center))
            .collect()
    }

    fn center(&self) -> Vec2 {
        self.center
    }

    fn move_by(&mut self, delta: Vec2) {
        self.center += delta;
    }
}

// ============================================================================
// Triangle
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triangle {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Triangle {
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn area(&self) -> f32 {
        area_of(&self.p0, &self.p1, &self.p2)
    }

    /// Sub-triangle areas must add up to the whole
    pub fn contains_point(&self, p: &Vec2) -> bool {
        let a1 = area_of(p, &self.p1, &self.p2);
        let a2 = area_of(&self.p0, p, &self.p2);
        let a3 = area_of(&self.p0, &self.p1, p);
        (a1 + a2 + a3 - self.area()).abs() < 0.01
    }
}

fn area_of(a: &Vec2, b: &Vec2, c: &Vec2) -> f32 {
    ((*b - *a).cross(&(*c - *a)) * 0.5).abs()
}

impl Shape for Triangle {
    fn points(&self) -> Vec<Vec2> {
        vec![self.p0, self.p1, self.p2]
    }

    /// Centroid
    fn center(&self) -> Vec2 {
        (self.p0 + self.p1 + self.p2) / 3.0
    }

    fn move_by(&mut self, delta: Vec2) {
        self.p0 += delta;
        self.p1 += delta;
        self.p2 += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions_are_inclusive() {
        let rect = AARect::new(Vec2::ZERO, 10, 10);
        assert_eq!(rect.bottom_right(), Vec2::new(9.0, 9.0));
        assert_eq!(rect.width(), 10.0);
        assert_eq!(rect.center(), Vec2::new(5.0, 5.0));
        assert_eq!(rect.fill_points()[2], Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_rect_intersection_and_containment() {
        let a = AARect::new(Vec2::ZERO, 10, 10);
        let b = AARect::new(Vec2::new(9.0, 9.0), 5, 5);
        let c = AARect::new(Vec2::new(10.0, 0.0), 5, 5);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains_point(&Vec2::new(9.0, 0.0)));
        assert!(!a.contains_point(&Vec2::new(9.5, 0.0)));
    }

    #[test]
    fn test_rect_move_to_keeps_size() {
        let mut rect = AARect::new(Vec2::ZERO, 4, 6);
        rect.move_to(Vec2::new(10.0, 20.0));
        assert_eq!(rect.top_left(), Vec2::new(10.0, 20.0));
        assert_eq!(rect.height(), 6.0);
        let inset = rect.inset(Vec2::new(1.0, 1.0));
        assert_eq!(inset.width(), 2.0);
    }

    #[test]
    fn test_circle_points_lie_on_radius() {
        let circle = Circle::new(Vec2::new(5.0, 5.0), 3.0);
        let points = circle.points();
        assert_eq!(points.len(), Circle::SEGMENTS);
        for p in points {
            assert!((p.distance(&circle.center) - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_circle_intersects() {
        let a = Circle::new(Vec2::ZERO, 2.0);
        assert!(a.intersects(&Circle::new(Vec2::new(3.0, 0.0), 1.5)));
        assert!(!a.intersects(&Circle::new(Vec2::new(3.0, 0.0), 0.5)));
        assert!(a.contains_point(&Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_triangle_contains_and_centroid() {
        let mut tri = Triangle::new(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(0.0, 6.0));
        assert!(tri.contains_point(&Vec2::new(1.0, 1.0)));
        assert!(!tri.contains_point(&Vec2::new(5.0, 5.0)));
        assert_eq!(tri.center(), Vec2::new(2.0, 2.0));
        tri.move_to(Vec2::new(12.0, 2.0));
        assert_eq!(tri.p0, Vec2::new(10.0, 0.0));
    }
}
