use super::{is_equal, Vec2};

/// Line segment between two points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Line2D {
    pub p0: Vec2,
    pub p1: Vec2,
}

impl Line2D {
    pub const fn new(p0: Vec2, p1: Vec2) -> Self {
        Self { p0, p1 }
    }

    pub fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.p0 + self.p1) * 0.5
    }

    /// dy/dx, or None for a vertical segment
    pub fn slope(&self) -> Option<f32> {
        let dx = self.p1.x - self.p0.x;
        if is_equal(dx, 0.0) {
            None
        } else {
            Some((self.p1.y - self.p0.y) / dx)
        }
    }

    pub fn length(&self) -> f32 {
        self.p0.distance(&self.p1)
    }

    /// Closest point on the infinite line, or on the segment when `limit_to_segment`
    pub fn closest_point(&self, p: &Vec2, limit_to_segment: bool) -> Vec2 {
        let dir = self.p1 - self.p0;
        let len2 = dir.mag2();
        if len2 <= f32::EPSILON {
            return self.p0;
        }
        let mut t = (*p - self.p0).dot(&dir) / len2;
        if limit_to_segment {
            t = t.clamp(0.0, 1.0);
        }
        self.p0 + dir * t
    }

    pub fn min_distance_from(&self, p: &Vec2, limit_to_segment: bool) -> f32 {
        p.distance(&self.closest_point(p, limit_to_segment))
    }

    /// Segment-segment intersection point, None if parallel or disjoint
    pub fn intersection(&self, other: &Self) -> Option<Vec2> {
        let d1 = self.p1 - self.p0;
        let d2 = other.p1 - other.p0;
        let cross = d1.cross(&d2);

        // Parallel lines
        if cross.abs() < 0.0001 {
            return None;
        }

        let d3 = other.p0 - self.p0;
        let t = d3.cross(&d2) / cross;
        let u = d3.cross(&d1) / cross;

        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(self.p0 + d1 * t)
        } else {
            None
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }
}
