//! Maps screen pixels covered by a transformed quad back into UV space

use crate::geometry::Vec2;

/// Edge frame of a rotated, scaled quad.
///
/// `x_axis` runs top-left to top-right and `y_axis` top-left to bottom-left.
/// The inverse squared lengths turn a dot product with either axis into a
/// normalized coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadAxes {
    pub top_left: Vec2,
    pub x_axis: Vec2,
    pub y_axis: Vec2,
    pub inv_x_len2: f32,
    pub inv_y_len2: f32,
    /// Corners in fill order: top-left, bottom-left, bottom-right, top-right
    pub corners: [Vec2; 4],
}

impl QuadAxes {
    /// Box of `width * scale` by `height * scale` anchored at `top_left`, rotated
    /// by `rotation` radians about its center. None for a zero-area quad.
    pub fn new(top_left: Vec2, width: u32, height: u32, rotation: f32, scale: f32) -> Option<Self> {
        let w = width as f32 * scale;
        let h = height as f32 * scale;
        let center = top_left + Vec2::new(w / 2.0, h / 2.0);

        let tl = top_left.rotated(rotation, center);
        let tr = (top_left + Vec2::new(w, 0.0)).rotated(rotation, center);
        let bl = (top_left + Vec2::new(0.0, h)).rotated(rotation, center);
        let br = (top_left + Vec2::new(w, h)).rotated(rotation, center);

        let x_axis = tr - tl;
        let y_axis = bl - tl;
        let (x_len2, y_len2) = (x_axis.mag2(), y_axis.mag2());
        if x_len2 <= f32::EPSILON || y_len2 <= f32::EPSILON {
            return None;
        }

        Some(Self {
            top_left: tl,
            x_axis,
            y_axis,
            inv_x_len2: 1.0 / x_len2,
            inv_y_len2: 1.0 / y_len2,
            corners: [tl, bl, br, tr],
        })
    }

    /// Normalized (u, v) of a world position, each clamped to [0, 1]
    #[inline]
    pub fn to_uv(&self, world: Vec2) -> Vec2 {
        let d = world - self.top_left;
        Vec2::new(
            (self.inv_x_len2 * d.dot(&self.x_axis)).clamp(0.0, 1.0),
            (self.inv_y_len2 * d.dot(&self.y_axis)).clamp(0.0, 1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_unrotated_corners_map_to_unit_square() {
        let quad = QuadAxes::new(Vec2::new(5.0, 7.0), 16, 8, 0.0, 1.0).unwrap();
        let [tl, bl, br, tr] = quad.corners;
        assert!(quad.to_uv(tl).approx_eq(&Vec2::new(0.0, 0.0), 1e-5));
        assert!(quad.to_uv(tr).approx_eq(&Vec2::new(1.0, 0.0), 1e-5));
        assert!(quad.to_uv(bl).approx_eq(&Vec2::new(0.0, 1.0), 1e-5));
        assert!(quad.to_uv(br).approx_eq(&Vec2::new(1.0, 1.0), 1e-5));
        assert_eq!(br, Vec2::new(21.0, 15.0));
    }

    #[test]
    fn test_scale_and_clamping() {
        let quad = QuadAxes::new(Vec2::ZERO, 4, 4, 0.0, 2.0).unwrap();
        assert!(quad.to_uv(Vec2::new(4.0, 2.0)).approx_eq(&Vec2::new(0.5, 0.25), 1e-5));
        assert!(quad.to_uv(Vec2::new(-3.0, 100.0)).approx_eq(&Vec2::new(0.0, 1.0), 1e-5));
    }

    #[test]
    fn test_rotation_keeps_uv_frame() {
        let quad = QuadAxes::new(Vec2::ZERO, 10, 10, FRAC_PI_2, 1.0).unwrap();
        // Quarter turn about (5,5) carries the top-left corner to (10,0)
        assert!(quad.top_left.approx_eq(&Vec2::new(10.0, 0.0), 1e-4));
        let [tl, bl, br, tr] = quad.corners;
        assert!(quad.to_uv(tr).approx_eq(&Vec2::new(1.0, 0.0), 1e-4));
        assert!(quad.to_uv(bl).approx_eq(&Vec2::new(0.0, 1.0), 1e-4));
        assert!(quad.to_uv(br).approx_eq(&Vec2::new(1.0, 1.0), 1e-4));
        assert!(quad.to_uv(tl).approx_eq(&Vec2::ZERO, 1e-4));
    }

    #[test]
    fn test_degenerate_quad() {
        assert!(QuadAxes::new(Vec2::ZERO, 0, 10, 0.0, 1.0).is_none());
        assert!(QuadAxes::new(Vec2::ZERO, 10, 10, 0.0, 0.0).is_none());
    }
}
