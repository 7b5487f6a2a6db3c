//! Per-draw-call parameters for sprites and text

use crate::color::Color;
use crate::geometry::Vec2;

/// Target buffer for a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    /// Cleared after every present
    #[default]
    Foreground,
    /// Persistent backdrop, only cleared on request
    Background,
}

/// Placement of a quad: top-left position, rotation (radians) about the
/// quad's center, and uniform scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawTransform {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
}

impl DrawTransform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for DrawTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientX {
    #[default]
    None,
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientY {
    #[default]
    None,
    TopToBottom,
    BottomToTop,
}

/// Directional tint fade from `color1` to `color2` along u and/or v
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientParams {
    pub x: GradientX,
    pub y: GradientY,
    pub color1: Color,
    pub color2: Color,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            x: GradientX::None,
            y: GradientY::None,
            color1: Color::WHITE,
            color2: Color::WHITE,
        }
    }
}

impl GradientParams {
    pub fn horizontal(x: GradientX, color1: Color, color2: Color) -> Self {
        Self {
            x,
            color1,
            color2,
            ..Self::default()
        }
    }

    pub fn vertical(y: GradientY, color1: Color, color2: Color) -> Self {
        Self {
            y,
            color1,
            color2,
            ..Self::default()
        }
    }

    /// Tint at (u, v), None when neither axis is active.
    /// Each active axis lerps color1 to color2; two active axes multiply.
    pub fn tint(&self, u: f32, v: f32) -> Option<Color> {
        let along_x = match self.x {
            GradientX::None => None,
            GradientX::LeftToRight => Some(u),
            GradientX::RightToLeft => Some(1.0 - u),
        }
        .map(|t| Color::lerp(&self.color1, &self.color2, t));

        let along_y = match self.y {
            GradientY::None => None,
            GradientY::TopToBottom => Some(v),
            GradientY::BottomToTop => Some(1.0 - v),
        }
        .map(|t| Color::lerp(&self.color1, &self.color2, t));

        match (along_x, along_y) {
            (Some(x), Some(y)) => Some(x.modulate(&y)),
            (x, y) => x.or(y),
        }
    }
}

/// Tint, opacity and filtering for a textured draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorParams {
    pub gradient: GradientParams,
    pub overlay: Color,
    pub alpha: f32,
    pub bilinear: bool,
}

impl ColorParams {
    pub fn tinted(overlay: Color) -> Self {
        Self {
            overlay,
            ..Self::default()
        }
    }

    /// Overlay combined with the gradient tint at (u, v)
    pub fn tint_at(&self, u: f32, v: f32) -> Color {
        match self.gradient.tint(u, v) {
            Some(g) => self.overlay.modulate(&g),
            None => self.overlay,
        }
    }
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            gradient: GradientParams::default(),
            overlay: Color::WHITE,
            alpha: 1.0,
            bilinear: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UvOrientation {
    #[default]
    Inside,
    Outside,
}

/// Half-plane clip in UV space against the directed line `split1 -> split2`.
/// `Inside` keeps texels on or left of the line (cross >= 0), `Outside` keeps
/// texels on or right of it. The defaults keep the whole quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvParams {
    pub orientation: UvOrientation,
    pub split1: Vec2,
    pub split2: Vec2,
}

impl Default for UvParams {
    fn default() -> Self {
        Self {
            orientation: UvOrientation::Inside,
            split1: Vec2::new(1.0, 0.0),
            split2: Vec2::new(1.0, 1.0),
        }
    }
}

impl UvParams {
    pub fn keeps(&self, uv: Vec2) -> bool {
        let dir = self.split2 - self.split1;
        if dir.mag2() <= f32::EPSILON {
            return true;
        }
        let side = dir.cross(&(uv - self.split1));
        match self.orientation {
            UvOrientation::Inside => side >= 0.0,
            UvOrientation::Outside => side <= 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_axes() {
        let g = GradientParams::horizontal(GradientX::LeftToRight, Color::BLACK, Color::WHITE);
        assert_eq!(g.tint(0.0, 0.7), Some(Color::BLACK));
        assert_eq!(g.tint(1.0, 0.7), Some(Color::WHITE));

        let g = GradientParams::vertical(GradientY::BottomToTop, Color::BLACK, Color::WHITE);
        assert_eq!(g.tint(0.3, 1.0), Some(Color::BLACK));
        assert_eq!(g.tint(0.3, 0.0), Some(Color::WHITE));

        assert_eq!(GradientParams::default().tint(0.5, 0.5), None);
    }

    #[test]
    fn test_gradient_both_axes_multiply() {
        let g = GradientParams {
            x: GradientX::LeftToRight,
            y: GradientY::TopToBottom,
            color1: Color::BLACK,
            color2: Color::WHITE,
        };
        assert_eq!(g.tint(1.0, 1.0), Some(Color::WHITE));
        assert_eq!(g.tint(1.0, 0.0), Some(Color::BLACK));
    }

    #[test]
    fn test_color_params_tint() {
        let params = ColorParams::tinted(Color::RED);
        assert_eq!(params.tint_at(0.5, 0.5), Color::RED);
    }

    #[test]
    fn test_default_uv_keeps_everything() {
        let uv = UvParams::default();
        for p in [Vec2::ZERO, Vec2::new(1.0, 1.0), Vec2::new(0.3, 0.9), Vec2::new(1.0, 0.0)] {
            assert!(uv.keeps(p));
        }
    }

    #[test]
    fn test_uv_split_orientation() {
        let mut uv = UvParams {
            orientation: UvOrientation::Inside,
            split1: Vec2::new(0.5, 0.0),
            split2: Vec2::new(0.5, 1.0),
        };
        assert!(uv.keeps(Vec2::new(0.25, 0.5)));
        assert!(!uv.keeps(Vec2::new(0.75, 0.5)));
        uv.orientation = UvOrientation::Outside;
        assert!(!uv.keeps(Vec2::new(0.25, 0.5)));
        assert!(uv.keeps(Vec2::new(0.75, 0.5)));

        uv.split2 = uv.split1;
        assert!(uv.keeps(Vec2::new(0.25, 0.5)));
    }
}
