//! RGBA color model
//!
//! A [`Color`] keeps its four 8-bit channels alongside the packed 32-bit pixel
//! value for a [`PixelFormat`]. Every channel mutation re-encodes the packed
//! value, so `packed()` is always in sync with the channels.

use crate::easing::{self, EasingFn};
use serde::{Deserialize, Serialize};

// ============================================================================
// Pixel Format
// ============================================================================

/// Packed 32-bit pixel layouts understood by the presentation surface.
/// Names follow the SDL convention: first channel in the most significant byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    #[default]
    Rgba8888,
    Argb8888,
    Bgra8888,
}

impl PixelFormat {
    /// Encode channels into a packed pixel
    #[inline]
    pub const fn pack(self, r: u8, g: u8, b: u8, a: u8) -> u32 {
        let (r, g, b, a) = (r as u32, g as u32, b as u32, a as u32);
        match self {
            Self::Rgba8888 => (r << 24) | (g << 16) | (b << 8) | a,
            Self::Argb8888 => (a << 24) | (r << 16) | (g << 8) | b,
            Self::Bgra8888 => (b << 24) | (g << 16) | (r << 8) | a,
        }
    }

    /// Decode a packed pixel into (r, g, b, a)
    #[inline]
    pub const fn unpack(self, packed: u32) -> (u8, u8, u8, u8) {
        let [hi, mid_hi, mid_lo, lo] = packed.to_be_bytes();
        match self {
            Self::Rgba8888 => (hi, mid_hi, mid_lo, lo),
            Self::Argb8888 => (mid_hi, mid_lo, lo, hi),
            Self::Bgra8888 => (mid_lo, mid_hi, hi, lo),
        }
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Alpha blend a single color channel
/// Uses fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

#[inline]
fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let v = a as f32 + (b as f32 - a as f32) * t;
    v.round().clamp(0.0, 255.0) as u8
}

// ============================================================================
// Color
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
    packed: u32,
    format: PixelFormat,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const CLEAR_BLACK: Self = Self::rgba(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const RED: Self = Self::rgba(255, 0, 0, 255);
    pub const GREEN: Self = Self::rgba(0, 255, 0, 255);
    pub const BLUE: Self = Self::rgba(0, 0, 255, 255);
    pub const YELLOW: Self = Self::rgba(255, 255, 0, 255);
    pub const MAGENTA: Self = Self::rgba(255, 0, 255, 255);
    pub const CYAN: Self = Self::rgba(37, 240, 217, 255);
    pub const PINK: Self = Self::rgba(252, 197, 224, 255);
    pub const ORANGE: Self = Self::rgba(245, 190, 100, 255);

    /// Color in the default RGBA8888 format
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::with_format(r, g, b, a, PixelFormat::Rgba8888)
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn with_format(r: u8, g: u8, b: u8, a: u8, format: PixelFormat) -> Self {
        Self {
            r,
            g,
            b,
            a,
            packed: format.pack(r, g, b, a),
            format,
        }
    }

    /// Decode a packed pixel value
    pub const fn from_packed(packed: u32, format: PixelFormat) -> Self {
        let (r, g, b, a) = format.unpack(packed);
        Self {
            r,
            g,
            b,
            a,
            packed,
            format,
        }
    }

    /// Same channels, re-encoded for another format
    pub const fn to_format(self, format: PixelFormat) -> Self {
        Self::with_format(self.r, self.g, self.b, self.a, format)
    }

    #[inline]
    pub const fn red(&self) -> u8 {
        self.r
    }

    #[inline]
    pub const fn green(&self) -> u8 {
        self.g
    }

    #[inline]
    pub const fn blue(&self) -> u8 {
        self.b
    }

    #[inline]
    pub const fn alpha(&self) -> u8 {
        self.a
    }

    #[inline]
    pub const fn packed(&self) -> u32 {
        self.packed
    }

    #[inline]
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn set_red(&mut self, red: u8) {
        self.r = red;
        self.repack();
    }

    pub fn set_green(&mut self, green: u8) {
        self.g = green;
        self.repack();
    }

    pub fn set_blue(&mut self, blue: u8) {
        self.b = blue;
        self.repack();
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.a = alpha;
        self.repack();
    }

    #[inline]
    fn repack(&mut self) {
        self.packed = self.format.pack(self.r, self.g, self.b, self.a);
    }

    /// Channels normalized to [0, 1] as [r, g, b, a]
    pub fn normalized(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Channel-wise product (255 * 255 maps back to 255)
    pub fn modulate(&self, other: &Self) -> Self {
        let mul = |a: u8, b: u8| ((a as u16 * b as u16 + 127) / 255) as u8;
        Self::with_format(
            mul(self.r, other.r),
            mul(self.g, other.g),
            mul(self.b, other.b),
            mul(self.a, other.a),
            self.format,
        )
    }

    /// Linear interpolation, `t` clamped to [0, 1]
    pub fn lerp(c1: &Self, c2: &Self, t: f32) -> Self {
        Self::lerp_eased(c1, c2, t, easing::linear)
    }

    /// Interpolate after shaping `t` with an easing curve
    pub fn lerp_eased(c1: &Self, c2: &Self, t: f32, ease: EasingFn) -> Self {
        let t = ease(t.clamp(0.0, 1.0));
        Self::with_format(
            lerp_channel(c1.r, c2.r, t),
            lerp_channel(c1.g, c2.g, t),
            lerp_channel(c1.b, c2.b, t),
            lerp_channel(c1.a, c2.a, t),
            c1.format,
        )
    }

    /// Source-over compositing:
    /// result = destination * (1 - src_alpha) + source * src_alpha, alpha forced opaque.
    pub fn blend_over(source: &Self, destination: &Self) -> Self {
        let alpha = source.a as u16;
        Self::with_format(
            blend_channel(source.r, destination.r, alpha),
            blend_channel(source.g, destination.g, alpha),
            blend_channel(source.b, destination.b, alpha),
            255,
            destination.format,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::CLEAR_BLACK
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b && self.a == other.a
    }
}

impl Eq for Color {}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(c: (u8, u8, u8)) -> Self {
        Self::rgb(c.0, c.1, c.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_one(a: &Color, b: &Color) -> bool {
        let d = |x: u8, y: u8| (x as i16 - y as i16).abs() <= 1;
        d(a.red(), b.red()) && d(a.green(), b.green()) && d(a.blue(), b.blue()) && d(a.alpha(), b.alpha())
    }

    #[test]
    fn test_pack_unpack_all_formats() {
        for format in [PixelFormat::Rgba8888, PixelFormat::Argb8888, PixelFormat::Bgra8888] {
            let c = Color::with_format(10, 20, 30, 40, format);
            let back = Color::from_packed(c.packed(), format);
            assert_eq!(back, c);
            assert_eq!(back.packed(), c.packed());
        }
        assert_eq!(Color::rgba(0x11, 0x22, 0x33, 0x44).packed(), 0x1122_3344);
        assert_eq!(
            Color::with_format(0x11, 0x22, 0x33, 0x44, PixelFormat::Argb8888).packed(),
            0x4411_2233
        );
    }

    #[test]
    fn test_setters_regenerate_packed() {
        let mut c = Color::rgba(1, 2, 3, 4);
        c.set_red(200);
        c.set_alpha(255);
        assert_eq!(c.packed(), PixelFormat::Rgba8888.pack(200, 2, 3, 255));
        c.set_green(9);
        c.set_blue(8);
        assert_eq!(c.packed(), 0xC809_08FF);
    }

    #[test]
    fn test_lerp_endpoints() {
        let samples = [
            (Color::RED, Color::BLUE),
            (Color::CLEAR_BLACK, Color::WHITE),
            (Color::rgba(13, 200, 77, 90), Color::rgba(250, 3, 128, 255)),
        ];
        for (c1, c2) in samples {
            assert!(within_one(&Color::lerp(&c1, &c2, 0.0), &c1));
            assert!(within_one(&Color::lerp(&c1, &c2, 1.0), &c2));
        }
    }

    #[test]
    fn test_lerp_eased_midpoint() {
        let mid = Color::lerp_eased(&Color::BLACK, &Color::WHITE, 0.5, easing::in_quad);
        assert!(within_one(&mid, &Color::rgba(64, 64, 64, 255)));
    }

    #[test]
    fn test_blend_opaque_source_wins() {
        let src = Color::rgba(12, 200, 99, 255);
        let dst = Color::rgba(250, 1, 40, 255);
        assert_eq!(Color::blend_over(&src, &dst), src);
    }

    #[test]
    fn test_blend_transparent_source_keeps_destination() {
        let src = Color::rgba(12, 200, 99, 0);
        let dst = Color::rgba(250, 1, 40, 255);
        assert_eq!(Color::blend_over(&src, &dst), dst);
    }

    #[test]
    fn test_blend_result_is_opaque() {
        let out = Color::blend_over(&Color::rgba(255, 0, 0, 128), &Color::CLEAR_BLACK);
        assert_eq!(out.alpha(), 255);
        assert!((out.red() as i16 - 128).abs() <= 1);
    }

    #[test]
    fn test_serde_as_array() {
        let c: Color = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(c, Color::rgba(1, 2, 3, 4));
        assert_eq!(serde_json::to_string(&c).unwrap(), "[1,2,3,4]");
    }
}
