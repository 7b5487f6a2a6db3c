//! CPU rasterizer over a foreground and a background layer
//!
//! Every write goes through [`Rasterizer::draw_point`]'s source-over rule.
//! Foreground writes composite over the foreground-over-background color, so
//! the foreground ends up holding opaque, already-layered pixels wherever
//! something was drawn and transparent black everywhere else. The foreground
//! is cleared by every `present`; the background only by `clear_background`.

use super::params::{ColorParams, DrawTransform, Layer, UvParams};
use super::shake::ScreenShake;
use super::surface::{composite_layers, Frame, PresentSurface};
use crate::color::{Color, PixelFormat};
use crate::config::EngineConfig;
use crate::font::BitmapFont;
use crate::geometry::{self, AARect, Circle, Shape, Triangle, Vec2};
use crate::pixel_buffer::PixelBuffer;
use crate::projector::QuadAxes;
use crate::sprite::{SpriteRegion, SpriteSheet};
use crate::texture::Texture;

pub struct Rasterizer {
    foreground: PixelBuffer,
    background: PixelBuffer,
    clear_color: Color,
    magnification: u32,
    shake: ScreenShake,
    // Scanline intersections, reused across fills
    nodes: Vec<f32>,
}

impl Rasterizer {
    /// # Panics
    /// Panics if any dimension or the magnification is zero
    pub fn new(format: PixelFormat, width: u32, height: u32, magnification: u32) -> Self {
        assert!(width > 0 && height > 0, "rasterizer needs a non-empty screen");
        assert!(magnification > 0, "magnification must be at least 1");

        let clear_color = Color::BLACK;
        let mut background = PixelBuffer::new(format, width, height);
        background.clear(clear_color);
        let mut foreground = PixelBuffer::new(format, width, height);
        foreground.clear(Color::CLEAR_BLACK);

        log::debug!("rasterizer {}x{} x{} ({:?})", width, height, magnification, format);

        Self {
            foreground,
            background,
            clear_color,
            magnification,
            shake: ScreenShake::new(),
            nodes: Vec::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut rasterizer = Self::new(
            PixelFormat::default(),
            config.width,
            config.height,
            config.magnification,
        );
        rasterizer.set_clear_color(config.clear_color());
        rasterizer.clear_background();
        rasterizer
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.foreground.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.foreground.height()
    }

    #[inline]
    pub fn magnification(&self) -> u32 {
        self.magnification
    }

    pub fn format(&self) -> PixelFormat {
        self.foreground.format()
    }

    pub fn foreground(&self) -> &PixelBuffer {
        &self.foreground
    }

    pub fn background(&self) -> &PixelBuffer {
        &self.background
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Color used by `clear_background`
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn clear_foreground(&mut self) {
        self.foreground.clear(Color::CLEAR_BLACK);
    }

    pub fn clear_background(&mut self) {
        self.background.clear(self.clear_color);
    }

    /// Flattened view of both layers
    pub fn composite(&self) -> PixelBuffer {
        composite_layers(&self.background, &self.foreground)
    }

    // ========================================================================
    // Frame cycle
    // ========================================================================

    /// Advance timed state (screen shake) by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.shake.update(dt);
    }

    /// Start or restart a screen shake
    pub fn shake(&mut self, power: f32, duration: f32) {
        log::debug!("screen shake power={} duration={}s", power, duration);
        self.shake.shake(power, duration);
    }

    /// Current presentation offset in window pixels
    pub fn shake_offset(&self) -> (i32, i32) {
        let o = self.shake.offset();
        (o.x.round() as i32, o.y.round() as i32)
    }

    /// Hand both layers to `surface`, then clear the foreground.
    /// The foreground is cleared even if the surface reports an error.
    pub fn present<S: PresentSurface + ?Sized>(&mut self, surface: &mut S) -> Result<(), String> {
        let frame = Frame {
            background: &self.background,
            foreground: &self.foreground,
            magnification: self.magnification,
            offset: self.shake_offset(),
        };
        let result = surface.present(&frame);
        self.clear_foreground();
        result
    }

    // ========================================================================
    // Points and lines
    // ========================================================================

    /// Source-over `color` onto the foreground
    #[inline]
    pub fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        self.plot(Layer::Foreground, x, y, color);
    }

    /// Source-over `color` onto either layer
    #[inline]
    pub fn draw_point_on(&mut self, layer: Layer, x: i32, y: i32, color: Color) {
        self.plot(layer, x, y, color);
    }

    fn plot(&mut self, layer: Layer, x: i32, y: i32, color: Color) {
        let Some(bg) = self.background.get_pixel(x, y) else {
            return;
        };
        let target = match layer {
            Layer::Foreground => &mut self.foreground,
            Layer::Background => &mut self.background,
        };
        let destination = match layer {
            Layer::Foreground => match target.get_pixel(x, y) {
                Some(fg) => Color::blend_over(&fg, &bg),
                None => return,
            },
            Layer::Background => bg,
        };
        target.set_pixel(x, y, Color::blend_over(&color, &destination));
    }

    /// Midpoint line between the rounded endpoints, both inclusive.
    ///
    /// Only the steps that can land on screen are walked. The error term at
    /// the first visible step is derived from the full line, so clipping
    /// never moves a pixel.
    pub fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color) {
        let snap = |v: f32| v.clamp(-LINE_LIMIT, LINE_LIMIT).round() as i64;
        let (x0, y0, x1, y1) = (snap(p0.x), snap(p0.y), snap(p1.x), snap(p1.y));
        let (w, h) = (self.width() as i64, self.height() as i64);

        // Walk the major axis `a`; the minor axis `b` follows the error term
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (a0, a1, b0, b1, a_len, b_len) = if steep {
            (y0, y1, x0, x1, h, w)
        } else {
            (x0, x1, y0, y1, w, h)
        };

        let ia = (a1 - a0).signum();
        let ib = (b1 - b0).signum();
        let da = (a1 - a0).abs() * 2;
        let db = (b1 - b0).abs() * 2;
        let steps = da / 2;

        let Some((first, last)) = visible_steps(a0, ia, b0, ib, da, db, steps, a_len, b_len)
        else {
            return;
        };

        // Minor-axis moves taken before step `first`
        let e0 = db - da / 2;
        let moves = if da == 0 {
            0
        } else {
            let n = e0 as i128 + (first as i128 - 1) * db as i128;
            (n.div_euclid(da as i128) + 1) as i64
        };
        let mut d = (e0 as i128 + first as i128 * db as i128 - moves as i128 * da as i128) as i64;
        let mut b = b0 + ib * moves;

        for k in first..=last {
            let a = a0 + ia * k;
            let (x, y) = if steep { (b, a) } else { (a, b) };
            self.draw_point(x as i32, y as i32, color);
            if d >= 0 {
                d -= da;
                b += ib;
            }
            d += db;
        }
    }

    // ========================================================================
    // Polygons and shapes
    // ========================================================================

    /// Scanline fill. Rows run `round(top) <= y < round(bottom)`, spans
    /// `round(x_left) <= x < round(x_right)` clamped to the polygon's extent.
    /// `fill` supplies each pixel's color, or None to leave it untouched.
    pub fn fill_polygon<F>(&mut self, points: &[Vec2], layer: Layer, mut fill: F)
    where
        F: FnMut(i32, i32) -> Option<Color>,
    {
        let Some((min, max)) = geometry::bounds(points) else {
            return;
        };
        let (left, right) = (min.x, max.x);
        let first_row = (min.y.round() as i32).max(0);
        let last_row = (max.y.round() as i32).min(self.height() as i32);
        let width = self.width() as i32;

        let mut nodes = std::mem::take(&mut self.nodes);
        let n = points.len();

        for y in first_row..last_row {
            nodes.clear();
            let yf = y as f32;

            let mut j = n - 1;
            for i in 0..n {
                let (pi, pj) = (points[i], points[j]);
                j = i;
                if !((pi.y <= yf && pj.y > yf) || (pj.y <= yf && pi.y > yf)) {
                    continue;
                }
                // Horizontal edges never cross a scanline
                let denom = pj.y - pi.y;
                if geometry::is_equal(denom, 0.0) {
                    continue;
                }
                nodes.push(pi.x + (yf - pi.y) / denom * (pj.x - pi.x));
            }

            nodes.sort_unstable_by(f32::total_cmp);
            for span in nodes.chunks_exact(2) {
                if span[0] > right {
                    break;
                }
                if span[1] <= left {
                    continue;
                }
                let start = (span[0].max(left).round() as i32).max(0);
                let end = (span[1].min(right).round() as i32).min(width);
                for x in start..end {
                    if let Some(color) = fill(x, y) {
                        self.plot(layer, x, y, color);
                    }
                }
            }
        }

        self.nodes = nodes;
    }

    /// Stroke every edge, closing edge included
    pub fn stroke_polygon(&mut self, points: &[Vec2], color: Color) {
        let n = points.len();
        if n == 0 {
            return;
        }
        if n == 1 {
            self.draw_line(points[0], points[0], color);
            return;
        }
        for i in 0..n {
            self.draw_line(points[i], points[(i + 1) % n], color);
        }
    }

    /// Optional solid fill followed by the outline
    pub fn draw_polygon(&mut self, points: &[Vec2], fill: Option<Color>, stroke: Color) {
        if let Some(fill) = fill {
            self.fill_polygon(points, Layer::Foreground, |_, _| Some(fill));
        }
        self.stroke_polygon(points, stroke);
    }

    pub fn draw_triangle(&mut self, triangle: &Triangle, stroke: Color, fill: Option<Color>) {
        self.draw_polygon(&triangle.points(), fill, stroke);
    }

    /// Filled rectangles cover their whole pixel area, so a 10x10 rect paints
    /// exactly 100 pixels
    pub fn draw_rect(&mut self, rect: &AARect, stroke: Color, fill: Option<Color>) {
        if let Some(fill) = fill {
            self.fill_polygon(&rect.fill_points(), Layer::Foreground, |_, _| Some(fill));
        }
        self.stroke_polygon(&rect.points(), stroke);
    }

    /// Circles are drawn as a regular polygon of `Circle::SEGMENTS` sides
    pub fn draw_circle(&mut self, circle: &Circle, stroke: Color, fill: Option<Color>) {
        self.draw_polygon(&circle.points(), fill, stroke);
    }

    // ========================================================================
    // Sprites and text
    // ========================================================================

    /// Draw `region` of `texture` as a transformed quad.
    ///
    /// Each covered pixel maps to UV space, is clipped by `uv`, sampled
    /// (nearest or bilinear), multiplied by the overlay/gradient tint and
    /// alpha, then composited. Texels outside the atlas are skipped.
    pub fn draw_sprite(
        &mut self,
        texture: &Texture,
        region: &SpriteRegion,
        transform: &DrawTransform,
        color: &ColorParams,
        uv: &UvParams,
        layer: Layer,
    ) {
        if region.is_empty() {
            return;
        }
        let Some(axes) = QuadAxes::new(
            transform.position,
            region.width,
            region.height,
            transform.rotation,
            transform.scale,
        ) else {
            return;
        };
        let alpha = color.alpha.clamp(0.0, 1.0);

        self.fill_polygon(&axes.corners, layer, |x, y| {
            let p = axes.to_uv(Vec2::new(x as f32, y as f32));
            if !uv.keeps(p) {
                return None;
            }
            let texel = if color.bilinear {
                texture.sample_bilinear(region, p.x, p.y)
            } else {
                texture.sample_nearest(region, p.x, p.y)
            }?;

            let [tr, tg, tb, ta] = color.tint_at(p.x, p.y).normalized();
            let scale = |c: u8, t: f32| (c as f32 * t).round() as u8;
            Some(Color::rgba(
                scale(texel.red(), tr),
                scale(texel.green(), tg),
                scale(texel.blue(), tb),
                scale(texel.alpha(), ta * alpha),
            ))
        });
    }

    /// Region lookup by name, then `draw_sprite`. Unknown names are skipped.
    pub fn draw_sprite_named(
        &mut self,
        sheet: &SpriteSheet,
        name: &str,
        transform: &DrawTransform,
        color: &ColorParams,
        uv: &UvParams,
        layer: Layer,
    ) {
        match sheet.region(name) {
            Some(region) => self.draw_sprite(sheet.texture(), &region, transform, color, uv, layer),
            None => log::warn!("no sprite named '{}'", name),
        }
    }

    /// Draw a named sprite into the persistent background layer
    pub fn draw_background(&mut self, sheet: &SpriteSheet, name: &str, position: Vec2, tint: Color) {
        self.draw_sprite_named(
            sheet,
            name,
            &DrawTransform::at(position),
            &ColorParams::tinted(tint),
            &UvParams::default(),
            Layer::Background,
        );
    }

    /// Draw a line of text. Spaces advance by the font's word spacing, other
    /// glyphs by their (unscaled) width plus letter spacing. Characters with
    /// no glyph still advance by the letter spacing.
    pub fn draw_text(
        &mut self,
        font: &BitmapFont,
        text: &str,
        transform: &DrawTransform,
        color: &ColorParams,
        uv: &UvParams,
    ) {
        let mut glyph_transform = *transform;
        let mut missing = 0usize;

        for c in text.chars() {
            if c == ' ' {
                glyph_transform.position.x += font.word_spacing() as f32;
                continue;
            }
            let Some(region) = font.glyph(c) else {
                missing += 1;
                glyph_transform.position.x += font.letter_spacing() as f32;
                continue;
            };
            self.draw_sprite(
                font.sheet().texture(),
                &region,
                &glyph_transform,
                color,
                uv,
                Layer::Foreground,
            );
            glyph_transform.position.x += (region.width + font.letter_spacing()) as f32;
        }

        if missing > 0 {
            log::warn!("{} character(s) without a glyph in {:?}", missing, text);
        }
    }
}

/// Endpoint coordinates are clamped to this before rasterizing lines
const LINE_LIMIT: f32 = 1.0e12;

/// Step range `first..=last` of a midpoint line whose pixels can fall
/// inside an `a_len` x `b_len` screen, or None when none can.
/// Step `k` sits at `a0 + ia * k` on the major axis and within half a pixel
/// of the ideal line on the minor axis.
fn visible_steps(
    a0: i64,
    ia: i64,
    b0: i64,
    ib: i64,
    da: i64,
    db: i64,
    steps: i64,
    a_len: i64,
    b_len: i64,
) -> Option<(i64, i64)> {
    let (mut first, mut last) = match ia {
        1 => (-a0, a_len - 1 - a0),
        -1 => (a0 - (a_len - 1), a0),
        _ => (0, 0),
    };
    if ia == 0 && !(0..a_len).contains(&a0) {
        return None;
    }

    if db == 0 {
        if !(0..b_len).contains(&b0) {
            return None;
        }
    } else {
        // One pixel of slack on either side covers the midpoint rounding
        let slope = db as f64 / da as f64;
        let (lo, hi) = (-1.0, b_len as f64);
        let (k_lo, k_hi) = if ib > 0 {
            ((lo - b0 as f64) / slope, (hi - b0 as f64) / slope)
        } else {
            ((b0 as f64 - hi) / slope, (b0 as f64 - lo) / slope)
        };
        first = first.max((k_lo.floor() as i64).saturating_sub(1));
        last = last.min((k_hi.ceil() as i64).saturating_add(1));
    }

    first = first.max(0);
    last = last.min(steps);
    (first <= last).then_some((first, last))
}
