//! Bitmap fonts backed by a sprite sheet
//!
//! Each glyph is a sprite region named by its character. [`BitmapFont::builtin`]
//! bakes a tiny 3x5 uppercase/digit font into an atlas at runtime.

use crate::color::Color;
use crate::geometry::{AARect, Vec2};
use crate::sprite::{SpriteRegion, SpriteSheet};
use crate::texture::Texture;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

pub struct BitmapFont {
    sheet: SpriteSheet,
    letter_spacing: u32,
    word_spacing: u32,
}

impl BitmapFont {
    pub fn new(sheet: SpriteSheet, letter_spacing: u32, word_spacing: u32) -> Self {
        Self {
            sheet,
            letter_spacing,
            word_spacing,
        }
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    #[inline]
    pub fn letter_spacing(&self) -> u32 {
        self.letter_spacing
    }

    #[inline]
    pub fn word_spacing(&self) -> u32 {
        self.word_spacing
    }

    /// Region for a character's glyph
    pub fn glyph(&self, c: char) -> Option<SpriteRegion> {
        let mut buf = [0u8; 4];
        self.sheet.region(c.encode_utf8(&mut buf))
    }

    /// Pixel extent of `text` drawn on one line.
    /// Glyphs are separated by letter spacing; spaces add word spacing.
    /// Characters without a glyph contribute only their letter spacing.
    pub fn size_of(&self, text: &str) -> TextSize {
        let mut size = TextSize::default();
        let len = text.chars().count();

        for (i, c) in text.chars().enumerate() {
            if c == ' ' {
                size.width += self.word_spacing;
                continue;
            }
            let Some(glyph) = self.glyph(c) else {
                if i + 1 < len {
                    size.width += self.letter_spacing;
                }
                continue;
            };
            size.height = size.height.max(glyph.height);
            size.width += glyph.width;
            if i + 1 < len {
                size.width += self.letter_spacing;
            }
        }

        size
    }

    /// Top-left position that aligns `text` inside `rect`
    pub fn draw_position(&self, text: &str, rect: &AARect, x_align: XAlign, y_align: YAlign) -> Vec2 {
        let size = self.size_of(text);
        let (text_w, text_h) = (size.width as f32, size.height as f32);

        let x = match x_align {
            XAlign::Left => 0.0,
            XAlign::Center => rect.width() / 2.0 - text_w / 2.0,
            XAlign::Right => rect.width() - text_w,
        };
        let y = match y_align {
            YAlign::Top => 0.0,
            YAlign::Center => rect.height() / 2.0 - text_h / 2.0,
            YAlign::Bottom => rect.height() - text_h,
        };

        rect.top_left() + Vec2::new(x, y)
    }

    /// Embedded 3x5 font: A-Z (lowercase maps to the same glyphs), 0-9 and
    /// a little punctuation. White opaque ink on a transparent atlas.
    pub fn builtin() -> Self {
        let mut atlas = Texture::new(GLYPH_STRIDE * BUILTIN_GLYPHS.len() as u32, GLYPH_HEIGHT);
        let mut regions = HashMap::with_capacity(BUILTIN_GLYPHS.len() * 2);

        for (i, (c, rows)) in BUILTIN_GLYPHS.iter().enumerate() {
            let x0 = i as u32 * GLYPH_STRIDE;
            for (y, row) in rows.iter().enumerate() {
                for x in 0..GLYPH_WIDTH {
                    if row & (1 << (GLYPH_WIDTH - 1 - x)) != 0 {
                        atlas.set_pixel(x0 + x, y as u32, Color::WHITE);
                    }
                }
            }
            let region = SpriteRegion::new(x0, 0, GLYPH_WIDTH, GLYPH_HEIGHT);
            regions.insert(c.to_string(), region);
            if c.is_ascii_uppercase() {
                regions.insert(c.to_ascii_lowercase().to_string(), region);
            }
        }

        Self::new(SpriteSheet::new(atlas, regions), 1, 3)
    }
}

pub const GLYPH_WIDTH: u32 = 3;
pub const GLYPH_HEIGHT: u32 = 5;
const GLYPH_STRIDE: u32 = GLYPH_WIDTH + 1;

/// Rows top to bottom, most significant of the low 3 bits is the left column
#[rustfmt::skip]
const BUILTIN_GLYPHS: [(char, [u8; 5]); 44] = [
    ('A', [0b010, 0b101, 0b111, 0b101, 0b101]),
    ('B', [0b110, 0b101, 0b110, 0b101, 0b110]),
    ('C', [0b011, 0b100, 0b100, 0b100, 0b011]),
    ('D', [0b110, 0b101, 0b101, 0b101, 0b110]),
    ('E', [0b111, 0b100, 0b110, 0b100, 0b111]),
    ('F', [0b111, 0b100, 0b110, 0b100, 0b100]),
    ('G', [0b011, 0b100, 0b101, 0b101, 0b011]),
    ('H', [0b101, 0b101, 0b111, 0b101, 0b101]),
    ('I', [0b111, 0b010, 0b010, 0b010, 0b111]),
    ('J', [0b001, 0b001, 0b001, 0b101, 0b010]),
    ('K', [0b101, 0b101, 0b110, 0b101, 0b101]),
    ('L', [0b100, 0b100, 0b100, 0b100, 0b111]),
    ('M', [0b101, 0b111, 0b111, 0b101, 0b101]),
    ('N', [0b110, 0b101, 0b101, 0b101, 0b101]),
    ('O', [0b010, 0b101, 0b101, 0b101, 0b010]),
    ('P', [0b110, 0b101, 0b110, 0b100, 0b100]),
    ('Q', [0b010, 0b101, 0b101, 0b110, 0b011]),
    ('R', [0b110, 0b101, 0b110, 0b101, 0b101]),
    ('S', [0b011, 0b100, 0b010, 0b001, 0b110]),
    ('T', [0b111, 0b010, 0b010, 0b010, 0b010]),
    ('U', [0b101, 0b101, 0b101, 0b101, 0b111]),
    ('V', [0b101, 0b101, 0b101, 0b101, 0b010]),
    ('W', [0b101, 0b101, 0b111, 0b111, 0b101]),
    ('X', [0b101, 0b101, 0b010, 0b101, 0b101]),
    ('Y', [0b101, 0b101, 0b010, 0b010, 0b010]),
    ('Z', [0b111, 0b001, 0b010, 0b100, 0b111]),
    ('0', [0b111, 0b101, 0b101, 0b101, 0b111]),
    ('1', [0b010, 0b110, 0b010, 0b010, 0b111]),
    ('2', [0b110, 0b001, 0b010, 0b100, 0b111]),
    ('3', [0b110, 0b001, 0b010, 0b001, 0b110]),
    ('4', [0b101, 0b101, 0b111, 0b001, 0b001]),
    ('5', [0b111, 0b100, 0b110, 0b001, 0b110]),
    ('6', [0b011, 0b100, 0b111, 0b101, 0b111]),
    ('7', [0b111, 0b001, 0b010, 0b010, 0b010]),
    ('8', [0b111, 0b101, 0b111, 0b101, 0b111]),
    ('9', [0b111, 0b101, 0b111, 0b001, 0b110]),
    ('.', [0b000, 0b000, 0b000, 0b000, 0b010]),
    (',', [0b000, 0b000, 0b000, 0b010, 0b100]),
    ('!', [0b010, 0b010, 0b010, 0b000, 0b010]),
    ('?', [0b110, 0b001, 0b010, 0b000, 0b010]),
    ('-', [0b000, 0b000, 0b111, 0b000, 0b000]),
    (':', [0b000, 0b010, 0b000, 0b010, 0b000]),
    ('/', [0b001, 0b001, 0b010, 0b100, 0b100]),
    ('\'', [0b010, 0b010, 0b000, 0b000, 0b000]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_glyph_lookup() {
        let font = BitmapFont::builtin();
        let a = font.glyph('A').unwrap();
        assert_eq!(font.glyph('a'), Some(a));
        assert_eq!((a.width, a.height), (GLYPH_WIDTH, GLYPH_HEIGHT));
        assert!(font.glyph('~').is_none());

        // Top row of 'A' is 010
        let atlas = font.sheet().texture();
        assert_eq!(atlas.get_pixel(a.x as i32, 0), Some(Color::CLEAR_BLACK));
        assert_eq!(atlas.get_pixel(a.x as i32 + 1, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_size_of_spacing() {
        let font = BitmapFont::builtin();
        // 3 + 1 + 3
        assert_eq!(font.size_of("AB"), TextSize { width: 7, height: 5 });
        // A(3) + 1, space(3), B(3)
        assert_eq!(font.size_of("A B").width, 10);
        // Unknown '~' keeps its letter spacing
        assert_eq!(font.size_of("A~B").width, 8);
        assert_eq!(font.size_of(""), TextSize::default());
    }

    #[test]
    fn test_draw_position_alignment() {
        let font = BitmapFont::builtin();
        let rect = AARect::new(Vec2::new(10.0, 20.0), 21, 15);
        // "AB" is 7x5
        assert_eq!(
            font.draw_position("AB", &rect, XAlign::Left, YAlign::Top),
            Vec2::new(10.0, 20.0)
        );
        assert_eq!(
            font.draw_position("AB", &rect, XAlign::Center, YAlign::Center),
            Vec2::new(17.0, 25.0)
        );
        assert_eq!(
            font.draw_position("AB", &rect, XAlign::Right, YAlign::Bottom),
            Vec2::new(24.0, 30.0)
        );
    }
}
