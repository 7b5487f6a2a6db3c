//! Frame animations over sprite sheets
//!
//! An [`Animation`] is a named list of sprite-region frames played at a fixed
//! rate. [`AnimationPlayer`] advances time; [`AnimatedSprite`] adds placement
//! and issues the draw calls.

use crate::color::Color;
use crate::display::{ColorParams, DrawTransform, Layer, Rasterizer, UvParams};
use crate::geometry::{AARect, Vec2};
use crate::sprite::SpriteSheet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationFrame {
    /// Sprite region name
    pub region: String,
    #[serde(default)]
    pub offset: Vec2,
    /// Replaces the sprite's base tint for this frame
    #[serde(default)]
    pub tint: Option<Color>,
    /// Second region drawn on top at the sprite position, with its own tint
    #[serde(default)]
    pub overlay: Option<(String, Color)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    pub size: Vec2,
    pub fps: u32,
    pub frames: Vec<AnimationFrame>,
}

impl Animation {
    /// Length of one pass in seconds, zero when it cannot play
    pub fn duration(&self) -> f32 {
        if self.fps == 0 {
            return 0.0;
        }
        self.frames.len() as f32 / self.fps as f32
    }

    /// Load a JSON array of animations
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Animation>, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}

// ============================================================================
// Animation Player
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer {
    animations: Vec<Animation>,
    current: Option<usize>,
    elapsed: f32,
    frame: usize,
    looped: bool,
    playing: bool,
    finished: bool,
}

impl AnimationPlayer {
    pub fn new(animations: Vec<Animation>) -> Self {
        Self {
            animations,
            ..Self::default()
        }
    }

    /// Start the named animation from its first frame.
    /// Returns false, leaving the player untouched, if the name is unknown.
    pub fn play(&mut self, name: &str, looped: bool) -> bool {
        let Some(index) = self.animations.iter().position(|a| a.name == name) else {
            log::warn!("no animation named '{}'", name);
            return false;
        };
        self.current = Some(index);
        self.elapsed = 0.0;
        self.frame = 0;
        self.looped = looped;
        self.playing = true;
        self.finished = false;
        true
    }

    /// Toggle between paused and playing
    pub fn pause(&mut self) {
        if self.current.is_some() {
            self.playing = !self.playing;
        }
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.elapsed = 0.0;
        self.frame = 0;
        self.finished = true;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        let Some(animation) = self.current_animation() else {
            return;
        };
        let total = animation.duration();
        if total <= 0.0 {
            return;
        }
        let seconds_per_frame = 1.0 / animation.fps as f32;
        let frame_count = animation.frames.len();

        self.elapsed += dt;
        let frame = ((self.elapsed % total) / seconds_per_frame) as usize;
        self.frame = frame.min(frame_count - 1);

        if !self.looped && self.elapsed >= total {
            self.finished = true;
            self.playing = false;
            self.frame = frame_count - 1;
        }
    }

    pub fn current_animation(&self) -> Option<&Animation> {
        self.current.and_then(|i| self.animations.get(i))
    }

    pub fn current_frame(&self) -> Option<&AnimationFrame> {
        self.current_animation()?.frames.get(self.frame)
    }

    #[inline]
    pub fn frame_index(&self) -> usize {
        self.frame
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

// ============================================================================
// Animated Sprite
// ============================================================================

#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    player: AnimationPlayer,
    pub position: Vec2,
    pub scale: f32,
    pub angle: f32,
    pub alpha: f32,
    pub tint: Color,
    size: Vec2,
}

impl AnimatedSprite {
    pub fn new(player: AnimationPlayer, tint: Color) -> Self {
        Self {
            player,
            position: Vec2::ZERO,
            scale: 1.0,
            angle: 0.0,
            alpha: 1.0,
            tint,
            size: Vec2::ZERO,
        }
    }

    pub fn set_animation(&mut self, name: &str, looped: bool) -> bool {
        if !self.player.play(name, looped) {
            return false;
        }
        if let Some(animation) = self.player.current_animation() {
            self.size = animation.size;
        }
        true
    }

    pub fn update(&mut self, dt: f32) {
        self.player.update(dt);
    }

    pub fn stop(&mut self) {
        self.player.stop();
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    pub fn is_finished(&self) -> bool {
        self.player.is_finished()
    }

    /// Box covered by the current animation's frame size
    pub fn bounding_box(&self) -> AARect {
        AARect::from_corners(
            self.position,
            Vec2::new(
                self.position.x + self.size.x - 1.0,
                self.position.y + self.size.y - 1.0,
            ),
        )
    }

    /// Draw the current frame and its overlay, if any
    pub fn draw(&self, rasterizer: &mut Rasterizer, sheet: &SpriteSheet, bilinear: bool) {
        let Some(frame) = self.player.current_frame() else {
            return;
        };

        let mut transform = DrawTransform {
            position: self.position + frame.offset,
            rotation: self.angle,
            scale: self.scale,
        };
        let mut color = ColorParams {
            overlay: frame.tint.unwrap_or(self.tint),
            alpha: self.alpha,
            bilinear,
            ..ColorParams::default()
        };
        let uv = UvParams::default();

        rasterizer.draw_sprite_named(sheet, &frame.region, &transform, &color, &uv, Layer::Foreground);

        if let Some((overlay, overlay_tint)) = &frame.overlay {
            transform.position = self.position;
            color.overlay = *overlay_tint;
            rasterizer.draw_sprite_named(sheet, overlay, &transform, &color, &uv, Layer::Foreground);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PixelFormat;
    use crate::sprite::SpriteRegion;
    use crate::texture::Texture;
    use std::collections::HashMap;

    fn frame(region: &str) -> AnimationFrame {
        AnimationFrame {
            region: region.to_string(),
            ..AnimationFrame::default()
        }
    }

    fn walk() -> Animation {
        Animation {
            name: "walk".to_string(),
            size: Vec2::new(4.0, 4.0),
            fps: 10,
            frames: vec![frame("a"), frame("b"), frame("c"), frame("d")],
        }
    }

    #[test]
    fn test_play_unknown_animation() {
        let mut player = AnimationPlayer::new(vec![walk()]);
        assert!(!player.play("run", true));
        assert!(player.current_frame().is_none());
        assert!(player.play("walk", true));
        assert_eq!(player.current_frame().unwrap().region, "a");
    }

    #[test]
    fn test_frame_index_wraps_when_looped() {
        let mut player = AnimationPlayer::new(vec![walk()]);
        player.play("walk", true);
        player.update(0.25);
        assert_eq!(player.frame_index(), 2);
        player.update(0.2);
        // 0.45s into a 0.4s loop
        assert_eq!(player.frame_index(), 0);
        assert!(!player.is_finished());
    }

    #[test]
    fn test_one_shot_finishes() {
        let mut player = AnimationPlayer::new(vec![walk()]);
        player.play("walk", false);
        player.update(0.39);
        assert!(!player.is_finished());
        player.update(0.05);
        assert!(player.is_finished());
        assert_eq!(player.current_frame().unwrap().region, "d");
    }

    #[test]
    fn test_pause_and_stop() {
        let mut player = AnimationPlayer::new(vec![walk()]);
        player.play("walk", true);
        player.pause();
        player.update(0.25);
        assert_eq!(player.frame_index(), 0);
        player.pause();
        player.update(0.15);
        assert_eq!(player.frame_index(), 1);
        player.stop();
        assert!(player.is_finished());
        assert!(!player.is_playing());
    }

    #[test]
    fn test_animation_json() {
        let json = r#"[{"name": "blink", "size": {"x": 8.0, "y": 8.0}, "fps": 2,
            "frames": [{"region": "on", "tint": [255, 0, 0, 255]},
                       {"region": "off", "overlay": ["eye", [0, 0, 255, 255]]}]}]"#;
        let animations: Vec<Animation> = serde_json::from_str(json).unwrap();
        assert_eq!(animations[0].duration(), 1.0);
        assert_eq!(animations[0].frames[0].tint, Some(Color::RED));
        assert_eq!(
            animations[0].frames[1].overlay,
            Some(("eye".to_string(), Color::BLUE))
        );
    }

    #[test]
    fn test_bounding_box_follows_position() {
        let mut sprite = AnimatedSprite::new(AnimationPlayer::new(vec![walk()]), Color::WHITE);
        assert!(sprite.set_animation("walk", true));
        sprite.move_by(Vec2::new(10.0, 5.0));
        let bbox = sprite.bounding_box();
        assert_eq!(bbox.top_left(), Vec2::new(10.0, 5.0));
        assert_eq!(bbox.bottom_right(), Vec2::new(13.0, 8.0));
    }

    #[test]
    fn test_frame_tint_overrides_base() {
        let mut atlas = Texture::new(2, 1);
        atlas.set_pixel(0, 0, Color::WHITE);
        atlas.set_pixel(1, 0, Color::WHITE);
        let mut regions = HashMap::new();
        regions.insert("dot".to_string(), SpriteRegion::new(0, 0, 1, 1));
        regions.insert("ring".to_string(), SpriteRegion::new(1, 0, 1, 1));
        let sheet = SpriteSheet::new(atlas, regions);

        let animation = Animation {
            name: "idle".to_string(),
            size: Vec2::new(1.0, 1.0),
            fps: 1,
            frames: vec![AnimationFrame {
                region: "dot".to_string(),
                offset: Vec2::new(1.0, 0.0),
                tint: Some(Color::GREEN),
                overlay: Some(("ring".to_string(), Color::BLUE)),
            }],
        };
        let mut sprite = AnimatedSprite::new(AnimationPlayer::new(vec![animation]), Color::RED);
        sprite.set_animation("idle", true);

        let mut rasterizer = Rasterizer::new(PixelFormat::Rgba8888, 4, 4, 1);
        sprite.draw(&mut rasterizer, &sheet, false);
        // Frame drawn at position + offset with the frame tint, overlay at position
        assert_eq!(rasterizer.foreground().get_pixel(1, 0), Some(Color::GREEN));
        assert_eq!(rasterizer.foreground().get_pixel(0, 0), Some(Color::BLUE));
    }
}
