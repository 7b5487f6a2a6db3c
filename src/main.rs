use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use pixelcade::display::{Display, InputEvent, RenderTarget};
use pixelcade::easing;
use pixelcade::util::{FrameClock, Rng};
use pixelcade::{
    AARect, AnimatedSprite, Animation, AnimationFrame, AnimationPlayer, BitmapFont, Circle, Color,
    ColorParams, DrawTransform, EngineConfig, GradientParams, GradientX, GradientY, Layer, Ray2D,
    Rasterizer, SpriteRegion, SpriteSheet, Texture, Triangle, UvOrientation, UvParams, Vec2,
    XAlign, YAlign,
};
use sdl2::keyboard::Keycode;
use std::collections::HashMap;
use std::path::PathBuf;

const STAR_COUNT: usize = 40;

#[derive(Parser, Debug, Clone)]
#[command(name = "pixelcade")]
#[command(about = "Software-rasterized arcade demo", long_about = None)]
struct Cli {
    /// JSON engine config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logical screen width
    #[arg(long)]
    width: Option<u32>,

    /// Logical screen height
    #[arg(long)]
    height: Option<u32>,

    /// Window pixels per logical pixel
    #[arg(long = "mag")]
    magnification: Option<u32>,

    /// Disable VSync for uncapped framerate
    #[arg(long = "no-vsync", default_value = "false")]
    no_vsync: bool,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(mag) = self.magnification {
            config.magnification = mag;
        }
        if self.no_vsync {
            config.vsync = false;
        }
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }
}

/// Procedural atlas: a checker tile, a plasma swatch, a floor tile and a
/// small spark used as an animation overlay.
fn build_atlas() -> SpriteSheet {
    let palette = [
        Color::rgb(20, 0, 60),
        Color::BLUE,
        Color::CYAN,
        Color::WHITE,
        Color::PINK,
        Color::MAGENTA,
    ];
    let checker = Texture::checkerboard(16, 4, Color::WHITE, Color::rgb(90, 90, 90));
    let plasma = Texture::plasma(32, &palette);
    let tile = Texture::checkerboard(8, 8, Color::rgb(24, 24, 48), Color::BLACK);
    let mut spark = Texture::new(4, 4);
    for (x, y) in [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2), (3, 3)] {
        spark.set_pixel(x, y, Color::WHITE);
    }

    let mut atlas = Texture::new(64, 32);
    atlas.blit(&checker, 0, 0);
    atlas.blit(&tile, 16, 0);
    atlas.blit(&spark, 24, 0);
    atlas.blit(&plasma, 32, 0);

    let mut regions = HashMap::new();
    regions.insert("checker".to_string(), SpriteRegion::new(0, 0, 16, 16));
    regions.insert("tile".to_string(), SpriteRegion::new(16, 0, 8, 8));
    regions.insert("spark".to_string(), SpriteRegion::new(24, 0, 4, 4));
    regions.insert("plasma".to_string(), SpriteRegion::new(32, 0, 32, 32));
    SpriteSheet::new(atlas, regions)
}

fn pulse_animation() -> Animation {
    let tints = [Color::RED, Color::ORANGE, Color::YELLOW, Color::ORANGE];
    let frames = tints
        .iter()
        .enumerate()
        .map(|(i, tint)| AnimationFrame {
            region: "checker".to_string(),
            offset: Vec2::ZERO,
            tint: Some(*tint),
            overlay: (i % 2 == 0).then(|| ("spark".to_string(), Color::WHITE)),
        })
        .collect();
    Animation {
        name: "pulse".to_string(),
        size: Vec2::new(16.0, 16.0),
        fps: 8,
        frames,
    }
}

/// Tiled floor plus a gradient band, drawn once into the persistent layer
fn draw_backdrop(rasterizer: &mut Rasterizer, sheet: &SpriteSheet) {
    let (w, h) = (rasterizer.width(), rasterizer.height());
    for y in (0..h).step_by(8) {
        for x in (0..w).step_by(8) {
            rasterizer.draw_background(sheet, "tile", Vec2::new(x as f32, y as f32), Color::WHITE);
        }
    }

    // 16x16 checker stretched into a band along the bottom edge
    let band_scale = w as f32 / 16.0;
    let band = DrawTransform {
        position: Vec2::new(0.0, h as f32 - 16.0 * band_scale / 2.0 - 8.0),
        rotation: 0.0,
        scale: band_scale,
    };
    let color = ColorParams {
        gradient: GradientParams::vertical(GradientY::TopToBottom, Color::CLEAR_BLACK, Color::BLUE),
        alpha: 0.6,
        ..ColorParams::default()
    };
    let uv = UvParams {
        orientation: UvOrientation::Outside,
        split1: Vec2::new(0.0, 0.5),
        split2: Vec2::new(1.0, 0.5),
    };
    if let Some(region) = sheet.region("checker") {
        rasterizer.draw_sprite(sheet.texture(), &region, &band, &color, &uv, Layer::Background);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.engine_config()?;

    let (mut display, texture_creator) =
        Display::with_config("pixelcade", &config).map_err(anyhow::Error::msg)?;
    let mut rasterizer = Rasterizer::from_config(&config);
    let mut target = RenderTarget::with_size(
        &texture_creator,
        rasterizer.format(),
        rasterizer.width(),
        rasterizer.height(),
    )
    .map_err(anyhow::Error::msg)
    .context("creating layer textures")?;

    let sheet = build_atlas();
    let font = BitmapFont::builtin();
    draw_backdrop(&mut rasterizer, &sheet);

    let mut pulse = AnimatedSprite::new(AnimationPlayer::new(vec![pulse_animation()]), Color::WHITE);
    pulse.set_animation("pulse", true);
    pulse.position = Vec2::new(0.0, 40.0);

    let (w, h) = (rasterizer.width() as f32, rasterizer.height() as f32);
    let center = Vec2::new(w / 2.0, h / 2.0);
    let mut rng = Rng::new(0xA5C4_DE00);
    let stars: Vec<(Vec2, f32)> = (0..STAR_COUNT)
        .map(|_| {
            let p = Vec2::new(rng.range_f32(0.0, w), rng.range_f32(0.0, h));
            (p, rng.range_f32(0.0, std::f32::consts::TAU))
        })
        .collect();
    let comet = Ray2D::new(Vec2::new(-20.0, h * 0.3), Vec2::new(w + 40.0, h * 0.2));
    let moon = Circle::new(comet.point_at(0.6) - Vec2::new(0.0, 6.0), 12.0);
    let eclipse = comet.intersect_circle(&moon);

    let mut clock = FrameClock::new(60);
    let mut time = 0.0f32;
    let mut bilinear = false;
    let mut split = false;

    info!("Space: shake  B: bilinear  U: uv split  Escape: quit");

    'main: loop {
        let dt = clock.tick();
        time += dt;

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::Space) => rasterizer.shake(4.0, 0.5),
                InputEvent::KeyDown(Keycode::B) => {
                    bilinear = !bilinear;
                    debug!("bilinear sampling {}", bilinear);
                },
                InputEvent::KeyDown(Keycode::U) => {
                    split = !split;
                    debug!("uv split {}", split);
                },
                _ => {},
            }
        }

        rasterizer.update(dt);
        pulse.update(dt);
        pulse.move_by(Vec2::new(30.0 * dt, 0.0));
        if pulse.position.x > w {
            pulse.position.x = -pulse.size().x;
        }

        for (p, phase) in &stars {
            let level = (128.0 + 127.0 * (time * 3.0 + phase).sin()) as u8;
            rasterizer.draw_point(p.x as i32, p.y as i32, Color::rgb(level, level, level));
        }

        // Comet streak, eased so it decelerates across the screen
        let t = (time * 0.25).fract();
        let streak = comet.segment_for_time(t, easing::out_quad);
        let head_t = easing::out_quad(t);
        rasterizer.draw_line(comet.point_at(head_t * 0.9), streak.p1, Color::YELLOW);
        let moon_fill = match eclipse {
            Some((t0, t1)) if head_t >= t0 && head_t <= t1 => Color::rgba(255, 220, 120, 220),
            _ => Color::rgba(80, 80, 60, 200),
        };
        rasterizer.draw_circle(&moon, Color::WHITE, Some(moon_fill));

        let plasma = DrawTransform {
            position: center - Vec2::new(16.0, 16.0),
            rotation: time,
            scale: 1.5 + 0.5 * (time * 0.7).sin(),
        };
        let plasma_color = ColorParams {
            gradient: GradientParams::horizontal(GradientX::LeftToRight, Color::WHITE, Color::CYAN),
            bilinear,
            ..ColorParams::default()
        };
        let plasma_uv = if split {
            let s = 0.5 + 0.5 * (time * 2.0).sin();
            UvParams {
                orientation: UvOrientation::Outside,
                split1: Vec2::new(s, 0.0),
                split2: Vec2::new(s, 1.0),
            }
        } else {
            UvParams::default()
        };
        rasterizer.draw_sprite_named(
            &sheet,
            "plasma",
            &plasma,
            &plasma_color,
            &plasma_uv,
            Layer::Foreground,
        );

        let tri = Triangle::new(
            Vec2::new(20.0, h - 70.0),
            Vec2::new(50.0, h - 40.0),
            Vec2::new(10.0, h - 40.0),
        );
        rasterizer.draw_triangle(&tri, Color::GREEN, Some(Color::rgba(0, 255, 0, 96)));
        let rect = AARect::new(Vec2::new(w - 50.0, h - 70.0), 30, 30);
        rasterizer.draw_rect(&rect, Color::MAGENTA, Some(Color::rgba(255, 0, 255, 96)));

        pulse.draw(&mut rasterizer, &sheet, bilinear);

        let title = "PIXELCADE";
        let band = AARect::new(Vec2::ZERO, w as u32, 16);
        let title_at = font.draw_position(title, &band, XAlign::Center, YAlign::Center);
        rasterizer.draw_text(
            &font,
            title,
            &DrawTransform::at(title_at),
            &ColorParams::tinted(Color::YELLOW),
            &UvParams::default(),
        );

        let fps = format!("FPS {}", clock.average_fps() as u32);
        rasterizer.draw_text(
            &font,
            &fps,
            &DrawTransform::at(Vec2::new(2.0, h - 7.0)),
            &ColorParams::default(),
            &UvParams::default(),
        );

        rasterizer
            .present(&mut display.surface(&mut target))
            .map_err(anyhow::Error::msg)?;
    }

    info!("exiting after {:.1}s", time);
    Ok(())
}
