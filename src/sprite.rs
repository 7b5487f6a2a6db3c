//! Sprite sheets: a shared atlas texture plus named sub-regions

use crate::texture::Texture;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Rectangular sub-area of an atlas, in texels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpriteRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpriteRegion {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamp region-local texel coordinates to the last row/column
    #[inline]
    pub fn clamp_local(&self, tx: i32, ty: i32) -> (i32, i32) {
        let max_x = (self.width as i32 - 1).max(0);
        let max_y = (self.height as i32 - 1).max(0);
        (tx.clamp(0, max_x), ty.clamp(0, max_y))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One manifest entry: `{"name": "ship", "x": 0, "y": 0, "width": 16, "height": 16}`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegionEntry {
    name: String,
    #[serde(flatten)]
    region: SpriteRegion,
}

pub struct SpriteSheet {
    texture: Texture,
    regions: HashMap<String, SpriteRegion>,
}

impl SpriteSheet {
    pub fn new(texture: Texture, regions: HashMap<String, SpriteRegion>) -> Self {
        Self { texture, regions }
    }

    /// Build from a JSON array of named regions
    pub fn from_json(texture: Texture, json: &str) -> Result<Self, String> {
        let entries: Vec<RegionEntry> = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let mut regions = HashMap::with_capacity(entries.len());
        for entry in entries {
            if entry.region.x + entry.region.width > texture.width()
                || entry.region.y + entry.region.height > texture.height()
            {
                log::warn!("sprite region '{}' extends past the atlas", entry.name);
            }
            regions.insert(entry.name, entry.region);
        }
        Ok(Self::new(texture, regions))
    }

    /// Load a region manifest from a JSON file
    pub fn load(texture: Texture, path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::from_json(texture, &json)
    }

    pub fn insert(&mut self, name: impl Into<String>, region: SpriteRegion) {
        self.regions.insert(name.into(), region);
    }

    pub fn region(&self, name: &str) -> Option<SpriteRegion> {
        self.regions.get(name).copied()
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
