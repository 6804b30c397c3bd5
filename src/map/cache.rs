//! Texture cache for fetched map tiles.
//!
//! Decoded tile images are uploaded once as egui textures and reused every
//! frame. Keys carry the owning layer's revision so recreating a layer
//! (a new request timestamp) invalidates its tiles.

use std::collections::HashMap;

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

use super::tiles::TileId;

/// Cache key: which layer build the tile belongs to, and which tile.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TileKey {
    /// Layer revision from the stack; bumped on every layer rebuild.
    pub revision: u64,
    pub tile: TileId,
}

/// Upper bound on cached textures before the cache is cleared.
const MAX_TILES: usize = 512;

/// Texture cache for map tiles.
#[derive(Default)]
pub struct TileTextureCache {
    textures: HashMap<TileKey, TextureHandle>,
}

impl TileTextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &TileKey) -> Option<&TextureHandle> {
        self.textures.get(key)
    }

    /// Upload a decoded tile and cache its texture.
    pub fn insert(&mut self, ctx: &egui::Context, key: TileKey, image: ColorImage) {
        if self.textures.len() >= MAX_TILES {
            log::debug!("Tile texture cache full, clearing {} entries", self.textures.len());
            self.textures.clear();
        }

        let texture = ctx.load_texture(
            format!("tile_{}_{}_{}_{}", key.revision, key.tile.z, key.tile.x, key.tile.y),
            image,
            TextureOptions {
                magnification: egui::TextureFilter::Linear,
                minification: egui::TextureFilter::Linear,
                ..Default::default()
            },
        );
        self.textures.insert(key, texture);
    }

    /// Drops tiles belonging to layer revisions no longer in use.
    pub fn retain_revisions(&mut self, live: &[u64]) {
        self.textures.retain(|key, _| live.contains(&key.revision));
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
