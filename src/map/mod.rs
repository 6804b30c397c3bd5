//! Map rendering collaborators.
//!
//! The layer coordinator drives everything through the `TileMap` trait so
//! its exclusivity and stacking logic can be tested against a recording
//! mock without a live map.

pub mod cache;
pub mod coordinator;
pub mod fetch;
pub mod stack;
pub mod tiles;

use crate::sources::DataSource;
use crate::state::{Basemap, OverlayLayer};

/// What a map layer draws.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LayerSpec {
    /// A basemap tile layer, always at the bottom.
    Basemap(Basemap),
    /// Time-indexed satellite imagery tiles.
    Imagery {
        source: DataSource,
        /// The source-specific request timestamp baked into tile URLs.
        time: String,
    },
    /// A geographic vector overlay.
    Overlay(OverlayLayer),
}

/// Opaque identifier for a created layer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct LayerHandle(pub(crate) u64);

/// The rendering surface the coordinator manipulates.
///
/// Z-order is insertion order; `bring_to_front` moves a layer to the top.
/// `remove_from_map` hides a layer but keeps it for a later re-add;
/// `destroy_layer` releases it for good.
pub trait TileMap {
    fn create_tile_layer(&mut self, spec: LayerSpec) -> Result<LayerHandle, String>;
    fn add_to_map(&mut self, handle: LayerHandle);
    fn remove_from_map(&mut self, handle: LayerHandle);
    fn destroy_layer(&mut self, handle: LayerHandle);
    fn bring_to_front(&mut self, handle: LayerHandle);
    fn is_on_map(&self, handle: LayerHandle) -> bool;
}
