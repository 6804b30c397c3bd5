//! Production layer stack drawn by the map canvas.

use std::collections::HashMap;

use super::{LayerHandle, LayerSpec, TileMap};

/// Ordered collection of layers. The canvas draws entries bottom-up, so
/// position in `order` is z-order.
#[derive(Default)]
pub struct MapLayerStack {
    next_id: u64,
    /// Every created layer, on the map or not.
    layers: HashMap<LayerHandle, StackLayer>,
    /// Handles currently on the map, bottom first.
    order: Vec<LayerHandle>,
}

pub struct StackLayer {
    pub spec: LayerSpec,
    /// Bumped whenever the layer is recreated, to invalidate cached tiles.
    pub revision: u64,
}

impl MapLayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible layers bottom-up, for drawing.
    pub fn visible(&self) -> impl Iterator<Item = (LayerHandle, &StackLayer)> {
        self.order.iter().map(|h| (*h, &self.layers[h]))
    }

    pub fn get(&self, handle: LayerHandle) -> Option<&StackLayer> {
        self.layers.get(&handle)
    }

    /// Number of layers held, on the map or not.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

impl TileMap for MapLayerStack {
    fn create_tile_layer(&mut self, spec: LayerSpec) -> Result<LayerHandle, String> {
        self.next_id += 1;
        let handle = LayerHandle(self.next_id);
        self.layers.insert(
            handle,
            StackLayer {
                spec,
                revision: self.next_id,
            },
        );
        Ok(handle)
    }

    fn add_to_map(&mut self, handle: LayerHandle) {
        if !self.layers.contains_key(&handle) {
            log::warn!("Ignoring add of unknown layer handle {:?}", handle);
            return;
        }
        if !self.order.contains(&handle) {
            self.order.push(handle);
        }
    }

    fn remove_from_map(&mut self, handle: LayerHandle) {
        self.order.retain(|h| *h != handle);
    }

    fn destroy_layer(&mut self, handle: LayerHandle) {
        self.order.retain(|h| *h != handle);
        self.layers.remove(&handle);
    }

    fn bring_to_front(&mut self, handle: LayerHandle) {
        if let Some(pos) = self.order.iter().position(|h| *h == handle) {
            let h = self.order.remove(pos);
            self.order.push(h);
        }
    }

    fn is_on_map(&self, handle: LayerHandle) -> bool {
        self.order.contains(&handle)
    }
}
