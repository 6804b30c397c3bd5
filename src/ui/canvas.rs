//! Central canvas UI: the slippy map.
//!
//! Draws the layer stack bottom-up: tile layers as cached textures,
//! vector overlays on top. Pan and zoom manipulate a Web Mercator view.

use crate::geo::{BorderSet, BORDERS_ATTRIBUTION, COUNTRY_LABELS};
use crate::map::cache::{TileKey, TileTextureCache};
use crate::map::fetch::{TileFetchChannel, TileRequest};
use crate::map::stack::MapLayerStack;
use crate::map::tiles::{self, fractional_tile, TileId};
use crate::map::LayerSpec;
use eframe::egui::{self, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

const MIN_ZOOM: f64 = 2.0;
const MAX_ZOOM: f64 = 15.0;

/// Web Mercator viewport over the map.
pub struct MapView {
    pub center_lon: f64,
    pub center_lat: f64,
    /// Fractional zoom level; tiles are fetched at the nearest integer.
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        // Initial view over Anatolia, matching the imagery coverage.
        Self {
            center_lon: 35.0,
            center_lat: 40.0,
            zoom: 6.0,
        }
    }
}

impl MapView {
    /// World size in pixels at the current zoom.
    fn scale(&self) -> f64 {
        256.0 * self.zoom.exp2()
    }

    /// Absolute world-pixel position of a coordinate.
    fn world_px(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (fx, fy) = fractional_tile(lon, lat, 0);
        (fx * self.scale(), fy * self.scale())
    }

    pub fn geo_to_screen(&self, rect: Rect, lon: f64, lat: f64) -> Pos2 {
        let (cx, cy) = self.world_px(self.center_lon, self.center_lat);
        let (px, py) = self.world_px(lon, lat);
        Pos2::new(
            rect.center().x + (px - cx) as f32,
            rect.center().y + (py - cy) as f32,
        )
    }

    pub fn screen_to_geo(&self, rect: Rect, pos: Pos2) -> (f64, f64) {
        let (cx, cy) = self.world_px(self.center_lon, self.center_lat);
        let wx = cx + (pos.x - rect.center().x) as f64;
        let wy = cy + (pos.y - rect.center().y) as f64;
        world_px_to_geo(wx, wy, self.scale())
    }

    fn pan_pixels(&mut self, delta: Vec2) {
        let (cx, cy) = self.world_px(self.center_lon, self.center_lat);
        let (lon, lat) = world_px_to_geo(cx - delta.x as f64, cy - delta.y as f64, self.scale());
        self.center_lon = lon;
        self.center_lat = lat;
    }

    /// Zooms while keeping the geographic point under `pos` fixed.
    fn zoom_about(&mut self, rect: Rect, pos: Pos2, delta: f64) {
        let (anchor_lon, anchor_lat) = self.screen_to_geo(rect, pos);
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);

        let (ax, ay) = self.world_px(anchor_lon, anchor_lat);
        let wx = ax - (pos.x - rect.center().x) as f64;
        let wy = ay - (pos.y - rect.center().y) as f64;
        let (lon, lat) = world_px_to_geo(wx, wy, self.scale());
        self.center_lon = lon;
        self.center_lat = lat;
    }

    fn tile_zoom(&self) -> u8 {
        self.zoom.round().clamp(MIN_ZOOM, MAX_ZOOM) as u8
    }
}

fn world_px_to_geo(wx: f64, wy: f64, scale: f64) -> (f64, f64) {
    let fx = wx / scale;
    let fy = (wy / scale).clamp(0.0, 1.0);
    let lon = fx * 360.0 - 180.0;
    let lat = (std::f64::consts::PI * (1.0 - 2.0 * fy)).sinh().atan().to_degrees();
    (lon, lat)
}

#[allow(clippy::too_many_arguments)]
pub fn render_canvas(
    ctx: &egui::Context,
    view: &mut MapView,
    stack: &MapLayerStack,
    cache: &mut TileTextureCache,
    fetch: &mut TileFetchChannel,
    borders: Option<&BorderSet>,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
            let rect = response.rect;

            painter.rect_filled(rect, 0.0, Color32::from_rgb(15, 20, 30));

            let mut attributions: Vec<&str> = Vec::new();

            for (_, layer) in stack.visible() {
                match &layer.spec {
                    LayerSpec::Basemap(basemap) => {
                        let b = *basemap;
                        draw_tile_layer(ctx, &painter, rect, view, layer.revision, cache, fetch, |t| {
                            tiles::basemap_tile_url(b, t)
                        });
                        attributions.push(b.attribution());
                    }
                    LayerSpec::Imagery { source, time } => {
                        let service = source.tile_service();
                        draw_tile_layer(ctx, &painter, rect, view, layer.revision, cache, fetch, |t| {
                            tiles::source_tile_url(service, time, t)
                        });
                        attributions.push(source.attribution());
                    }
                    LayerSpec::Overlay(crate::state::OverlayLayer::CountryBorders) => {
                        if let Some(set) = borders {
                            draw_borders(&painter, rect, view, set);
                            attributions.push(BORDERS_ATTRIBUTION);
                        }
                    }
                    LayerSpec::Overlay(crate::state::OverlayLayer::CountryLabels) => {
                        draw_labels(&painter, rect, view);
                    }
                }
            }

            draw_attribution(&painter, rect, &attributions);

            // Pan with drag, zoom toward the cursor with scroll.
            if response.dragged() {
                view.pan_pixels(response.drag_delta());
            }
            if response.hovered() {
                let scroll = ui.input(|i| i.raw_scroll_delta);
                if scroll.y != 0.0 {
                    let pos = response.hover_pos().unwrap_or_else(|| rect.center());
                    view.zoom_about(rect, pos, scroll.y as f64 / 200.0);
                }
            }
        });
}

/// Draws one tile layer, fetching any tiles missing from the cache.
#[allow(clippy::too_many_arguments)]
fn draw_tile_layer(
    ctx: &egui::Context,
    painter: &Painter,
    rect: Rect,
    view: &MapView,
    revision: u64,
    cache: &mut TileTextureCache,
    fetch: &mut TileFetchChannel,
    url_for: impl Fn(TileId) -> String,
) {
    let z = view.tile_zoom();
    let n = TileId::tiles_across(z) as i64;
    let tile_px = view.scale() / n as f64;

    // Fractional tile position of the view center at this zoom.
    let (cfx, cfy) = fractional_tile(view.center_lon, view.center_lat, z);

    let half_w = rect.width() as f64 / 2.0;
    let half_h = rect.height() as f64 / 2.0;
    let x_min = (cfx - half_w / tile_px).floor() as i64;
    let x_max = (cfx + half_w / tile_px).floor() as i64;
    let y_min = ((cfy - half_h / tile_px).floor() as i64).max(0);
    let y_max = ((cfy + half_h / tile_px).floor() as i64).min(n - 1);

    for ty in y_min..=y_max {
        for tx in x_min..=x_max {
            // Horizontal wrap-around; the raw index keeps screen placement.
            let tile = TileId {
                z,
                x: tx.rem_euclid(n) as u32,
                y: ty as u32,
            };
            let key = TileKey { revision, tile };

            let left = rect.center().x as f64 + (tx as f64 - cfx) * tile_px;
            let top = rect.center().y as f64 + (ty as f64 - cfy) * tile_px;
            let tile_rect = Rect::from_min_size(
                Pos2::new(left as f32, top as f32),
                Vec2::splat(tile_px as f32),
            );
            if !tile_rect.intersects(rect) {
                continue;
            }

            if let Some(texture) = cache.get(&key) {
                painter.image(
                    texture.id(),
                    tile_rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            } else if !fetch.is_pending(&key) {
                fetch.fetch_tile(
                    ctx.clone(),
                    TileRequest {
                        key,
                        url: url_for(tile),
                    },
                );
            }
        }
    }
}

fn draw_borders(painter: &Painter, rect: Rect, view: &MapView, set: &BorderSet) {
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(230, 230, 240, 160));
    for feature in &set.features {
        for line in &feature.lines {
            if line.len() < 2 {
                continue;
            }
            let points: Vec<Pos2> = line
                .iter()
                .map(|c| view.geo_to_screen(rect, c.x, c.y))
                .collect();
            // Skip features entirely outside the viewport.
            if points
                .iter()
                .all(|p| !rect.expand(64.0).contains(*p))
            {
                continue;
            }
            painter.add(egui::Shape::line(points, stroke));
        }
    }
}

fn draw_labels(painter: &Painter, rect: Rect, view: &MapView) {
    for label in COUNTRY_LABELS {
        let pos = view.geo_to_screen(rect, label.lon, label.lat);
        if !rect.contains(pos) {
            continue;
        }
        painter.text(
            pos,
            egui::Align2::CENTER_CENTER,
            label.name,
            FontId::proportional(11.0),
            Color32::from_rgba_unmultiplied(255, 255, 255, 200),
        );
    }
}

fn draw_attribution(painter: &Painter, rect: Rect, attributions: &[&str]) {
    if attributions.is_empty() {
        return;
    }
    let text = attributions.join("  |  ");
    painter.text(
        rect.right_bottom() - Vec2::new(6.0, 4.0),
        egui::Align2::RIGHT_BOTTOM,
        text,
        FontId::proportional(9.0),
        Color32::from_rgba_unmultiplied(255, 255, 255, 170),
    );
}
