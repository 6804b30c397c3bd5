#![warn(clippy::all)]

//! SatView - A web-based satellite imagery viewer.
//!
//! This application renders meteorological satellite imagery on a slippy
//! map with a shared observation time: every imagery layer shows the same
//! moment, and stepping or playing the clock re-requests tiles for all
//! active layers.

mod geo;
mod map;
mod sources;
mod state;
mod ui;

use eframe::egui;
use geo::BorderSet;
use map::cache::TileTextureCache;
use map::coordinator::LayerCoordinator;
use map::fetch::{FetchResult, TileFetchChannel};
use map::stack::MapLayerStack;
use state::{AppState, PlaybackTick};
use ui::MapView;

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "SatView",
        native_options,
        Box::new(|cc| Ok(Box::new(SatviewApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(SatviewApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct SatviewApp {
    /// Application state containing all sub-states
    state: AppState,

    /// Viewport over the map
    view: MapView,

    /// Ordered layer stack rendered by the canvas
    stack: MapLayerStack,

    /// Keeps the stack consistent with layer visibility and the clock
    coordinator: LayerCoordinator,

    /// Uploaded tile textures, keyed by layer revision and tile address
    tile_cache: TileTextureCache,

    /// Channel for async tile and border downloads
    fetch: TileFetchChannel,

    /// Country border polylines, once downloaded
    borders: Option<BorderSet>,
}

impl SatviewApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let state = AppState::new();
        let mut stack = MapLayerStack::default();
        let mut coordinator = LayerCoordinator::new();
        coordinator.init(&mut stack, &state.layers);

        let fetch = TileFetchChannel::new();
        fetch.fetch_borders(cc.egui_ctx.clone(), geo::BORDERS_URL.to_string());

        Self {
            state,
            view: MapView::default(),
            stack,
            coordinator,
            tile_cache: TileTextureCache::default(),
            fetch,
            borders: None,
        }
    }

    /// Drains completed downloads into the texture cache and border set.
    fn process_fetch_results(&mut self, ctx: &egui::Context) {
        while let Some(result) = self.fetch.try_recv() {
            match result {
                FetchResult::Tile { key, image } => {
                    self.tile_cache.insert(ctx, key, image);
                }
                FetchResult::TileError { key, error } => {
                    log::debug!(
                        "Tile {}/{}/{} failed: {}",
                        key.tile.z,
                        key.tile.x,
                        key.tile.y,
                        error
                    );
                }
                FetchResult::Borders(geojson) => match BorderSet::from_geojson(&geojson) {
                    Ok(set) => self.borders = Some(set),
                    Err(e) => {
                        log::error!("Failed to parse border data: {}", e);
                        self.state.status_message = "Border data unavailable".to_string();
                    }
                },
                FetchResult::BordersError(error) => {
                    log::error!("Failed to download border data: {}", error);
                    self.state.status_message = "Border data unavailable".to_string();
                }
            }
        }
    }
}

impl eframe::App for SatviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = state::clock::now_utc();

        self.process_fetch_results(ctx);

        // A due playback tick moves the clock; hitting the future
        // boundary stops the loop.
        if self.state.playback.poll(&mut self.state.timeline, now) == PlaybackTick::Stopped {
            self.state.status_message = "Playback stopped at the latest frame".to_string();
        }
        if let Some(wait) = self.state.playback.time_until_tick() {
            ctx.request_repaint_after(wait);
        }

        // Re-request imagery whenever the effective time string changed.
        self.coordinator.sync_time(
            &mut self.stack,
            &self.state.layers,
            self.state.timeline.current(),
            now,
        );

        // Textures for layers no longer on the map are dropped.
        let live: Vec<u64> = self
            .stack
            .visible()
            .map(|(_, layer)| layer.revision)
            .collect();
        self.tile_cache.retain_revisions(&live);

        ui::render_top_bar(ctx, &mut self.state);
        ui::render_left_panel(ctx, &mut self.state, &mut self.coordinator, &mut self.stack);
        ui::render_bottom_panel(ctx, &mut self.state);
        ui::render_modals(ctx, &mut self.state);
        ui::render_canvas(
            ctx,
            &mut self.view,
            &self.stack,
            &mut self.tile_cache,
            &mut self.fetch,
            self.borders.as_ref(),
        );
    }
}
