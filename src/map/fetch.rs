//! Tile and GeoJSON fetch pipeline.
//!
//! Fetches are async but egui's update() is synchronous, so results come
//! back over a channel and are drained once per frame. On wasm the work
//! runs through the browser fetch API; natively a thread with a blocking
//! HTTP client does the same job.

use std::collections::HashSet;
use std::sync::mpsc::{channel, Receiver, Sender};

use eframe::egui;
use image::GenericImageView;

use super::cache::TileKey;

/// One outstanding tile request.
#[derive(Clone, Debug)]
pub struct TileRequest {
    pub key: TileKey,
    pub url: String,
}

/// A completed fetch, delivered through the channel.
pub enum FetchResult {
    /// Decoded tile pixels ready for texture upload.
    Tile {
        key: TileKey,
        image: egui::ColorImage,
    },
    TileError {
        key: TileKey,
        error: String,
    },
    /// Raw GeoJSON text for the country borders overlay.
    Borders(String),
    BordersError(String),
}

/// Channel-based fetcher bridging async downloads to the UI thread.
pub struct TileFetchChannel {
    sender: Sender<FetchResult>,
    receiver: Receiver<FetchResult>,
    /// Keys with a request in flight, to avoid duplicate fetches while a
    /// tile is pending.
    in_flight: HashSet<TileKey>,
}

impl Default for TileFetchChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl TileFetchChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            in_flight: HashSet::new(),
        }
    }

    pub fn is_pending(&self, key: &TileKey) -> bool {
        self.in_flight.contains(key)
    }

    /// Starts a tile fetch unless one is already pending for the key.
    pub fn fetch_tile(&mut self, ctx: egui::Context, request: TileRequest) {
        if !self.in_flight.insert(request.key) {
            return;
        }
        let sender = self.sender.clone();

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = match fetch_bytes(&request.url).await {
                Ok(bytes) => decode_tile(request.key, &bytes),
                Err(error) => FetchResult::TileError {
                    key: request.key,
                    error,
                },
            };
            let _ = sender.send(result);
            ctx.request_repaint();
        });

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let result = match fetch_bytes(&request.url) {
                Ok(bytes) => decode_tile(request.key, &bytes),
                Err(error) => FetchResult::TileError {
                    key: request.key,
                    error,
                },
            };
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Fetches the world borders GeoJSON once at startup.
    pub fn fetch_borders(&self, ctx: egui::Context, url: String) {
        let sender = self.sender.clone();

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = match fetch_bytes(&url).await {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => FetchResult::Borders(text),
                    Err(e) => FetchResult::BordersError(format!("Invalid UTF-8: {}", e)),
                },
                Err(error) => FetchResult::BordersError(error),
            };
            let _ = sender.send(result);
            ctx.request_repaint();
        });

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let result = match fetch_bytes(&url) {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => FetchResult::Borders(text),
                    Err(e) => FetchResult::BordersError(format!("Invalid UTF-8: {}", e)),
                },
                Err(error) => FetchResult::BordersError(error),
            };
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Non-blocking check for a completed fetch.
    pub fn try_recv(&mut self) -> Option<FetchResult> {
        let result = self.receiver.try_recv().ok()?;
        match &result {
            FetchResult::Tile { key, .. } | FetchResult::TileError { key, .. } => {
                self.in_flight.remove(key);
            }
            _ => {}
        }
        Some(result)
    }
}

/// Decodes downloaded tile bytes into an egui image.
fn decode_tile(key: TileKey, bytes: &[u8]) -> FetchResult {
    match image::load_from_memory(bytes) {
        Ok(img) => {
            let (w, h) = img.dimensions();
            let rgba = img.to_rgba8();
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [w as usize, h as usize],
                rgba.as_raw(),
            );
            FetchResult::Tile { key, image }
        }
        Err(e) => FetchResult::TileError {
            key,
            error: format!("Failed to decode tile: {}", e),
        },
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let opts = web_sys::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web_sys::RequestMode::Cors);

    let request = web_sys::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| format!("Failed to build request: {:?}", e))?;
    let window = web_sys::window().ok_or_else(|| "No window".to_string())?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("Fetch failed: {:?}", e))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| "Fetch did not return a Response".to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let buffer = JsFuture::from(
        response
            .array_buffer()
            .map_err(|e| format!("Failed to read body: {:?}", e))?,
    )
    .await
    .map_err(|e| format!("Failed to read body: {:?}", e))?;

    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let response = reqwest::blocking::get(url).map_err(|e| format!("Fetch failed: {}", e))?;
    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }
    let bytes = response
        .bytes()
        .map_err(|e| format!("Failed to read body: {}", e))?;
    Ok(bytes.to_vec())
}
