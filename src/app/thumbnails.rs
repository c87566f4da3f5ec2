//! Product image loading
//!
//! `image_src` is either an http(s) URL or a file path. Remote images are
//! downloaded once into `<cache>/images` by a background prefetch; local
//! paths are read in place, relative ones against the data directory.

use super::App;
use crate::constants::IMAGE_FETCH_CONCURRENCY;
use crate::db::Shoe;
use eframe::egui;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub(crate) enum ImageError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Cache paths with a download running. Shared with the fetch tasks so a
/// reload never queues a second download into the same file.
#[derive(Debug, Clone, Default)]
pub(crate) struct InFlight(Arc<Mutex<HashSet<PathBuf>>>);

impl InFlight {
    /// False if another task already holds `path`
    pub(crate) fn claim(&self, path: &Path) -> bool {
        match self.0.lock() {
            Ok(mut paths) => paths.insert(path.to_path_buf()),
            Err(_) => false,
        }
    }

    pub(crate) fn release(&self, path: &Path) {
        if let Ok(mut paths) = self.0.lock() {
            paths.remove(path);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ImageSource {
    Remote { url: String, cache_path: PathBuf },
    Local(PathBuf),
}

pub(crate) fn resolve_image_source(
    image_src: &str,
    slug: &str,
    data_dir: &Path,
    cache_dir: &Path,
) -> ImageSource {
    if image_src.starts_with("http://") || image_src.starts_with("https://") {
        return ImageSource::Remote {
            url: image_src.to_string(),
            cache_path: cache_dir.join("images").join(format!("{}.img", slug)),
        };
    }
    let path = Path::new(image_src);
    if path.is_absolute() {
        ImageSource::Local(path.to_path_buf())
    } else {
        ImageSource::Local(data_dir.join(path))
    }
}

impl App {
    pub fn start_image_prefetch(&mut self, ctx: &egui::Context) {
        let pending: Vec<(String, PathBuf)> = self
            .shoes
            .iter()
            .filter_map(|s| match self.image_source(s) {
                ImageSource::Remote { url, cache_path }
                    if !cache_path.exists() && self.in_flight.claim(&cache_path) =>
                {
                    Some((url, cache_path))
                }
                _ => None,
            })
            .collect();

        if pending.is_empty() {
            return;
        }
        debug!(count = pending.len(), "Starting image prefetch");

        let ctx = ctx.clone();
        let in_flight = self.in_flight.clone();
        self.runtime.spawn(async move {
            let client = reqwest::Client::new();
            let semaphore = std::sync::Arc::new(tokio::sync::Semaphore::new(IMAGE_FETCH_CONCURRENCY));

            let handles: Vec<_> = pending
                .into_iter()
                .map(|(url, cache_path)| {
                    let sem = semaphore.clone();
                    let client = client.clone();
                    let ctx = ctx.clone();
                    let in_flight = in_flight.clone();
                    tokio::spawn(async move {
                        let _permit = sem.acquire().await.ok();
                        let result = fetch_image(&client, &url, &cache_path).await;
                        in_flight.release(&cache_path);
                        match result {
                            Ok(()) => ctx.request_repaint(),
                            Err(e) => warn!(url = %url, error = %e, "Image download failed"),
                        }
                    })
                })
                .collect();

            futures::future::join_all(handles).await;
        });
    }

    pub(crate) fn image_source(&self, shoe: &Shoe) -> ImageSource {
        resolve_image_source(&shoe.image_src, &shoe.slug, &self.data_dir, &self.cache_dir)
    }

    /// Texture for a shoe's image, decoding it on first use.
    /// Returns `None` while a remote image is still downloading.
    pub fn load_image(&mut self, ctx: &egui::Context, shoe: &Shoe) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.image_cache.get(&shoe.slug) {
            return cached.clone();
        }

        let (path, remote) = match self.image_source(shoe) {
            ImageSource::Remote { cache_path, .. } => (cache_path, true),
            ImageSource::Local(path) => (path, false),
        };

        if !path.exists() {
            if !remote {
                debug!(slug = %shoe.slug, path = %path.display(), "Image file not found");
                self.image_cache.insert(shoe.slug.clone(), None);
            }
            return None;
        }

        let texture = match decode_image(&path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();
                Some(ctx.load_texture(
                    format!("shoe-{}", shoe.slug),
                    egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
                    egui::TextureOptions::LINEAR,
                ))
            }
            Err(e) => {
                warn!(slug = %shoe.slug, path = %path.display(), error = %e, "Failed to decode image");
                None
            }
        };
        self.image_cache.insert(shoe.slug.clone(), texture.clone());
        texture
    }
}

fn decode_image(path: &Path) -> Result<image::DynamicImage, ImageError> {
    let bytes = std::fs::read(path)?;
    Ok(image::load_from_memory(&bytes)?)
}

async fn fetch_image(client: &reqwest::Client, url: &str, cache_path: &Path) -> Result<(), ImageError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ImageError::Status(response.status()));
    }
    let bytes = response.bytes().await?;
    // Write then rename so a half-written file is never decoded
    let partial = cache_path.with_extension("part");
    tokio::fs::write(&partial, &bytes).await?;
    tokio::fs::rename(&partial, cache_path).await?;
    Ok(())
}
