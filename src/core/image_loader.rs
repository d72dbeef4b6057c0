//! Background file-to-embedded-image reads.
//!
//! Picking an image in a form spawns a read on a worker thread; the result
//! comes back through a channel and is applied to form state on the next UI
//! frame. A generation counter cancels stale reads: cancelling a form bumps
//! the generation, and results carrying an older generation are dropped
//! instead of being applied retroactively.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, warn};

/// Upper bound on accepted image files (matches the original uploader limit).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// An image embedded as a base64 `data:` URL, safe to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub mime: &'static str,
    pub data_url: String,
}

/// Result of one background read, tagged with the generation it belongs to.
#[derive(Debug, Clone)]
pub struct ImageReadResult {
    pub generation: u64,
    pub field: String,
    pub outcome: Result<EmbeddedImage, String>,
}

/// Spawns image reads and collects their results.
pub struct ImageLoader {
    tx: Sender<ImageReadResult>,
    rx: Receiver<ImageReadResult>,
    generation: u64,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx, generation: 0 }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate all in-flight reads. Their results will be discarded.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Start reading `path` into an embedded data-URL for `field`.
    pub fn request(&self, field: &str, path: PathBuf) {
        let tx = self.tx.clone();
        let generation = self.generation;
        let field = field.to_string();
        thread::spawn(move || {
            let outcome = read_embedded_image(&path, MAX_IMAGE_BYTES);
            debug!(
                "Image read for '{}' finished (gen {}): {}",
                field,
                generation,
                if outcome.is_ok() { "ok" } else { "error" }
            );
            // Receiver may be gone if the app shut down; nothing to do then.
            let _ = tx.send(ImageReadResult { generation, field, outcome });
        });
    }

    /// Drain finished reads, dropping results from invalidated generations.
    pub fn poll(&self) -> Vec<ImageReadResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            if result.generation == self.generation {
                results.push(result);
            } else {
                debug!("Dropping stale image read for '{}'", result.field);
            }
        }
        results
    }

    #[cfg(test)]
    fn recv_timeout(&self, timeout: std::time::Duration) -> Option<ImageReadResult> {
        loop {
            match self.rx.recv_timeout(timeout) {
                Ok(result) if result.generation == self.generation => return Some(result),
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
    }
}

/// Read a file and embed it as a base64 `data:` URL.
///
/// Fails with a user-facing message when the file exceeds `max_bytes` or is
/// not a recognized image format; the size check runs before the read so an
/// oversized pick never gets buffered.
pub fn read_embedded_image(path: &Path, max_bytes: u64) -> Result<EmbeddedImage, String> {
    let meta = fs::metadata(path).map_err(|e| format!("Cannot read file: {}", e))?;
    if meta.len() > max_bytes {
        let limit_mb = max_bytes as f64 / (1024.0 * 1024.0);
        return Err(format!(
            "File size exceeds {:.0} MB. Please choose a smaller image.",
            limit_mb
        ));
    }

    let bytes = fs::read(path).map_err(|e| format!("Cannot read file: {}", e))?;
    let mime = match image::guess_format(&bytes) {
        Ok(format) => mime_for(format),
        Err(_) => {
            warn!("Unrecognized image data in {}", path.display());
            return Err("Unrecognized image format".to_string());
        }
    };

    let data_url = format!("data:{};base64,{}", mime, BASE64.encode(&bytes));
    Ok(EmbeddedImage { mime, data_url })
}

fn mime_for(format: image::ImageFormat) -> &'static str {
    use image::ImageFormat;
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Decode the base64 payload of an embedded data-URL (for previews).
pub fn decode_data_url(data_url: &str) -> Option<Vec<u8>> {
    let payload = data_url.split_once(";base64,")?.1;
    BASE64.decode(payload).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Smallest well-formed PNG: signature + IHDR for a 1x1 image.
    const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89,
    ];

    fn temp_file(tag: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join("chalkbook_image_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}_{}.png", tag, std::process::id()));
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_read_produces_png_data_url() {
        let path = temp_file("ok", TINY_PNG);
        let embedded = read_embedded_image(&path, MAX_IMAGE_BYTES).unwrap();
        assert_eq!(embedded.mime, "image/png");
        assert!(embedded.data_url.starts_with("data:image/png;base64,"));
        // Payload decodes back to the original bytes
        assert_eq!(decode_data_url(&embedded.data_url).unwrap(), TINY_PNG);
    }

    #[test]
    fn test_oversized_file_is_rejected_with_size_error() {
        let path = temp_file("big", TINY_PNG);
        let err = read_embedded_image(&path, 8).unwrap_err();
        assert!(err.contains("exceeds"), "unexpected message: {}", err);
    }

    #[test]
    fn test_non_image_bytes_are_rejected() {
        let path = temp_file("text", b"definitely not an image");
        assert!(read_embedded_image(&path, MAX_IMAGE_BYTES).is_err());
    }

    #[test]
    fn test_loader_delivers_result_for_current_generation() {
        let path = temp_file("deliver", TINY_PNG);
        let loader = ImageLoader::new();
        loader.request("image", path);
        let result = loader.recv_timeout(Duration::from_secs(5)).expect("read finished");
        assert_eq!(result.field, "image");
        assert!(result.outcome.is_ok());
    }

    #[test]
    fn test_invalidated_read_is_discarded() {
        let path = temp_file("stale", TINY_PNG);
        let mut loader = ImageLoader::new();
        loader.request("image", path);
        loader.invalidate();
        // The in-flight result carries the old generation and must be dropped.
        assert!(loader.recv_timeout(Duration::from_secs(5)).is_none());
        assert!(loader.poll().is_empty());
    }

    #[test]
    fn test_decode_data_url_rejects_plain_urls() {
        assert_eq!(decode_data_url("https://example.com/pic.png"), None);
    }
}
