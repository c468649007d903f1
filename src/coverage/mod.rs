use std::path::PathBuf;

use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("failed to load frame {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// The render/capture collaborator: hands back the composited, masked and
/// cropped pixel buffer for one simulation minute.
pub trait FrameSource {
    fn capture(&mut self, minute: i64) -> Result<RgbaImage, FrameError>;
}

/// Frames pre-produced by the capture collaborator as `<minute>.png` files
/// in one directory.
pub struct PngFrameSource {
    dir: PathBuf,
}

impl PngFrameSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl FrameSource for PngFrameSource {
    fn capture(&mut self, minute: i64) -> Result<RgbaImage, FrameError> {
        let path = self.dir.join(format!("{minute}.png"));
        let img = image::open(&path).map_err(|source| FrameError::Load {
            path: path.clone(),
            source,
        })?;
        Ok(img.to_rgba8())
    }
}

/// Fraction of the region of interest covered by ground communications.
///
/// The frame convention: pure black pixels are uncovered ground, pixels
/// with a saturated blue channel (whatever the red/green values, which
/// shift where coverage circles overlap the map) are covered ground.
/// Everything else is outside the region. `None` when the frame contains
/// no ground at all.
pub fn area_coverage(frame: &RgbaImage) -> Option<f64> {
    let mut total = 0u64;
    let mut covered = 0u64;
    for pixel in frame.pixels() {
        let [r, g, b, _] = pixel.0;
        if r == 0 && g == 0 && b == 0 {
            total += 1;
        }
        if b == 255 {
            total += 1;
            covered += 1;
        }
    }
    if total == 0 {
        return None;
    }
    Some(covered as f64 / total as f64)
}
