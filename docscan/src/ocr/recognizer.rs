use image::RgbImage;
use serde::Serialize;

use crate::error::Result;

/// Pixel rectangle of a detected region, `(x0, y0)` inclusive top-left,
/// `(x1, y1)` exclusive bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoundingBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

/// One region as reported by a recognition engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRegion {
    pub bbox: BoundingBox,
    pub text: String,
    /// Engine certainty in `[0, 1]`.
    pub confidence: f64,
}

impl TextRegion {
    pub fn new(bbox: BoundingBox, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            bbox,
            text: text.into(),
            confidence,
        }
    }
}

/// A loaded text recognition engine.
///
/// Implementations are constructed once per process and shared across
/// requests. `recognize` is blocking and is always driven from
/// `spawn_blocking`; implementations that are not reentrant must serialise
/// access internally.
pub trait TextRecognizer: Send + Sync {
    /// Short engine identifier used in logs (e.g. `"tesseract"`).
    fn name(&self) -> &str;

    /// Detect and read text regions, returned in detection order.
    fn recognize(&self, image: &RgbImage) -> Result<Vec<TextRegion>>;
}
