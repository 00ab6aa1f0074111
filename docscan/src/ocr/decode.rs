use image::{GenericImageView, ImageFormat, ImageReader, RgbImage};

use crate::error::{DocscanError, Result};

/// An uploaded image decoded into an RGB pixel grid.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: RgbImage,
    /// MIME type sniffed from the magic bytes, if recognised.
    pub mime_type: Option<&'static str>,
}

impl DecodedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

/// Decode raw upload bytes (PNG, JPEG, WebP, ...) into RGB.
///
/// Alpha is dropped and grayscale is expanded; no other processing is applied.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    if bytes.is_empty() {
        return Err(DocscanError::Decode("empty payload".to_string()));
    }

    let mime_type = infer::get(bytes).map(|kind| kind.mime_type());

    let reader = ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DocscanError::Decode(format!("failed to read image: {e}")))?;

    if reader.format().is_none() {
        return Err(DocscanError::Decode(format!(
            "unrecognised image format{}",
            mime_type
                .map(|m| format!(" (detected {m})"))
                .unwrap_or_default()
        )));
    }

    let img = reader
        .decode()
        .map_err(|e| DocscanError::Decode(format!("failed to decode image: {e}")))?;

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(DocscanError::Decode(format!(
            "image has no pixels: {width}x{height}"
        )));
    }

    Ok(DecodedImage {
        pixels: img.to_rgb8(),
        mime_type,
    })
}

/// Encode an RGB grid as PNG, the form handed to Tesseract.
pub fn encode_png(pixels: &RgbImage) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    pixels
        .write_to(&mut std::io::Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|e| DocscanError::Internal(format!("Failed to encode image: {e}")))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, Rgba, RgbaImage};

    fn png_bytes(img: DynamicImage) -> Vec<u8> {
        let mut out = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn decodes_png_to_rgb() {
        let img = RgbImage::from_pixel(8, 4, Rgb([10, 20, 30]));
        let decoded = decode_image(&png_bytes(DynamicImage::ImageRgb8(img))).unwrap();
        assert_eq!(decoded.dimensions(), (8, 4));
        assert_eq!(decoded.mime_type, Some("image/png"));
        assert_eq!(decoded.pixels.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn drops_alpha_channel() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 0]));
        let decoded = decode_image(&png_bytes(DynamicImage::ImageRgba8(img))).unwrap();
        assert_eq!(decoded.pixels.get_pixel(1, 1), &Rgb([200, 100, 50]));
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(matches!(decode_image(&[]), Err(DocscanError::Decode(_))));
    }

    #[test]
    fn rejects_non_image_bytes() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(DocscanError::Decode(_))));
    }

    #[test]
    fn rejects_truncated_png() {
        let img = RgbImage::from_pixel(16, 16, Rgb([0, 0, 0]));
        let bytes = png_bytes(DynamicImage::ImageRgb8(img));
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(decode_image(truncated), Err(DocscanError::Decode(_))));
    }

    #[test]
    fn png_roundtrip_preserves_dimensions() {
        let img = RgbImage::from_pixel(5, 7, Rgb([1, 2, 3]));
        let encoded = encode_png(&img).unwrap();
        let decoded = decode_image(&encoded).unwrap();
        assert_eq!(decoded.dimensions(), (5, 7));
    }
}
