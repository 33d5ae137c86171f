//! Image payload codecs.
//!
//! The backend ships the canvas as a PNG data URL; snapshots travel the
//! other way (save dialog, clipboard) as PNG bytes.

use crate::RenderError;
use easel_core::RasterImage;
use easel_core::protocol::{make_data_url, parse_data_url};

/// Decode a backend `data:image/...;base64,` payload into a bitmap.
pub fn decode_data_url(url: &str) -> Result<RasterImage, RenderError> {
    let (mime, bytes) = parse_data_url(url)?;
    if !mime.starts_with("image/") {
        return Err(RenderError::UnsupportedMime(mime));
    }
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| RenderError::Decode(e.to_string()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    RasterImage::from_rgba8(width, height, decoded.into_raw())
        .ok_or_else(|| RenderError::Decode("decoded buffer has wrong length".into()))
}

/// Encode a bitmap as PNG bytes.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    writer
        .write_image_data(image.pixels())
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(out)
}

/// Encode a bitmap as a PNG data URL, the same form the backend uses.
pub fn encode_data_url(image: &RasterImage) -> Result<String, RenderError> {
    Ok(make_data_url("image/png", &encode_png(image)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::Rgba;

    #[test]
    fn test_png_roundtrip() {
        let mut original = RasterImage::filled(3, 2, Rgba::white());
        original.set_pixel(1, 1, Rgba::new(10, 20, 30, 255));

        let bytes = encode_png(&original).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [10, 20, 30, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_data_url_roundtrip() {
        let mut original = RasterImage::filled(4, 4, Rgba::black());
        original.set_pixel(2, 3, Rgba::new(200, 100, 50, 255));

        let url = encode_data_url(&original).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let decoded = decode_data_url(&url).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_rejects_non_image() {
        let url = make_data_url("text/plain", b"hello");
        assert!(matches!(
            decode_data_url(&url),
            Err(RenderError::UnsupportedMime(_))
        ));
    }

    #[test]
    fn test_decode_rejects_garbage_payload() {
        let url = make_data_url("image/png", b"not a png");
        assert!(matches!(decode_data_url(&url), Err(RenderError::Decode(_))));
    }
}
