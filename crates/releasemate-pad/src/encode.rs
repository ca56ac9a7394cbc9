//! Raster → `data:` URL export.

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use image::{
  ExtendedColorType, ImageEncoder, RgbaImage,
  codecs::{jpeg::JpegEncoder, png::PngEncoder},
};
use releasemate_core::signature::Signature;

use crate::Result;

/// Default lossy quality, matching a canvas export at `0.8`.
pub const DEFAULT_QUALITY: u8 = 80;

/// Output image format.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageFormat {
  /// Lossy; flattened onto white because JPEG has no alpha channel.
  Jpeg { quality: u8 },
  /// Lossless with transparency.
  Png,
}

impl Default for ImageFormat {
  fn default() -> Self { Self::Jpeg { quality: DEFAULT_QUALITY } }
}

/// How a surface exports its raster.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
  pub format: ImageFormat,
}

impl EncodeOptions {
  pub fn jpeg(quality: u8) -> Self {
    Self { format: ImageFormat::Jpeg { quality: quality.clamp(1, 100) } }
  }

  pub fn png() -> Self { Self { format: ImageFormat::Png } }
}

/// Encode `pixels` as a base64 `data:` URL.
pub(crate) fn encode(pixels: &RgbaImage, options: EncodeOptions) -> Result<Signature> {
  let (width, height) = pixels.dimensions();
  let mut bytes = Vec::new();

  let media_type = match options.format {
    ImageFormat::Jpeg { quality } => {
      let rgb = flatten_onto_white(pixels);
      JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).write_image(
        &rgb,
        width,
        height,
        ExtendedColorType::Rgb8,
      )?;
      "image/jpeg"
    }
    ImageFormat::Png => {
      PngEncoder::new(&mut bytes).write_image(
        pixels.as_raw(),
        width,
        height,
        ExtendedColorType::Rgba8,
      )?;
      "image/png"
    }
  };

  Ok(Signature::from_encoded(format!(
    "data:{media_type};base64,{}",
    B64.encode(&bytes)
  )))
}

/// Composite straight-alpha RGBA over an opaque white background.
fn flatten_onto_white(pixels: &RgbaImage) -> Vec<u8> {
  let mut out = Vec::with_capacity(pixels.as_raw().len() / 4 * 3);
  for px in pixels.pixels() {
    let [r, g, b, a] = px.0;
    let a = u16::from(a);
    for c in [r, g, b] {
      let blended = (u16::from(c) * a + 255 * (255 - a) + 127) / 255;
      out.push(blended as u8);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use image::Rgba;

  use super::*;

  fn decode(sig: &Signature) -> image::DynamicImage {
    let (_, b64) = sig.as_str().split_once(";base64,").unwrap();
    let bytes = B64.decode(b64).unwrap();
    image::load_from_memory(&bytes).unwrap()
  }

  #[test]
  fn jpeg_is_the_default() {
    let img = RgbaImage::new(8, 4);
    let sig = encode(&img, EncodeOptions::default()).unwrap();
    assert_eq!(sig.media_type(), Some("image/jpeg"));
    assert_eq!(decode(&sig).width(), 8);
  }

  #[test]
  fn png_keeps_transparency() {
    let mut img = RgbaImage::new(4, 4);
    img.put_pixel(1, 1, Rgba([0, 0, 0, 255]));
    let sig = encode(&img, EncodeOptions::png()).unwrap();
    assert_eq!(sig.media_type(), Some("image/png"));

    let back = decode(&sig).to_rgba8();
    assert_eq!(back.get_pixel(0, 0).0[3], 0);
    assert_eq!(back.get_pixel(1, 1).0, [0, 0, 0, 255]);
  }

  #[test]
  fn flatten_turns_transparent_white_and_ink_black() {
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
    assert_eq!(flatten_onto_white(&img), vec![255, 255, 255, 0, 0, 0]);
  }
}
