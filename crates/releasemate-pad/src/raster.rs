//! The backing raster of a signature surface.
//!
//! Pixels are straight-alpha RGBA at device resolution. Strokes are drawn as
//! anti-aliased capsules (round caps); consecutive segments share endpoints,
//! which gives round joins. Coverage is combined with `max` rather than
//! source-over, so the overlap at a join never darkens.

use image::{Rgba, RgbaImage};

use crate::geometry::{Point, distance_to_segment};

/// Solid stroke parameters in surface units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct StrokeStyle {
  pub color: [u8; 3],
  pub width: f32,
}

pub(crate) struct Raster {
  pixels: RgbaImage,
  /// Device pixels per surface unit.
  scale:  f32,
}

impl Raster {
  /// Allocate a transparent raster. Returns `None` for an empty size.
  pub fn new(width: u32, height: u32, scale: f32) -> Option<Self> {
    if width == 0 || height == 0 {
      return None;
    }
    Some(Self { pixels: RgbaImage::new(width, height), scale })
  }

  pub fn width(&self) -> u32 { self.pixels.width() }

  pub fn height(&self) -> u32 { self.pixels.height() }

  pub fn pixels(&self) -> &RgbaImage { &self.pixels }

  pub fn clear(&mut self) {
    for px in self.pixels.pixels_mut() {
      *px = Rgba([0, 0, 0, 0]);
    }
  }

  /// Draw the segment `from`–`to` (surface units) with `style`.
  pub fn stroke_segment(&mut self, from: Point, to: Point, style: StrokeStyle) {
    let a = from * self.scale;
    let b = to * self.scale;
    let half = style.width * self.scale / 2.0;
    // One extra pixel of reach for the anti-aliased fringe.
    let reach = half + 1.0;

    let max_x = self.pixels.width() as f32;
    let max_y = self.pixels.height() as f32;
    let x0 = (a.x.min(b.x) - reach).floor().clamp(0.0, max_x) as u32;
    let x1 = (a.x.max(b.x) + reach).ceil().clamp(0.0, max_x) as u32;
    let y0 = (a.y.min(b.y) - reach).floor().clamp(0.0, max_y) as u32;
    let y1 = (a.y.max(b.y) + reach).ceil().clamp(0.0, max_y) as u32;

    let [r, g, bl] = style.color;
    for y in y0..y1 {
      for x in x0..x1 {
        let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
        let d = distance_to_segment(centre, a, b);
        let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
        if coverage <= 0.0 {
          continue;
        }
        let alpha = (coverage * 255.0).round() as u8;
        let px = self.pixels.get_pixel_mut(x, y);
        if alpha > px.0[3] {
          *px = Rgba([r, g, bl, alpha]);
        }
      }
    }
  }

  /// Count of pixels with any ink.
  #[cfg(test)]
  pub fn inked_pixels(&self) -> usize {
    self.pixels.pixels().filter(|p| p.0[3] > 0).count()
  }
}
