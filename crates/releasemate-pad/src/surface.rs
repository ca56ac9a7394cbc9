//! [`SignatureSurface`]: the owned drawing surface.
//!
//! The surface owns its raster and path state. Hosts interact with it only
//! through the stroke operations (or [`SignatureSurface::handle`], which maps
//! platform events onto them) and receive signatures as return values.

use releasemate_core::signature::Signature;

use crate::{
  Result,
  encode::{EncodeOptions, encode},
  event::{MouseButton, Response, SurfaceEvent},
  geometry::{Point, Rect},
  raster::{Raster, StrokeStyle},
};

/// Stroke width in surface units (on-screen pixels).
pub const STROKE_WIDTH: f32 = 2.5;

/// Largest backing raster side a drawing context can be created for.
pub const MAX_BACKING_DIMENSION: u32 = 16_384;

const INK: StrokeStyle = StrokeStyle { color: [0, 0, 0], width: STROKE_WIDTH };

/// The on-screen element a surface draws into.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceElement {
  /// On-screen rectangle in viewport coordinates.
  pub bounds:             Rect,
  /// Device pixels per on-screen pixel.
  pub device_pixel_ratio: f32,
}

/// A freehand signature pad.
pub struct SignatureSurface {
  encoding: EncodeOptions,
  bounds:   Rect,
  ratio:    f32,
  /// `None` while inert: not yet initialised, or no drawing context.
  raster:   Option<Raster>,
  /// Completed and in-progress strokes, surface-local.
  strokes:  Vec<Vec<Point>>,
  drawing:  bool,
  /// Last point of the current path; `None` after a resize mid-stroke.
  pen:      Option<Point>,
  /// Most recent emission.
  last:     Signature,
}

impl SignatureSurface {
  /// Mount an empty, inert surface. Call [`initialize`](Self::initialize)
  /// once the element has a size.
  pub fn new(encoding: EncodeOptions) -> Self {
    Self {
      encoding,
      bounds: Rect::default(),
      ratio: 1.0,
      raster: None,
      strokes: Vec::new(),
      drawing: false,
      pen: None,
      last: Signature::empty(),
    }
  }

  // ── Initialize ────────────────────────────────────────────────────────────

  /// Size the backing raster to the element at its device pixel ratio.
  ///
  /// Re-running this after a layout change rebuilds the raster at the new
  /// size; previous ink is discarded. A missing element, or one whose scaled
  /// size admits no drawing context, leaves the surface inert.
  pub fn initialize(&mut self, element: Option<&SurfaceElement>) {
    self.raster = None;
    self.strokes.clear();
    self.pen = None;

    let Some(element) = element else {
      tracing::debug!("signature surface has no element; capture disabled");
      return;
    };

    let ratio = sanitize_ratio(element.device_pixel_ratio);
    self.bounds = element.bounds;
    self.ratio = ratio;

    let width = backing_side(element.bounds.width, ratio);
    let height = backing_side(element.bounds.height, ratio);
    self.raster = match (width, height) {
      (Some(w), Some(h)) => Raster::new(w, h, ratio),
      _ => None,
    };

    if self.raster.is_none() {
      tracing::debug!(
        width = element.bounds.width,
        height = element.bounds.height,
        ratio,
        "no drawing context for signature surface; capture disabled"
      );
    }
  }

  /// Move the on-screen origin (e.g. after scrolling) without resizing.
  pub fn reposition(&mut self, origin: Point) {
    self.bounds.x = origin.x;
    self.bounds.y = origin.y;
  }

  // ── Strokes ───────────────────────────────────────────────────────────────

  /// Start a new path at `position` (viewport coordinates).
  pub fn begin_stroke(&mut self, position: Point) {
    if self.raster.is_none() || !position.is_finite() {
      return;
    }
    let local = self.bounds.to_local(position);
    self.strokes.push(vec![local]);
    self.pen = Some(local);
    self.drawing = true;
  }

  /// Extend the current path to `position` and draw the new segment.
  ///
  /// Returns `true` when the host must suppress the platform's default
  /// handling (scrolling, text selection) for this event.
  pub fn extend_stroke(&mut self, position: Point, cancelable: bool) -> bool {
    if !self.drawing || !position.is_finite() {
      return false;
    }
    let Some(raster) = self.raster.as_mut() else {
      return false;
    };

    let local = self.bounds.to_local(position);
    match self.pen {
      Some(from) => {
        raster.stroke_segment(from, local, INK);
        if let Some(stroke) = self.strokes.last_mut() {
          stroke.push(local);
        }
      }
      // Path was lost to a resize; this point starts a new sub-path.
      None => self.strokes.push(vec![local]),
    }
    self.pen = Some(local);
    cancelable
  }

  /// Finish the active stroke and export the raster.
  ///
  /// Emits nothing if no stroke was active.
  pub fn end_stroke(&mut self) -> Result<Option<Signature>> {
    if !self.drawing {
      return Ok(None);
    }
    self.drawing = false;
    self.pen = None;

    let Some(raster) = self.raster.as_ref() else {
      return Ok(None);
    };
    let signature = encode(raster.pixels(), self.encoding)?;
    self.last = signature.clone();
    Ok(Some(signature))
  }

  /// Erase everything and emit the empty signature.
  pub fn clear(&mut self) -> Signature {
    if let Some(raster) = self.raster.as_mut() {
      raster.clear();
    }
    self.strokes.clear();
    self.drawing = false;
    self.pen = None;
    self.last = Signature::empty();
    Signature::empty()
  }

  // ── Event dispatch ────────────────────────────────────────────────────────

  /// Route a platform event to the stroke operations.
  ///
  /// Only the primary mouse button draws. For touch events only the first
  /// touch point is used; an event with no touches is ignored.
  pub fn handle(&mut self, event: &SurfaceEvent) -> Result<Response> {
    let mut response = Response::default();
    match event {
      SurfaceEvent::PointerDown { position, button } => {
        if *button == MouseButton::Primary {
          self.begin_stroke(*position);
        }
      }
      SurfaceEvent::PointerMove { position, cancelable } => {
        response.prevent_default = self.extend_stroke(*position, *cancelable);
      }
      SurfaceEvent::TouchStart { touches } => {
        if let Some(first) = touches.first() {
          self.begin_stroke(*first);
        }
      }
      SurfaceEvent::TouchMove { touches, cancelable } => {
        if let Some(first) = touches.first() {
          response.prevent_default = self.extend_stroke(*first, *cancelable);
        }
      }
      SurfaceEvent::PointerUp | SurfaceEvent::TouchEnd => {
        response.capture = self.end_stroke()?;
      }
      SurfaceEvent::Clear => response.capture = Some(self.clear()),
    }
    Ok(response)
  }

  // ── Read-only state ───────────────────────────────────────────────────────

  /// The most recent emission: empty until a stroke completes, and again
  /// after [`clear`](Self::clear).
  pub fn signature(&self) -> &Signature { &self.last }

  pub fn is_drawing(&self) -> bool { self.drawing }

  /// `true` when capture is disabled.
  pub fn is_inert(&self) -> bool { self.raster.is_none() }

  /// Backing raster size in device pixels.
  pub fn backing_size(&self) -> Option<(u32, u32)> {
    self.raster.as_ref().map(|r| (r.width(), r.height()))
  }

  /// On-screen size in logical pixels.
  pub fn display_size(&self) -> (f32, f32) { (self.bounds.width, self.bounds.height) }

  pub fn device_pixel_ratio(&self) -> f32 { self.ratio }

  /// Recorded stroke points in surface-local coordinates.
  pub fn strokes(&self) -> &[Vec<Point>] { &self.strokes }
}

fn sanitize_ratio(ratio: f32) -> f32 {
  if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 }
}

/// `floor(side * ratio)`, or `None` if no context can back it.
fn backing_side(side: f32, ratio: f32) -> Option<u32> {
  let scaled = (side * ratio).floor();
  if !scaled.is_finite() || scaled < 1.0 || scaled > MAX_BACKING_DIMENSION as f32 {
    return None;
  }
  Some(scaled as u32)
}
