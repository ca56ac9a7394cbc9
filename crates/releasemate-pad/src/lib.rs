//! Freehand signature capture for ReleaseMate.
//!
//! A [`SignatureSurface`] turns pointer and touch input into an anti-aliased
//! raster at the display's native pixel density and exports it as a base64
//! `data:` URL ([`Signature`](releasemate_core::signature::Signature)). Pure
//! synchronous; the host forwards platform events and stores whatever the
//! surface emits.
//!
//! # Quick start
//!
//! ```no_run
//! use releasemate_pad::{Point, Rect, SignatureSurface, SurfaceElement};
//!
//! let mut pad = SignatureSurface::new(Default::default());
//! pad.initialize(Some(&SurfaceElement {
//!   bounds:             Rect::new(0.0, 0.0, 600.0, 200.0),
//!   device_pixel_ratio: 2.0,
//! }));
//! pad.begin_stroke(Point::new(10.0, 10.0));
//! pad.extend_stroke(Point::new(80.0, 40.0), true);
//! let signature = pad.end_stroke().unwrap().expect("stroke was active");
//! assert!(!signature.is_empty());
//! ```

mod encode;
pub mod error;
mod event;
mod geometry;
mod raster;
mod surface;
mod trace;

pub use encode::{EncodeOptions, ImageFormat};
pub use error::{Error, Result};
pub use event::{MouseButton, Response, SurfaceEvent};
pub use geometry::{Point, Rect};
pub use surface::{MAX_BACKING_DIMENSION, STROKE_WIDTH, SignatureSurface, SurfaceElement};
pub use trace::Trace;
