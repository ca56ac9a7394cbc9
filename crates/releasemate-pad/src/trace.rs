//! Recorded input traces.
//!
//! A trace is the element geometry plus the event sequence a host observed
//! while someone signed. Replaying it through a fresh surface reproduces the
//! signature, which is how the command-line front end captures signatures.

use releasemate_core::signature::Signature;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  encode::EncodeOptions,
  event::SurfaceEvent,
  geometry::Rect,
  surface::{SignatureSurface, SurfaceElement},
};

fn default_ratio() -> f32 { 1.0 }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
  /// On-screen rectangle of the surface in viewport coordinates.
  pub surface:            Rect,
  #[serde(default = "default_ratio")]
  pub device_pixel_ratio: f32,
  pub events:             Vec<SurfaceEvent>,
}

impl Trace {
  /// Replay every event and return what the owning form would hold
  /// afterwards: the last emitted signature, or empty if none was emitted.
  pub fn replay(&self, encoding: EncodeOptions) -> Result<Signature> {
    let mut surface = SignatureSurface::new(encoding);
    surface.initialize(Some(&SurfaceElement {
      bounds:             self.surface,
      device_pixel_ratio: self.device_pixel_ratio,
    }));

    let mut held = Signature::empty();
    for event in &self.events {
      if let Some(signature) = surface.handle(event)?.capture {
        held = signature;
      }
    }
    Ok(held)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(json: &str) -> Trace { serde_json::from_str(json).unwrap() }

  #[test]
  fn replay_of_a_stroke_yields_a_signature() {
    let trace = parse(
      r#"{
        "surface": {"x": 0, "y": 0, "width": 300, "height": 100},
        "device_pixel_ratio": 2,
        "events": [
          {"type": "pointer_down", "position": {"x": 20, "y": 50}},
          {"type": "pointer_move", "position": {"x": 80, "y": 30}},
          {"type": "pointer_move", "position": {"x": 140, "y": 70}},
          {"type": "pointer_up"}
        ]
      }"#,
    );
    let sig = trace.replay(EncodeOptions::default()).unwrap();
    assert!(!sig.is_empty());
  }

  #[test]
  fn clear_after_a_stroke_leaves_nothing() {
    let mut trace = parse(
      r#"{
        "surface": {"x": 0, "y": 0, "width": 300, "height": 100},
        "events": [
          {"type": "touch_start", "touches": [{"x": 20, "y": 50}]},
          {"type": "touch_move", "touches": [{"x": 80, "y": 30}]},
          {"type": "touch_end"}
        ]
      }"#,
    );
    assert!(!trace.replay(EncodeOptions::png()).unwrap().is_empty());

    trace.events.push(SurfaceEvent::Clear);
    assert!(trace.replay(EncodeOptions::png()).unwrap().is_empty());
  }

  #[test]
  fn trace_without_a_completed_stroke_is_empty() {
    let trace = parse(
      r#"{
        "surface": {"x": 0, "y": 0, "width": 300, "height": 100},
        "events": [
          {"type": "pointer_move", "position": {"x": 80, "y": 30}},
          {"type": "pointer_up"}
        ]
      }"#,
    );
    assert!(trace.replay(EncodeOptions::default()).unwrap().is_empty());
  }
}
