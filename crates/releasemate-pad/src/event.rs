//! Platform-neutral input events for a signature surface.
//!
//! The host translates browser, window-system, or recorded events into these.
//! Positions are in viewport coordinates; the surface subtracts its own
//! on-screen origin.

use releasemate_core::signature::Signature;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
  #[default]
  Primary,
  Secondary,
  Middle,
}

/// Input delivered to [`SignatureSurface::handle`](crate::SignatureSurface::handle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
  PointerDown {
    position: Point,
    #[serde(default)]
    button:   MouseButton,
  },
  PointerMove {
    position:   Point,
    #[serde(default = "cancelable_default")]
    cancelable: bool,
  },
  /// Pointer released anywhere in the window, not only over the surface.
  PointerUp,
  /// Active touch points; only the first is tracked.
  TouchStart { touches: Vec<Point> },
  TouchMove {
    touches:    Vec<Point>,
    #[serde(default = "cancelable_default")]
    cancelable: bool,
  },
  TouchEnd,
  /// The user pressed the surface's clear button.
  Clear,
}

fn cancelable_default() -> bool { true }

/// What the host must do after dispatching an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
  /// A signature emitted by this event: the raster at the end of a stroke,
  /// or the empty signature after a clear.
  pub capture:         Option<Signature>,
  /// Suppress the platform's default scrolling/selection for this event.
  pub prevent_default: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn recorded_events_parse_with_defaults() {
    let json = r#"[
      {"type": "pointer_down", "position": {"x": 1.0, "y": 2.0}},
      {"type": "pointer_move", "position": {"x": 3.0, "y": 4.0}},
      {"type": "touch_move", "touches": [{"x": 5.0, "y": 6.0}], "cancelable": false},
      {"type": "pointer_up"}
    ]"#;
    let events: Vec<SurfaceEvent> = serde_json::from_str(json).unwrap();
    assert_eq!(
      events[0],
      SurfaceEvent::PointerDown {
        position: Point::new(1.0, 2.0),
        button:   MouseButton::Primary,
      }
    );
    assert_eq!(
      events[1],
      SurfaceEvent::PointerMove { position: Point::new(3.0, 4.0), cancelable: true }
    );
    assert!(matches!(events[2], SurfaceEvent::TouchMove { cancelable: false, .. }));
    assert_eq!(events[3], SurfaceEvent::PointerUp);
  }
}
