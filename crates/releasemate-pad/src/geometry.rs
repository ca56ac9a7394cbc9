//! Points and rectangles in logical (on-screen) pixels.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A position in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
  pub x: f32,
  pub y: f32,
}

impl Point {
  #[inline]
  pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }

  #[inline]
  pub fn dot(self, other: Point) -> f32 { self.x * other.x + self.y * other.y }

  #[inline]
  pub fn length(self) -> f32 { self.dot(self).sqrt() }

  #[inline]
  pub fn is_finite(self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

impl Add for Point {
  type Output = Point;

  fn add(self, rhs: Point) -> Point { Point::new(self.x + rhs.x, self.y + rhs.y) }
}

impl Sub for Point {
  type Output = Point;

  fn sub(self, rhs: Point) -> Point { Point::new(self.x - rhs.x, self.y - rhs.y) }
}

impl Mul<f32> for Point {
  type Output = Point;

  fn mul(self, rhs: f32) -> Point { Point::new(self.x * rhs, self.y * rhs) }
}

/// Axis-aligned rectangle in viewport coordinates (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
  pub x:      f32,
  pub y:      f32,
  pub width:  f32,
  pub height: f32,
}

impl Rect {
  #[inline]
  pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self { x, y, width, height }
  }

  #[inline]
  pub fn origin(self) -> Point { Point::new(self.x, self.y) }

  /// Translate a viewport position into this rectangle's local space.
  #[inline]
  pub fn to_local(self, viewport: Point) -> Point { viewport - self.origin() }
}

/// Shortest distance from `p` to the segment `a`–`b`.
///
/// A degenerate segment (`a == b`) measures distance to the point, which is
/// what gives strokes their round caps.
pub(crate) fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
  let ab = b - a;
  let len2 = ab.dot(ab);
  let t = if len2 <= f32::EPSILON {
    0.0
  } else {
    ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
  };
  (p - (a + ab * t)).length()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn to_local_subtracts_origin() {
    let r = Rect::new(100.0, 40.0, 300.0, 100.0);
    assert_eq!(r.to_local(Point::new(110.0, 45.0)), Point::new(10.0, 5.0));
  }

  #[test]
  fn distance_inside_the_span_is_perpendicular() {
    let d = distance_to_segment(
      Point::new(5.0, 3.0),
      Point::new(0.0, 0.0),
      Point::new(10.0, 0.0),
    );
    assert!((d - 3.0).abs() < 1e-5);
  }

  #[test]
  fn distance_past_an_end_is_to_the_endpoint() {
    let d = distance_to_segment(
      Point::new(13.0, 4.0),
      Point::new(0.0, 0.0),
      Point::new(10.0, 0.0),
    );
    assert!((d - 5.0).abs() < 1e-5);
  }

  #[test]
  fn degenerate_segment_is_a_point() {
    let a = Point::new(2.0, 2.0);
    let d = distance_to_segment(Point::new(5.0, 6.0), a, a);
    assert!((d - 5.0).abs() < 1e-5);
  }
}
