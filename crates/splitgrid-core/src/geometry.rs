#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are floating-point device-independent units with the origin at
//! the top-left of the layout area. The layout core never measures anything on
//! screen; these types carry whatever the rendering host reports.

use serde::{Deserialize, Serialize};

/// A pointer or anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle for leaf bounds, splitter bars, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (never negative when built through [`Rect::new`]).
    pub width: f64,
    /// Height (never negative when built through [`Rect::new`]).
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle. Negative or NaN extents clamp to zero.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: left/top edges inside, right/bottom edges outside.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Closed containment: every edge counts as inside.
    ///
    /// Adjacent rectangles both claim a shared edge under this test, so
    /// callers that need a single winner must pick by order.
    #[inline]
    pub fn contains_inclusive(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

fn non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};
    use proptest::prelude::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(Point::new(2.0, 3.0)));
        assert!(rect.contains(Point::new(5.9, 7.9)));
        assert!(!rect.contains(Point::new(6.0, 3.0)));
        assert!(!rect.contains(Point::new(2.0, 8.0)));
    }

    #[test]
    fn rect_contains_inclusive_accepts_far_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains_inclusive(Point::new(6.0, 8.0)));
        assert!(!rect.contains_inclusive(Point::new(6.1, 8.0)));
    }

    #[test]
    fn negative_extents_clamp_to_zero() {
        let rect = Rect::new(1.0, 1.0, -3.0, f64::NAN);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
        assert!(rect.is_empty());
    }

    #[test]
    fn rect_serializes_as_plain_record() {
        let json = serde_json::to_string(&Rect::new(1.0, 2.0, 3.0, 4.0)).expect("serialize");
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"width":3.0,"height":4.0}"#);
    }

    proptest! {
        #[test]
        fn center_is_inside_under_both_tests(
            x in -100.0f64..100.0, y in -100.0f64..100.0, w in 1.0f64..50.0, h in 1.0f64..50.0,
        ) {
            let rect = Rect::new(x, y, w, h);
            prop_assert!(rect.contains(rect.center()));
            prop_assert!(rect.contains_inclusive(rect.center()));
        }

        #[test]
        fn far_corner_is_inside_only_when_inclusive(
            x in -100.0f64..100.0, y in -100.0f64..100.0, w in 1.0f64..50.0, h in 1.0f64..50.0,
        ) {
            let rect = Rect::new(x, y, w, h);
            let corner = Point::new(rect.right(), rect.bottom());
            prop_assert!(!rect.contains(corner));
            prop_assert!(rect.contains_inclusive(corner));
        }
    }
}
