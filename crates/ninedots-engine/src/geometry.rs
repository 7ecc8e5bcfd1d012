//! Geometry kernel: orientation, segment intersection, and point-in-rectangle
//! tests.
//!
//! Everything here is a pure function of its inputs. Degenerate input
//! (zero-length segments, coincident or collinear segments) is answered
//! deterministically rather than reported as an error.

use crate::types::{Coordinate, GridPoint, Stroke};

/// Turn direction of the ordered triple `(p, q, r)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The three points lie on one line.
    Collinear,
    /// Positive cross product.
    Clockwise,
    /// Negative cross product.
    CounterClockwise,
}

/// Orientation of the triple `(p, q, r)` from the sign of
/// `(q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)`.
///
/// # Examples
///
/// ```
/// use ninedots_engine::Coordinate;
/// use ninedots_engine::geometry::{Orientation, orientation};
///
/// let p = Coordinate::new(0.0, 0.0);
/// let q = Coordinate::new(1.0, 1.0);
/// assert_eq!(orientation(p, q, Coordinate::new(2.0, 2.0)), Orientation::Collinear);
/// assert_eq!(orientation(p, q, Coordinate::new(2.0, 0.0)), Orientation::Clockwise);
/// assert_eq!(orientation(p, q, Coordinate::new(0.0, 2.0)), Orientation::CounterClockwise);
/// ```
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn orientation(p: Coordinate, q: Coordinate, r: Coordinate) -> Orientation {
    // No fused multiply-add: both products must round the same way or
    // exactly collinear points pick up a spurious sign.
    let cross = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if cross > 0.0 {
        Orientation::Clockwise
    } else if cross < 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns `true` if `q` lies within the bounding box of `p` and `r`.
///
/// Only meaningful when the three points are already known to be
/// collinear; then it answers whether `q` is on segment `p-r`.
#[must_use]
pub fn on_segment(p: Coordinate, q: Coordinate, r: Coordinate) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Returns `true` if the two closed segments share at least one point.
///
/// General case: each segment's endpoints lie on opposite sides of the
/// other segment. Collinear case: an endpoint of one segment lies on the
/// other. A zero-length segment behaves as a point and intersects only
/// if it lies on the other segment.
///
/// # Examples
///
/// ```
/// use ninedots_engine::{Coordinate, Stroke};
/// use ninedots_engine::geometry::segments_intersect;
///
/// let a = Stroke::new(Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 10.0));
/// let b = Stroke::new(Coordinate::new(0.0, 10.0), Coordinate::new(10.0, 0.0));
/// let c = Stroke::new(Coordinate::new(20.0, 0.0), Coordinate::new(30.0, 0.0));
/// assert!(segments_intersect(&a, &b));
/// assert!(!segments_intersect(&a, &c));
/// ```
#[must_use]
pub fn segments_intersect(seg1: &Stroke, seg2: &Stroke) -> bool {
    let (p1, q1) = (seg1.start, seg1.end);
    let (p2, q2) = (seg2.start, seg2.end);

    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Returns `true` if `point` lies inside or on the boundary of the dot's
/// rectangle.
#[must_use]
pub fn rect_contains(dot: &GridPoint, point: Coordinate) -> bool {
    let min = dot.min();
    let max = dot.max();
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

/// Returns `true` if the segment touches the dot's rectangle: it crosses
/// or grazes one of the four edges, or lies inside the rectangle.
///
/// A segment entirely inside the rectangle meets no edge, so the
/// endpoint containment check is what catches it.
#[must_use]
pub fn segment_touches_rect(segment: &Stroke, dot: &GridPoint) -> bool {
    rect_contains(dot, segment.start)
        || rect_contains(dot, segment.end)
        || dot
            .edges()
            .iter()
            .any(|edge| segments_intersect(segment, edge))
}
