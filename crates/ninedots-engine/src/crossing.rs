//! Point crossing: which dots does a committed stroke strike?
//!
//! [`evaluate`] is pure; the session applies its result with
//! [`mark_touched`], which is the only place a `touched` flag is written.

use std::collections::BTreeSet;

use crate::geometry::segment_touches_rect;
use crate::types::{GridPoint, Stroke};

/// Ids of every grid point the stroke touches.
///
/// A point is touched when the stroke meets any of its four rectangle
/// edges or ends inside it. Already-touched points are reported again;
/// the result depends only on geometry, not on existing flags.
///
/// # Examples
///
/// ```
/// use ninedots_engine::{Coordinate, GridLayout, Stroke};
/// use ninedots_engine::crossing::evaluate;
///
/// let points = GridLayout::uniform(Coordinate::new(0.0, 0.0), 100.0, 10.0).grid_points();
/// // Along the top row.
/// let stroke = Stroke::new(Coordinate::new(0.0, 5.0), Coordinate::new(210.0, 5.0));
/// assert_eq!(evaluate(&stroke, &points).into_iter().collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
#[must_use]
pub fn evaluate(stroke: &Stroke, points: &[GridPoint]) -> BTreeSet<u32> {
    points
        .iter()
        .filter(|point| segment_touches_rect(stroke, point))
        .map(|point| point.id)
        .collect()
}

/// Set `touched` on every point whose id is in `ids`.
///
/// Never clears a flag. Returns how many points changed from untouched
/// to touched, so re-applying the same ids returns 0.
pub fn mark_touched(points: &mut [GridPoint], ids: &BTreeSet<u32>) -> usize {
    let mut newly_touched = 0;
    for point in points.iter_mut().filter(|p| ids.contains(&p.id)) {
        if !point.touched {
            point.touched = true;
            newly_touched += 1;
        }
    }
    newly_touched
}
