//! Continuity check between consecutive strokes.
//!
//! Pointer coordinates are never pixel-exact, so a new stroke is allowed
//! to start "close enough" to where the previous one ended. Closeness is
//! measured on the sum of both axes: the two sums may differ by at most
//! `tolerance` times the larger sum. Two different points with equal sums
//! therefore pass, and that is the intended gameplay behavior.

use crate::types::Coordinate;

/// Warning shown when a stroke does not start at the previous stroke's end.
pub const CONTINUITY_WARNING: &str = "You need to start from the last line end!";

/// Returns `true` if a stroke starting at `proposed_start` continues the
/// path that ended at `previous_end`.
///
/// `tolerance` is a ratio (`0.02` for 2%). The allowed difference is never
/// negative, so starting exactly at `previous_end` is always accepted,
/// even where coordinate sums are negative.
///
/// # Examples
///
/// ```
/// use ninedots_engine::Coordinate;
/// use ninedots_engine::continuity::is_continuation;
///
/// let end = Coordinate::new(200.0, 200.0);
/// assert!(is_continuation(end, Coordinate::new(203.0, 201.0), 0.02));
/// assert!(!is_continuation(end, Coordinate::new(100.0, 200.0), 0.02));
/// ```
#[must_use]
pub fn is_continuation(previous_end: Coordinate, proposed_start: Coordinate, tolerance: f64) -> bool {
    let previous_sum = previous_end.axis_sum();
    let proposed_sum = proposed_start.axis_sum();
    let allowed = (previous_sum.max(proposed_sum) * tolerance).max(0.0);
    (previous_sum - proposed_sum).abs() <= allowed
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 0.02;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn exact_match_is_accepted() {
        assert!(is_continuation(c(200.0, 0.0), c(200.0, 0.0), TOL));
    }

    #[test]
    fn exact_match_at_origin_is_accepted() {
        assert!(is_continuation(c(0.0, 0.0), c(0.0, 0.0), TOL));
    }

    #[test]
    fn exact_match_with_negative_sum_is_accepted() {
        assert!(is_continuation(c(-40.0, -10.0), c(-40.0, -10.0), TOL));
    }

    #[test]
    fn within_two_percent_is_accepted() {
        // sums 400 and 408; allowed 408 * 0.02 = 8.16
        assert!(is_continuation(c(200.0, 200.0), c(204.0, 204.0), TOL));
    }

    #[test]
    fn beyond_two_percent_is_rejected() {
        // sums 400 and 410; allowed 8.2
        assert!(!is_continuation(c(200.0, 200.0), c(205.0, 205.0), TOL));
    }

    #[test]
    fn tolerance_uses_larger_sum() {
        // sums 100 and 102; allowed 2.04 from the larger sum
        assert!(is_continuation(c(50.0, 50.0), c(51.0, 51.0), TOL));
        // sums 100 and 99; allowed 2.0
        assert!(is_continuation(c(50.0, 50.0), c(49.5, 49.5), TOL));
        assert!(!is_continuation(c(50.0, 50.0), c(48.9, 49.0), TOL));
    }

    #[test]
    fn equal_sums_pass_regardless_of_distance() {
        assert!(is_continuation(c(300.0, 0.0), c(0.0, 300.0), TOL));
    }

    #[test]
    fn near_origin_is_strict() {
        // Sums near zero leave almost no slack.
        assert!(!is_continuation(c(0.0, 0.0), c(1.0, 0.0), TOL));
    }

    #[test]
    fn zero_tolerance_requires_equal_sums() {
        assert!(is_continuation(c(10.0, 20.0), c(20.0, 10.0), 0.0));
        assert!(!is_continuation(c(10.0, 20.0), c(10.0, 21.0), 0.0));
    }
}
