//! Shared types for the nine dots puzzle engine.

use serde::{Deserialize, Serialize};

use crate::layout::{DotPlacement, GridLayout};

/// Number of strokes a player may draw before the board is exhausted.
pub const MAX_STROKES: usize = 4;

/// A 2D position in canvas-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Sum of both axes.
    ///
    /// Used as the cheap proximity proxy by the continuity check.
    #[must_use]
    pub fn axis_sum(self) -> f64 {
        self.x + self.y
    }
}

/// A straight segment between two coordinates.
///
/// While the pointer is down the session keeps replacing `end`; once the
/// pointer is released the stroke is committed and never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Where the pointer went down.
    pub start: Coordinate,
    /// Latest (or final) pointer position.
    pub end: Coordinate,
}

impl Stroke {
    /// Create a new stroke.
    #[must_use]
    pub const fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    /// A zero-length stroke at `at`, as created on pointer-down.
    #[must_use]
    pub const fn point(at: Coordinate) -> Self {
        Self { start: at, end: at }
    }

    /// Returns `true` if start and end coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// One of the nine targets, drawn as a small axis-aligned square.
///
/// The geometry comes from the injected [`GridLayout`]; `touched` is
/// session state and only ever goes from `false` to `true` until reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    /// Identifier from the layout table.
    pub id: u32,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Rectangle width.
    pub width: f64,
    /// Rectangle height.
    pub height: f64,
    /// Whether any committed stroke has struck this point.
    pub touched: bool,
}

impl GridPoint {
    /// Top-left corner.
    #[must_use]
    pub const fn min(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Coordinate {
        Coordinate::new(self.x + self.width, self.y + self.height)
    }

    /// The four perimeter edges, clockwise from the top edge.
    #[must_use]
    pub fn edges(&self) -> [Stroke; 4] {
        let top_left = self.min();
        let bottom_right = self.max();
        let top_right = Coordinate::new(bottom_right.x, top_left.y);
        let bottom_left = Coordinate::new(top_left.x, bottom_right.y);
        [
            Stroke::new(top_left, top_right),
            Stroke::new(top_right, bottom_right),
            Stroke::new(bottom_right, bottom_left),
            Stroke::new(bottom_left, top_left),
        ]
    }
}

impl From<&DotPlacement> for GridPoint {
    fn from(placement: &DotPlacement) -> Self {
        Self {
            id: placement.id,
            x: placement.x,
            y: placement.y,
            width: placement.width,
            height: placement.height,
            touched: false,
        }
    }
}

/// Configuration for a puzzle session.
///
/// Every field has a default matching the classic game, so a partial
/// JSON document (or `{}`) deserializes into a usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Fraction of the larger coordinate sum that a new stroke's start may
    /// deviate from the previous stroke's end.
    pub continuity_tolerance: f64,

    /// How long the continuity warning stays visible, in milliseconds.
    pub warning_duration_ms: u64,

    /// Position table of the nine dots.
    pub layout: GridLayout,
}

impl PuzzleConfig {
    /// Default continuity tolerance (2%).
    pub const DEFAULT_CONTINUITY_TOLERANCE: f64 = 0.02;

    /// Default warning display time.
    pub const DEFAULT_WARNING_DURATION_MS: u64 = 2000;

    /// Check the configuration for values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] for a negative or non-finite
    /// tolerance and [`ConfigError::InvalidLayout`] when the layout fails
    /// [`GridLayout::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.continuity_tolerance.is_finite() || self.continuity_tolerance < 0.0 {
            return Err(ConfigError::InvalidConfig(format!(
                "continuity_tolerance must be a finite, non-negative ratio (got {})",
                self.continuity_tolerance,
            )));
        }
        self.layout.validate()
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            continuity_tolerance: Self::DEFAULT_CONTINUITY_TOLERANCE,
            warning_duration_ms: Self::DEFAULT_WARNING_DURATION_MS,
            layout: GridLayout::classic(),
        }
    }
}

/// Errors raised while building a session from a configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A scalar setting is out of range.
    #[error("invalid puzzle configuration: {0}")]
    InvalidConfig(String),

    /// The dot position table is unusable.
    #[error("invalid grid layout: {0}")]
    InvalidLayout(String),
}

/// Why a pointer-down did not start a new stroke.
///
/// None of these are fatal: by the time one is returned the session has
/// already recovered and is ready for the next input.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum StrokeRejection {
    /// The new stroke does not begin where the previous one ended.
    #[error(
        "stroke must start at the previous stroke's end ({}, {}), got ({}, {})",
        .previous_end.x, .previous_end.y, .proposed_start.x, .proposed_start.y
    )]
    ContinuityViolation {
        /// End of the last committed stroke.
        previous_end: Coordinate,
        /// Where the pointer went down.
        proposed_start: Coordinate,
    },

    /// All strokes have been used.
    #[error("all {} strokes have been used", MAX_STROKES)]
    CapacityExceeded,

    /// A stroke is already in progress.
    #[error("a stroke is already in progress")]
    AlreadyDrawing,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_axis_sum() {
        let c = Coordinate::new(3.5, 4.0);
        assert!((c.axis_sum() - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn stroke_point_is_degenerate() {
        let s = Stroke::point(Coordinate::new(5.0, 5.0));
        assert!(s.is_degenerate());
        assert!(!Stroke::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)).is_degenerate());
    }

    #[test]
    fn grid_point_edges_form_closed_perimeter() {
        let p = GridPoint {
            id: 0,
            x: 10.0,
            y: 20.0,
            width: 4.0,
            height: 6.0,
            touched: false,
        };
        let edges = p.edges();
        for i in 0..edges.len() {
            assert_eq!(edges[i].end, edges[(i + 1) % edges.len()].start);
        }
        assert_eq!(edges[0].start, Coordinate::new(10.0, 20.0));
        assert_eq!(edges[1].end, Coordinate::new(14.0, 26.0));
    }

    #[test]
    fn grid_point_from_placement_starts_untouched() {
        let placement = DotPlacement {
            id: 7,
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        };
        let p = GridPoint::from(&placement);
        assert_eq!(p.id, 7);
        assert!(!p.touched);
        assert_eq!(p.max(), Coordinate::new(4.0, 6.0));
    }

    #[test]
    fn config_defaults_match_classic_game() {
        let config = PuzzleConfig::default();
        assert!((config.continuity_tolerance - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.warning_duration_ms, 2000);
        assert_eq!(config.layout, GridLayout::classic());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_negative_tolerance() {
        let config = PuzzleConfig {
            continuity_tolerance: -0.1,
            ..PuzzleConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn config_rejects_nan_tolerance() {
        let config = PuzzleConfig {
            continuity_tolerance: f64::NAN,
            ..PuzzleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_config_json_fills_defaults() {
        let config: PuzzleConfig = serde_json::from_str(r#"{"warning_duration_ms": 500}"#).unwrap();
        assert_eq!(config.warning_duration_ms, 500);
        assert!((config.continuity_tolerance - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.layout, GridLayout::classic());
    }

    #[test]
    fn rejection_display() {
        assert_eq!(
            StrokeRejection::CapacityExceeded.to_string(),
            "all 4 strokes have been used",
        );
        let err = StrokeRejection::ContinuityViolation {
            previous_end: Coordinate::new(200.0, 0.0),
            proposed_start: Coordinate::new(0.0, 0.0),
        };
        assert_eq!(
            err.to_string(),
            "stroke must start at the previous stroke's end (200, 0), got (0, 0)",
        );
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidLayout("expected 9 dots, got 8".to_string());
        assert_eq!(err.to_string(), "invalid grid layout: expected 9 dots, got 8");
    }
}
