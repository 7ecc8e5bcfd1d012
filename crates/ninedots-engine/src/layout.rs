//! The dot position table.
//!
//! The engine never computes where the dots are. A [`GridLayout`] is
//! injected through [`PuzzleConfig`](crate::PuzzleConfig) and copied into
//! session-owned [`GridPoint`] values, so the table itself is never mutated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{ConfigError, Coordinate, GridPoint};

/// Number of dots in the puzzle (a 3x3 grid).
pub const DOT_COUNT: usize = 9;

/// Dots per row and per column.
const GRID_SIDE: u32 = 3;

/// Placement of a single dot: an axis-aligned rectangle anchored at its
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotPlacement {
    /// Identifier, unique within the layout.
    pub id: u32,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Rectangle width.
    pub width: f64,
    /// Rectangle height.
    pub height: f64,
}

/// Ordered table of the nine dot placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridLayout(Vec<DotPlacement>);

impl GridLayout {
    /// Top-left dot of the classic board.
    pub const CLASSIC_ORIGIN: Coordinate = Coordinate::new(200.0, 150.0);
    /// Distance between neighbouring dots on the classic board.
    pub const CLASSIC_SPACING: f64 = 100.0;
    /// Side length of a classic dot.
    pub const CLASSIC_DOT_SIZE: f64 = 10.0;
    /// Canvas width the classic board is laid out for.
    pub const CLASSIC_CANVAS_WIDTH: u32 = 600;
    /// Canvas height the classic board is laid out for.
    pub const CLASSIC_CANVAS_HEIGHT: u32 = 500;

    /// Create a layout from explicit placements.
    ///
    /// The table is not checked here; call [`validate`](Self::validate)
    /// (or build a session, which does) before use.
    #[must_use]
    pub const fn new(placements: Vec<DotPlacement>) -> Self {
        Self(placements)
    }

    /// The board of the original game: 10 px dots, 100 px apart, centred
    /// on a 600x500 canvas.
    #[must_use]
    pub fn classic() -> Self {
        Self::uniform(
            Self::CLASSIC_ORIGIN,
            Self::CLASSIC_SPACING,
            Self::CLASSIC_DOT_SIZE,
        )
    }

    /// An evenly spaced 3x3 grid of square dots.
    ///
    /// Dots are numbered row by row starting at 0. `origin` is the
    /// top-left corner of dot 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use ninedots_engine::{Coordinate, GridLayout};
    ///
    /// let layout = GridLayout::uniform(Coordinate::new(0.0, 0.0), 100.0, 10.0);
    /// let last = layout.placements()[8];
    /// assert_eq!(last.id, 8);
    /// assert!((last.x - 200.0).abs() < f64::EPSILON);
    /// assert!((last.y - 200.0).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn uniform(origin: Coordinate, spacing: f64, dot_size: f64) -> Self {
        let placements = (0..GRID_SIDE)
            .flat_map(|row| (0..GRID_SIDE).map(move |col| (row, col)))
            .map(|(row, col)| DotPlacement {
                id: row * GRID_SIDE + col,
                x: spacing.mul_add(f64::from(col), origin.x),
                y: spacing.mul_add(f64::from(row), origin.y),
                width: dot_size,
                height: dot_size,
            })
            .collect();
        Self(placements)
    }

    /// The placements in table order.
    #[must_use]
    pub fn placements(&self) -> &[DotPlacement] {
        &self.0
    }

    /// Fresh, untouched grid points for a new session.
    #[must_use]
    pub fn grid_points(&self) -> Vec<GridPoint> {
        self.0.iter().map(GridPoint::from).collect()
    }

    /// Check that the table describes a playable board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLayout`] unless there are exactly
    /// [`DOT_COUNT`] placements with finite coordinates, strictly positive
    /// sizes, and unique ids.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.0.len() != DOT_COUNT {
            return Err(ConfigError::InvalidLayout(format!(
                "expected {DOT_COUNT} dots, got {}",
                self.0.len(),
            )));
        }

        let mut seen = HashSet::with_capacity(DOT_COUNT);
        for dot in &self.0 {
            if !(dot.x.is_finite() && dot.y.is_finite()) {
                return Err(ConfigError::InvalidLayout(format!(
                    "dot {} has a non-finite position",
                    dot.id,
                )));
            }
            // `!(v > 0.0)` also catches NaN.
            if !(dot.width > 0.0 && dot.height > 0.0) || !dot.width.is_finite() || !dot.height.is_finite() {
                return Err(ConfigError::InvalidLayout(format!(
                    "dot {} must have a positive finite size (got {}x{})",
                    dot.id, dot.width, dot.height,
                )));
            }
            if !seen.insert(dot.id) {
                return Err(ConfigError::InvalidLayout(format!(
                    "duplicate dot id {}",
                    dot.id,
                )));
            }
        }
        Ok(())
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::classic()
    }
}
