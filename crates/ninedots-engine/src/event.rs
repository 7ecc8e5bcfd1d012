//! Pointer input as data.
//!
//! Hosts that already have discrete handlers can call the session's
//! `pointer_*` methods directly; [`PointerEvent`] exists for hosts that
//! queue or script input (the replay tool reads it from JSON).

use serde::{Deserialize, Serialize};

use crate::types::Coordinate;

/// One input event in canvas-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Pointer pressed.
    Down {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Pointer moved (with or without a button held).
    Move {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Pointer released.
    Up,
    /// Start the puzzle over.
    Reset,
}

impl PointerEvent {
    /// Position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Coordinate> {
        match *self {
            Self::Down { x, y } | Self::Move { x, y } => Some(Coordinate::new(x, y)),
            Self::Up | Self::Reset => None,
        }
    }
}
