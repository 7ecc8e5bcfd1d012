//! ninedots-engine: Puzzle validation engine for "nine dots, four lines" (sans-IO).
//!
//! Nine dots sit in a 3x3 grid and the player must strike all of them with
//! four connected straight strokes. The engine turns raw pointer input into
//! that game:
//!
//! - [`geometry`]: orientation and segment intersection tests.
//! - [`crossing`]: which dots a committed stroke touches.
//! - [`continuity`]: whether a new stroke starts where the last one ended.
//! - [`session`]: the state machine that owns strokes, touched flags and
//!   the timed warning, and decides when the puzzle is solved.
//!
//! This crate has **no I/O dependencies** -- it draws nothing and reads no
//! files. Hosts feed it pointer events, read back a [`SessionSnapshot`],
//! and draw it through a [`Renderer`]. SVG output lives in
//! `ninedots-export`.

pub mod clock;
pub mod continuity;
pub mod crossing;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod session;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event::PointerEvent;
pub use layout::{DOT_COUNT, DotPlacement, GridLayout};
pub use render::{Banner, Renderer, render};
pub use session::{PuzzleSession, SessionPhase, SessionSnapshot, StrokeCommit, WarningSnapshot};
pub use types::{
    ConfigError, Coordinate, GridPoint, MAX_STROKES, PuzzleConfig, Stroke, StrokeRejection,
};
