//! The puzzle session: a state machine driven by pointer input.
//!
//! A [`PuzzleSession`] owns everything that changes during play: the
//! session's copy of the grid points and their `touched` flags, the
//! stroke list, the painting flag, and the timed continuity warning.
//!
//! ```text
//!            pointer_down (ok)               pointer_up
//!   Idle ---------------------> Drawing ------------------> Idle | Exhausted | Won
//!    ^  \                         |  ^
//!    |   `-- continuity fail      |  | pointer_move (update end only)
//!    |       (warning, stay)      `--'
//!    `---------------- reset (from any state) ----------------'
//! ```

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::continuity::{CONTINUITY_WARNING, is_continuation};
use crate::crossing;
use crate::event::PointerEvent;
use crate::render::Banner;
use crate::types::{
    ConfigError, Coordinate, GridPoint, MAX_STROKES, PuzzleConfig, Stroke, StrokeRejection,
};

/// Coarse state of a session, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No pointer down and strokes remain.
    Idle,
    /// A stroke is being drawn.
    Drawing,
    /// Every stroke is used and the puzzle is not solved.
    Exhausted,
    /// Every grid point is touched.
    Won,
}

/// A warning currently on screen.
#[derive(Debug, Clone, Copy)]
struct ActiveWarning<I> {
    text: &'static str,
    raised_at: I,
}

/// Warning text and how long it stays visible, as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningSnapshot {
    /// Message to display.
    pub text: String,
    /// Milliseconds until the warning clears itself.
    pub remaining_ms: u64,
}

/// What a committed stroke struck.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCommit {
    /// The committed stroke.
    pub stroke: Stroke,
    /// Ids of every grid point the stroke touches, including points that
    /// were already touched by earlier strokes.
    pub touched: BTreeSet<u32>,
    /// How many points this stroke touched for the first time.
    pub newly_touched: usize,
}

/// Read-only view of a session for renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Committed strokes, followed by the in-progress stroke while painting.
    pub strokes: Vec<Stroke>,
    /// Grid points with their `touched` flags.
    pub grid_points: Vec<GridPoint>,
    /// Whether the pointer is down and a stroke is being drawn.
    pub painting: bool,
    /// The continuity warning, if it has not expired yet.
    pub warning: Option<WarningSnapshot>,
    /// Whether every grid point is touched.
    pub won: bool,
    /// Strokes the player may still start.
    pub remaining_strokes: usize,
    /// Derived session state.
    pub phase: SessionPhase,
}

impl SessionSnapshot {
    /// The banner a renderer should show, if any.
    ///
    /// Out-of-strokes and solved banners only appear once the pointer is
    /// released; otherwise the continuity warning is shown while it is
    /// active.
    #[must_use]
    pub fn banner(&self) -> Option<Banner> {
        if self.painting {
            return self
                .warning
                .as_ref()
                .map(|w| Banner::Warning(w.text.clone()));
        }
        if self.remaining_strokes == 0 && !self.won {
            Some(Banner::OutOfStrokes)
        } else if self.won {
            Some(Banner::Solved)
        } else {
            self.warning
                .as_ref()
                .map(|w| Banner::Warning(w.text.clone()))
        }
    }

    /// Number of grid points touched so far.
    #[must_use]
    pub fn touched_count(&self) -> usize {
        self.grid_points.iter().filter(|p| p.touched).count()
    }
}

/// A single play session of the nine dots puzzle.
///
/// Generic over the [`Clock`] used to expire the continuity warning.
///
/// # Examples
///
/// ```
/// use ninedots_engine::{Coordinate, GridLayout, PuzzleConfig, PuzzleSession};
///
/// let config = PuzzleConfig {
///     layout: GridLayout::uniform(Coordinate::new(0.0, 0.0), 100.0, 10.0),
///     ..PuzzleConfig::default()
/// };
/// let mut session = PuzzleSession::new(config)?;
///
/// session.pointer_down(Coordinate::new(5.0, 5.0))?;
/// session.pointer_move(Coordinate::new(205.0, 205.0));
/// let commit = session.pointer_up().expect("a stroke was in progress");
///
/// assert_eq!(commit.touched.into_iter().collect::<Vec<_>>(), vec![0, 4, 8]);
/// assert_eq!(session.remaining_strokes(), 3);
/// assert!(!session.is_won());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct PuzzleSession<C: Clock = SystemClock> {
    config: PuzzleConfig,
    clock: C,
    grid_points: Vec<GridPoint>,
    strokes: Vec<Stroke>,
    painting: bool,
    pending_start: Option<Coordinate>,
    warning: Option<ActiveWarning<C::Instant>>,
    won: bool,
}

impl PuzzleSession<SystemClock> {
    /// Create a session on the platform clock.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails
    /// [`PuzzleConfig::validate`].
    pub fn new(config: PuzzleConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for PuzzleSession<SystemClock> {
    /// The classic board with default settings.
    fn default() -> Self {
        Self::from_valid_config(PuzzleConfig::default(), SystemClock)
    }
}

impl<C: Clock> PuzzleSession<C> {
    /// Create a session that reads time from `clock`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails
    /// [`PuzzleConfig::validate`].
    pub fn with_clock(config: PuzzleConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, clock))
    }

    fn from_valid_config(config: PuzzleConfig, clock: C) -> Self {
        let grid_points = config.layout.grid_points();
        Self {
            config,
            clock,
            grid_points,
            strokes: Vec::with_capacity(MAX_STROKES),
            painting: false,
            pending_start: None,
            warning: None,
            won: false,
        }
    }

    // --- Input handlers ---

    /// Pointer pressed at `pos`: try to start a new stroke.
    ///
    /// The stroke budget is checked before anything else changes, so a
    /// refused pointer-down never touches the painting flag.
    ///
    /// # Errors
    ///
    /// - [`StrokeRejection::AlreadyDrawing`] if a stroke is in progress.
    /// - [`StrokeRejection::CapacityExceeded`] if all strokes are used.
    /// - [`StrokeRejection::ContinuityViolation`] if `pos` is not close
    ///   enough to the previous stroke's end. The continuity warning is
    ///   raised (replacing any earlier one).
    pub fn pointer_down(&mut self, pos: Coordinate) -> Result<(), StrokeRejection> {
        self.expire_warning();

        if self.painting {
            tracing::debug!(x = pos.x, y = pos.y, "pointer down ignored: already drawing");
            return Err(StrokeRejection::AlreadyDrawing);
        }
        if self.strokes.len() >= MAX_STROKES {
            tracing::debug!(x = pos.x, y = pos.y, "pointer down ignored: no strokes left");
            return Err(StrokeRejection::CapacityExceeded);
        }
        if let Some(last) = self.strokes.last()
            && !is_continuation(last.end, pos, self.config.continuity_tolerance)
        {
            let rejection = StrokeRejection::ContinuityViolation {
                previous_end: last.end,
                proposed_start: pos,
            };
            tracing::debug!(%rejection, "stroke rejected");
            self.raise_warning(CONTINUITY_WARNING);
            return Err(rejection);
        }

        self.strokes.push(Stroke::point(pos));
        self.pending_start = Some(pos);
        self.painting = true;
        tracing::debug!(
            stroke = self.strokes.len(),
            x = pos.x,
            y = pos.y,
            "stroke started",
        );
        Ok(())
    }

    /// Pointer moved to `pos`: update the in-progress stroke's end.
    ///
    /// Does nothing unless a stroke is being drawn. Constant time; crossing
    /// evaluation waits for [`pointer_up`](Self::pointer_up).
    pub fn pointer_move(&mut self, pos: Coordinate) {
        if !self.painting {
            return;
        }
        if let (Some(start), Some(last)) = (self.pending_start, self.strokes.last_mut()) {
            *last = Stroke::new(start, pos);
        }
    }

    /// Pointer released: commit the in-progress stroke.
    ///
    /// Evaluates the committed stroke against every grid point, marks the
    /// touched ones, and re-checks the win condition. Returns `None` when
    /// no stroke was in progress.
    pub fn pointer_up(&mut self) -> Option<StrokeCommit> {
        self.expire_warning();

        if !self.painting {
            return None;
        }
        self.painting = false;
        self.pending_start = None;

        let stroke = *self.strokes.last()?;
        let touched = crossing::evaluate(&stroke, &self.grid_points);
        let newly_touched = crossing::mark_touched(&mut self.grid_points, &touched);

        let was_won = self.won;
        self.won = self.grid_points.iter().all(|p| p.touched);

        tracing::debug!(
            stroke = self.strokes.len(),
            ?touched,
            newly_touched,
            remaining = self.remaining_strokes(),
            "stroke committed",
        );
        if self.won && !was_won {
            tracing::info!(strokes = self.strokes.len(), "puzzle solved");
        }

        Some(StrokeCommit {
            stroke,
            touched,
            newly_touched,
        })
    }

    /// Start over: clear strokes, touched flags, warning, and painting.
    pub fn reset(&mut self) {
        self.grid_points = self.config.layout.grid_points();
        self.strokes.clear();
        self.painting = false;
        self.pending_start = None;
        self.warning = None;
        self.won = false;
        tracing::debug!("session reset");
    }

    /// Dispatch a [`PointerEvent`] to the matching handler.
    ///
    /// # Errors
    ///
    /// Propagates the [`StrokeRejection`] of a refused
    /// [`PointerEvent::Down`]. Other events always succeed.
    pub fn handle(&mut self, event: PointerEvent) -> Result<(), StrokeRejection> {
        match event {
            PointerEvent::Down { x, y } => self.pointer_down(Coordinate::new(x, y)),
            PointerEvent::Move { x, y } => {
                self.pointer_move(Coordinate::new(x, y));
                Ok(())
            }
            PointerEvent::Up => {
                self.pointer_up();
                Ok(())
            }
            PointerEvent::Reset => {
                self.reset();
                Ok(())
            }
        }
    }

    // --- Warning bookkeeping ---

    /// Show `text`, replacing any warning already on screen.
    fn raise_warning(&mut self, text: &'static str) {
        self.warning = Some(ActiveWarning {
            text,
            raised_at: self.clock.now(),
        });
    }

    /// Time left before the current warning clears, if it has not yet.
    fn warning_remaining(&self) -> Option<(&'static str, Duration)> {
        let warning = self.warning.as_ref()?;
        let elapsed = self.clock.elapsed(&warning.raised_at);
        self.warning_duration()
            .checked_sub(elapsed)
            .filter(|left| !left.is_zero())
            .map(|left| (warning.text, left))
    }

    fn expire_warning(&mut self) {
        if self.warning.is_some() && self.warning_remaining().is_none() {
            self.warning = None;
        }
    }

    const fn warning_duration(&self) -> Duration {
        Duration::from_millis(self.config.warning_duration_ms)
    }

    // --- Accessors ---

    /// Committed strokes, followed by the in-progress stroke while painting.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The session's grid points and their `touched` flags.
    #[must_use]
    pub fn grid_points(&self) -> &[GridPoint] {
        &self.grid_points
    }

    /// Whether a stroke is being drawn.
    #[must_use]
    pub const fn is_painting(&self) -> bool {
        self.painting
    }

    /// Where the in-progress stroke started.
    #[must_use]
    pub const fn pending_start(&self) -> Option<Coordinate> {
        self.pending_start
    }

    /// Whether every grid point has been touched.
    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.won
    }

    /// Strokes the player may still start.
    #[must_use]
    pub fn remaining_strokes(&self) -> usize {
        MAX_STROKES.saturating_sub(self.strokes.len())
    }

    /// Number of touched grid points.
    #[must_use]
    pub fn touched_count(&self) -> usize {
        self.grid_points.iter().filter(|p| p.touched).count()
    }

    /// Number of grid points still untouched.
    #[must_use]
    pub fn untouched_count(&self) -> usize {
        self.grid_points.len() - self.touched_count()
    }

    /// The active warning text, or `None` once it has expired.
    #[must_use]
    pub fn warning(&self) -> Option<&'static str> {
        self.warning_remaining().map(|(text, _)| text)
    }

    /// Current coarse state.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.painting {
            SessionPhase::Drawing
        } else if self.won {
            SessionPhase::Won
        } else if self.strokes.len() >= MAX_STROKES {
            SessionPhase::Exhausted
        } else {
            SessionPhase::Idle
        }
    }

    /// The configuration the session was built with.
    #[must_use]
    pub const fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// The session's clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// A read-only copy of everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let warning = self
            .warning_remaining()
            .map(|(text, left)| WarningSnapshot {
                text: text.to_string(),
                remaining_ms: u64::try_from(left.as_millis()).unwrap_or(u64::MAX),
            });
        SessionSnapshot {
            strokes: self.strokes.clone(),
            grid_points: self.grid_points.clone(),
            painting: self.painting,
            warning,
            won: self.won,
            remaining_strokes: self.remaining_strokes(),
            phase: self.phase(),
        }
    }
}
