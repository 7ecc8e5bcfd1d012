//! Replay scripts: timestamped pointer events and the report they produce.

use std::fmt::Write as _;
use std::time::Duration;

use ninedots_engine::{
    DOT_COUNT, ManualClock, PointerEvent, PuzzleSession, SessionSnapshot, StrokeRejection,
};
use serde::{Deserialize, Serialize};

/// One scripted input.
///
/// `at_ms` is the time since the start of the replay. Steps are applied in
/// file order; a timestamp earlier than the previous one leaves the clock
/// where it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds since the start of the replay.
    #[serde(default)]
    pub at_ms: u64,
    /// The pointer event to deliver.
    pub event: PointerEvent,
}

/// Parse a script from its JSON form (an array of [`ScriptStep`]).
///
/// # Errors
///
/// Returns the [`serde_json::Error`] for malformed JSON or unknown event
/// types.
pub fn parse(json: &str) -> Result<Vec<ScriptStep>, serde_json::Error> {
    serde_json::from_str(json)
}

/// A pointer-down the session refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    /// Index of the step in the script.
    pub step: usize,
    /// Script time of the step.
    pub at_ms: u64,
    /// Why the stroke was refused.
    pub reason: String,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Number of steps applied.
    pub steps: usize,
    /// Strokes committed by pointer-up events.
    pub commits: usize,
    /// Refused pointer-downs, in script order.
    pub rejections: Vec<Rejection>,
    /// Board state after the last step.
    pub snapshot: SessionSnapshot,
}

/// Feed `steps` through `session`, advancing its clock to each step's
/// timestamp first.
///
/// With `trace`, every step and its effect is logged at `info` level.
pub fn replay(
    session: &mut PuzzleSession<ManualClock>,
    steps: &[ScriptStep],
    trace: bool,
) -> ReplayReport {
    let mut commits = 0;
    let mut rejections = Vec::new();

    for (i, step) in steps.iter().enumerate() {
        session.clock().set(Duration::from_millis(step.at_ms));

        let outcome = match step.event {
            PointerEvent::Up => {
                let commit = session.pointer_up();
                if let Some(commit) = &commit {
                    commits += 1;
                    if trace {
                        tracing::info!(
                            step = i,
                            at_ms = step.at_ms,
                            touched = ?commit.touched,
                            newly_touched = commit.newly_touched,
                            "stroke committed"
                        );
                    }
                }
                Ok(())
            }
            event => session.handle(event),
        };

        if let Err(rejection) = outcome {
            record_rejection(&mut rejections, i, step.at_ms, rejection);
        }
        if trace {
            tracing::info!(
                step = i,
                at_ms = step.at_ms,
                event = ?step.event,
                phase = ?session.phase(),
                "step applied"
            );
        }
    }

    ReplayReport {
        steps: steps.len(),
        commits,
        rejections,
        snapshot: session.snapshot(),
    }
}

fn record_rejection(
    rejections: &mut Vec<Rejection>,
    step: usize,
    at_ms: u64,
    rejection: StrokeRejection,
) {
    rejections.push(Rejection {
        step,
        at_ms,
        reason: rejection.to_string(),
    });
}

impl ReplayReport {
    /// Format a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let snap = &self.snapshot;
        let mut out = String::new();

        let _ = writeln!(out, "Replay Report\n{}", "=".repeat(40));
        let _ = writeln!(out, "Steps applied:     {}", self.steps);
        let _ = writeln!(out, "Strokes committed: {}", self.commits);
        let _ = writeln!(out, "Strokes left:      {}", snap.remaining_strokes);
        let _ = writeln!(
            out,
            "Dots touched:      {}/{DOT_COUNT}",
            snap.touched_count()
        );
        let _ = writeln!(out, "Phase:             {:?}", snap.phase);
        match snap.banner() {
            Some(banner) => {
                let _ = writeln!(out, "Banner:            {}", banner.text());
            }
            None => {
                let _ = writeln!(out, "Banner:            (none)");
            }
        }

        if !self.rejections.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Rejected strokes");
            let _ = writeln!(out, "{}", "-".repeat(40));
            for r in &self.rejections {
                let _ = writeln!(out, "step {:>4} @ {:>6}ms  {}", r.step, r.at_ms, r.reason);
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{:<4} {:>8} {:>8} {}", "Dot", "x", "y", "Touched");
        let _ = writeln!(out, "{}", "-".repeat(30));
        for p in &snap.grid_points {
            let _ = writeln!(
                out,
                "{:<4} {:>8.1} {:>8.1} {}",
                p.id,
                p.x,
                p.y,
                if p.touched { "yes" } else { "no" },
            );
        }

        out
    }
}
