//! Renderer seam.
//!
//! The engine does not draw. A host implements [`Renderer`] for its
//! canvas (or SVG, or terminal) and [`render`] replays a
//! [`SessionSnapshot`] onto it in a fixed order: clear, dots, strokes,
//! banner.

use serde::{Deserialize, Serialize};

use crate::session::SessionSnapshot;
use crate::types::{GridPoint, Stroke};

/// Message shown over the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Banner {
    /// Every dot is touched.
    Solved,
    /// All strokes are used without touching every dot.
    OutOfStrokes,
    /// A transient warning, e.g. a broken continuity attempt.
    Warning(String),
}

impl Banner {
    /// Text to display.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Solved => "Good job!",
            Self::OutOfStrokes => "You use all 4 lines!",
            Self::Warning(text) => text,
        }
    }
}

/// Drawing capability supplied by the host.
pub trait Renderer {
    /// Wipe the drawing surface.
    fn clear(&mut self);

    /// Draw one dot; `point.touched` selects its color.
    fn draw_point(&mut self, point: &GridPoint);

    /// Draw one stroke. `in_progress` is `true` for the stroke still
    /// following the pointer.
    fn draw_stroke(&mut self, stroke: &Stroke, in_progress: bool);

    /// Show a banner over the board.
    fn show_banner(&mut self, banner: &Banner);
}

/// Draw `snapshot` onto `renderer`.
pub fn render<R: Renderer + ?Sized>(snapshot: &SessionSnapshot, renderer: &mut R) {
    renderer.clear();
    for point in &snapshot.grid_points {
        renderer.draw_point(point);
    }
    let last = snapshot.strokes.len().saturating_sub(1);
    for (i, stroke) in snapshot.strokes.iter().enumerate() {
        renderer.draw_stroke(stroke, snapshot.painting && i == last);
    }
    if let Some(banner) = snapshot.banner() {
        renderer.show_banner(&banner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::layout::GridLayout;
    use crate::types::{Coordinate, PuzzleConfig};
    use crate::PuzzleSession;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Point(u32, bool),
        Stroke(Stroke, bool),
        Banner(Banner),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Renderer for Recorder {
        fn clear(&mut self) {
            self.0.push(Call::Clear);
        }

        fn draw_point(&mut self, point: &GridPoint) {
            self.0.push(Call::Point(point.id, point.touched));
        }

        fn draw_stroke(&mut self, stroke: &Stroke, in_progress: bool) {
            self.0.push(Call::Stroke(*stroke, in_progress));
        }

        fn show_banner(&mut self, banner: &Banner) {
            self.0.push(Call::Banner(banner.clone()));
        }
    }

    fn session() -> PuzzleSession<ManualClock> {
        let config = PuzzleConfig {
            layout: GridLayout::uniform(Coordinate::new(0.0, 0.0), 100.0, 10.0),
            ..PuzzleConfig::default()
        };
        PuzzleSession::with_clock(config, ManualClock::new()).unwrap()
    }

    #[test]
    fn banner_texts() {
        assert_eq!(Banner::Solved.text(), "Good job!");
        assert_eq!(Banner::OutOfStrokes.text(), "You use all 4 lines!");
        assert_eq!(Banner::Warning("careful".to_string()).text(), "careful");
    }

    #[test]
    fn empty_board_draws_clear_and_dots() {
        let mut rec = Recorder::default();
        render(&session().snapshot(), &mut rec);
        assert_eq!(rec.0.len(), 10);
        assert_eq!(rec.0[0], Call::Clear);
        assert_eq!(rec.0[1], Call::Point(0, false));
        assert_eq!(rec.0[9], Call::Point(8, false));
    }

    #[test]
    fn in_progress_stroke_is_flagged_last() {
        let mut s = session();
        s.pointer_down(Coordinate::new(5.0, 5.0)).unwrap();
        s.pointer_move(Coordinate::new(205.0, 5.0));
        s.pointer_up();
        s.pointer_down(Coordinate::new(205.0, 5.0)).unwrap();
        s.pointer_move(Coordinate::new(205.0, 105.0));

        let mut rec = Recorder::default();
        render(&s.snapshot(), &mut rec);
        let strokes: Vec<bool> = rec
            .0
            .iter()
            .filter_map(|call| match call {
                Call::Stroke(_, in_progress) => Some(*in_progress),
                _ => None,
            })
            .collect();
        assert_eq!(strokes, vec![false, true]);
        // Committed stroke touched the top row.
        assert!(rec.0.contains(&Call::Point(2, true)));
        assert!(rec.0.contains(&Call::Point(5, false)));
    }

    #[test]
    fn banner_is_drawn_last() {
        let mut s = session();
        s.pointer_down(Coordinate::new(5.0, 5.0)).unwrap();
        s.pointer_up();
        let _ = s.pointer_down(Coordinate::new(205.0, 205.0));

        let mut rec = Recorder::default();
        render(&s.snapshot(), &mut rec);
        assert!(matches!(rec.0.last(), Some(Call::Banner(Banner::Warning(_)))));
    }
}
