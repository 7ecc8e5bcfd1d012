//! Integration test: play full games on the classic board and export each to SVG.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use ninedots_engine::{Coordinate, GridLayout, ManualClock, PuzzleConfig, PuzzleSession};
use ninedots_export::{CanvasSize, SvgMetadata, to_svg};

fn classic_session() -> PuzzleSession<ManualClock> {
    PuzzleSession::with_clock(PuzzleConfig::default(), ManualClock::new()).unwrap()
}

/// Centre of the dot at `(col, row)` on the classic board, allowing
/// columns and rows outside the grid.
fn centre(col: f64, row: f64) -> Coordinate {
    let o = GridLayout::CLASSIC_ORIGIN;
    let half = GridLayout::CLASSIC_DOT_SIZE / 2.0;
    Coordinate::new(
        o.x + half + col * GridLayout::CLASSIC_SPACING,
        o.y + half + row * GridLayout::CLASSIC_SPACING,
    )
}

fn draw(session: &mut PuzzleSession<ManualClock>, path: &[(f64, f64)]) {
    for pair in path.windows(2) {
        session.pointer_down(centre(pair[0].0, pair[0].1)).unwrap();
        session.pointer_move(centre(pair[1].0, pair[1].1));
        session.pointer_up().expect("stroke should commit");
    }
}

#[test]
fn solved_board_exports_all_green_with_banner() {
    let mut session = classic_session();
    draw(
        &mut session,
        &[(0.0, 0.0), (3.0, 0.0), (0.0, 3.0), (0.0, 0.0), (2.0, 2.0)],
    );
    assert!(session.is_won());

    let metadata = SvgMetadata {
        title: Some("solved"),
        description: Some("phase: won"),
    };
    let svg = to_svg(&session.snapshot(), CanvasSize::CLASSIC, &metadata);
    eprintln!("SVG output: {} bytes", svg.len());

    assert_eq!(svg.matches(r#"fill="green""#).count(), 9);
    assert!(!svg.contains(r#"fill="red""#));
    assert_eq!(svg.matches("<line").count(), 4);
    assert!(svg.contains("Good job!"));
    assert!(svg.contains("<title>solved</title>"));
}

#[test]
fn exhausted_board_exports_out_of_strokes_banner() {
    let mut session = classic_session();
    draw(
        &mut session,
        &[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)],
    );
    assert!(!session.is_won());

    let svg = to_svg(&session.snapshot(), CanvasSize::CLASSIC, &SvgMetadata::default());
    assert_eq!(svg.matches(r#"fill="green""#).count(), 8);
    assert_eq!(svg.matches(r#"fill="red""#).count(), 1);
    assert!(svg.contains("You use all 4 lines!"));
}
