//! SVG export of a puzzle board.
//!
//! Draws a [`SessionSnapshot`] through the engine's [`Renderer`] seam,
//! using the [`svg`] crate for document construction, XML escaping, and
//! number formatting:
//!
//! - dots become filled `<rect>` elements, green once touched and red
//!   otherwise,
//! - strokes become blue `<line>` elements, with the stroke still
//!   following the pointer dashed,
//! - the banner becomes a `<text>` element in the top-right corner.
//!
//! Optional [`SvgMetadata`] embeds `<title>` and `<desc>` elements.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::{Description, Element, Line, Rectangle, Title};
use svg::node::{Node, Text};

use ninedots_engine::{Banner, GridLayout, GridPoint, Renderer, SessionSnapshot, Stroke, render};

/// Fill of a dot no stroke has touched yet.
const UNTOUCHED_FILL: &str = "red";
/// Fill of a touched dot.
const TOUCHED_FILL: &str = "green";
/// Stroke color.
const STROKE_COLOR: &str = "blue";
/// Stroke width in pixels.
const STROKE_WIDTH: u32 = 5;
/// Dash pattern of the in-progress stroke.
const IN_PROGRESS_DASH: &str = "10 5";
/// Banner font size in pixels.
const BANNER_FONT_SIZE: u32 = 18;
/// Distance of the banner from the top-right corner, in pixels.
const BANNER_MARGIN: f64 = 12.0;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// The canvas the classic board is laid out for (600x500).
    pub const CLASSIC: Self = Self {
        width: GridLayout::CLASSIC_CANVAS_WIDTH,
        height: GridLayout::CLASSIC_CANVAS_HEIGHT,
    };
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Metadata to embed in the SVG document.
///
/// Both fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted before the board.
///
/// Text values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    ///
    /// The replay tool puts the script name and the final phase here.
    pub description: Option<&'a str>,
}

/// [`Renderer`] that accumulates an SVG document.
///
/// [`clear`](Renderer::clear) starts a fresh document, so one renderer
/// can be reused for several frames; [`finish`](Self::finish) returns the
/// last one as a string.
#[derive(Debug)]
pub struct SvgRenderer {
    canvas: CanvasSize,
    title: Option<String>,
    description: Option<String>,
    document: Document,
}

impl SvgRenderer {
    /// A renderer with an empty document of the given size.
    #[must_use]
    pub fn new(canvas: CanvasSize) -> Self {
        Self::with_metadata(canvas, &SvgMetadata::default())
    }

    /// A renderer whose documents start with `<title>`/`<desc>` taken from
    /// `metadata`.
    #[must_use]
    pub fn with_metadata(canvas: CanvasSize, metadata: &SvgMetadata<'_>) -> Self {
        let mut renderer = Self {
            canvas,
            title: metadata.title.map(str::to_owned),
            description: metadata.description.map(str::to_owned),
            document: Document::new(),
        };
        renderer.clear();
        renderer
    }

    /// Serialize the current document, including the XML declaration.
    #[must_use]
    pub fn finish(self) -> String {
        // The svg crate omits the XML declaration, so we prepend it.
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n",
            self.document
        )
    }
}

impl Renderer for SvgRenderer {
    fn clear(&mut self) {
        let mut doc = Document::new()
            .set("width", self.canvas.width)
            .set("height", self.canvas.height)
            .set("viewBox", (0, 0, self.canvas.width, self.canvas.height));
        if let Some(title) = &self.title {
            doc = doc.add(Title::new(title.as_str()));
        }
        if let Some(description) = &self.description {
            doc = doc.add(Description::new().add(Text::new(description.as_str())));
        }
        self.document = doc;
    }

    fn draw_point(&mut self, point: &GridPoint) {
        let fill = if point.touched {
            TOUCHED_FILL
        } else {
            UNTOUCHED_FILL
        };
        let rect = Rectangle::new()
            .set("x", point.x)
            .set("y", point.y)
            .set("width", point.width)
            .set("height", point.height)
            .set("fill", fill);
        self.document.append(rect);
    }

    fn draw_stroke(&mut self, stroke: &Stroke, in_progress: bool) {
        let mut line = Line::new()
            .set("x1", stroke.start.x)
            .set("y1", stroke.start.y)
            .set("x2", stroke.end.x)
            .set("y2", stroke.end.y)
            .set("stroke", STROKE_COLOR)
            .set("stroke-width", STROKE_WIDTH)
            .set("stroke-linecap", "round");
        if in_progress {
            line = line.set("stroke-dasharray", IN_PROGRESS_DASH);
        }
        self.document.append(line);
    }

    fn show_banner(&mut self, banner: &Banner) {
        let mut text = Element::new("text");
        text.assign("x", f64::from(self.canvas.width) - BANNER_MARGIN);
        text.assign("y", BANNER_MARGIN + f64::from(BANNER_FONT_SIZE));
        text.assign("text-anchor", "end");
        text.assign("font-family", "sans-serif");
        text.assign("font-weight", "bold");
        text.assign("font-size", BANNER_FONT_SIZE);
        text.assign("fill", banner_color(banner));
        text.append(Text::new(banner.text()));
        self.document.append(text);
    }
}

/// Banner colors: green for solved, red for out of strokes, amber for
/// warnings.
const fn banner_color(banner: &Banner) -> &'static str {
    match banner {
        Banner::Solved => "#15803d",
        Banner::OutOfStrokes => "#b91c1c",
        Banner::Warning(_) => "#a16207",
    }
}

/// Serialize a board snapshot into an SVG document string.
///
/// # Examples
///
/// ```
/// use ninedots_engine::PuzzleSession;
/// use ninedots_export::{CanvasSize, SvgMetadata, to_svg};
///
/// let session = PuzzleSession::default();
/// let metadata = SvgMetadata {
///     title: Some("fresh board"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&session.snapshot(), CanvasSize::CLASSIC, &metadata);
/// assert!(svg.contains("<title>fresh board</title>"));
/// assert_eq!(svg.matches("<rect").count(), 9);
/// ```
#[must_use]
pub fn to_svg(
    snapshot: &SessionSnapshot,
    canvas: CanvasSize,
    metadata: &SvgMetadata<'_>,
) -> String {
    let mut renderer = SvgRenderer::with_metadata(canvas, metadata);
    render(snapshot, &mut renderer);
    renderer.finish()
}
