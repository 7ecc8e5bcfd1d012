//! ninedots-export: Board serializers (sans-IO)
//!
//! Turns a session snapshot into an output format. Currently supports SVG.

pub mod svg;

pub use svg::{CanvasSize, SvgMetadata, SvgRenderer, to_svg};
