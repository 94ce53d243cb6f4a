//! SVG rendering of a session board.
//!
//! The document uses board-percentage units as user space (`0 0 100 100`),
//! stretched to the session's board size in pixels. Pieces are drawn in
//! stacking order at their display positions, so an active drag shows the
//! dragged group at its live offset.

use std::fmt::Write as _;

use tesserae_core::{Coord, Piece, PieceShape, Point};
use tesserae_game::Session;

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Draw piece outlines.
    pub outlines: bool,
    /// Draw the grid of target cells under the pieces.
    pub grid: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            outlines: true,
            grid: true,
        }
    }
}

/// Renders the board as a standalone SVG document.
#[must_use]
pub fn render_svg(session: &Session, options: RenderOptions) -> String {
    let board = session.board_size();
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 100 100\" preserveAspectRatio=\"none\">",
        Coord(board.width),
        Coord(board.height)
    );

    svg.push_str("<rect width=\"100\" height=\"100\" fill=\"#2b2b2b\"/>\n");

    if options.grid {
        let grid = session.grid();
        for cell in grid.cells() {
            let origin = grid.cell_origin(cell);
            let _ = writeln!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"#444\" stroke-width=\"0.1\"/>",
                Coord(origin.x),
                Coord(origin.y),
                Coord(grid.cell_width()),
                Coord(grid.cell_height())
            );
        }
    }

    for piece in session.pieces() {
        let position = session.display_position(piece.id).unwrap_or(piece.current);
        render_piece(&mut svg, session.image(), piece, position, options);
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_piece(
    svg: &mut String,
    image: Option<&str>,
    piece: &Piece,
    position: Point,
    options: RenderOptions,
) {
    // Mosaic outlines live in solved-layout coordinates and are translated
    // into place; classic rectangles are drawn where they are.
    let (translate, anchor) = match piece.shape {
        PieceShape::Classic { .. } => (Point::ZERO, position),
        PieceShape::Mosaic { .. } => (position - piece.correct, piece.correct),
    };
    let center = anchor + Point::new(piece.width / 2.0, piece.height / 2.0);
    let _ = writeln!(
        svg,
        "<g data-piece=\"{}\" transform=\"translate({}) rotate({} {})\">",
        piece.id,
        translate,
        piece.rotation.degrees(),
        center
    );
    let _ = writeln!(
        svg,
        "<clipPath id=\"clip-{}\">{}</clipPath>",
        piece.id,
        outline_at(piece, anchor, "")
    );

    match image {
        Some(href) => {
            // The whole image is laid over the board so that the clip shape
            // reveals the region the piece shows when solved.
            let origin = anchor - piece.correct;
            let _ = writeln!(
                svg,
                "<image href=\"{}\" x=\"{}\" y=\"{}\" width=\"100\" height=\"100\" preserveAspectRatio=\"none\" clip-path=\"url(#clip-{})\"/>",
                escape(href),
                Coord(origin.x),
                Coord(origin.y),
                piece.id
            );
        }
        None => {
            let hue = piece.id.index() * 137 % 360;
            let fill = format!(" fill=\"hsl({hue}, 45%, 55%)\"");
            let _ = writeln!(svg, "{}", outline_at(piece, anchor, &fill));
        }
    }

    if options.outlines {
        let stroke = if piece.locked { "#ffffff40" } else { "#ffffffc0" };
        let attrs = format!(" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"0.2\"");
        let _ = writeln!(svg, "{}", outline_at(piece, anchor, &attrs));
    }
    svg.push_str("</g>\n");
}

/// The piece's outline with its bounding box at `anchor`.
fn outline_at(piece: &Piece, anchor: Point, attrs: &str) -> String {
    match &piece.shape {
        PieceShape::Classic { .. } => format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>",
            Coord(anchor.x),
            Coord(anchor.y),
            Coord(piece.width),
            Coord(piece.height)
        ),
        PieceShape::Mosaic { path, .. } => format!("<path d=\"{path}\"{attrs}/>"),
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
