//! The document-canvas capability consumed by the placement engine.
//!
//! The engine only decides *where* the next label's box is; everything that
//! touches ink goes through the [`Canvas`] trait. [`crate::pdf::PdfCanvas`]
//! is the shipping backend; [`RecordingCanvas`] captures calls for tests.

use std::path::{Path, PathBuf};

/// Line endcap shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// Shape drawn where two line segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// Visual style for a drawn line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    /// Stroke width, in the canvas working unit.
    pub width: f64,
    /// Stroke color as 8-bit RGB.
    pub color: (u8, u8, u8),
    /// Dash segment length; `None` draws a solid line.
    pub dash: Option<i64>,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl LineStyle {
    /// Thin dashed light-gray style used for cut/alignment guides, visually
    /// distinct from label content.
    pub fn guide() -> Self {
        LineStyle {
            width: 0.3,
            color: (200, 200, 200),
            dash: Some(1),
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }
}

/// Content to render inside one label's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelContent<'a> {
    /// Plain text; explicit line breaks are preserved.
    Text(&'a str),
    /// Lightly marked-up text. How much markup a backend honors is up to
    /// the backend; see [`crate::pdf::PdfCanvas`] for the shipping rules.
    Markup(&'a str),
}

/// Drawing surface the placement engine writes to.
///
/// Coordinates are in the template's working unit with the origin at the
/// top-left corner of the page, y growing downward. Placement is an explicit
/// two-step contract: [`set_cursor`](Canvas::set_cursor) positions the pen,
/// then [`place_content`](Canvas::place_content) renders into a box at that
/// position. The engine issues calls strictly in order and never overlaps
/// drawing requests.
pub trait Canvas {
    /// Backend failure type, surfaced to the caller unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open a fresh page; subsequent drawing lands there.
    fn new_page(&mut self) -> Result<(), Self::Error>;

    /// Position the pen at `(x, y)`.
    fn set_cursor(&mut self, x: f64, y: f64);

    /// Current pen position.
    fn cursor(&self) -> (f64, f64);

    /// Page width in the working unit.
    fn page_width(&self) -> f64;

    /// Page height in the working unit.
    fn page_height(&self) -> f64;

    /// Draw a straight line between two absolute points.
    fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: &LineStyle,
    ) -> Result<(), Self::Error>;

    /// Draw an image stretched over the given box.
    fn draw_image(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        source: &Path,
    ) -> Result<(), Self::Error>;

    /// Render content into a `width` x `height` box at the current cursor.
    fn place_content(
        &mut self,
        width: f64,
        height: f64,
        content: &LabelContent<'_>,
    ) -> Result<(), Self::Error>;
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    type Error = C::Error;

    fn new_page(&mut self) -> Result<(), Self::Error> {
        (**self).new_page()
    }

    fn set_cursor(&mut self, x: f64, y: f64) {
        (**self).set_cursor(x, y)
    }

    fn cursor(&self) -> (f64, f64) {
        (**self).cursor()
    }

    fn page_width(&self) -> f64 {
        (**self).page_width()
    }

    fn page_height(&self) -> f64 {
        (**self).page_height()
    }

    fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: &LineStyle,
    ) -> Result<(), Self::Error> {
        (**self).draw_line(x1, y1, x2, y2, style)
    }

    fn draw_image(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        source: &Path,
    ) -> Result<(), Self::Error> {
        (**self).draw_image(x, y, width, height, source)
    }

    fn place_content(
        &mut self,
        width: f64,
        height: f64,
        content: &LabelContent<'_>,
    ) -> Result<(), Self::Error> {
        (**self).place_content(width, height, content)
    }
}

/// One recorded drawing call (see [`RecordingCanvas`]).
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    NewPage,
    SetCursor {
        x: f64,
        y: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        source: PathBuf,
    },
    Content {
        width: f64,
        height: f64,
        text: String,
    },
}

/// In-memory canvas that records every drawing call.
///
/// Useful for asserting placement geometry without a PDF backend; all
/// operations are infallible.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    page_width: f64,
    page_height: f64,
    cursor: (f64, f64),
    ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    /// Create a canvas with the given page size (working unit).
    pub fn new(page_width: f64, page_height: f64) -> Self {
        Self {
            page_width,
            page_height,
            cursor: (0.0, 0.0),
            ops: Vec::new(),
        }
    }

    /// Every call recorded so far, in issue order.
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Number of pages: one plus the recorded page breaks.
    pub fn pages(&self) -> usize {
        1 + self
            .ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::NewPage))
            .count()
    }

    /// Recorded cursor positions, in issue order.
    pub fn cursor_positions(&self) -> Vec<(f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::SetCursor { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded line-draw calls.
    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::Line { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    type Error = std::convert::Infallible;

    fn new_page(&mut self) -> Result<(), Self::Error> {
        self.ops.push(CanvasOp::NewPage);
        Ok(())
    }

    fn set_cursor(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
        self.ops.push(CanvasOp::SetCursor { x, y });
    }

    fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    fn page_width(&self) -> f64 {
        self.page_width
    }

    fn page_height(&self) -> f64 {
        self.page_height
    }

    fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        _style: &LineStyle,
    ) -> Result<(), Self::Error> {
        self.ops.push(CanvasOp::Line { x1, y1, x2, y2 });
        Ok(())
    }

    fn draw_image(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        source: &Path,
    ) -> Result<(), Self::Error> {
        self.ops.push(CanvasOp::Image {
            x,
            y,
            width,
            height,
            source: source.to_path_buf(),
        });
        Ok(())
    }

    fn place_content(
        &mut self,
        width: f64,
        height: f64,
        content: &LabelContent<'_>,
    ) -> Result<(), Self::Error> {
        let text = match content {
            LabelContent::Text(t) | LabelContent::Markup(t) => (*t).to_string(),
        };
        self.ops.push(CanvasOp::Content {
            width,
            height,
            text,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas_tracks_cursor() {
        let mut canvas = RecordingCanvas::new(210.0, 297.0);
        assert_eq!(canvas.cursor(), (0.0, 0.0));
        canvas.set_cursor(7.5, 18.0);
        assert_eq!(canvas.cursor(), (7.5, 18.0));
        assert_eq!(canvas.cursor_positions(), vec![(7.5, 18.0)]);
    }

    #[test]
    fn test_recording_canvas_counts_pages() {
        let mut canvas = RecordingCanvas::new(210.0, 297.0);
        assert_eq!(canvas.pages(), 1);
        canvas.new_page().unwrap();
        canvas.new_page().unwrap();
        assert_eq!(canvas.pages(), 3);
    }

    #[test]
    fn test_recording_canvas_records_in_order() {
        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        canvas.set_cursor(1.0, 2.0);
        canvas
            .draw_line(0.0, 0.0, 100.0, 0.0, &LineStyle::guide())
            .unwrap();
        canvas
            .place_content(10.0, 5.0, &LabelContent::Text("hi"))
            .unwrap();
        assert_eq!(canvas.ops().len(), 3);
        assert!(matches!(canvas.ops()[0], CanvasOp::SetCursor { .. }));
        assert!(matches!(canvas.ops()[1], CanvasOp::Line { .. }));
        assert!(matches!(
            canvas.ops()[2],
            CanvasOp::Content { ref text, .. } if text == "hi"
        ));
    }

    #[test]
    fn test_canvas_impl_for_mut_reference() {
        fn scribble<C: Canvas>(mut canvas: C) -> Result<(), C::Error> {
            canvas.set_cursor(1.0, 1.0);
            canvas.new_page()
        }
        let mut canvas = RecordingCanvas::new(10.0, 10.0);
        scribble(&mut canvas).unwrap();
        assert_eq!(canvas.ops().len(), 2);
    }

    #[test]
    fn test_guide_style_is_light_and_dashed() {
        let style = LineStyle::guide();
        assert!(style.width < 1.0);
        assert!(style.dash.is_some());
        assert_eq!(style.color, (200, 200, 200));
    }
}
