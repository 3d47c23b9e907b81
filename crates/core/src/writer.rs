//! Grid cursor engine: places labels one after another across a paginated
//! grid of label slots.
//!
//! The writer owns the only mutable state of a document session (the grid
//! cursor plus two page-lifecycle flags) and drives a [`Canvas`] collaborator.
//! Geometry flows one way: the resolved [`LabelTemplate`] is read-only, each
//! placement computes absolute page coordinates from it and the cursor.

use std::path::Path;

use tracing::{debug, trace};

use crate::canvas::{Canvas, LabelContent, LineStyle};
use crate::error::{ConfigError, Result as ConfigResult};
use crate::template::{CutLines, LabelTemplate, SheetFormat};
use crate::units::Unit;

/// Zero-based grid position of the next label slot to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    /// Column index in `[0, columns)`.
    pub column: u32,
    /// Row index in `[0, rows)`.
    pub row: u32,
}

/// Working unit and starting slot for a writer.
///
/// The start slot is 1-based, matching the numbering printed on label
/// sheets: `(1, 1)` is the top-left label. The first placed label lands
/// exactly on the start slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    pub unit: Unit,
    pub start_column: u32,
    pub start_row: u32,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            unit: Unit::Mm,
            start_column: 1,
            start_row: 1,
        }
    }
}

impl WriterOptions {
    /// Options with the given working unit and the default start slot.
    pub fn with_unit(unit: Unit) -> Self {
        Self {
            unit,
            ..Default::default()
        }
    }

    /// Set the 1-based starting slot (useful for partially used sheets).
    pub fn start_at(mut self, column: u32, row: u32) -> Self {
        self.start_column = column;
        self.start_row = row;
        self
    }
}

/// Places labels on a canvas, wrapping across columns, rows, and pages.
///
/// Each `add_*` call is one atomic state transition: it advances the cursor,
/// starts a new page when the grid is exhausted, draws guide lines once per
/// page when the template asks for them, and renders the supplied content
/// into the label's padded content box.
#[derive(Debug)]
pub struct LabelWriter<C: Canvas> {
    template: LabelTemplate,
    canvas: C,
    cursor: GridCursor,
    /// Grid filled up on the previous placement; open a page before the next.
    page_break_pending: bool,
    /// Guide lines already emitted for the current page.
    guides_drawn: bool,
}

impl<C: Canvas> LabelWriter<C> {
    /// Resolve `format` in the options' working unit and build a writer
    /// around `canvas`.
    ///
    /// Fails with [`ConfigError`] before any canvas interaction when the
    /// format is unknown or its geometry is invalid.
    pub fn new(
        format: impl Into<SheetFormat>,
        options: WriterOptions,
        canvas: C,
    ) -> ConfigResult<Self> {
        let template = LabelTemplate::resolve(format.into(), options.unit)?;
        Self::with_template(template, options, canvas)
    }

    /// Build a writer from an already resolved template.
    ///
    /// Used when the canvas itself needs the template first, e.g.
    /// [`crate::pdf::PdfCanvas::for_template`].
    pub fn with_template(
        template: LabelTemplate,
        options: WriterOptions,
        canvas: C,
    ) -> ConfigResult<Self> {
        if options.start_column < 1 || options.start_column > template.columns {
            return Err(ConfigError::InvalidTemplate(format!(
                "start column {} outside 1..={}",
                options.start_column, template.columns
            )));
        }
        if options.start_row < 1 || options.start_row > template.rows {
            return Err(ConfigError::InvalidTemplate(format!(
                "start row {} outside 1..={}",
                options.start_row, template.rows
            )));
        }
        debug!(
            paper = %template.paper_size,
            unit = %template.unit,
            columns = template.columns,
            rows = template.rows,
            "label writer ready"
        );
        Ok(Self {
            template,
            canvas,
            cursor: GridCursor {
                column: options.start_column - 1,
                row: options.start_row - 1,
            },
            page_break_pending: false,
            guides_drawn: false,
        })
    }

    /// The resolved template driving this writer.
    pub fn template(&self) -> &LabelTemplate {
        &self.template
    }

    /// The next slot to be filled.
    pub fn cursor(&self) -> GridCursor {
        self.cursor
    }

    /// Shared access to the canvas.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Finish the session and hand the canvas back (e.g. to save a PDF).
    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Place a plain-text label in the next slot.
    pub fn add_label(&mut self, text: &str) -> Result<(), C::Error> {
        let (width, height) = self.advance()?;
        self.canvas
            .place_content(width, height, &LabelContent::Text(text))
    }

    /// Place a marked-up label in the next slot.
    pub fn add_markup_label(&mut self, markup: &str) -> Result<(), C::Error> {
        let (width, height) = self.advance()?;
        self.canvas
            .place_content(width, height, &LabelContent::Markup(markup))
    }

    /// Place a marked-up label over a full-bleed background image.
    ///
    /// The image covers the entire label cell (content box plus padding on
    /// all sides); the text is rendered on top inside the content box.
    pub fn add_markup_label_with_background(
        &mut self,
        markup: &str,
        image: &Path,
    ) -> Result<(), C::Error> {
        let (width, height) = self.advance()?;
        let pad = self.template.padding;
        let (x, y) = self.canvas.cursor();
        self.canvas.draw_image(
            x - pad,
            y - pad,
            self.template.label_width,
            self.template.label_height,
            image,
        )?;
        self.canvas
            .place_content(width, height, &LabelContent::Markup(markup))
    }

    /// Move to the next label slot and return the content box size.
    ///
    /// Opens a pending page break, emits guide lines once per page, computes
    /// the padded origin for the slot about to be filled, and positions the
    /// canvas cursor there. The slot indices then advance with wraparound;
    /// exhausting the grid records a page break for the *next* call, so a
    /// document ending exactly on a full grid gets no trailing blank page.
    fn advance(&mut self) -> Result<(f64, f64), C::Error> {
        if self.page_break_pending {
            debug!("grid full, starting a new page");
            self.canvas.new_page()?;
            self.page_break_pending = false;
            self.guides_drawn = false;
        }
        if self.template.cut_lines.is_enabled() && !self.guides_drawn {
            self.draw_guides()?;
            self.guides_drawn = true;
        }

        let t = &self.template;
        let x = t.margin_left + f64::from(self.cursor.column) * t.pitch_x() + t.padding;
        let y = t.margin_top + f64::from(self.cursor.row) * t.pitch_y() + t.padding;
        trace!(
            column = self.cursor.column,
            row = self.cursor.row,
            x,
            y,
            "placing label"
        );
        self.canvas.set_cursor(x, y);

        self.cursor.column += 1;
        if self.cursor.column == self.template.columns {
            self.cursor.column = 0;
            self.cursor.row += 1;
            if self.cursor.row == self.template.rows {
                self.cursor.row = 0;
                self.page_break_pending = true;
            }
        }

        Ok((
            self.template.content_width(),
            self.template.content_height(),
        ))
    }

    /// Draw guide lines at every label boundary of the current page.
    ///
    /// Each column contributes its left and right boundary, each row its top
    /// and bottom, for `2*columns + 2*rows` boundaries total. Full mode spans
    /// the page; corner-only mode draws two short tick segments per boundary,
    /// stopping one unit inside the margin.
    fn draw_guides(&mut self) -> Result<(), C::Error> {
        let style = LineStyle::guide();
        let page_w = self.canvas.page_width();
        let page_h = self.canvas.page_height();
        let t = self.template.clone();
        trace!(mode = ?t.cut_lines, "drawing guide lines");

        for i in 0..t.columns {
            let left = t.margin_left + f64::from(i) * t.pitch_x();
            let right = left + t.pitch_x() - t.space_x;
            for x in [left, right] {
                match t.cut_lines {
                    CutLines::Full => {
                        self.canvas.draw_line(x, 0.0, x, page_h, &style)?;
                    }
                    CutLines::CornerOnly => {
                        self.canvas
                            .draw_line(x, 0.0, x, t.margin_top + 1.0, &style)?;
                        self.canvas
                            .draw_line(x, page_h - t.margin_top - 1.0, x, page_h, &style)?;
                    }
                    CutLines::Off => {}
                }
            }
        }

        for i in 0..t.rows {
            let top = t.margin_top + f64::from(i) * t.pitch_y();
            let bottom = top + t.pitch_y() - t.space_y;
            for y in [top, bottom] {
                match t.cut_lines {
                    CutLines::Full => {
                        self.canvas.draw_line(0.0, y, page_w, y, &style)?;
                    }
                    CutLines::CornerOnly => {
                        self.canvas
                            .draw_line(0.0, y, t.margin_left + 1.0, y, &style)?;
                        self.canvas
                            .draw_line(page_w - t.margin_left - 1.0, y, page_w, y, &style)?;
                    }
                    CutLines::Off => {}
                }
            }
        }

        Ok(())
    }
}
