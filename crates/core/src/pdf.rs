//! PDF document canvas backed by `printpdf`.
//!
//! Translates the engine's top-left working-unit coordinates into printpdf's
//! bottom-left millimeter space. Content rendering is deliberately small:
//! a builtin Helvetica font, explicit line breaks, light markup flattening,
//! and background images stretched over the label cell. Anything fancier
//! belongs in a custom [`Canvas`] implementation.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{
    image_crate, BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line,
    LineCapStyle, LineDashPattern, LineJoinStyle, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use thiserror::Error;
use tracing::{debug, trace};

use crate::canvas::{Canvas, LabelContent, LineCap, LineJoin, LineStyle};
use crate::template::LabelTemplate;
use crate::units::{Unit, MM_PER_INCH};

/// Font size used for label text, in points.
const FONT_SIZE_PT: f64 = 10.0;
/// Line height used for label text, in points.
const LINE_HEIGHT_PT: f64 = 12.0;
/// Points per millimeter.
const PT_PER_MM: f64 = 72.0 / MM_PER_INCH;
/// Resolution background images are placed at before scaling to the cell.
const IMAGE_DPI: f64 = 300.0;

/// Failures from the PDF backend.
#[derive(Error, Debug)]
pub enum PdfCanvasError {
    /// The template names a paper size this backend does not know.
    #[error("unknown paper size: {0}. Known: A4, LETTER, LEGAL")]
    UnknownPaperSize(String),

    /// printpdf rejected a drawing or save operation.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// A background image could not be loaded or decoded.
    #[error("failed to load image '{path}': {message}")]
    Image { path: PathBuf, message: String },

    /// Writing the finished document to disk failed.
    #[error("failed to write PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// Physical page size in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PaperSize {
    /// ISO A4, 210 x 297 mm.
    pub const A4: PaperSize = PaperSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };
    /// US Letter, 8.5 x 11 in.
    pub const LETTER: PaperSize = PaperSize {
        width_mm: 215.9,
        height_mm: 279.4,
    };
    /// US Legal, 8.5 x 14 in.
    pub const LEGAL: PaperSize = PaperSize {
        width_mm: 215.9,
        height_mm: 355.6,
    };

    /// Look up a paper size by the names used in template records.
    pub fn named(name: &str) -> Option<PaperSize> {
        match name.to_ascii_uppercase().as_str() {
            "A4" => Some(PaperSize::A4),
            "LETTER" => Some(PaperSize::LETTER),
            "LEGAL" => Some(PaperSize::LEGAL),
            _ => None,
        }
    }
}

/// [`Canvas`] implementation producing a real PDF document.
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    paper: PaperSize,
    unit: Unit,
    cursor: (f64, f64),
    page_count: usize,
}

impl PdfCanvas {
    /// Create a canvas sized for the given template's paper, working in the
    /// template's unit.
    pub fn for_template(template: &LabelTemplate, title: &str) -> Result<Self, PdfCanvasError> {
        let paper = PaperSize::named(&template.paper_size)
            .ok_or_else(|| PdfCanvasError::UnknownPaperSize(template.paper_size.clone()))?;
        Self::new(paper, template.unit, title)
    }

    /// Create a canvas with an explicit paper size and working unit.
    pub fn new(paper: PaperSize, unit: Unit, title: &str) -> Result<Self, PdfCanvasError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(paper.width_mm as f32), Mm(paper.height_mm as f32), "Page 1");
        let layer = doc.get_page(page).get_layer(layer);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PdfCanvasError::Pdf(e.to_string()))?;
        debug!(title, width_mm = paper.width_mm, height_mm = paper.height_mm, "PDF canvas ready");
        Ok(Self {
            doc,
            layer,
            font,
            paper,
            unit,
            cursor: (0.0, 0.0),
            page_count: 1,
        })
    }

    /// Pages created so far.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Finish the document and write it to `path`.
    pub fn save(self, path: &Path) -> Result<(), PdfCanvasError> {
        debug!(?path, pages = self.page_count, "saving PDF");
        let file = File::create(path)?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| PdfCanvasError::Pdf(e.to_string()))
    }

    /// Finish the document and return its bytes.
    pub fn to_bytes(self) -> Result<Vec<u8>, PdfCanvasError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| PdfCanvasError::Pdf(e.to_string()))
    }

    fn mm(&self, v: f64) -> f64 {
        self.unit.convert(v, Unit::Mm)
    }

    fn x_mm(&self, x: f64) -> Mm {
        Mm(self.mm(x) as f32)
    }

    /// Flip a top-left y coordinate into printpdf's bottom-left space.
    fn flip_y(&self, y: f64) -> Mm {
        Mm((self.paper.height_mm - self.mm(y)) as f32)
    }
}

impl Canvas for PdfCanvas {
    type Error = PdfCanvasError;

    fn new_page(&mut self) -> Result<(), PdfCanvasError> {
        self.page_count += 1;
        let (page, layer) = self.doc.add_page(
            Mm(self.paper.width_mm as f32),
            Mm(self.paper.height_mm as f32),
            format!("Page {}", self.page_count),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        debug!(page = self.page_count, "opened new page");
        Ok(())
    }

    fn set_cursor(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
    }

    fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    fn page_width(&self) -> f64 {
        Unit::Mm.convert(self.paper.width_mm, self.unit)
    }

    fn page_height(&self) -> f64 {
        Unit::Mm.convert(self.paper.height_mm, self.unit)
    }

    fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: &LineStyle,
    ) -> Result<(), PdfCanvasError> {
        let (r, g, b) = style.color;
        self.layer.set_outline_color(Color::Rgb(Rgb::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            None,
        )));
        self.layer
            .set_outline_thickness((self.mm(style.width) * PT_PER_MM) as f32);
        self.layer.set_line_dash_pattern(LineDashPattern {
            dash_1: style.dash,
            ..Default::default()
        });
        self.layer.set_line_cap_style(match style.cap {
            LineCap::Butt => LineCapStyle::Butt,
            LineCap::Round => LineCapStyle::Round,
            LineCap::Square => LineCapStyle::ProjectingSquare,
        });
        self.layer.set_line_join_style(match style.join {
            LineJoin::Miter => LineJoinStyle::Miter,
            LineJoin::Round => LineJoinStyle::Round,
            // printpdf names the bevel join variant `Limit`; it maps to
            // PDF line join style 2, which is bevel.
            LineJoin::Bevel => LineJoinStyle::Limit,
        });
        self.layer.add_line(Line {
            points: vec![
                (Point::new(self.x_mm(x1), self.flip_y(y1)), false),
                (Point::new(self.x_mm(x2), self.flip_y(y2)), false),
            ],
            is_closed: false,
        });
        Ok(())
    }

    fn draw_image(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        source: &Path,
    ) -> Result<(), PdfCanvasError> {
        let dynamic = image_crate::open(source).map_err(|e| PdfCanvasError::Image {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;
        let (px_w, px_h) = (dynamic.width(), dynamic.height());
        let image = Image::from_dynamic_image(&dynamic);

        // Native placement size at IMAGE_DPI, scaled to fill the target box.
        let native_w = f64::from(px_w) * MM_PER_INCH / IMAGE_DPI;
        let native_h = f64::from(px_h) * MM_PER_INCH / IMAGE_DPI;
        let target_w = self.mm(width);
        let target_h = self.mm(height);
        trace!(?source, target_w, target_h, "embedding background image");
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(self.x_mm(x)),
                // printpdf anchors images at their bottom-left corner.
                translate_y: Some(Mm((self.paper.height_mm - self.mm(y) - target_h) as f32)),
                scale_x: Some((target_w / native_w) as f32),
                scale_y: Some((target_h / native_h) as f32),
                dpi: Some(IMAGE_DPI as f32),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn place_content(
        &mut self,
        width: f64,
        height: f64,
        content: &LabelContent<'_>,
    ) -> Result<(), PdfCanvasError> {
        let lines = match content {
            LabelContent::Text(text) => text.lines().map(str::to_owned).collect::<Vec<_>>(),
            LabelContent::Markup(markup) => flatten_markup(markup),
        };
        let (x, y) = self.cursor;
        trace!(width, height, lines = lines.len(), "placing content");

        let line_height_mm = LINE_HEIGHT_PT / PT_PER_MM;
        // Clip to the content box; at least one line always fits the API.
        let max_lines = ((self.mm(height) / line_height_mm).floor() as usize).max(1);

        self.layer.begin_text_section();
        self.layer.set_font(&self.font, FONT_SIZE_PT as f32);
        self.layer.set_line_height(LINE_HEIGHT_PT as f32);
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        // First baseline sits one line height below the top of the box.
        self.layer.set_text_cursor(
            self.x_mm(x),
            Mm((self.paper.height_mm - self.mm(y) - line_height_mm) as f32),
        );
        for (i, line) in lines.iter().take(max_lines).enumerate() {
            if i > 0 {
                self.layer.add_line_break();
            }
            self.layer.write_text(line.clone(), &self.font);
        }
        self.layer.end_text_section();
        Ok(())
    }
}

/// Flatten light markup into text lines.
///
/// `<br>` and the closers of common block elements break lines; every other
/// tag is stripped; a handful of common entities are decoded. This is not an
/// HTML engine and does not try to be one.
fn flatten_markup(markup: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        push_text(&mut current, &rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            // Unterminated tag: keep the remainder as literal text.
            push_text(&mut current, &rest[open..]);
            rest = "";
            break;
        };
        let tag = &rest[open + 1..open + close];
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        let closing = tag.starts_with('/');
        let breaks = name == "br"
            || (closing && matches!(name.as_str(), "p" | "div" | "li" | "tr" | "h1" | "h2" | "h3"));
        if breaks {
            lines.push(std::mem::take(&mut current));
        }
        rest = &rest[open + close + 1..];
    }
    push_text(&mut current, rest);
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn push_text(line: &mut String, raw: &str) {
    let decoded = raw
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    line.push_str(&decoded);
}
