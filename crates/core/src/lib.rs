//! # label-grid-core
//!
//! Placement geometry for printing discrete rectangular labels (address
//! stickers, badges, business cards) onto sheet templates.
//!
//! The core is a grid cursor engine: given a named preset such as Avery
//! `"5160"` or a custom geometry record, it deterministically computes the
//! absolute page coordinates and content box for each successive label,
//! wrapping across columns, rows, and pages, and optionally drawing cut/
//! alignment guide lines. Everything that touches ink goes through the
//! [`Canvas`] trait; [`PdfCanvas`] is the shipping PDF backend.
//!
//! ## Quick start
//!
//! ```rust
//! use label_grid_core::{LabelWriter, RecordingCanvas, WriterOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     // US Letter is 215.9 x 279.4 mm.
//!     let canvas = RecordingCanvas::new(215.9, 279.4);
//!     let mut writer = LabelWriter::new("5160", WriterOptions::default(), canvas)?;
//!
//!     writer.add_label("John Doe\n42 Example Road\nSpringfield")?;
//!     writer.add_label("Jane Roe\n7 Sample Street\nShelbyville")?;
//!
//!     // 3 columns x 10 rows per page; two labels fit on page one.
//!     assert_eq!(writer.canvas().pages(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Producing a PDF
//!
//! ```rust,no_run
//! use std::path::Path;
//! use label_grid_core::{
//!     LabelTemplate, LabelWriter, PdfCanvas, Unit, WriterOptions,
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     let template = LabelTemplate::resolve("L7163".into(), Unit::Mm)?;
//!     let canvas = PdfCanvas::for_template(&template, "address labels")?;
//!     let mut writer = LabelWriter::with_template(template, WriterOptions::default(), canvas)?;
//!
//!     for recipient in ["ACME Corp<br>1 Main St", "Globex<br>2 High St"] {
//!         writer.add_markup_label(recipient)?;
//!     }
//!     writer.into_canvas().save(Path::new("labels.pdf"))?;
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod error;
pub mod formats;
pub mod pdf;
pub mod template;
pub mod units;
pub mod writer;

// Re-export main types for convenience
pub use canvas::{Canvas, CanvasOp, LabelContent, LineCap, LineJoin, LineStyle, RecordingCanvas};
pub use error::{ConfigError, Result};
pub use formats::{preset, PRESET_KEYS};
pub use pdf::{PaperSize, PdfCanvas, PdfCanvasError};
pub use template::{CutLines, LabelTemplate, SheetFormat, TemplateSpec, DEFAULT_PADDING_MM};
pub use units::{Unit, MM_PER_INCH};
pub use writer::{GridCursor, LabelWriter, WriterOptions};

/// Initialize the library's logging.
/// Call this once at application startup if you want to see logs.
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
}
