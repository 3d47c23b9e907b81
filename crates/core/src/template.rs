//! Label-sheet templates: raw records, resolution, and validation.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::formats;
use crate::units::Unit;

/// Default content inset inside every label cell, in millimeters.
pub const DEFAULT_PADDING_MM: f64 = 3.0;

/// Whether and how grid guide lines are drawn on each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CutLines {
    /// No guide lines.
    #[default]
    Off,
    /// Lines spanning the full page at every label boundary.
    Full,
    /// Short tick marks near the sheet edges instead of full-length lines.
    /// Useful when wide margins would put full lines across printed content.
    CornerOnly,
}

impl CutLines {
    /// True for any mode that draws lines.
    pub fn is_enabled(self) -> bool {
        !matches!(self, CutLines::Off)
    }
}

/// Raw geometry record for one label-sheet layout, in its native unit.
///
/// This is the shape of a catalog preset and of a caller-supplied custom
/// format. Linear fields are interpreted in [`TemplateSpec::unit`], except
/// `padding_mm` which is always millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpec {
    /// Physical sheet identifier (e.g. "LETTER", "A4"). Opaque to the
    /// placement engine; handed through to the canvas.
    pub paper_size: String,
    /// Unit every linear field of this record is expressed in.
    pub unit: Unit,
    /// Offset from the sheet's left edge to the first label column.
    pub margin_left: f64,
    /// Offset from the sheet's top edge to the first label row.
    pub margin_top: f64,
    /// Labels per row.
    pub columns: u32,
    /// Label rows per page.
    pub rows: u32,
    /// Horizontal gap between adjacent labels. May be zero.
    pub space_x: f64,
    /// Vertical gap between adjacent labels. May be zero.
    pub space_y: f64,
    /// Outer width of one label cell.
    pub label_width: f64,
    /// Outer height of one label cell.
    pub label_height: f64,
    /// Content inset on all four sides, in millimeters regardless of `unit`.
    /// Defaults to 3 mm.
    #[serde(default)]
    pub padding_mm: Option<f64>,
    /// Guide-line mode. Defaults to off.
    #[serde(default)]
    pub cut_lines: CutLines,
}

impl TemplateSpec {
    /// Start a custom format record; fill in geometry with the builder
    /// methods below.
    pub fn new(paper_size: impl Into<String>, unit: Unit) -> Self {
        Self {
            paper_size: paper_size.into(),
            unit,
            margin_left: 0.0,
            margin_top: 0.0,
            columns: 1,
            rows: 1,
            space_x: 0.0,
            space_y: 0.0,
            label_width: 0.0,
            label_height: 0.0,
            padding_mm: None,
            cut_lines: CutLines::Off,
        }
    }

    /// Set the left and top margins.
    pub fn margins(mut self, left: f64, top: f64) -> Self {
        self.margin_left = left;
        self.margin_top = top;
        self
    }

    /// Set the grid dimensions (labels per row, rows per page).
    pub fn grid(mut self, columns: u32, rows: u32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    /// Set the horizontal and vertical gaps between adjacent labels.
    pub fn spacing(mut self, space_x: f64, space_y: f64) -> Self {
        self.space_x = space_x;
        self.space_y = space_y;
        self
    }

    /// Set the outer size of one label cell.
    pub fn label_size(mut self, width: f64, height: f64) -> Self {
        self.label_width = width;
        self.label_height = height;
        self
    }

    /// Override the default 3 mm content padding.
    pub fn padding_mm(mut self, padding: f64) -> Self {
        self.padding_mm = Some(padding);
        self
    }

    /// Set the guide-line mode.
    pub fn cut_lines(mut self, mode: CutLines) -> Self {
        self.cut_lines = mode;
        self
    }
}

/// Named preset or caller-supplied custom record.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetFormat {
    /// Key into the preset catalog (see [`crate::formats`]).
    Preset(String),
    /// Full custom geometry record.
    Custom(TemplateSpec),
}

impl From<&str> for SheetFormat {
    fn from(key: &str) -> Self {
        SheetFormat::Preset(key.to_string())
    }
}

impl From<String> for SheetFormat {
    fn from(key: String) -> Self {
        SheetFormat::Preset(key)
    }
}

impl From<TemplateSpec> for SheetFormat {
    fn from(spec: TemplateSpec) -> Self {
        SheetFormat::Custom(spec)
    }
}

/// Immutable resolved template. Every linear field is expressed in the
/// working [`unit`](LabelTemplate::unit); produced once at construction and
/// shared read-only for the rest of the document session.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTemplate {
    /// Physical sheet identifier, passed through from the record.
    pub paper_size: String,
    /// Working unit of every linear field below.
    pub unit: Unit,
    /// Offset from the sheet's left edge to the first label column.
    pub margin_left: f64,
    /// Offset from the sheet's top edge to the first label row.
    pub margin_top: f64,
    /// Labels per row.
    pub columns: u32,
    /// Label rows per page.
    pub rows: u32,
    /// Horizontal gap between adjacent labels.
    pub space_x: f64,
    /// Vertical gap between adjacent labels.
    pub space_y: f64,
    /// Outer width of one label cell.
    pub label_width: f64,
    /// Outer height of one label cell.
    pub label_height: f64,
    /// Content inset on all four sides.
    pub padding: f64,
    /// Guide-line mode.
    pub cut_lines: CutLines,
}

impl LabelTemplate {
    /// Resolve a named preset or custom record into a template in the given
    /// working unit.
    ///
    /// Fails with [`ConfigError::UnknownFormat`] for a key outside the
    /// catalog, and with [`ConfigError::InvalidTemplate`] when the geometry
    /// violates a template invariant.
    pub fn resolve(format: SheetFormat, unit: Unit) -> Result<LabelTemplate> {
        match format {
            SheetFormat::Preset(key) => {
                let spec = formats::preset(&key)
                    .ok_or(ConfigError::UnknownFormat { key })?;
                Self::from_spec(&spec, unit)
            }
            SheetFormat::Custom(spec) => Self::from_spec(&spec, unit),
        }
    }

    /// Normalize a raw record into the working unit and validate it.
    pub fn from_spec(spec: &TemplateSpec, unit: Unit) -> Result<LabelTemplate> {
        let src = spec.unit;
        let template = LabelTemplate {
            paper_size: spec.paper_size.clone(),
            unit,
            margin_left: src.convert(spec.margin_left, unit),
            margin_top: src.convert(spec.margin_top, unit),
            columns: spec.columns,
            rows: spec.rows,
            space_x: src.convert(spec.space_x, unit),
            space_y: src.convert(spec.space_y, unit),
            label_width: src.convert(spec.label_width, unit),
            label_height: src.convert(spec.label_height, unit),
            padding: Unit::Mm.convert(spec.padding_mm.unwrap_or(DEFAULT_PADDING_MM), unit),
            cut_lines: spec.cut_lines,
        };
        template.validate()?;
        Ok(template)
    }

    /// Usable content width of one label, after padding.
    pub fn content_width(&self) -> f64 {
        self.label_width - 2.0 * self.padding
    }

    /// Usable content height of one label, after padding.
    pub fn content_height(&self) -> f64 {
        self.label_height - 2.0 * self.padding
    }

    /// Horizontal distance between the left edges of adjacent labels.
    pub fn pitch_x(&self) -> f64 {
        self.label_width + self.space_x
    }

    /// Vertical distance between the top edges of adjacent labels.
    pub fn pitch_y(&self) -> f64 {
        self.label_height + self.space_y
    }

    /// Label slots per page.
    pub fn slots_per_page(&self) -> u32 {
        self.columns * self.rows
    }

    fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(ConfigError::InvalidTemplate(
                "columns must be at least 1".to_string(),
            ));
        }
        if self.rows == 0 {
            return Err(ConfigError::InvalidTemplate(
                "rows must be at least 1".to_string(),
            ));
        }
        if self.padding < 0.0 {
            return Err(ConfigError::InvalidTemplate(
                "padding must not be negative".to_string(),
            ));
        }
        if self.content_width() <= 0.0 {
            return Err(ConfigError::InvalidTemplate(format!(
                "label width {} {u} leaves no content box after 2 x {} {u} padding",
                self.label_width,
                self.padding,
                u = self.unit
            )));
        }
        if self.content_height() <= 0.0 {
            return Err(ConfigError::InvalidTemplate(format!(
                "label height {} {u} leaves no content box after 2 x {} {u} padding",
                self.label_height,
                self.padding,
                u = self.unit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_spec() -> TemplateSpec {
        TemplateSpec::new("A4", Unit::Mm)
            .margins(5.0, 15.0)
            .grid(2, 7)
            .spacing(25.0, 0.0)
            .label_size(99.1, 38.1)
    }

    #[test]
    fn test_resolve_custom_same_unit_passes_through() {
        let template = LabelTemplate::from_spec(&custom_spec(), Unit::Mm).unwrap();
        assert_eq!(template.margin_left, 5.0);
        assert_eq!(template.margin_top, 15.0);
        assert_eq!(template.label_width, 99.1);
        assert_eq!(template.space_x, 25.0);
        assert_eq!(template.columns, 2);
        assert_eq!(template.rows, 7);
        assert_eq!(template.padding, 3.0);
        assert_eq!(template.cut_lines, CutLines::Off);
    }

    #[test]
    fn test_resolve_converts_into_inches() {
        let template = LabelTemplate::from_spec(&custom_spec(), Unit::In).unwrap();
        assert!((template.label_width - 99.1 / 25.4).abs() < 1e-9);
        assert!((template.padding - 3.0 / 25.4).abs() < 1e-9);
        // Grid dimensions are counts, not lengths.
        assert_eq!(template.columns, 2);
        assert_eq!(template.rows, 7);
    }

    #[test]
    fn test_padding_is_always_given_in_mm() {
        // Record in inches; the padding field stays a millimeter value.
        let spec = TemplateSpec::new("LETTER", Unit::In)
            .grid(2, 3)
            .label_size(4.0, 3.33)
            .padding_mm(6.0);
        let template = LabelTemplate::from_spec(&spec, Unit::In).unwrap();
        assert!((template.padding - 6.0 / 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_content_box_size() {
        let template = LabelTemplate::from_spec(&custom_spec(), Unit::Mm).unwrap();
        assert!((template.content_width() - (99.1 - 6.0)).abs() < 1e-12);
        assert!((template.content_height() - (38.1 - 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_preset_fails() {
        let err = LabelTemplate::resolve("NOPE9999".into(), Unit::Mm).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFormat { ref key } if key == "NOPE9999"));
    }

    #[test]
    fn test_zero_columns_rejected() {
        let spec = custom_spec().grid(0, 7);
        let err = LabelTemplate::from_spec(&spec, Unit::Mm).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTemplate(_)));
    }

    #[test]
    fn test_zero_rows_rejected() {
        let spec = custom_spec().grid(2, 0);
        let err = LabelTemplate::from_spec(&spec, Unit::Mm).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTemplate(_)));
    }

    #[test]
    fn test_degenerate_content_box_rejected() {
        // 10 mm label with 2 x 5 mm padding has nothing left inside.
        let spec = custom_spec().label_size(10.0, 38.1).padding_mm(5.0);
        let err = LabelTemplate::from_spec(&spec, Unit::Mm).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTemplate(_)));

        let spec = custom_spec().label_size(99.1, 6.0);
        assert!(LabelTemplate::from_spec(&spec, Unit::Mm).is_err());
    }

    #[test]
    fn test_negative_padding_rejected() {
        let spec = custom_spec().padding_mm(-1.0);
        let err = LabelTemplate::from_spec(&spec, Unit::Mm).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTemplate(_)));
    }

    #[test]
    fn test_spec_serde_round_trip() {
        let spec = custom_spec().cut_lines(CutLines::CornerOnly).padding_mm(2.0);
        let json = serde_json::to_string(&spec).unwrap();
        let back: TemplateSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_spec_deserialize_defaults() {
        let json = r#"{
            "paper_size": "A4",
            "unit": "mm",
            "margin_left": 0.0,
            "margin_top": 8.5,
            "columns": 3,
            "rows": 8,
            "space_x": 0.0,
            "space_y": 0.0,
            "label_width": 70.0,
            "label_height": 35.0
        }"#;
        let spec: TemplateSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.padding_mm, None);
        assert_eq!(spec.cut_lines, CutLines::Off);
        let template = LabelTemplate::from_spec(&spec, Unit::Mm).unwrap();
        assert_eq!(template.padding, DEFAULT_PADDING_MM);
    }

    #[test]
    fn test_cut_lines_serde_names() {
        assert_eq!(serde_json::to_string(&CutLines::CornerOnly).unwrap(), "\"corner-only\"");
        assert_eq!(serde_json::to_string(&CutLines::Full).unwrap(), "\"full\"");
        let parsed: CutLines = serde_json::from_str("\"off\"").unwrap();
        assert_eq!(parsed, CutLines::Off);
    }
}
