//! Catalog of named label-sheet presets.
//!
//! Dimensions follow the manufacturer data sheets (Avery unless the key says
//! otherwise). Each entry is a raw [`TemplateSpec`] in its native unit; the
//! resolver converts it into the caller's working unit.

use crate::template::{CutLines, TemplateSpec};
use crate::units::Unit;

/// Every key in the preset catalog.
pub const PRESET_KEYS: &[&str] = &[
    "5160",
    "5161",
    "5162",
    "5163",
    "5164",
    "8600",
    "L7163",
    "3422",
    "NewPrint4005",
    "L7161",
    "90x54",
    "138x98",
];

/// Look up a named preset.
///
/// Returns `None` for a key outside the catalog; the resolver turns that
/// into [`crate::ConfigError::UnknownFormat`].
pub fn preset(key: &str) -> Option<TemplateSpec> {
    let spec = match key {
        "5160" => TemplateSpec::new("LETTER", Unit::Mm)
            .margins(4.7625, 12.7)
            .grid(3, 10)
            .spacing(3.175, 0.0)
            .label_size(66.675, 25.4),
        "5161" => TemplateSpec::new("LETTER", Unit::Mm)
            .margins(0.967, 10.7)
            .grid(2, 10)
            .spacing(3.967, 0.0)
            .label_size(101.6, 25.4),
        "5162" => TemplateSpec::new("LETTER", Unit::Mm)
            .margins(0.97, 20.224)
            .grid(2, 7)
            .spacing(4.762, 0.0)
            .label_size(100.807, 35.72),
        "5163" => TemplateSpec::new("LETTER", Unit::Mm)
            .margins(1.762, 10.7)
            .grid(2, 5)
            .spacing(3.175, 0.0)
            .label_size(101.6, 50.8),
        "5164" => TemplateSpec::new("LETTER", Unit::In)
            .margins(0.148, 0.5)
            .grid(2, 3)
            .spacing(0.2031, 0.0)
            .label_size(4.0, 3.33),
        "8600" => TemplateSpec::new("LETTER", Unit::Mm)
            .margins(7.1, 19.0)
            .grid(3, 10)
            .spacing(9.5, 3.1)
            .label_size(66.6, 25.4),
        "L7163" => TemplateSpec::new("A4", Unit::Mm)
            .margins(5.0, 15.0)
            .grid(2, 7)
            .spacing(25.0, 0.0)
            .label_size(99.1, 38.1),
        "3422" => TemplateSpec::new("A4", Unit::Mm)
            .margins(0.0, 8.5)
            .grid(3, 8)
            .spacing(0.0, 0.0)
            .label_size(70.0, 35.0),
        "NewPrint4005" => TemplateSpec::new("A4", Unit::Mm)
            .margins(4.0, 15.0)
            .grid(2, 4)
            .spacing(3.0, 0.0)
            .label_size(99.1, 67.2),
        "L7161" => TemplateSpec::new("A4", Unit::Mm)
            .margins(7.25, 8.7)
            .grid(3, 6)
            .spacing(2.5, 0.0)
            .label_size(63.5, 46.6),
        "90x54" => TemplateSpec::new("A4", Unit::Mm)
            .margins(15.0, 13.5)
            .grid(2, 5)
            .spacing(0.0, 0.0)
            .label_size(90.0, 55.0)
            .cut_lines(CutLines::Full),
        "138x98" => TemplateSpec::new("A4", Unit::Mm)
            .margins(7.0, 10.5)
            .grid(2, 2)
            .spacing(0.0, 0.0)
            .label_size(98.0, 138.0)
            .cut_lines(CutLines::Full),
        _ => return None,
    };
    Some(spec)
}
