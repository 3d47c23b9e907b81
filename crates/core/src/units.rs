//! Measurement units and conversion arithmetic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Millimeters per inch (exact, by definition of the international inch).
pub const MM_PER_INCH: f64 = 25.4;

/// Working measurement unit for sheet geometry.
///
/// The set is closed: every linear field of a template is expressed in one
/// of these. Anything else is rejected at the parsing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Millimeters.
    #[serde(rename = "mm")]
    Mm,
    /// Inches.
    #[serde(rename = "in")]
    In,
}

impl Unit {
    /// Convert `value` from this unit into `dest`.
    ///
    /// Same-unit conversion returns the input unchanged, so the common case
    /// carries no floating-point drift.
    pub fn convert(self, value: f64, dest: Unit) -> f64 {
        match (self, dest) {
            (Unit::Mm, Unit::Mm) | (Unit::In, Unit::In) => value,
            (Unit::Mm, Unit::In) => value / MM_PER_INCH,
            (Unit::In, Unit::Mm) => value * MM_PER_INCH,
        }
    }

    /// The unit's short name as used in template records ("mm" or "in").
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::In => "in",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(Unit::Mm),
            "in" => Ok(Unit::In),
            other => Err(ConfigError::UnsupportedUnit(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion_is_exact() {
        // Values that would drift through a multiply/divide round trip.
        for value in [0.0, 4.7625, 66.675, 1.0 / 3.0] {
            assert_eq!(Unit::Mm.convert(value, Unit::Mm), value);
            assert_eq!(Unit::In.convert(value, Unit::In), value);
        }
    }

    #[test]
    fn test_mm_to_in() {
        assert!((Unit::Mm.convert(25.4, Unit::In) - 1.0).abs() < 1e-12);
        assert!((Unit::Mm.convert(101.6, Unit::In) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_in_to_mm() {
        assert!((Unit::In.convert(1.0, Unit::Mm) - 25.4).abs() < 1e-12);
        assert!((Unit::In.convert(0.5, Unit::Mm) - 12.7).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for value in [0.148, 0.2031, 3.33, 4.0, 99.1, 279.4] {
            let there = Unit::Mm.convert(value, Unit::In);
            let back = Unit::In.convert(there, Unit::Mm);
            assert!((back - value).abs() < 1e-9, "round trip drifted: {value} -> {back}");
        }
    }

    #[test]
    fn test_parse_known_units() {
        assert_eq!("mm".parse::<Unit>().unwrap(), Unit::Mm);
        assert_eq!("in".parse::<Unit>().unwrap(), Unit::In);
    }

    #[test]
    fn test_parse_unknown_unit_fails() {
        let err = "furlong".parse::<Unit>().unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("furlong"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for unit in [Unit::Mm, Unit::In] {
            assert_eq!(unit.to_string().parse::<Unit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_serde_representation() {
        assert_eq!(serde_json::to_string(&Unit::Mm).unwrap(), "\"mm\"");
        assert_eq!(serde_json::to_string(&Unit::In).unwrap(), "\"in\"");
        assert!(serde_json::from_str::<Unit>("\"pt\"").is_err());
    }
}
