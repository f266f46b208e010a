//! Unit conversion utilities.
//!
//! All geometry inside the crate is expressed in EMUs (English Metric Units),
//! the integer unit used by DrawingML. User-facing lengths arrive as floating
//! point values in a [`LengthUnit`] and are converted once, at validation.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_MM: i64 = 36_000;
pub const EMUS_PER_PT: i64 = 12_700;

/// Largest slide side PowerPoint accepts (56 inches).
pub const MAX_SLIDE_EMU: i64 = 51_206_400;

#[inline]
pub fn px_to_emu(px: u32, dpi: u32) -> i64 {
    (px as i64 * EMUS_PER_INCH) / dpi as i64
}

#[inline]
pub fn emu_to_cm(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_CM as f64
}

/// Supported length units for layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LengthUnit {
    /// Millimeter
    #[serde(rename = "mm")]
    Millimeter,
    /// Centimeter
    #[default]
    #[serde(rename = "cm")]
    Centimeter,
    /// Inch
    #[serde(rename = "in")]
    Inch,
    /// Point (1/72 inch)
    #[serde(rename = "pt")]
    Point,
}

impl LengthUnit {
    /// Get the unit abbreviation
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Inch => "in",
            Self::Point => "pt",
        }
    }

    #[inline]
    fn emus_per_unit(&self) -> i64 {
        match self {
            Self::Millimeter => EMUS_PER_MM,
            Self::Centimeter => EMUS_PER_CM,
            Self::Inch => EMUS_PER_INCH,
            Self::Point => EMUS_PER_PT,
        }
    }

    /// Convert a value in this unit to EMUs, rounding to the nearest EMU.
    ///
    /// ```
    /// use images2pptx::common::unit::LengthUnit;
    /// assert_eq!(LengthUnit::Centimeter.to_emu(6.0), 2_160_000);
    /// assert_eq!(LengthUnit::Inch.to_emu(0.5), 457_200);
    /// ```
    #[inline]
    pub fn to_emu(&self, value: f64) -> i64 {
        (value * self.emus_per_unit() as f64).round() as i64
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mm" => Ok(Self::Millimeter),
            "cm" => Ok(Self::Centimeter),
            "in" | "inch" => Ok(Self::Inch),
            "pt" => Ok(Self::Point),
            _ => Err(Error::config(format!("Unknown length unit '{}'", s))),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
