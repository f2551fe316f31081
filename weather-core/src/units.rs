//! Temperature units and Kelvin conversion.

use std::{fmt, str::FromStr};

use crate::error::{Result, WeatherError};

const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Kelvin,
    Celsius,
    Fahrenheit,
}

impl Unit {
    /// Single-letter symbol: "K", "C" or "F".
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Kelvin => "K",
            Unit::Celsius => "C",
            Unit::Fahrenheit => "F",
        }
    }

    /// Suffix printed after a converted value.
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Kelvin => "K",
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Kelvin => "Kelvin",
            Unit::Celsius => "Celsius",
            Unit::Fahrenheit => "Fahrenheit",
        }
    }

    pub const fn all() -> &'static [Unit] {
        &[Unit::Kelvin, Unit::Celsius, Unit::Fahrenheit]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Strict parse of a unit symbol, plain or degree-prefixed ("F", "°F").
impl FromStr for Unit {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self> {
        let bare = s.trim().trim_start_matches('°');
        match bare {
            "K" => Ok(Unit::Kelvin),
            "C" => Ok(Unit::Celsius),
            "F" => Ok(Unit::Fahrenheit),
            _ => Err(WeatherError::InvalidInput(format!(
                "unknown unit symbol '{s}', expected K, C or F"
            ))),
        }
    }
}

/// Emitted when a unit token matched nothing and Celsius was assumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitWarning {
    pub raw: String,
}

impl fmt::Display for UnitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid unit '{}'. Defaulting to Celsius", self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUnit {
    pub unit: Unit,
    pub warning: Option<UnitWarning>,
}

/// Map a free-form token to a unit.
///
/// Checked in order K, C, F: the exact letter, the full name (any case), or a
/// token starting with that letter (any case). Anything else, including an
/// empty or blank token, falls back to Celsius and carries a warning.
pub fn normalize_unit(raw: &str) -> NormalizedUnit {
    let token = raw.trim();
    let first = token.chars().next().map(|c| c.to_ascii_lowercase());

    let matched = Unit::all().iter().copied().find(|unit| {
        token == unit.symbol()
            || token.eq_ignore_ascii_case(unit.name())
            || first == unit.symbol().chars().next().map(|c| c.to_ascii_lowercase())
    });

    match matched {
        Some(unit) => NormalizedUnit { unit, warning: None },
        None => NormalizedUnit {
            unit: Unit::Celsius,
            warning: Some(UnitWarning { raw: raw.to_string() }),
        },
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a Kelvin reading. Celsius and Fahrenheit are rounded to two
/// decimals; Kelvin is returned as given.
pub fn convert_kelvin(kelvin: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Kelvin => kelvin,
        Unit::Celsius => round2(kelvin - KELVIN_OFFSET),
        Unit::Fahrenheit => round2((kelvin - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0),
    }
}

/// String form of [`convert_kelvin`]: parses the value (rounded to two
/// decimals) and the target symbol first.
///
/// Fails with [`WeatherError::InvalidInput`] when the value is not a number
/// or the symbol is not one of K, C, F (optionally `°`-prefixed). An unknown
/// symbol is rejected rather than treated as Kelvin.
pub fn convert_kelvin_str(kelvin: &str, unit: &str) -> Result<f64> {
    let value: f64 = kelvin.trim().parse().map_err(|_| {
        WeatherError::InvalidInput(format!("'{kelvin}' is not a temperature value"))
    })?;
    let unit: Unit = unit.parse()?;
    Ok(convert_kelvin(round2(value), unit))
}
