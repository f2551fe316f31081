//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap geocoding and current-weather client
//! - Unit normalization, Kelvin conversion and icon glyphs
//! - The lookup pipeline and its terminal table
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod glyph;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod units;

pub use config::Config;
pub use error::WeatherError;
pub use model::{Coordinates, LocationQuery, WeatherReading};
pub use pipeline::{Lookup, lookup};
pub use provider::{WeatherProvider, provider_from_config};
pub use report::{DisplayRow, WeatherReport};
pub use units::{NormalizedUnit, Unit, UnitWarning, normalize_unit};
