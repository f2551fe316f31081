use crate::{
    Config,
    error::Result,
    model::{Coordinates, LocationQuery, WeatherReading},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Geocoding and current-weather lookups against one API family.
///
/// `Ok(None)` means the provider answered with a non-200 status; the caller
/// stops quietly. `Err` means the request or its payload could not be used.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn geocode_by_name(&self, name: &str) -> Result<Option<Coordinates>>;

    async fn geocode_by_zip(&self, zip: &str) -> Result<Option<Coordinates>>;

    async fn current_weather(&self, coords: Coordinates) -> Result<Option<WeatherReading>>;

    async fn geocode(&self, query: &LocationQuery) -> Result<Option<Coordinates>> {
        match query {
            LocationQuery::Name(name) => self.geocode_by_name(name).await,
            LocationQuery::Zip(zip) => self.geocode_by_zip(zip).await,
        }
    }
}

/// Construct the OpenWeatherMap client from the loaded config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherClient::with_base_url(
        config.api_key().to_owned(),
        config.base_url(),
    ))
}
