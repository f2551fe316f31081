use crate::{
    error::Result,
    model::{LocationQuery, WeatherReading},
    provider::WeatherProvider,
};

/// How a lookup ended when nothing went wrong with the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Geocoding answered with a non-200 status.
    NotFound,
    /// Coordinates resolved but the weather endpoint answered non-200.
    WeatherUnavailable,
    Found(WeatherReading),
}

/// Geocode `query`, then fetch current weather for the coordinates.
///
/// Weather is requested only once geocoding produced a full coordinate pair.
pub async fn lookup(provider: &dyn WeatherProvider, query: &LocationQuery) -> Result<Lookup> {
    log::debug!("geocoding {query:?}");

    let Some(coords) = provider.geocode(query).await? else {
        log::debug!("no coordinates for {query:?}");
        return Ok(Lookup::NotFound);
    };
    log::debug!("resolved {} to lat={} lon={}", query.label(), coords.lat, coords.lon);

    match provider.current_weather(coords).await? {
        Some(reading) => {
            log::debug!("weather received: {reading:?}");
            Ok(Lookup::Found(reading))
        }
        None => Ok(Lookup::WeatherUnavailable),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        error::WeatherError,
        model::{Condition, Coordinates, MainReadings, Wind},
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    pub(crate) fn sample_reading() -> WeatherReading {
        WeatherReading {
            main: MainReadings {
                temp: 288.15,
                temp_min: 285.0,
                temp_max: 290.5,
                humidity: 72.0,
                pressure: Some(1013.0),
            },
            wind: Wind { speed: 4.6 },
            weather: vec![Condition {
                id: Some(803),
                main: "Clouds".into(),
                description: "broken clouds".into(),
                icon: "04d".into(),
            }],
        }
    }

    /// Canned answers plus a log of which endpoints were hit.
    #[derive(Debug, Default)]
    pub(crate) struct FakeProvider {
        pub coords: Option<Coordinates>,
        pub reading: Option<WeatherReading>,
        pub fail_geocode: bool,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn geocoded(&self) -> crate::error::Result<Option<Coordinates>> {
            if self.fail_geocode {
                return Err(WeatherError::MalformedResponse {
                    endpoint: "direct geocoding",
                    reason: "empty result list".into(),
                });
            }
            Ok(self.coords)
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn geocode_by_name(&self, name: &str) -> crate::error::Result<Option<Coordinates>> {
            self.record(format!("name:{name}"));
            self.geocoded()
        }

        async fn geocode_by_zip(&self, zip: &str) -> crate::error::Result<Option<Coordinates>> {
            self.record(format!("zip:{zip}"));
            self.geocoded()
        }

        async fn current_weather(
            &self,
            coords: Coordinates,
        ) -> crate::error::Result<Option<WeatherReading>> {
            self.record(format!("weather:{},{}", coords.lat, coords.lon));
            Ok(self.reading.clone())
        }
    }

    #[tokio::test]
    async fn found_when_both_calls_succeed() {
        let provider = FakeProvider {
            coords: Some(Coordinates { lat: 51.5, lon: -0.13 }),
            reading: Some(sample_reading()),
            ..Default::default()
        };

        let out = lookup(&provider, &LocationQuery::Name("London".into())).await.unwrap();
        assert_eq!(out, Lookup::Found(sample_reading()));
        assert_eq!(provider.calls(), ["name:London", "weather:51.5,-0.13"]);
    }

    #[tokio::test]
    async fn zip_query_uses_zip_geocoding() {
        let provider = FakeProvider {
            coords: Some(Coordinates { lat: 37.39, lon: -122.08 }),
            reading: Some(sample_reading()),
            ..Default::default()
        };

        lookup(&provider, &LocationQuery::Zip("94040,US".into())).await.unwrap();
        assert_eq!(provider.calls()[0], "zip:94040,US");
    }

    #[tokio::test]
    async fn not_found_skips_weather() {
        let provider = FakeProvider::default();

        let out = lookup(&provider, &LocationQuery::Name("Atlantis".into())).await.unwrap();
        assert_eq!(out, Lookup::NotFound);
        assert_eq!(provider.calls(), ["name:Atlantis"]);
    }

    #[tokio::test]
    async fn weather_unavailable() {
        let provider = FakeProvider {
            coords: Some(Coordinates { lat: 1.0, lon: 2.0 }),
            ..Default::default()
        };

        let out = lookup(&provider, &LocationQuery::Name("Somewhere".into())).await.unwrap();
        assert_eq!(out, Lookup::WeatherUnavailable);
    }

    #[tokio::test]
    async fn geocode_failure_propagates_and_stops() {
        let provider = FakeProvider { fail_geocode: true, ..Default::default() };

        let err = lookup(&provider, &LocationQuery::Name("x".into())).await.unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse { .. }));
        assert_eq!(provider.calls().len(), 1);
    }
}
