use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// What the user asked for: a place name or a postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    Name(String),
    Zip(String),
}

impl LocationQuery {
    /// Build a query from the two optional CLI inputs. A location name takes
    /// precedence over a zip code; blank values count as missing.
    pub fn from_inputs(location: Option<String>, zipcode: Option<String>) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        match (present(location), present(zipcode)) {
            (Some(name), zip) => {
                if let Some(zip) = zip {
                    log::debug!("both location and zipcode given, ignoring zipcode {zip}");
                }
                Some(LocationQuery::Name(name))
            }
            (None, Some(zip)) => Some(LocationQuery::Zip(zip)),
            (None, None) => None,
        }
    }

    /// The string the user typed, used as the table's location label.
    pub fn label(&self) -> &str {
        match self {
            LocationQuery::Name(s) | LocationQuery::Zip(s) => s,
        }
    }
}

/// Current conditions as returned by the provider. Temperatures are Kelvin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub main: MainReadings,
    pub wind: Wind,
    pub weather: Vec<Condition>,
}

impl WeatherReading {
    /// Primary condition; the provider lists the most relevant one first.
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    #[serde(default)]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: Option<u32>,
    pub main: String,
    pub description: String,
    pub icon: String,
}
