use anyhow::Context;
use clap::{ArgAction, Parser};
use inquire::{Password, PasswordDisplayMode, validator::Validation};
use log::{LevelFilter, debug, error, warn};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use weather_core::{
    Config, LocationQuery, Lookup, WeatherError, WeatherReport, lookup, normalize_unit,
    provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Get current weather from OpenWeatherMap using a city name or zip code."
)]
pub struct Cli {
    /// City name, e.g. "London" or "Paris,FR". Wins over --zipcode.
    #[arg(long)]
    pub location: Option<String>,

    /// Zip code with optional country, e.g. "94040,US".
    #[arg(long)]
    pub zipcode: Option<String>,

    /// K: Kelvin, C: Celsius, F: Fahrenheit. Full names and prefixes work too.
    #[arg(long, default_value = "K")]
    pub unit: String,

    /// Verbose diagnostics; otherwise only warnings and errors are shown.
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub debug: bool,

    /// Config file holding the API key. Defaults to the platform config dir.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Prompt for an OpenWeatherMap API key, store it and exit.
    #[arg(long)]
    pub configure: bool,
}

/// Process exit codes, one per way a run can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Success = 0,
    Usage = 2,
    NotFound = 3,
    WeatherUnavailable = 4,
    Transport = 5,
    Malformed = 6,
    Config = 7,
}

impl Exit {
    pub fn for_error(err: &WeatherError) -> Self {
        match err {
            WeatherError::Transport { .. } => Exit::Transport,
            WeatherError::MalformedResponse { .. } => Exit::Malformed,
            WeatherError::InvalidInput(_) => Exit::Config,
        }
    }
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

pub fn init_logging(debug: bool) {
    let level = if debug { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

impl Cli {
    pub async fn run(self) -> Exit {
        if self.configure {
            return match configure(self.config.as_deref()) {
                Ok(path) => {
                    println!("Saved API key to {}", path.display());
                    Exit::Success
                }
                Err(err) => {
                    error!("{err:#}");
                    Exit::Config
                }
            };
        }

        let normalized = normalize_unit(&self.unit);
        if let Some(warning) = &normalized.warning {
            warn!("{warning}");
        }
        debug!("location: {:?}, zipcode: {:?}, unit: {}", self.location, self.zipcode, normalized.unit);

        let Some(query) = LocationQuery::from_inputs(self.location, self.zipcode) else {
            error!("Please enter a valid location or zipcode");
            return Exit::Usage;
        };

        let config = match Config::resolve_path(self.config.as_deref())
            .and_then(|path| Config::load_from(&path))
        {
            Ok(config) => config,
            Err(err) => {
                error!("{err:#}");
                return Exit::Config;
            }
        };

        let provider = provider_from_config(&config);

        match lookup(provider.as_ref(), &query).await {
            Ok(Lookup::Found(reading)) => {
                let report = WeatherReport::now(&reading, query.label(), normalized.unit);
                print!("{}", report.render_styled());
                Exit::Success
            }
            Ok(Lookup::NotFound) => {
                debug!("no coordinates for {}, nothing to show", query.label());
                Exit::NotFound
            }
            Ok(Lookup::WeatherUnavailable) => {
                debug!("no weather for {}, nothing to show", query.label());
                Exit::WeatherUnavailable
            }
            Err(err) => {
                let exit = Exit::for_error(&err);
                error!("{:#}", anyhow::Error::from(err));
                exit
            }
        }
    }
}

fn configure(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    let path = Config::resolve_path(explicit)?;

    // Keep a host override across re-configuration.
    let base_url = Config::load_from(&path).ok().and_then(|c| c.openweathermap.base_url);

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("API key must not be empty".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()
        .context("Failed to read API key")?;

    let mut config = Config::new(api_key.trim().to_string());
    config.openweathermap.base_url = base_url;
    config.save_to(&path)?;

    Ok(path)
}
