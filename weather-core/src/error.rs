use thiserror::Error;

/// Failures that end a lookup.
///
/// A non-200 answer from the provider is not an error: the provider returns
/// `Ok(None)` and the pipeline reports it as a [`crate::Lookup`] variant.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },
}

impl WeatherError {
    pub(crate) fn malformed(endpoint: &'static str, reason: impl Into<String>) -> Self {
        WeatherError::MalformedResponse { endpoint, reason: reason.into() }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
