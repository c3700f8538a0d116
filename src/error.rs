use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error("latitude {0} is outside -90..=90")]
    Latitude(f64),

    #[error("longitude {0} is outside -180..=180")]
    Longitude(f64),
}

/// Why a live position could not be obtained. Always recovered locally by
/// falling back to the default center.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocationError {
    #[error("location permission denied")]
    Denied,

    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("location request timed out")]
    TimedOut,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Any non-OK status reported by the provider, passed through verbatim.
    #[error("{0}")]
    Status(String),

    /// The request itself failed. Only a status-like code is kept: reqwest
    /// errors embed the request URL, and with it the API key.
    #[error("{0}")]
    Transport(String),

    #[error("TIMEOUT")]
    TimedOut,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ProviderError::Transport(format!("HTTP_{}", status.as_u16()));
        }
        if err.is_timeout() {
            ProviderError::TimedOut
        } else if err.is_decode() {
            ProviderError::Transport("INVALID_RESPONSE".to_string())
        } else {
            ProviderError::Transport("TRANSPORT".to_string())
        }
    }
}

impl ProviderError {
    /// The reason shown inline in the list view.
    pub fn reason(&self) -> String {
        format!("Failed to load places: {self}")
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("no place with id {0} in the current results")]
    UnknownPlace(String),
}
