use std::{env, fmt::Display, str::FromStr, time::Duration};

use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing::info;

use crate::types::point::GeoPoint;

pub const DEFAULT_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

// Islamabad
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(33.6844, 73.0479);

pub struct Config {
    pub port: u16,
    pub google_api_key: String,
    pub places_url: String,
    pub default_center: GeoPoint,
    pub search_timeout: Option<Duration>,
    pub location_timeout: Option<Duration>,
    pub session_idle: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let google_api_key =
            lookup("NEARBY_GOOGLE_API_KEY").ok_or(eyre!("NEARBY_GOOGLE_API_KEY is not set"))?;
        let default_center = GeoPoint::checked(
            parse_or(&lookup, "NEARBY_DEFAULT_LAT", DEFAULT_CENTER.latitude)?,
            parse_or(&lookup, "NEARBY_DEFAULT_LNG", DEFAULT_CENTER.longitude)?,
        )?;
        let session_idle = Duration::from_secs(parse_or(&lookup, "NEARBY_SESSION_IDLE_SECS", 1800)?);
        if session_idle.is_zero() {
            return Err(eyre!("NEARBY_SESSION_IDLE_SECS must be positive"));
        }
        Ok(Self {
            port: parse_or(&lookup, "NEARBY_PORT", 3000)?,
            google_api_key,
            places_url: lookup("NEARBY_PLACES_URL").unwrap_or_else(|| DEFAULT_PLACES_URL.to_string()),
            default_center,
            search_timeout: seconds(&lookup, "NEARBY_SEARCH_TIMEOUT_SECS")?,
            location_timeout: seconds(&lookup, "NEARBY_LOCATION_TIMEOUT_SECS")?,
            session_idle,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().wrap_err_with(|| format!("Invalid {key} value")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .wrap_err_with(|| format!("Invalid {key} value"))
        })
        .transpose()
}
