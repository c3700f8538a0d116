use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::{error::LocationError, types::point::GeoPoint};

/// Platform capability that knows where the caller currently is.
#[async_trait]
pub trait LocationService {
    async fn current_position(&self) -> Result<GeoPoint, LocationError>;
}

/// The position the browser reported when the page was mounted, or `None`
/// when it refused to share one.
#[derive(Debug, Clone)]
pub struct ReportedLocation(pub Option<GeoPoint>);

#[async_trait]
impl LocationService for ReportedLocation {
    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        self.0.ok_or(LocationError::Denied)
    }
}

/// Outcome of one resolution. `denied` only drives the advisory banner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub point: GeoPoint,
    pub denied: bool,
}

pub struct LocationResolver<L> {
    service: Option<L>,
    fallback: GeoPoint,
    timeout: Option<Duration>,
}

impl<L> LocationResolver<L>
where
    L: LocationService + Send + Sync,
{
    pub fn new(service: Option<L>, fallback: GeoPoint) -> Self {
        Self {
            service,
            fallback,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Always yields a usable point: the live one, or the fallback.
    #[instrument(skip(self))]
    pub async fn resolve(&self) -> LocationFix {
        let Some(service) = &self.service else {
            info!("no location service, using default center");
            return self.fall_back();
        };
        let position = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, service.current_position())
                .await
                .unwrap_or(Err(LocationError::TimedOut)),
            None => service.current_position().await,
        };
        match position {
            Ok(point) => LocationFix {
                point,
                denied: false,
            },
            Err(err) => {
                warn!("falling back to default center: {err}");
                self.fall_back()
            }
        }
    }

    fn fall_back(&self) -> LocationFix {
        LocationFix {
            point: self.fallback,
            denied: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: GeoPoint = GeoPoint::new(33.6844, 73.0479);

    struct NeverAnswers;

    #[async_trait]
    impl LocationService for NeverAnswers {
        async fn current_position(&self) -> Result<GeoPoint, LocationError> {
            futures::future::pending().await
        }
    }

    #[tokio::test]
    async fn live_position_wins() {
        let here = GeoPoint::new(51.5, -0.12);
        let resolver = LocationResolver::new(Some(ReportedLocation(Some(here))), DEFAULT);
        assert_eq!(
            resolver.resolve().await,
            LocationFix {
                point: here,
                denied: false
            }
        );
    }

    #[tokio::test]
    async fn denial_falls_back_to_default() {
        let resolver = LocationResolver::new(Some(ReportedLocation(None)), DEFAULT);
        let fix = resolver.resolve().await;
        assert_eq!(fix.point, DEFAULT);
        assert!(fix.denied);
    }

    #[tokio::test]
    async fn missing_service_falls_back_to_default() {
        let resolver = LocationResolver::<ReportedLocation>::new(None, DEFAULT);
        let fix = resolver.resolve().await;
        assert_eq!(fix.point, DEFAULT);
        assert!(fix.denied);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_counts_as_failure() {
        let resolver = LocationResolver::new(Some(NeverAnswers), DEFAULT)
            .with_timeout(Some(Duration::from_secs(5)));
        let fix = resolver.resolve().await;
        assert_eq!(fix.point, DEFAULT);
        assert!(fix.denied);
    }
}
