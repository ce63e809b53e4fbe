//! Device location lookup with a bounded wait.
//!
//! Explicit coordinates never go through here; a [`Locator`] is for sources
//! that can fail or stall, such as a platform geolocation service.

use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

use crate::model::{Coordinates, LocationQuery};

pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn locate(&self) -> anyhow::Result<Coordinates>;
}

/// Ask `locator` for coordinates, falling back to `default_location` on
/// error or when it takes longer than `timeout`.
pub async fn locate_or_default(
    locator: &dyn Locator,
    default_location: &str,
    timeout: Duration,
) -> LocationQuery {
    match tokio::time::timeout(timeout, locator.locate()).await {
        Ok(Ok(coords)) => LocationQuery::Coords(coords),
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "location lookup failed, using {default_location}");
            LocationQuery::Name(default_location.to_string())
        }
        Err(_) => {
            tracing::warn!(?timeout, "location lookup timed out, using {default_location}");
            LocationQuery::Name(default_location.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct FixedLocator(Coordinates);

    #[async_trait]
    impl Locator for FixedLocator {
        async fn locate(&self) -> anyhow::Result<Coordinates> {
            Ok(self.0)
        }
    }

    #[derive(Debug)]
    struct SlowLocator;

    #[async_trait]
    impl Locator for SlowLocator {
        async fn locate(&self) -> anyhow::Result<Coordinates> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Coordinates { lat: 1.0, lon: 1.0 })
        }
    }

    #[derive(Debug)]
    struct DeniedLocator;

    #[async_trait]
    impl Locator for DeniedLocator {
        async fn locate(&self) -> anyhow::Result<Coordinates> {
            Err(anyhow::anyhow!("permission denied"))
        }
    }

    #[tokio::test]
    async fn fixed_locator_yields_coordinates() {
        let coords = Coordinates { lat: 51.5, lon: -0.12 };
        let query = locate_or_default(&FixedLocator(coords), "Dhaka", GEOLOCATION_TIMEOUT).await;
        assert_eq!(query, LocationQuery::Coords(coords));
    }

    #[tokio::test]
    async fn denied_falls_back_to_default() {
        let query = locate_or_default(&DeniedLocator, "Dhaka", GEOLOCATION_TIMEOUT).await;
        assert_eq!(query, LocationQuery::Name("Dhaka".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_falls_back_to_default() {
        let query = locate_or_default(&SlowLocator, "Dhaka", GEOLOCATION_TIMEOUT).await;
        assert_eq!(query, LocationQuery::Name("Dhaka".into()));
    }
}
