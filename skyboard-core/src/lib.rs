//! Core library for the `skyboard` weather dashboard.
//!
//! This crate defines:
//! - The metrics engine: unit conversion, condition classification, alerts,
//!   comfort and activity scoring, astronomical and trend helpers
//! - Configuration, settings and saved locations
//! - Abstraction over weather providers and the refresh pipeline
//!
//! The engine modules are pure and hold no state. Everything that talks to
//! the network lives in [`provider`], [`location`] and [`dashboard`].

pub mod activity;
pub mod air;
pub mod alerts;
pub mod astro;
pub mod comfort;
pub mod condition;
pub mod config;
pub mod dashboard;
pub mod forecast;
pub mod location;
pub mod model;
pub mod provider;
pub mod saved;
pub mod suggestions;
pub mod trend;
pub mod units;

pub use alerts::{Alert, Severity, derive_alerts};
pub use condition::{ConditionCategory, classify_condition};
pub use config::{Config, ProviderConfig, Settings, Theme};
pub use dashboard::{Dashboard, DashboardSnapshot, RefreshError};
pub use model::{Coordinates, Forecast, HourlyPoint, LocationQuery, Observation, Reading};
pub use provider::{HistoryProvider, ProviderId, WeatherProvider};
pub use saved::{SavedLocation, SavedLocationError, SavedLocations};
pub use units::{PressureUnit, TempUnit, ThresholdBasis, UnitPreferences, WindUnit};
