use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    provider::ProviderId,
    saved::SavedLocations,
    units::{PressureUnit, TempUnit, ThresholdBasis, UnitPreferences, WindUnit},
};

pub const DEFAULT_LOCATION: &str = "Dhaka";

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl TryFrom<&str> for Theme {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(anyhow!("Unknown theme '{value}'. Supported themes: dark, light.")),
        }
    }
}

/// User-facing display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub temp_unit: TempUnit,
    pub wind_unit: WindUnit,
    pub pressure_unit: PressureUnit,
    pub notifications: bool,
    pub theme: Theme,
    pub threshold_basis: ThresholdBasis,
}

impl Settings {
    pub fn units(&self) -> UnitPreferences {
        UnitPreferences {
            temp_unit: self.temp_unit,
            wind_unit: self.wind_unit,
            pressure_unit: self.pressure_unit,
        }
    }
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_location = "Dhaka"
///
/// [[saved_locations]]
/// name = "London"
/// temperature_c = 11.2
/// condition_code = 803
/// saved_at = 1700000000
///
/// [settings]
/// temp_unit = "imperial"
///
/// [providers.openweather]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Used when no location is given and geolocation is unavailable.
    #[serde(default = "default_location")]
    pub default_location: String,

    #[serde(default)]
    pub saved_locations: SavedLocations,

    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_location: default_location(),
            saved_locations: SavedLocations::default(),
            settings: Settings::default(),
            providers: HashMap::new(),
        }
    }
}

impl Config {
    /// Load config from `path`, or defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyboard", "skyboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set/replace a provider API key.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    /// Let `<PROVIDER>_API_KEY` environment variables override stored keys.
    pub fn apply_env_overrides(&mut self) {
        for id in ProviderId::all() {
            let Some(key) = std::env::var(id.env_var()).ok().filter(|k| !k.trim().is_empty()) else {
                continue;
            };
            tracing::debug!(provider = %id, "using API key from environment");
            self.upsert_provider_api_key(*id, key.trim().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saved::SavedLocation;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.default_location, "Dhaka");
        assert_eq!(cfg.settings.temp_unit, TempUnit::Metric);
        assert_eq!(cfg.settings.wind_unit, WindUnit::Kmh);
        assert_eq!(cfg.settings.pressure_unit, PressureUnit::Hpa);
        assert!(!cfg.settings.notifications);
        assert_eq!(cfg.settings.theme, Theme::Dark);
        assert_eq!(cfg.settings.threshold_basis, ThresholdBasis::Converted);
        assert!(cfg.saved_locations.is_empty());
    }

    #[test]
    fn set_api_key_for_provider() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OPEN_KEY".into());

        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("OPEN_KEY"));
        assert_eq!(cfg.provider_api_key(ProviderId::VisualCrossing), None);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_location, DEFAULT_LOCATION);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\ntemp_unit = \"kelvin\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.settings.temp_unit, TempUnit::Kelvin);
        assert_eq!(cfg.settings.wind_unit, WindUnit::Kmh);
        assert_eq!(cfg.default_location, DEFAULT_LOCATION);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.settings.pressure_unit = PressureUnit::Inhg;
        cfg.settings.notifications = true;
        cfg.upsert_provider_api_key(ProviderId::VisualCrossing, "VC".into());
        cfg.saved_locations
            .add(SavedLocation {
                name: "Oslo".into(),
                temperature_c: -3.5,
                condition_code: 601,
                saved_at: 1_700_000_000,
            })
            .unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings, cfg.settings);
        assert_eq!(loaded.saved_locations, cfg.saved_locations);
        assert_eq!(loaded.provider_api_key(ProviderId::VisualCrossing), Some("VC"));
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "settings = 5").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    fn saved_entry(name: &str) -> String {
        format!(
            "[[saved_locations]]\nname = \"{name}\"\ntemperature_c = 12.0\n\
             condition_code = 800\nsaved_at = 1700000000\n\n"
        )
    }

    #[test]
    fn stored_saved_locations_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let too_many: String = (0..=10).map(|i| saved_entry(&format!("City {i}"))).collect();
        fs::write(&path, too_many).unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("at most 10"));

        let duplicated = saved_entry("City 0") + &saved_entry("city 0");
        fs::write(&path, duplicated).unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("already in your saved locations"));

        fs::write(&path, saved_entry("Lima") + &saved_entry("Oslo")).unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.saved_locations.len(), 2);
    }

    #[test]
    fn theme_parsing() {
        assert_eq!(Theme::try_from("Light").unwrap(), Theme::Light);
        assert!(Theme::try_from("sepia").is_err());
    }
}
