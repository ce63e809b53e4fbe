use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use skyboard_core::{
    Config, Coordinates, Dashboard, LocationQuery, PressureUnit, ProviderId, SavedLocation,
    TempUnit, Theme, ThresholdBasis, WindUnit,
    activity::{ActivityProfile, find_activity},
    astro::moon_phase,
};
use std::path::PathBuf;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyboard", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Read and write this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logs on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name: "openweather" or "visualcrossing".
        provider: String,
    },

    /// Show the dashboard for a location.
    Show {
        /// Location name. Falls back to --lat/--lon, then the default location.
        location: Option<String>,

        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Only score this activity (running, cycling, hiking, photography).
        #[arg(long)]
        activity: Option<String>,
    },

    /// Update display settings, then print them.
    Settings(SettingsArgs),

    /// Manage saved locations.
    Locations {
        #[command(subcommand)]
        action: LocationsCommand,
    },

    /// Show the moon phase for a date.
    Moon {
        /// Date as YYYY-MM-DD; today if absent.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Debug, Default, Args)]
pub struct SettingsArgs {
    /// metric, imperial or kelvin
    #[arg(long)]
    pub temp_unit: Option<TempUnit>,

    /// kmh, mph or ms
    #[arg(long)]
    pub wind_unit: Option<WindUnit>,

    /// hpa, inhg or mmhg
    #[arg(long)]
    pub pressure_unit: Option<PressureUnit>,

    #[arg(long)]
    pub notifications: Option<bool>,

    /// dark or light
    #[arg(long, value_parser = parse_theme)]
    pub theme: Option<Theme>,

    /// converted or metric_only
    #[arg(long)]
    pub threshold_basis: Option<ThresholdBasis>,
}

#[derive(Debug, Subcommand)]
pub enum LocationsCommand {
    /// List saved locations.
    List,
    /// Fetch a location's conditions and save it.
    Add { name: String },
    /// Remove a saved location.
    Remove { name: String },
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    Theme::try_from(value).map_err(|e| e.to_string())
}

impl SettingsArgs {
    /// Apply the given flags. Returns whether anything was set.
    fn apply(&self, config: &mut Config) -> bool {
        let settings = &mut config.settings;
        let mut changed = false;

        if let Some(unit) = self.temp_unit {
            settings.temp_unit = unit;
            changed = true;
        }
        if let Some(unit) = self.wind_unit {
            settings.wind_unit = unit;
            changed = true;
        }
        if let Some(unit) = self.pressure_unit {
            settings.pressure_unit = unit;
            changed = true;
        }
        if let Some(enabled) = self.notifications {
            settings.notifications = enabled;
            changed = true;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
            changed = true;
        }
        if let Some(basis) = self.threshold_basis {
            settings.threshold_basis = basis;
            changed = true;
        }

        changed
    }
}

impl Cli {
    fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_file_path(),
        }
    }

    pub async fn run(self) -> Result<()> {
        let path = self.config_path()?;
        let mut config = Config::load_from(&path)?;

        match self.command {
            Command::Configure { provider } => {
                let id = ProviderId::try_from(provider.as_str())?;
                let api_key = inquire::Password::new(&format!("API key for {id}:"))
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                let api_key = api_key.trim();
                if api_key.is_empty() {
                    bail!("API key must not be empty");
                }

                config.upsert_provider_api_key(id, api_key.to_string());
                config.save_to(&path)?;
                println!("Saved API key for {id} to {}", path.display());
            }
            Command::Show { location, lat, lon, activity } => {
                let profile = activity.as_deref().map(resolve_activity).transpose()?;
                let coords = lat.zip(lon).map(|(lat, lon)| Coordinates { lat, lon });
                let query = resolve_query(&config, location, coords);

                let dashboard = Dashboard::from_config(&runtime_config(&config))?;
                let snapshot = dashboard.refresh(&query, &config.settings).await?;
                print!("{}", render::report(&snapshot, profile));
            }
            Command::Settings(args) => {
                if args.apply(&mut config) {
                    config.save_to(&path)?;
                }
                print!("{}", render::settings(&config.settings));
            }
            Command::Locations { action } => match action {
                LocationsCommand::List => {
                    let unit = config.settings.temp_unit;
                    print!("{}", render::saved_locations(&config.saved_locations, unit));
                }
                LocationsCommand::Add { name } => {
                    let name = name.trim().to_string();
                    if config.saved_locations.contains(&name) {
                        return Err(skyboard_core::SavedLocationError::Duplicate(name).into());
                    }

                    let dashboard = Dashboard::from_config(&runtime_config(&config))?;
                    let snapshot = dashboard
                        .refresh(&LocationQuery::Name(name.clone()), &config.settings)
                        .await?;
                    let reading = snapshot.observation.reading;

                    config.saved_locations.add(SavedLocation {
                        name: name.clone(),
                        temperature_c: reading.temperature_c,
                        condition_code: reading.condition_code,
                        saved_at: Utc::now().timestamp(),
                    })?;
                    config.save_to(&path)?;
                    println!("Saved {name} ({})", snapshot.place);
                }
                LocationsCommand::Remove { name } => {
                    let removed = config.saved_locations.remove(&name)?;
                    config.save_to(&path)?;
                    println!("Removed {}", removed.name);
                }
            },
            Command::Moon { date } => {
                let date = date.unwrap_or_else(|| Local::now().date_naive());
                print!("{}", render::moon(date, moon_phase(date)));
            }
        }

        Ok(())
    }
}

fn resolve_activity(name: &str) -> Result<&'static ActivityProfile> {
    find_activity(name).ok_or_else(|| {
        anyhow!(
            "Unknown activity '{name}'. \
             Supported activities: running, cycling, hiking, photography."
        )
    })
}

/// Explicit name first, then the given coordinates, then the configured
/// default location.
fn resolve_query(
    config: &Config,
    location: Option<String>,
    coords: Option<Coordinates>,
) -> LocationQuery {
    if let Some(name) = location.filter(|n| !n.trim().is_empty()) {
        return LocationQuery::Name(name);
    }

    match coords {
        Some(coords) => LocationQuery::Coords(coords),
        None => LocationQuery::Name(config.default_location.clone()),
    }
}

/// Config with environment API keys applied; never written back to disk.
fn runtime_config(config: &Config) -> Config {
    let mut runtime = config.clone();
    runtime.apply_env_overrides();
    runtime
}
