//! Plain-text rendering of dashboard data.

use chrono::NaiveDate;
use skyboard_core::{
    DashboardSnapshot, SavedLocations, Settings, TempUnit,
    activity::{ActivityProfile, ActivityScore},
    air::{AirQuality, UvLevel},
    astro::{MoonPhase, day_length},
    classify_condition,
    units::{format_pressure, format_temperature, format_wind},
};

fn section(out: &mut Vec<String>, title: &str) {
    out.push(String::new());
    out.push(title.to_string());
}

fn row(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {label:<13} {value}")
}

fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

pub fn report(snap: &DashboardSnapshot, only: Option<&ActivityProfile>) -> String {
    let settings = &snap.settings;
    let units = settings.units();
    let reading = &snap.observation.reading;
    let category = reading.category();
    let mut out = Vec::new();

    if let Some(alert) = snap.notification() {
        out.push(format!(">>> {}: {}", alert.title, alert.message));
        out.push(String::new());
    }

    out.push(format!(
        "{} - {} [{}]",
        snap.place,
        snap.observation.description,
        category.icon_key()
    ));
    out.push(row(
        "Temperature",
        format!(
            "{} (feels like {})",
            format_temperature(reading.temperature_c, units.temp_unit),
            format_temperature(reading.feels_like_c, units.temp_unit)
        ),
    ));
    let wind = format_wind(reading.wind_speed_ms, units.wind_unit);
    out.push(row("Wind", format!("{wind} from {:.0}°", reading.wind_dir_deg)));
    out.push(row("Humidity", format!("{}%", reading.humidity_pct)));

    let pressure = format_pressure(reading.pressure_hpa, units.pressure_unit);
    out.push(row(
        "Pressure",
        match snap.pressure_trend {
            Some(trend) => format!("{pressure} ({}: {})", trend.label(), trend.outlook()),
            None => pressure,
        },
    ));
    out.push(row("Visibility", format!("{:.1} km", reading.visibility_m / 1000.0)));
    out.push(row("Clouds", format!("{}%", reading.cloud_pct)));

    let daylight = day_length(reading.sunrise_epoch, reading.sunset_epoch);
    if daylight.num_minutes() > 0 {
        out.push(row(
            "Daylight",
            format!("{}h {:02}m", daylight.num_hours(), daylight.num_minutes() % 60),
        ));
    }
    if let Some(aqi) = snap.air_quality {
        out.push(row("Air quality", format!("{} ({aqi})", AirQuality::from_index(aqi).label())));
    }
    if let Some(uvi) = snap.uv_index {
        out.push(row("UV index", format!("{uvi:.1} ({})", UvLevel::from_index(uvi).label())));
    }

    if !snap.alerts.is_empty() {
        section(&mut out, "Alerts");
        for alert in &snap.alerts {
            out.push(format!(
                "  [{}] {}: {}",
                alert.severity.as_str().to_uppercase(),
                alert.title,
                alert.message
            ));
        }
    }

    section(&mut out, "Insights");
    out.push(row("Comfort", format!("{} - {}", snap.comfort.label(), snap.comfort.advice())));
    if let Some(trend) = snap.temperature_trend {
        let outlook = format!("Temperatures are {} over the next 24 hours.", trend.label());
        out.push(row("Trend", outlook));
    }
    for tip in &snap.suggestions {
        out.push(format!("  * {tip}"));
    }

    section(&mut out, "Activities");
    let scores: Vec<&ActivityScore> = snap
        .activities
        .iter()
        .filter(|s| only.is_none_or(|p| p.name == s.activity))
        .collect();
    for score in scores {
        out.push(row(score.activity, format!("{:>3}/100 {}", score.score, score.status.label())));
    }

    if !snap.daily.is_empty() {
        section(&mut out, "Forecast");
        for day in &snap.daily {
            out.push(format!(
                "  {}  {} / {}  {} [{}]",
                day.date.format("%a %b %d"),
                format_temperature(day.max_c, units.temp_unit),
                format_temperature(day.min_c, units.temp_unit),
                day.description,
                classify_condition(day.condition_code).icon_key()
            ));
        }
    }

    section(&mut out, "Past days");
    if snap.history.is_empty() {
        out.push("  Historical data not available".to_string());
    }
    for day in &snap.history {
        out.push(format!(
            "  {}  {} (H: {} / L: {})  {} [{}]  humidity {:.0}%, wind {}",
            day.date.format("%b %d"),
            format_temperature(day.temp_c, units.temp_unit),
            format_temperature(day.temp_max_c, units.temp_unit),
            format_temperature(day.temp_min_c, units.temp_unit),
            day.description,
            day.icon_key,
            day.humidity_pct,
            format_wind(day.wind_speed_ms, units.wind_unit)
        ));
    }

    finish(out)
}

pub fn settings(settings: &Settings) -> String {
    finish(vec![
        row("Temperature", settings.temp_unit),
        row("Wind", settings.wind_unit),
        row("Pressure", settings.pressure_unit),
        row("Notifications", if settings.notifications { "on" } else { "off" }),
        row("Theme", settings.theme.as_str()),
        row("Thresholds", settings.threshold_basis),
    ])
}

pub fn saved_locations(locations: &SavedLocations, unit: TempUnit) -> String {
    if locations.is_empty() {
        return finish(vec!["No saved locations.".to_string()]);
    }

    let lines = locations
        .iter()
        .map(|loc| {
            let saved = chrono::DateTime::from_timestamp(loc.saved_at, 0)
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            format!(
                "  {:<20} {:>6}  {:<12} saved {saved}",
                loc.name,
                loc.display_temperature(unit),
                classify_condition(loc.condition_code).description()
            )
        })
        .collect();
    finish(lines)
}

pub fn moon(date: NaiveDate, phase: MoonPhase) -> String {
    finish(vec![format!(
        "{}: {} ({}% illuminated)",
        date.format("%Y-%m-%d"),
        phase.name(),
        phase.illumination_pct()
    )])
}
