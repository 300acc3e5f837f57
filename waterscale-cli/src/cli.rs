use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use inquire::Text;
use log::{debug, warn};
use waterscale_core::{
    Config, HttpFetcher, ResponseFormat, ScaleReport, ScaleRequest, WeatherFetcher,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "waterscale", version, about = "Irrigation watering-scale reporter")]
pub struct Cli {
    /// Log debug details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save default credentials, location and timezone for later `report` runs.
    Configure,

    /// Fetch weather and print the watering-scale payload.
    Report {
        /// Location query, e.g. "Boston,MA". Falls back to saved config.
        #[arg(long)]
        loc: Option<String>,

        /// Weather Underground API key. Falls back to saved config.
        #[arg(long)]
        key: Option<String>,

        /// Timezone offset in quarter-hour units, 48 = UTC. Falls back to
        /// saved config, then UTC.
        #[arg(long)]
        tz: Option<String>,

        /// Output format: "json" for a JSON object, anything else for a
        /// query-string.
        #[arg(long)]
        format: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Report { loc, key, tz, format } => report(loc, key, tz, format).await,
        }
    }
}

/// Prompt for the saved defaults and write them to the config file.
/// A blank answer clears the corresponding default.
fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("Weather Underground API key:")
        .with_initial_value(config.api_key.as_deref().unwrap_or(""))
        .prompt()
        .context("Failed to read API key")?;
    config.api_key = non_empty(api_key);

    let location = Text::new("Default location, e.g. \"Boston,MA\":")
        .with_initial_value(config.location.as_deref().unwrap_or(""))
        .prompt()
        .context("Failed to read location")?;
    config.location = non_empty(location);

    let tz = Text::new("Default timezone offset in quarter-hour units (48 = UTC):")
        .with_initial_value(&config.tz.map(|units| units.to_string()).unwrap_or_default())
        .prompt()
        .context("Failed to read timezone offset")?;
    config.tz = match tz.trim() {
        "" => None,
        raw => Some(
            raw.parse::<i64>()
                .with_context(|| format!("Invalid timezone offset '{raw}'"))?,
        ),
    };

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// The report payload is the protocol: request-stage errors print as error
/// payloads in the selected format and the process still exits 0, matching
/// what the downstream controller expects to parse.
async fn report(
    loc: Option<String>,
    key: Option<String>,
    tz: Option<String>,
    format: Option<String>,
) -> Result<()> {
    let config = Config::load().unwrap_or_else(|err| {
        warn!("Could not load saved configuration: {err:#}");
        Config::default()
    });

    let format = ResponseFormat::from_param(format.as_deref());
    let loc = loc.or(config.location);
    let key = key.or(config.api_key);
    let tz = tz.or_else(|| config.tz.map(|units| units.to_string()));

    let request = match ScaleRequest::from_params(loc.as_deref(), key.as_deref(), tz.as_deref()) {
        Ok(request) => request,
        Err(err) => {
            println!("{}", format.render_error(err));
            return Ok(());
        }
    };

    let fetcher = HttpFetcher::new(request.api_key.clone());
    let observations = fetcher.observations(&request.location).await;
    let report = ScaleReport::compute(&observations, request.tz);

    debug!("watering scale for '{}': {}", request.location, report.scale);
    if let Some(minute) = report.sunrise_minute {
        debug!("local sunrise at {}", fmt_minute(minute));
    }
    if let Some(minute) = report.sunset_minute {
        debug!("local sunset at {}", fmt_minute(minute));
    }

    println!("{}", format.render_report(&report)?);
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// Minute-of-day as HH:MM for debug logging.
fn fmt_minute(minute: u16) -> String {
    NaiveTime::from_hms_opt(u32::from(minute) / 60, u32::from(minute) % 60, 0)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| minute.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_answers_clear_defaults() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty(" KEY ".to_string()), Some("KEY".to_string()));
    }

    #[test]
    fn minutes_format_as_wall_clock_time() {
        assert_eq!(fmt_minute(0), "00:00");
        assert_eq!(fmt_minute(390), "06:30");
        assert_eq!(fmt_minute(1439), "23:59");
    }
}
