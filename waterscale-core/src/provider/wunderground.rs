use anyhow::{Context, Result, anyhow};
use chrono::DateTime;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::model::WeatherSample;

use super::{parse_reading, truncate_body};

/// Client for the Weather Underground API. One request covers both
/// yesterday's daily summary and the current observation.
#[derive(Debug, Clone)]
pub struct Wunderground {
    api_key: String,
    http: Client,
}

impl Wunderground {
    pub fn new(api_key: String) -> Self {
        Wunderground { api_key, http: Client::new() }
    }

    /// Yesterday's humidity/temperature/precipitation summary plus the
    /// current observation for `location` (spaces already underscored).
    pub async fn yesterday_conditions(&self, location: &str) -> Result<WeatherSample> {
        let url = format!(
            "http://api.wunderground.com/api/{}/yesterday/conditions/q/{}.json",
            self.api_key, location
        );

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to Weather Underground")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Weather Underground response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Weather Underground request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let sample = parse_yesterday_conditions(&body)?;
        debug!("Weather Underground sample for '{location}': {sample:?}");
        Ok(sample)
    }
}

fn parse_yesterday_conditions(body: &str) -> Result<WeatherSample> {
    let parsed: WuResponse =
        serde_json::from_str(body).context("Failed to parse Weather Underground JSON")?;

    let mut sample = WeatherSample::default();

    if let Some(summary) = parsed
        .history
        .and_then(|history| history.dailysummary.into_iter().next())
    {
        sample.max_humidity = parse_reading(summary.maxhumidity.as_deref());
        sample.min_humidity = parse_reading(summary.minhumidity.as_deref());
        sample.mean_temp_f = parse_reading(summary.meantempi.as_deref());
        sample.precip_yesterday_in = parse_reading(summary.precipi.as_deref());
    }

    if let Some(current) = parsed.current_observation {
        sample.precip_today_in = parse_reading(current.precip_today_in.as_deref());
        sample.humidity_now = current
            .relative_humidity
            .as_deref()
            .map(|raw| raw.replace('%', ""))
            .and_then(|raw| parse_reading(Some(&raw)));
        sample.observed_at = current
            .observation_epoch
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|ts| DateTime::from_timestamp(ts, 0));
    }

    Ok(sample)
}

#[derive(Debug, Deserialize)]
struct WuResponse {
    history: Option<WuHistory>,
    current_observation: Option<WuCurrentObservation>,
}

#[derive(Debug, Deserialize)]
struct WuHistory {
    #[serde(default)]
    dailysummary: Vec<WuDailySummary>,
}

#[derive(Debug, Deserialize)]
struct WuDailySummary {
    maxhumidity: Option<String>,
    minhumidity: Option<String>,
    meantempi: Option<String>,
    precipi: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WuCurrentObservation {
    precip_today_in: Option<String>,
    relative_humidity: Option<String>,
    observation_epoch: Option<String>,
}
