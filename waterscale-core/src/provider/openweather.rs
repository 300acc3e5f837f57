use anyhow::{Context, Result, anyhow};
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::model::SunTimes;

use super::truncate_body;

const CURRENT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Client for the OpenWeatherMap current-weather API, used only for the
/// sunrise/sunset timestamps it reports alongside the conditions.
#[derive(Debug, Clone)]
pub struct OpenWeatherMap {
    http: Client,
}

impl OpenWeatherMap {
    pub fn new() -> Self {
        OpenWeatherMap { http: Client::new() }
    }

    /// Today's sunrise and sunset for `location`, as UTC epoch seconds.
    pub async fn sun_times(&self, location: &str) -> Result<SunTimes> {
        let res = self
            .http
            .get(CURRENT_WEATHER_URL)
            .query(&[("q", location)])
            .send()
            .await
            .context("Failed to send request to OpenWeatherMap")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeatherMap response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeatherMap request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let sun = parse_sun_times(&body)?;
        debug!("OpenWeatherMap sun times for '{location}': {sun:?}");
        Ok(sun)
    }
}

impl Default for OpenWeatherMap {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_sun_times(body: &str) -> Result<SunTimes> {
    let parsed: OwResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeatherMap JSON")?;

    let sys = parsed.sys.unwrap_or_default();
    Ok(SunTimes { sunrise: sys.sunrise, sunset: sys.sunset })
}

#[derive(Debug, Deserialize)]
struct OwResponse {
    sys: Option<OwSys>,
}

#[derive(Debug, Deserialize, Default)]
struct OwSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}
