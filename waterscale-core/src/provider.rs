use std::fmt::Debug;

use async_trait::async_trait;
use log::warn;

use crate::model::{Observations, SunTimes, WeatherSample};

pub mod openweather;
pub mod wunderground;

pub use openweather::OpenWeatherMap;
pub use wunderground::Wunderground;

/// Upstream weather collaborator: resolves a prepared location string into
/// the readings the watering formula consumes.
///
/// Implementations never fail; readings they cannot obtain stay unknown so
/// the computed scale degrades toward the baseline.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn observations(&self, location: &str) -> Observations;
}

/// Production fetcher: Weather Underground for yesterday's summary and the
/// current conditions, then OpenWeatherMap for sunrise/sunset.
#[derive(Debug)]
pub struct HttpFetcher {
    wunderground: Wunderground,
    openweather: OpenWeatherMap,
}

impl HttpFetcher {
    pub fn new(api_key: String) -> Self {
        HttpFetcher {
            wunderground: Wunderground::new(api_key),
            openweather: OpenWeatherMap::new(),
        }
    }
}

#[async_trait]
impl WeatherFetcher for HttpFetcher {
    async fn observations(&self, location: &str) -> Observations {
        let sample = match self.wunderground.yesterday_conditions(location).await {
            Ok(sample) => sample,
            Err(err) => {
                warn!("Weather Underground lookup failed for '{location}': {err:#}");
                WeatherSample::default()
            }
        };

        let sun = match self.openweather.sun_times(location).await {
            Ok(sun) => sun,
            Err(err) => {
                warn!("OpenWeatherMap lookup failed for '{location}': {err:#}");
                SunTimes::default()
            }
        };

        Observations { sample, sun }
    }
}

/// Lenient reading parse. Providers encode numbers as strings and fall
/// back to empty strings or markers like `"T"` (trace precipitation) for
/// values they could not measure; those all degrade to unknown.
pub(crate) fn parse_reading(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
