use chrono::{DateTime, Utc};

use crate::errors::RequestError;

/// Weather readings consumed by the watering formula.
///
/// Every reading is optional: providers routinely omit fields, encode them
/// as empty strings, or mark them unmeasurable (e.g. trace precipitation).
/// An unknown reading contributes nothing to the computed scale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSample {
    /// Yesterday's maximum relative humidity, percent.
    pub max_humidity: Option<f64>,
    /// Yesterday's minimum relative humidity, percent.
    pub min_humidity: Option<f64>,
    /// Yesterday's mean temperature, degrees Fahrenheit.
    pub mean_temp_f: Option<f64>,
    /// Yesterday's precipitation, inches.
    pub precip_yesterday_in: Option<f64>,
    /// Precipitation so far today, inches.
    pub precip_today_in: Option<f64>,
    /// Current relative humidity, percent. Echoed in the payload but not
    /// part of the formula.
    pub humidity_now: Option<f64>,
    /// When the current observation was taken, informational only.
    pub observed_at: Option<DateTime<Utc>>,
}

/// Sunrise and sunset as UTC epoch seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// Everything the upstream weather collaborator resolves for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observations {
    pub sample: WeatherSample,
    pub sun: SunTimes,
}

/// Timezone offset in quarter-hour units past -12 h, so 48 units = UTC.
/// The unit scheme supports quarter-hour-offset timezones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TzOffset(i64);

impl TzOffset {
    pub const UTC: TzOffset = TzOffset(48);

    pub fn new(units: i64) -> Self {
        TzOffset(units)
    }

    pub fn units(self) -> i64 {
        self.0
    }

    /// Offset from UTC in seconds (900 s per unit).
    pub fn offset_seconds(self) -> i64 {
        900 * (self.0 - 48)
    }
}

impl Default for TzOffset {
    fn default() -> Self {
        TzOffset::UTC
    }
}

/// Validated request parameters for a watering-scale report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleRequest {
    /// Location query with spaces already replaced by underscores, ready
    /// to be placed in provider URLs.
    pub location: String,
    /// Weather Underground API key.
    pub api_key: String,
    pub tz: TzOffset,
}

impl ScaleRequest {
    /// Validate raw request parameters.
    ///
    /// A missing or empty `loc`/`key` is an error. A missing `tz` defaults
    /// to UTC; a present but non-integer `tz` is an error.
    pub fn from_params(
        loc: Option<&str>,
        key: Option<&str>,
        tz: Option<&str>,
    ) -> Result<Self, RequestError> {
        let loc = loc
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(RequestError::MissingLocation)?;

        let key = key
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(RequestError::MissingKey)?;

        let tz = match tz.map(str::trim).filter(|s| !s.is_empty()) {
            None => TzOffset::UTC,
            Some(raw) => raw
                .parse::<i64>()
                .map(TzOffset::new)
                .map_err(|_| RequestError::MissingTz)?,
        };

        Ok(ScaleRequest {
            location: loc.replace(' ', "_"),
            api_key: key.to_owned(),
            tz,
        })
    }
}
