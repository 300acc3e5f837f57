//! Wire formats for the watering-scale payload.
//!
//! The downstream irrigation controller parses either a JSON object or a
//! `&key=value` query-string, both carrying the same key set. Unknown
//! readings are encoded with the sentinel values the controller expects:
//! -1 everywhere except the mean temperature, which uses -500.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::errors::RequestError;
use crate::scale::ScaleReport;

/// Output format selected by the `format` request parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    #[default]
    QueryString,
}

impl ResponseFormat {
    /// `json` and `JSON` select JSON; anything else, including an absent
    /// parameter, selects the query-string form. Never fails.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("json" | "JSON") => ResponseFormat::Json,
            _ => ResponseFormat::QueryString,
        }
    }

    pub fn render_report(self, report: &ScaleReport) -> Result<String> {
        let wire = WireReport::from(report);
        match self {
            ResponseFormat::Json => {
                serde_json::to_string(&wire).context("Failed to serialize report payload")
            }
            ResponseFormat::QueryString => Ok(wire.to_query_string()),
        }
    }

    pub fn render_error(self, error: RequestError) -> String {
        match self {
            ResponseFormat::Json => format!("{{\"err\":\"{}\"}}", error.code()),
            ResponseFormat::QueryString => format!("&err={}", error.code()),
        }
    }
}

/// Payload with the original sentinel encoding restored. Field order is
/// the key order on the wire.
#[derive(Debug, Serialize)]
struct WireReport {
    scale: i64,
    tz: i64,
    sunrise: i64,
    sunset: i64,
    maxh: i64,
    minh: i64,
    meant: i64,
    pre: f64,
    prec: f64,
    hc: i64,
}

impl WireReport {
    fn to_query_string(&self) -> String {
        format!(
            "&scale={}&tz={}&sunrise={}&sunset={}&maxh={}&minh={}&meant={}&pre={}&prec={}&hc={}",
            self.scale,
            self.tz,
            self.sunrise,
            self.sunset,
            self.maxh,
            self.minh,
            self.meant,
            self.pre,
            self.prec,
            self.hc,
        )
    }
}

impl From<&ScaleReport> for WireReport {
    fn from(report: &ScaleReport) -> Self {
        let sample = &report.sample;
        WireReport {
            scale: i64::from(report.scale),
            tz: report.tz.units(),
            sunrise: report.sunrise_minute.map_or(-1, i64::from),
            sunset: report.sunset_minute.map_or(-1, i64::from),
            maxh: int_reading(sample.max_humidity, -1),
            minh: int_reading(sample.min_humidity, -1),
            meant: int_reading(sample.mean_temp_f, -500),
            pre: sample.precip_yesterday_in.unwrap_or(-1.0),
            prec: sample.precip_today_in.unwrap_or(-1.0),
            hc: int_reading(sample.humidity_now, -1),
        }
    }
}

/// Integer echo of a float reading: truncated toward zero, sentinel when
/// unknown.
fn int_reading(value: Option<f64>, unknown: i64) -> i64 {
    value.map_or(unknown, |v| v.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Observations, SunTimes, TzOffset, WeatherSample};
    use crate::scale::ScaleReport;

    fn full_report() -> ScaleReport {
        let observations = Observations {
            sample: WeatherSample {
                max_humidity: Some(85.5),
                min_humidity: Some(60.0),
                mean_temp_f: Some(70.0),
                precip_yesterday_in: Some(0.5),
                precip_today_in: None,
                humidity_now: Some(52.0),
                observed_at: None,
            },
            sun: SunTimes { sunrise: Some(23_400), sunset: Some(67_500) },
        };
        ScaleReport::compute(&observations, TzOffset::UTC)
    }

    fn empty_report() -> ScaleReport {
        ScaleReport::compute(&Observations::default(), TzOffset::new(44))
    }

    #[test]
    fn json_selection_is_exact() {
        assert_eq!(ResponseFormat::from_param(Some("json")), ResponseFormat::Json);
        assert_eq!(ResponseFormat::from_param(Some("JSON")), ResponseFormat::Json);
        assert_eq!(ResponseFormat::from_param(Some("Json")), ResponseFormat::QueryString);
        assert_eq!(ResponseFormat::from_param(Some("xml")), ResponseFormat::QueryString);
        assert_eq!(ResponseFormat::from_param(None), ResponseFormat::QueryString);
    }

    #[test]
    fn json_report_carries_the_full_key_set() {
        // hf = 30 - (85.5 + 60) / 2 = -42.75, tf = 0, rf = -100,
        // raw = 100 - 42.75 - 100 = -42.75 -> clamps to 0
        assert_eq!(full_report().scale, 0);

        let json = ResponseFormat::Json
            .render_report(&full_report())
            .expect("serialization must succeed");
        assert_eq!(
            json,
            "{\"scale\":0,\"tz\":48,\"sunrise\":390,\"sunset\":1125,\
             \"maxh\":85,\"minh\":60,\"meant\":70,\"pre\":0.5,\"prec\":-1.0,\"hc\":52}"
        );
    }

    #[test]
    fn query_string_report_matches_json_values() {
        let query = ResponseFormat::QueryString
            .render_report(&full_report())
            .expect("rendering must succeed");
        assert_eq!(
            query,
            "&scale=0&tz=48&sunrise=390&sunset=1125&maxh=85&minh=60&meant=70&pre=0.5&prec=-1&hc=52"
        );
    }

    #[test]
    fn unknown_readings_render_as_sentinels() {
        let query = ResponseFormat::QueryString
            .render_report(&empty_report())
            .expect("rendering must succeed");
        assert_eq!(
            query,
            "&scale=100&tz=44&sunrise=-1&sunset=-1&maxh=-1&minh=-1&meant=-500&pre=-1&prec=-1&hc=-1"
        );
    }

    #[test]
    fn error_payloads_render_in_both_formats() {
        assert_eq!(
            ResponseFormat::Json.render_error(RequestError::MissingLocation),
            "{\"err\":\"missing_location\"}"
        );
        assert_eq!(
            ResponseFormat::QueryString.render_error(RequestError::MissingKey),
            "&err=missing_key"
        );
        assert_eq!(
            ResponseFormat::Json.render_error(RequestError::MissingTz),
            "{\"err\":\"missing_tz\"}"
        );
    }
}
