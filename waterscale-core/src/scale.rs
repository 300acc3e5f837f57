//! Watering-scale computation and sun-time localization.
//!
//! The scale is a 0-200 index where 100 means baseline irrigation need,
//! lower means wetter conditions (water less) and higher means drier
//! conditions (water more). Both functions are pure and never fail: an
//! all-unknown sample yields the baseline scale.

use crate::model::{Observations, TzOffset, WeatherSample};

const SECONDS_PER_DAY: i64 = 86_400;
const MIN_SCALE: f64 = 0.0;
const MAX_SCALE: f64 = 200.0;

/// Computed report for one request: the scale, localized sun times and the
/// readings that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleReport {
    /// Watering scale, clamped to [0, 200].
    pub scale: u8,
    /// Offset the sun times were localized with, echoed in the payload.
    pub tz: TzOffset,
    /// Local sunrise as minute-of-day in [0, 1439].
    pub sunrise_minute: Option<u16>,
    /// Local sunset as minute-of-day in [0, 1439].
    pub sunset_minute: Option<u16>,
    pub sample: WeatherSample,
}

impl ScaleReport {
    pub fn compute(observations: &Observations, tz: TzOffset) -> ScaleReport {
        ScaleReport {
            scale: watering_scale(&observations.sample),
            tz,
            sunrise_minute: local_sun_minute(observations.sun.sunrise, tz),
            sunset_minute: local_sun_minute(observations.sun.sunset, tz),
            sample: observations.sample.clone(),
        }
    }
}

/// Watering scale from yesterday's humidity extremes, mean temperature and
/// precipitation.
///
/// Each factor drops out when its readings are unknown, so corrupt or
/// absent upstream data degrades toward the baseline of 100 instead of
/// producing a nonsensical scale. `humidity_now` does not participate.
pub fn watering_scale(sample: &WeatherSample) -> u8 {
    let mut humidity_factor = 0.0;
    if let (Some(max), Some(min)) = (sample.max_humidity, sample.min_humidity) {
        humidity_factor = 30.0 - (max + min) / 2.0;
    }

    let temp_factor = match sample.mean_temp_f {
        Some(mean) => (mean - 70.0) * 4.0,
        None => 0.0,
    };

    let mut rain_factor = 0.0;
    if let Some(inches) = sample.precip_yesterday_in {
        rain_factor -= inches * 200.0;
    }
    if let Some(inches) = sample.precip_today_in {
        rain_factor -= inches * 200.0;
    }

    let raw = (100.0 + humidity_factor + temp_factor + rain_factor).round();
    raw.clamp(MIN_SCALE, MAX_SCALE) as u8
}

/// Local minute-of-day for a UTC epoch timestamp, in [0, 1439].
///
/// The shifted timestamp is reduced with floor modulo (`rem_euclid`), so a
/// westward offset that pushes the sum negative still wraps into the
/// previous day instead of going negative. Unknown passes through.
pub fn local_sun_minute(epoch_seconds: Option<i64>, tz: TzOffset) -> Option<u16> {
    let shifted = epoch_seconds? + tz.offset_seconds();
    Some((shifted.rem_euclid(SECONDS_PER_DAY) / 60) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SunTimes;

    fn sample(
        max_humidity: Option<f64>,
        min_humidity: Option<f64>,
        mean_temp_f: Option<f64>,
        precip_yesterday_in: Option<f64>,
        precip_today_in: Option<f64>,
    ) -> WeatherSample {
        WeatherSample {
            max_humidity,
            min_humidity,
            mean_temp_f,
            precip_yesterday_in,
            precip_today_in,
            ..WeatherSample::default()
        }
    }

    #[test]
    fn all_unknown_readings_yield_the_baseline() {
        assert_eq!(watering_scale(&WeatherSample::default()), 100);
    }

    #[test]
    fn humidity_factor_uses_the_pair_mean() {
        // 30 - (80 + 60) / 2 = -40
        let s = sample(Some(80.0), Some(60.0), None, None, None);
        assert_eq!(watering_scale(&s), 60);
    }

    #[test]
    fn half_a_humidity_pair_contributes_nothing() {
        let s = sample(Some(80.0), None, None, None, None);
        assert_eq!(watering_scale(&s), 100);

        let s = sample(None, Some(60.0), None, None, None);
        assert_eq!(watering_scale(&s), 100);
    }

    #[test]
    fn current_humidity_does_not_participate() {
        let s = WeatherSample { humidity_now: Some(95.0), ..WeatherSample::default() };
        assert_eq!(watering_scale(&s), 100);
    }

    #[test]
    fn wet_humid_day_clamps_to_zero() {
        // hf = 30 - 90 = -60, tf = (100 - 70) * 4 = 120,
        // rf = -(200 + 100) = -300, raw = -140
        let s = sample(Some(90.0), Some(90.0), Some(100.0), Some(1.0), Some(0.5));
        assert_eq!(watering_scale(&s), 0);
    }

    #[test]
    fn extreme_heat_clamps_to_two_hundred() {
        // tf = (300 - 70) * 4 = 920
        let s = sample(None, None, Some(300.0), None, None);
        assert_eq!(watering_scale(&s), 200);
    }

    #[test]
    fn rain_compounds_across_both_days() {
        let s = sample(None, None, None, Some(0.1), Some(0.1));
        assert_eq!(watering_scale(&s), 60);
    }

    #[test]
    fn scale_is_deterministic() {
        let s = sample(Some(73.0), Some(41.0), Some(64.5), Some(0.02), None);
        assert_eq!(watering_scale(&s), watering_scale(&s));
    }

    #[test]
    fn utc_reference_leaves_the_epoch_untouched() {
        assert_eq!(local_sun_minute(Some(0), TzOffset::UTC), Some(0));
    }

    #[test]
    fn westward_offset_wraps_into_the_previous_day() {
        // One hour behind UTC: (0 - 3600) mod 86400 = 82800 -> minute 1380
        assert_eq!(local_sun_minute(Some(0), TzOffset::new(44)), Some(1380));
    }

    #[test]
    fn quarter_hour_offsets_are_supported() {
        // 50 units = UTC+30min; noon UTC becomes 12:30 local
        assert_eq!(local_sun_minute(Some(43_200), TzOffset::new(50)), Some(750));
    }

    #[test]
    fn unknown_sun_time_passes_through() {
        assert_eq!(local_sun_minute(None, TzOffset::new(44)), None);
    }

    #[test]
    fn report_combines_scale_and_sun_times() {
        let observations = Observations {
            sample: sample(Some(80.0), Some(60.0), None, None, None),
            sun: SunTimes { sunrise: Some(6 * 3600), sunset: Some(18 * 3600 + 60) },
        };

        let report = ScaleReport::compute(&observations, TzOffset::new(44));
        assert_eq!(report.scale, 60);
        assert_eq!(report.sunrise_minute, Some(300));
        assert_eq!(report.sunset_minute, Some(1021));
        assert_eq!(report.tz.units(), 44);
        assert_eq!(report.sample, observations.sample);
    }
}
