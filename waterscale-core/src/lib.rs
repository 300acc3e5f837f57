//! Core library for the `waterscale` CLI.
//!
//! This crate defines:
//! - The watering-scale computation and sun-time localization
//! - Request parameter validation and the wire error taxonomy
//! - Weather providers (Weather Underground, OpenWeatherMap)
//! - Response formatting (JSON / query-string payloads)
//! - Configuration & credentials handling
//!
//! It is used by `waterscale-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod errors;
pub mod format;
pub mod model;
pub mod provider;
pub mod scale;

pub use config::Config;
pub use errors::RequestError;
pub use format::ResponseFormat;
pub use model::{Observations, ScaleRequest, SunTimes, TzOffset, WeatherSample};
pub use provider::{HttpFetcher, WeatherFetcher};
pub use scale::{ScaleReport, local_sun_minute, watering_scale};
