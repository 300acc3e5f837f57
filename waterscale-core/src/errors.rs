use thiserror::Error;

/// Request-stage failures.
///
/// These are the only errors a caller ever sees: anything that goes wrong
/// after parameter validation degrades to unknown readings instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("missing location parameter")]
    MissingLocation,

    #[error("missing API key parameter")]
    MissingKey,

    #[error("timezone offset is not an integer")]
    MissingTz,
}

impl RequestError {
    /// Wire code used in the error payload.
    pub fn code(self) -> &'static str {
        match self {
            RequestError::MissingLocation => "missing_location",
            RequestError::MissingKey => "missing_key",
            RequestError::MissingTz => "missing_tz",
        }
    }
}
