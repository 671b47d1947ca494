use crate::scheme::Mode;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning a lighting configuration into frames.
///
/// Capacity overflow is deliberately absent: oversized schemes are clipped
/// to the frame budget instead of rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("The mode {0} is not supported yet")]
    UnsupportedMode(Mode),

    #[error("Unknown mode: {0} (expected solid|blink|cycle|wave|lightning|pulse)")]
    UnknownMode(String),

    #[error("Not a hex color: {0}")]
    InvalidColor(String),

    #[error("Too many colors: {count} (at most {max})")]
    TooManyColors { count: usize, max: usize },

    #[error("{name}: the parameter must be an integer 0-100, got {value}")]
    OutOfRange { name: &'static str, value: u32 },

    #[error("No mode specified (solid|blink|cycle|wave|lightning|pulse)")]
    NoMode,
}
