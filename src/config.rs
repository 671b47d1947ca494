use serde::{Deserialize, Serialize};

use crate::color::parse_hex;
use crate::error::{Error, Result};
use crate::scheme::{ChannelScheme, ColorSchemes, Mode};

/// Most colors a single channel accepts.
pub const MAX_COLORS: usize = 10;

/// Lighting configuration file.
///
/// `upper` and `lower` fall back to `all`. When only one channel is set and
/// there is no `all`, the other channel is switched off.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub all: Option<SchemeConfig>,
    pub upper: Option<SchemeConfig>,
    pub lower: Option<SchemeConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemeConfig {
    pub mode: Mode,
    /// Hex colors, `RRGGBB` or `#RRGGBB`. Empty selects the mode's default.
    #[serde(default)]
    pub colors: Vec<String>,
    pub brightness: Option<u32>,
    pub speed: Option<u32>,
    /// Blink only
    pub delay: Option<u32>,
}

impl SchemeConfig {
    pub fn new(mode: Mode) -> Self {
        SchemeConfig {
            mode,
            colors: Vec::new(),
            brightness: None,
            speed: None,
            delay: None,
        }
    }

    /// Validate into a channel scheme, applying defaults for unset values.
    pub fn to_scheme(&self) -> Result<ChannelScheme> {
        if self.colors.len() > MAX_COLORS {
            return Err(Error::TooManyColors {
                count: self.colors.len(),
                max: MAX_COLORS,
            });
        }
        let colors = self
            .colors
            .iter()
            .map(|color| parse_hex(color))
            .collect::<Result<Vec<_>>>()?;

        Ok(ChannelScheme {
            mode: self.mode,
            colors,
            brightness: percent("brightness", self.brightness, ChannelScheme::DEFAULT_BRIGHTNESS)?,
            speed: percent("speed", self.speed, ChannelScheme::DEFAULT_SPEED)?,
            delay: percent("delay", self.delay, ChannelScheme::DEFAULT_DELAY)?,
        })
    }
}

impl Config {
    /// Resolve both channels.
    pub fn to_schemes(&self) -> Result<ColorSchemes> {
        let upper = self.upper.as_ref().or(self.all.as_ref());
        let lower = self.lower.as_ref().or(self.all.as_ref());

        let (upper, lower) = match (upper, lower) {
            (Some(upper), Some(lower)) => (upper.to_scheme()?, lower.to_scheme()?),
            (Some(upper), None) => (upper.to_scheme()?, ChannelScheme::off()),
            (None, Some(lower)) => (ChannelScheme::off(), lower.to_scheme()?),
            (None, None) => return Err(Error::NoMode),
        };

        Ok(ColorSchemes::new(upper, lower))
    }
}

fn percent(name: &'static str, value: Option<u32>, default: u8) -> Result<u8> {
    match value {
        None => Ok(default),
        Some(value) if value <= 100 => Ok(value as u8),
        Some(value) => Err(Error::OutOfRange { name, value }),
    }
}
