use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, DEFAULT_RED, RAINBOW};
use crate::error::Error;

/// Animation mode of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Solid,
    Blink,
    Cycle,
    Wave,
    Lightning,
    Pulse,
    /// Accepted by the parser, rejected by the frame builder.
    Visualizer,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Solid,
        Mode::Blink,
        Mode::Cycle,
        Mode::Wave,
        Mode::Lightning,
        Mode::Pulse,
        Mode::Visualizer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Solid => "solid",
            Mode::Blink => "blink",
            Mode::Cycle => "cycle",
            Mode::Wave => "wave",
            Mode::Lightning => "lightning",
            Mode::Pulse => "pulse",
            Mode::Visualizer => "visualizer",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

/// One of the two diode groups of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Upper,
    Lower,
}

impl Channel {
    /// Byte offset of this channel's command inside a color pair.
    pub const fn offset(self) -> usize {
        match self {
            Channel::Upper => 0,
            Channel::Lower => 4,
        }
    }
}

/// Animation settings for one channel.
///
/// An empty `colors` list means "no colors given": blink draws random
/// colors, the other modes fall back to their default palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelScheme {
    pub mode: Mode,
    pub colors: Vec<Rgb>,
    pub brightness: u8,
    pub speed: u8,
    /// Only used by blink.
    pub delay: u8,
}

impl ChannelScheme {
    pub const DEFAULT_BRIGHTNESS: u8 = 100;
    pub const DEFAULT_SPEED: u8 = 81;
    pub const DEFAULT_DELAY: u8 = 10;

    pub fn new(mode: Mode) -> Self {
        ChannelScheme {
            mode,
            colors: Vec::new(),
            brightness: Self::DEFAULT_BRIGHTNESS,
            speed: Self::DEFAULT_SPEED,
            delay: Self::DEFAULT_DELAY,
        }
    }

    /// Solid black, used for a channel the user left unconfigured.
    pub fn off() -> Self {
        ChannelScheme::new(Mode::Solid).with_colors(vec![Rgb::BLACK])
    }

    pub fn with_colors(mut self, colors: Vec<Rgb>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_delay(mut self, delay: u8) -> Self {
        self.delay = delay;
        self
    }

    /// The colors the sequencers work from, with mode defaults applied.
    ///
    /// Empty only for blink without colors (random blink).
    pub fn palette(&self) -> Cow<'_, [Rgb]> {
        if !self.colors.is_empty() {
            return Cow::Borrowed(&self.colors);
        }
        match self.mode {
            Mode::Blink => Cow::Borrowed(&[]),
            Mode::Cycle | Mode::Wave => Cow::Borrowed(&RAINBOW),
            _ => Cow::Owned(vec![DEFAULT_RED]),
        }
    }
}

/// The upper and lower channel schemes of one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSchemes {
    pub upper: ChannelScheme,
    pub lower: ChannelScheme,
}

impl ColorSchemes {
    pub fn new(upper: ChannelScheme, lower: ChannelScheme) -> Self {
        ColorSchemes { upper, lower }
    }

    /// The same scheme on both channels.
    pub fn uniform(scheme: ChannelScheme) -> Self {
        ColorSchemes {
            upper: scheme.clone(),
            lower: scheme,
        }
    }

    pub fn get(&self, channel: Channel) -> &ChannelScheme {
        match channel {
            Channel::Upper => &self.upper,
            Channel::Lower => &self.lower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("wave".parse::<Mode>().unwrap(), Mode::Wave);
        assert_eq!("visualizer".parse::<Mode>().unwrap(), Mode::Visualizer);
        assert_eq!(
            "strobe".parse::<Mode>(),
            Err(Error::UnknownMode("strobe".to_string()))
        );
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_defaults() {
        let scheme = ChannelScheme::new(Mode::Blink);
        assert_eq!(scheme.brightness, 100);
        assert_eq!(scheme.speed, 81);
        assert_eq!(scheme.delay, 10);
    }

    #[test]
    fn test_default_palettes() {
        assert!(ChannelScheme::new(Mode::Blink).palette().is_empty());
        assert_eq!(ChannelScheme::new(Mode::Cycle).palette().len(), 9);
        assert_eq!(ChannelScheme::new(Mode::Wave).palette()[0], Rgb::from_hex(0xff0000));
        assert_eq!(&*ChannelScheme::new(Mode::Pulse).palette(), &[DEFAULT_RED]);

        let explicit = ChannelScheme::new(Mode::Cycle).with_colors(vec![Rgb::BLACK]);
        assert_eq!(&*explicit.palette(), &[Rgb::BLACK]);
    }

    #[test]
    fn test_channel_offsets() {
        assert_eq!(Channel::Upper.offset(), 0);
        assert_eq!(Channel::Lower.offset(), 4);
    }
}
