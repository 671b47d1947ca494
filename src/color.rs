use rand::Rng;

use crate::error::{Error, Result};

/// Default palette for cycle and wave when no colors are given.
pub const RAINBOW: [Rgb; 9] = [
    Rgb::from_hex(0xff0000),
    Rgb::from_hex(0xff009e),
    Rgb::from_hex(0xcd00ff),
    Rgb::from_hex(0x2b00ff),
    Rgb::from_hex(0x0068ff),
    Rgb::from_hex(0x00ffff),
    Rgb::from_hex(0x00ff67),
    Rgb::from_hex(0x32ff00),
    Rgb::from_hex(0xceff00),
];

/// Default color for solid, lightning and pulse.
pub const DEFAULT_RED: Rgb = Rgb::from_hex(0xf20000);

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` value. Bits above 24 are ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Scale every byte by `brightness / 100`, truncating.
    pub fn scale(self, brightness: u8) -> Self {
        let scale = |c: u8| (u16::from(c) * u16::from(brightness.min(100)) / 100) as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Draw a uniformly distributed 24-bit color.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Rgb::from_hex(rng.gen_range(0..=0xff_ffff))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

/// Parse `RRGGBB` or `#RRGGBB`.
pub fn parse_hex(text: &str) -> Result<Rgb> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    if digits.is_empty() || digits.len() > 6 {
        return Err(Error::InvalidColor(text.to_string()));
    }
    u32::from_str_radix(digits, 16)
        .map(Rgb::from_hex)
        .map_err(|_| Error::InvalidColor(text.to_string()))
}

/// Color at `step` of a `length`-step linear blend from `start` to `end`.
///
/// Step 0 is `start` and step `length - 1` is `end`; each byte is blended
/// independently and truncated.
pub fn lerp(start: Rgb, end: Rgb, step: usize, length: usize) -> Rgb {
    if length <= 1 {
        return start;
    }
    let t = step as f64 / (length - 1) as f64;
    let blend = |s: u8, e: u8| (f64::from(s) + t * (f64::from(e) - f64::from(s))) as u8;
    Rgb::new(blend(start.r, end.r), blend(start.g, end.g), blend(start.b, end.b))
}

/// All `length` steps of the blend from `start` to `end`.
pub fn gradient(start: Rgb, end: Rgb, length: usize) -> impl Iterator<Item = Rgb> {
    (0..length).map(move |step| lerp(start, end, step, length))
}
