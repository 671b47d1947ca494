//! Frame generation for the RGB lights of HyperX QuadCast S and DuoCast
//! microphones.
//!
//! A [`ColorSchemes`] pair describes how the upper and lower diode groups
//! animate. [`build_frames`] turns it into 64-byte frames, and
//! [`protocol::Transmission`] turns those into the packets a USB transport
//! sends to the device.

pub mod assembler;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod planner;
pub mod protocol;
pub mod scheme;
pub mod sequencer;

pub use assembler::{build_frames, build_frames_with_rng};
pub use color::Rgb;
pub use error::{Error, Result};
pub use frame::{count_color_commands, ColorCommand, Frame, FrameSequence};
pub use scheme::{Channel, ChannelScheme, ColorSchemes, Mode};
