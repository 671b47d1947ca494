//! Wire packets understood by the microphone.
//!
//! Every packet is 64 bytes. A single-command animation is stored on the
//! device once ("save"); anything longer has to be streamed pair by pair and
//! repeated by the transport ("stream").

mod display;
mod save;

use std::time::Duration;

use tracing::{debug, trace};

use crate::frame::FrameSequence;
use crate::scheme::Channel;

pub use display::{build_display_command, build_display_packet, build_display_packets, DISPLAY_OPCODE};
pub use save::{build_footer, build_header, build_save_packets, build_size_packet, DATA_OPCODE, SIZE_OPCODE};

pub const PACKET_SIZE: usize = 64;
pub const HEADER_CODE: u8 = 0x04;

/// Pause between two streamed pairs.
pub const DISPLAY_INTERVAL: Duration = Duration::from_millis(100);

pub type Packet = [u8; PACKET_SIZE];

/// How the transport should deliver a frame sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transmission {
    /// Send once; the device keeps showing the color.
    Save(Vec<Packet>),
    /// Send repeatedly, waiting `interval` after each data packet.
    Stream {
        packets: Vec<Packet>,
        interval: Duration,
    },
}

impl Transmission {
    /// Choose the delivery strategy from the upper channel's active command count.
    ///
    /// Both channels are equal after assembly, so either one decides.
    pub fn plan(frames: &FrameSequence) -> Self {
        let pairs = frames.active_commands(Channel::Upper);
        let transmission = if pairs == 1 {
            Transmission::Save(build_save_packets(frames, pairs))
        } else {
            Transmission::Stream {
                packets: build_display_packets(frames, pairs),
                interval: DISPLAY_INTERVAL,
            }
        };

        debug!(
            pairs,
            frames = frames.frame_count(),
            packets = transmission.packets().len(),
            looping = transmission.is_looping(),
            "Planned transmission"
        );
        for packet in transmission.packets() {
            trace!("Packet: {}", hex(packet));
        }

        transmission
    }

    pub fn packets(&self) -> &[Packet] {
        match self {
            Transmission::Save(packets) => packets,
            Transmission::Stream { packets, .. } => packets,
        }
    }

    pub fn is_looping(&self) -> bool {
        matches!(self, Transmission::Stream { .. })
    }
}

/// Space separated lowercase hex.
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::build_frames;
    use crate::color::Rgb;
    use crate::scheme::{ChannelScheme, ColorSchemes, Mode};

    #[test]
    fn test_solid_is_saved() {
        let schemes = ColorSchemes::uniform(
            ChannelScheme::new(Mode::Solid).with_colors(vec![Rgb::from_hex(0x00ff00)]),
        );
        let frames = build_frames(&schemes).unwrap();
        let transmission = Transmission::plan(&frames);

        assert!(!transmission.is_looping());
        let packets = transmission.packets();
        // header, one frame, footer, size header, size, footer
        assert_eq!(frames.frame_count(), 1);
        assert_eq!(packets.len(), 6);
        assert_eq!(packets[0], build_header(DATA_OPCODE, 1));
        assert_eq!(packets[1], *frames.frames()[0].as_bytes());
        assert_eq!(&packets[1][..8], &[0x81, 0, 0xff, 0, 0x81, 0, 0xff, 0]);
        assert_eq!(packets[2], build_footer());
        assert_eq!(packets[3], build_header(SIZE_OPCODE, 1));
        assert_eq!(packets[4], build_size_packet(1));
        assert_eq!(packets[5], build_footer());
    }

    #[test]
    fn test_animation_is_streamed() {
        let schemes = ColorSchemes::uniform(
            ChannelScheme::new(Mode::Blink)
                .with_colors(vec![Rgb::from_hex(0xffffff)])
                .with_speed(81)
                .with_delay(10),
        );
        let frames = build_frames(&schemes).unwrap();
        let transmission = Transmission::plan(&frames);

        assert!(transmission.is_looping());
        assert_eq!(transmission.packets().len(), 60);
        match transmission {
            Transmission::Stream { interval, .. } => assert_eq!(interval, DISPLAY_INTERVAL),
            Transmission::Save(_) => unreachable!(),
        }
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex(&[0x04, 0xf2, 0x00]), "04 f2 00");
    }
}
