use crate::frame::{FrameSequence, PAIR_SIZE};

use super::{Packet, HEADER_CODE, PACKET_SIZE};

/// Opcode switching the device to show the next pair directly.
pub const DISPLAY_OPCODE: u8 = 0xf2;

/// Build the command that precedes every streamed pair.
pub fn build_display_command() -> Packet {
    let mut packet = [0u8; PACKET_SIZE];
    packet[0] = HEADER_CODE;
    packet[1] = DISPLAY_OPCODE;
    packet[8] = 0x01;
    packet
}

/// Build a data packet carrying a single color pair.
pub fn build_display_packet(pair: [u8; PAIR_SIZE]) -> Packet {
    let mut packet = [0u8; PACKET_SIZE];
    packet[..PAIR_SIZE].copy_from_slice(&pair);
    packet
}

/// Build one loop iteration: a display command and a data packet for each
/// of the first `pairs` color pairs.
pub fn build_display_packets(frames: &FrameSequence, pairs: usize) -> Vec<Packet> {
    (0..pairs)
        .flat_map(|index| [build_display_command(), build_display_packet(frames.pair(index))])
        .collect()
}
