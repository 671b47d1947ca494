use crate::frame::FrameSequence;

use super::{Packet, HEADER_CODE, PACKET_SIZE};

/// Header opcode announcing data frames.
pub const DATA_OPCODE: u8 = 0x53;
/// Header opcode announcing the size packet.
pub const SIZE_OPCODE: u8 = 0x23;

/// Build a header packet: header code, opcode and a one-byte size.
pub fn build_header(opcode: u8, size: usize) -> Packet {
    let mut packet = [0u8; PACKET_SIZE];
    packet[0] = HEADER_CODE;
    packet[1] = opcode;
    // The device only reads the low byte; at most 90 frames are ever sent
    packet[8] = (size & 0xff) as u8;
    packet
}

/// Build the footer closing a header/data block.
pub fn build_footer() -> Packet {
    let mut packet = [0u8; PACKET_SIZE];
    packet[0] = HEADER_CODE;
    packet[1] = 0x02;
    packet
}

/// Build the size packet carrying the number of color pairs.
pub fn build_size_packet(pairs: usize) -> Packet {
    let mut packet = [0u8; PACKET_SIZE];
    packet[0] = 0x08;
    packet[PACKET_SIZE - 5] = 0x28;
    // Pair count, little-endian
    packet[PACKET_SIZE - 4] = (pairs & 0xff) as u8;
    packet[PACKET_SIZE - 3] = ((pairs >> 8) & 0xff) as u8;
    packet[PACKET_SIZE - 2] = 0xaa;
    packet[PACKET_SIZE - 1] = 0x55;
    packet
}

/// Build the packet sequence that stores `frames` on the device.
///
/// Data block (header, every frame, footer) followed by a size block
/// (header, size, footer).
pub fn build_save_packets(frames: &FrameSequence, pairs: usize) -> Vec<Packet> {
    let mut packets = Vec::with_capacity(frames.frame_count() + 5);

    packets.push(build_header(DATA_OPCODE, frames.frame_count()));
    packets.extend(frames.frames().iter().map(|frame| *frame.as_bytes()));
    packets.push(build_footer());

    packets.push(build_header(SIZE_OPCODE, 1));
    packets.push(build_size_packet(pairs));
    packets.push(build_footer());

    packets
}
