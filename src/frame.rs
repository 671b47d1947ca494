//! Frame layout and the command-count inspector.
//!
//! A frame is 64 bytes carrying eight color pairs. Each pair is eight bytes:
//! the upper channel's command followed by the lower channel's command. A
//! command is the tag byte `0x81` and three color bytes.

use std::fmt;

use crate::color::Rgb;
use crate::scheme::Channel;

pub const FRAME_SIZE: usize = 64;
pub const COMMAND_SIZE: usize = 4;
pub const PAIR_SIZE: usize = 2 * COMMAND_SIZE;
pub const PAIRS_PER_FRAME: usize = FRAME_SIZE / PAIR_SIZE;
pub const MAX_FRAME_COUNT: usize = 90;
pub const MAX_COLOR_PAIRS: usize = PAIRS_PER_FRAME * MAX_FRAME_COUNT;

/// Tag byte marking a slot that holds a color.
pub const RGB_TAG: u8 = 0x81;

/// One tagged color for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorCommand([u8; COMMAND_SIZE]);

impl ColorCommand {
    pub const EMPTY: ColorCommand = ColorCommand([0; COMMAND_SIZE]);

    pub fn new(color: Rgb) -> Self {
        ColorCommand([RGB_TAG, color.r, color.g, color.b])
    }

    pub fn from_bytes(bytes: [u8; COMMAND_SIZE]) -> Self {
        ColorCommand(bytes)
    }

    pub fn is_color(&self) -> bool {
        self.0[0] == RGB_TAG
    }

    pub fn color(&self) -> Option<Rgb> {
        self.is_color()
            .then(|| Rgb::new(self.0[1], self.0[2], self.0[3]))
    }

    pub fn as_bytes(&self) -> &[u8; COMMAND_SIZE] {
        &self.0
    }
}

/// A 64-byte block of eight color pairs.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Frame([u8; FRAME_SIZE]);

impl Frame {
    pub const fn zeroed() -> Self {
        Frame([0; FRAME_SIZE])
    }

    pub fn from_bytes(bytes: [u8; FRAME_SIZE]) -> Self {
        Frame(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }

    /// Byte range of `channel`'s command in pair `slot`.
    fn command_range(slot: usize, channel: Channel) -> std::ops::Range<usize> {
        debug_assert!(slot < PAIRS_PER_FRAME);
        let start = slot * PAIR_SIZE + channel.offset();
        start..start + COMMAND_SIZE
    }

    pub fn command(&self, slot: usize, channel: Channel) -> ColorCommand {
        let mut bytes = [0; COMMAND_SIZE];
        bytes.copy_from_slice(&self.0[Self::command_range(slot, channel)]);
        ColorCommand(bytes)
    }

    pub fn set_command(&mut self, slot: usize, channel: Channel, command: ColorCommand) {
        self.0[Self::command_range(slot, channel)].copy_from_slice(command.as_bytes());
    }

    /// The eight bytes of pair `slot`, upper command first.
    pub fn pair(&self, slot: usize) -> [u8; PAIR_SIZE] {
        let mut bytes = [0; PAIR_SIZE];
        bytes.copy_from_slice(&self.0[slot * PAIR_SIZE..(slot + 1) * PAIR_SIZE]);
        bytes
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::zeroed()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: String = self.0.iter()
            .map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ");
        write!(f, "Frame[{}]", hex)
    }
}

/// The frames generated for one pair of schemes, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn with_frame_count(count: usize) -> Self {
        FrameSequence {
            frames: vec![Frame::zeroed(); count],
        }
    }

    pub fn from_frames(frames: Vec<Frame>) -> Self {
        FrameSequence { frames }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Command number `index` of `channel`, counted across frames.
    pub fn command(&self, index: usize, channel: Channel) -> ColorCommand {
        self.frames
            .get(index / PAIRS_PER_FRAME)
            .map(|frame| frame.command(index % PAIRS_PER_FRAME, channel))
            .unwrap_or(ColorCommand::EMPTY)
    }

    /// Store command number `index` of `channel`, growing the sequence if needed.
    pub fn set_command(&mut self, index: usize, channel: Channel, command: ColorCommand) {
        let frame = index / PAIRS_PER_FRAME;
        if frame >= self.frames.len() {
            self.frames.resize(frame + 1, Frame::zeroed());
        }
        self.frames[frame].set_command(index % PAIRS_PER_FRAME, channel, command);
    }

    /// Color pair number `index`, counted across frames.
    pub fn pair(&self, index: usize) -> [u8; PAIR_SIZE] {
        self.frames
            .get(index / PAIRS_PER_FRAME)
            .map(|frame| frame.pair(index % PAIRS_PER_FRAME))
            .unwrap_or([0; PAIR_SIZE])
    }

    /// Leading real commands of `channel`.
    pub fn active_commands(&self, channel: Channel) -> usize {
        count_color_commands(&self.frames, channel)
    }

    pub(crate) fn truncate(&mut self, count: usize) {
        self.frames.truncate(count);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.frames.iter().flat_map(|frame| frame.0).collect()
    }
}

/// Count the leading, contiguous, tagged commands of `channel`.
///
/// Scanning stops at the first slot whose tag is not [`RGB_TAG`], so
/// zeroed padding after the animation is never counted.
pub fn count_color_commands(frames: &[Frame], channel: Channel) -> usize {
    frames
        .iter()
        .flat_map(|frame| (0..PAIRS_PER_FRAME).map(move |slot| frame.command(slot, channel)))
        .take_while(ColorCommand::is_color)
        .count()
}
