//! Capacity planning: how many color commands a channel needs.
//!
//! Every count is bounded by [`MAX_COLOR_PAIRS`]. Schemes that would need
//! more are clipped silently, either by dropping trailing colors (blink,
//! lightning, pulse) or by capping the count (cycle, wave).

use tracing::debug;

use crate::error::{Error, Result};
use crate::frame::{MAX_COLOR_PAIRS, PAIRS_PER_FRAME};
use crate::scheme::{ChannelScheme, Mode};

/// Longest "on" segment of an explicit blink, reached at speed 0.
const MAX_BLINK_ON: usize = 101;

const RAND_COLOR_SEG_MIN: usize = 5;
const RAND_COLOR_SEG_MAX: usize = 51;
const RAND_DELAY_SEG_MIN: usize = 2;
const RAND_DELAY_SEG_MAX: usize = 51;

const MIN_CYCLE_SEG: usize = 12;
const MAX_CYCLE_SEG: usize = 128;

const MIN_LIGHTNING_BLANK: usize = 1;
const MAX_LIGHTNING_BLANK: usize = 9;
const MIN_LIGHTNING_UP: usize = 3;
const MAX_LIGHTNING_UP: usize = 10;
const MIN_LIGHTNING_DOWN: usize = 21;
const MAX_LIGHTNING_DOWN: usize = 131;

/// `min` at speed 100, `max` at speed 0, linear in between.
pub(crate) fn speed_range(min: usize, max: usize, speed: u8) -> usize {
    min + (max - min) * (100 - usize::from(speed.min(100))) / 100
}

/// `min` at delay 0, `max` at delay 100, linear in between.
pub(crate) fn delay_range(min: usize, max: usize, delay: u8) -> usize {
    min + (max - min) * usize::from(delay.min(100)) / 100
}

/// On/off lengths of one blink period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkSegments {
    pub on: usize,
    pub off: usize,
}

impl BlinkSegments {
    pub fn explicit(speed: u8, delay: u8) -> Self {
        BlinkSegments {
            on: MAX_BLINK_ON - usize::from(speed.min(100)),
            off: usize::from(delay),
        }
    }

    pub fn random(speed: u8, delay: u8) -> Self {
        BlinkSegments {
            on: speed_range(RAND_COLOR_SEG_MIN, RAND_COLOR_SEG_MAX, speed),
            off: delay_range(RAND_DELAY_SEG_MIN, RAND_DELAY_SEG_MAX, delay),
        }
    }

    pub fn width(&self) -> usize {
        self.on + self.off
    }
}

/// Gradient length between two neighbouring colors of cycle and wave.
pub fn cycle_segment(speed: u8) -> usize {
    speed_range(MIN_CYCLE_SEG, MAX_CYCLE_SEG, speed)
}

/// Phase lengths of one lightning/pulse flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashPhases {
    pub blank: usize,
    pub up: usize,
    pub down: usize,
}

impl FlashPhases {
    pub fn new(speed: u8) -> Self {
        FlashPhases {
            blank: speed_range(MIN_LIGHTNING_BLANK, MAX_LIGHTNING_BLANK, speed),
            up: speed_range(MIN_LIGHTNING_UP, MAX_LIGHTNING_UP, speed),
            down: speed_range(MIN_LIGHTNING_DOWN, MAX_LIGHTNING_DOWN, speed),
        }
    }

    pub fn width(&self) -> usize {
        self.blank + self.up + self.down
    }
}

/// Result of planning one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    /// Upper bound on the commands the sequencer emits.
    pub commands: usize,
    /// How many leading palette colors survive clipping.
    pub colors: usize,
    /// Whether anything was dropped to fit the budget.
    pub clipped: bool,
}

impl Plan {
    pub fn frame_count(&self) -> usize {
        self.commands.div_ceil(PAIRS_PER_FRAME)
    }
}

/// Plan the command count of a channel.
///
/// Fails only for modes the frame builder does not implement.
pub fn plan(scheme: &ChannelScheme) -> Result<Plan> {
    let palette = scheme.palette();
    let plan = match scheme.mode {
        Mode::Solid => Plan {
            commands: 1,
            colors: palette.len().min(1),
            clipped: false,
        },
        Mode::Blink if palette.is_empty() => Plan {
            commands: MAX_COLOR_PAIRS,
            colors: 0,
            clipped: false,
        },
        Mode::Blink => {
            let width = BlinkSegments::explicit(scheme.speed, scheme.delay).width();
            fit_colors(palette.len(), width)
        }
        Mode::Cycle | Mode::Wave => {
            let needed = cycle_segment(scheme.speed) * palette.len();
            Plan {
                commands: needed.min(MAX_COLOR_PAIRS),
                colors: palette.len(),
                clipped: needed > MAX_COLOR_PAIRS,
            }
        }
        Mode::Lightning | Mode::Pulse => {
            let width = FlashPhases::new(scheme.speed).width();
            fit_colors(palette.len(), width)
        }
        Mode::Visualizer => return Err(Error::UnsupportedMode(scheme.mode)),
    };

    if plan.clipped {
        debug!(
            mode = %scheme.mode,
            colors = plan.colors,
            commands = plan.commands,
            "Scheme exceeds {} color pairs, clipped",
            MAX_COLOR_PAIRS
        );
    }

    Ok(plan)
}

/// Keep whole colors of `width` commands each while they fit the budget.
fn fit_colors(count: usize, width: usize) -> Plan {
    let kept = if width == 0 {
        count
    } else {
        count.min(MAX_COLOR_PAIRS / width)
    };
    Plan {
        commands: kept * width,
        colors: kept,
        clipped: kept < count,
    }
}
