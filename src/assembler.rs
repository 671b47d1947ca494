//! Frame assembly: both channels into one equal-length frame sequence.

use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::frame::{ColorCommand, FrameSequence, PAIRS_PER_FRAME};
use crate::planner::plan;
use crate::scheme::{Channel, ColorSchemes};
use crate::sequencer::sequence;

/// Build the frames for `schemes`, drawing random colors from the thread-local generator.
pub fn build_frames(schemes: &ColorSchemes) -> Result<FrameSequence> {
    build_frames_with_rng(schemes, &mut rand::thread_rng())
}

/// Build the frames for `schemes` with an explicit random generator.
///
/// Both channels are planned before anything is allocated, so an
/// unsupported mode on either channel yields no output at all.
pub fn build_frames_with_rng<R: Rng + ?Sized>(
    schemes: &ColorSchemes,
    rng: &mut R,
) -> Result<FrameSequence> {
    let upper_plan = plan(&schemes.upper)?;
    let lower_plan = plan(&schemes.lower)?;

    let frame_count = upper_plan.frame_count().max(lower_plan.frame_count());
    let mut frames = FrameSequence::with_frame_count(frame_count);

    for (channel, plan) in [(Channel::Upper, upper_plan), (Channel::Lower, lower_plan)] {
        let scheme = schemes.get(channel);
        let sequence = sequence(scheme, channel, &plan, rng)?;
        debug!(
            ?channel,
            mode = %scheme.mode,
            planned = plan.commands,
            emitted = sequence.len(),
            clipped = sequence.clipped,
            "Sequenced channel"
        );
        for (index, color) in sequence.colors.iter().enumerate() {
            frames.set_command(index, channel, ColorCommand::new(color.scale(scheme.brightness)));
        }
    }

    equalize(&mut frames);
    Ok(frames)
}

/// Repeat the shorter channel's commands until both channels are equally long.
///
/// Run lengths are re-measured from the frames, the planned counts are only
/// a sizing hint. Frames past the common run are dropped.
pub fn equalize(frames: &mut FrameSequence) {
    let upper = frames.active_commands(Channel::Upper);
    let lower = frames.active_commands(Channel::Lower);

    let (short, run, target) = if upper < lower {
        (Channel::Upper, upper, lower)
    } else {
        (Channel::Lower, lower, upper)
    };

    if run > 0 && run < target {
        debug!(?short, from = run, to = target, "Equalizing channel");
        for index in run..target {
            let command = frames.command(index - run, short);
            frames.set_command(index, short, command);
        }
    }

    if target > 0 {
        frames.truncate(target.div_ceil(PAIRS_PER_FRAME));
    }
}
