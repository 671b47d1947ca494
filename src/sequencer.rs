//! Per-mode sequencers.
//!
//! A sequencer turns one channel's scheme into the flat list of colors that
//! channel shows, one entry per color pair. Colors are unscaled; brightness
//! is applied when they are written into frames.

use std::iter;

use rand::Rng;

use crate::color::{gradient, lerp, Rgb};
use crate::error::{Error, Result};
use crate::frame::MAX_COLOR_PAIRS;
use crate::planner::{cycle_segment, BlinkSegments, FlashPhases, Plan};
use crate::scheme::{Channel, ChannelScheme, Mode};

/// Colors emitted for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub colors: Vec<Rgb>,
    /// Set when planning or the pair budget cut the animation short.
    pub clipped: bool,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Generate the colors of `channel` according to its `plan`.
///
/// `rng` is only drawn from by random blink.
pub fn sequence<R: Rng + ?Sized>(
    scheme: &ChannelScheme,
    channel: Channel,
    plan: &Plan,
    rng: &mut R,
) -> Result<Sequence> {
    let palette = scheme.palette();
    let colors = &palette[..plan.colors.min(palette.len())];
    let mut out = Vec::with_capacity(plan.commands);

    match scheme.mode {
        Mode::Solid => out.extend(colors.first().copied()),
        Mode::Blink if palette.is_empty() => {
            random_blink(BlinkSegments::random(scheme.speed, scheme.delay), rng, &mut out)
        }
        Mode::Blink => {
            let segments = BlinkSegments::explicit(scheme.speed, scheme.delay);
            for &color in colors {
                out.extend(iter::repeat(color).take(segments.on));
                out.extend(iter::repeat(Rgb::BLACK).take(segments.off));
            }
        }
        Mode::Cycle => cycle(colors, cycle_segment(scheme.speed), &mut out),
        Mode::Wave => {
            let mut colors = colors.to_vec();
            if channel == Channel::Lower && !colors.is_empty() {
                colors.rotate_left(1);
            }
            cycle(&colors, cycle_segment(scheme.speed), &mut out);
        }
        Mode::Lightning | Mode::Pulse => {
            let phases = FlashPhases::new(scheme.speed);
            let blank_first = scheme.mode == Mode::Lightning && channel == Channel::Lower;
            for &color in colors {
                flash(color, phases, blank_first, &mut out);
            }
        }
        Mode::Visualizer => return Err(Error::UnsupportedMode(scheme.mode)),
    }

    let mut clipped = plan.clipped;
    if out.len() > MAX_COLOR_PAIRS {
        out.truncate(MAX_COLOR_PAIRS);
        clipped = true;
    }

    Ok(Sequence {
        colors: out,
        clipped,
    })
}

/// Random colors separated by black until the whole budget is used.
fn random_blink<R: Rng + ?Sized>(segments: BlinkSegments, rng: &mut R, out: &mut Vec<Rgb>) {
    while out.len() < MAX_COLOR_PAIRS {
        let color = Rgb::random(rng);
        let room = MAX_COLOR_PAIRS - out.len();
        out.extend(iter::repeat(color).take(segments.on.min(room)));
        let room = MAX_COLOR_PAIRS - out.len();
        out.extend(iter::repeat(Rgb::BLACK).take(segments.off.min(room)));
    }
}

/// Closed-loop gradient: every color blends into the next, the last into the first.
fn cycle(colors: &[Rgb], segment: usize, out: &mut Vec<Rgb>) {
    for (i, &start) in colors.iter().enumerate() {
        let end = colors[(i + 1) % colors.len()];
        out.extend(gradient(start, end, segment));
    }
}

fn flash(color: Rgb, phases: FlashPhases, blank_first: bool, out: &mut Vec<Rgb>) {
    let blank = iter::repeat(Rgb::BLACK).take(phases.blank);
    if blank_first {
        out.extend(blank.clone());
    }
    out.extend(gradient(Rgb::BLACK, color, phases.up));
    // Starts one step below the peak so it is not shown twice.
    out.extend((1..=phases.down).map(|step| lerp(color, Rgb::BLACK, step, phases.down + 1)));
    if !blank_first {
        out.extend(blank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WHITE: Rgb = Rgb::from_hex(0xffffff);
    const RED: Rgb = Rgb::from_hex(0xff0000);
    const BLUE: Rgb = Rgb::from_hex(0x0000ff);

    fn run(scheme: &ChannelScheme, channel: Channel) -> Sequence {
        let plan = plan(scheme).unwrap();
        sequence(scheme, channel, &plan, &mut StdRng::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn test_solid() {
        let scheme = ChannelScheme::new(Mode::Solid).with_colors(vec![RED, BLUE]);
        assert_eq!(run(&scheme, Channel::Upper).colors, vec![RED]);
    }

    #[test]
    fn test_blink_explicit() {
        let scheme = ChannelScheme::new(Mode::Blink)
            .with_colors(vec![WHITE])
            .with_speed(81)
            .with_delay(10);
        let seq = run(&scheme, Channel::Upper);
        assert_eq!(seq.len(), 30);
        assert!(seq.colors[..20].iter().all(|&c| c == WHITE));
        assert!(seq.colors[20..].iter().all(|&c| c == Rgb::BLACK));
    }

    #[test]
    fn test_blink_concatenates_colors() {
        let scheme = ChannelScheme::new(Mode::Blink)
            .with_colors(vec![RED, BLUE])
            .with_speed(100)
            .with_delay(2);
        let seq = run(&scheme, Channel::Lower);
        assert_eq!(seq.colors, vec![RED, Rgb::BLACK, Rgb::BLACK, BLUE, Rgb::BLACK, Rgb::BLACK]);
    }

    #[test]
    fn test_random_blink_fills_budget() {
        let scheme = ChannelScheme::new(Mode::Blink).with_speed(100).with_delay(0);
        let seq = run(&scheme, Channel::Upper);
        assert_eq!(seq.len(), MAX_COLOR_PAIRS);

        // 5 on, 2 off
        let first = seq.colors[0];
        assert!(seq.colors[..5].iter().all(|&c| c == first));
        assert_eq!(&seq.colors[5..7], &[Rgb::BLACK, Rgb::BLACK]);

        // Same seed, same colors
        assert_eq!(seq, run(&scheme, Channel::Upper));
    }

    #[test]
    fn test_cycle_segments() {
        let scheme = ChannelScheme::new(Mode::Cycle)
            .with_colors(vec![RED, BLUE])
            .with_speed(81);
        let length = cycle_segment(81);
        let seq = run(&scheme, Channel::Upper);
        assert_eq!(seq.len(), 2 * length);
        assert_eq!(seq.colors[0], RED);
        assert_eq!(seq.colors[length - 1], BLUE);
        assert_eq!(seq.colors[length], BLUE);
        assert_eq!(seq.colors[2 * length - 1], RED);
    }

    #[test]
    fn test_cycle_clipped_to_budget() {
        let colors = (0..10).map(|i| Rgb::from_hex(0x111111 * i)).collect();
        let scheme = ChannelScheme::new(Mode::Cycle).with_colors(colors).with_speed(0);
        let seq = run(&scheme, Channel::Upper);
        assert_eq!(seq.len(), MAX_COLOR_PAIRS);
        assert!(seq.clipped);
    }

    #[test]
    fn test_wave_rotates_lower() {
        let colors = vec![RED, WHITE, BLUE];
        let wave = ChannelScheme::new(Mode::Wave).with_colors(colors.clone());
        let cycle = ChannelScheme::new(Mode::Cycle).with_colors(colors);
        let rotated = ChannelScheme::new(Mode::Cycle).with_colors(vec![WHITE, BLUE, RED]);

        assert_eq!(run(&wave, Channel::Upper), run(&cycle, Channel::Upper));
        assert_eq!(run(&wave, Channel::Lower), run(&rotated, Channel::Lower));
    }

    #[test]
    fn test_lightning_alternates_blank() {
        let scheme = ChannelScheme::new(Mode::Lightning)
            .with_colors(vec![WHITE])
            .with_speed(100);
        let upper = run(&scheme, Channel::Upper).colors;
        let lower = run(&scheme, Channel::Lower).colors;
        // blank 1, up 3, down 21
        assert_eq!(upper.len(), 25);
        assert_eq!(lower.len(), 25);

        assert_eq!(upper[0], Rgb::BLACK);
        assert_eq!(upper[2], WHITE);
        assert!(upper[3].r < 255 && upper[3].r > 200);
        assert_eq!(upper[23], Rgb::BLACK);
        assert_eq!(upper[24], Rgb::BLACK);

        assert_eq!(lower[0], Rgb::BLACK);
        assert_eq!(lower[3], WHITE);
        assert_eq!(&lower[1..], &upper[..24]);
    }

    #[test]
    fn test_pulse_is_synchronized() {
        let scheme = ChannelScheme::new(Mode::Pulse)
            .with_colors(vec![RED, BLUE])
            .with_speed(50);
        assert_eq!(run(&scheme, Channel::Upper), run(&scheme, Channel::Lower));
        let phases = FlashPhases::new(50);
        assert_eq!(run(&scheme, Channel::Upper).len(), 2 * phases.width());
    }

    #[test]
    fn test_visualizer_rejected() {
        let scheme = ChannelScheme::new(Mode::Visualizer);
        let plan = Plan { commands: 1, colors: 0, clipped: false };
        assert_eq!(
            sequence(&scheme, Channel::Upper, &plan, &mut StdRng::seed_from_u64(0)),
            Err(Error::UnsupportedMode(Mode::Visualizer))
        );
    }
}
