use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

use output::Output;
use quadcast_rgb::config::{Config, SchemeConfig};
use quadcast_rgb::protocol::Transmission;
use quadcast_rgb::{build_frames, build_frames_with_rng, Channel, Mode};

#[derive(Parser)]
#[command(name = "quadcast_rgb")]
#[command(about = "Build RGB light packets for HyperX QuadCast S / DuoCast\n\nModes: solid, blink, cycle, wave, lightning, pulse. Colors are hex numbers.", long_about = None)]
struct Cli {
    /// Mode for both diode groups
    mode: Option<Mode>,

    /// Colors for the mode, RRGGBB or #RRGGBB
    colors: Vec<String>,

    /// Path to configuration file (JSON)
    #[arg(short, long, conflicts_with_all = ["mode", "colors", "brightness", "speed", "delay", "upper", "lower"])]
    config: Option<PathBuf>,

    /// Mode and colors for the upper diode only: MODE [COLORS]...
    #[arg(short, long, num_args = 1.., value_name = "MODE")]
    upper: Option<Vec<String>>,

    /// Mode and colors for the lower diodes only: MODE [COLORS]...
    #[arg(short, long, num_args = 1.., value_name = "MODE")]
    lower: Option<Vec<String>>,

    /// Brightness 0-100
    #[arg(short, long)]
    brightness: Option<u32>,

    /// Speed 0-100
    #[arg(short, long)]
    speed: Option<u32>,

    /// Delay between blinks 0-100
    #[arg(short, long)]
    delay: Option<u32>,

    /// Seed for random colors
    #[arg(long)]
    seed: Option<u64>,

    /// Write raw packets to this file instead of a hex dump on stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Enable detailed debug (hex dumps of every packet)
    #[arg(long)]
    ddebug: bool,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        if let Some(path) = &self.config {
            let config_data = fs::read_to_string(path)
                .context(format!("Failed to read config {}", path.display()))?;
            let config: Config = serde_json::from_str(&config_data)
                .context(format!("Failed to parse config {}", path.display()))?;
            return Ok(config);
        }

        let all = self.mode.map(|mode| self.scheme_config(mode, self.colors.clone()));
        let upper = self.upper.as_deref().map(|group| self.group_config(group)).transpose()?;
        let lower = self.lower.as_deref().map(|group| self.group_config(group)).transpose()?;
        Ok(Config { all, upper, lower })
    }

    /// `-b/-s/-d` apply to every group given on the command line
    fn scheme_config(&self, mode: Mode, colors: Vec<String>) -> SchemeConfig {
        SchemeConfig {
            mode,
            colors,
            brightness: self.brightness,
            speed: self.speed,
            delay: self.delay,
        }
    }

    /// Parse an `--upper`/`--lower` group: a mode followed by its colors
    fn group_config(&self, group: &[String]) -> Result<SchemeConfig> {
        let (mode, colors) = group.split_first().context("No mode given for diode group")?;
        let mode: Mode = mode.parse()?;
        Ok(self.scheme_config(mode, colors.to_vec()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ddebug implies debug
    let level = if cli.ddebug {
        "trace"
    } else if cli.debug {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let schemes = cli.load_config()?.to_schemes()?;
    info!("Arguments parsed successfully");

    let frames = match cli.seed {
        Some(seed) => build_frames_with_rng(&schemes, &mut StdRng::seed_from_u64(seed))?,
        None => build_frames(&schemes)?,
    };
    info!(
        frames = frames.frame_count(),
        pairs = frames.active_commands(Channel::Upper),
        "Assembled data packets"
    );

    let transmission = Transmission::plan(&frames);

    let mut output = match &cli.output {
        Some(path) => Output::create(path)?,
        None => Output::stdout(),
    };
    output.send_transmission(&transmission)?;
    info!(packets = output.packets_written(), "Done");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_mode_and_colors() {
        let cli = Cli::try_parse_from(["quadcast_rgb", "-b", "50", "cycle", "ff0000", "#00ff00"]).unwrap();
        let schemes = cli.load_config().unwrap().to_schemes().unwrap();
        assert_eq!(schemes.upper, schemes.lower);
        assert_eq!(schemes.upper.mode, Mode::Cycle);
        assert_eq!(schemes.upper.colors.len(), 2);
        assert_eq!(schemes.upper.brightness, 50);
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["quadcast_rgb", "strobe"]).is_err());
    }

    #[test]
    fn test_cli_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lights.json");
        fs::write(&path, r#"{ "upper": { "mode": "lightning", "speed": 30 } }"#).unwrap();

        let cli = Cli::try_parse_from(["quadcast_rgb", "--config", path.to_str().unwrap()]).unwrap();
        let schemes = cli.load_config().unwrap().to_schemes().unwrap();
        assert_eq!(schemes.upper.mode, Mode::Lightning);
        assert_eq!(schemes.lower.mode, Mode::Solid);
    }

    #[test]
    fn test_cli_config_conflicts_with_scheme_flags() {
        assert!(Cli::try_parse_from(["quadcast_rgb", "--config", "lights.json", "-b", "40"]).is_err());
        assert!(Cli::try_parse_from(["quadcast_rgb", "--config", "lights.json", "solid", "ff0000"]).is_err());
        assert!(Cli::try_parse_from(["quadcast_rgb", "--config", "lights.json", "--upper", "wave"]).is_err());
        assert!(Cli::try_parse_from(["quadcast_rgb", "--config", "lights.json", "--seed", "3"]).is_ok());
    }

    #[test]
    fn test_cli_channel_groups() {
        let cli = Cli::try_parse_from([
            "quadcast_rgb", "-s", "90", "--upper", "blink", "ffffff", "#0000ff", "--lower", "pulse",
        ])
        .unwrap();
        let schemes = cli.load_config().unwrap().to_schemes().unwrap();
        assert_eq!(schemes.upper.mode, Mode::Blink);
        assert_eq!(schemes.upper.colors.len(), 2);
        assert_eq!(schemes.upper.speed, 90);
        assert_eq!(schemes.lower.mode, Mode::Pulse);
        assert!(schemes.lower.colors.is_empty());
        assert_eq!(schemes.lower.speed, 90);
    }

    #[test]
    fn test_cli_group_overrides_all() {
        let cli = Cli::try_parse_from(["quadcast_rgb", "cycle", "--lower", "solid", "00ff00"]).unwrap();
        let schemes = cli.load_config().unwrap().to_schemes().unwrap();
        assert_eq!(schemes.upper.mode, Mode::Cycle);
        assert_eq!(schemes.lower.mode, Mode::Solid);
    }

    #[test]
    fn test_cli_single_group_turns_other_off() {
        let cli = Cli::try_parse_from(["quadcast_rgb", "-u", "wave"]).unwrap();
        let schemes = cli.load_config().unwrap().to_schemes().unwrap();
        assert_eq!(schemes.upper.mode, Mode::Wave);
        assert_eq!(schemes.lower.mode, Mode::Solid);
    }

    #[test]
    fn test_cli_group_with_unknown_mode_fails() {
        let cli = Cli::try_parse_from(["quadcast_rgb", "--upper", "strobe"]).unwrap();
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_cli_without_mode_fails() {
        let cli = Cli::try_parse_from(["quadcast_rgb"]).unwrap();
        assert!(cli.load_config().unwrap().to_schemes().is_err());
    }
}
