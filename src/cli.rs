//! Command-line arguments.  Values given here override the config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::GameConfig;

#[derive(Parser, Debug, Default)]
#[command(name = "meteor_shooter", about = "Dodge and shoot falling meteors")]
pub struct CliArgs {
    /// TOML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fixed RNG seed for reproducible star fields and spawns.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable all audio cues.
    #[arg(long)]
    pub mute: bool,

    /// Frame cap; 0 for uncapped.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl GameConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if args.mute {
            self.audio.enabled = false;
        }
        if let Some(fps) = args.fps {
            self.timing.max_fps = fps;
        }
    }
}
