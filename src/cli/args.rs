use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mana-tools")]
#[command(version, about = "Offline maintenance tools for game server data", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Remove accounts created on or before a date, along with their characters
    Purge(PurgeArgs),
    /// Crop a monster sprite sheet and swap its direction and frame axes
    Reorganize(ReorganizeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PurgeArgs {
    /// Folder containing the account and character ledgers
    pub folder: PathBuf,

    /// Accounts created on or before this date are purged (dd/mm/yy)
    pub date: String,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Account ledger file name [default: account.txt]
    #[arg(long, value_name = "NAME")]
    pub account_file: Option<String>,

    /// Character ledger file name [default: athena.txt]
    #[arg(long, value_name = "NAME")]
    pub character_file: Option<String>,

    /// Print the purge summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ReorganizeArgs {
    /// Source sprite sheet
    pub source: PathBuf,

    /// Target PNG file
    pub target: PathBuf,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cell width in pixels [default: 60]
    #[arg(long)]
    pub cell_width: Option<u32>,

    /// Cell height in pixels [default: 60]
    #[arg(long)]
    pub cell_height: Option<u32>,

    /// Number of directions, one source column each [default: 4]
    #[arg(long)]
    pub directions: Option<u32>,

    /// Number of animation frames, one source row each [default: 10]
    #[arg(long)]
    pub frames: Option<u32>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}
