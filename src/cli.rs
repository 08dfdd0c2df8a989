//! Command line interface for the `framesink` demo binary.
//!
//! The binary splits an input file into frames and reassembles it through a
//! message sink, which makes it easy to observe size-limit behaviour and the
//! diagnostic output.

use std::path::PathBuf;

use clap::Parser;

/// Command line arguments for the `framesink` binary.
#[derive(Debug, Parser)]
#[command(
    name = "framesink",
    version,
    about = "Reassemble a file through a size-limited message sink"
)]
pub struct Cli {
    /// File to frame and reassemble.
    pub input: PathBuf,

    /// Payload bytes per frame.
    #[arg(short, long, default_value_t = 4096)]
    pub frame_size: usize,

    /// Maximum assembled message size; zero or negative disables the limit.
    #[arg(short, long, default_value_t = 65_536, allow_negative_numbers = true)]
    pub max_message_size: i64,

    /// Use the lenient legacy placeholder formatting in diagnostics.
    #[arg(long)]
    pub legacy_format: bool,

    /// Write control characters in diagnostics verbatim.
    #[arg(long)]
    pub no_escape: bool,

    /// Offset east of UTC, in seconds, for diagnostic timestamps.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub utc_offset: i32,

    /// Increase diagnostic verbosity (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
