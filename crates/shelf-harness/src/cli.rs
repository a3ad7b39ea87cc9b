#![forbid(unsafe_code)]

//! Command-line argument parsing for the replay binary.
//!
//! Parses args manually. `SHELF_REPLAY_*` environment variables provide
//! defaults that explicit flags override.

use std::fmt;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
shelf-replay: replay bookshelf commands headlessly

USAGE:
    shelf-replay [OPTIONS] <CATALOG.json> [COMMAND_ID...]

COMMAND IDS:
    reset_filters        Restore the canonical layout
    <value>              Binary filter on a category value, e.g. female
    group:<category>     Group by a category, e.g. group:demographics.gender

OPTIONS:
    --config=PATH        Layout config JSON (missing fields keep defaults)
    --frame-ms=N         Frame time in milliseconds (default: 16)
    --every-step         Print the layout after every command
    --json               Print layouts as JSON
    --winner             Print the winner film after replaying
    --list               List every command id and exit
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT:
    SHELF_REPLAY_CONFIG       Default for --config
    SHELF_REPLAY_FRAME_MS     Default for --frame-ms
    RUST_LOG                  Log filter, e.g. shelf_layout=debug";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub catalog: PathBuf,
    pub config: Option<PathBuf>,
    pub frame_ms: u64,
    pub every_step: bool,
    pub json: bool,
    pub winner: bool,
    pub commands: Vec<String>,
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Run(Opts),
    List,
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError(pub String);

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nRun with --help for usage information.", self.0)
    }
}

impl std::error::Error for CliError {}

fn parse_frame_ms(raw: &str) -> Result<u64, CliError> {
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CliError(format!("Invalid --frame-ms value: {raw}"))),
    }
}

/// Parse `args` (without the program name). `env` looks up variables.
pub fn parse_args(
    args: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<CliAction, CliError> {
    let mut config = env("SHELF_REPLAY_CONFIG").map(PathBuf::from);
    let mut frame_ms = 16;
    if let Some(raw) = env("SHELF_REPLAY_FRAME_MS") {
        frame_ms = parse_frame_ms(&raw)?;
    }
    let mut every_step = false;
    let mut json = false;
    let mut winner = false;
    let mut positional = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliAction::Help),
            "--version" | "-V" => return Ok(CliAction::Version),
            "--list" => return Ok(CliAction::List),
            "--every-step" => every_step = true,
            "--json" => json = true,
            "--winner" => winner = true,
            other => {
                if let Some(val) = other.strip_prefix("--config=") {
                    config = Some(PathBuf::from(val));
                } else if let Some(val) = other.strip_prefix("--frame-ms=") {
                    frame_ms = parse_frame_ms(val)?;
                } else if other.starts_with("--") {
                    return Err(CliError(format!("Unknown argument: {other}")));
                } else {
                    positional.push(other.to_string());
                }
            }
        }
    }

    let mut positional = positional.into_iter();
    let catalog = positional
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| CliError("Missing catalog path".into()))?;
    Ok(CliAction::Run(Opts {
        catalog,
        config,
        frame_ms,
        every_step,
        json,
        winner,
        commands: positional.collect(),
    }))
}
