#![forbid(unsafe_code)]

//! Replay bookshelf commands against a catalog and print the layouts.
//!
//! # Running
//!
//! ```sh
//! cargo run -p shelf-harness -- films.json female group:demographics.gender reset_filters
//! RUST_LOG=shelf_layout=debug cargo run -p shelf-harness -- films.json female
//! ```

use std::error::Error;
use std::fs;
use std::process;
use std::time::Duration;

use shelf_catalog::{FilmCatalog, command_list};
use shelf_harness::Harness;
use shelf_harness::cli::{self, CliAction, HELP_TEXT, Opts, VERSION};
use shelf_harness::snapshot::{layout_json, render_layout};
use shelf_layout::LayoutConfig;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn load_config(opts: &Opts) -> Result<LayoutConfig, Box<dyn Error>> {
    let Some(path) = &opts.config else {
        let parsed = LayoutConfig::from_env_with_diagnostics();
        for err in &parsed.errors {
            warn!(%err, "ignoring layout config override");
        }
        return Ok(parsed.config);
    };
    let json = fs::read_to_string(path)?;
    LayoutConfig::from_json_str(&json)
        .map_err(|errors| Box::new(shelf_harness::HarnessError::Config(errors)) as Box<dyn Error>)
}

fn print_layout(harness: &Harness, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&layout_json(harness.engine()))?);
    } else {
        print!("{}", render_layout(harness.engine()));
    }
    Ok(())
}

fn run(opts: Opts) -> Result<(), Box<dyn Error>> {
    let config = load_config(&opts)?;
    let catalog = FilmCatalog::from_path(&opts.catalog)?;
    let mut harness =
        Harness::new(catalog, config).with_frame(Duration::from_millis(opts.frame_ms));

    for id in &opts.commands {
        let steps = harness.replay([id.as_str()])?;
        if opts.every_step {
            for step in &steps {
                println!("# {} -> {:?} ({} frames)", step.command, step.transition, step.frames);
            }
            print_layout(&harness, opts.json)?;
        }
    }
    if !opts.every_step {
        print_layout(&harness, opts.json)?;
    }

    if opts.winner {
        match harness.winner() {
            Some(winner) => println!("winner: {} {}", winner.film.name, winner.stats_text()),
            None => println!("winner: none"),
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let action = match cli::parse_args(std::env::args().skip(1), |key| std::env::var(key).ok()) {
        Ok(action) => action,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    match action {
        CliAction::Help => println!("{HELP_TEXT}"),
        CliAction::Version => println!("shelf-replay {VERSION}"),
        CliAction::List => {
            for command in command_list() {
                println!("{command}");
            }
        }
        CliAction::Run(opts) => {
            init_tracing();
            run(opts)?;
        }
    }
    Ok(())
}
