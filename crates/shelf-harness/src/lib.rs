#![forbid(unsafe_code)]

//! Headless driver for the bookshelf layout engine.
//!
//! [`Harness`] owns a [`FilmCatalog`] and a [`LayoutEngine`] and plays the
//! part of the page: it turns command ids into catalog queries and engine
//! operations, then steps the engine at a fixed frame time until it settles.
//!
//! # Quick Start
//!
//! ```ignore
//! use shelf_harness::Harness;
//!
//! let mut harness = Harness::new(catalog, LayoutConfig::default());
//! harness.dispatch("female")?;
//! harness.run_until_idle()?;
//! println!("{}", harness.render());
//! ```

pub mod cli;
pub mod snapshot;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use shelf_catalog::{CatalogError, Command, FilmCatalog, Winner, resolve_command};
use shelf_layout::{ConfigError, LayoutConfig, LayoutEngine, LayoutOutcome, Transition};
use tracing::{debug, info};

/// 60 Hz.
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

/// Frames after which [`Harness::run_until_idle`] gives up.
pub const MAX_FRAMES: usize = 10_000;

#[derive(Debug)]
pub enum HarnessError {
    UnknownCommand(String),
    Catalog(CatalogError),
    Config(Vec<ConfigError>),
    /// The engine did not settle within [`MAX_FRAMES`].
    Stalled { frames: usize },
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(id) => write!(f, "unknown command id `{id}`"),
            Self::Catalog(err) => write!(f, "catalog: {err}"),
            Self::Config(errors) => {
                f.write_str("invalid layout config:")?;
                for err in errors {
                    write!(f, " {err};")?;
                }
                Ok(())
            }
            Self::Stalled { frames } => write!(f, "layout did not settle after {frames} frames"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CatalogError> for HarnessError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<Vec<ConfigError>> for HarnessError {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self::Config(errors)
    }
}

/// One replayed command.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub command: Command,
    pub transition: Transition,
    /// Frames until the engine was idle again.
    pub frames: usize,
}

#[derive(Debug)]
pub struct Harness {
    catalog: FilmCatalog,
    engine: LayoutEngine,
    frame: Duration,
    outcomes: Rc<RefCell<Vec<LayoutOutcome>>>,
}

impl Harness {
    pub fn new(catalog: FilmCatalog, config: LayoutConfig) -> Self {
        let mut engine = LayoutEngine::new(config, &catalog);
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&outcomes);
        engine.on_post_layout(move |outcome| {
            debug!(kind = ?outcome.kind, groups = outcome.group_keys.len(), "layout settled");
            sink.borrow_mut().push(outcome.clone());
        });
        Self {
            catalog,
            engine,
            frame: DEFAULT_FRAME,
            outcomes,
        }
    }

    /// Step size used by [`Self::run_until_idle`].
    #[must_use]
    pub fn with_frame(mut self, frame: Duration) -> Self {
        if !frame.is_zero() {
            self.frame = frame;
        }
        self
    }

    pub fn catalog(&self) -> &FilmCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut LayoutEngine {
        &mut self.engine
    }

    /// Outcomes passed to the post-layout hook so far.
    pub fn outcomes(&self) -> Vec<LayoutOutcome> {
        self.outcomes.borrow().clone()
    }

    /// Resolve `id` and run it.
    pub fn dispatch(&mut self, id: &str) -> Result<Transition, HarnessError> {
        let command =
            resolve_command(id).ok_or_else(|| HarnessError::UnknownCommand(id.to_string()))?;
        Ok(self.execute(&command))
    }

    /// Query the catalog for `command` and hand the result to the engine.
    ///
    /// The catalog's active filter follows the command even when the engine
    /// rejects the request.
    pub fn execute(&mut self, command: &Command) -> Transition {
        let transition = match command {
            Command::Reset => {
                self.catalog.clear_filter();
                self.engine.reset_layout()
            }
            Command::Filter { category, value } => {
                let partition = self.catalog.filter(category, value);
                self.engine
                    .apply_binary_partition(&partition.matching, &partition.non_matching)
            }
            Command::Group { category } => {
                let groups = self.catalog.group_by_category(category);
                self.engine.apply_group_partition(&groups)
            }
        };
        info!(%command, ?transition, "command dispatched");
        transition
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        self.engine.tick(self.frame);
    }

    /// Step until no transition or resize is running. Returns the number of
    /// frames taken.
    pub fn run_until_idle(&mut self) -> Result<usize, HarnessError> {
        let mut frames = 0;
        while !self.engine.is_idle() || self.engine.is_resizing() {
            if frames >= MAX_FRAMES {
                return Err(HarnessError::Stalled { frames });
            }
            self.step();
            frames += 1;
        }
        Ok(frames)
    }

    /// Dispatch each id and let the engine settle before the next one.
    pub fn replay<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<Step>, HarnessError> {
        let mut steps = Vec::new();
        for id in ids {
            let command =
                resolve_command(id).ok_or_else(|| HarnessError::UnknownCommand(id.to_string()))?;
            let transition = self.execute(&command);
            let frames = self.run_until_idle()?;
            steps.push(Step {
                command,
                transition,
                frames,
            });
        }
        Ok(steps)
    }

    pub fn winner(&self) -> Option<Winner> {
        self.catalog.winner()
    }

    /// Text rendering of the current layout.
    pub fn render(&self) -> String {
        snapshot::render_layout(&self.engine)
    }
}
