#![warn(clippy::all, clippy::cargo)]

mod config;
mod engine;
mod error;
mod grid;
mod render;
mod rules;
mod seed;

pub use config::{get_config, set_default_workers, ConfigSnapshot};
pub use engine::{EngineState, GridEngine, Schedule};
pub use error::{LifeError, Result};
pub use grid::Grid;
pub use render::write_generation;
pub use rules::{count_neighbors, next_state};
pub use seed::{load_seed, parse_seed};
