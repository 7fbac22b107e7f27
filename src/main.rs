#![warn(clippy::all)]

mod args;

use anyhow::{Context, Result};
use args::{RunConfig, SeedSource, USAGE};
use gol_engines::{load_seed, set_default_workers, write_generation, GridEngine, Schedule};
use std::io::{BufWriter, Write};
use std::time::Instant;

fn main() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args::wants_help(&args) {
        println!("{USAGE}");
        return Ok(());
    }
    let config = RunConfig::from_args(&args).inspect_err(|_| eprintln!("{USAGE}\n"))?;
    run(&config)
}

fn build_engine(config: &RunConfig) -> Result<GridEngine> {
    if let Some(workers) = config.workers {
        set_default_workers(workers);
    }
    let engine = match &config.source {
        SeedSource::File(path) => {
            let grid = load_seed(path)
                .with_context(|| format!("failed to load seed from {}", path.display()))?;
            GridEngine::new(grid.rows(), grid.cols(), Some(grid))?
        }
        SeedSource::Random {
            rows,
            cols,
            rng_seed,
        } => GridEngine::random(*rows, *cols, *rng_seed)?,
    };
    Ok(if config.sequential {
        engine.with_schedule(Schedule::Sequential)
    } else {
        engine
    })
}

/// Render, then advance, `config.generations` times.
fn run(config: &RunConfig) -> Result<()> {
    let mut engine = build_engine(config)?;

    let timer = Instant::now();
    let mut out = BufWriter::new(std::io::stdout().lock());
    for _ in 0..config.generations {
        write_generation(&mut out, engine.snapshot()).context("failed to write to stdout")?;
        engine
            .advance()
            .with_context(|| format!("generation {} failed", engine.generation() + 1))?;
    }
    out.flush().context("failed to write to stdout")?;

    if !config.quiet {
        eprintln!(
            "Time on {} generations of {}x{} ({:?}): {:?}, final population: {}",
            config.generations,
            engine.rows(),
            engine.cols(),
            engine.schedule(),
            timer.elapsed(),
            engine.population()
        );
    }
    Ok(())
}
