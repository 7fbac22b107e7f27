use anyhow::{anyhow, bail, Context, Result};
use gol_engines::LifeError;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
    conway <SEED_FILE> <GENERATIONS> [OPTIONS]
    conway --random <ROWS>x<COLS> <GENERATIONS> [OPTIONS]

Options:
    --workers <N>       worker threads per generation (default: one per core)
    --sequential        evaluate every generation on the main thread
    --rng-seed <U64>    fixed seed for --random
    --quiet             no summary on stderr
    -h, --help          print this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    File(PathBuf),
    Random {
        rows: usize,
        cols: usize,
        rng_seed: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source: SeedSource,
    pub generations: u64,
    pub workers: Option<usize>,
    pub sequential: bool,
    pub quiet: bool,
}

pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "-h" || a == "--help")
}

impl RunConfig {
    /// Parse command-line arguments (without the program name).
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut positional = Vec::new();
        let mut random = None;
        let mut rng_seed = None;
        let mut workers = None;
        let mut sequential = false;
        let mut quiet = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = || iter.next().ok_or_else(|| anyhow!("missing value for {arg}"));
            match arg.as_str() {
                "--random" => random = Some(parse_dimensions(value()?)?),
                "--rng-seed" => {
                    let v = value()?;
                    let seed = v
                        .parse::<u64>()
                        .with_context(|| format!("bad --rng-seed `{v}`"))?;
                    rng_seed = Some(seed);
                }
                "--workers" => {
                    let v = value()?;
                    let n = v
                        .parse::<usize>()
                        .with_context(|| format!("bad --workers `{v}`"))?;
                    if n == 0 {
                        return Err(invalid("--workers must be positive"));
                    }
                    workers = Some(n);
                }
                "--sequential" => sequential = true,
                "--quiet" => quiet = true,
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                _ => positional.push(arg),
            }
        }

        if sequential && workers.is_some() {
            bail!("--sequential and --workers are mutually exclusive");
        }
        let (source, generations) = match (random, positional.as_slice()) {
            (None, [path, generations]) => {
                (SeedSource::File(PathBuf::from(path.as_str())), *generations)
            }
            (Some((rows, cols)), [generations]) => (
                SeedSource::Random {
                    rows,
                    cols,
                    rng_seed,
                },
                *generations,
            ),
            (None, _) => bail!("expected <SEED_FILE> <GENERATIONS>"),
            (Some(_), _) => bail!("expected <GENERATIONS> after --random <ROWS>x<COLS>"),
        };
        if rng_seed.is_some() && matches!(source, SeedSource::File(_)) {
            bail!("--rng-seed only applies to --random");
        }

        Ok(Self {
            source,
            generations: parse_generations(generations)?,
            workers,
            sequential,
            quiet,
        })
    }
}

fn invalid(msg: impl Into<String>) -> anyhow::Error {
    LifeError::Validation(msg.into()).into()
}

fn parse_generations(s: &str) -> Result<u64> {
    let n = s
        .parse::<i64>()
        .with_context(|| format!("generation count `{s}` is not an integer"))?;
    if n <= 0 {
        return Err(invalid(format!("generation count must be positive, got {n}")));
    }
    Ok(n as u64)
}

/// `ROWSxCOLS`, e.g. `20x40`
fn parse_dimensions(s: &str) -> Result<(usize, usize)> {
    let (rows, cols) = s
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(|| anyhow!("expected <ROWS>x<COLS>, got `{s}`"))?;
    let parse = |v: &str| {
        v.parse::<usize>()
            .with_context(|| format!("bad dimension `{v}` in `{s}`"))
    };
    let (rows, cols) = (parse(rows)?, parse(cols)?);
    if rows == 0 || cols == 0 {
        return Err(invalid(format!("grid dimensions must be positive, got {s}")));
    }
    Ok((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<RunConfig> {
        let args = line.split_whitespace().map(String::from).collect::<Vec<_>>();
        RunConfig::from_args(&args)
    }

    fn is_validation(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<LifeError>(), Some(LifeError::Validation(_)))
    }

    #[test]
    fn seed_file_and_generations() {
        let config = parse("board.txt 10").unwrap();
        assert_eq!(config.source, SeedSource::File("board.txt".into()));
        assert_eq!(config.generations, 10);
        assert_eq!(config.workers, None);
        assert!(!config.sequential && !config.quiet);
    }

    #[test]
    fn random_with_options() {
        let config = parse("--random 20x30 5 --rng-seed 42 --workers 3 --quiet").unwrap();
        assert_eq!(
            config.source,
            SeedSource::Random {
                rows: 20,
                cols: 30,
                rng_seed: Some(42)
            }
        );
        assert_eq!(config.generations, 5);
        assert_eq!(config.workers, Some(3));
        assert!(config.quiet);
    }

    #[test]
    fn non_positive_generations() {
        assert!(is_validation(&parse("board.txt 0").unwrap_err()));
        assert!(is_validation(&parse("board.txt -3").unwrap_err()));
        assert!(parse("board.txt many").is_err());
    }

    #[test]
    fn bad_dimensions_and_workers() {
        assert!(is_validation(&parse("--random 0x5 3").unwrap_err()));
        assert!(parse("--random 5 3").is_err());
        assert!(parse("--random 5xq 3").is_err());
        assert!(is_validation(&parse("board.txt 3 --workers 0").unwrap_err()));
    }

    #[test]
    fn inconsistent_arguments() {
        assert!(parse("").is_err());
        assert!(parse("board.txt").is_err());
        assert!(parse("board.txt 3 extra").is_err());
        assert!(parse("--random 4x4").is_err());
        assert!(parse("board.txt 3 --rng-seed 1").is_err());
        assert!(parse("board.txt 3 --sequential --workers 2").is_err());
        assert!(parse("board.txt 3 --frobnicate").is_err());
        assert!(parse("board.txt 3 --workers").is_err());
    }

    #[test]
    fn help_flag() {
        assert!(wants_help(&["x".into(), "--help".into()]));
        assert!(!wants_help(&["board.txt".into(), "3".into()]));
    }
}
