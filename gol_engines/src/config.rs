use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Config {
    /// 0 means "ask the OS".
    default_workers: AtomicUsize,
}

static CONFIG: Config = Config {
    default_workers: AtomicUsize::new(0),
};

pub struct ConfigSnapshot {
    pub default_workers: NonZeroUsize,
}

pub fn get_config() -> ConfigSnapshot {
    let workers = CONFIG.default_workers.load(Ordering::Relaxed);
    ConfigSnapshot {
        default_workers: NonZeroUsize::new(workers).unwrap_or_else(available_workers),
    }
}

/// Worker count used by [`Schedule::default`](crate::Schedule).
///
/// `0` restores the default of one worker per available core.
pub fn set_default_workers(workers: usize) {
    CONFIG.default_workers.store(workers, Ordering::Relaxed);
}

fn available_workers() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}
