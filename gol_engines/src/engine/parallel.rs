use crate::{LifeError, Result};
use std::any::Any;
use std::num::NonZeroUsize;

/// Splits `dst` (row-major, `cols` cells per row) into at most `workers`
/// bands of whole rows and runs `job(first_row, band)` for each band on its
/// own scoped thread.
///
/// Returns after every thread has been joined. A panicking job is reported
/// as [`LifeError::WorkerFailed`]; otherwise the first job error wins.
pub(super) fn for_each_band<F>(
    dst: &mut [bool],
    cols: usize,
    workers: NonZeroUsize,
    job: F,
) -> Result<()>
where
    F: Fn(usize, &mut [bool]) -> Result<()> + Sync,
{
    debug_assert!(cols > 0 && dst.len() % cols == 0);
    let rows = dst.len() / cols;
    let workers = workers.get().min(rows).max(1);
    let band_rows = rows.div_ceil(workers);
    let job = &job;

    std::thread::scope(|s| {
        let handles = dst
            .chunks_mut(band_rows * cols)
            .enumerate()
            .map(|(i, band)| s.spawn(move || job(i * band_rows, band)))
            .collect::<Vec<_>>();

        // every handle must be joined, an unjoined panic would re-panic at scope exit
        let mut result = Ok(());
        for handle in handles {
            let outcome = handle
                .join()
                .unwrap_or_else(|payload| Err(LifeError::WorkerFailed(panic_message(&*payload))));
            if result.is_ok() {
                result = outcome;
            }
        }
        result
    })
}

pub(super) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_owned()
    }
}
