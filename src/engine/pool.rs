//! Bounded-concurrency execution of removal tasks.
//!
//! Dispatch order is fixed by the caller; workers pull indices from a shared
//! cursor so each task runs at most once and no more than the configured
//! number of tasks is ever outstanding. The first failure sets an abort
//! flag: queued work is skipped, in-flight work is joined and its result
//! discarded.

use super::DeleteError;
use camino::{Utf8Path, Utf8PathBuf};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

/// What a completed pool run produced.
pub(crate) struct PoolOutcome {
    /// Results of successfully processed tasks, in completion order.
    pub processed: Vec<Utf8PathBuf>,
    /// Final value of the shared task counter; equals `processed.len()`.
    pub attempted: usize,
}

/// Run `task` over `paths` with at most `limit` workers (`None` = one worker
/// per path). Returns the first task error, if any.
pub(crate) fn run<F>(
    paths: &[Utf8PathBuf],
    limit: Option<NonZeroUsize>,
    task: F,
) -> Result<PoolOutcome, DeleteError>
where
    F: Fn(&Utf8Path) -> Result<Utf8PathBuf, DeleteError> + Sync,
{
    if paths.is_empty() {
        return Ok(PoolOutcome {
            processed: Vec::new(),
            attempted: 0,
        });
    }

    let workers = limit.map_or(paths.len(), |n| n.get().min(paths.len()));
    let shared = Shared {
        cursor: AtomicUsize::new(0),
        counter: AtomicUsize::new(0),
        abort: AtomicBool::new(false),
        processed: Mutex::new(Vec::with_capacity(paths.len())),
        failure: Mutex::new(None),
    };

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| drain_queue(paths, &shared, &task));
        }
    });

    if let Some(error) = lock_ignoring_poison(&shared.failure).take() {
        return Err(error);
    }
    let processed = shared
        .processed
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);
    Ok(PoolOutcome {
        processed,
        attempted: shared.counter.load(Ordering::Acquire),
    })
}

struct Shared {
    cursor: AtomicUsize,
    counter: AtomicUsize,
    abort: AtomicBool,
    processed: Mutex<Vec<Utf8PathBuf>>,
    failure: Mutex<Option<DeleteError>>,
}

fn drain_queue<F>(paths: &[Utf8PathBuf], shared: &Shared, task: &F)
where
    F: Fn(&Utf8Path) -> Result<Utf8PathBuf, DeleteError> + Sync,
{
    while !shared.abort.load(Ordering::Acquire) {
        let index = shared.cursor.fetch_add(1, Ordering::Relaxed);
        let Some(path) = paths.get(index) else {
            break;
        };
        match task(path) {
            Ok(resolved) => {
                shared.counter.fetch_add(1, Ordering::Release);
                lock_ignoring_poison(&shared.processed).push(resolved);
            }
            Err(error) => {
                shared.abort.store(true, Ordering::Release);
                lock_ignoring_poison(&shared.failure).get_or_insert(error);
                break;
            }
        }
    }
}

/// Tasks never panic while holding these locks, but a poisoned mutex would
/// still carry valid data, so recover rather than propagate.
fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
