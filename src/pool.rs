//! Fixed-size pool of workers draining one shared queue.
//!
//! The caller's thread is the producer: it pushes every item onto a bounded
//! queue, closes it, and then waits until each worker has drained the queue
//! and exited. Workers pull whatever item is next, so with more than one
//! worker there is no ordering between items. With a single worker, items are
//! processed in submission order.

use crate::error::PoolError;
use crossbeam_channel::{Receiver, SendError};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{Span, error, trace};

/// A fixed set of named worker threads that drain one shared queue per [`run`](Self::run).
pub struct WorkerPool {
    pool: ThreadPool,
    worker_count: usize,
}

impl WorkerPool {
    /// Starts `worker_count` worker threads.
    pub fn new(worker_count: usize) -> Result<Self, PoolError> {
        if worker_count == 0 {
            return Err(PoolError::ZeroWorkers);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|index| format!("thumb-worker-{index}"))
            .build()?;

        Ok(Self { pool, worker_count })
    }

    /// Number of workers started by [`new`](Self::new).
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Feeds `items` to the workers and blocks until all of them have been
    /// handled. Returns how many items were submitted.
    ///
    /// `items` is consumed lazily on the calling thread; a slow iterator (for
    /// example a directory walk) overlaps with processing. When every worker
    /// is busy and the queue is full, the producer waits.
    ///
    /// A panic inside `process` is caught and logged; the worker moves on to
    /// the next item.
    ///
    /// Workers run inside the caller's current span, so their log lines are
    /// attributed to the same context as the producer's.
    pub fn run<T, I, F>(&self, items: I, process: F) -> usize
    where
        T: Send + fmt::Debug,
        I: IntoIterator<Item = T>,
        F: Fn(&T) + Sync,
    {
        let (sender, receiver) = crossbeam_channel::bounded::<T>(self.worker_count);
        let process = &process;
        let span = Span::current();

        self.pool.in_place_scope(move |scope| {
            for worker in 0..self.worker_count {
                let queue = receiver.clone();
                let span = span.clone();
                scope.spawn(move |_| {
                    let _entered = span.enter();
                    drain(worker, &queue, process)
                });
            }
            drop(receiver);

            let mut submitted = 0;
            for item in items {
                // Workers only let go of the queue once it is closed.
                if let Err(SendError(item)) = sender.send(item) {
                    error!(?item, "work queue closed before all items were submitted");
                    break;
                }
                submitted += 1;
            }
            drop(sender);

            submitted
        })
    }
}

fn drain<T, F>(worker: usize, queue: &Receiver<T>, process: &F)
where
    T: fmt::Debug,
    F: Fn(&T),
{
    for item in queue.iter() {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| process(&item))) {
            error!(
                worker,
                ?item,
                "panicked while processing item: {}",
                panic_message(payload.as_ref())
            );
        }
    }
    trace!(worker, "queue closed and drained");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
