//! Cancellable, last-value-wins debouncing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet window before a scheduled value is emitted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Coalesces a rapidly changing input into a single delayed emission.
///
/// Each [`schedule`](Debouncer::schedule) call cancels any pending emission
/// from a prior call before arming a new timer, so only the last value within
/// a quiet window is ever emitted. [`cancel`](Debouncer::cancel) (or drop)
/// discards a pending timer outright, and [`is_pending`](Debouncer::is_pending)
/// lets a host show a transient indicator while a timer is armed.
///
/// Timers run on the tokio runtime; `schedule` must be called from within one.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    inner: Arc<DebouncerInner>,
}

#[derive(Debug)]
struct DebouncerInner {
    /// Bumped on every schedule/cancel; a fired timer emits only if its
    /// generation is still current.
    generation: AtomicU64,
    pending: AtomicBool,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: Arc::new(DebouncerInner {
                generation: AtomicU64::new(0),
                pending: AtomicBool::new(false),
                handle: Mutex::new(None),
            }),
        }
    }

    /// The configured quiet window.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a timer is currently armed.
    pub fn is_pending(&self) -> bool {
        self.inner.pending.load(Ordering::SeqCst)
    }

    /// Arm the timer with a new value, cancelling any pending emission.
    ///
    /// `on_fire` runs on the tokio runtime after the quiet window elapses
    /// without another `schedule` or a `cancel`.
    pub fn schedule<V, F>(&self, value: V, on_fire: F)
    where
        V: Send + 'static,
        F: FnOnce(V) + Send + 'static,
    {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.pending.store(true, Ordering::SeqCst);

        // The window is measured from this call, not from when the spawned
        // task first gets polled.
        let deadline = tokio::time::Instant::now() + self.delay;
        let task_inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // A newer schedule or a cancel superseded this timer.
            if task_inner.generation.load(Ordering::SeqCst) != generation {
                return;
            }
            task_inner.pending.store(false, Ordering::SeqCst);
            on_fire(value);
        });

        if let Ok(mut guard) = self.inner.handle.lock()
            && let Some(previous) = guard.replace(task)
        {
            previous.abort();
        }
    }

    /// Cancel any pending emission.
    pub fn cancel(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.pending.store(false, Ordering::SeqCst);
        if let Ok(mut guard) = self.inner.handle.lock()
            && let Some(task) = guard.take()
        {
            task.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
