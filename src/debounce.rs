//! Trailing-edge debouncing for bursty inputs.
//!
//! A [`Debouncer`] wraps an action so that a burst of calls collapses into a
//! single invocation: each call (re)arms a timer with its value, and only
//! when a full quiet period passes without another call does the action run,
//! with the last value seen. Create the wrapper once and reuse it for the
//! lifetime of the input source; a wrapper rebuilt per event never sees a
//! burst and degenerates into a plain delayed call.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Collapses repeated calls within a quiet period into one trailing call.
///
/// One worker thread waits on a channel; values arriving inside the quiet
/// period replace the pending one and restart the clock. Dropping the
/// debouncer disconnects the channel, which cancels a pending un-fired call
/// and shuts the worker down.
///
/// ```
/// use countries_rs::Debouncer;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// let fired = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&fired);
/// let debouncer = Debouncer::new(Duration::from_millis(100), move |_q: String| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
/// debouncer.call("f".into());
/// debouncer.call("fr".into());
/// debouncer.call("fra".into());
/// std::thread::sleep(Duration::from_millis(400));
/// assert_eq!(fired.load(Ordering::SeqCst), 1);
/// ```
pub struct Debouncer<T> {
    feed: Option<Sender<T>>,
    worker: Option<JoinHandle<()>>,
    delay: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Wrap `action` so it runs `delay` after the last of a burst of calls.
    pub fn new(delay: Duration, mut action: impl FnMut(T) + Send + 'static) -> Self {
        let (feed, pending) = mpsc::channel::<T>();
        let worker = thread::spawn(move || {
            // Outer recv blocks for the first call of a burst; the inner loop
            // then keeps replacing the value until a quiet period elapses.
            while let Ok(mut latest) = pending.recv() {
                loop {
                    match pending.recv_timeout(delay) {
                        Ok(newer) => latest = newer,
                        Err(RecvTimeoutError::Timeout) => {
                            action(latest);
                            break;
                        }
                        // Sender gone mid-burst: the pending call is cancelled.
                        Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
            }
        });
        Self {
            feed: Some(feed),
            worker: Some(worker),
            delay,
        }
    }

    /// Schedule the action with `value`, displacing any pending call.
    pub fn call(&self, value: T) {
        if let Some(feed) = &self.feed {
            let _ = feed.send(value);
        }
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        // Disconnect first so the worker wakes and exits, then join it.
        self.feed.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
