//! Single-threaded UI task queue
//!
//! Commands that must run on the UI thread are posted through a cloneable,
//! `Send` [`UiPoster`] and return immediately. The UI loop owns the
//! [`UiTaskQueue`] and drains it with [`UiTaskQueue::take_pending`]. An
//! optional waker lets the poster nudge the UI loop (e.g. `runOnUiThread`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Cross-thread handle for posting tasks to the UI thread
pub struct UiPoster<T> {
    tasks: Arc<Mutex<VecDeque<T>>>,
    waker: Option<Waker>,
}

impl<T> Clone for UiPoster<T> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            waker: self.waker.clone(),
        }
    }
}

impl<T> UiPoster<T> {
    /// Enqueue a task; never blocks on the UI thread
    pub fn post(&self, task: T) {
        lock(&self.tasks).push_back(task);
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}

/// UI-thread side of the queue
pub struct UiTaskQueue<T> {
    tasks: Arc<Mutex<VecDeque<T>>>,
    waker: Option<Waker>,
}

impl<T> Default for UiTaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UiTaskQueue<T> {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(VecDeque::new())),
            waker: None,
        }
    }

    /// Set the function posters call after enqueueing
    ///
    /// Only posters created afterwards pick up the waker.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    /// Create a poster for other threads
    pub fn poster(&self) -> UiPoster<T> {
        UiPoster {
            tasks: Arc::clone(&self.tasks),
            waker: self.waker.clone(),
        }
    }

    /// Take every queued task, in posting order
    ///
    /// The lock is released before the caller runs the tasks, so a task may
    /// post follow-up work without deadlocking.
    pub fn take_pending(&self) -> Vec<T> {
        lock(&self.tasks).drain(..).collect()
    }

    /// Number of queued tasks
    pub fn len(&self) -> usize {
        lock(&self.tasks).len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<T>(tasks: &Mutex<VecDeque<T>>) -> MutexGuard<'_, VecDeque<T>> {
    // A panicking poster cannot leave the deque half-updated
    tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
