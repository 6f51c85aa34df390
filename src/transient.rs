// src/transient.rs
//! State with an owned reset timer.
//!
//! A `Transient` wraps a piece of view state that some action flips into a
//! temporary condition (a success banner, a "refreshing" flag) and that has to
//! fall back after a delay. The delayed task only holds a weak reference and
//! is aborted when the owner is dropped or re-arms the timer, so a reset can
//! never reach a view that was unmounted in the meantime.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct Transient<T> {
    state: Arc<Mutex<T>>,
    timer: Option<JoinHandle<()>>,
}

fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Send + 'static> Transient<T> {
    pub fn new(value: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(value)),
            timer: None,
        }
    }

    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&lock(&self.state))
    }

    pub fn update<R>(&self, change: impl FnOnce(&mut T) -> R) -> R {
        change(&mut lock(&self.state))
    }

    /// Arms the reset timer, replacing any timer armed before.
    pub fn schedule<F>(&mut self, after: Duration, reset: F)
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.cancel();

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::warn!("No async runtime available, transient reset not scheduled");
                return;
            }
        };

        let weak: Weak<Mutex<T>> = Arc::downgrade(&self.state);
        self.timer = Some(handle.spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(state) = weak.upgrade() {
                reset(&mut lock(&state));
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
impl<T> Transient<T> {
    fn is_armed(&self) -> bool {
        self.timer.as_ref().map_or(false, |timer| !timer.is_finished())
    }
}

impl<T: Clone + Send + 'static> Transient<T> {
    pub fn get(&self) -> T {
        self.with(T::clone)
    }
}

impl<T: Default + Send + 'static> Default for Transient<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Drop for Transient<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<T: Serialize> Serialize for Transient<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        lock(&self.state).serialize(serializer)
    }
}

impl<T: fmt::Debug> fmt::Debug for Transient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transient")
            .field("state", &*lock(&self.state))
            .field("armed", &self.timer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_millis(20);
    const SETTLE: Duration = Duration::from_millis(80);

    #[actix_rt::test]
    async fn test_reset_runs_after_delay() {
        let mut flag = Transient::new(false);
        flag.update(|f| *f = true);
        flag.schedule(SHORT, |f| *f = false);

        assert!(flag.get());
        assert!(flag.is_armed());

        tokio::time::sleep(SETTLE).await;
        assert!(!flag.get());
        assert!(!flag.is_armed());
    }

    #[actix_rt::test]
    async fn test_rearming_replaces_previous_timer() {
        let mut counter = Transient::new(0u32);
        counter.schedule(SHORT, |c| *c += 1);
        counter.schedule(SHORT, |c| *c += 10);

        tokio::time::sleep(SETTLE).await;
        assert_eq!(counter.get(), 10);
    }

    #[actix_rt::test]
    async fn test_cancel_stops_reset() {
        let mut flag = Transient::new(true);
        flag.schedule(SHORT, |f| *f = false);
        flag.cancel();

        tokio::time::sleep(SETTLE).await;
        assert!(flag.get());
    }

    #[actix_rt::test]
    async fn test_drop_aborts_timer() {
        let observed = Arc::new(Mutex::new(false));
        let witness = observed.clone();

        let mut banner = Transient::new(());
        banner.schedule(SHORT, move |_| *witness.lock().unwrap() = true);
        drop(banner);

        tokio::time::sleep(SETTLE).await;
        assert!(!*observed.lock().unwrap());
    }

    #[test]
    fn test_schedule_without_runtime_is_skipped() {
        let mut flag = Transient::new(true);
        flag.schedule(SHORT, |f| *f = false);
        assert!(!flag.is_armed());
        assert!(flag.get());
    }

    #[test]
    fn test_serializes_inner_value() {
        let value = Transient::new(vec![1, 2]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[1,2]");
    }
}
