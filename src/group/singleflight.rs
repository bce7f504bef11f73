//! Call Coalescing
//!
//! Collapses concurrent loads of the same key into a single execution.

use std::collections::HashMap;
use std::future::Future;

use parking_lot::Mutex;
use tokio::sync::watch;

// == Single Flight ==
/// Tracks in-flight calls by key.
///
/// The first caller for a key runs the load; callers arriving while it runs wait
/// for its result instead of starting their own. The record is dropped as soon as
/// the load finishes, so a later call runs the load again.
#[derive(Debug)]
pub struct SingleFlight<T> {
    calls: Mutex<HashMap<String, watch::Receiver<Option<T>>>>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
        }
    }
}

/// Removes the call record when the owning load finishes or is dropped.
struct CallGuard<'a, T> {
    flight: &'a SingleFlight<T>,
    key: &'a str,
}

impl<T> Drop for CallGuard<'_, T> {
    fn drop(&mut self) {
        self.flight.calls.lock().remove(self.key);
    }
}

impl<T: Clone> SingleFlight<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // == Do ==
    /// Runs `load` for `key` unless a call for the same key is already in flight,
    /// in which case the result of that call is returned instead.
    ///
    /// If the owning call is cancelled before finishing, its waiters start over and
    /// one of them takes ownership.
    pub async fn run<F, Fut>(&self, key: &str, load: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let tx = loop {
            let rx = {
                let mut calls = self.calls.lock();
                match calls.get(key) {
                    Some(rx) => rx.clone(),
                    None => {
                        let (tx, rx) = watch::channel(None);
                        calls.insert(key.to_string(), rx);
                        break tx;
                    }
                }
            };
            if let Some(value) = Self::wait(rx).await {
                return value;
            }
        };

        let _guard = CallGuard { flight: self, key };
        let value = load().await;
        tx.send_replace(Some(value.clone()));
        value
    }

    /// Waits for the owner's result; `None` if the owner went away without one.
    async fn wait(mut rx: watch::Receiver<Option<T>>) -> Option<T> {
        let value = match rx.wait_for(Option::is_some).await {
            Ok(value) => (*value).clone(),
            Err(_) => None,
        };
        value
    }

    /// Number of keys with a call in flight.
    pub fn in_flight(&self) -> usize {
        self.calls.lock().len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_returns_value() {
        let flight = SingleFlight::new();
        let v = flight.run("key", || async { "bar".to_string() }).await;
        assert_eq!(v, "bar");
        assert_eq!(flight.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_run_returns_error() {
        let flight: SingleFlight<Result<u32, String>> = SingleFlight::new();
        let v = flight.run("key", || async { Err("boom".to_string()) }).await;
        assert_eq!(v, Err("boom".to_string()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_run_dedupes_concurrent_calls() {
        let flight = Arc::new(SingleFlight::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = watch::channel(false);

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let flight = flight.clone();
                let calls = calls.clone();
                let mut release = release_rx.clone();
                tokio::spawn(async move {
                    flight
                        .run("key", || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            let _ = release.wait_for(|open| *open).await;
                            42
                        })
                        .await
                })
            })
            .collect();

        // Let every task reach the flight before the owner finishes.
        while flight.in_flight() == 0 {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        release_tx.send_replace(true);

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(flight.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_sequential_calls_rerun() {
        let flight = SingleFlight::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            flight
                .run("key", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                })
                .await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_distinct_keys_run_independently() {
        let flight = SingleFlight::new();
        let (a, b) = tokio::join!(
            flight.run("a", || async { 1 }),
            flight.run("b", || async { 2 }),
        );
        assert_eq!((a, b), (1, 2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancelled_owner_hands_over() {
        let flight = Arc::new(SingleFlight::new());

        let owner = {
            let flight = flight.clone();
            tokio::spawn(async move {
                flight
                    .run("key", || async {
                        tokio::time::sleep(Duration::from_secs(60)).await;
                        0
                    })
                    .await
            })
        };
        while flight.in_flight() == 0 {
            tokio::task::yield_now().await;
        }

        let waiter = {
            let flight = flight.clone();
            tokio::spawn(async move { flight.run("key", || async { 7 }).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        owner.abort();

        let value = tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("waiter hung after owner was cancelled")
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(flight.in_flight(), 0);
    }
}
