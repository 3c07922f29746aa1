//! Trailing-edge debouncer for live input.
//!
//! Each [`Debouncer::call`] cancels the pending invocation and schedules a new
//! one `delay` later with the latest arguments. Once the delay has elapsed the
//! action is spawned as its own task, so later calls never cancel an action
//! that has already started.
//!
//! Calls must be made from within a tokio runtime.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::task::JoinHandle;

type Action<A> = Arc<dyn Fn(A) -> BoxFuture<'static, ()> + Send + Sync>;

pub struct Debouncer<A> {
    action: Action<A>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Wrap `action`. Several arguments are passed as a tuple.
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let action: Action<A> = Arc::new(move |args: A| -> BoxFuture<'static, ()> { Box::pin(action(args)) });
        Self { action, delay, pending: Mutex::new(None) }
    }

    /// Schedule the action with `args`, replacing any pending schedule.
    pub fn call(&self, args: A) {
        let action = self.action.clone();
        let delay = self.delay;

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action(args));
        }));
    }

    /// Drop the pending invocation, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().unwrap_or_else(|e| e.into_inner()).take() {
            previous.abort();
        }
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Some(previous) = self.pending.get_mut().unwrap_or_else(|e| e.into_inner()).take() {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn recorder<A: Send + 'static>(delay: Duration) -> (Debouncer<A>, Arc<Mutex<Vec<A>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let debouncer = Debouncer::new(delay, move |args: A| {
            let sink = sink.clone();
            async move { sink.lock().unwrap().push(args) }
        });
        (debouncer, seen)
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_in_window_runs() {
        let (debouncer, seen) = recorder::<String>(Duration::from_millis(500));

        for term in ["cat", "cats", "catsu"] {
            debouncer.call(term.to_string());
            sleep(Duration::from_millis(100)).await;
        }
        assert!(seen.lock().unwrap().is_empty());

        sleep(Duration::from_millis(600)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["catsu".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_call_per_quiescence_window() {
        let (debouncer, seen) = recorder::<&'static str>(Duration::from_millis(500));

        debouncer.call("first");
        sleep(Duration::from_millis(700)).await;
        debouncer.call("second");
        sleep(Duration::from_millis(700)).await;

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_passes_tuple_arguments() {
        let (debouncer, seen) = recorder::<(String, usize)>(Duration::from_millis(50));

        debouncer.call(("dog".into(), 1));
        debouncer.call(("cat".into(), 2));
        sleep(Duration::from_millis(100)).await;

        assert_eq!(*seen.lock().unwrap(), vec![("cat".to_string(), 2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_started_action_is_not_cancelled() {
        let finished = Arc::new(Mutex::new(Vec::new()));
        let sink = finished.clone();
        let debouncer = Debouncer::new(Duration::from_millis(100), move |n: u32| {
            let sink = sink.clone();
            async move {
                sleep(Duration::from_millis(1_000)).await;
                sink.lock().unwrap().push(n);
            }
        });

        debouncer.call(1);
        sleep(Duration::from_millis(200)).await;
        debouncer.call(2);
        sleep(Duration::from_millis(2_000)).await;

        assert_eq!(*finished.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_call() {
        let (debouncer, seen) = recorder::<u32>(Duration::from_millis(100));

        debouncer.call(1);
        debouncer.cancel();
        sleep(Duration::from_millis(500)).await;

        assert!(seen.lock().unwrap().is_empty());
    }
}
