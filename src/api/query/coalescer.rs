//! Query coalescer
//!
//! Turns a rapid stream of raw search terms (one per keystroke) into a much
//! smaller stream of lookups:
//!
//! - **debounce**: a term settles only after the quiescence window passes
//!   without a newer submission; only the last term of a burst settles
//! - **dedup**: a settled term equal (after trimming) to the previously
//!   settled one is dropped
//! - **empty short-circuit**: a blank term yields an empty result set without
//!   touching the backend
//! - **switch-latest**: issuing a lookup supersedes every earlier one. Earlier
//!   lookups are left to finish; their results are discarded on arrival.
//!
//! All of this runs on one driver task. `submit` only enqueues.

use super::result::{ResultSet, ResultStream};
use async_trait::async_trait;
use log::{debug, trace, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{self, Instant};

/// Backend a settled term is looked up against
///
/// Lookups cannot fail from the coalescer's point of view: implementations
/// fold their failures into an (empty) result themselves.
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    type Item: Send + 'static;

    async fn lookup(&self, term: &str) -> Vec<Self::Item>;
}

/// A submitted term stamped with its sequence number
#[derive(Debug)]
struct QueryEvent {
    seq: u64,
    term: String,
    submitted_at: Instant,
}

/// A finished lookup, tagged with the event that issued it
struct Completion<T> {
    seq: u64,
    term: String,
    items: Vec<T>,
}

/// Handle used to feed raw terms into the coalescer
///
/// Dropping the handle stops the driver task; lookups still in flight at
/// that point are aborted and the result stream ends.
#[derive(Debug)]
pub struct QueryCoalescer {
    inbox: mpsc::UnboundedSender<QueryEvent>,
    next_seq: AtomicU64,
    quiescence: Duration,
}

impl QueryCoalescer {
    /// Start a coalescer on the current tokio runtime
    ///
    /// Must be called from within a runtime context.
    pub fn spawn<B: SearchBackend>(
        backend: Arc<B>,
        quiescence: Duration,
    ) -> (Self, ResultStream<B::Item>) {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        let driver = Driver {
            backend,
            quiescence,
            results: results_tx,
            last_term: None,
            latest_issued: None,
        };
        tokio::spawn(driver.run(inbox_rx));

        let coalescer = Self {
            inbox: inbox_tx,
            next_seq: AtomicU64::new(0),
            quiescence,
        };
        (coalescer, ResultStream::new(results_rx))
    }

    /// Submit a raw term; never blocks
    pub fn submit(&self, term: impl Into<String>) {
        let event = QueryEvent {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed) + 1,
            term: term.into(),
            submitted_at: Instant::now(),
        };
        trace!("Query coalescer: submitted #{} {:?}", event.seq, event.term);

        if self.inbox.send(event).is_err() {
            warn!("Query coalescer: driver has stopped, dropping submitted term");
        }
    }

    pub fn quiescence(&self) -> Duration {
        self.quiescence
    }
}

struct Driver<B: SearchBackend> {
    backend: Arc<B>,
    quiescence: Duration,
    results: mpsc::UnboundedSender<ResultSet<B::Item>>,
    /// Trimmed term of the last settled event that was not a duplicate
    last_term: Option<String>,
    /// Sequence number of the last event that produced (or will produce) a result
    latest_issued: Option<u64>,
}

impl<B: SearchBackend> Driver<B> {
    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<QueryEvent>) {
        let mut in_flight: JoinSet<Completion<B::Item>> = JoinSet::new();
        let mut pending: Option<QueryEvent> = None;
        let timer = time::sleep(self.quiescence);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                received = inbox.recv() => match received {
                    Some(event) => {
                        // Each submission restarts the window from its own timestamp
                        timer.as_mut().reset(event.submitted_at + self.quiescence);
                        if let Some(superseded) = pending.replace(event) {
                            trace!(
                                "Query coalescer: #{} superseded while debouncing",
                                superseded.seq
                            );
                        }
                    }
                    None => {
                        debug!("Query coalescer: input closed, stopping");
                        break;
                    }
                },
                () = &mut timer, if pending.is_some() => {
                    if let Some(event) = pending.take() {
                        if !self.settle(event, &mut in_flight) {
                            break;
                        }
                    }
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => match joined {
                    Ok(completion) => {
                        if !self.complete(completion) {
                            break;
                        }
                    }
                    Err(error) => warn!("Query coalescer: lookup task failed: {}", error),
                },
                () = self.results.closed() => {
                    debug!("Query coalescer: result stream dropped, stopping");
                    break;
                }
            }
        }
    }

    /// Handle a settled event. Returns false once nobody is listening.
    fn settle(&mut self, event: QueryEvent, in_flight: &mut JoinSet<Completion<B::Item>>) -> bool {
        let term = event.term.trim().to_string();

        if self.last_term.as_deref() == Some(term.as_str()) {
            debug!("Query coalescer: #{} repeats {:?}, no lookup", event.seq, term);
            return true;
        }
        self.last_term = Some(term.clone());
        self.latest_issued = Some(event.seq);

        if term.is_empty() {
            debug!("Query coalescer: #{} is blank, emitting empty results", event.seq);
            return self.results.send(ResultSet::empty(term)).is_ok();
        }

        debug!("Query coalescer: #{} settled on {:?}, issuing lookup", event.seq, term);
        let backend = Arc::clone(&self.backend);
        let seq = event.seq;
        in_flight.spawn(async move {
            let items = backend.lookup(&term).await;
            Completion { seq, term, items }
        });
        true
    }

    /// Deliver a finished lookup unless a later one superseded it
    fn complete(&mut self, completion: Completion<B::Item>) -> bool {
        if self.latest_issued != Some(completion.seq) {
            debug!(
                "Query coalescer: discarding stale results for #{} {:?}",
                completion.seq, completion.term
            );
            return true;
        }

        trace!(
            "Query coalescer: delivering {} results for {:?}",
            completion.items.len(),
            completion.term
        );
        self.results
            .send(ResultSet::new(completion.term, completion.items))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::Notify;
    use tokio::time::{sleep, timeout};

    const WINDOW: Duration = Duration::from_millis(300);

    /// Records lookups; when gated, each lookup waits until its term is released
    #[derive(Default)]
    struct TestBackend {
        gated: bool,
        calls: Mutex<Vec<String>>,
        gates: Mutex<HashMap<String, Arc<Notify>>>,
    }

    impl TestBackend {
        fn open() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn gated() -> Arc<Self> {
            Arc::new(Self {
                gated: true,
                ..Self::default()
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn gate(&self, term: &str) -> Arc<Notify> {
            self.gates
                .lock()
                .unwrap()
                .entry(term.to_string())
                .or_insert_with(|| Arc::new(Notify::new()))
                .clone()
        }

        fn release(&self, term: &str) {
            self.gate(term).notify_one();
        }
    }

    #[async_trait]
    impl SearchBackend for TestBackend {
        type Item = String;

        async fn lookup(&self, term: &str) -> Vec<String> {
            self.calls.lock().unwrap().push(term.to_string());
            if self.gated {
                self.gate(term).notified().await;
            }
            vec![format!("{}-hit", term)]
        }
    }

    async fn assert_no_delivery(results: &mut ResultStream<String>) {
        let next = timeout(Duration::from_secs(5), results.next()).await;
        assert!(next.is_err(), "unexpected delivery: {:?}", next);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_into_one_lookup_for_last_term() {
        let backend = TestBackend::open();
        let (coalescer, mut results) = QueryCoalescer::spawn(backend.clone(), WINDOW);

        coalescer.submit("b");
        sleep(Duration::from_millis(50)).await;
        coalescer.submit("bo");
        sleep(Duration::from_millis(50)).await;
        coalescer.submit("bob");

        let set = results.next().await.expect("result set");
        assert_eq!(set, ResultSet::new("bob", vec!["bob-hit".to_string()]));
        assert_eq!(backend.calls(), vec!["bob"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shorter_window_settles_each_spaced_term() {
        let backend = TestBackend::open();
        let window = Duration::from_millis(120);
        let (coalescer, mut results) = QueryCoalescer::spawn(backend.clone(), window);
        assert_eq!(coalescer.quiescence(), window);

        coalescer.submit("a");
        sleep(Duration::from_millis(150)).await;
        coalescer.submit("ab");
        sleep(Duration::from_millis(150)).await;
        coalescer.submit("abc");

        for term in ["a", "ab", "abc"] {
            let set = results.next().await.expect("result set");
            assert_eq!(set.term, term);
        }
        assert_eq!(backend.calls(), vec!["a", "ab", "abc"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_restarts_on_each_submission() {
        let backend = TestBackend::open();
        let (coalescer, mut results) = QueryCoalescer::spawn(backend.clone(), WINDOW);

        coalescer.submit("a");
        sleep(Duration::from_millis(250)).await;
        coalescer.submit("ab");
        sleep(Duration::from_millis(250)).await;

        // 500ms since the first submission, but only 250ms of quiet
        assert!(results.try_next().is_none());
        assert!(backend.calls().is_empty());

        let set = results.next().await.expect("result set");
        assert_eq!(set.term, "ab");
        assert_eq!(backend.calls(), vec!["ab"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_term_is_not_looked_up_again() {
        let backend = TestBackend::open();
        let (coalescer, mut results) = QueryCoalescer::spawn(backend.clone(), WINDOW);

        coalescer.submit("x");
        assert_eq!(results.next().await.expect("result set").term, "x");

        coalescer.submit(" x ");
        assert_no_delivery(&mut results).await;
        assert_eq!(backend.calls(), vec!["x"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_term_yields_empty_results_without_lookup() {
        let backend = TestBackend::open();
        let (coalescer, mut results) = QueryCoalescer::spawn(backend.clone(), WINDOW);

        coalescer.submit("   ");
        let set = results.next().await.expect("result set");
        assert!(set.is_empty());
        assert_eq!(set.term, "");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_lookup_wins_and_stale_result_is_dropped() {
        let backend = TestBackend::gated();
        let (coalescer, mut results) = QueryCoalescer::spawn(backend.clone(), WINDOW);

        coalescer.submit("ab");
        sleep(Duration::from_millis(400)).await;
        coalescer.submit("abc");
        sleep(Duration::from_millis(400)).await;
        assert_eq!(backend.calls(), vec!["ab", "abc"]);

        backend.release("abc");
        let set = results.next().await.expect("result set");
        assert_eq!(set.term, "abc");

        backend.release("ab");
        assert_no_delivery(&mut results).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_term_supersedes_lookup_in_flight() {
        let backend = TestBackend::gated();
        let (coalescer, mut results) = QueryCoalescer::spawn(backend.clone(), WINDOW);

        coalescer.submit("ab");
        sleep(Duration::from_millis(400)).await;
        coalescer.submit("");

        let set = results.next().await.expect("result set");
        assert!(set.is_empty());

        backend.release("ab");
        assert_no_delivery(&mut results).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_terms_each_get_results() {
        let backend = TestBackend::open();
        let (coalescer, mut results) = QueryCoalescer::spawn(backend.clone(), WINDOW);

        coalescer.submit("ma");
        assert_eq!(results.next().await.expect("first").term, "ma");
        coalescer.submit("mag");
        assert_eq!(results.next().await.expect("second").term, "mag");
        assert_eq!(backend.calls(), vec!["ma", "mag"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_ends_result_stream() {
        let backend = TestBackend::open();
        let (coalescer, mut results) = QueryCoalescer::spawn(backend, WINDOW);

        drop(coalescer);
        assert!(results.next().await.is_none());
    }
}
