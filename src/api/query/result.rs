//! Search result handling
//!
//! Result sets delivered by the query coalescer and the stream they arrive on

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Results for one settled search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet<T> {
    /// Trimmed term that produced these results
    pub term: String,
    pub items: Vec<T>,
}

impl<T> ResultSet<T> {
    pub fn new(term: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            term: term.into(),
            items,
        }
    }

    pub fn empty(term: impl Into<String>) -> Self {
        Self::new(term, Vec::new())
    }

    /// Get number of items returned
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no items were returned
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Receiving end of a coalescer: result sets in delivery order
///
/// Ends (`None`) once the coalescer has shut down.
#[derive(Debug)]
pub struct ResultStream<T> {
    receiver: mpsc::UnboundedReceiver<ResultSet<T>>,
}

impl<T> ResultStream<T> {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<ResultSet<T>>) -> Self {
        Self { receiver }
    }

    /// Wait for the next delivered result set
    pub async fn next(&mut self) -> Option<ResultSet<T>> {
        self.receiver.recv().await
    }

    /// Take a result set if one is already waiting
    pub fn try_next(&mut self) -> Option<ResultSet<T>> {
        self.receiver.try_recv().ok()
    }
}

impl<T> Stream for ResultStream<T> {
    type Item = ResultSet<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
