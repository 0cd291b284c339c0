//! Resilient call wrapper
//!
//! Every remote operation goes through `ResilientCaller::wrap`. Whatever the
//! underlying call does, the caller gets a `CallOutcome` back: failures are
//! reported to the diagnostic channel, summarized in the message log and
//! replaced by the caller's fallback.

use super::diagnostics::{DiagnosticSink, FailureReport};
use super::fallback;
use super::outcome::CallOutcome;
use crate::api::messages::MessageLog;
use futures::FutureExt;
use log::debug;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

/// Attaches logging and the fallback policy to remote calls
#[derive(Clone)]
pub struct ResilientCaller {
    service_name: String,
    messages: MessageLog,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl ResilientCaller {
    pub fn new(
        service_name: impl Into<String>,
        messages: MessageLog,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            messages,
            diagnostics,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// Run `call` once and normalize its result
    ///
    /// `describe` turns a successful value into the log detail; returning
    /// `None` logs `"<operation> succeeded"`. A panic inside the call is
    /// treated like any other failure.
    pub async fn wrap<T, F, Fut, D>(
        &self,
        operation: &str,
        fallback: T,
        describe: D,
        call: F,
    ) -> CallOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
        D: FnOnce(&T) -> Option<String>,
    {
        let started = Instant::now();
        let result = match AssertUnwindSafe(async move { call().await }).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => Err(anyhow::anyhow!(
                "operation panicked: {}",
                panic_message(panic.as_ref())
            )),
        };

        match result {
            Ok(value) => {
                debug!("{} completed in {:?}", operation, started.elapsed());
                let detail = describe(&value).unwrap_or_else(|| format!("{} succeeded", operation));
                self.messages.append(fallback::success_line(&self.service_name, &detail));
                CallOutcome::Success(value)
            }
            Err(error) => {
                debug!("{} failed after {:?}", operation, started.elapsed());
                self.diagnostics
                    .report(&FailureReport::new(&self.service_name, operation, &error));

                let recovery = fallback::recover(&self.service_name, operation, &error, fallback);
                self.messages.append(recovery.log_line.clone());
                recovery.into_outcome()
            }
        }
    }

    /// `wrap` for optional results: a failure yields `None`
    pub async fn wrap_absent<U, F, Fut, D>(
        &self,
        operation: &str,
        describe: D,
        call: F,
    ) -> CallOutcome<Option<U>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<Option<U>>>,
        D: FnOnce(&Option<U>) -> Option<String>,
    {
        self.wrap(operation, None, describe, call).await
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
