//! Data access facade
//!
//! `HeroService` is what an application holds on to: the CRUD calls of
//! `HeroClient` plus a fire-and-forget `search` fed into a query coalescer.

use super::client::HeroClient;
use super::error::UsageError;
use super::messages::MessageLog;
use super::models::{Hero, HeroRef};
use super::query::{QueryCoalescer, ResultStream};
use super::resilience::{CallOutcome, DiagnosticSink, LogDiagnostics};
use super::transport::Transport;
use crate::config::Config;
use std::sync::Arc;
use std::time::Duration;

pub struct HeroService {
    client: HeroClient,
    search: QueryCoalescer,
}

impl HeroService {
    /// Build the service and the stream search results are delivered on
    ///
    /// Must be called from within a tokio runtime: the search pipeline runs
    /// on its own task.
    pub fn new(
        transport: Arc<dyn Transport>,
        messages: MessageLog,
        config: &Config,
    ) -> (Self, ResultStream<Hero>) {
        Self::with_diagnostics(transport, messages, Arc::new(LogDiagnostics), config)
    }

    /// Like `new`, with an explicit diagnostic sink
    pub fn with_diagnostics(
        transport: Arc<dyn Transport>,
        messages: MessageLog,
        diagnostics: Arc<dyn DiagnosticSink>,
        config: &Config,
    ) -> (Self, ResultStream<Hero>) {
        let service_name = config.api.service_name.clone();
        let client = HeroClient::new(transport, messages, diagnostics, service_name);
        Self::from_client(client, config.search.debounce())
    }

    pub fn from_client(client: HeroClient, quiescence: Duration) -> (Self, ResultStream<Hero>) {
        let (search, results) = QueryCoalescer::spawn(Arc::new(client.clone()), quiescence);
        (Self { client, search }, results)
    }

    pub fn client(&self) -> &HeroClient {
        &self.client
    }

    pub fn messages(&self) -> &MessageLog {
        self.client.messages()
    }

    /// Quiet time a search term needs before it is looked up
    pub fn search_window(&self) -> Duration {
        self.search.quiescence()
    }

    pub async fn list(&self) -> CallOutcome<Vec<Hero>> {
        self.client.list().await
    }

    pub async fn get(&self, id: i64) -> CallOutcome<Option<Hero>> {
        self.client.get(id).await
    }

    pub async fn create(&self, hero: &Hero) -> CallOutcome<Hero> {
        self.client.create(hero).await
    }

    pub async fn update(&self, hero: &Hero) -> Result<CallOutcome<()>, UsageError> {
        self.client.update(hero).await
    }

    pub async fn delete(&self, target: impl Into<HeroRef>) -> Result<CallOutcome<()>, UsageError> {
        self.client.delete(target).await
    }

    /// Feed one raw search term (e.g. the current input box contents)
    ///
    /// Results arrive on the stream returned at construction.
    pub fn search(&self, term: impl Into<String>) {
        self.search.submit(term);
    }
}
