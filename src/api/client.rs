use super::error::{TransportError, UsageError};
use super::messages::MessageLog;
use super::models::{Hero, HeroRef};
use super::operations::Operation;
use super::query::SearchBackend;
use super::resilience::{CallOutcome, DiagnosticSink, ResilientCaller};
use super::transport::{ApiRequest, Transport};
use async_trait::async_trait;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Heroes API client: one wrapped remote call per operation
///
/// No method here returns a transport error. Failures come back as
/// `CallOutcome::Failure` carrying the fallback, after being reported to the
/// diagnostic channel and the message log. Only caller mistakes (a record
/// without an id where one is required) are returned as errors.
#[derive(Clone)]
pub struct HeroClient {
    transport: Arc<dyn Transport>,
    caller: ResilientCaller,
}

impl HeroClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        messages: MessageLog,
        diagnostics: Arc<dyn DiagnosticSink>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            caller: ResilientCaller::new(service_name, messages, diagnostics),
        }
    }

    pub fn messages(&self) -> &MessageLog {
        self.caller.messages()
    }

    /// GET all heroes
    pub async fn list(&self) -> CallOutcome<Vec<Hero>> {
        let operation = Operation::List;
        let request = operation.to_request();

        self.caller
            .wrap(
                &operation.label(),
                Vec::new(),
                |_| Some("fetched heroes".to_string()),
                move || self.fetch(request),
            )
            .await
    }

    /// GET a hero by id; the fallback is `None`
    pub async fn get(&self, id: i64) -> CallOutcome<Option<Hero>> {
        let operation = Operation::Get { id };
        let request = operation.to_request();

        self.caller
            .wrap_absent(
                &operation.label(),
                |_| Some(format!("fetched hero id={}", id)),
                move || async move { self.fetch::<Hero>(request).await.map(Some) },
            )
            .await
    }

    /// POST a new hero; on success the returned hero carries its assigned id
    ///
    /// On failure the fallback is the submitted record, still without an id.
    pub async fn create(&self, hero: &Hero) -> CallOutcome<Hero> {
        let operation = Operation::Create { hero: hero.clone() };
        let request = operation.to_request();

        self.caller
            .wrap(
                &operation.label(),
                hero.clone(),
                |created: &Hero| {
                    let id = created
                        .id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "none".to_string());
                    Some(format!("added hero w/ id={}", id))
                },
                move || self.fetch(request),
            )
            .await
    }

    /// PUT a persisted hero; the id travels in the body
    pub async fn update(&self, hero: &Hero) -> Result<CallOutcome<()>, UsageError> {
        let Some(id) = hero.id else {
            return Err(self.usage_error("updateHero"));
        };
        let operation = Operation::Update { hero: hero.clone() };
        let request = operation.to_request();

        let outcome = self
            .caller
            .wrap(
                &operation.label(),
                (),
                |_| Some(format!("updated Hero id={}", id)),
                move || self.execute(request),
            )
            .await;
        Ok(outcome)
    }

    /// DELETE a hero given its id or the record itself
    pub async fn delete(&self, target: impl Into<HeroRef>) -> Result<CallOutcome<()>, UsageError> {
        let Some(id) = target.into().id() else {
            return Err(self.usage_error("deleteHero"));
        };
        let operation = Operation::Delete { id };
        let request = operation.to_request();

        let outcome = self
            .caller
            .wrap(
                &operation.label(),
                (),
                |_| Some(format!("deleted Hero id={}", id)),
                move || self.execute(request),
            )
            .await;
        Ok(outcome)
    }

    /// GET heroes whose name contains `term`
    ///
    /// A blank term returns no heroes without a request and without logging.
    pub async fn search_heroes(&self, term: &str) -> CallOutcome<Vec<Hero>> {
        let term = term.trim();
        if term.is_empty() {
            return CallOutcome::Success(Vec::new());
        }
        let operation = Operation::Search { term: term.to_string() };
        let request = operation.to_request();

        self.caller
            .wrap(
                &operation.label(),
                Vec::new(),
                |heroes: &Vec<Hero>| {
                    Some(if heroes.is_empty() {
                        format!("no heroes matching \"{}\"", term)
                    } else {
                        format!("found heroes matching \"{}\"", term)
                    })
                },
                move || self.fetch(request),
            )
            .await
    }

    /// Send a request and decode its payload
    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> anyhow::Result<T> {
        let payload = self.transport.send(request).await?;
        decode(payload)
    }

    /// Send a request whose payload is of no interest
    async fn execute(&self, request: ApiRequest) -> anyhow::Result<()> {
        self.transport.send(request).await?;
        Ok(())
    }

    fn usage_error(&self, operation: &'static str) -> UsageError {
        let error = UsageError::MissingId { operation };
        warn!("{}: rejected call: {}", self.caller.service_name(), error);
        error
    }
}

fn decode<T: DeserializeOwned>(payload: Value) -> anyhow::Result<T> {
    serde_json::from_value(payload).map_err(|e| TransportError::Decode(e).into())
}

#[async_trait]
impl SearchBackend for HeroClient {
    type Item = Hero;

    async fn lookup(&self, term: &str) -> Vec<Hero> {
        self.search_heroes(term).await.into_value()
    }
}
