//! Shared test doubles for the integration tests

#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use hero_query::api::{
    ApiRequest, Hero, HeroService, MessageLog, RecordingDiagnostics, ResultStream, Transport,
};
use hero_query::config::Config;
use serde_json::Value;
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&ApiRequest) -> anyhow::Result<Value> + Send + Sync>;

/// Transport that records every request and answers from a closure
pub struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responder: Responder,
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(&ApiRequest) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Always answers with the same payload
    pub fn replying(payload: Value) -> Arc<Self> {
        Self::new(move |_| Ok(payload.clone()))
    }

    /// Always fails with the given message
    pub fn failing(message: &'static str) -> Arc<Self> {
        Self::new(move |_| Err(anyhow!(message)))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }
}

/// A service wired to a mock transport, with its observable side channels
pub struct Harness {
    pub service: HeroService,
    pub results: ResultStream<Hero>,
    pub transport: Arc<MockTransport>,
    pub messages: MessageLog,
    pub diagnostics: Arc<RecordingDiagnostics>,
}

impl Harness {
    pub fn new(transport: Arc<MockTransport>) -> Self {
        Self::with_config(transport, &Config::default())
    }

    pub fn with_config(transport: Arc<MockTransport>, config: &Config) -> Self {
        let messages = MessageLog::new();
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let (service, results) = HeroService::with_diagnostics(
            transport.clone(),
            messages.clone(),
            diagnostics.clone(),
            config,
        );

        Self {
            service,
            results,
            transport,
            messages,
            diagnostics,
        }
    }
}
