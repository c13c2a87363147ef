//! Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::error::Error;
use crate::http::{AsyncSend, BlockingSend, Request, Response};

#[derive(Debug, Default)]
struct Recorder {
    requests: Mutex<Vec<Request>>,
    closed: AtomicBool,
}

/// Canned reply for every request plus a log of what was sent.
#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    content: Option<Value>,
    recorder: Arc<Recorder>,
}

impl Canned {
    fn new(status: StatusCode, content: Option<Value>) -> Self {
        Self {
            status,
            content,
            recorder: Arc::default(),
        }
    }

    fn reply(&self, request: Request) -> Result<Response, Error> {
        if self.recorder.closed.load(Ordering::SeqCst) {
            return Err(Error::TransportClosed);
        }
        let url = request.url.clone();
        self.recorder.requests.lock().unwrap().push(request);
        Ok(Response::new(self.status, url, self.content.clone()))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockBlocking(Canned);

impl MockBlocking {
    pub(crate) fn new(status: StatusCode, content: Value) -> Self {
        Self(Canned::new(status, Some(content)))
    }

    pub(crate) fn without_content(status: StatusCode) -> Self {
        Self(Canned::new(status, None))
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.0.recorder.requests.lock().unwrap().clone()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.0.recorder.closed.load(Ordering::SeqCst)
    }
}

impl BlockingSend for MockBlocking {
    fn send(&self, request: Request) -> Result<Response, Error> {
        self.0.reply(request)
    }

    fn close(&self) {
        self.0.recorder.closed.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockAsync(Canned);

impl MockAsync {
    pub(crate) fn new(status: StatusCode, content: Value) -> Self {
        Self(Canned::new(status, Some(content)))
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.0.recorder.requests.lock().unwrap().clone()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.0.recorder.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AsyncSend for MockAsync {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        tokio::task::yield_now().await;
        self.0.reply(request)
    }

    async fn close(&self) {
        self.0.recorder.closed.store(true, Ordering::SeqCst);
    }
}

/// A warning event seen while capturing.
#[derive(Debug, Clone)]
pub(crate) struct Warning {
    pub(crate) target: String,
    pub(crate) message: String,
    pub(crate) fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct WarningLayer(Arc<Mutex<Vec<Warning>>>);

#[derive(Default)]
struct FieldVisitor(HashMap<String, String>);

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

impl<S: Subscriber> Layer<S> for WarningLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let message = visitor.0.remove("message").unwrap_or_default();
        self.0.lock().unwrap().push(Warning {
            target: event.metadata().target().to_string(),
            message,
            fields: visitor.0,
        });
    }
}

/// Run `f` with a subscriber that records every warning it emits.
pub(crate) fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<Warning>) {
    let layer = WarningLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    let warnings = layer.0.lock().unwrap().clone();
    (out, warnings)
}
