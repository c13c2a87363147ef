use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::call::Call;
use super::request::{Request, Response, parse_content};
use super::USER_AGENT;
use crate::error::Error;

/// Sends one fully formed request and blocks until the response arrives.
pub trait BlockingSend: Send + Sync + fmt::Debug {
    fn send(&self, request: Request) -> Result<Response, Error>;

    /// Release connection resources. Sending afterwards is an error.
    fn close(&self) {}
}

/// Sends one fully formed request without blocking the calling task.
#[async_trait]
pub trait AsyncSend: Send + Sync + fmt::Debug {
    async fn send(&self, request: Request) -> Result<Response, Error>;

    /// Release connection resources. Sending afterwards is an error.
    async fn close(&self) {}
}

/// A blocking or async transport behind one interface.
///
/// Higher layers only ever call [`Transport::send`] and [`Transport::close`],
/// which return a [`Call`] that is ready for the blocking variant and pending
/// for the async one.
#[derive(Debug, Clone)]
pub enum Transport {
    Sync(Arc<dyn BlockingSend>),
    Async(Arc<dyn AsyncSend>),
}

impl Transport {
    /// A [`SyncTransport`] backed by reqwest's blocking client.
    pub fn sync() -> Result<Self, Error> {
        Ok(Transport::Sync(Arc::new(SyncTransport::new()?)))
    }

    /// An [`AsyncTransport`] backed by reqwest's async client.
    pub fn asynchronous() -> Result<Self, Error> {
        Ok(Transport::Async(Arc::new(AsyncTransport::new()?)))
    }

    pub(crate) fn of_kind(is_async: bool) -> Result<Self, Error> {
        if is_async {
            Self::asynchronous()
        } else {
            Self::sync()
        }
    }

    pub fn from_blocking(transport: impl BlockingSend + 'static) -> Self {
        Transport::Sync(Arc::new(transport))
    }

    pub fn from_async(transport: impl AsyncSend + 'static) -> Self {
        Transport::Async(Arc::new(transport))
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Transport::Async(_))
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        if self.is_async() {
            "AsyncTransport"
        } else {
            "SyncTransport"
        }
    }

    pub fn send(&self, request: Request) -> Call<Response> {
        match self {
            Transport::Sync(transport) => Call::Ready(transport.send(request)),
            Transport::Async(transport) => {
                let transport = Arc::clone(transport);
                Call::Pending(Box::pin(async move { transport.send(request).await }))
            }
        }
    }

    pub fn close(&self) -> Call<()> {
        match self {
            Transport::Sync(transport) => {
                transport.close();
                Call::Ready(Ok(()))
            }
            Transport::Async(transport) => {
                let transport = Arc::clone(transport);
                Call::Pending(Box::pin(async move {
                    transport.close().await;
                    Ok(())
                }))
            }
        }
    }
}

/// Blocking transport over `reqwest::blocking::Client`.
///
/// Must not be created or closed from inside an async runtime.
#[derive(Debug)]
pub struct SyncTransport {
    http: Mutex<Option<reqwest::blocking::Client>>,
}

impl SyncTransport {
    pub fn new() -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::ClientBuild)?;
        Ok(Self::with_client(http))
    }

    pub fn with_client(http: reqwest::blocking::Client) -> Self {
        Self {
            http: Mutex::new(Some(http)),
        }
    }

    fn client(&self) -> Result<reqwest::blocking::Client, Error> {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::TransportClosed)
    }
}

impl BlockingSend for SyncTransport {
    fn send(&self, request: Request) -> Result<Response, Error> {
        let http = self.client()?;

        let mut builder = http
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(params) = &request.params {
            builder = builder.query(params);
        }
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        let network = |source| Error::Network {
            url: request.url.clone(),
            source,
        };
        let res = builder.send().map_err(network)?;

        let status = res.status();
        let url = res.url().to_string();
        let headers = res.headers().clone();
        let body = res.bytes().map_err(network)?;

        Ok(Response {
            status,
            url,
            content: parse_content(&body),
            headers,
        })
    }

    fn close(&self) {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

/// Async transport over `reqwest::Client`.
#[derive(Debug)]
pub struct AsyncTransport {
    http: Mutex<Option<reqwest::Client>>,
}

impl AsyncTransport {
    pub fn new() -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::ClientBuild)?;
        Ok(Self::with_client(http))
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http: Mutex::new(Some(http)),
        }
    }

    fn client(&self) -> Result<reqwest::Client, Error> {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::TransportClosed)
    }
}

#[async_trait]
impl AsyncSend for AsyncTransport {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        let http = self.client()?;

        let mut builder = http
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(params) = &request.params {
            builder = builder.query(params);
        }
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        let network = |source| Error::Network {
            url: request.url.clone(),
            source,
        };
        let res = builder.send().await.map_err(network)?;

        let status = res.status();
        let url = res.url().to_string();
        let headers = res.headers().clone();
        let body = res.bytes().await.map_err(network)?;

        Ok(Response {
            status,
            url,
            content: parse_content(&body),
            headers,
        })
    }

    async fn close(&self) {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAsync, MockBlocking};
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn blocking_send_is_ready() {
        let mock = MockBlocking::new(StatusCode::OK, json!({"ok": true}));
        let transport = Transport::from_blocking(mock.clone());
        assert!(!transport.is_async());

        let call = transport.send(Request::get("https://example.test/x"));
        assert!(!call.is_pending());
        let response = call.wait().unwrap();
        assert_eq!(response.content, Some(json!({"ok": true})));
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn async_send_is_pending_until_awaited() {
        let mock = MockAsync::new(StatusCode::OK, json!({"ok": true}));
        let transport = Transport::from_async(mock.clone());
        assert!(transport.is_async());

        let call = transport.send(Request::get("https://example.test/x"));
        assert!(call.is_pending());
        assert!(mock.requests().is_empty(), "nothing is sent before polling");

        let response = call.await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(mock.requests().len(), 1);
    }

    #[test]
    fn closed_sync_transport_refuses_to_send() {
        let transport = SyncTransport::new().unwrap();
        transport.close();
        let err = transport
            .send(Request::get("https://example.test/x"))
            .unwrap_err();
        assert!(matches!(err, Error::TransportClosed));
    }

    #[tokio::test]
    async fn closed_async_transport_refuses_to_send() {
        let transport = AsyncTransport::new().unwrap();
        transport.close().await;
        let err = transport
            .send(Request::get("https://example.test/x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TransportClosed));
    }

    #[tokio::test]
    async fn closing_goes_through_the_mock() {
        let mock = MockAsync::new(StatusCode::OK, json!({}));
        let transport = Transport::from_async(mock.clone());
        let call = transport.close();
        assert!(call.is_pending());
        call.await.unwrap();
        assert!(mock.is_closed());
    }
}
