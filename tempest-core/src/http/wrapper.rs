use tracing::warn;

use super::call::Call;
use super::request::{Request, Response};
use super::transport::Transport;
use crate::error::Error;

/// Holds the transport a client talks through.
///
/// Everything above this type is written once and works for both
/// blocking and async transports.
#[derive(Debug, Clone)]
pub struct TransportWrapper {
    transport: Transport,
}

impl TransportWrapper {
    /// Resolve the transport to use.
    ///
    /// Without a transport a blocking one is created. When `asynchronous` is
    /// given and disagrees with the transport's kind, a new transport of the
    /// requested kind replaces it; replacing an explicitly supplied transport
    /// this way logs a warning.
    pub fn new(transport: Option<Transport>, asynchronous: Option<bool>) -> Result<Self, Error> {
        let transport = match (transport, asynchronous) {
            (Some(transport), Some(flag)) if transport.is_async() != flag => {
                let replacement = Transport::of_kind(flag)?;
                warn!(
                    target: "tempest_core::transport_conflict",
                    passed = transport.kind_name(),
                    asynchronous = flag,
                    "{} with is_async={} passed but asynchronous={}! A new {} was instantiated.",
                    transport.kind_name(),
                    transport.is_async(),
                    flag,
                    replacement.kind_name(),
                );
                replacement
            }
            (Some(transport), _) => transport,
            (None, flag) => Transport::of_kind(flag.unwrap_or(false))?,
        };

        Ok(Self { transport })
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn is_async(&self) -> bool {
        self.transport.is_async()
    }

    pub fn send(&self, request: Request) -> Call<Response> {
        self.transport.send(request)
    }

    /// Close the underlying transport; await the call for async transports.
    pub fn close(&self) -> Call<()> {
        self.transport.close()
    }
}

impl From<Transport> for TransportWrapper {
    fn from(transport: Transport) -> Self {
        Self { transport }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAsync, MockBlocking, capture_warnings};
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn defaults_to_a_blocking_transport() {
        let wrapper = TransportWrapper::new(None, None).unwrap();
        assert!(!wrapper.is_async());
    }

    #[test]
    fn flag_alone_picks_the_kind() {
        let wrapper = TransportWrapper::new(None, Some(true)).unwrap();
        assert!(wrapper.is_async());
    }

    #[test]
    fn agreeing_flag_keeps_the_given_transport_silently() {
        let mock = MockAsync::new(StatusCode::OK, json!({}));
        let (wrapper, warnings) = capture_warnings(|| {
            TransportWrapper::new(Some(Transport::from_async(mock.clone())), Some(true)).unwrap()
        });
        assert!(wrapper.is_async());
        assert!(warnings.is_empty());
    }

    #[test]
    fn conflicting_flag_replaces_the_transport_with_a_warning() {
        let mock = MockAsync::new(StatusCode::OK, json!({}));
        let (wrapper, warnings) = capture_warnings(|| {
            TransportWrapper::new(Some(Transport::from_async(mock.clone())), Some(false)).unwrap()
        });

        assert!(!wrapper.is_async());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].target, "tempest_core::transport_conflict");
        assert!(warnings[0].message.contains("A new SyncTransport was instantiated"));
    }

    #[test]
    fn blocking_transport_is_replaced_when_async_is_requested() {
        let mock = MockBlocking::new(StatusCode::OK, json!({}));
        let (wrapper, warnings) = capture_warnings(|| {
            TransportWrapper::new(Some(Transport::from_blocking(mock.clone())), Some(true)).unwrap()
        });

        assert!(wrapper.is_async());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn close_is_delegated() {
        let mock = MockBlocking::new(StatusCode::OK, json!({}));
        let wrapper = TransportWrapper::from(Transport::from_blocking(mock.clone()));
        wrapper.close().wait().unwrap();
        assert!(mock.is_closed());
    }
}
