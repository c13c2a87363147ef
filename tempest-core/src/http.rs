//! HTTP plumbing: request/response values, transports and the call type
//! that lets one endpoint signature serve blocking and async callers.

mod call;
mod request;
mod transport;
mod wrapper;

pub use call::{BoxFuture, Call};
pub use request::{Request, Response};
pub use transport::{AsyncSend, AsyncTransport, BlockingSend, SyncTransport, Transport};
pub use wrapper::TransportWrapper;

/// Sent with every request by the bundled transports.
pub(crate) const USER_AGENT: &str = concat!("tempest-rs/", env!("CARGO_PKG_VERSION"));
