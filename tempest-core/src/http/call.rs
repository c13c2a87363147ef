use std::fmt;
use std::pin::Pin;

use crate::error::Error;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// The outcome of an API call.
///
/// A blocking transport produces a `Ready` value straight away; an async
/// transport produces a `Pending` future that performs the exchange when
/// polled. Blocking callers use [`Call::wait`], async callers `.await` it.
///
/// ```no_run
/// # use tempest_core::Tempest;
/// # fn blocking(client: &Tempest) -> Result<(), tempest_core::Error> {
/// let stations = client.stations().wait()?;
/// # Ok(())
/// # }
/// # async fn non_blocking(client: &Tempest) -> Result<(), tempest_core::Error> {
/// let stations = client.stations().await?;
/// # Ok(())
/// # }
/// ```
#[must_use = "a call does nothing until it is waited on or awaited"]
pub enum Call<T> {
    Ready(Result<T, Error>),
    Pending(BoxFuture<Result<T, Error>>),
}

impl<T> Call<T> {
    pub fn failed(error: Error) -> Self {
        Call::Ready(Err(error))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Call::Pending(_))
    }

    /// Take the result of a call made on a blocking transport.
    ///
    /// Returns [`Error::PendingCall`] for calls made on an async transport,
    /// which must be awaited instead.
    pub fn wait(self) -> Result<T, Error> {
        match self {
            Call::Ready(result) => result,
            Call::Pending(_) => Err(Error::PendingCall),
        }
    }
}

impl<T: Send + 'static> Call<T> {
    /// Chain a fallible step after the call resolves, keeping it ready or pending.
    pub fn and_then<U, F>(self, f: F) -> Call<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Result<U, Error> + Send + 'static,
    {
        match self {
            Call::Ready(result) => Call::Ready(result.and_then(f)),
            Call::Pending(fut) => Call::Pending(Box::pin(async move { f(fut.await?) })),
        }
    }
}

impl<T> From<Result<T, Error>> for Call<T> {
    fn from(result: Result<T, Error>) -> Self {
        Call::Ready(result)
    }
}

impl<T: Send + 'static> IntoFuture for Call<T> {
    type Output = Result<T, Error>;
    type IntoFuture = BoxFuture<Result<T, Error>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Call::Ready(result) => Box::pin(std::future::ready(result)),
            Call::Pending(fut) => fut,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Call<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Call::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Call::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
