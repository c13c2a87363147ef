//! The stages every endpoint call goes through, in order:
//! build, complete URL, authenticate, strip params, dispatch, classify, deserialize.

use std::marker::PhantomData;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use super::ClientCore;
use super::errors::classify;
use crate::config::Settings;
use crate::error::Error;
use crate::http::{Call, Request, Response};
use crate::model::{Model, model_instance};

/// A request together with the record its response converts into.
#[derive(Debug)]
pub(crate) struct Endpoint<M> {
    request: Request,
    model: PhantomData<fn() -> M>,
}

impl<M: Model + Send + 'static> Endpoint<M> {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request: Request::new(method, path),
            model: PhantomData,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn with_params<I, K>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        self.request = self.request.with_params(params);
        self
    }
}

/// Relative URLs are resolved against the configured base URI.
pub(crate) fn complete_url(settings: &Settings, url: &str) -> String {
    if url.starts_with("https") {
        url.to_string()
    } else {
        format!(
            "{}{}",
            settings.api_uri_normalized(),
            url.trim_start_matches('/')
        )
    }
}

/// Add the bearer and content-type headers; headers already on the request win.
pub(crate) fn authenticate(request: &mut Request, token: Option<&str>) -> Result<(), Error> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::InvalidHeader("Authorization"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    headers.extend(std::mem::take(&mut request.headers));
    request.headers = headers;
    Ok(())
}

pub(crate) fn strip_params(request: &mut Request) {
    request.params = request.params.take().filter(|params| !params.is_empty());
}

impl ClientCore {
    pub(crate) fn prepare(&self, mut request: Request) -> Result<Request, Error> {
        request.url = complete_url(&self.settings, &request.url);
        authenticate(&mut request, self.bearer())?;
        strip_params(&mut request);
        Ok(request)
    }

    pub(crate) fn dispatch(&self, request: Request) -> Call<Response> {
        debug!(
            method = %request.method,
            url = %request.url,
            params = ?request.params,
            "sending request"
        );
        self.transport.send(request)
    }

    pub(crate) fn execute<M: Model + Send + 'static>(&self, endpoint: Endpoint<M>) -> Call<M> {
        let request = match self.prepare(endpoint.request) {
            Ok(request) => request,
            Err(e) => return Call::failed(e),
        };
        let sent = request.clone();

        self.dispatch(request)
            .and_then(move |response| classify(sent, response))
            .and_then(|response| model_instance::<M>(response.content))
    }
}
