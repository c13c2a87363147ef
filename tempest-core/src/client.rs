//! The `Tempest` client and the per-resource capabilities it forwards to.

use std::fmt;
use std::sync::Arc;

use crate::auth::AccessToken;
use crate::config::{Settings, load_settings};
use crate::error::Error;
use crate::http::{Call, Request, Response, Transport, TransportWrapper};
use crate::model::{
    BetterForecast, DeviceObservation, StationObservation, StationObservationLatest, StationSet,
    StatsSet, UnitsDefault, UnitsOverrides,
};

mod errors;
mod forecast;
mod observations;
mod pipeline;
mod stations;
mod stats;

pub use forecast::ForecastApi;
pub use observations::{DeviceObservationQuery, ObservationsApi, StationObservationQuery};
pub use stations::StationsApi;
pub use stats::StatsApi;

pub(crate) fn require_positive(name: &str, id: i64) -> Result<i64, Error> {
    if id <= 0 {
        return Err(Error::InvalidArgument(format!(
            "{name} must be a positive integer."
        )));
    }
    Ok(id)
}

/// State shared by every capability of a client.
#[derive(Clone)]
pub(crate) struct ClientCore {
    settings: Arc<Settings>,
    token: Option<Arc<dyn AccessToken>>,
    transport: TransportWrapper,
}

impl ClientCore {
    /// The client's own token, else the one from the settings.
    pub(crate) fn bearer(&self) -> Option<&str> {
        match &self.token {
            Some(token) => Some(token.access_token()),
            None => self.settings.token(),
        }
    }

    pub(crate) fn units_with(&self, overrides: Option<&UnitsOverrides>) -> UnitsDefault {
        match overrides {
            Some(overrides) => overrides.apply(self.settings.units()),
            None => *self.settings.units(),
        }
    }
}

impl fmt::Debug for ClientCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCore")
            .field("settings", &self.settings)
            .field("token", &self.bearer().map(|_| "***"))
            .field("transport", &self.transport)
            .finish()
    }
}

/// Client for the Tempest REST API.
///
/// Every endpoint returns a [`Call`]: `.wait()` it on a blocking client,
/// `.await` it on an async one.
///
/// ```no_run
/// use tempest_core::{Tempest, Token};
///
/// # fn main() -> Result<(), tempest_core::Error> {
/// let client = Tempest::builder().token(Token::new("my-token")).build()?;
/// let set = client.stations().wait()?;
/// for station in set.stations.unwrap_or_default() {
///     println!("{:?} {:?}", station.station_id, station.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Tempest {
    core: ClientCore,
}

impl Tempest {
    /// A blocking client configured from the environment and config file.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    pub fn builder() -> TempestBuilder {
        TempestBuilder::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.core.settings
    }

    pub fn is_async(&self) -> bool {
        self.core.transport.is_async()
    }

    pub fn transport(&self) -> &Transport {
        self.core.transport.transport()
    }

    /// The bearer token requests are sent with, if any.
    pub fn token(&self) -> Option<&str> {
        self.core.bearer()
    }

    /// Replace the token of this client.
    ///
    /// Views created earlier with [`Tempest::token_as`] keep their own token.
    pub fn set_token(&mut self, token: impl AccessToken + 'static) {
        self.core.token = Some(Arc::new(token));
    }

    /// A view of this client that authenticates with `token`.
    ///
    /// The view shares transport and settings; `self` is left untouched, so
    /// the client's own token applies again once the view is dropped.
    pub fn token_as(&self, token: impl AccessToken + 'static) -> Tempest {
        let mut view = self.clone();
        view.set_token(token);
        view
    }

    pub fn stations_api(&self) -> StationsApi<'_> {
        StationsApi::new(&self.core)
    }

    pub fn stats_api(&self) -> StatsApi<'_> {
        StatsApi::new(&self.core)
    }

    pub fn forecast_api(&self) -> ForecastApi<'_> {
        ForecastApi::new(&self.core)
    }

    pub fn observations_api(&self) -> ObservationsApi<'_> {
        ObservationsApi::new(&self.core)
    }

    pub fn stations(&self) -> Call<StationSet> {
        self.stations_api().stations()
    }

    pub fn station(&self, station_id: i64) -> Call<StationSet> {
        self.stations_api().station(station_id)
    }

    pub fn stats(&self, station_id: i64) -> Call<StatsSet> {
        self.stats_api().stats(station_id)
    }

    pub fn better_forecast(
        &self,
        station_id: i64,
        units: Option<UnitsOverrides>,
    ) -> Call<BetterForecast> {
        self.forecast_api().better_forecast(station_id, units)
    }

    pub fn observation_station_latest(&self, station_id: i64) -> Call<StationObservationLatest> {
        self.observations_api()
            .observation_station_latest(station_id)
    }

    pub fn observation_station(
        &self,
        station_id: i64,
        query: StationObservationQuery,
    ) -> Call<StationObservation> {
        self.observations_api()
            .observation_station(station_id, query)
    }

    pub fn observation_device(
        &self,
        device_id: i64,
        query: DeviceObservationQuery,
    ) -> Call<DeviceObservation> {
        self.observations_api()
            .observation_device(device_id, query)
    }

    /// Complete the URL and headers of an arbitrary request and send it.
    ///
    /// The response is returned as is, error statuses included.
    pub fn send(&self, request: Request) -> Call<Response> {
        match self.core.prepare(request) {
            Ok(request) => self.core.dispatch(request),
            Err(e) => Call::failed(e),
        }
    }

    /// Close the transport. Views and clones share it and are closed too.
    pub fn close(&self) -> Call<()> {
        self.core.transport.close()
    }
}

/// Builder for [`Tempest`].
#[derive(Debug, Default)]
pub struct TempestBuilder {
    token: Option<Arc<dyn AccessToken>>,
    transport: Option<Transport>,
    asynchronous: Option<bool>,
    settings: Option<Settings>,
}

impl TempestBuilder {
    /// Token to use instead of the one from the settings.
    pub fn token(mut self, token: impl AccessToken + 'static) -> Self {
        self.token = Some(Arc::new(token));
        self
    }

    pub fn transport(mut self, transport: Transport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Ask for a blocking or an async transport.
    ///
    /// If a transport of the other kind was given it is replaced, with a warning.
    pub fn asynchronous(mut self, asynchronous: bool) -> Self {
        self.asynchronous = Some(asynchronous);
        self
    }

    /// Settings to use instead of the process-wide ones.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn build(self) -> Result<Tempest, Error> {
        let settings = match self.settings {
            Some(settings) => Arc::new(settings),
            None => load_settings()?,
        };
        let transport = TransportWrapper::new(self.transport, self.asynchronous)?;

        Ok(Tempest {
            core: ClientCore {
                settings,
                token: self.token,
                transport,
            },
        })
    }
}
