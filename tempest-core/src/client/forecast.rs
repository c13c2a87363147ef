use super::ClientCore;
use super::pipeline::Endpoint;
use crate::http::Call;
use crate::model::{BetterForecast, UnitsOverrides};

#[derive(Debug, Clone, Copy)]
pub struct ForecastApi<'a> {
    core: &'a ClientCore,
}

impl<'a> ForecastApi<'a> {
    pub(crate) fn new(core: &'a ClientCore) -> Self {
        Self { core }
    }

    /// Current conditions plus daily and hourly forecasts for a station.
    ///
    /// Units come from the settings, with `units` applied on top.
    pub fn better_forecast(
        &self,
        station_id: i64,
        units: Option<UnitsOverrides>,
    ) -> Call<BetterForecast> {
        if let Err(e) = super::require_positive("station_id", station_id) {
            return Call::failed(e);
        }

        let units = self.core.units_with(units.as_ref());
        let mut params = vec![("station_id", Some(station_id.to_string()))];
        params.extend(units.query_params());

        self.core
            .execute(Endpoint::get("better_forecast").with_params(params))
    }
}
