use super::ClientCore;
use super::pipeline::Endpoint;
use crate::error::Error;
use crate::http::Call;
use crate::model::{
    Bucket, DeviceObservation, StationObservation, StationObservationLatest, UnitsOverrides,
};

/// Optional filters for [`ObservationsApi::observation_station`].
#[derive(Debug, Clone, Default)]
pub struct StationObservationQuery {
    /// Epoch seconds.
    pub time_start: Option<i64>,
    /// Epoch seconds.
    pub time_end: Option<i64>,
    /// Defaults to the bucket from the settings.
    pub bucket: Option<Bucket>,
    /// Comma separated field names.
    pub obs_fields: Option<String>,
    pub units: Option<UnitsOverrides>,
}

/// Optional filters for [`ObservationsApi::observation_device`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceObservationQuery {
    /// Days back from today.
    pub day_offset: Option<i64>,
    pub time_start: Option<i64>,
    pub time_end: Option<i64>,
}

fn non_negative(name: &str, value: Option<i64>) -> Result<Option<String>, Error> {
    match value {
        Some(v) if v < 0 => Err(Error::InvalidArgument(format!(
            "{name} must be a non-negative integer."
        ))),
        other => Ok(other.map(|v| v.to_string())),
    }
}

fn device_params(
    device_id: i64,
    query: &DeviceObservationQuery,
) -> Result<Vec<(&'static str, Option<String>)>, Error> {
    super::require_positive("device_id", device_id)?;
    Ok(vec![
        ("day_offset", non_negative("day_offset", query.day_offset)?),
        ("time_start", non_negative("time_start", query.time_start)?),
        ("time_end", non_negative("time_end", query.time_end)?),
    ])
}

#[derive(Debug, Clone, Copy)]
pub struct ObservationsApi<'a> {
    core: &'a ClientCore,
}

impl<'a> ObservationsApi<'a> {
    pub(crate) fn new(core: &'a ClientCore) -> Self {
        Self { core }
    }

    /// The most recent observation of a station.
    pub fn observation_station_latest(&self, station_id: i64) -> Call<StationObservationLatest> {
        if let Err(e) = super::require_positive("station_id", station_id) {
            return Call::failed(e);
        }
        self.core
            .execute(Endpoint::get(format!("observations/station/{station_id}")))
    }

    /// Historical observations of a station, as a table of `ob_fields` columns.
    pub fn observation_station(
        &self,
        station_id: i64,
        query: StationObservationQuery,
    ) -> Call<StationObservation> {
        let params = match self.station_params(station_id, &query) {
            Ok(params) => params,
            Err(e) => return Call::failed(e),
        };
        self.core.execute(
            Endpoint::get(format!("observations/stn/{station_id}")).with_params(params),
        )
    }

    fn station_params(
        &self,
        station_id: i64,
        query: &StationObservationQuery,
    ) -> Result<Vec<(&'static str, Option<String>)>, Error> {
        super::require_positive("station_id", station_id)?;
        let units = self.core.units_with(query.units.as_ref());
        let bucket = query.bucket.unwrap_or(units.bucket);

        let mut params = vec![
            ("time_start", non_negative("time_start", query.time_start)?),
            ("time_end", non_negative("time_end", query.time_end)?),
            ("bucket", Some(bucket.to_string())),
            ("obs_fields", query.obs_fields.clone()),
        ];
        params.extend(units.query_params());
        Ok(params)
    }

    /// Observations recorded by a single device.
    pub fn observation_device(
        &self,
        device_id: i64,
        query: DeviceObservationQuery,
    ) -> Call<DeviceObservation> {
        let params = match device_params(device_id, &query) {
            Ok(params) => params,
            Err(e) => return Call::failed(e),
        };
        self.core.execute(
            Endpoint::get(format!("observations/device/{device_id}")).with_params(params),
        )
    }
}
