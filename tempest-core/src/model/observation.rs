use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::api_enum;
use super::serializer::{Discarded, Model, Numeric, Table, trimmed, trimmed_list, unix_to_utc};
use super::status::Status;
use super::units::{
    UnitsAirDensity, UnitsBrightness, UnitsDirection, UnitsDistance, UnitsOther, UnitsPrecip,
    UnitsPressure, UnitsSolarRadiation, UnitsTemp, UnitsWind,
};

api_enum! {
    /// Message types a device reports.
    pub enum ObservationType: str {
        ObsSt = "obs_st",
        ObsSky = "obs_sky",
        ObsAir = "obs_air",
        ObsStExt = "obs_st_ext",
        ObsAirExt = "obs_air_ext",
        ObsSkyExt = "obs_sky_ext",
        EvtStrike = "evt_strike",
        RapidWind = "rapid_wind",
    }
}

/// One named observation, as in `observations/station/{id}`.
///
/// Unlike most records, string values here are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: Option<Numeric>,
    pub air_temperature: Option<Numeric>,
    pub barometric_pressure: Option<Numeric>,
    pub station_pressure: Option<Numeric>,
    pub sea_level_pressure: Option<Numeric>,
    pub relative_humidity: Option<Numeric>,
    pub precip: Option<Numeric>,
    pub precip_accum_last_1hr: Option<Numeric>,
    pub precip_accum_local_day: Option<Numeric>,
    pub precip_accum_local_day_final: Option<Numeric>,
    pub precip_accum_local_yesterday: Option<Numeric>,
    pub precip_accum_local_yesterday_final: Option<Numeric>,
    pub precip_minutes_local_day: Option<Numeric>,
    pub precip_minutes_local_yesterday: Option<Numeric>,
    pub precip_minutes_local_yesterday_final: Option<Numeric>,
    pub precip_analysis_type_yesterday: Option<Numeric>,
    pub wind_avg: Option<Numeric>,
    pub wind_direction: Option<Numeric>,
    pub wind_gust: Option<Numeric>,
    pub wind_lull: Option<Numeric>,
    pub solar_radiation: Option<Numeric>,
    pub uv: Option<Numeric>,
    pub brightness: Option<Numeric>,
    pub lightning_strike_last_epoch: Option<Numeric>,
    pub lightning_strike_last_distance: Option<Numeric>,
    pub lightning_strike_count: Option<Numeric>,
    pub lightning_strike_count_last_1hr: Option<Numeric>,
    pub lightning_strike_count_last_3hr: Option<Numeric>,
    pub feels_like: Option<Numeric>,
    pub heat_index: Option<Numeric>,
    pub wind_chill: Option<Numeric>,
    pub dew_point: Option<Numeric>,
    pub wet_bulb_temperature: Option<Numeric>,
    pub wet_bulb_globe_temperature: Option<Numeric>,
    pub delta_t: Option<Numeric>,
    pub air_density: Option<Numeric>,
    pub pressure_trend: Option<String>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<Observation>,
}

impl Observation {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(unix_to_utc)
    }
}

impl Model for Observation {
    const NAME: &'static str = "Observation";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "timestamp",
        "air_temperature",
        "barometric_pressure",
        "station_pressure",
        "sea_level_pressure",
        "relative_humidity",
        "precip",
        "precip_accum_last_1hr",
        "precip_accum_local_day",
        "precip_accum_local_day_final",
        "precip_accum_local_yesterday",
        "precip_accum_local_yesterday_final",
        "precip_minutes_local_day",
        "precip_minutes_local_yesterday",
        "precip_minutes_local_yesterday_final",
        "precip_analysis_type_yesterday",
        "wind_avg",
        "wind_direction",
        "wind_gust",
        "wind_lull",
        "solar_radiation",
        "uv",
        "brightness",
        "lightning_strike_last_epoch",
        "lightning_strike_last_distance",
        "lightning_strike_count",
        "lightning_strike_count_last_1hr",
        "lightning_strike_count_last_3hr",
        "feels_like",
        "heat_index",
        "wind_chill",
        "dew_point",
        "wet_bulb_temperature",
        "wet_bulb_globe_temperature",
        "delta_t",
        "air_density",
        "pressure_trend",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationUnits {
    pub units_temp: Option<UnitsTemp>,
    pub units_wind: Option<UnitsWind>,
    pub units_precip: Option<UnitsPrecip>,
    pub units_pressure: Option<UnitsPressure>,
    pub units_distance: Option<UnitsDistance>,
    pub units_direction: Option<UnitsDirection>,
    pub units_other: Option<UnitsOther>,
    pub units_brightness: Option<UnitsBrightness>,
    pub units_solar_radiation: Option<UnitsSolarRadiation>,
    pub units_air_density: Option<UnitsAirDensity>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<StationUnits>,
}

impl Model for StationUnits {
    const NAME: &'static str = "StationUnits";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "units_temp",
        "units_wind",
        "units_precip",
        "units_pressure",
        "units_distance",
        "units_direction",
        "units_other",
        "units_brightness",
        "units_solar_radiation",
        "units_air_density",
    ];
}

/// Response of `observations/station/{id}`: the latest values per station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationObservationLatest {
    pub station_id: Option<i64>,
    #[serde(default, deserialize_with = "trimmed")]
    pub station_name: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub public_name: Option<String>,
    pub latitude: Option<Numeric>,
    pub longitude: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub timezone: Option<String>,
    pub elevation: Option<Numeric>,
    pub is_public: Option<bool>,
    pub status: Option<Status>,
    pub station_units: Option<StationUnits>,
    #[serde(default, deserialize_with = "trimmed_list")]
    pub outdoor_keys: Option<Vec<String>>,
    pub obs: Option<Vec<Observation>>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<StationObservationLatest>,
}

impl Model for StationObservationLatest {
    const NAME: &'static str = "StationObservationLatest";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "station_id",
        "station_name",
        "public_name",
        "latitude",
        "longitude",
        "timezone",
        "elevation",
        "is_public",
        "status",
        "station_units",
        "outdoor_keys",
        "obs",
    ];
}

/// Response of `observations/stn/{id}`: rows aligned to `ob_fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationObservation {
    pub station_id: Option<i64>,
    #[serde(rename = "type", alias = "type_", default, deserialize_with = "trimmed")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "trimmed_list")]
    pub ob_fields: Option<Vec<String>>,
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "trimmed")]
    pub source: Option<String>,
    pub units: Option<StationUnits>,
    #[serde(default, deserialize_with = "trimmed")]
    pub timezone: Option<String>,
    pub obs: Option<Table>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<StationObservation>,
}

impl Model for StationObservation {
    const NAME: &'static str = "StationObservation";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "station_id",
        "type",
        "type_",
        "ob_fields",
        "status",
        "source",
        "units",
        "timezone",
        "obs",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceObservationSummary {
    #[serde(default, deserialize_with = "trimmed")]
    pub pressure_trend: Option<String>,
    pub strike_count_1h: Option<Numeric>,
    pub strike_count_3h: Option<Numeric>,
    pub precip_total_1h: Option<Numeric>,
    pub strike_last_dist: Option<Numeric>,
    pub strike_last_epoch: Option<Numeric>,
    pub precip_accum_local_yesterday: Option<Numeric>,
    pub precip_accum_local_yesterday_final: Option<Numeric>,
    pub precip_analysis_type_yesterday: Option<Numeric>,
    pub feels_like: Option<Numeric>,
    pub heat_index: Option<Numeric>,
    pub wind_chill: Option<Numeric>,
    pub dew_point: Option<Numeric>,
    pub wet_bulb_temperature: Option<Numeric>,
    pub wet_bulb_globe_temperature: Option<Numeric>,
    pub air_density: Option<Numeric>,
    pub delta_t: Option<Numeric>,
    pub precip_minutes_local_day: Option<Numeric>,
    pub precip_minutes_local_yesterday: Option<Numeric>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<DeviceObservationSummary>,
}

impl Model for DeviceObservationSummary {
    const NAME: &'static str = "DeviceObservationSummary";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "pressure_trend",
        "strike_count_1h",
        "strike_count_3h",
        "precip_total_1h",
        "strike_last_dist",
        "strike_last_epoch",
        "precip_accum_local_yesterday",
        "precip_accum_local_yesterday_final",
        "precip_analysis_type_yesterday",
        "feels_like",
        "heat_index",
        "wind_chill",
        "dew_point",
        "wet_bulb_temperature",
        "wet_bulb_globe_temperature",
        "air_density",
        "delta_t",
        "precip_minutes_local_day",
        "precip_minutes_local_yesterday",
    ];
}

/// Response of `observations/device/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceObservation {
    pub status: Option<Status>,
    pub device_id: Option<i64>,
    #[serde(rename = "type", alias = "type_", default, deserialize_with = "trimmed")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub source: Option<String>,
    pub summary: Option<DeviceObservationSummary>,
    pub bucket_step_minutes: Option<Numeric>,
    pub obs: Option<Table>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<DeviceObservation>,
}

impl DeviceObservation {
    /// The message type, when it is one this crate knows.
    pub fn observation_type(&self) -> Option<ObservationType> {
        self.kind.as_deref().and_then(|kind| kind.parse().ok())
    }
}

impl Model for DeviceObservation {
    const NAME: &'static str = "DeviceObservation";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "status",
        "device_id",
        "type",
        "type_",
        "source",
        "summary",
        "bucket_step_minutes",
        "obs",
    ];
}
