//! Response records and the vocabularies they use.
//!
//! Every record is strict about types but lenient about shape: absent fields
//! are `None`, enum fields accept values or member names in any case, and
//! keys a record does not know are dropped with a warning.

pub(crate) mod enums;
mod serializer;

mod arrays;
mod device;
mod forecast;
mod observation;
mod station;
mod stats;
mod status;
mod units;

pub use arrays::{ArrayRecord, LightningEvent, RapidWind};
pub use device::{Device, DeviceMeta, DeviceSettings, DeviceType};
pub use enums::{ApiEnum, EnumArg, EnumLiteral, EnumValue, validate_enum_param};
pub use forecast::{
    BetterForecast, BetterForecastCurrentConditions, BetterForecastDailyForecast,
    BetterForecastForecast, BetterForecastHourlyForecast, BetterForecastUnits,
};
pub use observation::{
    DeviceObservation, DeviceObservationSummary, Observation, ObservationType,
    StationObservation, StationObservationLatest, StationUnits,
};
pub use serializer::{Discarded, Model, Numeric, StatValue, Table};
pub use station::{
    Station, StationCapabilities, StationCapability, StationItem, StationMeta, StationSet,
};
pub use stats::StatsSet;
pub use status::Status;
pub use units::{
    Bucket, Environment, PrecipType, PressureTrend, UnitsAirDensity, UnitsBrightness,
    UnitsDefault, UnitsDirection, UnitsDistance, UnitsOther, UnitsOverrides, UnitsPrecip,
    UnitsPressure, UnitsSolarRadiation, UnitsTemp, UnitsWind,
};

pub(crate) use serializer::model_instance;
