use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serializer::{Discarded, Model, Numeric, trimmed, unix_to_utc};
use super::status::Status;
use super::units::{
    PrecipType, PressureTrend, UnitsAirDensity, UnitsBrightness, UnitsDistance, UnitsOther,
    UnitsPrecip, UnitsPressure, UnitsSolarRadiation, UnitsTemp, UnitsWind,
};

/// Conditions right now at the station.
///
/// `conditions` and `icon` are free text from the forecast service
/// (e.g. `"Clear"`, `"clear-day"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetterForecastCurrentConditions {
    pub time: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub conditions: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub icon: Option<String>,
    pub air_temperature: Option<Numeric>,
    pub sea_level_pressure: Option<Numeric>,
    pub station_pressure: Option<Numeric>,
    pub pressure_trend: Option<PressureTrend>,
    pub relative_humidity: Option<Numeric>,
    pub wind_avg: Option<Numeric>,
    pub wind_direction: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub wind_direction_cardinal: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub wind_direction_icon: Option<String>,
    pub wind_gust: Option<Numeric>,
    pub solar_radiation: Option<Numeric>,
    pub uv: Option<Numeric>,
    pub brightness: Option<Numeric>,
    pub feels_like: Option<Numeric>,
    pub dew_point: Option<Numeric>,
    pub wet_bulb_temperature: Option<Numeric>,
    pub wet_bulb_globe_temperature: Option<Numeric>,
    pub delta_t: Option<Numeric>,
    pub air_density: Option<Numeric>,
    pub lightning_strike_count_last_1hr: Option<Numeric>,
    pub lightning_strike_count_last_3hr: Option<Numeric>,
    pub lightning_strike_last_distance: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub lightning_strike_last_distance_msg: Option<String>,
    pub lightning_strike_last_epoch: Option<Numeric>,
    pub precip_accum_local_day: Option<Numeric>,
    pub precip_accum_local_yesterday: Option<Numeric>,
    pub precip_minutes_local_day: Option<Numeric>,
    pub precip_minutes_local_yesterday: Option<Numeric>,
    pub is_precip_local_day_rain_check: Option<bool>,
    pub is_precip_local_yesterday_rain_check: Option<bool>,
    pub precip_probability: Option<Numeric>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<BetterForecastCurrentConditions>,
}

impl BetterForecastCurrentConditions {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(unix_to_utc)
    }
}

impl Model for BetterForecastCurrentConditions {
    const NAME: &'static str = "BetterForecastCurrentConditions";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "time",
        "conditions",
        "icon",
        "air_temperature",
        "sea_level_pressure",
        "station_pressure",
        "pressure_trend",
        "relative_humidity",
        "wind_avg",
        "wind_direction",
        "wind_direction_cardinal",
        "wind_direction_icon",
        "wind_gust",
        "solar_radiation",
        "uv",
        "brightness",
        "feels_like",
        "dew_point",
        "wet_bulb_temperature",
        "wet_bulb_globe_temperature",
        "delta_t",
        "air_density",
        "lightning_strike_count_last_1hr",
        "lightning_strike_count_last_3hr",
        "lightning_strike_last_distance",
        "lightning_strike_last_distance_msg",
        "lightning_strike_last_epoch",
        "precip_accum_local_day",
        "precip_accum_local_yesterday",
        "precip_minutes_local_day",
        "precip_minutes_local_yesterday",
        "is_precip_local_day_rain_check",
        "is_precip_local_yesterday_rain_check",
        "precip_probability",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetterForecastDailyForecast {
    pub day_start_local: Option<Numeric>,
    pub day_num: Option<Numeric>,
    pub month_num: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub conditions: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub icon: Option<String>,
    pub sunrise: Option<Numeric>,
    pub sunset: Option<Numeric>,
    pub air_temp_high: Option<Numeric>,
    pub air_temp_low: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub air_temp_high_color: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub air_temp_low_color: Option<String>,
    pub precip_probability: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub precip_icon: Option<String>,
    pub precip_type: Option<PrecipType>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<BetterForecastDailyForecast>,
}

impl BetterForecastDailyForecast {
    pub fn day_start(&self) -> Option<DateTime<Utc>> {
        self.day_start_local.and_then(unix_to_utc)
    }
}

impl Model for BetterForecastDailyForecast {
    const NAME: &'static str = "BetterForecastDailyForecast";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "day_start_local",
        "day_num",
        "month_num",
        "conditions",
        "icon",
        "sunrise",
        "sunset",
        "air_temp_high",
        "air_temp_low",
        "air_temp_high_color",
        "air_temp_low_color",
        "precip_probability",
        "precip_icon",
        "precip_type",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetterForecastHourlyForecast {
    pub time: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub conditions: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub icon: Option<String>,
    pub air_temperature: Option<Numeric>,
    pub sea_level_pressure: Option<Numeric>,
    pub relative_humidity: Option<Numeric>,
    pub precip: Option<Numeric>,
    pub precip_probability: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub precip_icon: Option<String>,
    pub wind_avg: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub wind_avg_color: Option<String>,
    pub wind_direction: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub wind_direction_cardinal: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub wind_direction_icon: Option<String>,
    pub wind_gust: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub wind_gust_color: Option<String>,
    pub uv: Option<Numeric>,
    pub feels_like: Option<Numeric>,
    pub local_hour: Option<Numeric>,
    pub local_day: Option<Numeric>,
    pub station_pressure: Option<Numeric>,
    pub precip_type: Option<PrecipType>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<BetterForecastHourlyForecast>,
}

impl BetterForecastHourlyForecast {
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(unix_to_utc)
    }
}

impl Model for BetterForecastHourlyForecast {
    const NAME: &'static str = "BetterForecastHourlyForecast";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "time",
        "conditions",
        "icon",
        "air_temperature",
        "sea_level_pressure",
        "relative_humidity",
        "precip",
        "precip_probability",
        "precip_icon",
        "wind_avg",
        "wind_avg_color",
        "wind_direction",
        "wind_direction_cardinal",
        "wind_direction_icon",
        "wind_gust",
        "wind_gust_color",
        "uv",
        "feels_like",
        "local_hour",
        "local_day",
        "station_pressure",
        "precip_type",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetterForecastForecast {
    pub daily: Option<Vec<BetterForecastDailyForecast>>,
    pub hourly: Option<Vec<BetterForecastHourlyForecast>>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<BetterForecastForecast>,
}

impl Model for BetterForecastForecast {
    const NAME: &'static str = "BetterForecastForecast";
    const ACCEPTED_KEYS: &'static [&'static str] = &["daily", "hourly"];
}

/// Units the forecast values are expressed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetterForecastUnits {
    pub units_temp: Option<UnitsTemp>,
    pub units_wind: Option<UnitsWind>,
    pub units_precip: Option<UnitsPrecip>,
    pub units_pressure: Option<UnitsPressure>,
    pub units_distance: Option<UnitsDistance>,
    pub units_brightness: Option<UnitsBrightness>,
    pub units_solar_radiation: Option<UnitsSolarRadiation>,
    pub units_other: Option<UnitsOther>,
    pub units_air_density: Option<UnitsAirDensity>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<BetterForecastUnits>,
}

impl Model for BetterForecastUnits {
    const NAME: &'static str = "BetterForecastUnits";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "units_temp",
        "units_wind",
        "units_precip",
        "units_pressure",
        "units_distance",
        "units_brightness",
        "units_solar_radiation",
        "units_other",
        "units_air_density",
    ];
}

/// Response of the `better_forecast` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetterForecast {
    pub latitude: Option<Numeric>,
    pub longitude: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub timezone: Option<String>,
    pub timezone_offset_minutes: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub location_name: Option<String>,
    pub current_conditions: Option<BetterForecastCurrentConditions>,
    pub forecast: Option<BetterForecastForecast>,
    pub status: Option<Status>,
    pub units: Option<BetterForecastUnits>,
    pub source_id_conditions: Option<Numeric>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<BetterForecast>,
}

impl Model for BetterForecast {
    const NAME: &'static str = "BetterForecast";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "latitude",
        "longitude",
        "timezone",
        "timezone_offset_minutes",
        "location_name",
        "current_conditions",
        "forecast",
        "status",
        "units",
        "source_id_conditions",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::serializer::tests::{assert_accepts_all_keys, parse_with_warnings};
    use serde_json::json;

    #[test]
    fn accepts_its_declared_keys() {
        assert_accepts_all_keys::<BetterForecast>();
        assert_accepts_all_keys::<BetterForecastCurrentConditions>();
        assert_accepts_all_keys::<BetterForecastDailyForecast>();
        assert_accepts_all_keys::<BetterForecastHourlyForecast>();
        assert_accepts_all_keys::<BetterForecastForecast>();
        assert_accepts_all_keys::<BetterForecastUnits>();
    }

    #[test]
    fn parses_a_forecast_payload() {
        let (forecast, warnings) = parse_with_warnings::<BetterForecast>(json!({
            "latitude": 43.1,
            "longitude": -70,
            "timezone": "America/New_York",
            "location_name": " Portland ",
            "status": {"status_code": 0, "status_message": "SUCCESS"},
            "current_conditions": {
                "time": 1_700_000_000,
                "conditions": "Clear",
                "icon": "clear-night",
                "air_temperature": 4.5,
                "pressure_trend": "Falling",
                "relative_humidity": 81,
            },
            "forecast": {
                "daily": [{"day_num": 15, "precip_type": "snow", "air_temp_high": 7}],
                "hourly": [{"time": 1_700_003_600, "precip_type": "rain", "local_hour": 18}],
            },
            "units": {"units_temp": "c", "units_wind": "mps", "units_other": "metric", "units_air_density": "kg/m3"},
        }));

        assert!(warnings.is_empty());
        assert_eq!(forecast.location_name.as_deref(), Some("Portland"));
        assert_eq!(forecast.longitude, Some(Numeric::Int(-70)));

        let current = forecast.current_conditions.unwrap();
        assert_eq!(current.pressure_trend, Some(PressureTrend::Falling));
        assert_eq!(current.relative_humidity, Some(Numeric::Int(81)));
        assert_eq!(current.observed_at().unwrap().timestamp(), 1_700_000_000);
        assert_eq!(current.wind_gust, None);

        let outlook = forecast.forecast.unwrap();
        assert_eq!(outlook.daily.unwrap()[0].precip_type, Some(PrecipType::Snow));
        let hour = &outlook.hourly.unwrap()[0];
        assert_eq!(hour.precip_type, Some(PrecipType::Rain));
        assert_eq!(hour.starts_at().unwrap().timestamp(), 1_700_003_600);

        let units = forecast.units.unwrap();
        assert_eq!(units.units_air_density, Some(UnitsAirDensity::KilogramsPerCubicMeter));
        assert_eq!(units.units_other, Some(UnitsOther::Metric));
    }
}
