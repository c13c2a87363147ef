//! Measurement units and the other small vocabularies the API uses.

use serde::{Deserialize, Serialize};

use super::enums::{EnumArg, api_enum, validate_enum_param};
use crate::error::Error;

api_enum! {
    pub enum UnitsTemp: str {
        Celsius = "c",
        Fahrenheit = "f",
    }
}

api_enum! {
    pub enum UnitsWind: str {
        MetersPerSecond = "mps",
        KilometersPerHour = "kph",
        MilesPerHour = "mph",
        Knots = "kts",
        Beaufort = "bft",
        LightningFlashesPerMinute = "lfm",
    }
}

api_enum! {
    pub enum UnitsPressure: str {
        Millibar = "mb",
        InchesOfMercury = "inhg",
        MillimetersOfMercury = "mmhg",
        Hectopascal = "hpa",
    }
}

api_enum! {
    pub enum UnitsPrecip: str {
        Millimeters = "mm",
        Centimeters = "cm",
        Inches = "in",
    }
}

api_enum! {
    pub enum UnitsDistance: str {
        Kilometers = "km",
        Miles = "mi",
    }
}

api_enum! {
    pub enum UnitsDirection: str {
        Degrees = "degrees",
        Cardinal = "cardinal",
    }
}

api_enum! {
    pub enum UnitsOther: str {
        Metric = "metric",
        Imperial = "imperial",
    }
}

api_enum! {
    pub enum UnitsBrightness: str {
        Lux = "lux",
    }
}

api_enum! {
    pub enum UnitsSolarRadiation: str {
        WattsPerSquareMeter = "w/m2",
    }
}

api_enum! {
    pub enum UnitsAirDensity: str {
        KilogramsPerCubicMeter = "kg/m3",
        PoundsPerCubicFoot = "lb/ft3",
    }
}

api_enum! {
    /// Observation bucket size in minutes.
    pub enum Bucket: int {
        OneMinute = 1,
        FiveMinutes = 5,
        ThirtyMinutes = 30,
        ThreeHours = 180,
    }
}

api_enum! {
    pub enum Environment: str {
        Indoor = "indoor",
        Outdoor = "outdoor",
    }
}

api_enum! {
    pub enum PressureTrend: str {
        Falling = "falling",
        Rising = "rising",
        Steady = "steady",
        Unknown = "unknown",
    }
}

api_enum! {
    pub enum PrecipType: str {
        Rain = "rain",
        Snow = "snow",
        Sleet = "sleet",
        Storm = "storm",
    }
}

/// Unit preferences sent with forecast and observation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitsDefault {
    pub units_temp: UnitsTemp,
    pub units_pressure: UnitsPressure,
    pub units_wind: UnitsWind,
    pub units_distance: UnitsDistance,
    pub units_brightness: UnitsBrightness,
    pub units_solar_radiation: UnitsSolarRadiation,
    pub units_precip: UnitsPrecip,
    pub bucket: Bucket,
}

impl Default for UnitsDefault {
    fn default() -> Self {
        Self {
            units_temp: UnitsTemp::Celsius,
            units_pressure: UnitsPressure::Millibar,
            units_wind: UnitsWind::MetersPerSecond,
            units_distance: UnitsDistance::Kilometers,
            units_brightness: UnitsBrightness::Lux,
            units_solar_radiation: UnitsSolarRadiation::WattsPerSquareMeter,
            units_precip: UnitsPrecip::Millimeters,
            bucket: Bucket::OneMinute,
        }
    }
}

impl UnitsDefault {
    /// The `units_*` query parameters the forecast and observation endpoints take.
    pub fn query_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("units_temp", Some(self.units_temp.to_string())),
            ("units_wind", Some(self.units_wind.to_string())),
            ("units_pressure", Some(self.units_pressure.to_string())),
            ("units_precip", Some(self.units_precip.to_string())),
            ("units_distance", Some(self.units_distance.to_string())),
        ]
    }
}

/// Partial unit changes applied on top of a [`UnitsDefault`].
///
/// ```
/// # use tempest_core::model::{UnitsDefault, UnitsOverrides, UnitsTemp};
/// let units = UnitsOverrides::default()
///     .temp(UnitsTemp::Fahrenheit)?
///     .wind("mph")?
///     .apply(&UnitsDefault::default());
/// assert_eq!(units.units_temp, UnitsTemp::Fahrenheit);
/// # Ok::<(), tempest_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitsOverrides {
    pub temp: Option<UnitsTemp>,
    pub wind: Option<UnitsWind>,
    pub pressure: Option<UnitsPressure>,
    pub precip: Option<UnitsPrecip>,
    pub distance: Option<UnitsDistance>,
    pub brightness: Option<UnitsBrightness>,
    pub solar_radiation: Option<UnitsSolarRadiation>,
    pub bucket: Option<Bucket>,
}

impl UnitsOverrides {
    pub fn temp(mut self, value: impl Into<EnumArg<UnitsTemp>>) -> Result<Self, Error> {
        self.temp = Some(validate_enum_param("units_temp", value)?);
        Ok(self)
    }

    pub fn wind(mut self, value: impl Into<EnumArg<UnitsWind>>) -> Result<Self, Error> {
        self.wind = Some(validate_enum_param("units_wind", value)?);
        Ok(self)
    }

    pub fn pressure(mut self, value: impl Into<EnumArg<UnitsPressure>>) -> Result<Self, Error> {
        self.pressure = Some(validate_enum_param("units_pressure", value)?);
        Ok(self)
    }

    pub fn precip(mut self, value: impl Into<EnumArg<UnitsPrecip>>) -> Result<Self, Error> {
        self.precip = Some(validate_enum_param("units_precip", value)?);
        Ok(self)
    }

    pub fn distance(mut self, value: impl Into<EnumArg<UnitsDistance>>) -> Result<Self, Error> {
        self.distance = Some(validate_enum_param("units_distance", value)?);
        Ok(self)
    }

    pub fn brightness(mut self, value: impl Into<EnumArg<UnitsBrightness>>) -> Result<Self, Error> {
        self.brightness = Some(validate_enum_param("units_brightness", value)?);
        Ok(self)
    }

    pub fn solar_radiation(
        mut self,
        value: impl Into<EnumArg<UnitsSolarRadiation>>,
    ) -> Result<Self, Error> {
        self.solar_radiation = Some(validate_enum_param("units_solar_radiation", value)?);
        Ok(self)
    }

    pub fn bucket(mut self, value: impl Into<EnumArg<Bucket>>) -> Result<Self, Error> {
        self.bucket = Some(validate_enum_param("bucket", value)?);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A copy of `base` with every field set here replaced.
    pub fn apply(&self, base: &UnitsDefault) -> UnitsDefault {
        UnitsDefault {
            units_temp: self.temp.unwrap_or(base.units_temp),
            units_pressure: self.pressure.unwrap_or(base.units_pressure),
            units_wind: self.wind.unwrap_or(base.units_wind),
            units_distance: self.distance.unwrap_or(base.units_distance),
            units_brightness: self.brightness.unwrap_or(base.units_brightness),
            units_solar_radiation: self.solar_radiation.unwrap_or(base.units_solar_radiation),
            units_precip: self.precip.unwrap_or(base.units_precip),
            bucket: self.bucket.unwrap_or(base.bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApiEnum;
    use serde_json::json;

    #[test]
    fn value_and_name_lookups_agree() {
        assert_eq!("f".parse::<UnitsTemp>().unwrap(), UnitsTemp::Fahrenheit);
        assert_eq!("FAHRENHEIT".parse::<UnitsTemp>().unwrap(), UnitsTemp::Fahrenheit);
        assert_eq!("InHg".parse::<UnitsPressure>().unwrap(), UnitsPressure::InchesOfMercury);
        assert_eq!("w/m2".parse::<UnitsSolarRadiation>().unwrap(), UnitsSolarRadiation::WattsPerSquareMeter);
        assert_eq!("180".parse::<Bucket>().unwrap(), Bucket::ThreeHours);
    }

    #[test]
    fn invalid_units_list_the_valid_values() {
        let err = "kelvin".parse::<UnitsTemp>().unwrap_err();
        assert_eq!(err.to_string(), r#"Invalid UnitsTemp: "kelvin". Valid: ["c", "f"]"#);
        assert_eq!(UnitsWind::valid_values(), ["mps", "kph", "mph", "kts", "bft", "lfm"]);
    }

    #[test]
    fn overrides_replace_only_what_they_set() {
        let base = UnitsDefault::default();
        let overrides = UnitsOverrides::default()
            .temp("f")
            .unwrap()
            .bucket(30_i64)
            .unwrap();

        let units = overrides.apply(&base);
        assert_eq!(units.units_temp, UnitsTemp::Fahrenheit);
        assert_eq!(units.bucket, Bucket::ThirtyMinutes);
        assert_eq!(units.units_wind, base.units_wind);
        assert_eq!(units.units_pressure, base.units_pressure);
        assert!(UnitsOverrides::default().is_empty());
    }

    #[test]
    fn override_builders_reject_bad_literals() {
        let err = UnitsOverrides::default().wind("furlongs").unwrap_err();
        assert!(matches!(err, Error::InvalidEnumValue { ref param, .. } if param == "units_wind"));
        assert!(UnitsOverrides::default().bucket(7_i64).is_err());
    }

    #[test]
    fn defaults_serialize_to_wire_values() {
        let value = serde_json::to_value(UnitsDefault::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "units_temp": "c",
                "units_pressure": "mb",
                "units_wind": "mps",
                "units_distance": "km",
                "units_brightness": "lux",
                "units_solar_radiation": "w/m2",
                "units_precip": "mm",
                "bucket": 1,
            })
        );
    }

    #[test]
    fn query_params_use_canonical_values() {
        let units = UnitsOverrides::default()
            .pressure(UnitsPressure::InchesOfMercury)
            .unwrap()
            .apply(&UnitsDefault::default());
        let params = units.query_params();
        assert!(params.contains(&("units_pressure", Some("inhg".to_string()))));
        assert_eq!(params.len(), 5);
    }
}
