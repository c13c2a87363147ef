use serde::{Deserialize, Serialize};

use super::device::Device;
use super::enums::api_enum;
use super::serializer::{Discarded, Model, Numeric, trimmed};
use super::status::Status;
use super::units::Environment;

fn shared() -> Option<bool> {
    Some(true)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMeta {
    pub elevation: Option<Numeric>,
    /// Defaults to `Some(true)` when the API leaves it out.
    #[serde(default = "shared")]
    pub share_with_wf: Option<bool>,
    #[serde(default = "shared")]
    pub share_with_wu: Option<bool>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<StationMeta>,
}

impl Default for StationMeta {
    fn default() -> Self {
        Self {
            elevation: None,
            share_with_wf: shared(),
            share_with_wu: shared(),
            discarded: Discarded::default(),
        }
    }
}

impl Model for StationMeta {
    const NAME: &'static str = "StationMeta";
    const ACCEPTED_KEYS: &'static [&'static str] = &["elevation", "share_with_wf", "share_with_wu"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationItem {
    pub location_item_id: Option<i64>,
    pub location_id: Option<i64>,
    pub device_id: Option<i64>,
    #[serde(default, deserialize_with = "trimmed")]
    pub item: Option<String>,
    pub sort: Option<i64>,
    pub station_id: Option<i64>,
    pub station_item_id: Option<i64>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<StationItem>,
}

impl Model for StationItem {
    const NAME: &'static str = "StationItem";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "location_item_id",
        "location_id",
        "device_id",
        "item",
        "sort",
        "station_id",
        "station_item_id",
    ];
}

api_enum! {
    pub enum StationCapability: str {
        AirTemperatureHumidity = "air_temperature_humidity",
        BarometricPressure = "barometric_pressure",
        Light = "light",
        Lightning = "lightning",
        Rain = "rain",
        Wind = "wind",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationCapabilities {
    pub device_id: Option<i64>,
    pub capability: Option<StationCapability>,
    pub agl: Option<Numeric>,
    pub environment: Option<Environment>,
    pub show_precip_final: Option<bool>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<StationCapabilities>,
}

impl Model for StationCapabilities {
    const NAME: &'static str = "StationCapabilities";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "device_id",
        "capability",
        "agl",
        "environment",
        "show_precip_final",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub location_id: Option<i64>,
    pub station_id: Option<i64>,
    #[serde(default, deserialize_with = "trimmed")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub public_name: Option<String>,
    pub latitude: Option<Numeric>,
    pub longitude: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub timezone: Option<String>,
    pub timezone_offset_minutes: Option<Numeric>,
    pub station_meta: Option<StationMeta>,
    pub last_modified_epoch: Option<i64>,
    pub created_epoch: Option<i64>,
    pub devices: Option<Vec<Device>>,
    pub station_items: Option<Vec<StationItem>>,
    pub is_local_mode: Option<bool>,
    pub capabilities: Option<Vec<StationCapabilities>>,
    pub state: Option<i64>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<Station>,
}

impl Model for Station {
    const NAME: &'static str = "Station";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "location_id",
        "station_id",
        "name",
        "public_name",
        "latitude",
        "longitude",
        "timezone",
        "timezone_offset_minutes",
        "station_meta",
        "last_modified_epoch",
        "created_epoch",
        "devices",
        "station_items",
        "is_local_mode",
        "capabilities",
        "state",
    ];
}

/// Response of the `stations` and `stations/{id}` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationSet {
    pub status: Option<Status>,
    pub stations: Option<Vec<Station>>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<StationSet>,
}

impl Model for StationSet {
    const NAME: &'static str = "StationSet";
    const ACCEPTED_KEYS: &'static [&'static str] = &["status", "stations"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::serializer::tests::{assert_accepts_all_keys, parse_with_warnings};
    use serde_json::json;

    #[test]
    fn accepts_its_declared_keys() {
        assert_accepts_all_keys::<StationSet>();
        assert_accepts_all_keys::<Station>();
        assert_accepts_all_keys::<StationMeta>();
        assert_accepts_all_keys::<StationItem>();
        assert_accepts_all_keys::<StationCapabilities>();
    }

    #[test]
    fn empty_status_message_is_absent() {
        let (set, warnings) = parse_with_warnings::<StationSet>(json!({
            "status": {"status_code": 0, "status_message": ""},
            "stations": [{"station_id": 5, "name": "Home"}],
        }));

        assert!(warnings.is_empty());
        assert_eq!(set.status.unwrap().status_message, None);
        let stations = set.stations.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].station_id, Some(5));
        assert_eq!(stations[0].name.as_deref(), Some("Home"));
        assert_eq!(stations[0].devices, None);
    }

    #[test]
    fn nested_unknown_keys_are_reported_by_their_record() {
        let (set, warnings) = parse_with_warnings::<StationSet>(json!({
            "stations": [{
                "station_id": 1,
                "station_meta": {"elevation": 12.5, "share_with_wf": false, "colour": "red"},
                "brand_new_field": {"nested": true},
            }],
        }));

        let mut seen: Vec<_> = warnings
            .iter()
            .map(|w| (w.fields["model"].clone(), w.fields["key"].clone()))
            .collect();
        seen.sort();
        assert_eq!(
            seen,
            [
                ("Station".to_string(), "brand_new_field".to_string()),
                ("StationMeta".to_string(), "colour".to_string()),
            ]
        );

        let meta = set.stations.unwrap().remove(0).station_meta.unwrap();
        assert_eq!(meta.elevation, Some(Numeric::Float(12.5)));
        assert_eq!(meta.share_with_wf, Some(false));
        assert_eq!(meta.share_with_wu, Some(true));
    }

    #[test]
    fn capabilities_coerce_enum_names() {
        let (caps, _) = parse_with_warnings::<StationCapabilities>(json!({
            "device_id": 7,
            "capability": "BarometricPressure",
            "environment": "indoor",
            "agl": 0,
        }));
        assert_eq!(caps.capability, Some(StationCapability::BarometricPressure));
        assert_eq!(caps.environment, Some(Environment::Indoor));
    }

    #[test]
    fn serializes_without_discarded_keys() {
        let (set, _) = parse_with_warnings::<StationSet>(json!({
            "stations": [{"station_id": 5, "surplus": 1}],
        }));
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["stations"][0]["station_id"], json!(5));
        assert!(value["stations"][0].get("surplus").is_none());
    }
}
