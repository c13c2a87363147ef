use serde::{Deserialize, Serialize};

use super::enums::api_enum;
use super::serializer::{Discarded, Model, Numeric, trimmed};
use super::units::Environment;

api_enum! {
    pub enum DeviceType: str {
        Hub = "HB",
        Air = "AR",
        Sky = "SK",
        Tempest = "ST",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// Height above ground level, in meters.
    pub agl: Option<Numeric>,
    #[serde(default, deserialize_with = "trimmed")]
    pub name: Option<String>,
    pub environment: Option<Environment>,
    #[serde(default, deserialize_with = "trimmed")]
    pub wifi_network_name: Option<String>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<DeviceMeta>,
}

impl Model for DeviceMeta {
    const NAME: &'static str = "DeviceMeta";
    const ACCEPTED_KEYS: &'static [&'static str] =
        &["agl", "name", "environment", "wifi_network_name"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSettings {
    pub show_precip_final: Option<bool>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<DeviceSettings>,
}

impl Model for DeviceSettings {
    const NAME: &'static str = "DeviceSettings";
    const ACCEPTED_KEYS: &'static [&'static str] = &["show_precip_final"];
}

/// A hub or sensor attached to a station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: Option<i64>,
    #[serde(default, deserialize_with = "trimmed")]
    pub serial_number: Option<String>,
    pub device_meta: Option<DeviceMeta>,
    pub device_settings: Option<DeviceSettings>,
    pub device_type: Option<DeviceType>,
    #[serde(default, deserialize_with = "trimmed")]
    pub hardware_revision: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub firmware_revision: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub notes: Option<String>,
    pub location_id: Option<i64>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<Device>,
}

impl Model for Device {
    const NAME: &'static str = "Device";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "device_id",
        "serial_number",
        "device_meta",
        "device_settings",
        "device_type",
        "hardware_revision",
        "firmware_revision",
        "notes",
        "location_id",
    ];
}
