//! Records the API sends as positional arrays.
//!
//! Both forms deserialize: `[ts, a, b]` and `{"timestamp": ts, ...}`. Missing
//! trailing positions are `None`; positions past the third are ignored.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::serializer::{Model, Numeric, unix_to_utc, warn_unknown_attribute};

/// A record with exactly three positional slots.
pub trait ArrayRecord: Model + Sized {
    fn from_array(values: &[Option<Numeric>]) -> Self;

    fn to_array(&self) -> [Option<Numeric>; 3];
}

fn padded(values: &[Option<Numeric>]) -> [Option<Numeric>; 3] {
    let mut slots = [None; 3];
    for (slot, value) in slots.iter_mut().zip(values) {
        *slot = *value;
    }
    slots
}

/// A `rapid_wind` sample: `[timestamp, wind_speed, wind_direction]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RapidWind {
    /// Epoch seconds.
    pub timestamp: Option<Numeric>,
    /// Meters per second.
    pub wind_speed: Option<Numeric>,
    /// Degrees.
    pub wind_direction: Option<Numeric>,
}

impl RapidWind {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(unix_to_utc)
    }
}

impl Model for RapidWind {
    const NAME: &'static str = "RapidWind";
    const ACCEPTED_KEYS: &'static [&'static str] = &["timestamp", "wind_speed", "wind_direction"];
}

impl ArrayRecord for RapidWind {
    fn from_array(values: &[Option<Numeric>]) -> Self {
        let [timestamp, wind_speed, wind_direction] = padded(values);
        Self {
            timestamp,
            wind_speed,
            wind_direction,
        }
    }

    fn to_array(&self) -> [Option<Numeric>; 3] {
        [self.timestamp, self.wind_speed, self.wind_direction]
    }
}

/// An `evt_strike` event: `[timestamp, distance, energy]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LightningEvent {
    /// Epoch seconds.
    pub timestamp: Option<Numeric>,
    /// Kilometers.
    pub distance: Option<Numeric>,
    pub energy: Option<Numeric>,
}

impl LightningEvent {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(unix_to_utc)
    }
}

impl Model for LightningEvent {
    const NAME: &'static str = "LightningEvent";
    const ACCEPTED_KEYS: &'static [&'static str] = &["timestamp", "distance", "energy"];
}

impl ArrayRecord for LightningEvent {
    fn from_array(values: &[Option<Numeric>]) -> Self {
        let [timestamp, distance, energy] = padded(values);
        Self {
            timestamp,
            distance,
            energy,
        }
    }

    fn to_array(&self) -> [Option<Numeric>; 3] {
        [self.timestamp, self.distance, self.energy]
    }
}

struct ArrayRecordVisitor<R>(PhantomData<fn() -> R>);

impl<'de, R: ArrayRecord> Visitor<'de> for ArrayRecordVisitor<R> {
    type Value = R;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as an array or an object", R::NAME)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<R, A::Error> {
        let mut values = Vec::with_capacity(3);
        while values.len() < 3 {
            match seq.next_element::<Option<Numeric>>()? {
                Some(value) => values.push(value),
                None => return Ok(R::from_array(&values)),
            }
        }
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(R::from_array(&values))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<R, A::Error> {
        let mut slots = [None; 3];
        while let Some(key) = map.next_key::<String>()? {
            match R::ACCEPTED_KEYS.iter().position(|k| *k == key) {
                Some(index) => slots[index] = map.next_value::<Option<Numeric>>()?,
                None => {
                    map.next_value::<IgnoredAny>()?;
                    warn_unknown_attribute(R::NAME, &key);
                }
            }
        }
        Ok(R::from_array(&slots))
    }
}

impl<'de> Deserialize<'de> for RapidWind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ArrayRecordVisitor(PhantomData))
    }
}

impl<'de> Deserialize<'de> for LightningEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ArrayRecordVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::serializer::tests::parse_with_warnings;
    use serde_json::json;

    fn n(v: i64) -> Option<Numeric> {
        Some(Numeric::Int(v))
    }

    #[test]
    fn short_arrays_round_trip_padded() {
        let inputs: [&[Option<Numeric>]; 4] = [
            &[],
            &[n(1_700_000_000)],
            &[n(1_700_000_000), Some(Numeric::Float(2.5))],
            &[n(1_700_000_000), None, n(270)],
        ];
        for input in inputs {
            let wind = RapidWind::from_array(input);
            let out = wind.to_array();
            assert_eq!(&out[..input.len()], input);
            assert!(out[input.len()..].iter().all(Option::is_none));
            assert_eq!(RapidWind::from_array(&out), wind);
        }
    }

    #[test]
    fn extra_positions_are_ignored() {
        let event = LightningEvent::from_array(&[n(1), n(2), n(3), n(4)]);
        assert_eq!(event.to_array(), [n(1), n(2), n(3)]);
    }

    #[test]
    fn both_wire_forms_deserialize() {
        let from_array: LightningEvent = serde_json::from_value(json!([1_700_000_000, 14, 3848])).unwrap();
        let (from_map, warnings) = parse_with_warnings::<LightningEvent>(
            json!({"timestamp": 1_700_000_000, "distance": 14, "energy": 3848}),
        );
        assert!(warnings.is_empty());
        assert_eq!(from_array, from_map);
        assert_eq!(from_array.time().unwrap().timestamp(), 1_700_000_000);

        let wind: RapidWind = serde_json::from_value(json!([1_700_000_000, 0.8, null, "x"])).unwrap();
        assert_eq!(wind.wind_speed, Some(Numeric::Float(0.8)));
        assert_eq!(wind.wind_direction, None);
    }

    #[test]
    fn unknown_keys_in_named_form_warn() {
        let (wind, warnings) =
            parse_with_warnings::<RapidWind>(json!({"wind_speed": 3, "gustiness": 1}));
        assert_eq!(wind.wind_speed, n(3));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].fields["key"], "gustiness");
    }
}
