use serde::{Deserialize, Serialize};

use super::serializer::{Discarded, Model, StatValue, Table, trimmed};
use super::status::Status;

/// Daily, weekly, monthly, yearly and all-time statistics for a station.
///
/// The tables are positional rows exactly as the API sends them; cells can
/// be strings, integers, floats or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSet {
    pub status: Option<Status>,
    pub station_id: Option<i64>,
    #[serde(rename = "type", alias = "type_", default, deserialize_with = "trimmed")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub first_ob_local_day: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub last_ob_local_day: Option<String>,
    pub stats_day: Option<Table>,
    pub stats_week: Option<Table>,
    pub stats_month: Option<Table>,
    pub stats_year: Option<Table>,
    pub stats_alltime: Option<Vec<Option<StatValue>>>,
    pub stats_week_time: Option<Vec<Vec<Option<String>>>>,
    pub stats_month_time: Option<Vec<Vec<Option<String>>>>,
    pub stats_year_time: Option<Vec<Vec<Option<String>>>>,
    pub stats_alltime_time: Option<Vec<Option<String>>>,
    #[serde(default, deserialize_with = "trimmed")]
    pub last_ob_day_local: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub first_ob_day_local: Option<String>,
    #[serde(flatten)]
    pub(crate) discarded: Discarded<StatsSet>,
}

impl Model for StatsSet {
    const NAME: &'static str = "StatsSet";
    const ACCEPTED_KEYS: &'static [&'static str] = &[
        "status",
        "station_id",
        "type",
        "type_",
        "first_ob_local_day",
        "last_ob_local_day",
        "stats_day",
        "stats_week",
        "stats_month",
        "stats_year",
        "stats_alltime",
        "stats_week_time",
        "stats_month_time",
        "stats_year_time",
        "stats_alltime_time",
        "last_ob_day_local",
        "first_ob_day_local",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Numeric;
    use crate::model::serializer::tests::{assert_accepts_all_keys, parse_with_warnings};
    use serde_json::json;

    #[test]
    fn accepts_its_declared_keys() {
        assert_accepts_all_keys::<StatsSet>();
    }

    #[test]
    fn type_is_read_from_either_spelling() {
        let (stats, warnings) = parse_with_warnings::<StatsSet>(json!({"type": "stats"}));
        assert!(warnings.is_empty());
        assert_eq!(stats.kind.as_deref(), Some("stats"));

        let (stats, warnings) = parse_with_warnings::<StatsSet>(json!({"type_": " stats "}));
        assert!(warnings.is_empty());
        assert_eq!(stats.kind.as_deref(), Some("stats"));

        assert_eq!(serde_json::to_value(&stats).unwrap()["type"], json!("stats"));
    }

    #[test]
    fn heterogeneous_tables_are_kept_as_sent() {
        let (stats, _) = parse_with_warnings::<StatsSet>(json!({
            "station_id": 42,
            "stats_day": [["2024-06-01", 1012.4, 21, null, "x"]],
            "stats_alltime": [null, 3, 4.5],
            "stats_alltime_time": ["2020-01-01", null],
        }));

        let day = &stats.stats_day.unwrap()[0];
        assert_eq!(day[0], Some(StatValue::Text("2024-06-01".into())));
        assert_eq!(day[1], Some(StatValue::Number(Numeric::Float(1012.4))));
        assert_eq!(day[2], Some(StatValue::Number(Numeric::Int(21))));
        assert_eq!(day[3], None);
        assert_eq!(
            stats.stats_alltime.unwrap(),
            vec![None, Some(StatValue::Number(Numeric::Int(3))), Some(StatValue::Number(Numeric::Float(4.5)))]
        );
        assert_eq!(stats.stats_alltime_time.unwrap()[1], None);
        assert_eq!(stats.stats_week, None);
    }
}
