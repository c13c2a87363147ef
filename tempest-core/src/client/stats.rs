use super::ClientCore;
use super::pipeline::Endpoint;
use crate::http::Call;
use crate::model::StatsSet;

/// Aggregated station statistics.
#[derive(Debug, Clone, Copy)]
pub struct StatsApi<'a> {
    core: &'a ClientCore,
}

impl<'a> StatsApi<'a> {
    pub(crate) fn new(core: &'a ClientCore) -> Self {
        Self { core }
    }

    pub fn stats(&self, station_id: i64) -> Call<StatsSet> {
        if let Err(e) = super::require_positive("station_id", station_id) {
            return Call::failed(e);
        }
        self.core
            .execute(Endpoint::get(format!("stats/station/{station_id}")))
    }
}
