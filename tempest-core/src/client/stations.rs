use super::ClientCore;
use super::pipeline::Endpoint;
use crate::http::Call;
use crate::model::StationSet;

/// Station metadata.
#[derive(Debug, Clone, Copy)]
pub struct StationsApi<'a> {
    core: &'a ClientCore,
}

impl<'a> StationsApi<'a> {
    pub(crate) fn new(core: &'a ClientCore) -> Self {
        Self { core }
    }

    /// Every station the token has access to.
    pub fn stations(&self) -> Call<StationSet> {
        self.core.execute(Endpoint::get("stations"))
    }

    /// A single station; `station_id` must be positive.
    pub fn station(&self, station_id: i64) -> Call<StationSet> {
        if let Err(e) = super::require_positive("station_id", station_id) {
            return Call::failed(e);
        }
        self.core.execute(Endpoint::get(format!("stations/{station_id}")))
    }
}
