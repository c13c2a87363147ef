//! Client library for the Tempest weather REST API.
//!
//! This crate defines:
//! - Settings resolution (defaults, config file, environment)
//! - Blocking and async transports behind one call shape
//! - The request pipeline and its error taxonomy
//! - Strict response models
//!
//! It is used by `tempest-cli`, but can also be reused by other binaries or services.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;

#[cfg(test)]
mod testing;

pub use auth::{AccessToken, Token};
pub use client::{
    DeviceObservationQuery, ForecastApi, ObservationsApi, StationObservationQuery, StationsApi,
    StatsApi, Tempest, TempestBuilder,
};
pub use config::{FileConfig, Settings, SettingsOverrides, load_settings, reload_settings};
pub use error::{Error, HttpError, HttpErrorKind};
pub use http::{Call, Request, Response, Transport};
pub use model::{
    BetterForecast, DeviceObservation, StationObservation, StationObservationLatest, StationSet,
    StatsSet, UnitsDefault, UnitsOverrides,
};
