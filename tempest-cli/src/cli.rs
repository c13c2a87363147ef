use std::fmt::Display;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, Password, Select, Text};
use serde::Serialize;
use tempest_core::model::{
    ApiEnum, Bucket, EnumLiteral, EnumValue, UnitsBrightness, UnitsDistance, UnitsPrecip,
    UnitsPressure, UnitsSolarRadiation, UnitsTemp, UnitsWind,
};
use tempest_core::{
    Call, DeviceObservationQuery, FileConfig, StationObservationQuery, Tempest, Token,
    UnitsOverrides, config::DEFAULT_API_URI,
};
use tokio::runtime::Runtime;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tempest", version, about = "Tempest weather station CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Access token; overrides TEMPEST_ACCESS_TOKEN and the config file.
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Use the async transport.
    #[arg(long = "async", global = true)]
    pub asynchronous: bool,

    /// More log output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively write the config file.
    Configure,

    /// List the stations the token can access.
    Stations,

    /// Show one station.
    Station { station_id: i64 },

    /// Aggregated statistics for a station.
    Stats { station_id: i64 },

    /// Current conditions and forecast for a station.
    Forecast {
        station_id: i64,

        #[command(flatten)]
        units: UnitArgs,
    },

    /// Latest observation of a station.
    Latest { station_id: i64 },

    /// Historical observations of a station.
    Observations {
        station_id: i64,

        /// Epoch seconds.
        #[arg(long)]
        time_start: Option<i64>,

        /// Epoch seconds.
        #[arg(long)]
        time_end: Option<i64>,

        /// Bucket size in minutes: 1, 5, 30 or 180.
        #[arg(long)]
        bucket: Option<i64>,

        /// Comma separated field names.
        #[arg(long)]
        obs_fields: Option<String>,

        #[command(flatten)]
        units: UnitArgs,
    },

    /// Observations recorded by one device.
    Device {
        device_id: i64,

        #[arg(long)]
        day_offset: Option<i64>,

        #[arg(long)]
        time_start: Option<i64>,

        #[arg(long)]
        time_end: Option<i64>,
    },
}

/// Per-call unit overrides.
#[derive(Debug, Clone, Default, Args)]
pub struct UnitArgs {
    #[arg(long)]
    pub units_temp: Option<String>,

    #[arg(long)]
    pub units_wind: Option<String>,

    #[arg(long)]
    pub units_pressure: Option<String>,

    #[arg(long)]
    pub units_precip: Option<String>,

    #[arg(long)]
    pub units_distance: Option<String>,
}

impl UnitArgs {
    fn overrides(&self) -> Result<Option<UnitsOverrides>> {
        let mut units = UnitsOverrides::default();
        if let Some(v) = &self.units_temp {
            units = units.temp(v.as_str())?;
        }
        if let Some(v) = &self.units_wind {
            units = units.wind(v.as_str())?;
        }
        if let Some(v) = &self.units_pressure {
            units = units.pressure(v.as_str())?;
        }
        if let Some(v) = &self.units_precip {
            units = units.precip(v.as_str())?;
        }
        if let Some(v) = &self.units_distance {
            units = units.distance(v.as_str())?;
        }
        Ok((!units.is_empty()).then_some(units))
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let Command::Configure = self.command {
            return configure();
        }

        let mut builder = Tempest::builder().asynchronous(self.asynchronous);
        if let Some(token) = self.token {
            builder = builder.token(Token::new(token));
        }
        let client = builder.build().context("Failed to create Tempest client")?;

        // The blocking transport must stay outside any runtime.
        let runtime = if client.is_async() {
            Some(Runtime::new().context("Failed to start async runtime")?)
        } else {
            None
        };
        let out = Output {
            runtime: runtime.as_ref(),
        };

        match self.command {
            Command::Configure => Ok(()),
            Command::Stations => out.print(client.stations()),
            Command::Station { station_id } => out.print(client.station(station_id)),
            Command::Stats { station_id } => out.print(client.stats(station_id)),
            Command::Forecast { station_id, units } => {
                out.print(client.better_forecast(station_id, units.overrides()?))
            }
            Command::Latest { station_id } => {
                out.print(client.observation_station_latest(station_id))
            }
            Command::Observations {
                station_id,
                time_start,
                time_end,
                bucket,
                obs_fields,
                units,
            } => {
                let bucket = bucket
                    .map(|b| tempest_core::model::validate_enum_param::<Bucket>("bucket", b))
                    .transpose()?;
                let query = StationObservationQuery {
                    time_start,
                    time_end,
                    bucket,
                    obs_fields,
                    units: units.overrides()?,
                };
                out.print(client.observation_station(station_id, query))
            }
            Command::Device {
                device_id,
                day_offset,
                time_start,
                time_end,
            } => {
                let query = DeviceObservationQuery {
                    day_offset,
                    time_start,
                    time_end,
                };
                out.print(client.observation_device(device_id, query))
            }
        }
    }
}

struct Output<'a> {
    runtime: Option<&'a Runtime>,
}

impl Output<'_> {
    fn print<M: Serialize + Send + 'static>(&self, call: Call<M>) -> Result<()> {
        let model = match self.runtime {
            Some(runtime) => runtime.block_on(call.into_future())?,
            None => call.wait()?,
        };
        println!("{}", serde_json::to_string_pretty(&model)?);
        Ok(())
    }
}

fn configure() -> Result<()> {
    let mut cfg = FileConfig::load()?;

    let current_uri = cfg.api_uri.clone().unwrap_or_else(|| DEFAULT_API_URI.to_string());
    let api_uri = Text::new("API base URI:")
        .with_default(&current_uri)
        .prompt()?;
    cfg.api_uri = Some(api_uri.trim().to_string()).filter(|uri| uri != DEFAULT_API_URI);

    if Confirm::new("Store an access token in the config file?")
        .with_default(cfg.access_token.is_some())
        .prompt()?
    {
        let token = Password::new("Access token (empty keeps the current one):")
            .without_confirmation()
            .prompt()?;
        let token = token.trim();
        if !token.is_empty() {
            cfg.access_token = Some(token.to_string());
        }
    } else {
        cfg.access_token = None;
    }

    cfg.default_unit_temperature =
        pick_unit::<UnitsTemp>("Temperature unit:", &cfg.default_unit_temperature)?;
    cfg.default_unit_pressure =
        pick_unit::<UnitsPressure>("Pressure unit:", &cfg.default_unit_pressure)?;
    cfg.default_unit_wind = pick_unit::<UnitsWind>("Wind unit:", &cfg.default_unit_wind)?;
    cfg.default_unit_distance =
        pick_unit::<UnitsDistance>("Distance unit:", &cfg.default_unit_distance)?;
    cfg.default_units_precip =
        pick_unit::<UnitsPrecip>("Precipitation unit:", &cfg.default_units_precip)?;
    cfg.default_units_brightness =
        pick_unit::<UnitsBrightness>("Brightness unit:", &cfg.default_units_brightness)?;
    cfg.default_units_solar_radiation = pick_unit::<UnitsSolarRadiation>(
        "Solar radiation unit:",
        &cfg.default_units_solar_radiation,
    )?;

    let current_bucket = cfg
        .default_units_bucket_step_minutes
        .as_ref()
        .and_then(Bucket::coerce);
    let bucket = select("Observation bucket (minutes):", current_bucket)?;
    cfg.default_units_bucket_step_minutes = match bucket.value() {
        EnumValue::Int(minutes) => Some(EnumLiteral::Int(minutes)),
        EnumValue::Str(value) => Some(EnumLiteral::Str(value.to_string())),
    };

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

fn pick_unit<E: ApiEnum + Display>(label: &str, current: &Option<String>) -> Result<Option<String>> {
    let current = current
        .as_ref()
        .and_then(|value| E::coerce(&EnumLiteral::Str(value.clone())));
    Ok(Some(select::<E>(label, current)?.to_string()))
}

fn select<E: ApiEnum + Display>(label: &str, current: Option<E>) -> Result<E> {
    let members = E::members().to_vec();
    let cursor = current
        .and_then(|c| members.iter().position(|m| *m == c))
        .unwrap_or(0);

    Select::new(label, members)
        .with_starting_cursor(cursor)
        .prompt()
        .with_context(|| format!("No {} selected", E::NAME))
}
