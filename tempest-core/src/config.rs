//! Settings: defaults, then the TOML config file, then the environment.
//!
//! Explicit overrides are applied afterwards with [`Settings::with_overrides`].

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};
use tracing::{debug, warn};

use crate::model::{
    Bucket, EnumLiteral, UnitsBrightness, UnitsDefault, UnitsDistance, UnitsOverrides,
    UnitsPrecip, UnitsPressure, UnitsSolarRadiation, UnitsTemp, UnitsWind, validate_enum_param,
};

pub const DEFAULT_API_URI: &str = "https://swd.weatherflow.com/swd/rest/";

pub const CONFIG_PATH_ENV: &str = "TEMPEST_CONFIG_PATH";
pub const API_URI_ENV: &str = "TEMPEST_API_URI";
pub const ACCESS_TOKEN_ENV: &str = "TEMPEST_ACCESS_TOKEN";

/// Immutable configuration shared by a client and everything it creates.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    api_uri: String,
    token: Option<String>,
    units: UnitsDefault,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_API_URI, None, UnitsDefault::default())
    }
}

impl Settings {
    /// Surrounding whitespace is trimmed; a blank token counts as no token.
    pub fn new(api_uri: impl Into<String>, token: Option<String>, units: UnitsDefault) -> Self {
        let api_uri = api_uri.into().trim().to_string();
        Self {
            api_uri,
            token: normalize_token(token),
            units,
        }
    }

    pub fn api_uri(&self) -> &str {
        &self.api_uri
    }

    /// The base URI with exactly one trailing slash.
    pub fn api_uri_normalized(&self) -> String {
        format!("{}/", self.api_uri.trim_end_matches('/'))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn units(&self) -> &UnitsDefault {
        &self.units
    }

    /// A copy with the given fields replaced.
    ///
    /// `units` replaces the units wholesale and wins over `units_overrides`.
    /// A blank `api_uri` keeps the current one.
    pub fn with_overrides(&self, overrides: SettingsOverrides) -> Settings {
        let units = match (overrides.units, overrides.units_overrides) {
            (Some(units), _) => units,
            (None, Some(partial)) => partial.apply(&self.units),
            (None, None) => self.units,
        };
        let api_uri = overrides
            .api_uri
            .filter(|uri| !uri.trim().is_empty())
            .unwrap_or_else(|| self.api_uri.clone());
        let token = match overrides.token {
            Some(token) => Some(token),
            None => self.token.clone(),
        };

        Settings::new(api_uri, token, units)
    }
}

fn normalize_token(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_uri", &self.api_uri)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("units", &self.units)
            .finish()
    }
}

/// Fields to replace in [`Settings::with_overrides`]; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub token: Option<String>,
    pub api_uri: Option<String>,
    pub units: Option<UnitsDefault>,
    pub units_overrides: Option<UnitsOverrides>,
}

impl SettingsOverrides {
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }
}

/// Configuration as stored on disk.
///
/// Example TOML:
/// ```toml
/// api_uri = "https://swd.weatherflow.com/swd/rest/"
/// default_unit_temperature = "f"
/// default_units_bucket_step_minutes = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    pub api_uri: Option<String>,
    pub access_token: Option<String>,
    pub default_unit_temperature: Option<String>,
    pub default_unit_pressure: Option<String>,
    pub default_unit_wind: Option<String>,
    pub default_unit_distance: Option<String>,
    pub default_units_precip: Option<String>,
    pub default_units_brightness: Option<String>,
    pub default_units_solar_radiation: Option<String>,
    pub default_units_bucket_step_minutes: Option<EnumLiteral>,
}

impl FileConfig {
    /// Load the first config file that exists, or an empty config if there is none.
    pub fn load() -> Result<Self> {
        match Self::discover() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    /// Save to `$TEMPEST_CONFIG_PATH` if set, otherwise the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => Self::user_config_path()?,
        };
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Candidate locations, in lookup order.
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            paths.push(PathBuf::from(path));
        }
        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join("tempest.toml"));
        }
        if let Ok(path) = Self::user_config_path() {
            paths.push(path);
        }
        paths
    }

    pub fn discover() -> Option<PathBuf> {
        Self::candidate_paths().into_iter().find(|p| p.is_file())
    }

    pub fn user_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "tempestwx", "tempest-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Resolve settings from a file config and an environment lookup.
///
/// The environment wins over the file. A bucket value that is not an integer
/// is ignored with a warning; any other invalid unit is an error.
pub fn settings_from_sources<F>(file: &FileConfig, env: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |var: &str, file_value: &Option<String>| env(var).or_else(|| file_value.clone());

    let mut overrides = UnitsOverrides::default();
    if let Some(v) = pick("TEMPEST_DEFAULT_UNIT_TEMPERATURE", &file.default_unit_temperature) {
        overrides.temp = Some(unit::<UnitsTemp>("default_unit_temperature", &v)?);
    }
    if let Some(v) = pick("TEMPEST_DEFAULT_UNIT_PRESSURE", &file.default_unit_pressure) {
        overrides.pressure = Some(unit::<UnitsPressure>("default_unit_pressure", &v)?);
    }
    if let Some(v) = pick("TEMPEST_DEFAULT_UNIT_WIND", &file.default_unit_wind) {
        overrides.wind = Some(unit::<UnitsWind>("default_unit_wind", &v)?);
    }
    if let Some(v) = pick("TEMPEST_DEFAULT_UNIT_DISTANCE", &file.default_unit_distance) {
        overrides.distance = Some(unit::<UnitsDistance>("default_unit_distance", &v)?);
    }
    if let Some(v) = pick("TEMPEST_DEFAULT_UNIT_PRECIP", &file.default_units_precip) {
        overrides.precip = Some(unit::<UnitsPrecip>("default_units_precip", &v)?);
    }
    if let Some(v) = pick("TEMPEST_DEFAULT_UNIT_BRIGHTNESS", &file.default_units_brightness) {
        overrides.brightness = Some(unit::<UnitsBrightness>("default_units_brightness", &v)?);
    }
    if let Some(v) = pick(
        "TEMPEST_DEFAULT_UNIT_SOLAR_RADIATION",
        &file.default_units_solar_radiation,
    ) {
        overrides.solar_radiation =
            Some(unit::<UnitsSolarRadiation>("default_units_solar_radiation", &v)?);
    }

    let bucket = match env("TEMPEST_DEFAULT_UNIT_BUCKET_STEP_MINUTES") {
        Some(raw) => Some(EnumLiteral::Str(raw)),
        None => file.default_units_bucket_step_minutes.clone(),
    };
    if let Some(literal) = bucket {
        overrides.bucket = bucket_from(literal)?;
    }

    let api_uri = env(API_URI_ENV)
        .or_else(|| file.api_uri.clone())
        .filter(|uri| !uri.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URI.to_string());
    let token = env(ACCESS_TOKEN_ENV).or_else(|| file.access_token.clone());

    Ok(Settings::new(
        api_uri,
        token,
        overrides.apply(&UnitsDefault::default()),
    ))
}

fn unit<E: crate::model::ApiEnum>(key: &str, value: &str) -> Result<E> {
    validate_enum_param(key, value).with_context(|| format!("Invalid unit setting '{key}'"))
}

fn bucket_from(literal: EnumLiteral) -> Result<Option<Bucket>> {
    let minutes = match literal {
        EnumLiteral::Int(minutes) => minutes,
        EnumLiteral::Str(raw) => match raw.trim().parse::<i64>() {
            Ok(minutes) => minutes,
            Err(_) => {
                warn!(value = %raw, "ignoring non-integer bucket step setting");
                return Ok(None);
            }
        },
    };
    let bucket = validate_enum_param("default_units_bucket_step_minutes", minutes)
        .context("Invalid unit setting 'default_units_bucket_step_minutes'")?;
    Ok(Some(bucket))
}

static SETTINGS: RwLock<Option<Arc<Settings>>> = RwLock::new(None);

/// Process-wide settings, resolved on first use and cached.
pub fn load_settings() -> Result<Arc<Settings>, crate::Error> {
    if let Some(settings) = SETTINGS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return Ok(Arc::clone(settings));
    }
    reload_settings()
}

/// Drop the cached settings and resolve them again.
pub fn reload_settings() -> Result<Arc<Settings>, crate::Error> {
    let file = FileConfig::load()?;
    let settings = Arc::new(settings_from_sources(&file, |var| env::var(var).ok())?);
    *SETTINGS.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&settings));
    Ok(settings)
}
