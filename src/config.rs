//! JSON-based resource and scenario descriptors, the boundary error type
//! both are reported through, and the source adapters that load them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A single vehicle descriptor: `[cell_nominal_capacity_C, series, parallel, vehicle_power_W]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VehicleDescriptor(pub f64, pub u32, pub u32, pub f64);

/// Resources available to the Builder: vehicles and charging stations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourcesConfig {
    pub vehicles: Vec<VehicleDescriptor>,
    pub charging_stations: Vec<f64>,
}

impl ResourcesConfig {
    /// Parses resources from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read, the JSON is
    /// malformed, or the descriptors violate the schema's constraints.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "resources".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_json_str(&content)
    }

    /// Parses resources from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(|e| ConfigError {
            field: "resources".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the descriptors' numeric constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as a `ConfigError`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vehicles.is_empty() {
            return Err(ConfigError {
                field: "vehicles".into(),
                message: "must contain at least one entry".into(),
            });
        }
        if self.charging_stations.is_empty() {
            return Err(ConfigError {
                field: "charging_stations".into(),
                message: "must contain at least one entry".into(),
            });
        }
        for (i, v) in self.vehicles.iter().enumerate() {
            if v.0 <= 0.0 {
                return Err(ConfigError {
                    field: format!("vehicles[{i}].cell_nominal_capacity_c"),
                    message: "must be > 0".into(),
                });
            }
            if v.1 < 1 {
                return Err(ConfigError {
                    field: format!("vehicles[{i}].series"),
                    message: "must be >= 1".into(),
                });
            }
            if v.2 < 1 {
                return Err(ConfigError {
                    field: format!("vehicles[{i}].parallel"),
                    message: "must be >= 1".into(),
                });
            }
            if v.3 <= 0.0 {
                return Err(ConfigError {
                    field: format!("vehicles[{i}].power"),
                    message: "must be > 0".into(),
                });
            }
        }
        for (i, power) in self.charging_stations.iter().enumerate() {
            if *power <= 0.0 {
                return Err(ConfigError {
                    field: format!("charging_stations[{i}]"),
                    message: "must be > 0".into(),
                });
            }
        }
        Ok(())
    }
}

/// A single scenario step descriptor: `[timelapse_s, load]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScenarioStep(pub f64, pub f64);

/// The scenario file's JSON value may be a bare array of steps or an
/// object wrapping them under a `scenario` key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ScenarioJson {
    Wrapped { scenario: Vec<ScenarioStep> },
    Bare(Vec<ScenarioStep>),
}

/// An ordered sequence of (timelapse, load) scenario steps.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub steps: Vec<ScenarioStep>,
}

impl ScenarioConfig {
    /// Parses a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read, the JSON is
    /// malformed, or the steps violate the schema's constraints.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_json_str(&content)
    }

    /// Parses a scenario from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let parsed: ScenarioJson = serde_json::from_str(s).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: e.to_string(),
        })?;
        let steps = match parsed {
            ScenarioJson::Wrapped { scenario } => scenario,
            ScenarioJson::Bare(steps) => steps,
        };
        let config = Self { steps };
        config.validate()?;
        Ok(config)
    }

    /// Validates the steps' numeric constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as a `ConfigError`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError {
                field: "scenario".into(),
                message: "must contain at least one step".into(),
            });
        }
        for (i, step) in self.steps.iter().enumerate() {
            if step.0 <= 0.0 {
                return Err(ConfigError {
                    field: format!("scenario[{i}].timelapse"),
                    message: "must be > 0".into(),
                });
            }
            if !(0.0..=1.0).contains(&step.1) {
                return Err(ConfigError {
                    field: format!("scenario[{i}].load"),
                    message: "must be in [0.0, 1.0]".into(),
                });
            }
        }
        Ok(())
    }
}

/// A boundary error: malformed JSON or a schema-constraint violation,
/// reported before the simulation starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Dotted/indexed field path (e.g., `"vehicles[2].series"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// An external collaborator that produces a [`ResourcesConfig`].
///
/// The only two implementations are a JSON file on disk and an in-memory
/// descriptor supplied directly (the latter used heavily by tests and by
/// generators that build resources programmatically rather than from a
/// file).
pub trait ResourceSource {
    fn load(&self) -> Result<ResourcesConfig, ConfigError>;
}

/// Loads resources from a JSON file at the given path.
pub struct JsonFileResourceSource {
    pub path: PathBuf,
}

impl JsonFileResourceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResourceSource for JsonFileResourceSource {
    fn load(&self) -> Result<ResourcesConfig, ConfigError> {
        ResourcesConfig::from_json_file(&self.path)
    }
}

/// Wraps an already-built [`ResourcesConfig`], skipping the JSON boundary
/// entirely.
pub struct DirectResourceSource {
    pub config: ResourcesConfig,
}

impl DirectResourceSource {
    pub fn new(config: ResourcesConfig) -> Self {
        Self { config }
    }
}

impl ResourceSource for DirectResourceSource {
    fn load(&self) -> Result<ResourcesConfig, ConfigError> {
        Ok(self.config.clone())
    }
}

/// An external collaborator that produces a [`ScenarioConfig`].
pub trait ScenarioSource {
    fn load(&self) -> Result<ScenarioConfig, ConfigError>;
}

/// Loads a scenario from a JSON file at the given path.
pub struct JsonFileScenarioSource {
    pub path: PathBuf,
}

impl JsonFileScenarioSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScenarioSource for JsonFileScenarioSource {
    fn load(&self) -> Result<ScenarioConfig, ConfigError> {
        ScenarioConfig::from_json_file(&self.path)
    }
}

/// Wraps an already-built [`ScenarioConfig`], skipping the JSON boundary
/// entirely.
pub struct DirectScenarioSource {
    pub config: ScenarioConfig,
}

impl DirectScenarioSource {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }
}

impl ScenarioSource for DirectScenarioSource {
    fn load(&self) -> Result<ScenarioConfig, ConfigError> {
        Ok(self.config.clone())
    }
}
