// src/pipeline/config.rs

use crate::error::ConfigError;
use crate::model::{AbcClass, Supplier, XyzClass};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Every tunable constant of the classification and policy stages.
///
/// Built once per run and only ever read afterwards. Any subset of the
/// fields can be set under the `policy:` section of a YAML file; the rest
/// keep the values from `Default`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Cumulative value share upper bounds for A and B.
    pub abc_cuts: (f64, f64),
    /// CV upper bounds for X and Y.
    pub xyz_cuts: (f64, f64),

    pub z_by_abc: BTreeMap<AbcClass, f64>,
    pub z_by_xyz: BTreeMap<XyzClass, f64>,
    pub z_default: f64,

    pub lead_time_defaults: BTreeMap<Supplier, u32>,
    /// Site overrides keyed by supplier name (trimmed, upper-cased).
    #[serde(deserialize_with = "deserialize_supplier_keys")]
    pub lead_time_by_supplier: BTreeMap<String, u32>,
    pub lead_time_default: u32,

    pub order_cost: f64,
    pub holding_rate: f64, // annual, fraction of unit cost
    pub use_eoq: bool,

    /// Divisor turning monthly demand into daily demand.
    pub days_per_month: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            abc_cuts: (0.80, 0.95),
            xyz_cuts: (0.50, 1.00),
            z_by_abc: BTreeMap::from([(AbcClass::A, 1.96), (AbcClass::B, 1.65), (AbcClass::C, 1.28)]),
            z_by_xyz: BTreeMap::from([(XyzClass::X, 1.65), (XyzClass::Y, 1.44), (XyzClass::Z, 1.28)]),
            z_default: 1.65,
            lead_time_defaults: BTreeMap::from([
                (Supplier::Heli, 90),
                (Supplier::Tvh, 45),
                (Supplier::Nacional, 3),
            ]),
            lead_time_by_supplier: BTreeMap::new(),
            lead_time_default: 15,
            order_cost: 15000.0,
            holding_rate: 0.25,
            use_eoq: true,
            days_per_month: 30.0,
        }
    }
}

/// On-disk layout. Other top-level sections are ignored.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    policy: PolicyConfig,
}

fn deserialize_supplier_keys<'de, D>(deserializer: D) -> Result<BTreeMap<String, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, u32>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|(k, v)| (k.trim().to_uppercase(), v))
        .collect())
}

impl PolicyConfig {
    /// Parses the YAML text of a config file. `origin` only labels errors.
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = if text.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
                path: origin.to_string(),
                source,
            })?
        };
        file.policy.validate()?;
        Ok(file.policy)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::NotFound(shown));
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        tracing::info!("loading policy config from {}", shown);
        Self::from_yaml_str(&text, &shown)
    }

    /// An explicit path must exist. Without one, `config.yaml` in the
    /// working directory is used when present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)
                } else {
                    tracing::debug!("no {} found, using default policy", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (a, b) = self.abc_cuts;
        if !(0.0 < a && a <= b && b <= 1.0) {
            return Err(invalid("abc_cuts", format!("expected 0 < a <= b <= 1, got ({}, {})", a, b)));
        }
        let (x, y) = self.xyz_cuts;
        if !(0.0 <= x && x <= y) {
            return Err(invalid("xyz_cuts", format!("expected 0 <= x <= y, got ({}, {})", x, y)));
        }
        for (key, value) in [
            ("order_cost", self.order_cost),
            ("holding_rate", self.holding_rate),
            ("z_default", self.z_default),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(key, format!("must be a non-negative number, got {}", value)));
            }
        }
        if !(self.days_per_month > 0.0) {
            return Err(invalid("days_per_month", "must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: String) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message,
    }
}
