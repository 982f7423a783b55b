//! Projection configuration
//!
//! Rates, the retirement horizon and the tax regime live in one immutable
//! [`ProjectionConfig`] that is passed into the projector, so alternate rate
//! regimes can be used without touching shared state.
//!
//! ## Configuration Resolution
//!
//! 1. Start from the embedded defaults (`config/projection.toml`, compiled in)
//! 2. If an override file is given, its keys replace the defaults; a named
//!    file that does not exist is an error

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::InvestmentMode;
use crate::tax::{TaxRegime, TaxSlab};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/projection.toml");

/// Immutable settings for the returns projector
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Age at which investing stops; requests must be strictly younger
    pub retirement_age: u32,
    /// Youngest accepted investor
    pub min_age: u32,
    /// Floor on the projection horizon in years
    pub min_years: u32,
    /// Annual NPS return as a decimal
    pub nps_rate: f64,
    /// Annual index fund return as a decimal
    pub index_rate: f64,
    /// Inflation in percent used when a request omits it
    pub default_inflation: f64,
    pub tax: TaxRegime,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            retirement_age: 60,
            min_age: 18,
            min_years: 5,
            nps_rate: 0.0711,
            index_rate: 0.1449,
            default_inflation: 5.5,
            tax: TaxRegime::default(),
        }
    }
}

impl ProjectionConfig {
    /// Load the embedded defaults, overlaid with `override_path` if given.
    ///
    /// A named override file that does not exist is an error.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut config = parse_config(DEFAULT_CONFIG, Self::default())?;

        if let Some(path) = override_path {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            let content = fs::read_to_string(path)?;
            config = parse_config(&content, config)?;
            tracing::info!(path = %path.display(), "Loaded projection config");
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = parse_config(content, Self::default())?;
        config.validate()?;
        Ok(config)
    }

    /// Annual rate for an investment mode
    pub fn rate_for(&self, mode: InvestmentMode) -> f64 {
        match mode {
            InvestmentMode::Nps => self.nps_rate,
            InvestmentMode::Index => self.index_rate,
        }
    }

    /// Projection horizon: years left to retirement, never below `min_years`
    pub fn years_to_retirement(&self, age: u32) -> u32 {
        self.retirement_age
            .saturating_sub(age)
            .max(self.min_years)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_age >= self.retirement_age {
            return Err(Error::Config(format!(
                "min_age ({}) must be below retirement_age ({})",
                self.min_age, self.retirement_age
            )));
        }
        if self.nps_rate < 0.0 || self.index_rate < 0.0 {
            return Err(Error::Config("rates cannot be negative".to_string()));
        }
        if self.default_inflation <= -100.0 {
            return Err(Error::Config(
                "default_inflation must be above -100%".to_string(),
            ));
        }
        self.tax.validate()
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    horizon: Option<RawHorizon>,
    rates: Option<RawRates>,
    tax: Option<RawTax>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHorizon {
    retirement_age: Option<u32>,
    min_age: Option<u32>,
    min_years: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRates {
    nps: Option<f64>,
    index: Option<f64>,
    default_inflation: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTax {
    deduction_cap: Option<f64>,
    wage_fraction: Option<f64>,
    slabs: Option<Vec<TaxSlab>>,
}

/// Apply the keys present in `content` on top of `base`
fn parse_config(content: &str, base: ProjectionConfig) -> Result<ProjectionConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = base;

    if let Some(horizon) = raw.horizon {
        if let Some(age) = horizon.retirement_age {
            config.retirement_age = age;
        }
        if let Some(age) = horizon.min_age {
            config.min_age = age;
        }
        if let Some(years) = horizon.min_years {
            config.min_years = years;
        }
    }

    if let Some(rates) = raw.rates {
        if let Some(rate) = rates.nps {
            config.nps_rate = rate;
        }
        if let Some(rate) = rates.index {
            config.index_rate = rate;
        }
        if let Some(inflation) = rates.default_inflation {
            config.default_inflation = inflation;
        }
    }

    if let Some(tax) = raw.tax {
        if let Some(cap) = tax.deduction_cap {
            config.tax.deduction_cap = cap;
        }
        if let Some(fraction) = tax.wage_fraction {
            config.tax.wage_fraction = fraction;
        }
        if let Some(slabs) = tax.slabs {
            config.tax.slabs = slabs;
        }
    }

    Ok(config)
}
