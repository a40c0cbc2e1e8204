//! Run configuration for the learn, predict and sweep modes
//!
//! Parameters come from command-line flags and, optionally, a TOML file:
//!
//! ```toml
//! [learn]
//! sample_pairs = 1000
//! max_rules_per_pair = 4
//! sample_size = 100
//! validation_fraction = 0.1
//! seed = 23
//!
//! [predict]
//! threshold = 250.0
//! normal_attribute = "class"
//! normal_value = "normal"
//!
//! [sweep]
//! start = 0.0
//! stop = 10000.0
//! step = 100.0
//! ```
//!
//! Flags win over the file. A parameter missing from both is a configuration
//! error; only the seed has a built-in default.

use crate::error::{LeradError, Result};
use crate::learning::DEFAULT_SEED;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Parameters of one learning run
#[derive(Debug, Clone, PartialEq)]
pub struct LearnConfig {
    /// Number of case pairs drawn to generate candidate rules (L)
    pub sample_pairs: usize,
    /// Maximum rules generated per pair (M)
    pub max_rules_per_pair: usize,
    /// Number of training cases in the sample set (S)
    pub sample_size: usize,
    /// Fraction of cases, taken from the front, held out for validation (P)
    pub validation_fraction: f64,
    /// Seed of the sampling generator
    pub seed: u64,
}

impl LearnConfig {
    /// Validate parameters that do not depend on the data
    pub fn validate(&self) -> Result<()> {
        if !self.validation_fraction.is_finite()
            || !(0.0..1.0).contains(&self.validation_fraction)
        {
            return Err(LeradError::config(format!(
                "validation_fraction must be in [0, 1), got {}",
                self.validation_fraction
            )));
        }

        if self.max_rules_per_pair == 0 {
            return Err(LeradError::config("max_rules_per_pair must be >= 1"));
        }

        if self.sample_pairs > 0 && self.sample_size < 2 {
            return Err(LeradError::config(format!(
                "sample_size must be >= 2 to draw case pairs, got {}",
                self.sample_size
            )));
        }

        Ok(())
    }

    /// Number of leading cases reserved for validation out of `total`
    pub fn validation_count(&self, total: usize) -> usize {
        (self.validation_fraction * total as f64).floor() as usize
    }
}

/// Ground truth used to score predictions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalLabel {
    /// Attribute carrying the label
    pub attribute: String,
    /// Label value of normal cases
    pub value: String,
}

/// Parameters of one prediction run
#[derive(Debug, Clone, PartialEq)]
pub struct PredictConfig {
    /// Anomaly score at or above which a case is flagged anomalous (T)
    pub threshold: f64,
    pub label: NormalLabel,
}

impl PredictConfig {
    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_nan() {
            return Err(LeradError::config("threshold must be a number"));
        }
        Ok(())
    }
}

/// Upper bound on the number of thresholds in one sweep
pub const MAX_SWEEP_POINTS: usize = 1_000_000;

/// Threshold grid evaluated in one sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub start: f64,
    /// Exclusive upper bound
    pub stop: f64,
    pub step: f64,
    pub label: NormalLabel,
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.start.is_finite() && self.stop.is_finite() && self.step.is_finite()) {
            return Err(LeradError::config("sweep bounds must be finite numbers"));
        }
        if self.step <= 0.0 {
            return Err(LeradError::config(format!(
                "sweep step must be positive, got {}",
                self.step
            )));
        }
        if self.stop <= self.start {
            return Err(LeradError::config(format!(
                "sweep stop ({}) must exceed start ({})",
                self.stop, self.start
            )));
        }
        let points = ((self.stop - self.start) / self.step).ceil();
        if points > MAX_SWEEP_POINTS as f64 {
            return Err(LeradError::config(format!(
                "sweep grid has {} thresholds, limit is {}",
                points, MAX_SWEEP_POINTS
            )));
        }
        Ok(())
    }

    /// Thresholds `start, start + step, ...` below `stop`
    pub fn thresholds(&self) -> Vec<f64> {
        let mut thresholds = Vec::new();
        let mut k = 0u32;
        loop {
            let t = self.start + f64::from(k) * self.step;
            if t >= self.stop {
                break;
            }
            thresholds.push(t);
            k += 1;
        }
        thresholds
    }
}

/// Learning parameters from one source, any of which may be absent
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LearnSettings {
    pub sample_pairs: Option<usize>,
    pub max_rules_per_pair: Option<usize>,
    pub sample_size: Option<usize>,
    pub validation_fraction: Option<f64>,
    pub seed: Option<u64>,
}

impl LearnSettings {
    /// Fill parameters absent here from `fallback`
    pub fn or(self, fallback: LearnSettings) -> Self {
        Self {
            sample_pairs: self.sample_pairs.or(fallback.sample_pairs),
            max_rules_per_pair: self.max_rules_per_pair.or(fallback.max_rules_per_pair),
            sample_size: self.sample_size.or(fallback.sample_size),
            validation_fraction: self.validation_fraction.or(fallback.validation_fraction),
            seed: self.seed.or(fallback.seed),
        }
    }

    pub fn resolve(self) -> Result<LearnConfig> {
        let config = LearnConfig {
            sample_pairs: required(self.sample_pairs, "sample pairs (-L)")?,
            max_rules_per_pair: required(self.max_rules_per_pair, "max rules per pair (-M)")?,
            sample_size: required(self.sample_size, "sample size (-S)")?,
            validation_fraction: required(self.validation_fraction, "validation fraction (-P)")?,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Prediction parameters from one source
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictSettings {
    pub threshold: Option<f64>,
    pub normal_attribute: Option<String>,
    pub normal_value: Option<String>,
}

impl PredictSettings {
    pub fn or(self, fallback: PredictSettings) -> Self {
        Self {
            threshold: self.threshold.or(fallback.threshold),
            normal_attribute: self.normal_attribute.or(fallback.normal_attribute),
            normal_value: self.normal_value.or(fallback.normal_value),
        }
    }

    pub fn resolve(self) -> Result<PredictConfig> {
        let config = PredictConfig {
            threshold: required(self.threshold, "threshold (-T)")?,
            label: NormalLabel {
                attribute: required(self.normal_attribute, "normal attribute (-N)")?,
                value: required(self.normal_value, "normal value (-V)")?,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Sweep parameters from one source
///
/// The normal label is shared with `[predict]` in the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepSettings {
    pub start: Option<f64>,
    pub stop: Option<f64>,
    pub step: Option<f64>,
}

impl SweepSettings {
    pub fn or(self, fallback: SweepSettings) -> Self {
        Self {
            start: self.start.or(fallback.start),
            stop: self.stop.or(fallback.stop),
            step: self.step.or(fallback.step),
        }
    }

    pub fn resolve(self, label: PredictSettings) -> Result<SweepConfig> {
        let config = SweepConfig {
            start: required(self.start, "sweep start (--sweep-start)")?,
            stop: required(self.stop, "sweep stop (--sweep-stop)")?,
            step: required(self.step, "sweep step (--sweep-step)")?,
            label: NormalLabel {
                attribute: required(label.normal_attribute, "normal attribute (-N)")?,
                value: required(label.normal_value, "normal value (-V)")?,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Contents of a TOML run configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub learn: LearnSettings,
    #[serde(default)]
    pub predict: PredictSettings,
    #[serde(default)]
    pub sweep: SweepSettings,
}

impl ConfigFile {
    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            LeradError::Configuration(msg) => {
                LeradError::config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LeradError::config(e.to_string()))
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| LeradError::config(format!("missing required parameter: {}", name)))
}
