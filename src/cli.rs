//! CLI argument parsing for lerad

use crate::config::{LearnSettings, PredictSettings, SweepSettings};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Learn a rule set from training cases and save the model
    Learn,
    /// Score test cases against a saved model at one threshold
    Predict,
    /// Score test cases once and evaluate a range of thresholds
    Sweep,
}

#[derive(Parser, Debug)]
#[command(name = "lerad")]
#[command(version, disable_version_flag = true)]
#[command(
    about = "Learning rules for anomaly detection over categorical records",
    long_about = None
)]
pub struct Cli {
    /// Execution mode
    #[arg(short = 'e', long = "exec", value_enum)]
    pub mode: Mode,

    /// Attribute schema file (one attribute name per line)
    #[arg(short = 'a', long = "attributes", value_name = "PATH")]
    pub attributes: PathBuf,

    /// Case file (training cases for learn, test cases otherwise)
    #[arg(short = 't', long = "cases", value_name = "PATH")]
    pub cases: PathBuf,

    /// Model file (written by learn, read otherwise); .msgpack or .mpk selects MessagePack
    #[arg(short = 'm', long = "model", value_name = "PATH")]
    pub model: PathBuf,

    /// Human-readable report file
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Number of case pairs sampled to generate rules
    #[arg(short = 'L', long = "pairs", value_name = "COUNT")]
    pub pairs: Option<usize>,

    /// Maximum rules generated per pair
    #[arg(short = 'M', long = "max-rules", value_name = "COUNT")]
    pub max_rules: Option<usize>,

    /// Number of training cases sampled to score candidate rules
    #[arg(short = 'S', long = "sample-size", value_name = "COUNT")]
    pub sample_size: Option<usize>,

    /// Fraction of cases held out for validation, in [0, 1)
    #[arg(short = 'P', long = "validation-fraction", value_name = "FRACTION")]
    pub validation_fraction: Option<f64>,

    /// Seed for the sampling generator (default: 23)
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Free-text description stored in the learned model's metadata
    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    /// Anomaly score at or above which a case is anomalous
    #[arg(short = 'T', long = "threshold", value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Attribute holding the ground-truth label
    #[arg(short = 'N', long = "normal-attribute", value_name = "NAME")]
    pub normal_attribute: Option<String>,

    /// Label value of normal cases
    #[arg(short = 'V', long = "normal-value", value_name = "VALUE")]
    pub normal_value: Option<String>,

    /// First threshold of a sweep
    #[arg(long = "sweep-start", value_name = "SCORE", allow_negative_numbers = true)]
    pub sweep_start: Option<f64>,

    /// Exclusive upper bound of a sweep
    #[arg(long = "sweep-stop", value_name = "SCORE")]
    pub sweep_stop: Option<f64>,

    /// Threshold increment of a sweep
    #[arg(long = "sweep-step", value_name = "SCORE")]
    pub sweep_step: Option<f64>,

    /// TOML file with [learn], [predict] and [sweep] parameters (flags take precedence)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing output on stderr
    #[arg(long = "debug")]
    pub debug: bool,

    /// Print version
    #[arg(long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl Cli {
    /// Learning parameters given on the command line
    pub fn learn_settings(&self) -> LearnSettings {
        LearnSettings {
            sample_pairs: self.pairs,
            max_rules_per_pair: self.max_rules,
            sample_size: self.sample_size,
            validation_fraction: self.validation_fraction,
            seed: self.seed,
        }
    }

    /// Prediction parameters given on the command line
    pub fn predict_settings(&self) -> PredictSettings {
        PredictSettings {
            threshold: self.threshold,
            normal_attribute: self.normal_attribute.clone(),
            normal_value: self.normal_value.clone(),
        }
    }

    /// Sweep grid given on the command line
    pub fn sweep_settings(&self) -> SweepSettings {
        SweepSettings {
            start: self.sweep_start,
            stop: self.sweep_stop,
            step: self.sweep_step,
        }
    }
}
