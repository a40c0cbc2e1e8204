use anyhow::{Context, Result};
use clap::Parser;
use lerad::cli::{Cli, Mode};
use lerad::config::ConfigFile;
use lerad::dataset::{load_cases, AttributeSchema, Case};
use lerad::learning::{learn, Sampler};
use lerad::model_store::{load_rules, save_model, ModelFile, ModelMetadata};
use lerad::prediction::{predict, score_cases, sweep, GroundTruth};
use lerad::{report, LeradError};
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Attach a usage hint to parameter errors
fn usage_hint(err: LeradError) -> anyhow::Error {
    if err.is_configuration() {
        anyhow::anyhow!("{}\nRun 'lerad --help' for usage.", err)
    } else {
        err.into()
    }
}

fn load_inputs(args: &Cli) -> Result<(AttributeSchema, Vec<Case>)> {
    let schema = AttributeSchema::from_file(&args.attributes)
        .with_context(|| format!("failed to load attributes from {}", args.attributes.display()))?;
    let cases = load_cases(&args.cases, &schema)
        .with_context(|| format!("failed to load cases from {}", args.cases.display()))?;
    Ok((schema, cases))
}

fn run_learn(args: &Cli, file: ConfigFile) -> Result<()> {
    let config = args
        .learn_settings()
        .or(file.learn)
        .resolve()
        .map_err(usage_hint)?;
    let (schema, cases) = load_inputs(args)?;

    let mut sampler = Sampler::new(config.seed);
    let outcome = learn(&cases, &config, &mut sampler).map_err(usage_hint)?;

    let mut metadata = ModelMetadata::new(
        &schema,
        outcome.stats.training_cases,
        outcome.stats.validation_cases,
    )
    .with_hyperparameter("sample_pairs", config.sample_pairs)
    .with_hyperparameter("max_rules_per_pair", config.max_rules_per_pair)
    .with_hyperparameter("sample_size", config.sample_size)
    .with_hyperparameter("validation_fraction", config.validation_fraction)
    .with_hyperparameter("seed", config.seed);
    if let Some(description) = &args.description {
        metadata = metadata.with_description(description.as_str());
    }
    save_model(&ModelFile::new(&outcome.rules, metadata), &args.model)
        .with_context(|| format!("failed to save model to {}", args.model.display()))?;

    fs::write(&args.output, report::rule_listing(&outcome.rules, &schema))
        .with_context(|| format!("failed to write report {}", args.output.display()))?;
    Ok(())
}

fn run_predict(args: &Cli, file: ConfigFile) -> Result<()> {
    let config = args
        .predict_settings()
        .or(file.predict)
        .resolve()
        .map_err(usage_hint)?;
    let (schema, cases) = load_inputs(args)?;
    let truth = GroundTruth::resolve(&config.label, &schema).map_err(usage_hint)?;
    let rules = load_rules(&args.model, &schema)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;

    let summary = predict(&rules, &cases, &truth, config.threshold);
    fs::write(&args.output, report::prediction_report(&summary))
        .with_context(|| format!("failed to write report {}", args.output.display()))?;

    println!("{}", report::stdout_line(&summary));
    Ok(())
}

fn run_sweep(args: &Cli, file: ConfigFile) -> Result<()> {
    let config = args
        .sweep_settings()
        .or(file.sweep)
        .resolve(args.predict_settings().or(file.predict))
        .map_err(usage_hint)?;
    let (schema, cases) = load_inputs(args)?;
    let truth = GroundTruth::resolve(&config.label, &schema).map_err(usage_hint)?;
    let rules = load_rules(&args.model, &schema)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;

    let thresholds = config.thresholds();
    tracing::info!("Sweeping {} thresholds", thresholds.len());
    let summaries = sweep(&score_cases(&rules, &cases, &truth), &thresholds);
    fs::write(&args.output, report::sweep_table(&summaries))
        .with_context(|| format!("failed to write report {}", args.output.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let file = match &args.config {
        Some(path) => ConfigFile::from_file(path).map_err(usage_hint)?,
        None => ConfigFile::default(),
    };

    match args.mode {
        Mode::Learn => run_learn(&args, file),
        Mode::Predict => run_predict(&args, file),
        Mode::Sweep => run_sweep(&args, file),
    }
}
