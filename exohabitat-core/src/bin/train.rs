//! Offline training job
//!
//! Reads raw observations from a JSONL file (one flat record per line),
//! runs the pipeline, and publishes the selected model as a new artifact
//! version.
//!
//! Usage:
//!   train <records.jsonl> [--artifacts DIR] [--seed N]
//!         [--test-fraction F] [--impute POLICY]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::process::ExitCode;

use exohabitat_core::{artifacts::ArtifactStore, ImputePolicy, PipelineConfig, RawObservation};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("training failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (input, config) = parse_args()?;

    log::info!("reading observations from {input}");
    let file = File::open(&input)?;
    let mut raws: Vec<RawObservation> = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(raw) => raws.push(raw),
            Err(e) => log::warn!("line {}: unparseable record ({e})", line_no + 1),
        }
    }
    log::info!("loaded {} observations", raws.len());

    let (outcome, dataset) = exohabitat_core::run_training(&raws, &config)?;
    print!("{}", outcome.report());

    let store = ArtifactStore::open(&config.artifact_dir)?;
    let version = store.publish(&outcome.model, &dataset.scaler)?;
    println!(
        "published {version} to {} ({} train / {} test rows, seed {})",
        config.artifact_dir.display(),
        dataset.n_train(),
        dataset.n_test(),
        config.seed,
    );
    Ok(())
}

fn parse_args() -> Result<(String, PipelineConfig), String> {
    let mut args = std::env::args().skip(1);
    let mut input: Option<String> = None;
    let mut config = PipelineConfig::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--artifacts" => {
                config.artifact_dir = args.next().ok_or("--artifacts needs a value")?.into();
            }
            "--seed" => {
                config.seed = args
                    .next()
                    .ok_or("--seed needs a value")?
                    .parse()
                    .map_err(|e| format!("bad seed: {e}"))?;
            }
            "--test-fraction" => {
                config.test_fraction = args
                    .next()
                    .ok_or("--test-fraction needs a value")?
                    .parse()
                    .map_err(|e| format!("bad fraction: {e}"))?;
            }
            "--impute" => {
                let value = args.next().ok_or("--impute needs a value")?;
                config.impute_policy = ImputePolicy::parse(&value)
                    .ok_or_else(|| format!("unknown imputation policy: {value}"))?;
            }
            other if input.is_none() && !other.starts_with('-') => {
                input = Some(other.to_string());
            }
            other => return Err(format!("unexpected argument: {other}")),
        }
    }

    let input = input.ok_or("usage: train <records.jsonl> [--artifacts DIR] [--seed N] [--test-fraction F] [--impute POLICY]")?;
    Ok((input, config))
}
