//! Command-line collaborator for the siterank engine.
//!
//! Loads candidate sites from CSV, assembles a weight vector from an
//! optional JSON file plus per-flag overrides, evaluates the batch, prints
//! a summary, and optionally writes the ranked table back out as CSV.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fs::File;
use std::str::FromStr;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use eyre::{WrapErr, eyre};
use siterank_core::{Criterion, RankedBatch, WeightVector, export};
use siterank_mcda::{DatasetId, SiteEvaluator};

/// Rank candidate evacuation sites by weighted multi-criteria analysis.
#[derive(Debug, Parser)]
#[command(name = "siterank", version, about)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a CSV of candidate sites and print the ranking.
    Evaluate(EvaluateArgs),
}

/// Arguments for the `evaluate` subcommand.
#[derive(Debug, clap::Args)]
pub struct EvaluateArgs {
    /// Input CSV of candidate sites.
    #[arg(long)]
    pub input: Utf8PathBuf,

    /// Output CSV for the ranked result; omitted means summary only.
    #[arg(long)]
    pub output: Option<Utf8PathBuf>,

    /// JSON file mapping criterion names to weights.
    #[arg(long)]
    pub weights: Option<Utf8PathBuf>,

    /// Override a single weight, e.g. `--set risk_level=0.4`. Repeatable.
    #[arg(long = "set", value_name = "CRITERION=WEIGHT")]
    pub overrides: Vec<String>,

    /// Number of top-ranked sites shown in the summary.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

/// Parse and dispatch a command.
///
/// # Errors
/// Returns any failure from reading the input, assembling the weights,
/// evaluating, or writing the output.
pub fn run(cli: &Cli) -> eyre::Result<()> {
    match &cli.command {
        Command::Evaluate(args) => evaluate(args),
    }
}

fn evaluate(args: &EvaluateArgs) -> eyre::Result<()> {
    let weights = assemble_weights(args.weights.as_deref(), &args.overrides)?;
    warn_on_unbalanced_sum(&weights);

    let sites = export::read_sites_path(&args.input)
        .wrap_err_with(|| format!("failed to load sites from {}", args.input))?;
    let dataset = DatasetId::new(args.input.as_str(), sites.len());

    let mut evaluator = SiteEvaluator::new();
    let ranked = evaluator
        .evaluate(&dataset, &sites, &weights)
        .wrap_err("evaluation failed")?;

    print_summary(&ranked, args.top);

    if let Some(output) = &args.output {
        export::write_ranked_path(&ranked, output)
            .wrap_err_with(|| format!("failed to write ranked CSV to {output}"))?;
        log::info!("wrote {} ranked sites to {output}", ranked.len());
    }
    Ok(())
}

/// Build the weight vector: the JSON file (or the documented defaults)
/// with `--set` overrides applied on top.
fn assemble_weights(
    file: Option<&camino::Utf8Path>,
    overrides: &[String],
) -> eyre::Result<WeightVector> {
    let mut weights = match file {
        Some(path) => {
            let reader = File::open(path.as_std_path())
                .wrap_err_with(|| format!("failed to open weight file {path}"))?;
            let entries: BTreeMap<String, f64> = serde_json::from_reader(reader)
                .wrap_err_with(|| format!("failed to parse weight file {path}"))?;
            WeightVector::validate(entries)?
        }
        None => WeightVector::default(),
    };

    for entry in overrides {
        let (criterion, value) = parse_override(entry)?;
        weights.set_weight(criterion, value)?;
    }
    Ok(weights)
}

/// Parse one `criterion=weight` override.
fn parse_override(entry: &str) -> eyre::Result<(Criterion, f64)> {
    let (key, value) = entry
        .split_once('=')
        .ok_or_else(|| eyre!("expected CRITERION=WEIGHT, got '{entry}'"))?;
    let criterion = Criterion::from_str(key.trim()).map_err(|message| eyre!(message))?;
    let weight: f64 = value
        .trim()
        .parse()
        .wrap_err_with(|| format!("invalid weight '{value}' for {criterion}"))?;
    Ok((criterion, weight))
}

#[expect(
    clippy::print_stderr,
    reason = "the weight-sum warning is part of the user interface"
)]
fn warn_on_unbalanced_sum(weights: &WeightVector) {
    if !weights.sum_is_balanced() {
        eprintln!(
            "warning: weights sum to {:.2} (recommended: 1.00); scores are not rescaled",
            weights.sum()
        );
    }
}

#[expect(
    clippy::print_stdout,
    reason = "the ranking summary is the command's output"
)]
fn print_summary(ranked: &RankedBatch, top: usize) {
    println!(
        "{} sites evaluated, {} recommended, mean score {:.3}",
        ranked.len(),
        ranked.recommended_count(),
        ranked.mean_score()
    );
    for site in ranked.top(top) {
        let marker = if site.recommended { "*" } else { " " };
        println!(
            "#{:<3} {marker} {:<30} {:.3}",
            site.rank, site.site.name, site.total_score
        );
    }
}
