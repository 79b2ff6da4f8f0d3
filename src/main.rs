use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use warpskill_dtw::{
    BandConstraint, DEFAULT_MIN_BAND_WIDTH, Dtw, DtwScore, Evaluation, SeriesRole, SkillScore,
    TimeSeriesView,
};
use warpskill_io::{SeriesReader, SeriesTable};

#[derive(Parser)]
#[command(name = "warpskill")]
#[command(about = "Banded DTW alignment cost and skill score for modelled time series")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress log output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for ensemble scoring (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Input file and the observed series every model is compared against.
#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Path to the input CSV file (`series_id,t0,t1,...`, one row per series)
    #[arg(long)]
    data: PathBuf,

    /// Series ID of the observation
    #[arg(long)]
    observed: String,
}

/// Sakoe-Chiba band options shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct BandArgs {
    /// Minimum band width; the effective width is max(this, |n - m|)
    #[arg(long, default_value_t = DEFAULT_MIN_BAND_WIDTH)]
    min_band_width: usize,

    /// Disable the band and compute the full table
    #[arg(long, default_value_t = false, conflicts_with = "min_band_width")]
    unconstrained: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the DTW score of one or more models against the observation
    Score {
        #[command(flatten)]
        input: InputArgs,

        /// Series ID of a model (repeatable)
        #[arg(long = "model", required = true)]
        models: Vec<String>,

        #[command(flatten)]
        band: BandArgs,
    },

    /// Compute skill scores of one or more models relative to a reference
    Skill {
        #[command(flatten)]
        input: InputArgs,

        /// Series ID of a model (repeatable)
        #[arg(long = "model", required = true)]
        models: Vec<String>,

        /// Series ID of the reference scenario
        #[arg(long)]
        reference: String,

        #[command(flatten)]
        band: BandArgs,
    },

    /// Align one model against the observation and emit the full alignment
    Align {
        #[command(flatten)]
        input: InputArgs,

        /// Series ID of the model
        #[arg(long)]
        model: String,

        /// Series ID of the reference scenario (adds a skill score)
        #[arg(long)]
        reference: Option<String>,

        #[command(flatten)]
        band: BandArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct ScoreOutput {
    observed: String,
    band: BandOutput,
    results: Vec<ModelScoreOutput>,
}

#[derive(Serialize)]
struct ModelScoreOutput {
    model: String,
    score: DtwScore,
}

#[derive(Serialize)]
struct SkillOutput {
    observed: String,
    reference: String,
    band: BandOutput,
    results: Vec<ModelSkillOutput>,
}

#[derive(Serialize)]
struct ModelSkillOutput {
    model: String,
    #[serde(flatten)]
    skill: SkillScore,
}

#[derive(Serialize)]
struct AlignOutput {
    observed: String,
    model: String,
    reference: Option<String>,
    band: BandOutput,
    #[serde(flatten)]
    evaluation: Evaluation,
}

#[derive(Serialize)]
struct BandOutput {
    /// `None` when unconstrained.
    min_width: Option<usize>,
}

impl From<BandConstraint> for BandOutput {
    fn from(constraint: BandConstraint) -> Self {
        match constraint {
            BandConstraint::Unconstrained => Self { min_width: None },
            BandConstraint::SakoeChiba { min_width } => Self {
                min_width: Some(min_width),
            },
        }
    }
}

fn build_dtw(band: &BandArgs) -> Result<Dtw> {
    if band.unconstrained {
        return Ok(Dtw::unconstrained());
    }
    Dtw::with_min_band_width(band.min_band_width).context("invalid --min-band-width")
}

fn load(input: &InputArgs) -> Result<SeriesTable> {
    SeriesReader::new(&input.data)
        .read()
        .with_context(|| format!("failed to read {}", input.data.display()))
}

fn lookup<'a>(table: &'a SeriesTable, id: &str, role: SeriesRole) -> Result<TimeSeriesView<'a>> {
    let series = table
        .get(id)
        .with_context(|| format!("cannot resolve {role} series"))?;
    info!(%role, id, len = series.len(), "series selected");
    Ok(series.as_view())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Score {
            input,
            models,
            band,
        } => {
            let dtw = build_dtw(&band)?;
            let table = load(&input)?;
            let observed = lookup(&table, &input.observed, SeriesRole::Observed)?;

            let mut results = Vec::with_capacity(models.len());
            for id in models {
                let model = lookup(&table, &id, SeriesRole::Model)?;
                let score = dtw.score(observed, model);
                info!(model = %id, %score, "model scored");
                results.push(ModelScoreOutput { model: id, score });
            }

            print_json(&ScoreOutput {
                observed: input.observed,
                band: dtw.constraint().into(),
                results,
            })?;
        }

        Command::Skill {
            input,
            models,
            reference,
            band,
        } => {
            let dtw = build_dtw(&band)?;
            let table = load(&input)?;
            let observed = lookup(&table, &input.observed, SeriesRole::Observed)?;
            let reference_series = lookup(&table, &reference, SeriesRole::Reference)?;
            let views = models
                .iter()
                .map(|id| lookup(&table, id, SeriesRole::Model))
                .collect::<Result<Vec<_>>>()?;

            let skills = dtw
                .skill_scores(observed, &views, reference_series)
                .with_context(|| format!("cannot score skill against reference {reference}"))?;
            for (id, skill) in models.iter().zip(&skills) {
                info!(model = %id, ssf = %skill, "skill scored");
            }

            print_json(&SkillOutput {
                observed: input.observed,
                reference,
                band: dtw.constraint().into(),
                results: models
                    .into_iter()
                    .zip(skills)
                    .map(|(model, skill)| ModelSkillOutput { model, skill })
                    .collect(),
            })?;
        }

        Command::Align {
            input,
            model,
            reference,
            band,
        } => {
            let dtw = build_dtw(&band)?;
            let table = load(&input)?;
            let observed = lookup(&table, &input.observed, SeriesRole::Observed)?;
            let model_series = lookup(&table, &model, SeriesRole::Model)?;
            let reference_series = reference
                .as_deref()
                .map(|id| lookup(&table, id, SeriesRole::Reference))
                .transpose()?;

            let evaluation = dtw
                .evaluate(observed, model_series, reference_series)
                .context("alignment failed")?;
            info!(
                score = %evaluation.score,
                path_len = evaluation.path.len(),
                path_cost = evaluation.path_cost,
                "alignment complete"
            );

            print_json(&AlignOutput {
                observed: input.observed,
                model,
                reference,
                band: dtw.constraint().into(),
                evaluation,
            })?;
        }
    }

    Ok(())
}
