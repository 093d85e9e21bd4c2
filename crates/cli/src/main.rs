//! Copeplan CLI - pick coping exercises that fit right now.

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use copeplan_core::{starter_catalog, validate_catalog, Exercise, UserConstraints};
use copeplan_selector::{EngineConfig, SelectionEngine, SelectionReport, StrategySelector};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "copeplan")]
#[command(about = "Pick coping exercises that fit your time, energy and mood", long_about = None)]
struct Cli {
    /// Catalog JSON file (a list of exercises); the built-in catalog if omitted
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Engine config JSON file (scoring weights, top_n)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a plan that fits the time budget
    Plan {
        #[command(flatten)]
        situation: Situation,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the best-ranked exercises, ignoring time
    Top {
        #[command(flatten)]
        situation: Situation,
        /// How many to show
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,
    },
    /// Show how one exercise scores
    Score {
        /// Exercise ID
        id: String,
        #[command(flatten)]
        situation: Situation,
    },
    /// List the catalog
    Catalog,
}

/// The user's current situation.
#[derive(Args)]
struct Situation {
    /// Minutes available
    #[arg(long)]
    time: u32,
    /// Energy level (1-10)
    #[arg(long, default_value = "5")]
    energy: u8,
    /// Current mood, e.g. Anxious
    #[arg(long)]
    mood: String,
    /// Stress level (1-10)
    #[arg(long, default_value = "5")]
    stress: u8,
}

impl Situation {
    fn constraints(&self) -> Result<UserConstraints> {
        UserConstraints::new(self.time, self.energy, self.mood.clone(), self.stress)
            .context("Invalid situation")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = load_catalog(cli.catalog.as_deref()).await?;
    let config = load_config(cli.config.as_deref()).await?;
    let engine = SelectionEngine::with_config(config);

    match cli.command {
        Commands::Plan { situation, json } => {
            let constraints = situation.constraints()?;
            let report = engine.plan_checked(&catalog, &constraints)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Top { situation, count } => {
            let constraints = situation.constraints()?;
            let selector = engine.selector();
            let top = selector.top_recommendations(&catalog, &constraints, count);

            println!("Top {} of {}", top.len(), catalog.len());
            for (i, e) in top.iter().enumerate() {
                let score = selector.score(e, &constraints);
                println!("  {}. {} | {} min | score {:.2} | {:.3}/min",
                    i + 1,
                    e.title,
                    e.duration_minutes,
                    score,
                    score / f64::from(e.duration_minutes),
                );
            }
        }
        Commands::Score { id, situation } => {
            let constraints = situation.constraints()?;
            let Some(exercise) = catalog.iter().find(|e| e.id.as_str() == id) else {
                println!("Exercise not found: {}", id);
                return Ok(());
            };

            let b = engine.selector().score_breakdown(exercise, &constraints);
            println!("Exercise: {} ({})", exercise.title, exercise.id);
            println!("  Base benefit:      {:+.2}", b.base_benefit);
            println!("  Mood bonus:        {:+.2}", b.mood_bonus);
            println!("  Energy adjustment: {:+.2}", b.energy_adjustment);
            println!("  Editorial bonus:   {:+.2}", b.editorial_bonus);
            println!("  Popularity bonus:  {:+.2}", b.popularity_bonus);
            println!("  Total:             {:.2}", b.total());
        }
        Commands::Catalog => {
            println!("Exercises ({})", catalog.len());
            for e in &catalog {
                println!("  {} | {} | {} min | {} | {:.1}/5{}",
                    e.id,
                    e.category,
                    e.duration_minutes,
                    e.difficulty,
                    e.benefit_rating,
                    if e.recommended { " | pick" } else { "" },
                );
            }
        }
    }

    Ok(())
}

async fn load_catalog(path: Option<&Path>) -> Result<Vec<Exercise>> {
    let Some(path) = path else {
        debug!("No catalog file given, using the built-in catalog");
        return Ok(starter_catalog());
    };

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog: Vec<Exercise> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
    validate_catalog(&catalog)
        .with_context(|| format!("Invalid catalog {}", path.display()))?;

    info!("Loaded {} exercises from {}", catalog.len(), path.display());
    Ok(catalog)
}

async fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config.weights.validate()
        .with_context(|| format!("Invalid config {}", path.display()))?;

    Ok(config)
}

fn print_report(report: &SelectionReport) {
    println!("{}", report.explanation);
    println!();
    println!("Stats");
    println!("  Evaluated: {}", report.stats.total_exercises_evaluated);
    println!("  Selected:  {}", report.stats.exercises_selected);
    println!("  Benefit:   {:.1}", report.stats.total_benefit);
    println!("  Time:      {}/{} min ({:.0}%)",
        report.stats.total_time_minutes,
        report.stats.available_time_minutes,
        report.stats.budget_utilization * 100.0,
    );

    if !report.top.is_empty() {
        println!();
        println!("Top picks regardless of time");
        for e in &report.top {
            println!("  {} | {} min", e.title, e.duration_minutes);
        }
    }
}
