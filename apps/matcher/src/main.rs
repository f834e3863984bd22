use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matcher::{Config, MatchEngine};

#[derive(Parser)]
#[command(author, version, about = "Score resumes against job descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the skill set from a plain-text file
    Skills {
        /// Plain-text file (resume or job description)
        file: PathBuf,

        /// Also print the filtered noun candidates
        #[arg(long)]
        detailed: bool,
    },

    /// Hybrid match score for a resume against a job description
    Score {
        #[arg(short, long)]
        resume: PathBuf,

        #[arg(short, long)]
        job: PathBuf,
    },

    /// Compare two comma-separated skill lists
    Compare {
        #[arg(long, value_delimiter = ',')]
        resume_skills: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        job_skills: Vec<String>,
    },

    /// Score, skill gaps and tailoring suggestions in one report
    Analyze {
        #[arg(short, long)]
        resume: PathBuf,

        #[arg(short, long)]
        job: PathBuf,

        /// Job title used in tailoring suggestions
        #[arg(short = 't', long)]
        job_title: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    let engine = MatchEngine::from_config(&config).context("Failed to build match engine")?;

    match cli.command {
        Commands::Skills { file, detailed } => {
            let text = read_text(&file)?;
            if detailed {
                print_json(&engine.extract_detailed(&text))
            } else {
                print_json(&engine.extract_skills(&text))
            }
        }
        Commands::Score { resume, job } => {
            let resume = read_text(&resume)?;
            let job = read_text(&job)?;
            print_json(&engine.score(&resume, &job))
        }
        Commands::Compare {
            resume_skills,
            job_skills,
        } => print_json(&engine.compare(&resume_skills, &job_skills)),
        Commands::Analyze {
            resume,
            job,
            job_title,
        } => {
            let resume = read_text(&resume)?;
            let job = read_text(&job)?;
            print_json(&engine.analyze(&resume, &job, job_title.as_deref()))
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
