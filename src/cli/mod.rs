//! CLI parser and command dispatch.

mod explain;
mod extract;
mod helpers;
mod rank;
mod tools;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "quotewise")]
#[command(about = "Insurance quote extraction, scoring, and comparison")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract quote records from documents without ranking them
    Extract {
        /// Quote files (.pdf, .csv, .xlsx, .xls, .json)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit records as JSON instead of a summary listing
        #[arg(long)]
        json: bool,
    },

    /// Extract, score, and rank quotes into a comparison table
    Rank {
        /// Quote files (.pdf, .csv, .xlsx, .xls, .json)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        assumptions: Assumptions,

        /// Emit the ranked table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank quotes and explain the recommendation in plain language
    Explain {
        /// Quote files (.pdf, .csv, .xlsx, .xls, .json)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Question to answer about the quotes
        #[arg(short, long, default_value = "Which plan is best for this family?")]
        question: String,

        #[command(flatten)]
        assumptions: Assumptions,

        /// Skip the narrator service and use the local summary
        #[arg(long)]
        local: bool,
    },

    /// Check availability of the external extraction tools
    Tools,
}

/// Claims assumptions and weight overrides shared by rank/explain.
#[derive(Debug, clap::Args)]
struct Assumptions {
    /// Expected claims per year (overrides config)
    #[arg(long)]
    claims: Option<u32>,

    /// Average claim amount (overrides config)
    #[arg(long)]
    avg_claim: Option<f64>,

    /// Cost weight (overrides config)
    #[arg(long)]
    weight_cost: Option<f64>,

    /// Coverage weight (overrides config)
    #[arg(long)]
    weight_coverage: Option<f64>,

    /// Network weight (overrides config)
    #[arg(long)]
    weight_network: Option<f64>,
}

impl Assumptions {
    /// Fold the command-line overrides into the loaded settings.
    fn apply(&self, settings: &mut Settings) {
        if let Some(claims) = self.claims {
            settings.profile.expected_claims = claims;
        }
        if let Some(avg_claim) = self.avg_claim {
            settings.profile.avg_claim_amount = avg_claim;
        }
        if let Some(cost) = self.weight_cost {
            settings.weights.cost = cost;
        }
        if let Some(coverage) = self.weight_coverage {
            settings.weights.coverage = coverage;
        }
        if let Some(network) = self.weight_network {
            settings.weights.network = network;
        }
    }
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract { files, json } => extract::run(&files, &settings, json),
        Commands::Rank {
            files,
            assumptions,
            json,
        } => {
            assumptions.apply(&mut settings);
            rank::run(&files, &settings, json)
        }
        Commands::Explain {
            files,
            question,
            assumptions,
            local,
        } => {
            assumptions.apply(&mut settings);
            explain::run(&files, &settings, &question, local).await
        }
        Commands::Tools => tools::run(),
    }
}
