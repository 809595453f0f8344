//! CLI definition and command dispatch

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{analyze, completions};

/// dealmemo - investment deal memo analysis pipeline
///
/// Turns a founder's pitch materials into a structured, scored deal memo.
#[derive(Parser)]
#[command(name = "dealmemo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable trace-level logging
    #[arg(long, global = true)]
    pub trace: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a company's pitch materials and produce a deal memo
    Analyze {
        /// Pitch deck / memo source documents (pdf, docx, pptx, txt, md)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Sector used for benchmark lookup (e.g. "saas", "fintech")
        #[arg(short, long)]
        sector: String,

        /// Company name hint passed to the analysis prompts
        #[arg(long)]
        company: Option<String>,

        /// Funding stage hint passed to the analysis prompts
        #[arg(long)]
        stage: Option<String>,

        /// Named weighting profile (defaults to the built-in "default" profile)
        #[arg(long, default_value = "default")]
        weighting_profile: String,

        /// Override the market opportunity weight (0-100)
        #[arg(long)]
        weight_market: Option<f64>,

        /// Override the team weight (0-100)
        #[arg(long)]
        weight_team: Option<f64>,

        /// Override the traction weight (0-100)
        #[arg(long)]
        weight_traction: Option<f64>,

        /// Override the product weight (0-100)
        #[arg(long)]
        weight_product: Option<f64>,

        /// Override the competitive position weight (0-100)
        #[arg(long)]
        weight_competitive: Option<f64>,

        /// Allow a zero weight in one or more of the above overrides
        #[arg(long)]
        allow_zero_weights: bool,

        /// Collapse the HOLD recommendation tier into PASS
        #[arg(long)]
        disable_hold_tier: bool,

        /// Write the deal memo to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,

        /// Write the completion script to this directory instead of stdout
        #[arg(long)]
        directory: Option<PathBuf>,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Analyze {
                inputs,
                sector,
                company,
                stage,
                weighting_profile,
                weight_market,
                weight_team,
                weight_traction,
                weight_product,
                weight_competitive,
                allow_zero_weights,
                disable_hold_tier,
                output,
            } => analyze::run(analyze::AnalyzeArgs {
                inputs,
                sector,
                company,
                stage,
                weighting_profile,
                weight_market,
                weight_team,
                weight_traction,
                weight_product,
                weight_competitive,
                allow_zero_weights,
                allow_hold_tier: !disable_hold_tier,
                output,
                format: self.format,
            })
            .map_err(Into::into),

            Commands::Completions { shell, directory } => completions::generate(shell, directory),
        }
    }
}
