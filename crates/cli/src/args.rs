//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// silverwork: recommendation and dashboard core for a senior job-matching service
#[derive(Parser, Debug)]
#[command(name = "silverwork")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the catalog against a user's interest flags
    Recommend(RecommendArgs),

    /// Build the employer's applicant dashboard
    Dashboard(DashboardArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Interest flags as category=bits, e.g. --flags talent=1010000000
    /// (categories: job, education, talent)
    #[arg(long = "flags", value_name = "CATEGORY=BITS")]
    pub flags: Vec<String>,

    /// Catalog to rank
    #[arg(long, value_enum, default_value_t = CatalogChoice::Jobs)]
    pub catalog: CatalogChoice,

    /// How many recommendations to return
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Serve rows from a JSON fixture file instead of the backend
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogChoice {
    Jobs,
    Courses,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Employer username whose postings to aggregate
    #[arg(long)]
    pub employer: String,

    /// Serve rows from a JSON fixture file instead of the backend
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
