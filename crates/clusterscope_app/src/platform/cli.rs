use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clusterscope_core::ClusteringMethod;

#[derive(Debug, Parser)]
#[command(version, about = "Submit text or documents for sentence clustering")]
pub struct Opts {
    /// Configuration file (RON).
    #[arg(long, default_value = super::config::DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,
    /// Analysis endpoint, overrides the configuration file.
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Directory generated downloads are written to.
    #[arg(long)]
    pub download_dir: Option<PathBuf>,
    /// Also write logs to ./clusterscope.log.
    #[arg(long)]
    pub log_file: bool,
    /// Increase verbosity (-v, -vv). Default WARN.
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Decrease verbosity (-q).
    #[arg(short = 'q', action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Opts {
    pub fn verbosity(&self) -> i8 {
        let verbose = i8::try_from(self.verbose).unwrap_or(i8::MAX);
        let quiet = i8::try_from(self.quiet).unwrap_or(i8::MAX);
        verbose.saturating_sub(quiet)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Line-oriented session (default).
    Interactive,
    /// Submit once and print the clusters.
    Analyze(AnalyzeArgs),
    /// Write a configuration file with the default values.
    InitConfig,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Clustering method: ontology or neural.
    #[arg(long, short = 'm')]
    pub method: ClusteringMethod,
    /// Text to analyze.
    #[arg(long, short = 't', conflicts_with = "files")]
    pub text: Option<String>,
    /// Documents to analyze.
    #[arg(long = "file", short = 'f')]
    pub files: Vec<PathBuf>,
    /// Write all_clusters.txt after a successful analysis.
    #[arg(long)]
    pub download_all: bool,
}
