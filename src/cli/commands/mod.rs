//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod config_cmd;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pluto::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "pluto")]
#[command(about = "Key terms, topic clusters and summaries from the Pluto analysis service")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "PLUTO_CONFIG")]
    config: Option<PathBuf>,

    /// Analysis service base URL (overrides config file and PLUTO_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

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
    /// Submit keywords and documents for analysis and show the result
    Analyze(AnalyzeArgs),

    /// Show the built-in demo result without contacting the service
    Demo {
        /// Print plain output instead of the full-screen view
        #[arg(long)]
        plain: bool,
    },

    /// Show the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Arguments of `pluto analyze`.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Research keyword (repeatable)
    #[arg(short = 'k', long = "keyword")]
    pub keywords: Vec<String>,

    /// Document to upload (repeatable)
    #[arg(short = 'f', long = "file")]
    pub files: Vec<PathBuf>,

    /// Number of topic clusters (default from config, else 5)
    #[arg(long)]
    pub topics: Option<u32>,

    /// Number of summary sentences (default from config, else 5)
    #[arg(long)]
    pub sentences: Option<u32>,

    /// Use bag-of-words features instead of TF-IDF
    #[arg(long)]
    pub bow: bool,

    /// Print plain output instead of the full-screen view
    #[arg(long)]
    pub plain: bool,

    /// Print the raw result as JSON
    #[arg(long, conflicts_with = "plain")]
    pub json: bool,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        api_url: cli.api_url,
    };
    let (settings, config) = load_settings_with_options(options).await?;

    match cli.command {
        Commands::Analyze(args) => analyze::cmd_analyze(&settings, args).await,
        Commands::Demo { plain } => analyze::cmd_demo(&settings, plain).await,
        Commands::Config { json } => config_cmd::cmd_config_show(&settings, &config, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "pluto", "analyze", "-k", "nlp", "-k", "topic models", "-f", "paper.pdf", "--topics",
            "8", "--bow", "--plain",
        ]);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.keywords, vec!["nlp", "topic models"]);
                assert_eq!(args.files, vec![PathBuf::from("paper.pdf")]);
                assert_eq!(args.topics, Some(8));
                assert_eq!(args.sentences, None);
                assert!(args.bow);
                assert!(args.plain);
                assert!(!args.json);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_json_conflicts_with_plain() {
        assert!(Cli::try_parse_from(["pluto", "analyze", "--json", "--plain"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pluto", "config", "--api-url", "http://x", "-v"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://x"));
        assert!(cli.verbose);
    }
}
