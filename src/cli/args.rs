//! Command-line argument model

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    ahp::AhpCommands, completions::CompletionsArgs, delphi::DelphiCommands,
    inspect::InspectArgs, kano::KanoArgs, moscow::MoscowArgs, scale::ScaleArgs,
    topsis::{ScaledTopsisArgs, TopsisArgs},
};

/// Requirement prioritization over plain CSV files
#[derive(Parser, Debug)]
#[command(name = "prio", version, about, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(
        long,
        short = 'f',
        global = true,
        value_enum,
        default_value_t = OutputFormat::Auto,
        env = "PRIO_FORMAT"
    )]
    pub format: OutputFormat,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write the Markdown report to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Tera template used for Markdown output instead of the built-in one
    #[arg(long, global = true, value_name = "PATH")]
    pub template: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Configured default, otherwise a table
    #[default]
    Auto,
    /// Aligned table for terminals
    Table,
    /// Tab-separated values
    Tsv,
    /// Comma-separated values
    Csv,
    /// Full results as JSON
    Json,
    /// Full results as YAML
    Yaml,
    /// Markdown report
    Md,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score requirements from MoSCoW mixtures
    Moscow(MoscowArgs),

    /// Score requirements from Kano questionnaire answers
    Kano(KanoArgs),

    /// Crisp TOPSIS with per-row weights
    Topsis(TopsisArgs),

    /// TOPSIS over trapezoidal linguistic ratings
    FuzzyTopsis(ScaledTopsisArgs),

    /// TOPSIS over intuitionistic fuzzy linguistic ratings
    IfsTopsis(ScaledTopsisArgs),

    /// Fuzzy AHP (Type-1 scoring or Type-2 criterion weights)
    #[command(subcommand)]
    Ahp(AhpCommands),

    /// Fuzzy Delphi expert consensus
    #[command(subcommand)]
    Delphi(DelphiCommands),

    /// Print a built-in lookup table or default scale
    Scale(ScaleArgs),

    /// Parse a single cell and show the typed judgment
    Inspect(InspectArgs),

    /// Generate a shell completion script
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["prio", "kano", "votes.csv", "-f", "json", "-vv"]).unwrap();
        assert_eq!(cli.global.format, OutputFormat::Json);
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Kano(_)));
    }
}
