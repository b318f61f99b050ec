//! `prio ahp` command - Fuzzy AHP (Type-1 and interval Type-2)

use clap::Subcommand;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_sheet;
use crate::cli::output::print_evaluation;
use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::methods::{ahp_type1, ahp_type2};

#[derive(Subcommand, Debug)]
pub enum AhpCommands {
    /// Score alternatives from TFN judgments and a Saaty criteria matrix
    Type1(Type1Args),

    /// Derive criterion weights from interval Type-2 pairwise comparisons
    Type2(Type2Args),
}

#[derive(clap::Args, Debug)]
pub struct Type1Args {
    /// Square pairwise criteria matrix (row label plus one column per criterion)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub criteria: PathBuf,

    /// Expert judgments (Альтернатива, Эксперт, one TFN column per criterion)
    #[arg(long, short = 'a', value_name = "FILE")]
    pub alternatives: PathBuf,

    /// Expert weights (Эксперт, Вес), summing to 1.0
    #[arg(long, short = 'w', value_name = "FILE")]
    pub weights: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct Type2Args {
    /// Comparisons (Эксперт, Вес, "A > B" columns)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Run the ahp command
pub fn run(cmd: AhpCommands, global: &GlobalOpts, config: &Config) -> Result<()> {
    match cmd {
        AhpCommands::Type1(args) => run_type1(args, global, config),
        AhpCommands::Type2(args) => run_type2(args, global, config),
    }
}

fn run_type1(args: Type1Args, global: &GlobalOpts, config: &Config) -> Result<()> {
    let criteria = load_sheet(&args.criteria)?;
    let alternatives = load_sheet(&args.alternatives)?;
    let weights = load_sheet(&args.weights)?;
    let eval = ahp_type1::run(&criteria, &alternatives, &weights)?;
    print_evaluation(&eval, global, config)
}

fn run_type2(args: Type2Args, global: &GlobalOpts, config: &Config) -> Result<()> {
    let sheet = load_sheet(&args.file)?;
    let eval = ahp_type2::run(&sheet)?;
    print_evaluation(&eval, global, config)
}
