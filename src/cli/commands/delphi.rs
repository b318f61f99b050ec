//! `prio delphi` command - Fuzzy Delphi consensus

use clap::Subcommand;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_sheet;
use crate::cli::output::print_evaluation;
use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::methods::{delphi_ifs, delphi_it2};

#[derive(Subcommand, Debug)]
pub enum DelphiCommands {
    /// Interval Type-2 judgments ("<confidence> – <level>")
    It2(DelphiArgs),

    /// Intuitionistic judgments ("(μ, ν, π)")
    Ifs(DelphiArgs),
}

#[derive(clap::Args, Debug)]
pub struct DelphiArgs {
    /// Expert judgments (Альтернатива, Эксперт, Вес эксперта, criterion columns)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Run the delphi command
pub fn run(cmd: DelphiCommands, global: &GlobalOpts, config: &Config) -> Result<()> {
    let eval = match cmd {
        DelphiCommands::It2(args) => delphi_it2::run(&load_sheet(&args.file)?)?,
        DelphiCommands::Ifs(args) => delphi_ifs::run(&load_sheet(&args.file)?)?,
    };
    print_evaluation(&eval, global, config)
}
