//! `prio moscow` command - MoSCoW mixture scoring

use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_optional_sheet, load_sheet};
use crate::cli::output::print_evaluation;
use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::methods::moscow;

#[derive(clap::Args, Debug)]
pub struct MoscowArgs {
    /// Requirements file (Альтернатива, Критерий, Стейкхолдер, Оценка)
    #[arg(long, short = 'r', value_name = "FILE")]
    pub requirements: PathBuf,

    /// Stakeholder weights (Стейкхолдер, Вес); every stakeholder weighs 1.0 without it
    #[arg(long, short = 'w', value_name = "FILE")]
    pub weights: Option<PathBuf>,
}

/// Run the moscow command
pub fn run(args: MoscowArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let requirements = load_sheet(&args.requirements)?;
    let weights = load_optional_sheet(args.weights.as_deref())?;
    let eval = moscow::run(&requirements, weights.as_ref())?;
    print_evaluation(&eval, global, config)
}
