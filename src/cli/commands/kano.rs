//! `prio kano` command - Kano questionnaire scoring

use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_sheet;
use crate::cli::output::print_evaluation;
use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::methods::kano;

#[derive(clap::Args, Debug)]
pub struct KanoArgs {
    /// Survey file (Альтернатива, Стейкхолдер, Функциональный, Дисфункциональный, Вес)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Run the kano command
pub fn run(args: KanoArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let sheet = load_sheet(&args.file)?;
    let eval = kano::run(&sheet)?;
    print_evaluation(&eval, global, config)
}
