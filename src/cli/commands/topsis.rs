//! `prio topsis`, `prio fuzzy-topsis` and `prio ifs-topsis` commands

use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_optional_sheet, load_sheet, scale_path};
use crate::cli::output::print_evaluation;
use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::methods::{fuzzy_topsis, ifs_topsis, topsis};

#[derive(clap::Args, Debug)]
pub struct TopsisArgs {
    /// Decision matrix (Альтернатива, criterion columns, Вес стейкхолдера)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ScaledTopsisArgs {
    /// Linguistic ratings (Альтернатива plus one column per criterion)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Scale file mapping labels to fuzzy numbers; built-in scale if omitted
    #[arg(long, short = 's', value_name = "FILE")]
    pub scale: Option<PathBuf>,
}

/// Run crisp TOPSIS
pub fn run_crisp(args: TopsisArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let sheet = load_sheet(&args.file)?;
    let eval = topsis::run(&sheet)?;
    print_evaluation(&eval, global, config)
}

/// Run trapezoidal fuzzy TOPSIS
pub fn run_fuzzy(args: ScaledTopsisArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let sheet = load_sheet(&args.file)?;
    let scale_file = scale_path(args.scale.as_deref(), config.fuzzy_topsis_scale.as_deref());
    let scale = load_optional_sheet(scale_file.as_deref())?;
    let eval = fuzzy_topsis::run(&sheet, scale.as_ref())?;
    print_evaluation(&eval, global, config)
}

/// Run intuitionistic fuzzy TOPSIS
pub fn run_ifs(args: ScaledTopsisArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let sheet = load_sheet(&args.file)?;
    let scale_file = scale_path(args.scale.as_deref(), config.ifs_topsis_scale.as_deref());
    let scale = load_optional_sheet(scale_file.as_deref())?;
    let eval = ifs_topsis::run(&sheet, scale.as_ref())?;
    print_evaluation(&eval, global, config)
}
