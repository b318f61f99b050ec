//! `prio inspect` command - parse one cell
//!
//! Useful for checking a single cell of an input file without running a
//! whole computation.

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::error::{JudgmentError, Location};
use crate::core::judgment::{parse_number, Judgment, KanoPair, MoscowMixture, Trapezoid};
use crate::methods::{ahp_type1, ahp_type2, delphi_ifs, delphi_it2, kano};

/// Cell encodings understood by the engines
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum JudgmentKind {
    /// MoSCoW mixture, e.g. "60% M, 40% S"
    Moscow,
    /// Kano answers "functional, dysfunctional", e.g. "Attractive, Must-be"
    Kano,
    /// Plain number
    Crisp,
    /// Saaty label or "(l, m, u)"
    Tfn,
    /// "(a, b, c, d)" or a single number
    Trapezoid,
    /// Type-2 AHP comparison label, e.g. "Сильно"
    It2Comparison,
    /// Delphi "<confidence> – <level>"
    DelphiIt2,
    /// Delphi "(μ, ν, π)"
    Ifs,
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// How to read the cell
    #[arg(value_enum)]
    pub kind: JudgmentKind,

    /// Cell text, exactly as it appears in the file
    pub cell: String,
}

/// Parse a cell as the given kind
pub fn parse(kind: JudgmentKind, cell: &str) -> Result<Judgment, JudgmentError> {
    Ok(match kind {
        JudgmentKind::Moscow => Judgment::Moscow(MoscowMixture::parse(cell)?),
        JudgmentKind::Kano => {
            let parts: Vec<&str> = cell.split(',').map(str::trim).collect();
            let [functional, dysfunctional] = parts.as_slice() else {
                return Err(JudgmentError::Format(format!(
                    "expected 'functional, dysfunctional', got '{}'",
                    cell
                )));
            };
            let pair = KanoPair::new(functional, dysfunctional);
            let category = kano::classify(&pair);
            Judgment::Kano { pair, category }
        }
        JudgmentKind::Crisp => Judgment::Crisp(parse_number(cell)?),
        JudgmentKind::Tfn => Judgment::Triangular(ahp_type1::parse_tfn(cell)?),
        JudgmentKind::Trapezoid => Judgment::Trapezoidal(Trapezoid::parse(cell)?),
        JudgmentKind::It2Comparison => Judgment::IntervalComparison(ahp_type2::parse_label(cell)?),
        JudgmentKind::DelphiIt2 => Judgment::IntervalType2(delphi_it2::parse_cell(cell)?),
        JudgmentKind::Ifs => Judgment::Intuitionistic(delphi_ifs::parse_cell(cell)?),
    })
}

/// Run the inspect command
pub fn run(args: InspectArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let judgment = parse(args.kind, &args.cell)
        .map_err(|e| e.at(Location::in_file(format!("'{}'", args.cell))))?;

    match effective_format(global.format, config) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&judgment).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&judgment).into_diagnostic()?);
        }
        _ => println!("{} {}", style("✓").green(), judgment),
    }
    Ok(())
}
