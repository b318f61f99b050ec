//! `prio scale` command - show built-in lookup tables

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::judgment::{KanoAnswer, KanoCategory, KanoPair, MOSCOW_COMBINATIONS};
use crate::methods::{ahp_type1, ahp_type2, delphi_it2, kano};
use crate::scales::{BuiltinScale, ScaleRegistry};

const KANO_ANSWERS: [KanoAnswer; 4] = [
    KanoAnswer::Attractive,
    KanoAnswer::MustBe,
    KanoAnswer::Indifferent,
    KanoAnswer::Reverse,
];

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ScaleName {
    /// Accepted MoSCoW category combinations
    Moscow,
    /// Functional × dysfunctional → Kano category
    KanoMatrix,
    /// Kano category weights
    KanoWeights,
    /// Saaty labels → triangular fuzzy numbers
    Saaty,
    /// Type-2 AHP labels → interval Type-2 trapezoids
    AhpType2,
    /// Delphi linguistic levels → base bands
    DelphiLevels,
    /// Delphi confidence levels → widening deltas
    DelphiConfidence,
    /// Built-in scale for fuzzy-topsis
    FuzzyTopsis,
    /// Built-in scale for ifs-topsis
    IfsTopsis,
}

#[derive(clap::Args, Debug)]
pub struct ScaleArgs {
    /// Table to print
    #[arg(value_enum)]
    pub name: ScaleName,
}

/// A lookup table as plain text cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LookupTable {
    fn new<const N: usize>(headers: [&str; N]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

fn tuple(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("({})", parts.join(", "))
}

/// Build the named lookup table
pub fn lookup_table(name: ScaleName) -> Result<LookupTable> {
    let table = match name {
        ScaleName::Moscow => {
            let mut t = LookupTable::new(["Combination"]);
            for combo in MOSCOW_COMBINATIONS {
                let symbols: Vec<&str> = combo.iter().map(|c| c.symbol()).collect();
                t.push(vec![symbols.join(" + ")]);
            }
            t
        }
        ScaleName::KanoMatrix => {
            let mut t = LookupTable::new(["Functional", "Dysfunctional", "Category"]);
            for functional in KANO_ANSWERS {
                for dysfunctional in KANO_ANSWERS {
                    let pair = KanoPair::new(functional.label(), dysfunctional.label());
                    t.push(vec![
                        functional.label().to_string(),
                        dysfunctional.label().to_string(),
                        kano::classify(&pair).to_string(),
                    ]);
                }
            }
            t
        }
        ScaleName::KanoWeights => {
            let mut t = LookupTable::new(["Category", "Weight"]);
            for category in KanoCategory::ALL {
                t.push(vec![category.to_string(), category.weight().to_string()]);
            }
            t
        }
        ScaleName::Saaty => {
            let mut t = LookupTable::new(["Label", "TFN", "Centroid"]);
            for (label, tfn) in ahp_type1::SAATY_SCALE {
                t.push(vec![label.to_string(), tfn.to_string(), tfn.centroid().to_string()]);
            }
            t
        }
        ScaleName::AhpType2 => {
            let mut t = LookupTable::new(["Label", "Lower", "Upper", "Crisp"]);
            for (label, value) in ahp_type2::TYPE2_SCALE {
                t.push(vec![
                    label.to_string(),
                    tuple(&value.lower),
                    tuple(&value.upper),
                    ahp_type2::defuzzify(&value).to_string(),
                ]);
            }
            t
        }
        ScaleName::DelphiLevels => {
            let mut t = LookupTable::new(["Level", "Band"]);
            for (label, band) in delphi_it2::LEVELS {
                t.push(vec![label.to_string(), tuple(&band)]);
            }
            t
        }
        ScaleName::DelphiConfidence => {
            let mut t = LookupTable::new(["Confidence", "Delta"]);
            for (label, delta) in delphi_it2::CONFIDENCE_DELTAS {
                t.push(vec![label.to_string(), delta.to_string()]);
            }
            t
        }
        ScaleName::FuzzyTopsis => builtin(BuiltinScale::FuzzyTopsis)?,
        ScaleName::IfsTopsis => builtin(BuiltinScale::IfsTopsis)?,
    };
    Ok(table)
}

fn builtin(scale: BuiltinScale) -> Result<LookupTable> {
    let sheet = ScaleRegistry::sheet(scale)?;
    let width = sheet.headers().len();
    Ok(LookupTable {
        headers: sheet.headers().to_vec(),
        rows: sheet
            .rows()
            .iter()
            .map(|row| (0..width).map(|i| row.get(i).to_string()).collect())
            .collect(),
    })
}

/// Run the scale command
pub fn run(args: ScaleArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let table = lookup_table(args.name)?;
    let format = effective_format(global.format, config);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&table).into_diagnostic()?);
        }
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&table).into_diagnostic()?),
        OutputFormat::Csv | OutputFormat::Tsv => {
            let delimiter = if format == OutputFormat::Tsv { b'\t' } else { b',' };
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(std::io::stdout());
            writer.write_record(&table.headers).into_diagnostic()?;
            for row in &table.rows {
                writer.write_record(row).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        _ => {
            let mut builder = Builder::default();
            builder.push_record(table.headers.clone());
            for row in table.rows {
                builder.push_record(row);
            }
            let mut rendered = builder.build();
            rendered.with(Style::rounded());
            println!("{}", rendered);
        }
    }
    Ok(())
}
