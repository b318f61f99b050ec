//! Quoted comma-delimited input files
//!
//! A [`Sheet`] is the fully read header and body of one input file. Engines
//! never touch the filesystem; they take a `&Sheet`.

use std::path::Path;

use crate::core::error::{EngineError, Location};

/// One data row with its 1-based line number in the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: usize,
    cells: Vec<String>,
}

impl Row {
    pub fn line(&self) -> usize {
        self.line
    }

    /// Cell at column `idx`; short rows read as empty
    pub fn get(&self, idx: usize) -> &str {
        self.cells.get(idx).map(|s| s.as_str()).unwrap_or("")
    }
}

/// Parsed input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Row>,
}

/// Trim whitespace and stray quote characters around a cell
fn clean_cell(raw: &str) -> String {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').trim().to_string()
}

impl Sheet {
    /// Read and parse a file from disk
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: name.clone(),
            source,
        })?;
        Self::parse(&name, &content)
    }

    /// Parse CSV text; `name` is used in error messages
    pub fn parse(name: &str, content: &str) -> Result<Self, EngineError> {
        let content = content.trim_start_matches('\u{feff}');
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let csv_error = |e: csv::Error| {
            let mut location = Location::in_file(name);
            if let Some(pos) = e.position() {
                location = location.line(pos.line() as usize);
            }
            EngineError::Format {
                location,
                message: format!("malformed CSV: {}", e),
            }
        };

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(clean_cell)
            .collect();

        for (i, header) in headers.iter().enumerate() {
            if headers[..i].contains(header) {
                return Err(EngineError::Schema {
                    file: name.to_string(),
                    message: format!("duplicate column '{}'", header),
                });
            }
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(csv_error)?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 2);
            let cells: Vec<String> = record.iter().map(clean_cell).collect();
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }
            rows.push(Row { line, cells });
        }

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Indices of required columns, or a schema error naming every missing one
    pub fn require<const N: usize>(&self, names: [&str; N]) -> Result<[usize; N], EngineError> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| self.column(n).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::missing_columns(&self.name, &missing));
        }
        Ok(names.map(|n| self.column(n).unwrap_or_default()))
    }

    /// Every column not listed in `excluded`, in file order
    pub fn columns_except(&self, excluded: &[&str]) -> Vec<(usize, String)> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !excluded.contains(&h.as_str()))
            .map(|(i, h)| (i, h.clone()))
            .collect()
    }

    /// Like [`Sheet::columns_except`] but at least one column must remain
    pub fn criteria_columns(&self, excluded: &[&str]) -> Result<Vec<(usize, String)>, EngineError> {
        let criteria = self.columns_except(excluded);
        if criteria.is_empty() {
            return Err(EngineError::Schema {
                file: self.name.clone(),
                message: "no criterion columns found".to_string(),
            });
        }
        Ok(criteria)
    }

    /// Location of a row, for error reporting
    pub fn location(&self, row: &Row) -> Location {
        Location::in_file(self.name.clone()).line(row.line)
    }

    /// Same sheet with rows in a different order
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            name: self.name.clone(),
            headers: self.headers.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_cells() {
        let sheet = Sheet::parse(
            "req.csv",
            "\u{feff}Альтернатива,Оценка\n\"Login\",\"60% M, 40% S\"\n",
        )
        .unwrap();
        assert_eq!(sheet.headers(), ["Альтернатива", "Оценка"]);
        assert_eq!(sheet.rows().len(), 1);
        assert_eq!(sheet.rows()[0].get(1), "60% M, 40% S");
        assert_eq!(sheet.rows()[0].line(), 2);
    }

    #[test]
    fn test_require_lists_all_missing() {
        let sheet = Sheet::parse("a.csv", "Альтернатива\nA\n").unwrap();
        let err = sheet.require(["Альтернатива", "Эксперт", "Вес"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "a.csv: missing required column(s): Эксперт, Вес"
        );
        assert_eq!(sheet.require(["Альтернатива"]).unwrap(), [0]);
    }

    #[test]
    fn test_ragged_row_is_format_error() {
        let err = Sheet::parse("a.csv", "A,B\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, EngineError::Format { .. }));
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let err = Sheet::parse("a.csv", "A,A\n1,2\n").unwrap_err();
        assert!(matches!(err, EngineError::Schema { .. }));
    }

    #[test]
    fn test_criteria_columns() {
        let sheet = Sheet::parse("t.csv", "Альтернатива,Цена,Риск\nA,1,2\n").unwrap();
        let crits = sheet.criteria_columns(&["Альтернатива"]).unwrap();
        assert_eq!(crits, vec![(1, "Цена".to_string()), (2, "Риск".to_string())]);

        let bare = Sheet::parse("t.csv", "Альтернатива\nA\n").unwrap();
        assert!(bare.criteria_columns(&["Альтернатива"]).is_err());
    }
}
