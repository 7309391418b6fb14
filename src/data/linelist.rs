use std::path::Path;

use thiserror::Error;

use crate::units::{DispersionUnit, Quantity};

// ---------------------------------------------------------------------------
// Reference line lists
// ---------------------------------------------------------------------------

/// The two reference tables shipped with the application. `show_line_ids`
/// always loads this fixed pair; user-supplied tables go through `read`.
const COMMON_STELLAR: &str = include_str!("../../assets/linelists/common_stellar.csv");
const COMMON_NEBULAR: &str = include_str!("../../assets/linelists/common_nebular.csv");

#[derive(Debug, Error)]
pub enum LineListError {
    #[error("failed to read line list: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse line list: {0}")]
    Csv(#[from] csv::Error),
    #[error("line list '{0}' is missing the '{1}' column")]
    MissingColumn(String, &'static str),
}

/// One identified spectral line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub name: String,
    /// Line wavelength in the owning list's unit.
    pub wavelength: f64,
}

/// A named table of reference lines, all wavelengths in one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct LineList {
    pub name: String,
    pub unit: DispersionUnit,
    pub lines: Vec<Line>,
}

impl LineList {
    /// The bundled reference pair (stellar + nebular), wavelengths in
    /// Angstrom. Parsing compiled-in tables cannot fail at runtime, so a
    /// parse error here is a packaging bug and panics in debug builds only.
    pub fn bundled() -> Vec<LineList> {
        [
            ("Common stellar", COMMON_STELLAR),
            ("Common nebular", COMMON_NEBULAR),
        ]
        .iter()
        .filter_map(|(name, text)| {
            match Self::parse_str(name, text, DispersionUnit::Angstrom) {
                Ok(list) => Some(list),
                Err(e) => {
                    debug_assert!(false, "bundled line list '{name}' failed to parse: {e}");
                    log::error!("bundled line list '{name}' failed to parse: {e}");
                    None
                }
            }
        })
        .collect()
    }

    /// Read a line-list table from disk. Expected CSV layout: header row
    /// with `wavelength` and `name` columns, wavelengths in `unit`.
    pub fn read(path: &Path, unit: DispersionUnit) -> Result<LineList, LineListError> {
        let text = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("line list")
            .to_string();
        Self::parse_str(&name, &text, unit)
    }

    fn parse_str(name: &str, text: &str, unit: DispersionUnit) -> Result<LineList, LineListError> {
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers()?.clone();

        let wave_idx = headers
            .iter()
            .position(|h| h.trim() == "wavelength")
            .ok_or_else(|| LineListError::MissingColumn(name.to_string(), "wavelength"))?;
        let name_idx = headers
            .iter()
            .position(|h| h.trim() == "name")
            .ok_or_else(|| LineListError::MissingColumn(name.to_string(), "name"))?;

        let mut lines = Vec::new();
        for record in reader.records() {
            let record = record?;
            let wavelength: f64 = match record.get(wave_idx).map(str::trim) {
                Some(tok) => match tok.parse() {
                    Ok(v) => v,
                    Err(_) => {
                        log::warn!("line list '{name}': skipping non-numeric wavelength '{tok}'");
                        continue;
                    }
                },
                None => continue,
            };
            let line_name = record.get(name_idx).unwrap_or("").trim().to_string();
            lines.push(Line {
                name: line_name,
                wavelength,
            });
        }

        Ok(LineList {
            name: name.to_string(),
            unit,
            lines,
        })
    }

    /// Restrict the list to lines whose wavelength falls within
    /// `[min, max]` inclusive. Bounds may be in any dispersion unit.
    pub fn extract_range(&self, min: Quantity, max: Quantity) -> LineList {
        let lo = min.convert_to(self.unit).value;
        let hi = max.convert_to(self.unit).value;
        LineList {
            name: self.name.clone(),
            unit: self.unit,
            lines: self
                .lines
                .iter()
                .filter(|l| l.wavelength >= lo && l.wavelength <= hi)
                .cloned()
                .collect(),
        }
    }

    /// Merge several lists into one, converting every entry into the first
    /// list's unit and sorting by wavelength. An empty input merges to an
    /// empty Angstrom list.
    pub fn merge(lists: &[LineList]) -> LineList {
        let unit = lists
            .first()
            .map(|l| l.unit)
            .unwrap_or(DispersionUnit::Angstrom);

        let mut lines: Vec<Line> = lists
            .iter()
            .flat_map(|list| {
                list.lines.iter().map(move |l| Line {
                    name: l.name.clone(),
                    wavelength: list.unit.convert(l.wavelength, unit),
                })
            })
            .collect();
        lines.sort_by(|a, b| a.wavelength.total_cmp(&b.wavelength));

        LineList {
            name: "merged".to_string(),
            unit,
            lines,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toy_list(name: &str, unit: DispersionUnit, waves: &[f64]) -> LineList {
        LineList {
            name: name.to_string(),
            unit,
            lines: waves
                .iter()
                .map(|&w| Line {
                    name: format!("line@{w}"),
                    wavelength: w,
                })
                .collect(),
        }
    }

    #[test]
    fn bundled_lists_parse() {
        let lists = LineList::bundled();
        assert_eq!(lists.len(), 2);
        assert!(lists.iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn extract_range_is_inclusive() {
        let list = toy_list("t", DispersionUnit::Angstrom, &[3000.0, 4000.0, 9000.0, 9500.0]);
        let out = list.extract_range(
            Quantity::new(4000.0, DispersionUnit::Angstrom),
            Quantity::new(9000.0, DispersionUnit::Angstrom),
        );
        let waves: Vec<f64> = out.lines.iter().map(|l| l.wavelength).collect();
        assert_eq!(waves, vec![4000.0, 9000.0]);
    }

    #[test]
    fn extract_range_converts_bounds() {
        let list = toy_list("t", DispersionUnit::Nanometer, &[400.0, 656.3, 900.0]);
        // Bounds in Angstrom against a nanometer list.
        let out = list.extract_range(
            Quantity::new(6000.0, DispersionUnit::Angstrom),
            Quantity::new(7000.0, DispersionUnit::Angstrom),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out.lines[0].wavelength, 656.3);
    }

    #[test]
    fn merge_sorts_and_converts() {
        let a = toy_list("a", DispersionUnit::Angstrom, &[5000.0, 3000.0]);
        let b = toy_list("b", DispersionUnit::Nanometer, &[400.0]);
        let merged = LineList::merge(&[a, b]);
        assert_eq!(merged.unit, DispersionUnit::Angstrom);
        let waves: Vec<f64> = merged.lines.iter().map(|l| l.wavelength).collect();
        assert_eq!(waves, vec![3000.0, 4000.0, 5000.0]);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        let merged = LineList::merge(&[]);
        assert!(merged.is_empty());
    }

    #[test]
    fn read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wavelength,name").unwrap();
        writeln!(file, "6562.80,H alpha").unwrap();
        writeln!(file, "4861.33,H beta").unwrap();
        let list = LineList::read(file.path(), DispersionUnit::Angstrom).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.lines[0].name, "H alpha");
    }

    #[test]
    fn read_reports_missing_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lambda,name").unwrap();
        writeln!(file, "6562.80,H alpha").unwrap();
        let err = LineList::read(file.path(), DispersionUnit::Angstrom).unwrap_err();
        assert!(matches!(err, LineListError::MissingColumn(_, "wavelength")));
    }
}
