use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::model::Layer;
use crate::units::{DispersionUnit, FluxUnit};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load spectral layers from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header `wavelength,flux[,error]`, one sample per row,
///   producing a single layer
/// * `.json` – `[{ "name": ..., "x": [...], "y": [...], ... }, ...]`,
///   producing one layer per record
pub fn load_file(path: &Path) -> Result<Vec<Rc<Layer>>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Parse an optional user-supplied unit string, falling back to a default.
/// A bad unit string is a warning, not a load failure.
fn parse_unit<U: std::str::FromStr<Err = crate::units::UnitError>>(
    text: Option<&str>,
    default: U,
) -> U {
    match text {
        Some(t) if !t.trim().is_empty() => match t.parse() {
            Ok(u) => u,
            Err(e) => {
                log::warn!("{e}; keeping default unit");
                default
            }
        },
        _ => default,
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct JsonRecord {
    name: Option<String>,
    x: Vec<f64>,
    y: Vec<f64>,
    error: Option<Vec<f64>>,
    x_unit: Option<String>,
    y_unit: Option<String>,
}

/// Expected JSON schema:
///
/// ```json
/// [
///   {
///     "name": "ngc4151",
///     "x": [4000.0, 4001.0, ...],
///     "y": [0.12, 0.14, ...],
///     "error": [0.01, 0.01, ...],
///     "x_unit": "Angstrom",
///     "y_unit": "erg / (s cm2 Angstrom)"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Rc<Layer>>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<JsonRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    let stem = file_stem(path);
    let mut layers = Vec::with_capacity(records.len());

    for (i, rec) in records.into_iter().enumerate() {
        if rec.x.len() != rec.y.len() {
            bail!("Record {i}: x has {} values but y has {}", rec.x.len(), rec.y.len());
        }
        if let Some(err) = &rec.error {
            if err.len() != rec.y.len() {
                bail!("Record {i}: error has {} values but y has {}", err.len(), rec.y.len());
            }
        }

        let x_unit = parse_unit(rec.x_unit.as_deref(), DispersionUnit::Angstrom);
        let y_unit = parse_unit(rec.y_unit.as_deref(), FluxUnit::ErgPerSCm2Angstrom);
        let name = rec.name.unwrap_or_else(|| format!("{stem} #{i}"));

        layers.push(Layer::new(name, rec.x, rec.y, rec.error, x_unit, y_unit));
    }

    Ok(layers)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with `wavelength` and `flux` columns (one sample
/// per row, wavelengths in Angstrom) plus an optional `error` column.
fn load_csv(path: &Path) -> Result<Vec<Rc<Layer>>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let x_idx = headers
        .iter()
        .position(|h| h == "wavelength")
        .context("CSV missing 'wavelength' column")?;
    let y_idx = headers
        .iter()
        .position(|h| h == "flux")
        .context("CSV missing 'flux' column")?;
    let e_idx = headers.iter().position(|h| h == "error");

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut e = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        x.push(parse_field(&record, x_idx, row_no, "wavelength")?);
        y.push(parse_field(&record, y_idx, row_no, "flux")?);
        if let Some(idx) = e_idx {
            e.push(parse_field(&record, idx, row_no, "error")?);
        }
    }

    if x.is_empty() {
        bail!("CSV file contains no samples");
    }

    let error = e_idx.map(|_| e);
    Ok(vec![Layer::new(
        file_stem(path),
        x,
        y,
        error,
        DispersionUnit::Angstrom,
        FluxUnit::ErgPerSCm2Angstrom,
    )])
}

fn parse_field(record: &csv::StringRecord, idx: usize, row: usize, col: &str) -> Result<f64> {
    let tok = record.get(idx).unwrap_or("");
    tok.trim()
        .parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{tok}' is not a number"))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("spectrum")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn csv_round_trip() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "wavelength,flux,error").unwrap();
        writeln!(file, "4000.0,1.0,0.1").unwrap();
        writeln!(file, "4001.0,1.2,0.1").unwrap();

        let layers = load_file(file.path()).unwrap();
        assert_eq!(layers.len(), 1);
        let layer = &layers[0];
        assert_eq!(layer.dispersion, vec![4000.0, 4001.0]);
        assert_eq!(layer.flux, vec![1.0, 1.2]);
        assert_eq!(layer.error.as_deref(), Some(&[0.1, 0.1][..]));
        assert_eq!(layer.mask, vec![true, true]);
    }

    #[test]
    fn json_multiple_records() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[
                {{"name": "a", "x": [1.0, 2.0], "y": [0.5, 0.6], "x_unit": "nm"}},
                {{"x": [3.0, 4.0], "y": [0.7, 0.8]}}
            ]"#
        )
        .unwrap();

        let layers = load_file(file.path()).unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].name, "a");
        assert_eq!(layers[0].dispersion_unit, DispersionUnit::Nanometer);
        assert_eq!(layers[1].dispersion_unit, DispersionUnit::Angstrom);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"x": [1.0, 2.0], "y": [0.5]}}]"#).unwrap();
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn unsupported_extension_fails() {
        let file = tempfile::Builder::new().suffix(".fits").tempfile().unwrap();
        assert!(load_file(file.path()).is_err());
    }
}
