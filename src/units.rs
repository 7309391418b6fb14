use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Unit errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    #[error("unrecognized dispersion unit '{0}'")]
    UnknownDispersion(String),
    #[error("unrecognized flux unit '{0}'")]
    UnknownFlux(String),
}

// ---------------------------------------------------------------------------
// Dispersion (x-axis) units
// ---------------------------------------------------------------------------

/// Supported units for the dispersion (wavelength) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispersionUnit {
    Angstrom,
    Nanometer,
    Micrometer,
}

impl DispersionUnit {
    /// Scale factor to the base unit (Angstrom).
    fn to_angstrom(self) -> f64 {
        match self {
            DispersionUnit::Angstrom => 1.0,
            DispersionUnit::Nanometer => 10.0,
            DispersionUnit::Micrometer => 1e4,
        }
    }

    /// Convert a value expressed in `self` into `target`.
    pub fn convert(self, value: f64, target: DispersionUnit) -> f64 {
        value * self.to_angstrom() / target.to_angstrom()
    }
}

impl fmt::Display for DispersionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispersionUnit::Angstrom => write!(f, "Angstrom"),
            DispersionUnit::Nanometer => write!(f, "nm"),
            DispersionUnit::Micrometer => write!(f, "um"),
        }
    }
}

impl FromStr for DispersionUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "angstrom" | "angstroms" | "a" | "aa" => Ok(DispersionUnit::Angstrom),
            "nanometer" | "nanometers" | "nm" => Ok(DispersionUnit::Nanometer),
            "micrometer" | "micron" | "microns" | "um" => Ok(DispersionUnit::Micrometer),
            other => Err(UnitError::UnknownDispersion(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Flux (y-axis) units
// ---------------------------------------------------------------------------

/// Supported units for the flux axis. Conversions between these are plain
/// scale factors; anything wavelength-dependent (e.g. Jansky) is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluxUnit {
    /// erg / (s cm2 Angstrom)
    ErgPerSCm2Angstrom,
    /// W / (m2 nm)
    WattPerM2Nm,
}

impl FluxUnit {
    /// Scale factor to the base unit (erg / (s cm2 Angstrom)).
    fn to_erg(self) -> f64 {
        match self {
            FluxUnit::ErgPerSCm2Angstrom => 1.0,
            // 1 W/m2/nm = 1e7 erg/s / 1e4 cm2 / 10 Angstrom
            FluxUnit::WattPerM2Nm => 100.0,
        }
    }

    /// Convert a value expressed in `self` into `target`.
    pub fn convert(self, value: f64, target: FluxUnit) -> f64 {
        value * self.to_erg() / target.to_erg()
    }
}

impl fmt::Display for FluxUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FluxUnit::ErgPerSCm2Angstrom => write!(f, "erg / (s cm2 Angstrom)"),
            FluxUnit::WattPerM2Nm => write!(f, "W / (m2 nm)"),
        }
    }
}

impl FromStr for FluxUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        match norm.as_str() {
            "erg/(scm2angstrom)" | "erg/s/cm2/angstrom" | "erg/s/cm2/a" | "erg" => {
                Ok(FluxUnit::ErgPerSCm2Angstrom)
            }
            "w/(m2nm)" | "w/m2/nm" | "watt/m2/nm" => Ok(FluxUnit::WattPerM2Nm),
            _ => Err(UnitError::UnknownFlux(s.trim().to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Quantity – a value tagged with its dispersion unit
// ---------------------------------------------------------------------------

/// A dispersion value paired with its unit, used for range bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: DispersionUnit,
}

impl Quantity {
    pub fn new(value: f64, unit: DispersionUnit) -> Self {
        Quantity { value, unit }
    }

    pub fn convert_to(self, unit: DispersionUnit) -> Quantity {
        Quantity {
            value: self.unit.convert(self.value, unit),
            unit,
        }
    }
}

// ---------------------------------------------------------------------------
// UnitTriple – the active display units of a sub-window
// ---------------------------------------------------------------------------

/// The (x, y, z) unit triple a sub-window currently displays. The z slot is
/// reserved for a future spatial axis and is carried but never converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitTriple {
    pub x: DispersionUnit,
    pub y: FluxUnit,
    pub z: Option<DispersionUnit>,
}

impl UnitTriple {
    pub fn new(x: DispersionUnit, y: FluxUnit) -> Self {
        UnitTriple { x, y, z: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dispersion_parse_aliases() {
        assert_eq!(
            "Angstrom".parse::<DispersionUnit>().unwrap(),
            DispersionUnit::Angstrom
        );
        assert_eq!(
            "nm".parse::<DispersionUnit>().unwrap(),
            DispersionUnit::Nanometer
        );
        assert_eq!(
            "micron".parse::<DispersionUnit>().unwrap(),
            DispersionUnit::Micrometer
        );
    }

    #[test]
    fn dispersion_parse_rejects_garbage() {
        assert!(matches!(
            "fortnights".parse::<DispersionUnit>(),
            Err(UnitError::UnknownDispersion(_))
        ));
    }

    #[test]
    fn dispersion_conversion_round_trip() {
        let nm = DispersionUnit::Angstrom.convert(6563.0, DispersionUnit::Nanometer);
        assert_relative_eq!(nm, 656.3);
        let back = DispersionUnit::Nanometer.convert(nm, DispersionUnit::Angstrom);
        assert_relative_eq!(back, 6563.0);
    }

    #[test]
    fn flux_conversion_factor() {
        // 1 erg/s/cm2/Angstrom == 0.01 W/m2/nm
        let w = FluxUnit::ErgPerSCm2Angstrom.convert(1.0, FluxUnit::WattPerM2Nm);
        assert_relative_eq!(w, 0.01);
    }

    #[test]
    fn quantity_convert() {
        let q = Quantity::new(4000.0, DispersionUnit::Angstrom);
        let q_nm = q.convert_to(DispersionUnit::Nanometer);
        assert_relative_eq!(q_nm.value, 400.0);
        assert_eq!(q_nm.unit, DispersionUnit::Nanometer);
    }
}
