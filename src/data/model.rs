use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::units::{DispersionUnit, FluxUnit};

// ---------------------------------------------------------------------------
// LayerId – process-unique identity for a loaded layer
// ---------------------------------------------------------------------------

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a loaded layer. Containers and events refer to layers by id,
/// never by index, so removals cannot invalidate references held elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

impl LayerId {
    fn next() -> Self {
        LayerId(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ---------------------------------------------------------------------------
// Layer – one loaded spectral dataset
// ---------------------------------------------------------------------------

/// A loaded spectrum: dispersion/flux arrays, optional per-sample errors,
/// a boolean sample mask, and the units the raw arrays are expressed in.
///
/// Layers are immutable once created; the app owns them as `Rc<Layer>` and
/// plot containers hold non-owning clones of that `Rc`.
#[derive(Debug)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    /// Dispersion axis values, monotonically increasing.
    pub dispersion: Vec<f64>,
    /// Flux values, same length as `dispersion`.
    pub flux: Vec<f64>,
    /// Optional 1-sigma errors, same length as `flux`.
    pub error: Option<Vec<f64>>,
    /// Sample mask: `true` marks a valid sample.
    pub mask: Vec<bool>,
    pub dispersion_unit: DispersionUnit,
    pub flux_unit: FluxUnit,
}

impl Layer {
    pub fn new(
        name: impl Into<String>,
        dispersion: Vec<f64>,
        flux: Vec<f64>,
        error: Option<Vec<f64>>,
        dispersion_unit: DispersionUnit,
        flux_unit: FluxUnit,
    ) -> Rc<Layer> {
        let mask = vec![true; dispersion.len()];
        Rc::new(Layer {
            id: LayerId::next(),
            name: name.into(),
            dispersion,
            flux,
            error,
            mask,
            dispersion_unit,
            flux_unit,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.dispersion.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dispersion.is_empty()
    }

    /// New layer with replaced flux samples and an identical unit/mask
    /// envelope. Used by the smoothing transform; the copy gets a fresh id
    /// and a derived name so it plots as its own layer.
    pub fn copy_with_flux(&self, flux: Vec<f64>, name_suffix: &str) -> Rc<Layer> {
        debug_assert_eq!(flux.len(), self.flux.len());
        Rc::new(Layer {
            id: LayerId::next(),
            name: format!("{} [{}]", self.name, name_suffix),
            dispersion: self.dispersion.clone(),
            flux,
            error: self.error.clone(),
            mask: self.mask.clone(),
            dispersion_unit: self.dispersion_unit,
            flux_unit: self.flux_unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_layer() -> Rc<Layer> {
        Layer::new(
            "toy",
            vec![1.0, 2.0, 3.0],
            vec![10.0, 20.0, 30.0],
            None,
            DispersionUnit::Angstrom,
            FluxUnit::ErgPerSCm2Angstrom,
        )
    }

    #[test]
    fn ids_are_unique() {
        let a = toy_layer();
        let b = toy_layer();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn copy_with_flux_keeps_envelope() {
        let a = toy_layer();
        let b = a.copy_with_flux(vec![1.0, 2.0, 3.0], "smoothed");
        assert_ne!(a.id, b.id);
        assert_eq!(b.dispersion, a.dispersion);
        assert_eq!(b.mask, a.mask);
        assert_eq!(b.dispersion_unit, a.dispersion_unit);
        assert_eq!(b.flux, vec![1.0, 2.0, 3.0]);
        assert!(b.name.contains("smoothed"));
    }
}
