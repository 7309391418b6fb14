use std::rc::Rc;

use eframe::egui::Color32;

use crate::data::model::{Layer, LayerId};
use crate::units::{DispersionUnit, FluxUnit, UnitTriple};

// ---------------------------------------------------------------------------
// Visibility state
// ---------------------------------------------------------------------------

/// Per-container visual state: whether the curve is drawn, whether the error
/// band is drawn, and whether the layer is the inactive (unselected) one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityState {
    pub plot_visible: bool,
    pub error_visible: bool,
    pub inactive: bool,
}

impl Default for VisibilityState {
    fn default() -> Self {
        VisibilityState {
            plot_visible: true,
            error_visible: true,
            inactive: false,
        }
    }
}

// ---------------------------------------------------------------------------
// PlotContainer – one layer bound to its on-screen representation
// ---------------------------------------------------------------------------

/// Binds exactly one [`Layer`] to its plotted curve. The curve points are
/// kept in *display* units; `change_units` recomputes them from the layer's
/// raw arrays, so repeated conversions cannot accumulate rounding error.
#[derive(Debug, Clone)]
pub struct PlotContainer {
    layer: Rc<Layer>,
    /// Curve x values in display units.
    xs: Vec<f64>,
    /// Curve y values in display units.
    ys: Vec<f64>,
    /// Error band (lower, upper) in display units, if the layer has errors.
    band: Option<(Vec<f64>, Vec<f64>)>,
    color: Color32,
    visibility: VisibilityState,
    units: UnitTriple,
}

impl PlotContainer {
    /// Build a container displaying the layer in its own native units.
    pub fn new(layer: Rc<Layer>, color: Color32) -> Self {
        let units = UnitTriple::new(layer.dispersion_unit, layer.flux_unit);
        let mut container = PlotContainer {
            layer,
            xs: Vec::new(),
            ys: Vec::new(),
            band: None,
            color,
            visibility: VisibilityState::default(),
            units,
        };
        container.recompute();
        container
    }

    /// Convert the displayed curve to the given units. `None` keeps the
    /// current unit for that axis; the z slot is stored but not converted.
    pub fn change_units(
        &mut self,
        x: Option<DispersionUnit>,
        y: Option<FluxUnit>,
        z: Option<DispersionUnit>,
    ) {
        self.units = UnitTriple {
            x: x.unwrap_or(self.units.x),
            y: y.unwrap_or(self.units.y),
            z: z.or(self.units.z),
        };
        self.recompute();
    }

    fn recompute(&mut self) {
        let from_x = self.layer.dispersion_unit;
        let from_y = self.layer.flux_unit;
        let to_x = self.units.x;
        let to_y = self.units.y;

        self.xs = self
            .layer
            .dispersion
            .iter()
            .map(|&v| from_x.convert(v, to_x))
            .collect();
        self.ys = self
            .layer
            .flux
            .iter()
            .map(|&v| from_y.convert(v, to_y))
            .collect();
        self.band = self.layer.error.as_ref().map(|errors| {
            let lower: Vec<f64> = self
                .layer
                .flux
                .iter()
                .zip(errors)
                .map(|(&f, &e)| from_y.convert(f - e, to_y))
                .collect();
            let upper: Vec<f64> = self
                .layer
                .flux
                .iter()
                .zip(errors)
                .map(|(&f, &e)| from_y.convert(f + e, to_y))
                .collect();
            (lower, upper)
        });
    }

    pub fn layer(&self) -> &Rc<Layer> {
        &self.layer
    }

    pub fn layer_id(&self) -> LayerId {
        self.layer.id
    }

    /// Display-space dispersion values.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Display-space flux values.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Display-space error band (lower, upper), if present.
    pub fn error_band(&self) -> Option<(&[f64], &[f64])> {
        self.band.as_ref().map(|(lo, hi)| (lo.as_slice(), hi.as_slice()))
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn units(&self) -> UnitTriple {
        self.units
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    pub fn set_visibility(&mut self, plot_visible: bool, error_visible: bool, inactive: bool) {
        self.visibility = VisibilityState {
            plot_visible,
            error_visible,
            inactive,
        };
    }
}
