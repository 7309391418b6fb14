use std::rc::Rc;

use crate::data::model::Layer;
use crate::units::DispersionUnit;

/// Speed of light in km/s, for the velocity axis mode.
const C_KMS: f64 = 299_792.458;

// ---------------------------------------------------------------------------
// Dynamic (top) axis
// ---------------------------------------------------------------------------

/// Alternate representations for the secondary dispersion axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisMode {
    /// Doppler velocity relative to a reference wavelength (in the display
    /// x-unit).
    Velocity { ref_wave: f64 },
    /// Rest-frame wavelength for the given redshift.
    Redshift { z: f64 },
    /// Sample index into the reference layer's dispersion array.
    Pixels,
}

/// Computes the secondary tick representation for the top axis. Holds a
/// non-owning reference to the window's first registered layer, which the
/// pixel mode needs to resolve sample indices.
#[derive(Debug, Clone, Default)]
pub struct DynamicAxis {
    layer: Option<Rc<Layer>>,
    mode: Option<AxisMode>,
}

impl DynamicAxis {
    pub fn new() -> Self {
        DynamicAxis::default()
    }

    /// Point the axis at a reference layer without changing the mode.
    pub fn set_reference_layer(&mut self, layer: Rc<Layer>) {
        self.layer = Some(layer);
    }

    /// Recompute the axis for the given layer and mode.
    pub fn update_axis(&mut self, layer: Option<Rc<Layer>>, mode: AxisMode) {
        if let Some(layer) = layer {
            self.layer = Some(layer);
        }
        self.mode = Some(mode);
    }

    pub fn clear(&mut self) {
        self.layer = None;
        self.mode = None;
    }

    pub fn mode(&self) -> Option<AxisMode> {
        self.mode
    }

    /// Map a display-space x value to its secondary representation.
    /// Returns `None` when no mode is set or the mode needs a layer that
    /// is not available.
    pub fn secondary_value(&self, x: f64, display_unit: DispersionUnit) -> Option<f64> {
        match self.mode? {
            AxisMode::Velocity { ref_wave } => {
                if ref_wave == 0.0 {
                    return None;
                }
                Some(C_KMS * (x - ref_wave) / ref_wave)
            }
            AxisMode::Redshift { z } => Some(x / (1.0 + z)),
            AxisMode::Pixels => {
                let layer = self.layer.as_ref()?;
                if layer.is_empty() {
                    return None;
                }
                // Dispersion is monotonic; nearest-sample lookup.
                let x_native = display_unit.convert(x, layer.dispersion_unit);
                let idx = match layer
                    .dispersion
                    .binary_search_by(|v| v.total_cmp(&x_native))
                {
                    Ok(i) => i,
                    Err(i) => {
                        if i == 0 {
                            0
                        } else if i >= layer.len() {
                            layer.len() - 1
                        } else {
                            let below = x_native - layer.dispersion[i - 1];
                            let above = layer.dispersion[i] - x_native;
                            if below <= above { i - 1 } else { i }
                        }
                    }
                };
                Some(idx as f64)
            }
        }
    }

    /// Label for the secondary axis in its current mode.
    pub fn label(&self) -> Option<&'static str> {
        match self.mode? {
            AxisMode::Velocity { .. } => Some("Velocity [km/s]"),
            AxisMode::Redshift { .. } => Some("Rest wavelength"),
            AxisMode::Pixels => Some("Pixel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::FluxUnit;
    use approx::assert_relative_eq;

    fn layer() -> Rc<Layer> {
        Layer::new(
            "t",
            vec![4000.0, 4100.0, 4200.0],
            vec![1.0; 3],
            None,
            DispersionUnit::Angstrom,
            FluxUnit::ErgPerSCm2Angstrom,
        )
    }

    #[test]
    fn no_mode_yields_nothing() {
        let axis = DynamicAxis::new();
        assert_eq!(axis.secondary_value(4000.0, DispersionUnit::Angstrom), None);
        assert_eq!(axis.label(), None);
    }

    #[test]
    fn velocity_mode_is_zero_at_reference() {
        let mut axis = DynamicAxis::new();
        axis.update_axis(None, AxisMode::Velocity { ref_wave: 6562.8 });
        let v = axis
            .secondary_value(6562.8, DispersionUnit::Angstrom)
            .unwrap();
        assert_relative_eq!(v, 0.0);

        let v = axis
            .secondary_value(6584.0, DispersionUnit::Angstrom)
            .unwrap();
        assert!(v > 900.0 && v < 1000.0); // ~968 km/s
    }

    #[test]
    fn redshift_mode_divides_out_expansion() {
        let mut axis = DynamicAxis::new();
        axis.update_axis(None, AxisMode::Redshift { z: 0.5 });
        let rest = axis
            .secondary_value(9844.2, DispersionUnit::Angstrom)
            .unwrap();
        assert_relative_eq!(rest, 6562.8, max_relative = 1e-12);
    }

    #[test]
    fn pixel_mode_finds_nearest_sample() {
        let mut axis = DynamicAxis::new();
        axis.update_axis(Some(layer()), AxisMode::Pixels);
        assert_eq!(
            axis.secondary_value(4140.0, DispersionUnit::Angstrom),
            Some(1.0)
        );
        // Display units differ from the layer's native unit.
        assert_eq!(
            axis.secondary_value(420.0, DispersionUnit::Nanometer),
            Some(2.0)
        );
        // Out-of-range values clamp to the ends.
        assert_eq!(
            axis.secondary_value(9999.0, DispersionUnit::Angstrom),
            Some(2.0)
        );
    }
}
