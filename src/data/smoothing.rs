use std::rc::Rc;

use thiserror::Error;

use super::model::Layer;

// ---------------------------------------------------------------------------
// Convolution kernels
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum SmoothingError {
    #[error("unsupported kernel '{0}'")]
    UnknownKernel(String),
    #[error("invalid kernel parameter {value} for '{kernel}'")]
    InvalidParameter { kernel: &'static str, value: f64 },
}

/// Closed set of supported smoothing kernels. Unknown names are rejected
/// with a typed error instead of a lookup failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    Box { width: usize },
    Gaussian { stddev: f64 },
    Trapezoid { width: usize },
}

impl Kernel {
    /// Map a kernel name and single size parameter to a kernel variant.
    /// Width-type parameters are rounded to the nearest sample count.
    pub fn from_name(name: &str, param: f64) -> Result<Kernel, SmoothingError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "box" => {
                if param < 1.0 {
                    return Err(SmoothingError::InvalidParameter {
                        kernel: "box",
                        value: param,
                    });
                }
                Ok(Kernel::Box {
                    width: param.round() as usize,
                })
            }
            "gaussian" => {
                if param <= 0.0 {
                    return Err(SmoothingError::InvalidParameter {
                        kernel: "gaussian",
                        value: param,
                    });
                }
                Ok(Kernel::Gaussian { stddev: param })
            }
            "trapezoid" => {
                if param < 1.0 {
                    return Err(SmoothingError::InvalidParameter {
                        kernel: "trapezoid",
                        value: param,
                    });
                }
                Ok(Kernel::Trapezoid {
                    width: param.round() as usize,
                })
            }
            other => Err(SmoothingError::UnknownKernel(other.to_string())),
        }
    }

    pub const NAMES: [&'static str; 3] = ["box", "gaussian", "trapezoid"];

    /// Normalized, symmetric weight vector of odd length.
    fn weights(&self) -> Vec<f64> {
        let raw: Vec<f64> = match *self {
            Kernel::Box { width } => {
                let n = width | 1; // force odd so the kernel has a center
                vec![1.0; n]
            }
            Kernel::Gaussian { stddev } => {
                let radius = (4.0 * stddev).ceil() as i64;
                (-radius..=radius)
                    .map(|i| {
                        let x = i as f64;
                        (-x * x / (2.0 * stddev * stddev)).exp()
                    })
                    .collect()
            }
            Kernel::Trapezoid { width } => {
                // Flat top of `width` samples with unit-slope ramps.
                let n = width | 1;
                let ramp = n / 2;
                let mut w = Vec::with_capacity(n + 2 * ramp);
                for i in 1..=ramp {
                    w.push(i as f64 / (ramp + 1) as f64);
                }
                w.extend(std::iter::repeat(1.0).take(n));
                for i in (1..=ramp).rev() {
                    w.push(i as f64 / (ramp + 1) as f64);
                }
                w
            }
        };
        let total: f64 = raw.iter().sum();
        raw.into_iter().map(|w| w / total).collect()
    }
}

// ---------------------------------------------------------------------------
// Smoothing transform
// ---------------------------------------------------------------------------

/// Convolve a layer's flux with the given kernel and return a new layer with
/// the same unit/mask envelope. Edges are renormalized over the in-bounds
/// part of the kernel, and masked samples do not contribute.
pub fn smooth(layer: &Layer, kernel: &Kernel) -> Rc<Layer> {
    let weights = kernel.weights();
    let half = (weights.len() / 2) as i64;
    let n = layer.flux.len() as i64;

    let flux: Vec<f64> = (0..n)
        .map(|i| {
            let mut acc = 0.0;
            let mut norm = 0.0;
            for (k, &w) in weights.iter().enumerate() {
                let j = i + k as i64 - half;
                if j < 0 || j >= n {
                    continue;
                }
                let j = j as usize;
                if !layer.mask[j] {
                    continue;
                }
                acc += w * layer.flux[j];
                norm += w;
            }
            if norm > 0.0 {
                acc / norm
            } else {
                layer.flux[i as usize]
            }
        })
        .collect();

    layer.copy_with_flux(flux, "smoothed")
}
