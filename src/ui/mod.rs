/// UI layer: immediate-mode panels and the central spectral plot.

pub mod panels;
pub mod plot;
