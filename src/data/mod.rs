/// Data layer: core types, loading, line lists, and smoothing.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Rc<Layer>>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   Layer    │  dispersion/flux arrays, units, sample mask
///   └──────────┘
///        │
///        ├──► smoothing: convolve flux → new Layer
///        └──► linelist:  reference tables restricted to a range
/// ```

pub mod linelist;
pub mod loader;
pub mod model;
pub mod smoothing;
