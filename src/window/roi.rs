use super::container::PlotContainer;

// ---------------------------------------------------------------------------
// ROI types
// ---------------------------------------------------------------------------

/// Identity of an ROI within its owning manager. The UI refers to ROIs by
/// id so removal never goes through captured closures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoiId(u64);

/// Role of a band in the three-band measurement set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureBand {
    Left,
    Center,
    Right,
}

/// A user-adjustable interval `[x1, x2]` over the dispersion axis, in
/// display units. `band` is set only for members of the measurement triplet.
#[derive(Debug, Clone, PartialEq)]
pub struct Roi {
    pub id: RoiId,
    pub x1: f64,
    pub x2: f64,
    pub band: Option<MeasureBand>,
}

impl Roi {
    /// Inclusive interval membership.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x1 && x <= self.x2
    }
}

// ---------------------------------------------------------------------------
// RoiManager – both ROI pools and the masks they induce
// ---------------------------------------------------------------------------

/// Owns the general ROI pool and the lazily created measurement triplet.
/// All mutation goes through these methods so the cardinality invariants
/// (triplet is 0 or 3, members non-removable) hold in one place.
#[derive(Debug, Default)]
pub struct RoiManager {
    rois: Vec<Roi>,
    measure: Vec<Roi>,
    measure_mode: bool,
    next_id: u64,
}

impl RoiManager {
    pub fn new() -> Self {
        RoiManager::default()
    }

    fn next_id(&mut self) -> RoiId {
        self.next_id += 1;
        RoiId(self.next_id)
    }

    /// Create a general ROI centered in the visible x-range, spanning half
    /// its width. Returns a snapshot for the `UpdatedRoi` event.
    pub fn add_roi(&mut self, view: (f64, f64)) -> Roi {
        let x_len = (view.1 - view.0) * 0.5;
        let x_pos = view.0 + x_len * 0.5;

        let roi = Roi {
            id: self.next_id(),
            x1: x_pos,
            x2: x_pos + x_len,
            band: None,
        };
        self.rois.push(roi.clone());
        roi
    }

    /// Remove a general ROI by id. Measurement bands are non-removable and
    /// unknown ids are ignored; both return `None`.
    pub fn remove(&mut self, id: RoiId) -> Option<Roi> {
        if self.measure.iter().any(|r| r.id == id) {
            log::warn!("measurement ROIs cannot be removed individually");
            return None;
        }
        let pos = self.rois.iter().position(|r| r.id == id)?;
        Some(self.rois.remove(pos))
    }

    /// Update an ROI's interval (either pool), normalizing the bounds.
    /// Returns a snapshot of the updated ROI.
    pub fn set_region(&mut self, id: RoiId, x1: f64, x2: f64) -> Option<Roi> {
        let roi = self
            .rois
            .iter_mut()
            .chain(self.measure.iter_mut())
            .find(|r| r.id == id)?;
        roi.x1 = x1.min(x2);
        roi.x2 = x1.max(x2);
        Some(roi.clone())
    }

    /// Enter or leave measure mode. On first enable the three bands are
    /// materialized as evenly spaced, non-overlapping intervals in the
    /// visible range; later toggles reuse the same ROI objects. Returns a
    /// snapshot of the triplet when it was just materialized, so the caller
    /// can emit the initial `UpdatedRoi` event.
    pub fn toggle_measure(&mut self, enabled: bool, view: (f64, f64)) -> Option<Vec<Roi>> {
        self.measure_mode = enabled;
        if !enabled {
            return None;
        }
        if !self.measure.is_empty() {
            return None;
        }

        let span = view.1 - view.0;
        let x_len = span * 0.25;
        let bands = [MeasureBand::Left, MeasureBand::Center, MeasureBand::Right];
        for (i, band) in bands.into_iter().enumerate() {
            let x_pos = view.0 + span * 0.1 + x_len * 1.1 * i as f64;
            let id = self.next_id();
            self.measure.push(Roi {
                id,
                x1: x_pos,
                x2: x_pos + x_len,
                band: Some(band),
            });
        }
        Some(self.measure.clone())
    }

    pub fn measure_mode(&self) -> bool {
        self.measure_mode
    }

    /// Whether the "add ROI" action is currently available.
    pub fn can_add(&self) -> bool {
        !self.measure_mode
    }

    /// General ROIs, shown whenever measure mode is off.
    pub fn rois(&self) -> &[Roi] {
        &self.rois
    }

    /// The measurement triplet: empty until first materialized, then
    /// exactly three.
    pub fn measure_rois(&self) -> &[Roi] {
        &self.measure
    }

    /// ROIs currently attached to the plot surface.
    pub fn on_surface(&self) -> &[Roi] {
        if self.measure_mode {
            &self.measure
        } else {
            &self.rois
        }
    }

    /// Boolean mask over a container's samples: the union (logical OR) of
    /// the masks selected by `roi`, or by every general ROI when `roi` is
    /// `None`. Each ROI selects samples whose display-space dispersion falls
    /// within its interval and which pass the layer's own sample mask. With
    /// zero applicable ROIs the layer's mask is returned unchanged.
    pub fn mask_for(&self, container: &PlotContainer, roi: Option<&Roi>) -> Vec<bool> {
        let selected: Vec<&Roi> = match roi {
            Some(r) => vec![r],
            None => self.rois.iter().collect(),
        };

        let layer_mask = &container.layer().mask;
        if selected.is_empty() {
            return layer_mask.clone();
        }

        let xs = container.xs();
        let mut mask = vec![false; xs.len()];
        for roi in selected {
            for (i, &x) in xs.iter().enumerate() {
                mask[i] |= layer_mask[i] && roi.contains(x);
            }
        }
        mask
    }
}
