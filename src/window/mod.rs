/// Sub-window coordination: the mapping between loaded layers, their plotted
/// containers, the ROI pools, and the active display units.
///
/// ```text
///   events (AddedPlot / RemovedPlot / SelectedPlot)
///        │
///        ▼
///   ┌──────────────┐     ┌────────────┐
///   │ PlotSubWindow │────►│ containers │  one per plotted layer
///   └──────────────┘     └────────────┘
///        │    │
///        │    └──► RoiManager   general ROIs + measurement triplet
///        └───────► DynamicAxis  secondary top-axis representation
/// ```
pub mod axis;
pub mod container;
pub mod roi;

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::data::linelist::LineList;
use crate::data::model::{Layer, LayerId};
use crate::events::{Event, EventBus, EventKind, RoiUpdate, Subscription};
use crate::units::{DispersionUnit, FluxUnit, Quantity, UnitTriple};

use axis::{AxisMode, DynamicAxis};
use container::PlotContainer;
use roi::{Roi, RoiId, RoiManager};

// ---------------------------------------------------------------------------
// WindowId
// ---------------------------------------------------------------------------

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a sub-window, used to address inbound plot events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u64);

impl WindowId {
    fn next() -> Self {
        WindowId(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ---------------------------------------------------------------------------
// PlotSubWindow
// ---------------------------------------------------------------------------

/// Owns the container registry, the ROI pools, and the active unit triple of
/// one plot sub-window, and keeps them consistent as events arrive. All
/// cross-window effects go through the event bus.
pub struct PlotSubWindow {
    id: WindowId,
    containers: Vec<PlotContainer>,
    rois: RoiManager,
    dynamic_axis: DynamicAxis,
    /// Display units; `None` until the first container is registered.
    units: Option<UnitTriple>,
    x_label: String,
    y_label: String,
    /// Visible x-range, fed back from the plot widget each frame.
    view_range: Option<(f64, f64)>,
    /// Set after a unit change; the plot widget consumes it to re-fit.
    auto_range: bool,
    subscription: Subscription,
}

impl PlotSubWindow {
    pub fn new(bus: &mut EventBus) -> Self {
        let subscription = bus.subscribe(&[
            EventKind::AddedPlot,
            EventKind::RemovedPlot,
            EventKind::SelectedPlot,
        ]);
        PlotSubWindow {
            id: WindowId::next(),
            containers: Vec::new(),
            rois: RoiManager::new(),
            dynamic_axis: DynamicAxis::new(),
            units: None,
            x_label: "Wavelength".to_string(),
            y_label: "Flux".to_string(),
            view_range: None,
            auto_range: false,
            subscription,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Drain and handle pending inbound events, in delivery order.
    pub fn process_events(&mut self, _bus: &mut EventBus) {
        for event in self.subscription.drain() {
            match event {
                Event::AddedPlot { container, window } => self.add_container(container, window),
                Event::RemovedPlot { layer, window } => self.remove_container(layer, window),
                Event::SelectedPlot { layer } => self.set_active_plot(layer),
                _ => {}
            }
        }
    }

    /// Explicit teardown: stop receiving events and detach everything.
    pub fn close(&mut self, bus: &mut EventBus) {
        bus.unsubscribe(self.subscription.id());
        self.containers.clear();
        self.dynamic_axis.clear();
    }

    // -- Container registry -------------------------------------------------

    /// Register a container handed over on an `AddedPlot` event.
    ///
    /// Events addressed to other windows and events without a container
    /// (plot requested before the layer finished loading) are ignored. A
    /// second container for an already-registered layer *replaces* the
    /// existing one. The first container's units become the window's display
    /// units; later containers are converted to them. The new layer always
    /// becomes the active one.
    pub fn add_container(&mut self, container: Option<PlotContainer>, window: WindowId) {
        if window != self.id {
            return;
        }
        let Some(mut container) = container else {
            // User plotted before the data load completed; nothing to show.
            log::debug!("AddedPlot without a layer; ignoring");
            return;
        };

        let layer_id = container.layer_id();
        if self.get_container(layer_id).is_some() {
            log::debug!(
                "layer '{}' is already plotted; replacing its container",
                container.layer().name
            );
            self.containers.retain(|c| c.layer_id() != layer_id);
        }

        if self.containers.is_empty() {
            let x = container.layer().dispersion_unit;
            let y = container.layer().flux_unit;
            self.containers.push(container);
            self.change_units(Some(x), Some(y), None);
        } else if let Some(units) = self.units {
            container.change_units(Some(units.x), Some(units.y), units.z);
            self.containers.push(container);
        } else {
            self.containers.push(container);
        }

        self.set_active_plot(layer_id);

        if let Some(first) = self.containers.first() {
            self.dynamic_axis.set_reference_layer(Rc::clone(first.layer()));
        }
    }

    /// Detach every container bound to the given layer. `window: None`
    /// addresses all windows; a mismatching id is ignored.
    pub fn remove_container(&mut self, layer: LayerId, window: Option<WindowId>) {
        if let Some(window) = window {
            if window != self.id {
                return;
            }
        }
        self.containers.retain(|c| c.layer_id() != layer);
    }

    /// Linear scan; the registry holds tens of containers at most.
    pub fn get_container(&self, layer: LayerId) -> Option<&PlotContainer> {
        self.containers.iter().find(|c| c.layer_id() == layer)
    }

    pub fn containers(&self) -> &[PlotContainer] {
        &self.containers
    }

    /// Mark the given layer fully visible and active; every other container
    /// becomes visible-but-inactive with its error band hidden. Single
    /// authority for the one-active-layer invariant.
    pub fn set_active_plot(&mut self, layer: LayerId) {
        for container in &mut self.containers {
            if container.layer_id() == layer {
                container.set_visibility(true, true, false);
            } else {
                container.set_visibility(true, false, true);
            }
        }
    }

    /// The currently active (selected) layer, if any.
    pub fn active_layer(&self) -> Option<&Rc<Layer>> {
        self.containers
            .iter()
            .find(|c| !c.visibility().inactive)
            .map(|c| c.layer())
    }

    // -- Unit / axis coordination -------------------------------------------

    /// Convert every container to the given units (`None` keeps the current
    /// unit for that axis), relabel the axes, and re-enable auto-ranging.
    /// The change is atomic across containers: typed units cannot fail to
    /// convert, so either every curve is converted or (on parse failure
    /// upstream) nothing was requested for that axis.
    pub fn change_units(
        &mut self,
        x: Option<DispersionUnit>,
        y: Option<FluxUnit>,
        z: Option<DispersionUnit>,
    ) {
        for container in &mut self.containers {
            container.change_units(x, y, z);
        }

        let x_label = x.map(|u| u.to_string());
        let y_label = y.map(|u| u.to_string());
        self.set_labels(x_label.as_deref(), y_label.as_deref());

        self.auto_range = true;

        self.units = if let Some(first) = self.containers.first() {
            Some(first.units())
        } else if let Some(prev) = self.units {
            Some(UnitTriple {
                x: x.unwrap_or(prev.x),
                y: y.unwrap_or(prev.y),
                z: z.or(prev.z),
            })
        } else if let (Some(x), Some(y)) = (x, y) {
            Some(UnitTriple { x, y, z })
        } else {
            None
        };
    }

    /// Dialog-accept path: parse user-supplied unit strings. An empty string
    /// keeps the current unit; an unparsable one is logged and that axis is
    /// left unchanged.
    pub fn change_units_from_text(&mut self, x_text: &str, y_text: &str) {
        let x = match x_text.trim() {
            "" => None,
            text => match text.parse::<DispersionUnit>() {
                Ok(unit) => Some(unit),
                Err(e) => {
                    log::error!("{e}");
                    None
                }
            },
        };
        let y = match y_text.trim() {
            "" => None,
            text => match text.parse::<FluxUnit>() {
                Ok(unit) => Some(unit),
                Err(e) => {
                    log::error!("{e}");
                    None
                }
            },
        };
        self.change_units(x, y, None);
    }

    /// Build `"Flux [<unit>]"` / `"Wavelength [<unit>]"` labels, falling
    /// back to the first container's display units when no text is supplied.
    pub fn set_labels(&mut self, x_label: Option<&str>, y_label: Option<&str>) {
        let x_unit = x_label
            .map(str::to_string)
            .or_else(|| self.containers.first().map(|c| c.units().x.to_string()))
            .unwrap_or_default();
        let y_unit = y_label
            .map(str::to_string)
            .or_else(|| self.containers.first().map(|c| c.units().y.to_string()))
            .unwrap_or_default();

        self.x_label = format!("Wavelength [{x_unit}]");
        self.y_label = format!("Flux [{y_unit}]");
    }

    /// Recompute the secondary top-axis representation for the given layer
    /// and mode.
    pub fn update_axis(&mut self, layer: Option<LayerId>, mode: AxisMode) {
        let layer = layer
            .and_then(|id| self.get_container(id))
            .map(|c| Rc::clone(c.layer()));
        self.dynamic_axis.update_axis(layer, mode);
    }

    pub fn dynamic_axis(&self) -> &DynamicAxis {
        &self.dynamic_axis
    }

    pub fn units(&self) -> Option<UnitTriple> {
        self.units
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    // -- View range ----------------------------------------------------------

    /// Fed back from the plot widget after each frame.
    pub fn set_view_range(&mut self, range: (f64, f64)) {
        self.view_range = Some(range);
    }

    /// The visible x-range, falling back to the combined extent of plotted
    /// curves before the first frame.
    pub fn visible_range(&self) -> (f64, f64) {
        if let Some(range) = self.view_range {
            return range;
        }
        let mut lo = f64::MAX;
        let mut hi = f64::MIN;
        for container in &self.containers {
            if let (Some(&first), Some(&last)) =
                (container.xs().first(), container.xs().last())
            {
                lo = lo.min(first);
                hi = hi.max(last);
            }
        }
        if lo < hi { (lo, hi) } else { (0.0, 1.0) }
    }

    /// One-shot flag consumed by the plot widget to re-fit the view.
    pub fn take_auto_range(&mut self) -> bool {
        std::mem::take(&mut self.auto_range)
    }

    // -- ROI management -------------------------------------------------------

    pub fn rois(&self) -> &RoiManager {
        &self.rois
    }

    pub fn can_add_roi(&self) -> bool {
        self.rois.can_add()
    }

    /// Create a general ROI centered in the current view and announce it.
    pub fn add_roi(&mut self, bus: &mut EventBus) {
        if !self.rois.can_add() {
            log::warn!("cannot add an ROI while measure mode is active");
            return;
        }
        let roi = self.rois.add_roi(self.visible_range());
        bus.publish(Event::UpdatedRoi(RoiUpdate::Single(roi)));
    }

    /// Remove a general ROI; dependents recompute off the emitted event.
    pub fn remove_roi(&mut self, id: RoiId, bus: &mut EventBus) {
        if let Some(roi) = self.rois.remove(id) {
            bus.publish(Event::UpdatedRoi(RoiUpdate::Single(roi)));
        }
    }

    /// Live drag update; no event until the drag finishes.
    pub fn set_roi_region(&mut self, id: RoiId, x1: f64, x2: f64) {
        self.rois.set_region(id, x1, x2);
    }

    /// Drag-finished: re-emit the changed ROI, or the whole measurement set
    /// when a band moved.
    pub fn roi_change_finished(&mut self, id: RoiId, bus: &mut EventBus) {
        let Some(roi) = self
            .rois
            .rois()
            .iter()
            .chain(self.rois.measure_rois())
            .find(|r| r.id == id)
            .cloned()
        else {
            return;
        };
        let update = if roi.band.is_some() {
            RoiUpdate::Measurement(self.rois.measure_rois().to_vec())
        } else {
            RoiUpdate::Single(roi)
        };
        bus.publish(Event::UpdatedRoi(update));
    }

    /// Enter or leave measure mode. Materializing the triplet (first enable
    /// only) announces the new measurement set.
    pub fn toggle_measure(&mut self, enabled: bool, bus: &mut EventBus) {
        if let Some(triplet) = self.rois.toggle_measure(enabled, self.visible_range()) {
            bus.publish(Event::UpdatedRoi(RoiUpdate::Measurement(triplet)));
        }
    }

    /// Mask over a layer's samples selected by one ROI, or by every general
    /// ROI when `roi` is `None`. `None` result means the layer is not
    /// plotted in this window.
    pub fn get_roi_mask(&self, layer: LayerId, roi: Option<&Roi>) -> Option<Vec<bool>> {
        let container = self.get_container(layer)?;
        Some(self.rois.mask_for(container, roi))
    }

    // -- Line-list overlay -----------------------------------------------------

    /// The dispersion range spanned by all plotted curves, in display units.
    /// `None` with an empty registry.
    pub fn dispersion_bounds(&self) -> Option<(Quantity, Quantity)> {
        let units = self.units?;
        let mut amin = f64::MAX;
        let mut amax = f64::MIN;
        for container in &self.containers {
            // Dispersion is monotonically increasing per layer.
            if let (Some(&first), Some(&last)) =
                (container.xs().first(), container.xs().last())
            {
                amin = amin.min(first);
                amax = amax.max(last);
            }
        }
        if amin > amax {
            return None;
        }
        Some((Quantity::new(amin, units.x), Quantity::new(amax, units.x)))
    }

    /// Load the bundled reference line lists, restrict them to the plotted
    /// dispersion range, merge, and announce the merged list. No-op without
    /// plotted containers.
    pub fn show_line_ids(&mut self, bus: &mut EventBus) {
        let Some((amin, amax)) = self.dispersion_bounds() else {
            log::warn!("no plotted spectra; skipping line identification");
            return;
        };

        let restricted: Vec<LineList> = LineList::bundled()
            .iter()
            .map(|list| list.extract_range(amin, amax))
            .collect();
        let merged = LineList::merge(&restricted);

        log::info!(
            "identified {} reference lines in [{:.1}, {:.1}] {}",
            merged.len(),
            amin.value,
            amax.value,
            amin.unit
        );
        bus.publish(Event::AddedLinelist { linelist: merged });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Color32;

    fn layer(disp: Vec<f64>, x_unit: DispersionUnit) -> Rc<Layer> {
        let n = disp.len();
        Layer::new(
            "test layer",
            disp,
            vec![1.0; n],
            None,
            x_unit,
            FluxUnit::ErgPerSCm2Angstrom,
        )
    }

    fn plotted(window: &mut PlotSubWindow, layer: &Rc<Layer>) {
        let container = PlotContainer::new(Rc::clone(layer), Color32::LIGHT_BLUE);
        window.add_container(Some(container), window.id());
    }

    #[test]
    fn exactly_one_active_layer() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);

        let layers: Vec<_> = (0..3)
            .map(|_| layer(vec![1.0, 2.0], DispersionUnit::Angstrom))
            .collect();
        for l in &layers {
            plotted(&mut window, l);
        }

        for l in &layers {
            window.set_active_plot(l.id);
            let active = window
                .containers()
                .iter()
                .filter(|c| !c.visibility().inactive)
                .count();
            assert_eq!(active, 1);
            assert!(!window.get_container(l.id).unwrap().visibility().inactive);
        }
    }

    #[test]
    fn first_container_adopts_units_later_ones_convert() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);

        plotted(&mut window, &layer(vec![4000.0, 5000.0], DispersionUnit::Angstrom));
        assert_eq!(window.units().unwrap().x, DispersionUnit::Angstrom);

        let nm_layer = layer(vec![600.0, 700.0], DispersionUnit::Nanometer);
        plotted(&mut window, &nm_layer);
        let container = window.get_container(nm_layer.id).unwrap();
        assert_eq!(container.units().x, DispersionUnit::Angstrom);
        assert_eq!(container.xs(), &[6000.0, 7000.0]);
    }

    #[test]
    fn unit_change_failure_is_idempotent() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);
        plotted(&mut window, &layer(vec![4000.0, 5000.0], DispersionUnit::Angstrom));

        window.change_units_from_text("nm", "");
        assert_eq!(window.units().unwrap().x, DispersionUnit::Nanometer);

        window.change_units_from_text("furlongs", "");
        assert_eq!(window.units().unwrap().x, DispersionUnit::Nanometer);
    }

    #[test]
    fn unit_change_converts_every_container() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);
        plotted(&mut window, &layer(vec![4000.0], DispersionUnit::Angstrom));
        plotted(&mut window, &layer(vec![5000.0], DispersionUnit::Angstrom));

        window.change_units(Some(DispersionUnit::Micrometer), None, None);
        for container in window.containers() {
            assert_eq!(container.units().x, DispersionUnit::Micrometer);
        }
        assert!(window.take_auto_range());
        assert!(!window.take_auto_range());
    }

    #[test]
    fn duplicate_layer_replaces_container() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);
        let l = layer(vec![1.0, 2.0], DispersionUnit::Angstrom);

        plotted(&mut window, &l);
        plotted(&mut window, &l);
        assert_eq!(window.containers().len(), 1);
    }

    #[test]
    fn mismatched_window_and_missing_container_are_ignored() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);
        let other = PlotSubWindow::new(&mut bus);
        let l = layer(vec![1.0, 2.0], DispersionUnit::Angstrom);

        let container = PlotContainer::new(Rc::clone(&l), Color32::LIGHT_BLUE);
        window.add_container(Some(container), other.id());
        assert!(window.containers().is_empty());

        window.add_container(None, window.id());
        assert!(window.containers().is_empty());
    }

    #[test]
    fn remove_container_respects_window_filter() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);
        let other = PlotSubWindow::new(&mut bus);
        let l = layer(vec![1.0, 2.0], DispersionUnit::Angstrom);
        plotted(&mut window, &l);

        window.remove_container(l.id, Some(other.id()));
        assert_eq!(window.containers().len(), 1);

        window.remove_container(l.id, None);
        assert!(window.containers().is_empty());
    }

    #[test]
    fn events_drive_the_registry() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);
        let l = layer(vec![1.0, 2.0], DispersionUnit::Angstrom);

        let container = PlotContainer::new(Rc::clone(&l), Color32::LIGHT_BLUE);
        bus.publish(Event::AddedPlot {
            container: Some(container),
            window: window.id(),
        });
        window.process_events(&mut bus);
        assert_eq!(window.containers().len(), 1);

        bus.publish(Event::RemovedPlot {
            layer: l.id,
            window: None,
        });
        window.process_events(&mut bus);
        assert!(window.containers().is_empty());
    }

    #[test]
    fn close_tears_down_the_subscription() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);
        let l = layer(vec![1.0, 2.0], DispersionUnit::Angstrom);
        plotted(&mut window, &l);

        window.close(&mut bus);
        assert!(window.containers().is_empty());

        bus.publish(Event::SelectedPlot { layer: l.id });
        window.process_events(&mut bus);
        // No mailbox left; nothing to assert beyond not panicking.
    }

    #[test]
    fn line_ids_with_empty_registry_is_a_guarded_noop() {
        let mut bus = EventBus::new();
        let listener = bus.subscribe(&[EventKind::AddedLinelist]);
        let mut window = PlotSubWindow::new(&mut bus);

        window.show_line_ids(&mut bus);
        assert!(listener.drain().is_empty());
    }

    #[test]
    fn dispersion_bounds_span_all_containers() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);
        plotted(&mut window, &layer(vec![4000.0, 7000.0], DispersionUnit::Angstrom));
        plotted(&mut window, &layer(vec![6000.0, 9000.0], DispersionUnit::Angstrom));

        let (amin, amax) = window.dispersion_bounds().unwrap();
        assert_eq!(amin.value, 4000.0);
        assert_eq!(amax.value, 9000.0);
        assert_eq!(amin.unit, DispersionUnit::Angstrom);
    }

    #[test]
    fn line_ids_emits_the_merged_restricted_list() {
        let mut bus = EventBus::new();
        let listener = bus.subscribe(&[EventKind::AddedLinelist]);
        let mut window = PlotSubWindow::new(&mut bus);
        plotted(&mut window, &layer(vec![6500.0, 6800.0], DispersionUnit::Angstrom));

        window.show_line_ids(&mut bus);
        let events = listener.drain();
        assert_eq!(events.len(), 1);
        let Event::AddedLinelist { linelist } = &events[0] else {
            panic!("expected AddedLinelist");
        };
        assert!(linelist
            .lines
            .iter()
            .all(|l| l.wavelength >= 6500.0 && l.wavelength <= 6800.0));
        // H alpha and the [N II] doublet fall in this window.
        assert!(linelist.lines.iter().any(|l| l.name == "H alpha"));
        assert!(linelist.lines.iter().any(|l| l.name == "[N II]"));
    }

    #[test]
    fn roi_lifecycle_emits_updates() {
        let mut bus = EventBus::new();
        let listener = bus.subscribe(&[EventKind::UpdatedRoi]);
        let mut window = PlotSubWindow::new(&mut bus);
        plotted(&mut window, &layer(vec![0.0, 100.0], DispersionUnit::Angstrom));

        window.add_roi(&mut bus);
        let events = listener.drain();
        assert_eq!(events.len(), 1);
        let Event::UpdatedRoi(RoiUpdate::Single(roi)) = &events[0] else {
            panic!("expected a single-ROI update");
        };

        window.set_roi_region(roi.id, 10.0, 20.0);
        assert!(listener.drain().is_empty()); // silent during drag

        window.roi_change_finished(roi.id, &mut bus);
        assert_eq!(listener.drain().len(), 1);

        window.remove_roi(roi.id, &mut bus);
        assert_eq!(listener.drain().len(), 1);
        assert!(window.rois().rois().is_empty());
    }

    #[test]
    fn measure_toggle_announces_the_triplet_once() {
        let mut bus = EventBus::new();
        let listener = bus.subscribe(&[EventKind::UpdatedRoi]);
        let mut window = PlotSubWindow::new(&mut bus);
        plotted(&mut window, &layer(vec![0.0, 100.0], DispersionUnit::Angstrom));

        window.toggle_measure(true, &mut bus);
        let events = listener.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            Event::UpdatedRoi(RoiUpdate::Measurement(rois)) if rois.len() == 3
        ));
        assert!(!window.can_add_roi());

        window.toggle_measure(false, &mut bus);
        window.toggle_measure(true, &mut bus);
        assert!(listener.drain().is_empty());
        assert_eq!(window.rois().measure_rois().len(), 3);
    }

    #[test]
    fn adding_roi_in_measure_mode_is_refused() {
        let mut bus = EventBus::new();
        let listener = bus.subscribe(&[EventKind::UpdatedRoi]);
        let mut window = PlotSubWindow::new(&mut bus);
        plotted(&mut window, &layer(vec![0.0, 100.0], DispersionUnit::Angstrom));

        window.toggle_measure(true, &mut bus);
        listener.drain();

        window.add_roi(&mut bus);
        assert!(listener.drain().is_empty());
        assert!(window.rois().rois().is_empty());
    }

    #[test]
    fn labels_fall_back_to_first_layer_units() {
        let mut bus = EventBus::new();
        let mut window = PlotSubWindow::new(&mut bus);
        plotted(&mut window, &layer(vec![4000.0, 5000.0], DispersionUnit::Angstrom));

        window.set_labels(None, None);
        assert_eq!(window.x_label(), "Wavelength [Angstrom]");
        assert_eq!(window.y_label(), "Flux [erg / (s cm2 Angstrom)]");

        window.set_labels(Some("nm"), None);
        assert_eq!(window.x_label(), "Wavelength [nm]");
    }
}
