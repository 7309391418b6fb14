use std::path::Path;
use std::rc::Rc;

use crate::color::layer_color;
use crate::data::linelist::LineList;
use crate::data::loader;
use crate::data::model::{Layer, LayerId};
use crate::data::smoothing::{self, Kernel};
use crate::events::{Event, EventBus, EventKind, RoiUpdate, Subscription};
use crate::window::container::PlotContainer;
use crate::window::PlotSubWindow;

// ---------------------------------------------------------------------------
// Dialog state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct UnitDialog {
    pub open: bool,
    pub x_text: String,
    pub y_text: String,
}

pub struct AxisDialog {
    pub open: bool,
    /// Index into the mode combo: 0 velocity, 1 redshift, 2 pixels.
    pub mode: usize,
    pub redshift: f64,
    pub ref_wave: f64,
}

impl Default for AxisDialog {
    fn default() -> Self {
        AxisDialog {
            open: false,
            mode: 0,
            redshift: 0.0,
            ref_wave: 6562.8,
        }
    }
}

pub struct SmoothDialog {
    pub open: bool,
    pub kernel: String,
    pub param: f64,
}

impl Default for SmoothDialog {
    fn default() -> Self {
        SmoothDialog {
            open: false,
            kernel: "gaussian".to_string(),
            param: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering: the loaded layers, the event
/// bus, the plot sub-window, and the panels fed by outbound events.
pub struct AppState {
    /// All loaded layers; the sub-window's containers reference these.
    pub layers: Vec<Rc<Layer>>,

    /// Publish/subscribe bridge between the sub-window and other panels.
    pub bus: EventBus,

    /// The plot sub-window (containers, ROIs, units).
    pub window: PlotSubWindow,

    /// Mailbox feeding the readout panels (`UpdatedRoi`, `AddedLinelist`).
    panel_events: Subscription,

    /// Merged reference line list, once announced.
    pub linelist: Option<LineList>,

    /// Most recent ROI update, shown in the measurement readout.
    pub last_roi_update: Option<RoiUpdate>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub unit_dialog: UnitDialog,
    pub axis_dialog: AxisDialog,
    pub smooth_dialog: SmoothDialog,

    /// Running count of plotted layers, for palette assignment.
    plotted_count: usize,
}

impl Default for AppState {
    fn default() -> Self {
        let mut bus = EventBus::new();
        let window = PlotSubWindow::new(&mut bus);
        let panel_events = bus.subscribe(&[EventKind::UpdatedRoi, EventKind::AddedLinelist]);
        AppState {
            layers: Vec::new(),
            bus,
            window,
            panel_events,
            linelist: None,
            last_roi_update: None,
            status_message: None,
            unit_dialog: UnitDialog::default(),
            axis_dialog: AxisDialog::default(),
            smooth_dialog: SmoothDialog::default(),
            plotted_count: 0,
        }
    }
}

impl AppState {
    /// Load layers from a file and plot each of them.
    pub fn load_file(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(layers) => {
                log::info!("loaded {} layer(s) from {}", layers.len(), path.display());
                for layer in layers {
                    self.layers.push(Rc::clone(&layer));
                    self.plot_layer(layer.id);
                }
                self.status_message = None;
            }
            Err(e) => {
                log::error!("failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Publish an `AddedPlot` event for the given layer. An unknown id
    /// publishes an empty event, which the window ignores (the "plotted
    /// before loading" case).
    pub fn plot_layer(&mut self, id: LayerId) {
        let container = self.layers.iter().find(|l| l.id == id).map(|layer| {
            PlotContainer::new(Rc::clone(layer), layer_color(self.plotted_count))
        });
        if container.is_some() {
            self.plotted_count += 1;
        }
        self.bus.publish(Event::AddedPlot {
            container,
            window: self.window.id(),
        });
    }

    /// Smooth the active layer with the dialog's kernel settings. An unknown
    /// kernel or bad parameter is a logged no-op.
    pub fn smooth_active(&mut self) {
        let Some(layer) = self.window.active_layer().cloned() else {
            self.status_message = Some("No active layer to smooth".to_string());
            return;
        };

        match Kernel::from_name(&self.smooth_dialog.kernel, self.smooth_dialog.param) {
            Ok(kernel) => {
                let smoothed = smoothing::smooth(&layer, &kernel);
                log::info!("smoothed '{}' with {:?}", layer.name, kernel);
                self.layers.push(Rc::clone(&smoothed));
                self.plot_layer(smoothed.id);
            }
            Err(e) => {
                log::error!("{e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Drain inbound events: the window handles registry events, the readout
    /// panels pick up ROI and line-list announcements.
    pub fn process_events(&mut self) {
        self.window.process_events(&mut self.bus);

        for event in self.panel_events.drain() {
            match event {
                Event::UpdatedRoi(update) => self.last_roi_update = Some(update),
                Event::AddedLinelist { linelist } => {
                    log::debug!("line list '{}' with {} lines", linelist.name, linelist.len());
                    self.linelist = Some(linelist);
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{DispersionUnit, FluxUnit};

    fn state_with_layer() -> (AppState, LayerId) {
        let mut state = AppState::default();
        let layer = Layer::new(
            "t",
            vec![4000.0, 5000.0, 6000.0],
            vec![1.0, 2.0, 3.0],
            None,
            DispersionUnit::Angstrom,
            FluxUnit::ErgPerSCm2Angstrom,
        );
        let id = layer.id;
        state.layers.push(layer);
        (state, id)
    }

    #[test]
    fn plot_layer_registers_a_container() {
        let (mut state, id) = state_with_layer();
        state.plot_layer(id);
        state.process_events();
        assert!(state.window.get_container(id).is_some());
    }

    #[test]
    fn smoothing_adds_and_plots_a_new_layer() {
        let (mut state, id) = state_with_layer();
        state.plot_layer(id);
        state.process_events();

        state.smooth_dialog.kernel = "box".to_string();
        state.smooth_dialog.param = 3.0;
        state.smooth_active();
        state.process_events();

        assert_eq!(state.layers.len(), 2);
        assert_eq!(state.window.containers().len(), 2);
    }

    #[test]
    fn unknown_kernel_is_a_recoverable_noop() {
        let (mut state, id) = state_with_layer();
        state.plot_layer(id);
        state.process_events();

        state.smooth_dialog.kernel = "lorentzian".to_string();
        state.smooth_active();
        state.process_events();

        assert_eq!(state.layers.len(), 1);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn panel_picks_up_roi_and_linelist_events() {
        let (mut state, id) = state_with_layer();
        state.plot_layer(id);
        state.process_events();

        state.window.add_roi(&mut state.bus);
        state.window.show_line_ids(&mut state.bus);
        state.process_events();

        assert!(matches!(state.last_roi_update, Some(RoiUpdate::Single(_))));
        assert!(state.linelist.is_some());
    }
}
