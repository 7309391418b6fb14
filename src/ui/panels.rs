use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::model::LayerId;
use crate::data::smoothing::Kernel;
use crate::events::Event;
use crate::state::AppState;
use crate::window::axis::AxisMode;
use crate::window::roi::Roi;
use crate::window::PlotSubWindow;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let has_plots = !state.window.containers().is_empty();

        let can_add = state.window.can_add_roi() && has_plots;
        if ui
            .add_enabled(can_add, egui::Button::new("Insert ROI"))
            .clicked()
        {
            state.window.add_roi(&mut state.bus);
        }

        let measuring = state.window.rois().measure_mode();
        if ui
            .add_enabled(has_plots, egui::SelectableLabel::new(measuring, "Measure"))
            .clicked()
        {
            state.window.toggle_measure(!measuring, &mut state.bus);
        }

        ui.separator();

        if ui.add_enabled(has_plots, egui::Button::new("Units…")).clicked() {
            state.unit_dialog.open = true;
        }
        if ui
            .add_enabled(has_plots, egui::Button::new("Top axis…"))
            .clicked()
        {
            state.axis_dialog.open = true;
        }
        if ui
            .add_enabled(has_plots, egui::Button::new("Line IDs"))
            .clicked()
        {
            state.window.show_line_ids(&mut state.bus);
        }
        if ui
            .add_enabled(has_plots, egui::Button::new("Smooth…"))
            .clicked()
        {
            state.smooth_dialog.open = true;
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – layers and ROI readouts
// ---------------------------------------------------------------------------

/// Render the layer list and the ROI readouts.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Layers");
    ui.separator();

    if state.layers.is_empty() {
        ui.label("No layers loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            layer_list(ui, state);
            ui.separator();
            roi_list(ui, state);
            measurement_readout(ui, state);
        });
}

fn layer_list(ui: &mut Ui, state: &mut AppState) {
    let active = state.window.active_layer().map(|l| l.id);
    let layers: Vec<(LayerId, String)> = state
        .layers
        .iter()
        .map(|l| (l.id, l.name.clone()))
        .collect();

    for (id, name) in layers {
        let plotted = state.window.get_container(id).is_some();
        ui.horizontal(|ui: &mut Ui| {
            if plotted {
                if ui
                    .selectable_label(active == Some(id), &name)
                    .clicked()
                {
                    state.bus.publish(Event::SelectedPlot { layer: id });
                }
                if ui.small_button("✖").on_hover_text("Remove plot").clicked() {
                    state.bus.publish(Event::RemovedPlot {
                        layer: id,
                        window: Some(state.window.id()),
                    });
                }
            } else {
                ui.label(&name);
                if ui.small_button("Plot").clicked() {
                    state.plot_layer(id);
                }
            }
        });
    }
}

fn roi_list(ui: &mut Ui, state: &mut AppState) {
    if state.window.rois().measure_mode() {
        return;
    }
    ui.strong("Regions of interest");

    let rois: Vec<Roi> = state.window.rois().rois().to_vec();
    if rois.is_empty() {
        ui.label("None. Use 'Insert ROI' to add one.");
        return;
    }

    for roi in rois {
        ui.horizontal(|ui: &mut Ui| {
            let mut x1 = roi.x1;
            let mut x2 = roi.x2;
            let r1 = ui.add(DragValue::new(&mut x1).speed(1.0).prefix("x1: "));
            let r2 = ui.add(DragValue::new(&mut x2).speed(1.0).prefix("x2: "));

            if r1.changed() || r2.changed() {
                state.window.set_roi_region(roi.id, x1, x2);
            }
            if r1.drag_stopped() || r2.drag_stopped() {
                state.window.roi_change_finished(roi.id, &mut state.bus);
            }
            if ui.small_button("✖").on_hover_text("Remove ROI").clicked() {
                state.window.remove_roi(roi.id, &mut state.bus);
            }
        });
    }
}

fn measurement_readout(ui: &mut Ui, state: &mut AppState) {
    if !state.window.rois().measure_mode() {
        return;
    }
    ui.strong("Measurement bands");

    let Some(layer_id) = state.window.active_layer().map(|l| l.id) else {
        ui.label("No active layer.");
        return;
    };

    let bands: Vec<Roi> = state.window.rois().measure_rois().to_vec();
    for roi in bands {
        let label = match roi.band {
            Some(band) => format!("{band:?}"),
            None => "?".to_string(),
        };
        ui.horizontal(|ui: &mut Ui| {
            ui.label(&label);

            let mut x1 = roi.x1;
            let mut x2 = roi.x2;
            let r1 = ui.add(DragValue::new(&mut x1).speed(1.0).prefix("x1: "));
            let r2 = ui.add(DragValue::new(&mut x2).speed(1.0).prefix("x2: "));
            if r1.changed() || r2.changed() {
                state.window.set_roi_region(roi.id, x1, x2);
            }
            if r1.drag_stopped() || r2.drag_stopped() {
                state.window.roi_change_finished(roi.id, &mut state.bus);
            }

            if let Some(flux) = band_flux(&state.window, layer_id, &roi) {
                ui.label(format!("∫F dx = {flux:.4}"));
            }
        });
    }
}

/// Integrated flux of the layer's samples selected by the ROI, in display
/// units (rectangle rule over the sample spacing).
fn band_flux(window: &PlotSubWindow, layer: LayerId, roi: &Roi) -> Option<f64> {
    let container = window.get_container(layer)?;
    let mask = window.get_roi_mask(layer, Some(roi))?;

    let xs = container.xs();
    let ys = container.ys();
    let mut total = 0.0;
    for i in 0..xs.len() {
        if !mask[i] {
            continue;
        }
        let dx = if i + 1 < xs.len() {
            xs[i + 1] - xs[i]
        } else if i > 0 {
            xs[i] - xs[i - 1]
        } else {
            1.0
        };
        total += ys[i] * dx;
    }
    Some(total)
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

/// Render the modal-style dialogs (units, top axis, smoothing). Dismissal
/// without applying is a no-op.
pub fn dialogs(ctx: &egui::Context, state: &mut AppState) {
    unit_dialog(ctx, state);
    axis_dialog(ctx, state);
    smooth_dialog(ctx, state);
}

fn unit_dialog(ctx: &egui::Context, state: &mut AppState) {
    if !state.unit_dialog.open {
        return;
    }
    let mut open = true;
    let mut apply = false;

    egui::Window::new("Change units")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label("Empty fields keep the current unit.");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Dispersion:");
                ui.text_edit_singleline(&mut state.unit_dialog.x_text);
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Flux:");
                ui.text_edit_singleline(&mut state.unit_dialog.y_text);
            });
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Apply").clicked() {
                    apply = true;
                }
                if ui.button("Cancel").clicked() {
                    state.unit_dialog.open = false;
                }
            });
        });

    if apply {
        let x_text = state.unit_dialog.x_text.clone();
        let y_text = state.unit_dialog.y_text.clone();
        state.window.change_units_from_text(&x_text, &y_text);
        state.unit_dialog.open = false;
    }
    if !open {
        state.unit_dialog.open = false;
    }
}

fn axis_dialog(ctx: &egui::Context, state: &mut AppState) {
    if !state.axis_dialog.open {
        return;
    }
    let mut open = true;
    let mut apply = false;
    const MODES: [&str; 3] = ["Velocity", "Redshift", "Pixels"];

    egui::Window::new("Top axis")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            egui::ComboBox::from_label("Mode")
                .selected_text(MODES[state.axis_dialog.mode])
                .show_ui(ui, |ui: &mut Ui| {
                    for (i, mode) in MODES.iter().enumerate() {
                        ui.selectable_value(&mut state.axis_dialog.mode, i, *mode);
                    }
                });

            match state.axis_dialog.mode {
                0 => {
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label("Reference wavelength:");
                        ui.add(DragValue::new(&mut state.axis_dialog.ref_wave).speed(1.0));
                    });
                }
                1 => {
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label("Redshift:");
                        ui.add(
                            DragValue::new(&mut state.axis_dialog.redshift)
                                .speed(0.01)
                                .range(0.0..=20.0),
                        );
                    });
                }
                _ => {}
            }

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Apply").clicked() {
                    apply = true;
                }
                if ui.button("Cancel").clicked() {
                    state.axis_dialog.open = false;
                }
            });
        });

    if apply {
        let mode = match state.axis_dialog.mode {
            0 => AxisMode::Velocity {
                ref_wave: state.axis_dialog.ref_wave,
            },
            1 => AxisMode::Redshift {
                z: state.axis_dialog.redshift,
            },
            _ => AxisMode::Pixels,
        };
        let layer = state.window.containers().first().map(|c| c.layer_id());
        state.window.update_axis(layer, mode);
        state.axis_dialog.open = false;
    }
    if !open {
        state.axis_dialog.open = false;
    }
}

fn smooth_dialog(ctx: &egui::Context, state: &mut AppState) {
    if !state.smooth_dialog.open {
        return;
    }
    let mut open = true;
    let mut apply = false;

    egui::Window::new("Smooth active layer")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            egui::ComboBox::from_label("Kernel")
                .selected_text(&state.smooth_dialog.kernel)
                .show_ui(ui, |ui: &mut Ui| {
                    for name in Kernel::NAMES {
                        ui.selectable_value(
                            &mut state.smooth_dialog.kernel,
                            name.to_string(),
                            name,
                        );
                    }
                });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Width / stddev:");
                ui.add(
                    DragValue::new(&mut state.smooth_dialog.param)
                        .speed(0.5)
                        .range(0.1..=100.0),
                );
            });
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Apply").clicked() {
                    apply = true;
                }
                if ui.button("Cancel").clicked() {
                    state.smooth_dialog.open = false;
                }
            });
        });

    if apply {
        state.smooth_active();
        state.smooth_dialog.open = false;
    }
    if !open {
        state.smooth_dialog.open = false;
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open spectral data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}
