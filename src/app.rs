use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SpecViewApp {
    pub state: AppState,
}

impl eframe::App for SpecViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Deliver pending bus events before drawing, so this frame reflects
        // the registry changes they carry.
        self.state.process_events();

        // ---- Top panel: menu bar and actions ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: layers and ROI readouts ----
        egui::SidePanel::left("layer_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::spectral_plot(ui, &mut self.state);
        });

        // ---- Dialogs ----
        panels::dialogs(ctx, &mut self.state);
    }
}
