use eframe::egui::{Color32, Ui};
use egui_plot::{
    Corner, CoordinatesFormatter, Legend, Line, Plot, PlotPoints, Polygon, VLine,
};

use crate::color;
use crate::state::AppState;
use crate::window::roi::MeasureBand;

/// Fill for general ROIs and the outer measurement bands (pale green).
const ROI_FILL: Color32 = Color32::from_rgba_premultiplied(152, 251, 152, 50);
/// Fill for the center measurement band (orange red).
const CENTER_FILL: Color32 = Color32::from_rgba_premultiplied(255, 69, 0, 50);

// ---------------------------------------------------------------------------
// Spectral plot (central panel)
// ---------------------------------------------------------------------------

/// Render the sub-window's plot surface: curves, error bands, ROI spans,
/// and line-list markers.
pub fn spectral_plot(ui: &mut Ui, state: &mut AppState) {
    if state.window.containers().is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view spectra  (File → Open…)");
        });
        return;
    }

    let reset_bounds = state.window.take_auto_range();
    let window = &state.window;
    let units = window.units();

    let mut plot = Plot::new("spectral_plot")
        .legend(Legend::default())
        .x_axis_label(window.x_label())
        .y_axis_label(window.y_label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if reset_bounds {
        plot = plot.reset();
    }

    // Secondary-axis readout: show the dynamic axis value next to the
    // cursor coordinates when a top-axis mode is active.
    if let (Some(label), Some(units)) = (window.dynamic_axis().label(), units) {
        let axis = window.dynamic_axis().clone();
        plot = plot.coordinates_formatter(
            Corner::LeftBottom,
            CoordinatesFormatter::new(move |point, _| {
                match axis.secondary_value(point.x, units.x) {
                    Some(v) => format!(
                        "x = {:.4}, y = {:.4}, {label}: {v:.2}",
                        point.x, point.y
                    ),
                    None => format!("x = {:.4}, y = {:.4}", point.x, point.y),
                }
            }),
        );
    }

    let response = plot.show(ui, |plot_ui| {
        let bounds = plot_ui.plot_bounds();
        let (y_min, y_max) = (bounds.min()[1], bounds.max()[1]);

        // ---- ROI spans (under the curves) ----
        for roi in window.rois().on_surface() {
            let fill = match roi.band {
                Some(MeasureBand::Center) => CENTER_FILL,
                _ => ROI_FILL,
            };
            let corners: PlotPoints = vec![
                [roi.x1, y_min],
                [roi.x2, y_min],
                [roi.x2, y_max],
                [roi.x1, y_max],
            ]
            .into();
            plot_ui.polygon(Polygon::new(corners).fill_color(fill).stroke(
                eframe::egui::Stroke::new(1.0, fill.to_opaque()),
            ));
        }

        // ---- Layer curves ----
        for container in window.containers() {
            let vis = container.visibility();
            if !vis.plot_visible {
                continue;
            }
            let color = if vis.inactive {
                color::dim(container.color())
            } else {
                container.color()
            };

            if vis.error_visible {
                if let Some((lower, upper)) = container.error_band() {
                    let xs = container.xs();
                    let band: PlotPoints = xs
                        .iter()
                        .zip(lower)
                        .map(|(&x, &y)| [x, y])
                        .chain(xs.iter().zip(upper).rev().map(|(&x, &y)| [x, y]))
                        .collect();
                    plot_ui.polygon(
                        Polygon::new(band)
                            .fill_color(color::dim(color))
                            .stroke(eframe::egui::Stroke::NONE),
                    );
                }
            }

            let points: PlotPoints = container
                .xs()
                .iter()
                .zip(container.ys())
                .map(|(&x, &y)| [x, y])
                .collect();
            let width = if vis.inactive { 1.0 } else { 1.5 };
            plot_ui.line(
                Line::new(points)
                    .name(&container.layer().name)
                    .color(color)
                    .width(width),
            );
        }

        // ---- Reference line markers ----
        if let (Some(list), Some(units)) = (&state.linelist, units) {
            for line in &list.lines {
                let x = list.unit.convert(line.wavelength, units.x);
                plot_ui.vline(
                    VLine::new(x)
                        .name(&line.name)
                        .color(Color32::DARK_GRAY)
                        .width(0.5),
                );
            }
        }
    });

    // Feed the visible range back so ROI placement tracks the view.
    let bounds = response.transform.bounds();
    state
        .window
        .set_view_range((bounds.min()[0], bounds.max()[0]));
}
