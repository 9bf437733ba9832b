//! Spectrum panel: transmission plot, resonance list and CSV export.

use egui::Ui;
use resona_core::TransmissionCurve;

use super::parameters::{Evaluation, ParametersPanel};

/// State for the spectrum display panel.
#[derive(Debug, Default)]
pub struct SpectrumPanel {
    /// Whether to show the resonance table beneath the plot.
    pub show_table: bool,
    /// Outcome of the last export.
    pub export_status: Option<String>,
}

impl SpectrumPanel {
    pub fn ui(&mut self, ui: &mut Ui, eval: &Evaluation, params: &ParametersPanel) {
        ui.heading("Transmission");
        ui.separator();

        let unit = eval.unit.symbol();
        if let Some((wl, t)) = eval.curve.minimum() {
            ui.label(format!(
                "Deepest sample: T = {:.4} at {:.6} {} ({} points, {} resonances)",
                t,
                wl,
                unit,
                eval.curve.len(),
                eval.resonances.len()
            ));
        }

        ui.add_space(4.0);

        let points: egui_plot::PlotPoints = eval.curve.points().map(|(wl, t)| [wl, t]).collect();
        let line = egui_plot::Line::new(points)
            .name("T")
            .color(egui::Color32::from_rgb(50, 120, 220))
            .width(2.0);

        let (min, max) = plot_window(params);

        egui_plot::Plot::new("transmission_plot")
            .height(380.0)
            .x_axis_label(format!("Wavelength ({})", unit))
            .y_axis_label("Transmission")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .legend(egui_plot::Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(egui_plot::PlotBounds::from_min_max(min, max));
                plot_ui.line(line);
                if params.show_resonances {
                    for (_, wl) in eval.resonances.iter() {
                        plot_ui.line(
                            egui_plot::Line::new(resonance_marker(wl, min[1], max[1]).to_vec())
                                .color(egui::Color32::from_rgb(220, 50, 50))
                                .style(egui_plot::LineStyle::dashed_loose())
                                .name("Resonances"),
                        );
                    }
                }
            });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.show_table, "Show resonances");

            if ui.button("Export to CSV").clicked() {
                let path = "output/gui_spectrum.csv";
                self.export_status = Some(match export_spectrum_csv(path, &eval.curve, unit) {
                    Ok(()) => format!("Written to {}", path),
                    Err(e) => {
                        log::error!("Failed to export: {}", e);
                        format!("Export failed: {}", e)
                    }
                });
            }
            if let Some(status) = &self.export_status {
                ui.label(status);
            }
        });

        if self.show_table {
            ui.add_space(4.0);
            if eval.resonances.is_empty() {
                ui.label("No resonance in the sweep window.");
                return;
            }
            egui::ScrollArea::vertical().max_height(250.0).show(ui, |ui| {
                egui::Grid::new("resonance_grid")
                    .striped(true)
                    .min_col_width(100.0)
                    .show(ui, |ui| {
                        ui.strong("Mode n");
                        ui.strong(format!("Wavelength ({})", unit));
                        ui.strong("Frequency (THz)");
                        ui.end_row();

                        for (n, wl) in eval.resonances.iter() {
                            ui.label(n.to_string());
                            ui.label(format!("{:.6}", wl));
                            match eval.converter.frequency_from_wavelength(wl) {
                                Ok(f) => ui.label(format!("{:.4}", f * 1e-12)),
                                Err(e) => ui.colored_label(egui::Color32::RED, e.to_string()),
                            };
                            ui.end_row();
                        }
                    });
            });
        }
    }
}

/// Lower-left and upper-right corners of the plot: the sweep window across,
/// the transmission limits up. Inverted limits fall back to `[0, 1]`.
fn plot_window(params: &ParametersPanel) -> ([f64; 2], [f64; 2]) {
    let (y_lo, y_hi) = if params.t_plot_min < params.t_plot_max {
        (params.t_plot_min, params.t_plot_max)
    } else {
        (0.0, 1.0)
    };
    (
        [params.wavelength_min, y_lo],
        [params.wavelength_max, y_hi],
    )
}

/// Vertical segment at `wavelength` spanning the transmission limits.
fn resonance_marker(wavelength: f64, y_lo: f64, y_hi: f64) -> [[f64; 2]; 2] {
    [[wavelength, y_lo], [wavelength, y_hi]]
}

fn export_spectrum_csv(path: &str, curve: &TransmissionCurve, unit: &str) -> std::io::Result<()> {
    use std::io::Write;

    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "wavelength_{},frequency_hz,transmission", unit)?;
    for i in 0..curve.len() {
        writeln!(
            file,
            "{:.9},{:.9e},{:.9e}",
            curve.wavelengths[i], curve.frequencies[i], curve.transmission[i]
        )?;
    }

    Ok(())
}
