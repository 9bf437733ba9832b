//! Figures-of-merit panel: extinction, widths and quality factors.

use egui::Ui;
use resona_core::merit::figures_of_merit;
use resona_core::types::CouplingRegime;

use super::parameters::Evaluation;

/// State for the figures-of-merit panel.
#[derive(Debug, Default)]
pub struct MeritPanel {
    /// Mode whose frequency feeds the quality factors.
    pub selected_mode: Option<u64>,
}

impl MeritPanel {
    pub fn ui(&mut self, ui: &mut Ui, eval: &Evaluation) {
        ui.heading("Figures of merit");
        ui.separator();

        let regime = match eval.ring.coupling_regime() {
            CouplingRegime::Over => "over-coupled",
            CouplingRegime::Critical => "critically coupled",
            CouplingRegime::Under => "under-coupled",
        };
        ui.label(format!("σ·a = {:.6} ({})", eval.ring.sigma_a(), regime));
        if eval.ring.is_critically_coupled() && eval.ring.a() > 0.0 {
            ui.label("The dip reaches T = 0; the extinction ratio is unbounded.");
        }

        // Keep the selection inside the current window.
        if self.selected_mode.and_then(|n| eval.resonances.get(n)).is_none() {
            self.selected_mode = eval.resonances.modes().first().copied();
        }

        let unit = eval.unit.symbol();
        let selected_text = match self.selected_mode.and_then(|n| eval.resonances.get(n).map(|wl| (n, wl))) {
            Some((n, wl)) => format!("n = {} ({:.6} {})", n, wl, unit),
            None => "none in window".to_string(),
        };
        egui::ComboBox::from_label("Resonance")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for (n, wl) in eval.resonances.iter() {
                    ui.selectable_value(
                        &mut self.selected_mode,
                        Some(n),
                        format!("n = {} ({:.6} {})", n, wl, unit),
                    );
                }
            });

        ui.add_space(8.0);

        let f_res = match self.selected_mode.and_then(|n| eval.resonances.get(n)) {
            Some(wl) => match eval.converter.frequency_from_wavelength(wl) {
                Ok(f) => Some(f),
                Err(e) => {
                    ui.colored_label(egui::Color32::RED, e.to_string());
                    return;
                }
            },
            None => None,
        };

        let fom = match figures_of_merit(&eval.ring, &eval.converter, f_res, None) {
            Ok(fom) => fom,
            Err(e) => {
                ui.colored_label(egui::Color32::RED, e.to_string());
                return;
            }
        };

        egui::Grid::new("merit_grid")
            .striped(true)
            .num_columns(2)
            .min_col_width(160.0)
            .show(ui, |ui| {
                row(ui, "T_max", format!("{:.6}", fom.t_max));
                row(ui, "T_min", format!("{:.6}", fom.t_min));
                row(
                    ui,
                    "Extinction ratio",
                    format!("{:.4} ({:.2} dB)", fom.extinction_ratio, fom.extinction_ratio_db),
                );
                row(ui, "Linewidth (FSR fraction)", format!("{:.6}", fom.linewidth));
                row(ui, &format!("FSR (rad/{})", unit), format!("{:.6e}", fom.fsr_wavenumber));
                row(ui, "FSR (GHz)", format!("{:.4}", fom.fsr_frequency * 1e-9));
                row(ui, &format!("FWHD (rad/{})", unit), format!("{:.6e}", fom.fwhd_wavenumber));
                row(ui, "FWHD (GHz)", format!("{:.4}", fom.fwhd_frequency * 1e-9));

                if let Some(q) = fom.quality {
                    row(ui, "f_res (THz)", format!("{:.6}", q.resonance_frequency * 1e-12));
                    row(ui, "Q_load", format!("{:.4e}", q.q_load));
                    row(ui, "Q_ext", format!("{:.4e}", q.q_ext));
                    row(ui, "Q_int", format!("{:.4e}", q.q_intrinsic));
                    row(ui, "Q_ring", format!("{:.4e}", q.q_ring));
                    row(ui, "Escape ratio", format!("{:.4}", q.escape_ratio));
                }
            });

        if fom.quality.is_none() {
            ui.add_space(4.0);
            ui.label("Quality factors need a resonance in the sweep window.");
        }
    }
}

fn row(ui: &mut Ui, name: &str, value: String) {
    ui.label(name);
    ui.monospace(value);
    ui.end_row();
}
