//! Main application state and egui integration.

use eframe::egui;

use crate::panels;
use crate::panels::parameters::Evaluation;

/// The main Resona application.
pub struct ResonaApp {
    /// Which view is currently selected in the central area.
    active_panel: Panel,
    /// Ring and sweep parameters.
    pub parameters: panels::parameters::ParametersPanel,
    /// State for the spectrum panel.
    pub spectrum_state: panels::spectrum::SpectrumPanel,
    /// State for the figures-of-merit panel.
    pub merit_state: panels::merit::MeritPanel,
    /// Result of the last evaluation, or the error it produced.
    evaluation: Result<Evaluation, String>,
}

/// Central area views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Spectrum,
    Merit,
}

impl Default for ResonaApp {
    fn default() -> Self {
        let parameters = panels::parameters::ParametersPanel::default();
        let evaluation = parameters.evaluate().map_err(|e| e.to_string());
        Self {
            active_panel: Panel::Spectrum,
            parameters,
            spectrum_state: panels::spectrum::SpectrumPanel::default(),
            merit_state: panels::merit::MeritPanel::default(),
            evaluation,
        }
    }
}

impl ResonaApp {
    fn refresh(&mut self) {
        self.evaluation = self.parameters.evaluate().map_err(|e| {
            log::warn!("Evaluation failed: {}", e);
            e.to_string()
        });
    }
}

impl eframe::App for ResonaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Parameters
        let mut changed = false;
        egui::SidePanel::left("parameters_panel")
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Resona");
                ui.separator();

                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.active_panel, Panel::Spectrum, "Spectrum");
                    ui.selectable_value(&mut self.active_panel, Panel::Merit, "Figures of merit");
                });
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    changed = self.parameters.ui(ui);
                });
            });

        if changed {
            self.refresh();
        }

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| match &self.evaluation {
            Ok(eval) => match self.active_panel {
                Panel::Spectrum => self.spectrum_state.ui(ui, eval, &self.parameters),
                Panel::Merit => self.merit_state.ui(ui, eval),
            },
            Err(message) => {
                ui.heading("Invalid parameters");
                ui.colored_label(egui::Color32::RED, message);
            }
        });
    }
}
