//! Parameter panel: ring coefficients, sweep window and plot options.

use egui::Ui;
use resona_core::units::{LengthUnit, SpectralConverter};
use resona_core::{resonances, ResonanceSet, RingResonator, TransmissionCurve, WavelengthGrid};

/// State for the ring and sweep parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametersPanel {
    /// Self-coupling coefficient σ.
    pub sigma: f64,
    /// Round-trip amplitude transmission a.
    pub a: f64,
    /// Round-trip length.
    pub length: f64,
    /// Unit of the length and of every wavelength.
    pub unit: LengthUnit,
    pub wavelength_min: f64,
    pub wavelength_max: f64,
    pub points: usize,
    /// Lower limit of the transmission axis.
    pub t_plot_min: f64,
    /// Upper limit of the transmission axis.
    pub t_plot_max: f64,
    /// Draw a marker at each resonance.
    pub show_resonances: bool,
}

impl Default for ParametersPanel {
    fn default() -> Self {
        Self {
            sigma: 0.5,
            a: 0.8,
            length: 50.0,
            unit: LengthUnit::Micrometre,
            wavelength_min: 1.4,
            wavelength_max: 1.7,
            points: 1000,
            t_plot_min: 0.0,
            t_plot_max: 1.0,
            show_resonances: true,
        }
    }
}

/// Everything derived from one set of parameters.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub ring: RingResonator,
    pub unit: LengthUnit,
    pub converter: SpectralConverter,
    pub curve: TransmissionCurve,
    pub resonances: ResonanceSet,
}

impl ParametersPanel {
    /// Draw the controls. Returns `true` if any value changed.
    pub fn ui(&mut self, ui: &mut Ui) -> bool {
        let before = self.clone();

        ui.heading("Ring");
        ui.add(egui::Slider::new(&mut self.sigma, 0.0..=1.0).text("σ (self-coupling)"));
        ui.add(egui::Slider::new(&mut self.a, 0.0..=1.0).text("a (round-trip)"));
        ui.add(
            egui::Slider::new(&mut self.length, 1.0..=5000.0)
                .logarithmic(true)
                .text(format!("L ({})", self.unit.symbol())),
        );

        egui::ComboBox::from_label("Length unit")
            .selected_text(self.unit.symbol())
            .show_ui(ui, |ui| {
                for unit in [LengthUnit::Metre, LengthUnit::Micrometre, LengthUnit::Nanometre] {
                    ui.selectable_value(&mut self.unit, unit, unit.symbol());
                }
            });

        ui.add_space(8.0);
        ui.heading("Sweep");
        egui::Grid::new("sweep_grid").num_columns(2).show(ui, |ui| {
            ui.label("λ min");
            ui.add(egui::DragValue::new(&mut self.wavelength_min).speed(0.001).range(1e-9..=f64::MAX));
            ui.end_row();
            ui.label("λ max");
            ui.add(egui::DragValue::new(&mut self.wavelength_max).speed(0.001).range(1e-9..=f64::MAX));
            ui.end_row();
            ui.label("Points");
            ui.add(egui::DragValue::new(&mut self.points).range(2..=200_000));
            ui.end_row();
        });

        ui.add_space(8.0);
        ui.heading("Plot");
        egui::Grid::new("plot_limits_grid").num_columns(2).show(ui, |ui| {
            ui.label("T min");
            ui.add(egui::DragValue::new(&mut self.t_plot_min).speed(0.01).range(0.0..=1.0));
            ui.end_row();
            ui.label("T max");
            ui.add(egui::DragValue::new(&mut self.t_plot_max).speed(0.01).range(0.0..=1.0));
            ui.end_row();
        });
        ui.checkbox(&mut self.show_resonances, "Mark resonances");

        *self != before
    }

    /// Sweep the ring and find its resonances in the current window.
    pub fn evaluate(&self) -> resona_core::Result<Evaluation> {
        let ring = RingResonator::new(self.sigma, self.a, self.length)?;
        let converter = SpectralConverter::for_unit(self.unit);
        let grid = WavelengthGrid::new(self.wavelength_min, self.wavelength_max, self.points)?;
        let curve = TransmissionCurve::sweep(&ring, &grid, &converter)?;
        let resonances = resonances(self.wavelength_min, self.wavelength_max, self.length)?;
        Ok(Evaluation {
            ring,
            unit: self.unit,
            converter,
            curve,
            resonances,
        })
    }
}
