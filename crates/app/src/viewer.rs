//! A window that plots each published result and offers a form for
//! submitting new ones.

use std::{thread, time::Duration};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui_plot::{HLine, Legend, Line, Plot, PlotPoints, Points, VLine};

use fixpoint_channel::{Publisher, ResultMessage};
use fixpoint_plot::{PlotData, Poller};

use crate::{
    api::{ComputeRequest, Tolerance},
    compute::compute,
};

/// Opens the viewer and blocks until the window is closed.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn run(publisher: Publisher, poller: Poller, poll_interval: Duration) -> Result<(), eframe::Error> {
    let viewer = Viewer::new(publisher, poller, poll_interval);
    eframe::run_native(
        "fixpoint",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(viewer))),
    )
}

struct Viewer {
    publisher: Publisher,
    poller: Poller,
    poll_interval: Duration,
    form: Form,
    latest: Option<Shown>,
    error: Option<String>,
    errors: (Sender<String>, Receiver<String>),
}

/// The most recently rendered result.
struct Shown {
    message: ResultMessage,
    plot: PlotData,
}

impl Viewer {
    fn new(publisher: Publisher, poller: Poller, poll_interval: Duration) -> Self {
        Self {
            publisher,
            poller,
            poll_interval,
            form: Form::default(),
            latest: None,
            error: None,
            errors: crossbeam_channel::unbounded(),
        }
    }

    /// Runs the request on a worker thread, which publishes the result the
    /// same way the HTTP handler does.
    fn submit(&mut self) {
        let request = match self.form.request() {
            Ok(request) => request,
            Err(error) => {
                self.error = Some(error);
                return;
            }
        };
        self.error = None;

        let publisher = self.publisher.clone();
        let errors = self.errors.0.clone();
        thread::spawn(move || match compute(&request) {
            Ok(computation) => publisher.push(computation.message),
            Err(error) => {
                tracing::warn!(function = %request.function, %error, "rejected form request");
                let _ = errors.send(error.to_string());
            }
        });
    }

    fn form_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Fixed-point iteration");
        ui.add_space(8.0);

        egui::Grid::new("form").num_columns(2).show(ui, |ui| {
            ui.label("f(x)");
            ui.text_edit_singleline(&mut self.form.function);
            ui.end_row();

            ui.label("x₀");
            ui.text_edit_singleline(&mut self.form.initial_guess);
            ui.end_row();

            ui.label("tolerance");
            ui.text_edit_singleline(&mut self.form.tolerance);
            ui.end_row();

            ui.label("max iterations");
            ui.text_edit_singleline(&mut self.form.max_iterations);
            ui.end_row();
        });

        if ui.button("Solve").clicked() {
            self.submit();
        }

        if let Some(error) = &self.error {
            ui.colored_label(egui::Color32::RED, error);
        }

        if let Some(Shown { message, plot }) = &self.latest {
            ui.separator();
            ui.label(format!("f(x) = {}", message.expression()));
            ui.label(format!("status: {}", message.status()));
            ui.label(format!(
                "iterations: {}",
                message.x_values().len().saturating_sub(1)
            ));
            ui.label(format!("root ≈ {:.10}", plot.root));
        }
    }

    fn plot_ui(&self, ui: &mut egui::Ui) {
        let Some(Shown { message, plot }) = &self.latest else {
            ui.centered_and_justified(|ui| {
                ui.label("Submit a function or POST to /calculate to see its iterates.");
            });
            return;
        };

        Plot::new("fixpoint-plot")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.hline(HLine::new(0.0).name("y = 0"));
                plot_ui.line(
                    Line::new(PlotPoints::from(plot.curve.clone())).name(message.expression()),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(plot.markers.clone()))
                        .radius(3.0)
                        .name("iterates"),
                );
                plot_ui.vline(VLine::new(plot.root).name("root"));
            });
    }
}

impl eframe::App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poller.tick(&mut |message: &ResultMessage, plot: PlotData| {
            self.latest = Some(Shown {
                message: message.clone(),
                plot,
            });
        });

        if let Some(error) = self.errors.1.try_iter().last() {
            self.error = Some(error);
        }

        egui::SidePanel::left("form-panel").show(ctx, |ui| self.form_ui(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.plot_ui(ui));

        ctx.request_repaint_after(self.poll_interval);
    }
}

/// Text fields of the entry form.
#[derive(Debug, Clone, PartialEq)]
struct Form {
    function: String,
    initial_guess: String,
    tolerance: String,
    max_iterations: String,
}

impl Default for Form {
    fn default() -> Self {
        let request = ComputeRequest::default();
        Self {
            function: request.function,
            initial_guess: request.initial_guess.to_string(),
            tolerance: "1e-6".to_owned(),
            max_iterations: request.max_iterations.to_string(),
        }
    }
}

impl Form {
    /// Converts the fields into a request.
    ///
    /// The tolerance is passed through as text, so it is evaluated the same
    /// way as over HTTP.
    fn request(&self) -> Result<ComputeRequest, String> {
        let initial_guess = self
            .initial_guess
            .trim()
            .parse()
            .map_err(|_| format!("initial guess {:?} is not a number", self.initial_guess))?;

        let max_iterations = self.max_iterations.trim().parse().map_err(|_| {
            format!(
                "max iterations {:?} is not a non-negative integer",
                self.max_iterations
            )
        })?;

        Ok(ComputeRequest {
            function: self.function.trim().to_owned(),
            initial_guess,
            tolerance: Tolerance::Text(self.tolerance.trim().to_owned()),
            max_iterations,
        })
    }
}
