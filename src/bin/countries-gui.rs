/*!
 * GUI application for countries-rs - REST Countries browser
 *
 * A desktop window for browsing the world's countries:
 * - Search-as-you-type by name, debounced so only the final query fetches
 * - Loading spinner and error banner driven by the controller state
 * - Country cards with flag link, common name, and formatted population
 *
 * Platform support: Windows, macOS, Linux
 */

use countries_rs::models::Country;
use countries_rs::{Client, SearchController, display, stats};
use eframe::egui;
use std::sync::Arc;
use std::time::{Duration, Instant};

const CARD_COLUMNS: usize = 3;
const CARD_SIZE: [f32; 2] = [250.0, 110.0];
/// Delay per card index when the staggered reveal is enabled.
const STAGGER_PER_CARD: Duration = Duration::from_millis(75);

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Countries - countries-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "Countries",
        options,
        Box::new(|_cc| Ok(Box::new(CountriesApp::new()))),
    )
}

/// Main application state
struct CountriesApp {
    controller: SearchController,
    search_text: String,

    // Presentation-only state
    staggered_reveal: bool,
    results_since: Option<Instant>,
    was_loading: bool,
}

impl CountriesApp {
    fn new() -> Self {
        Self {
            // The controller fetches the full list right away.
            controller: SearchController::new(Arc::new(Client::default())),
            search_text: String::new(),
            staggered_reveal: false,
            results_since: None,
            was_loading: false,
        }
    }
}

impl eframe::App for CountriesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply debounced queries and settled fetches first.
        self.controller.poll();

        // Remember when the current result set arrived (for the reveal).
        let loading = self.controller.state().loading;
        if self.was_loading && !loading {
            self.results_since = Some(Instant::now());
        }
        self.was_loading = loading;

        // Keep polling while a fetch or a debounce window is open (also
        // animates the spinner).
        if !self.controller.is_idle() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Countries");
            ui.add_space(10.0);

            let response = ui.add_sized(
                [ui.available_width(), 0.0],
                egui::TextEdit::singleline(&mut self.search_text).hint_text("Search by name"),
            );
            if response.changed() {
                self.controller.on_query_change(&self.search_text);
            }
            ui.checkbox(&mut self.staggered_reveal, "Staggered card reveal");
            ui.add_space(10.0);

            let state = self.controller.state();
            let summary = stats::population_summary(&state.countries);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if state.loading {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.spinner();
                            ui.label("Loading countries...");
                        });
                    } else if !state.error.is_empty() {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.colored_label(egui::Color32::RED, &state.error);
                        });
                    } else {
                        let visible = match (self.staggered_reveal, self.results_since) {
                            (true, Some(since)) => display::revealed_cards(
                                since.elapsed(),
                                STAGGER_PER_CARD,
                                state.countries.len(),
                            ),
                            _ => state.countries.len(),
                        };
                        if visible < state.countries.len() {
                            // Still revealing: keep the animation going.
                            ctx.request_repaint();
                        }
                        egui::Grid::new("country_cards")
                            .num_columns(CARD_COLUMNS)
                            .spacing([10.0, 10.0])
                            .show(ui, |ui| {
                                for (i, country) in state.countries.iter().enumerate() {
                                    if i < visible {
                                        country_card(ui, country);
                                    } else {
                                        placeholder_card(ui);
                                    }
                                    if (i + 1) % CARD_COLUMNS == 0 {
                                        ui.end_row();
                                    }
                                }
                            });
                    }
                });

            if let Some(s) = summary {
                ui.separator();
                ui.label(format!(
                    "{} countries - total population {}",
                    s.count,
                    display::format_population(s.total, "en")
                ));
            }
        });
    }
}

fn country_card(ui: &mut egui::Ui, country: &Country) {
    ui.group(|ui| {
        ui.set_min_size(egui::vec2(CARD_SIZE[0], CARD_SIZE[1]));
        ui.vertical(|ui| {
            ui.hyperlink_to(country.flags.alt_text(), &country.flags.png);
            ui.label(
                egui::RichText::new(&country.name.common)
                    .strong()
                    .size(16.0),
            );
            ui.label(format!(
                "Population: {}",
                display::format_population(country.population, "en")
            ));
        });
    });
}

fn placeholder_card(ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.set_min_size(egui::vec2(CARD_SIZE[0], CARD_SIZE[1]));
        ui.vertical_centered(|ui| {
            ui.add_space(CARD_SIZE[1] / 2.0 - 8.0);
            ui.weak("...");
        });
    });
}
