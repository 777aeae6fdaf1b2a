use std::path::Path;

use tracing::{error, info, warn};

use crate::config::DashboardSettings;
use crate::model::{grid, seed, stats, ColumnRange, ItemKey, Timeline, TimelineStats};
use crate::ui;
use crate::ui::gantt_chart::range_label;

/// Main application state.
pub struct DashboardApp {
    pub timeline: Timeline,
    pub settings: DashboardSettings,

    // Status message
    pub status_message: String,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings_path = DashboardSettings::default_path();
        let settings = DashboardSettings::load_or_init(&settings_path);
        Self::with_settings(settings, &settings_path)
    }

    /// Build the app state from already-loaded settings. A relative data file
    /// resolves against the directory of `settings_path`.
    pub fn with_settings(settings: DashboardSettings, settings_path: &Path) -> Self {
        let (timeline, status_message) = Self::load_timeline(&settings, settings_path);
        info!(
            phases = timeline.phases.len(),
            tasks = timeline.task_count(),
            special = timeline.special_items.len(),
            "timeline ready"
        );
        Self {
            timeline,
            settings,
            status_message,
        }
    }

    /// Load the configured data file, falling back to the built-in roadmap.
    fn load_timeline(settings: &DashboardSettings, settings_path: &Path) -> (Timeline, String) {
        let builtin = || match seed::sample_timeline() {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, "built-in timeline is invalid");
                Timeline::default()
            }
        };

        let Some(path) = settings.data_path(settings_path) else {
            return (builtin(), "Ready".to_string());
        };

        match Timeline::load(&path) {
            Ok(timeline) => {
                info!(path = %path.display(), "loaded timeline data");
                (timeline, format!("Loaded {}", path.display()))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "falling back to built-in timeline");
                (builtin(), format!("Could not load {}: {}", path.display(), e))
            }
        }
    }

    // --- Timeline edits ---

    /// Apply a committed drag to the owning collection.
    pub fn apply_commit(&mut self, key: &ItemKey, range: ColumnRange) {
        match self.timeline.commit(key, range) {
            Ok(()) => {
                info!(
                    item = %key.name,
                    section = %key.section,
                    start = range.start(),
                    end = range.end(),
                    "range committed"
                );
                self.status_message = format!("Updated '{}' ({})", key.name, range_label(range));
            }
            Err(e) => {
                warn!(error = %e, "commit rejected");
                self.status_message = format!("Update failed: {}", e);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let today_col = grid::today_col(chrono::Local::now().date_naive());

        // Top panel: title and badges
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_CARD)
                    .inner_margin(egui::Margin::symmetric(24.0, 14.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                ui::dashboard::show_header(&self.settings, ui);
            });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {}",
                                self.timeline.task_count()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Today: {} {}",
                                grid::month_label(today_col),
                                grid::half_label(today_col)
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let stats = TimelineStats::from_timeline(&self.timeline);
        let progress = stats::phase_progress(&self.timeline, today_col);

        let mut chart_interaction = ui::gantt_chart::ChartInteraction::default();
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::symmetric(24.0, 16.0)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui::dashboard::show_stats_cards(&stats, ui);
                        ui.add_space(16.0);

                        ui.label(
                            egui::RichText::new("Phase Overview")
                                .strong()
                                .size(13.0)
                                .color(ui::theme::TEXT_PRIMARY),
                        );
                        ui.add_space(6.0);
                        ui::dashboard::show_phase_progress(&progress, ui);
                        ui.add_space(16.0);

                        egui::Frame::default()
                            .fill(ui::theme::BG_CARD)
                            .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE))
                            .rounding(egui::Rounding::same(10.0))
                            .inner_margin(egui::Margin::same(14.0))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    ui.label(
                                        egui::RichText::new("Gantt Chart Timeline")
                                            .strong()
                                            .size(13.0)
                                            .color(ui::theme::TEXT_PRIMARY),
                                    );
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        ui::gantt_chart::show_legend,
                                    );
                                });
                                ui.add_space(6.0);
                                chart_interaction = ui::gantt_chart::show_gantt_chart(
                                    &self.timeline,
                                    today_col,
                                    ui,
                                );
                            });

                        ui.add_space(12.0);
                        ui::dashboard::show_footer(&self.settings, ui);
                    });
            });

        for (key, range) in &chart_interaction.commits {
            self.apply_commit(key, *range);
        }
        if let Some((key, range)) = &chart_interaction.dragging {
            self.status_message = format!("Dragging '{}': {}", key.name, range_label(*range));
        } else if chart_interaction.cancelled {
            self.status_message = "Drag cancelled".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::model::Section;

    fn app_with(settings: DashboardSettings, dir: &Path) -> DashboardApp {
        DashboardApp::with_settings(settings, &dir.join("settings.json"))
    }

    #[test]
    fn test_defaults_use_builtin_timeline() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(DashboardSettings::default(), dir.path());
        assert_eq!(app.timeline, seed::sample_timeline().unwrap());
        assert_eq!(app.status_message, "Ready");
    }

    #[test]
    fn test_data_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("plan.json"),
            r#"{"phases": [{"name": "Only", "tasks": [
                {"name": "A", "type": "infra", "startCol": 0, "endCol": 2}
            ]}]}"#,
        )
        .unwrap();
        let settings = DashboardSettings {
            data_file: Some(PathBuf::from("plan.json")),
            ..Default::default()
        };

        let app = app_with(settings, dir.path());
        assert_eq!(app.timeline.phases.len(), 1);
        assert_eq!(app.timeline.task_count(), 1);
        assert!(app.status_message.starts_with("Loaded"));
    }

    #[test]
    fn test_invalid_data_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("plan.json"),
            r#"{"phases": [{"name": "Bad", "tasks": [
                {"name": "A", "startCol": 9, "endCol": 2}
            ]}]}"#,
        )
        .unwrap();
        let settings = DashboardSettings {
            data_file: Some(PathBuf::from("plan.json")),
            ..Default::default()
        };

        let app = app_with(settings, dir.path());
        assert_eq!(app.timeline, seed::sample_timeline().unwrap());
        assert!(app.status_message.starts_with("Could not load"));
    }

    #[test]
    fn test_apply_commit() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(DashboardSettings::default(), dir.path());
        let key = ItemKey::new(Section::Phase(0), "Dev - UDP Framework");
        let range = ColumnRange::new(6, 12).unwrap();

        app.apply_commit(&key, range);
        assert_eq!(app.timeline.item(&key).unwrap().range, range);
        assert_eq!(app.status_message, "Updated 'Dev - UDP Framework' (Apr H1 → Jul H1)");

        let missing = ItemKey::new(Section::Special, "Nope");
        app.apply_commit(&missing, range);
        assert!(app.status_message.starts_with("Update failed"));
    }
}
