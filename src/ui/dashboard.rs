use egui::{Color32, Frame, Margin, RichText, Rounding, Stroke, Ui};
use egui_phosphor::regular as icons;

use crate::config::DashboardSettings;
use crate::model::{Accent, PhaseProgress, TimelineStats};
use crate::ui::theme;

/// Title block with the "Updated" label and the status badge.
pub fn show_header(settings: &DashboardSettings, ui: &mut Ui) {
    ui.horizontal(|ui| {
        Frame::default()
            .fill(theme::accent_fill(Accent::Blue))
            .rounding(Rounding::same(8.0))
            .inner_margin(Margin::same(8.0))
            .show(ui, |ui| {
                ui.label(
                    RichText::new(icons::CALENDAR)
                        .size(20.0)
                        .color(theme::ACCENT),
                );
            });
        ui.vertical(|ui| {
            ui.label(
                RichText::new(&settings.title)
                    .font(theme::font_title())
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            );
            ui.label(
                RichText::new(&settings.subtitle)
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            pill(
                ui,
                theme::accent_fill(Accent::Emerald),
                theme::accent_border(Accent::Emerald),
                |ui| {
                    ui.label(
                        RichText::new(format!("● {}", settings.status))
                            .size(11.0)
                            .color(theme::STATUS_OK),
                    );
                },
            );
            pill(ui, theme::BG_SECONDARY, theme::BORDER_SUBTLE, |ui| {
                ui.label(
                    RichText::new(format!("Updated: {}", settings.updated))
                        .size(11.0)
                        .color(theme::TEXT_SECONDARY),
                );
            });
        });
    });
}

fn pill(ui: &mut Ui, fill: Color32, border: Color32, add_contents: impl FnOnce(&mut Ui)) {
    Frame::default()
        .fill(fill)
        .stroke(Stroke::new(1.0, border))
        .rounding(Rounding::same(8.0))
        .inner_margin(Margin::symmetric(10.0, 5.0))
        .show(ui, add_contents);
}

struct StatCard {
    label: &'static str,
    value: usize,
    icon: &'static str,
    accent: Accent,
}

/// Row of headline counters.
pub fn show_stats_cards(stats: &TimelineStats, ui: &mut Ui) {
    let cards = [
        StatCard {
            label: "Total Tasks",
            value: stats.total_tasks,
            icon: icons::STACK,
            accent: Accent::Blue,
        },
        StatCard {
            label: "Development",
            value: stats.development,
            icon: icons::DATABASE,
            accent: Accent::Blue,
        },
        StatCard {
            label: "Deployments",
            value: stats.deployments,
            icon: icons::HARD_DRIVES,
            accent: Accent::Emerald,
        },
        StatCard {
            label: "Testing Phases",
            value: stats.testing,
            icon: icons::CHECK_CIRCLE,
            accent: Accent::Amber,
        },
        StatCard {
            label: "Data Migrations",
            value: stats.migrations,
            icon: icons::CLOCK,
            accent: Accent::Fuchsia,
        },
        StatCard {
            label: "Onboarding",
            value: stats.onboarding,
            icon: icons::USERS,
            accent: Accent::Cyan,
        },
    ];

    ui.columns(cards.len(), |columns| {
        for (ui, card) in columns.iter_mut().zip(cards.iter()) {
            let color = theme::accent_color(card.accent);
            card_frame(card.accent).show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(card.icon).size(14.0).color(color));
                    ui.label(
                        RichText::new(card.label)
                            .size(11.0)
                            .color(theme::TEXT_SECONDARY),
                    );
                });
                ui.label(
                    RichText::new(card.value.to_string())
                        .size(24.0)
                        .strong()
                        .color(color),
                );
            });
        }
    });
}

/// One card per phase with its month span and elapsed bar.
pub fn show_phase_progress(progress: &[PhaseProgress], ui: &mut Ui) {
    if progress.is_empty() {
        return;
    }
    ui.columns(progress.len(), |columns| {
        for (ui, phase) in columns.iter_mut().zip(progress.iter()) {
            let color = theme::accent_color(phase.accent);
            card_frame(phase.accent).show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&phase.name).strong().size(13.0).color(color));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(phase.month_range_label())
                                .size(11.0)
                                .color(theme::TEXT_SECONDARY),
                        );
                    });
                });
                ui.label(
                    RichText::new(format!("{} tasks", phase.task_count))
                        .size(11.0)
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(4.0);
                progress_bar(ui, phase.progress, color);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.label(
                        RichText::new(format!("{}% elapsed", phase.progress))
                            .size(10.0)
                            .color(theme::TEXT_DIM),
                    );
                });
            });
        }
    });
}

fn progress_bar(ui: &mut Ui, percent: u8, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), 6.0),
        egui::Sense::hover(),
    );
    let painter = ui.painter();
    painter.rect_filled(rect, Rounding::same(3.0), theme::BG_SECONDARY);
    let filled = rect.width() * (percent.min(100) as f32 / 100.0);
    if filled > 0.0 {
        let fill_rect = egui::Rect::from_min_size(rect.min, egui::vec2(filled, rect.height()));
        painter.rect_filled(fill_rect, Rounding::same(3.0), color);
    }
}

fn card_frame(accent: Accent) -> Frame {
    Frame::default()
        .fill(theme::accent_fill(accent))
        .stroke(Stroke::new(1.0, theme::accent_border(accent)))
        .rounding(Rounding::same(10.0))
        .inner_margin(Margin::symmetric(14.0, 10.0))
}

pub fn show_footer(settings: &DashboardSettings, ui: &mut Ui) {
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(&settings.footer_left)
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(&settings.footer_right)
                    .size(11.0)
                    .color(theme::TEXT_DIM),
            );
        });
    });
}
