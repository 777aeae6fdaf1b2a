use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::{Accent, TaskType};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(12, 12, 18);
pub const BG_CARD: Color32 = Color32::from_rgb(22, 22, 30);
pub const BG_HEADER: Color32 = Color32::from_rgb(26, 27, 36);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(36, 37, 48);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(46, 48, 60);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(90, 140, 220);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const TODAY_LINE: Color32 = Color32::from_rgb(239, 68, 68);
pub const GRID_LINE: Color32 = Color32::from_rgb(38, 40, 52);
pub const GRID_LINE_MONTH: Color32 = Color32::from_rgb(52, 54, 68);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const STATUS_OK: Color32 = Color32::from_rgb(52, 211, 153);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const ROW_HEIGHT: f32 = 28.0;
pub const ROW_GAP: f32 = 4.0;
pub const HEADER_HEIGHT: f32 = 36.0;
pub const SECTION_HEADER_HEIGHT: f32 = 30.0;
pub const NAME_COLUMN_WIDTH: f32 = 224.0;
pub const MIN_TRACK_WIDTH: f32 = 760.0;
pub const HANDLE_WIDTH: f32 = 7.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const BAR_INSET: f32 = 3.0; // vertical inset so bars don't touch row edges

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_title() -> FontId {
    FontId::proportional(20.0)
}

pub fn font_header() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(9.0)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

// ── Item colors ──────────────────────────────────────────────────────────────

/// Gradient endpoints `(from, to)` for a bar of the given type.
pub fn task_bar_colors(kind: Option<TaskType>) -> (Color32, Color32) {
    match kind {
        Some(TaskType::Infra) => {
            (Color32::from_rgb(14, 165, 233), Color32::from_rgb(56, 189, 248))
        }
        Some(TaskType::Development) | None => {
            (Color32::from_rgb(59, 130, 246), Color32::from_rgb(96, 165, 250))
        }
        Some(TaskType::Testing) => {
            (Color32::from_rgb(245, 158, 11), Color32::from_rgb(251, 191, 36))
        }
        Some(TaskType::Deployment) => {
            (Color32::from_rgb(16, 185, 129), Color32::from_rgb(52, 211, 153))
        }
        Some(TaskType::Migration) => {
            (Color32::from_rgb(217, 70, 239), Color32::from_rgb(232, 121, 249))
        }
        Some(TaskType::Onboarding) => {
            (Color32::from_rgb(6, 182, 212), Color32::from_rgb(34, 211, 238))
        }
        Some(TaskType::Milestone) => {
            (Color32::from_rgb(244, 63, 94), Color32::from_rgb(251, 113, 133))
        }
    }
}

/// Text color for labels of the given type (legend).
pub fn task_text_color(kind: TaskType) -> Color32 {
    task_bar_colors(Some(kind)).1
}

/// Text / bar color of an accent family.
pub fn accent_color(accent: Accent) -> Color32 {
    match accent {
        Accent::Blue => Color32::from_rgb(96, 165, 250),
        Accent::Emerald => Color32::from_rgb(52, 211, 153),
        Accent::Amber => Color32::from_rgb(251, 191, 36),
        Accent::Rose => Color32::from_rgb(251, 113, 133),
        Accent::Cyan => Color32::from_rgb(34, 211, 238),
        Accent::Fuchsia => Color32::from_rgb(232, 121, 249),
        Accent::Sky => Color32::from_rgb(56, 189, 248),
    }
}

/// Translucent fill of an accent family for cards and section headers.
pub fn accent_fill(accent: Accent) -> Color32 {
    let c = accent_color(accent);
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), 22)
}

/// Translucent border of an accent family.
pub fn accent_border(accent: Accent) -> Color32 {
    let c = accent_color(accent);
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), 70)
}

pub fn special_item_fill() -> Color32 {
    accent_fill(Accent::Rose)
}

pub fn special_item_stroke() -> Color32 {
    accent_border(Accent::Rose)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_DARK;
    visuals.window_fill = BG_CARD;
    visuals.extreme_bg_color = Color32::from_rgb(18, 18, 26);

    visuals.widgets.noninteractive.bg_fill = BG_CARD;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);

    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
