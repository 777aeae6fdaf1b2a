use egui::{Color32, CursorIcon, Id, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};
use tracing::debug;

use crate::model::grid::{half_label, month_label, MONTHS, TOTAL_COLS};
use crate::model::{ColumnRange, GridTrack, ItemKey, Section, Timeline, TimelineItem};
use crate::ui::bar_drag::{BarController, GestureKind};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_GAP: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const SECTION_HEADER_HEIGHT: f32 = theme::SECTION_HEADER_HEIGHT;
const SECTION_GAP: f32 = 10.0;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// Result details from interactions in the Gantt chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// Ranges whose gesture finished with a different value than it started.
    pub commits: Vec<(ItemKey, ColumnRange)>,
    /// Item currently being dragged and its live range.
    pub dragging: Option<(ItemKey, ColumnRange)>,
    /// Set when an in-progress gesture was aborted this frame.
    pub cancelled: bool,
}

/// How a row's bar is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarStyle {
    Task,
    Special,
}

/// Render the Gantt chart: month header, phase sections, special items and
/// the today marker.
pub fn show_gantt_chart(timeline: &Timeline, today_col: u8, ui: &mut Ui) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();

    // Gestures end without a commit on Escape or when the window loses focus.
    let cancel = ui.input(|i| i.key_pressed(egui::Key::Escape) || !i.focused);

    egui::ScrollArea::horizontal()
        .id_salt("gantt_scroll")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            let chart_width = ui
                .available_width()
                .max(theme::NAME_COLUMN_WIDTH + theme::MIN_TRACK_WIDTH);
            let chart_height = chart_height(timeline);
            let (response, painter) =
                ui.allocate_painter(Vec2::new(chart_width, chart_height), Sense::hover());
            let origin = response.rect.min;
            let track = GridTrack::new(
                origin.x + theme::NAME_COLUMN_WIDTH,
                chart_width - theme::NAME_COLUMN_WIDTH,
            );
            let body_top = origin.y + HEADER_HEIGHT;
            let body_bottom = origin.y + chart_height;

            draw_month_header(&painter, origin, track);
            draw_grid_lines(&painter, track, body_top, body_bottom);

            let mut y = body_top + SECTION_GAP;
            for (i, phase) in timeline.phases.iter().enumerate() {
                draw_section_header(
                    &painter,
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, SECTION_HEADER_HEIGHT),
                    ),
                    &phase.name,
                    Some(phase.items.len()),
                    theme::accent_color(phase.accent),
                    theme::accent_fill(phase.accent),
                    theme::accent_border(phase.accent),
                );
                y += SECTION_HEADER_HEIGHT + ROW_GAP;

                for item in &phase.items {
                    let key = ItemKey::new(Section::Phase(i), item.name.clone());
                    show_item_row(
                        ui,
                        &painter,
                        track,
                        y,
                        key,
                        item,
                        BarStyle::Task,
                        cancel,
                        &mut interaction,
                    );
                    y += ROW_HEIGHT + ROW_GAP;
                }
                y += SECTION_GAP;
            }

            if !timeline.special_items.is_empty() {
                draw_section_header(
                    &painter,
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, SECTION_HEADER_HEIGHT),
                    ),
                    "Special Items",
                    None,
                    theme::accent_color(crate::model::Accent::Rose),
                    theme::special_item_fill(),
                    theme::special_item_stroke(),
                );
                y += SECTION_HEADER_HEIGHT + ROW_GAP;

                for item in &timeline.special_items {
                    let key = ItemKey::new(Section::Special, item.name.clone());
                    show_item_row(
                        ui,
                        &painter,
                        track,
                        y,
                        key,
                        item,
                        BarStyle::Special,
                        cancel,
                        &mut interaction,
                    );
                    y += ROW_HEIGHT + ROW_GAP;
                }
            }

            draw_today_line(&painter, track, today_col, body_top, body_bottom);
        });

    interaction
}

/// Total painted height for a timeline, matching the layout in `show_gantt_chart`.
fn chart_height(timeline: &Timeline) -> f32 {
    let row = ROW_HEIGHT + ROW_GAP;
    let section = SECTION_HEADER_HEIGHT + ROW_GAP;
    let mut h = HEADER_HEIGHT + SECTION_GAP;
    for phase in &timeline.phases {
        h += section + phase.items.len() as f32 * row + SECTION_GAP;
    }
    if !timeline.special_items.is_empty() {
        h += section + timeline.special_items.len() as f32 * row;
    }
    h + SECTION_GAP
}

#[allow(clippy::too_many_arguments)]
fn show_item_row(
    ui: &Ui,
    painter: &egui::Painter,
    track: GridTrack,
    y: f32,
    key: ItemKey,
    item: &TimelineItem,
    style: BarStyle,
    cancel: bool,
    interaction: &mut ChartInteraction,
) {
    // Name column, right-aligned and clipped so long names don't spill onto the track
    let name_rect = Rect::from_min_max(
        Pos2::new(track.left - theme::NAME_COLUMN_WIDTH, y),
        Pos2::new(track.left - 12.0, y + ROW_HEIGHT),
    );
    painter.with_clip_rect(name_rect).text(
        Pos2::new(name_rect.right(), name_rect.center().y),
        egui::Align2::RIGHT_CENTER,
        &item.name,
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );

    let id = drag_id(&key);
    let mut controller = ui
        .ctx()
        .data(|data| data.get_temp::<BarController>(id))
        .unwrap_or_else(|| BarController::new(item.range));
    controller.sync(item.range);

    let hit_rect = bar_rect(track, controller.displayed(), y);
    let bar_response = ui.interact(hit_rect, id.with("move"), Sense::drag());
    let left_handle_rect = Rect::from_min_max(
        Pos2::new(hit_rect.left() - HANDLE_WIDTH * 0.5, hit_rect.top()),
        Pos2::new(hit_rect.left() + HANDLE_WIDTH * 0.5, hit_rect.bottom()),
    );
    let right_handle_rect = Rect::from_min_max(
        Pos2::new(hit_rect.right() - HANDLE_WIDTH * 0.5, hit_rect.top()),
        Pos2::new(hit_rect.right() + HANDLE_WIDTH * 0.5, hit_rect.bottom()),
    );
    let left_response = ui.interact(
        left_handle_rect.expand(3.0),
        id.with("resize-left"),
        Sense::drag(),
    );
    let right_response = ui.interact(
        right_handle_rect.expand(3.0),
        id.with("resize-right"),
        Sense::drag(),
    );

    let handles = [
        (&left_response, GestureKind::ResizeLeft),
        (&right_response, GestureKind::ResizeRight),
        (&bar_response, GestureKind::Move),
    ];

    for (response, kind) in handles {
        if response.drag_started_by(egui::PointerButton::Primary) {
            // egui reports the drag once past its threshold; anchor on the press point
            let press_x = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos())
                .map(|p| p.x);
            if let Some(x) = press_x {
                if controller.begin(kind, x, track.width) {
                    debug!(item = %key.name, section = %key.section, ?kind, "drag started");
                }
            }
            break;
        }
    }

    if let Some(session) = controller.session().cloned() {
        let pointer_x = ui.input(|i| i.pointer.latest_pos()).map(|p| p.x);
        let released = ui.input(|i| i.pointer.primary_released() || !i.pointer.primary_down())
            || handles
                .iter()
                .any(|(r, kind)| *kind == session.kind() && r.drag_stopped());

        if cancel {
            controller.cancel();
            interaction.cancelled = true;
            debug!(item = %key.name, origin = ?session.origin(), "drag cancelled");
        } else if released {
            let x = pointer_x.unwrap_or(session.last_x());
            if let Some(range) = controller.release(x) {
                interaction.commits.push((key.clone(), range));
            }
        } else if let Some(x) = pointer_x {
            controller.drag_to(x);
        }
    }

    let displayed = controller.displayed();
    let dragging = controller.session().map(|s| s.kind());
    if controller.is_dragging() {
        interaction.dragging = Some((key.clone(), displayed));
    }
    ui.ctx().data_mut(|data| data.insert_temp(id, controller));

    // Cursor affordances
    match dragging {
        Some(GestureKind::Move) => ui.ctx().set_cursor_icon(CursorIcon::Grabbing),
        Some(_) => ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal),
        None if left_response.hovered() || right_response.hovered() => {
            ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal)
        }
        None if bar_response.hovered() => ui.ctx().set_cursor_icon(CursorIcon::Grab),
        None => {}
    }

    let hovered = bar_response.hovered() || left_response.hovered() || right_response.hovered();
    let rect = bar_rect(track, displayed, y);
    match style {
        BarStyle::Task => draw_task_bar(painter, rect, item, hovered, dragging.is_some()),
        BarStyle::Special => draw_special_bar(painter, rect, dragging.is_some()),
    }

    if hovered || dragging.is_some() {
        draw_handles(painter, rect);
    }

    if dragging.is_some() {
        show_tooltip(ui, &key, |ui| {
            ui.strong(&item.name);
            ui.label(range_label(displayed));
        });
    } else if hovered {
        show_tooltip(ui, &key, |ui| {
            ui.strong(&item.name);
            ui.label(range_label(displayed));
            if let Some(note) = &item.note {
                ui.label(egui::RichText::new(note).color(theme::TEXT_SECONDARY));
            }
        });
    }
}

fn show_tooltip(ui: &Ui, key: &ItemKey, add_contents: impl FnOnce(&mut Ui)) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        Id::new(("bar-tip", key)),
        add_contents,
    );
}

fn drag_id(key: &ItemKey) -> Id {
    Id::new(("bar-drag", key))
}

/// Screen rect of a bar in the row starting at `y`.
fn bar_rect(track: GridTrack, range: ColumnRange, y: f32) -> Rect {
    let (x0, x1) = track.range_to_x(range);
    let inset = theme::BAR_INSET;
    Rect::from_min_max(
        Pos2::new(x0 + 1.0, y + inset),
        Pos2::new((x1 - 1.0).max(x0 + 4.0), y + ROW_HEIGHT - inset),
    )
}

/// "Mar H1 → Jun H2"
pub fn range_label(range: ColumnRange) -> String {
    format!(
        "{} {} → {} {}",
        month_label(range.start()),
        half_label(range.start()),
        month_label(range.end()),
        half_label(range.end()),
    )
}

fn draw_month_header(painter: &egui::Painter, origin: Pos2, track: GridTrack) {
    let header = Rect::from_min_max(
        origin,
        Pos2::new(track.left + track.width, origin.y + HEADER_HEIGHT),
    );
    painter.rect_filled(header, 0.0, theme::BG_HEADER);
    painter.line_segment(
        [header.left_bottom(), header.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let col_w = track.col_width();
    for (m, month) in MONTHS.iter().enumerate() {
        let x = track.col_to_x((m * 2) as u8);
        painter.text(
            Pos2::new(x + col_w, origin.y + 11.0),
            egui::Align2::CENTER_CENTER,
            month.to_uppercase(),
            theme::font_header(),
            theme::TEXT_SECONDARY,
        );
    }

    for col in 0..TOTAL_COLS {
        let x = track.col_to_x(col);
        painter.text(
            Pos2::new(x + col_w / 2.0, origin.y + 27.0),
            egui::Align2::CENTER_CENTER,
            half_label(col),
            theme::font_sub(),
            theme::TEXT_DIM,
        );
    }
}

fn draw_grid_lines(painter: &egui::Painter, track: GridTrack, top: f32, bottom: f32) {
    for col in 0..=TOTAL_COLS {
        let x = track.col_to_x(col);
        let color = if col % 2 == 0 {
            theme::GRID_LINE_MONTH
        } else {
            theme::GRID_LINE
        };
        painter.line_segment(
            [Pos2::new(x, top - HEADER_HEIGHT), Pos2::new(x, bottom)],
            Stroke::new(0.5, color),
        );
    }
}

fn draw_section_header(
    painter: &egui::Painter,
    rect: Rect,
    name: &str,
    task_count: Option<usize>,
    text: Color32,
    fill: Color32,
    border: Color32,
) {
    let rounding = Rounding {
        nw: 0.0,
        sw: 0.0,
        ne: 6.0,
        se: 6.0,
    };
    painter.rect_filled(rect, rounding, fill);
    painter.line_segment(
        [rect.left_top(), rect.left_bottom()],
        Stroke::new(2.0, border),
    );

    let galley = painter.layout_no_wrap(
        name.to_string(),
        egui::FontId::proportional(13.0),
        text,
    );
    let name_width = galley.size().x;
    painter.galley(
        Pos2::new(rect.left() + 12.0, rect.center().y - galley.size().y / 2.0),
        galley,
        Color32::TRANSPARENT,
    );

    if let Some(count) = task_count {
        painter.text(
            Pos2::new(rect.left() + 12.0 + name_width + 10.0, rect.center().y),
            egui::Align2::LEFT_CENTER,
            format!("{} tasks", count),
            theme::font_small(),
            theme::TEXT_DIM,
        );
    }
}

fn draw_task_bar(
    painter: &egui::Painter,
    bar_rect: Rect,
    item: &TimelineItem,
    hovered: bool,
    dragging: bool,
) {
    let (from, to) = theme::task_bar_colors(item.kind);
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let opacity = if hovered || dragging { 1.0 } else { 0.8 };

    if hovered || dragging {
        let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
        painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(60));
    }

    painter.rect_filled(bar_rect, rounding, from.gamma_multiply(opacity));

    // Right half blends toward the lighter end of the gradient
    let tail = Rect::from_min_max(
        Pos2::new(bar_rect.center().x, bar_rect.top()),
        bar_rect.max,
    );
    painter.rect_filled(
        tail,
        Rounding {
            nw: 0.0,
            sw: 0.0,
            ne: theme::BAR_ROUNDING,
            se: theme::BAR_ROUNDING,
        },
        to.gamma_multiply(opacity * 0.6),
    );

    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(18),
    );

    if dragging {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }
}

fn draw_special_bar(painter: &egui::Painter, bar_rect: Rect, dragging: bool) {
    painter.rect_filled(
        bar_rect,
        Rounding::same(theme::BAR_ROUNDING),
        theme::special_item_fill(),
    );
    let outline = [
        bar_rect.left_top(),
        bar_rect.right_top(),
        bar_rect.right_bottom(),
        bar_rect.left_bottom(),
        bar_rect.left_top(),
    ];
    let stroke = if dragging {
        Stroke::new(1.5, theme::BORDER_ACCENT)
    } else {
        Stroke::new(1.0, theme::special_item_stroke())
    };
    painter.extend(Shape::dashed_line(&outline, stroke, 5.0, 3.0));
}

fn draw_handles(painter: &egui::Painter, bar_rect: Rect) {
    let handle_h = bar_rect.height() * 0.55;
    let handle_y = bar_rect.center().y - handle_h / 2.0;
    let lh = Rect::from_min_size(
        Pos2::new(bar_rect.left() - 1.5, handle_y),
        Vec2::new(4.0, handle_h),
    );
    let rh = Rect::from_min_size(
        Pos2::new(bar_rect.right() - 2.5, handle_y),
        Vec2::new(4.0, handle_h),
    );
    painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
    painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
}

fn draw_today_line(
    painter: &egui::Painter,
    track: GridTrack,
    today_col: u8,
    top: f32,
    bottom: f32,
) {
    let x = track.col_to_x(today_col);

    painter.line_segment(
        [Pos2::new(x, top), Pos2::new(x, bottom)],
        Stroke::new(1.0, theme::TODAY_LINE.gamma_multiply(0.6)),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, top - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(7.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "TODAY",
        theme::font_small(),
        Color32::WHITE,
    );
}

/// Color key for the task types that appear as bars.
pub fn show_legend(ui: &mut Ui) {
    use crate::model::TaskType;

    ui.horizontal_wrapped(|ui| {
        for kind in TaskType::ALL {
            if kind == TaskType::Milestone {
                continue;
            }
            let (from, to) = theme::task_bar_colors(Some(kind));
            let (rect, _) = ui.allocate_exact_size(Vec2::new(20.0, 10.0), Sense::hover());
            ui.painter().rect_filled(rect, Rounding::same(2.0), from);
            ui.painter().rect_filled(
                Rect::from_min_max(Pos2::new(rect.center().x, rect.top()), rect.max),
                Rounding {
                    nw: 0.0,
                    sw: 0.0,
                    ne: 2.0,
                    se: 2.0,
                },
                to,
            );
            ui.label(
                egui::RichText::new(kind.label())
                    .size(11.0)
                    .color(theme::task_text_color(kind)),
            );
            ui.add_space(8.0);
        }
    });
}
