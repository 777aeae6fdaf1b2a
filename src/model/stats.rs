use super::grid::month_label;
use super::item::{Accent, TaskType};
use super::timeline::Timeline;

/// Headline numbers shown in the stats row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimelineStats {
    pub total_tasks: usize,
    pub development: usize,
    pub deployments: usize,
    pub testing: usize,
    pub migrations: usize,
    pub onboarding: usize,
}

impl TimelineStats {
    pub fn from_timeline(timeline: &Timeline) -> Self {
        Self {
            total_tasks: timeline.task_count(),
            development: count_by_type(timeline, TaskType::Development),
            deployments: count_by_type(timeline, TaskType::Deployment),
            testing: count_by_type(timeline, TaskType::Testing),
            migrations: count_by_type(timeline, TaskType::Migration),
            onboarding: count_by_type(timeline, TaskType::Onboarding),
        }
    }
}

/// Number of phase items of the given type.
pub fn count_by_type(timeline: &Timeline, kind: TaskType) -> usize {
    timeline
        .phases
        .iter()
        .flat_map(|p| p.items.iter())
        .filter(|item| item.kind == Some(kind))
        .count()
}

/// How far "today" has advanced through a phase's column span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseProgress {
    pub name: String,
    pub accent: Accent,
    pub start_month: Option<&'static str>,
    pub end_month: Option<&'static str>,
    pub task_count: usize,
    /// Percentage elapsed, 0..=100.
    pub progress: u8,
}

impl PhaseProgress {
    pub fn month_range_label(&self) -> String {
        match (self.start_month, self.end_month) {
            (Some(s), Some(e)) => format!("{} - {}", s, e),
            _ => "—".to_string(),
        }
    }
}

/// Progress of every phase relative to `today_col`.
pub fn phase_progress(timeline: &Timeline, today_col: u8) -> Vec<PhaseProgress> {
    timeline
        .phases
        .iter()
        .map(|phase| {
            let span = phase.span();
            let progress = span
                .map(|r| {
                    let total = (r.end() - r.start() + 1) as i32;
                    let elapsed = (today_col as i32 - r.start() as i32).clamp(0, total);
                    let pct = (elapsed as f64 / total as f64 * 100.0).round() as i32;
                    pct.min(100) as u8
                })
                .unwrap_or(0);

            PhaseProgress {
                name: phase.name.clone(),
                accent: phase.accent,
                start_month: span.map(|r| month_label(r.start())),
                end_month: span.map(|r| month_label(r.end())),
                task_count: phase.items.len(),
                progress,
            }
        })
        .collect()
}
