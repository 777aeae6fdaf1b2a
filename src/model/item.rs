use serde::{Deserialize, Serialize};

use super::grid::MAX_COL;
use crate::error::{DashboardError, Result};

/// A closed range of half-month columns.
///
/// Always satisfies `0 <= start <= end <= 23`. [`ColumnRange::new`] rejects
/// anything else; [`ColumnRange::clamped`] forces arbitrary bounds onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRange {
    start: u8,
    end: u8,
}

impl ColumnRange {
    pub fn new(start: u8, end: u8) -> Result<Self> {
        check_col(start as i64)?;
        check_col(end as i64)?;
        if start > end {
            return Err(DashboardError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range from signed column values, as read from a data file.
    pub fn from_cols(start: i64, end: i64) -> Result<Self> {
        Self::new(check_col(start)?, check_col(end)?)
    }

    /// Force signed bounds back onto the grid: `start` into `0..=23`, then
    /// `end` into `start..=23`. Never swaps the bounds.
    pub fn clamped(start: i32, end: i32) -> Self {
        let start = start.clamp(0, MAX_COL as i32);
        let end = end.clamp(start, MAX_COL as i32);
        Self {
            start: start as u8,
            end: end as u8,
        }
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    /// Number of columns between the bounds (`end - start`).
    pub fn span(&self) -> u8 {
        self.end - self.start
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: ColumnRange) -> ColumnRange {
        ColumnRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

fn check_col(col: i64) -> Result<u8> {
    if (0..=MAX_COL as i64).contains(&col) {
        Ok(col as u8)
    } else {
        Err(DashboardError::ColumnOutOfRange { col, max: MAX_COL })
    }
}

/// Category of a timeline item. Only affects the bar color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Infra,
    Development,
    Testing,
    Deployment,
    Migration,
    Onboarding,
    Milestone,
}

impl TaskType {
    pub const ALL: [TaskType; 7] = [
        TaskType::Infra,
        TaskType::Development,
        TaskType::Testing,
        TaskType::Deployment,
        TaskType::Migration,
        TaskType::Onboarding,
        TaskType::Milestone,
    ];

    /// Human-readable label used by the legend.
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Infra => "Infrastructure",
            TaskType::Development => "Development",
            TaskType::Testing => "Testing",
            TaskType::Deployment => "Deployment",
            TaskType::Migration => "Data Migration",
            TaskType::Onboarding => "Onboarding",
            TaskType::Milestone => "Milestone",
        }
    }
}

/// A single bar on the timeline: a task inside a phase, or a special item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct TimelineItem {
    pub name: String,
    pub kind: Option<TaskType>,
    pub range: ColumnRange,
    /// Short annotation shown on hover.
    pub note: Option<String>,
}

impl TimelineItem {
    pub fn new(name: impl Into<String>, range: ColumnRange) -> Self {
        Self {
            name: name.into(),
            kind: None,
            range,
            note: None,
        }
    }

    pub fn with_kind(mut self, kind: TaskType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// On-disk shape of an item, matching the dashboard data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<TaskType>,
    start_col: i64,
    end_col: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl TryFrom<ItemRecord> for TimelineItem {
    type Error = DashboardError;

    fn try_from(record: ItemRecord) -> Result<Self> {
        Ok(Self {
            range: ColumnRange::from_cols(record.start_col, record.end_col)?,
            name: record.name,
            kind: record.kind,
            note: record.note,
        })
    }
}

impl From<TimelineItem> for ItemRecord {
    fn from(item: TimelineItem) -> Self {
        Self {
            name: item.name,
            kind: item.kind,
            start_col: item.range.start() as i64,
            end_col: item.range.end() as i64,
            note: item.note,
        }
    }
}

/// Accent color family of a phase header and its progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Blue,
    Emerald,
    Amber,
    Rose,
    Cyan,
    Fuchsia,
    Sky,
}

/// A named, ordered group of timeline items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    #[serde(default)]
    pub accent: Accent,
    #[serde(rename = "tasks")]
    pub items: Vec<TimelineItem>,
}

impl Phase {
    pub fn new(name: impl Into<String>, accent: Accent, items: Vec<TimelineItem>) -> Self {
        Self {
            name: name.into(),
            accent,
            items,
        }
    }

    /// Columns covered by all items in the phase, from the earliest start to
    /// the latest end. `None` for an empty phase.
    pub fn span(&self) -> Option<ColumnRange> {
        self.items
            .iter()
            .map(|item| item.range)
            .reduce(|acc, r| acc.union(r))
    }
}
