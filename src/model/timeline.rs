use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::item::{ColumnRange, Phase, TimelineItem};
use crate::error::{DashboardError, Result};

/// Which collection an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Phase(usize),
    Special,
}

/// Identifies one item: its owning section plus its name, which is unique
/// within that section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub section: Section,
    pub name: String,
}

impl ItemKey {
    pub fn new(section: Section, name: impl Into<String>) -> Self {
        Self {
            section,
            name: name.into(),
        }
    }
}

/// All phases and special items shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub special_items: Vec<TimelineItem>,
}

impl Timeline {
    /// Build a timeline, rejecting duplicate names within a section.
    pub fn new(phases: Vec<Phase>, special_items: Vec<TimelineItem>) -> Result<Self> {
        let timeline = Self {
            phases,
            special_items,
        };
        timeline.validate()?;
        Ok(timeline)
    }

    /// Parse and validate a timeline from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let timeline: Timeline = serde_json::from_str(json)?;
        timeline.validate()?;
        Ok(timeline)
    }

    /// Load a timeline data file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        for (i, phase) in self.phases.iter().enumerate() {
            check_unique(&phase.items, || self.section_name(Section::Phase(i)))?;
        }
        check_unique(&self.special_items, || self.section_name(Section::Special))
    }

    /// Items of one section, in display order.
    pub fn section_items(&self, section: Section) -> &[TimelineItem] {
        match section {
            Section::Phase(i) => self
                .phases
                .get(i)
                .map(|p| p.items.as_slice())
                .unwrap_or(&[]),
            Section::Special => &self.special_items,
        }
    }

    pub fn item(&self, key: &ItemKey) -> Option<&TimelineItem> {
        self.section_items(key.section)
            .iter()
            .find(|item| item.name == key.name)
    }

    fn item_mut(&mut self, key: &ItemKey) -> Option<&mut TimelineItem> {
        let items = match key.section {
            Section::Phase(i) => &mut self.phases.get_mut(i)?.items,
            Section::Special => &mut self.special_items,
        };
        items.iter_mut().find(|item| item.name == key.name)
    }

    /// Replace an item's range with a committed drag result.
    pub fn commit(&mut self, key: &ItemKey, range: ColumnRange) -> Result<()> {
        match self.item_mut(key) {
            Some(item) => {
                item.range = range;
                Ok(())
            }
            None => Err(DashboardError::UnknownItem {
                name: key.name.clone(),
                section: self.section_name(key.section),
            }),
        }
    }

    /// Number of items across all phases. Special items are not counted.
    pub fn task_count(&self) -> usize {
        self.phases.iter().map(|p| p.items.len()).sum()
    }

    pub fn section_name(&self, section: Section) -> String {
        match section {
            Section::Phase(i) => self
                .phases
                .get(i)
                .map(|p| format!("phase '{}'", p.name))
                .unwrap_or_else(|| format!("phase #{}", i)),
            Section::Special => "special items".to_string(),
        }
    }
}

fn check_unique(items: &[TimelineItem], section: impl Fn() -> String) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.name.as_str()) {
            return Err(DashboardError::DuplicateItem {
                name: item.name.clone(),
                section: section(),
            });
        }
    }
    Ok(())
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Phase(i) => write!(f, "phase {}", i),
            Section::Special => write!(f, "special"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::{Accent, TaskType};

    fn range(s: u8, e: u8) -> ColumnRange {
        ColumnRange::new(s, e).unwrap()
    }

    fn sample() -> Timeline {
        Timeline::new(
            vec![
                Phase::new(
                    "KUMO",
                    Accent::Blue,
                    vec![
                        TimelineItem::new("SIT", range(8, 11)).with_kind(TaskType::Testing),
                        TimelineItem::new("PVT", range(12, 14)).with_kind(TaskType::Testing),
                    ],
                ),
                Phase::new(
                    "Apollo",
                    Accent::Emerald,
                    vec![TimelineItem::new("SIT", range(12, 15)).with_kind(TaskType::Testing)],
                ),
            ],
            vec![TimelineItem::new("Switch OBD", range(18, 20))],
        )
        .unwrap()
    }

    #[test]
    fn test_same_name_allowed_in_different_sections() {
        let t = sample();
        assert_eq!(t.task_count(), 3);
        let kumo_sit = t.item(&ItemKey::new(Section::Phase(0), "SIT")).unwrap();
        let apollo_sit = t.item(&ItemKey::new(Section::Phase(1), "SIT")).unwrap();
        assert_eq!(kumo_sit.range, range(8, 11));
        assert_eq!(apollo_sit.range, range(12, 15));
    }

    #[test]
    fn test_duplicate_name_in_section_rejected() {
        let err = Timeline::new(
            vec![Phase::new(
                "KUMO",
                Accent::Blue,
                vec![
                    TimelineItem::new("SIT", range(8, 11)),
                    TimelineItem::new("SIT", range(1, 2)),
                ],
            )],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::DuplicateItem { ref name, .. } if name == "SIT"));
    }

    #[test]
    fn test_commit_updates_only_target() {
        let mut t = sample();
        t.commit(&ItemKey::new(Section::Phase(1), "SIT"), range(6, 9))
            .unwrap();
        assert_eq!(
            t.item(&ItemKey::new(Section::Phase(1), "SIT")).unwrap().range,
            range(6, 9)
        );
        assert_eq!(
            t.item(&ItemKey::new(Section::Phase(0), "SIT")).unwrap().range,
            range(8, 11)
        );

        t.commit(&ItemKey::new(Section::Special, "Switch OBD"), range(20, 23))
            .unwrap();
        assert_eq!(t.special_items[0].range, range(20, 23));
    }

    #[test]
    fn test_commit_unknown_item() {
        let mut t = sample();
        let err = t
            .commit(&ItemKey::new(Section::Phase(0), "UAT"), range(1, 2))
            .unwrap_err();
        assert!(matches!(err, DashboardError::UnknownItem { .. }));

        let err = t
            .commit(&ItemKey::new(Section::Phase(9), "SIT"), range(1, 2))
            .unwrap_err();
        assert!(matches!(err, DashboardError::UnknownItem { .. }));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "phases": [
                {"name": "AIVS", "accent": "amber", "tasks": [
                    {"name": "SIT - AIVS", "type": "testing", "startCol": 17, "endCol": 19},
                    {"name": "UAT - AIVS", "type": "testing", "startCol": 18, "endCol": 20,
                     "note": "Need confirm timeline"}
                ]}
            ],
            "specialItems": [
                {"name": "TBD: Oracle Framework", "startCol": 20, "endCol": 23}
            ]
        }"#;
        let t = Timeline::from_json(json).unwrap();
        assert_eq!(t.phases[0].accent, Accent::Amber);
        assert_eq!(t.phases[0].items.len(), 2);
        assert_eq!(t.special_items[0].range, range(20, 23));
        assert_eq!(t.special_items[0].kind, None);
    }

    #[test]
    fn test_from_json_rejects_bad_column() {
        let json = r#"{"phases": [{"name": "P", "tasks": [
            {"name": "x", "startCol": 3, "endCol": 24}
        ]}]}"#;
        assert!(Timeline::from_json(json).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.json");
        let json = serde_json::to_string_pretty(&sample()).unwrap();
        std::fs::write(&path, json).unwrap();

        let loaded = Timeline::load(&path).unwrap();
        assert_eq!(loaded, sample());

        let missing = Timeline::load(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(DashboardError::Io { .. })));
    }
}
