pub mod grid;
pub mod item;
pub mod seed;
pub mod stats;
pub mod timeline;

pub use grid::GridTrack;
pub use item::{Accent, ColumnRange, Phase, TaskType, TimelineItem};
pub use stats::{PhaseProgress, TimelineStats};
pub use timeline::{ItemKey, Section, Timeline};
