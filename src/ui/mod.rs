pub mod bar_drag;
pub mod dashboard;
pub mod gantt_chart;
pub mod theme;
