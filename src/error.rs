use thiserror::Error;

/// Result alias used throughout the dashboard.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors raised while loading settings or timeline data, or committing edits.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("column {col} is outside the grid (0..={max})")]
    ColumnOutOfRange { col: i64, max: u8 },

    #[error("inverted range: start {start} is after end {end}")]
    InvertedRange { start: u8, end: u8 },

    #[error("item '{name}' appears more than once in {section}")]
    DuplicateItem { name: String, section: String },

    #[error("no item named '{name}' in {section}")]
    UnknownItem { name: String, section: String },
}
