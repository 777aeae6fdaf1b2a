use chrono::{Datelike, NaiveDate};

use super::item::ColumnRange;

/// Number of half-month columns spanning one calendar year.
pub const TOTAL_COLS: u8 = 24;
/// Highest valid column index.
pub const MAX_COL: u8 = TOTAL_COLS - 1;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fractional left offset of a column, in `[0, 1)`.
pub fn left_fraction(col: u8) -> f32 {
    col as f32 / TOTAL_COLS as f32
}

/// Fractional width of a closed column range. Both ends are inclusive, so a
/// zero-span range still occupies one column.
pub fn width_fraction(range: ColumnRange) -> f32 {
    (range.end() - range.start() + 1) as f32 / TOTAL_COLS as f32
}

/// Map a calendar date onto the half-month column it falls in.
///
/// Days up to and including the middle of the month land in the first half.
pub fn today_col(date: NaiveDate) -> u8 {
    let midpoint = days_in_month(date) as f32 / 2.0;
    let half = if date.day() as f32 > midpoint { 1 } else { 0 };
    (date.month0() * 2 + half) as u8
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

/// Zero-based month index a column belongs to.
pub fn month_of_col(col: u8) -> usize {
    (col.min(MAX_COL) / 2) as usize
}

/// Short month label for the month a column belongs to.
pub fn month_label(col: u8) -> &'static str {
    MONTHS[month_of_col(col)]
}

/// `H1` or `H2` depending on which half of the month a column covers.
pub fn half_label(col: u8) -> &'static str {
    if col % 2 == 0 {
        "H1"
    } else {
        "H2"
    }
}

/// Horizontal placement of the column track on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTrack {
    /// Screen x of column 0's left edge.
    pub left: f32,
    /// Pixel width of all 24 columns.
    pub width: f32,
}

impl GridTrack {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    pub fn col_width(&self) -> f32 {
        self.width / TOTAL_COLS as f32
    }

    /// Screen x of a column's left edge.
    pub fn col_to_x(&self, col: u8) -> f32 {
        self.left + left_fraction(col) * self.width
    }

    /// Screen span `(x_min, x_max)` covered by a range.
    pub fn range_to_x(&self, range: ColumnRange) -> (f32, f32) {
        let x = self.col_to_x(range.start());
        (x, x + width_fraction(range) * self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_left_fraction() {
        assert_eq!(left_fraction(0), 0.0);
        assert_eq!(left_fraction(6), 0.25);
        assert_eq!(left_fraction(12), 0.5);
    }

    #[test]
    fn test_width_fraction_is_inclusive() {
        let full = ColumnRange::new(0, 23).unwrap();
        assert_eq!(width_fraction(full), 1.0);

        let single = ColumnRange::new(5, 5).unwrap();
        assert_eq!(width_fraction(single), 1.0 / 24.0);

        let quarter = ColumnRange::new(4, 9).unwrap();
        assert_eq!(width_fraction(quarter), 0.25);
    }

    #[test]
    fn test_today_col_first_and_second_half() {
        assert_eq!(today_col(date(2025, 1, 1)), 0);
        assert_eq!(today_col(date(2025, 1, 15)), 0);
        // 31-day month: midpoint 15.5
        assert_eq!(today_col(date(2025, 1, 16)), 1);
        // 30-day month: midpoint 15, day 15 stays in H1
        assert_eq!(today_col(date(2025, 4, 15)), 6);
        assert_eq!(today_col(date(2025, 4, 16)), 7);
        assert_eq!(today_col(date(2025, 12, 31)), 23);
    }

    #[test]
    fn test_today_col_february() {
        // 28 days: midpoint 14
        assert_eq!(today_col(date(2025, 2, 14)), 2);
        assert_eq!(today_col(date(2025, 2, 15)), 3);
        // leap year, 29 days: midpoint 14.5
        assert_eq!(today_col(date(2024, 2, 14)), 2);
        assert_eq!(today_col(date(2024, 2, 15)), 3);
    }

    #[test]
    fn test_labels() {
        assert_eq!(month_label(0), "Jan");
        assert_eq!(month_label(1), "Jan");
        assert_eq!(month_label(23), "Dec");
        assert_eq!(month_of_col(7), 3);
        assert_eq!(half_label(4), "H1");
        assert_eq!(half_label(5), "H2");
    }

    #[test]
    fn test_track_geometry() {
        let track = GridTrack::new(100.0, 1200.0);
        assert_eq!(track.col_width(), 50.0);
        assert_eq!(track.col_to_x(0), 100.0);
        assert!((track.col_to_x(4) - 300.0).abs() < 1e-3);

        let (x0, x1) = track.range_to_x(ColumnRange::new(4, 10).unwrap());
        assert!((x0 - 300.0).abs() < 1e-3);
        assert!((x1 - 650.0).abs() < 1e-3);
    }
}
