//! Drag and resize engine for timeline bars.
//!
//! A [`BarController`] owns the displayed range of one bar. Pointer input is
//! turned into whole-column deltas relative to the gesture start, clamped to
//! the grid, and reported back only when the released range differs from the
//! range the gesture started with.

use crate::model::grid::TOTAL_COLS;
use crate::model::ColumnRange;

/// What part of the bar the gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Bar body: shift both bounds.
    Move,
    /// Left edge handle: shift the start only.
    ResizeLeft,
    /// Right edge handle: shift the end only.
    ResizeRight,
}

/// State captured at pointer-down, held until the gesture ends.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    kind: GestureKind,
    start_x: f32,
    origin: ColumnRange,
    duration: i32,
    /// Track width sampled at pointer-down; reflows mid-gesture are ignored.
    container_width: f32,
    last_x: f32,
}

impl DragSession {
    fn new(kind: GestureKind, origin: ColumnRange, start_x: f32, container_width: f32) -> Self {
        Self {
            kind,
            start_x,
            origin,
            duration: origin.span() as i32,
            container_width,
            last_x: start_x,
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn origin(&self) -> ColumnRange {
        self.origin
    }

    pub fn last_x(&self) -> f32 {
        self.last_x
    }

    /// Whole columns covered by the pointer since pointer-down, rounded half
    /// away from zero.
    pub fn cols_moved(&self, pointer_x: f32) -> i32 {
        let width_ok = self.container_width.is_finite() && self.container_width > 0.0;
        if !width_ok || !pointer_x.is_finite() {
            return 0;
        }
        let dx = (pointer_x - self.start_x) as f64;
        (dx * TOTAL_COLS as f64 / self.container_width as f64).round() as i32
    }

    /// Range the bar would have if the pointer were released at `pointer_x`.
    pub fn range_at(&self, pointer_x: f32) -> ColumnRange {
        apply_gesture(self.kind, self.origin, self.duration, self.cols_moved(pointer_x))
    }
}

/// Shift `origin` by `cols_moved` according to the gesture kind, then clamp.
///
/// Moves keep the original duration when they hit either wall. Resizes may
/// collapse the bar to a single column but never invert it.
pub fn apply_gesture(
    kind: GestureKind,
    origin: ColumnRange,
    duration: i32,
    cols_moved: i32,
) -> ColumnRange {
    let last = TOTAL_COLS as i32 - 1;
    let (s, e) = (origin.start() as i32, origin.end() as i32);

    let (start, end) = match kind {
        GestureKind::Move => {
            let mut start = s + cols_moved;
            let mut end = e + cols_moved;
            if start < 0 {
                start = 0;
                end = start + duration;
            }
            if end > last {
                end = last;
                start = end - duration;
            }
            (start, end)
        }
        GestureKind::ResizeLeft => {
            let mut start = s + cols_moved;
            if start > e {
                start = e;
            }
            if start < 0 {
                start = 0;
            }
            (start, e)
        }
        GestureKind::ResizeRight => {
            let mut end = e + cols_moved;
            if end < s {
                end = s;
            }
            if end > last {
                end = last;
            }
            (s, end)
        }
    };

    ColumnRange::clamped(start, end)
}

/// Per-bar interaction state.
///
/// Idle while `session` is `None`; the displayed range then follows whatever
/// the owning collection last supplied through [`BarController::sync`].
#[derive(Debug, Clone, PartialEq)]
pub struct BarController {
    committed: ColumnRange,
    live: ColumnRange,
    session: Option<DragSession>,
}

impl BarController {
    pub fn new(range: ColumnRange) -> Self {
        Self {
            committed: range,
            live: range,
            session: None,
        }
    }

    /// Adopt the externally owned range. Has no effect mid-gesture.
    pub fn sync(&mut self, external: ColumnRange) {
        if self.session.is_none() {
            self.committed = external;
            self.live = external;
        }
    }

    /// Start a gesture. Returns `false` if one is already in progress.
    pub fn begin(&mut self, kind: GestureKind, pointer_x: f32, container_width: f32) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession::new(
            kind,
            self.committed,
            pointer_x,
            container_width,
        ));
        self.live = self.committed;
        true
    }

    /// Update the live range for the current pointer position.
    pub fn drag_to(&mut self, pointer_x: f32) -> Option<ColumnRange> {
        let session = self.session.as_mut()?;
        session.last_x = pointer_x;
        self.live = session.range_at(pointer_x);
        Some(self.live)
    }

    /// End the gesture at `pointer_x`.
    ///
    /// Returns the final range if it differs from the range at gesture start.
    /// The controller goes back to idle and shows the final range either way.
    pub fn release(&mut self, pointer_x: f32) -> Option<ColumnRange> {
        let session = self.session.take()?;
        let final_range = session.range_at(pointer_x);
        self.committed = final_range;
        self.live = final_range;
        (final_range != session.origin).then_some(final_range)
    }

    /// Abort the gesture and restore the range it started with.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                self.committed = session.origin;
                self.live = session.origin;
                true
            }
            None => false,
        }
    }

    /// Range to paint: the live range while dragging, otherwise the committed one.
    pub fn displayed(&self) -> ColumnRange {
        if self.session.is_some() {
            self.live
        } else {
            self.committed
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 1200.0;

    fn range(s: u8, e: u8) -> ColumnRange {
        ColumnRange::new(s, e).unwrap()
    }

    fn all_ranges() -> Vec<ColumnRange> {
        let mut out = Vec::new();
        for s in 0..TOTAL_COLS {
            for e in s..TOTAL_COLS {
                out.push(range(s, e));
            }
        }
        out
    }

    const KINDS: [GestureKind; 3] = [
        GestureKind::Move,
        GestureKind::ResizeLeft,
        GestureKind::ResizeRight,
    ];

    /// Run a whole gesture with the given pixel positions; the last one is the release.
    fn gesture(
        start: ColumnRange,
        kind: GestureKind,
        moves: &[f32],
        release: f32,
    ) -> (BarController, Option<ColumnRange>) {
        let mut ctl = BarController::new(start);
        assert!(ctl.begin(kind, 0.0, WIDTH));
        for &x in moves {
            ctl.drag_to(x);
        }
        let commit = ctl.release(release);
        (ctl, commit)
    }

    // ── Concrete scenarios ─────────────────────────────────────────

    #[test]
    fn test_move_right_by_two_columns() {
        let (ctl, commit) = gesture(range(4, 10), GestureKind::Move, &[50.0], 100.0);
        assert_eq!(commit, Some(range(6, 12)));
        assert_eq!(ctl.displayed(), range(6, 12));
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_resize_left_clamps_at_zero() {
        let (_, commit) = gesture(range(4, 10), GestureKind::ResizeLeft, &[], -500.0);
        assert_eq!(commit, Some(range(0, 10)));
    }

    #[test]
    fn test_move_against_right_wall_is_noop() {
        let (ctl, commit) = gesture(range(20, 23), GestureKind::Move, &[200.0], 200.0);
        assert_eq!(commit, None);
        assert_eq!(ctl.displayed(), range(20, 23));
    }

    #[test]
    fn test_resize_right_cannot_cross_start() {
        // -5 columns at 50px per column
        let (_, commit) = gesture(range(10, 12), GestureKind::ResizeRight, &[], -250.0);
        assert_eq!(commit, Some(range(10, 10)));
    }

    #[test]
    fn test_resize_left_cannot_cross_end() {
        let (_, commit) = gesture(range(10, 12), GestureKind::ResizeLeft, &[], 400.0);
        assert_eq!(commit, Some(range(12, 12)));
    }

    #[test]
    fn test_resize_right_clamps_at_last_column() {
        let (_, commit) = gesture(range(18, 20), GestureKind::ResizeRight, &[], 1000.0);
        assert_eq!(commit, Some(range(18, 23)));
    }

    #[test]
    fn test_move_left_wall_preserves_duration() {
        let (_, commit) = gesture(range(3, 9), GestureKind::Move, &[], -600.0);
        assert_eq!(commit, Some(range(0, 6)));
    }

    // ── Rounding ───────────────────────────────────────────────────

    #[test]
    fn test_below_half_column_is_noop() {
        // one column is 50px; 24px rounds to 0
        let (_, commit) = gesture(range(4, 10), GestureKind::Move, &[24.0], 24.0);
        assert_eq!(commit, None);
        let (_, commit) = gesture(range(4, 10), GestureKind::Move, &[], -24.0);
        assert_eq!(commit, None);
    }

    #[test]
    fn test_half_column_rounds_away_from_zero() {
        let (_, commit) = gesture(range(4, 10), GestureKind::Move, &[], 25.0);
        assert_eq!(commit, Some(range(5, 11)));
        let (_, commit) = gesture(range(4, 10), GestureKind::Move, &[], -25.0);
        assert_eq!(commit, Some(range(3, 9)));
    }

    #[test]
    fn test_zero_width_container_never_moves() {
        let mut ctl = BarController::new(range(4, 10));
        ctl.begin(GestureKind::Move, 10.0, 0.0);
        assert_eq!(ctl.drag_to(500.0), Some(range(4, 10)));
        assert_eq!(ctl.release(500.0), None);
    }

    // ── Gesture lifecycle ──────────────────────────────────────────

    #[test]
    fn test_live_range_does_not_touch_committed() {
        let mut ctl = BarController::new(range(4, 10));
        ctl.begin(GestureKind::Move, 100.0, WIDTH);
        assert_eq!(ctl.drag_to(200.0), Some(range(6, 12)));
        assert!(ctl.is_dragging());
        assert_eq!(ctl.displayed(), range(6, 12));
        assert_eq!(ctl.session().map(|s| s.origin()), Some(range(4, 10)));
    }

    #[test]
    fn test_release_uses_release_coordinate() {
        // last move says +2 columns, release says +4
        let (_, commit) = gesture(range(4, 10), GestureKind::Move, &[100.0], 200.0);
        assert_eq!(commit, Some(range(8, 14)));
    }

    #[test]
    fn test_drag_back_to_origin_does_not_commit() {
        let (ctl, commit) =
            gesture(range(4, 10), GestureKind::ResizeRight, &[300.0, 150.0], 0.0);
        assert_eq!(commit, None);
        assert_eq!(ctl.displayed(), range(4, 10));
    }

    #[test]
    fn test_second_begin_is_ignored() {
        let mut ctl = BarController::new(range(4, 10));
        assert!(ctl.begin(GestureKind::Move, 0.0, WIDTH));
        assert!(!ctl.begin(GestureKind::ResizeLeft, 500.0, 10.0));
        assert_eq!(ctl.session().map(|s| s.kind()), Some(GestureKind::Move));
    }

    #[test]
    fn test_events_while_idle_are_ignored() {
        let mut ctl = BarController::new(range(4, 10));
        assert_eq!(ctl.drag_to(300.0), None);
        assert_eq!(ctl.release(300.0), None);
        assert!(!ctl.cancel());
        assert_eq!(ctl.displayed(), range(4, 10));
    }

    #[test]
    fn test_cancel_restores_origin() {
        let mut ctl = BarController::new(range(4, 10));
        ctl.begin(GestureKind::ResizeLeft, 0.0, WIDTH);
        ctl.drag_to(-150.0);
        assert_eq!(ctl.displayed(), range(1, 10));
        assert!(ctl.cancel());
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.displayed(), range(4, 10));
        assert_eq!(ctl.release(-150.0), None);
    }

    #[test]
    fn test_width_sampled_at_gesture_start() {
        let mut ctl = BarController::new(range(4, 10));
        ctl.begin(GestureKind::Move, 0.0, 2400.0);
        // 100px on a 2400px track is exactly one column
        assert_eq!(ctl.release(100.0), Some(range(5, 11)));
    }

    // ── External sync ──────────────────────────────────────────────

    #[test]
    fn test_sync_adopts_external_when_idle() {
        let mut ctl = BarController::new(range(4, 10));
        ctl.sync(range(1, 2));
        assert_eq!(ctl.displayed(), range(1, 2));
        // repeated sync with the same value is stable
        ctl.sync(range(1, 2));
        ctl.sync(range(1, 2));
        assert_eq!(ctl.displayed(), range(1, 2));
    }

    #[test]
    fn test_sync_ignored_while_dragging() {
        let mut ctl = BarController::new(range(4, 10));
        ctl.begin(GestureKind::Move, 0.0, WIDTH);
        ctl.drag_to(100.0);
        ctl.sync(range(0, 0));
        assert_eq!(ctl.displayed(), range(6, 12));
        assert_eq!(ctl.release(100.0), Some(range(6, 12)));
    }

    #[test]
    fn test_gesture_starts_from_latest_external_range() {
        let mut ctl = BarController::new(range(4, 10));
        ctl.sync(range(12, 14));
        ctl.begin(GestureKind::Move, 0.0, WIDTH);
        assert_eq!(ctl.release(50.0), Some(range(13, 15)));
    }

    // ── Properties over the whole grid ─────────────────────────────

    #[test]
    fn test_result_always_on_grid() {
        for origin in all_ranges() {
            for kind in KINDS {
                for cols in -30..=30 {
                    let r = apply_gesture(kind, origin, origin.span() as i32, cols);
                    assert!(r.start() <= r.end(), "{:?} {:?} {}", origin, kind, cols);
                    assert!(r.end() < TOTAL_COLS, "{:?} {:?} {}", origin, kind, cols);
                }
            }
        }
    }

    #[test]
    fn test_move_always_preserves_duration() {
        for origin in all_ranges() {
            for cols in -30..=30 {
                let r = apply_gesture(GestureKind::Move, origin, origin.span() as i32, cols);
                assert_eq!(r.span(), origin.span(), "{:?} {}", origin, cols);
            }
        }
    }

    #[test]
    fn test_resizes_keep_the_opposite_bound() {
        for origin in all_ranges() {
            for cols in -30..=30 {
                let left =
                    apply_gesture(GestureKind::ResizeLeft, origin, origin.span() as i32, cols);
                assert_eq!(left.end(), origin.end());
                assert!(left.start() <= origin.end());

                let right =
                    apply_gesture(GestureKind::ResizeRight, origin, origin.span() as i32, cols);
                assert_eq!(right.start(), origin.start());
                assert!(right.end() >= origin.start());
            }
        }
    }

    #[test]
    fn test_zero_delta_never_commits() {
        for origin in all_ranges() {
            for kind in KINDS {
                let mut ctl = BarController::new(origin);
                ctl.begin(kind, 321.0, WIDTH);
                ctl.drag_to(700.0);
                assert_eq!(ctl.release(321.0), None);
                assert_eq!(ctl.displayed(), origin);
            }
        }
    }
}
