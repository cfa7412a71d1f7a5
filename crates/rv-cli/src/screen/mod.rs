//! A virtual terminal viewport driven by controller effects.
//!
//! Positions are kept in pixels, one row being [`ROW_PX`] tall, so the
//! scroll-follow parameters keep the units they are tuned in.

pub mod paint;

use rv_config::ScrollConfig;
use rv_core::RecordId;
use rv_view::scroll::{center_target, target_top};
use rv_view::{FollowParams, FollowTick, ScrollFollower, StickyControls, Viewport, sticky_top_offset};

pub use paint::{CONTROLS_ROWS, PaintStyle, Painted};

pub const ROW_PX: f64 = 24.0;

/// Follows never run longer than this many simulated frames.
const MAX_FRAMES: usize = 10_000;

#[must_use]
pub fn follow_params(config: &ScrollConfig) -> FollowParams {
    FollowParams {
        tau_ms: config.tau_ms,
        max_ms: config.max_ms,
        stable_frames: config.stable_frames,
        epsilon_px: config.epsilon_px,
        max_dt_ms: config.max_dt_ms,
        max_delta_px: config.max_delta_px,
        reduced_motion: config.reduced_motion,
        ..FollowParams::default()
    }
}

#[allow(clippy::cast_precision_loss)]
fn row_to_px(row: usize) -> f64 {
    row as f64 * ROW_PX
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn px_to_row(px: f64) -> usize {
    (px / ROW_PX).round().max(0.0) as usize
}

pub struct Screen {
    rows: usize,
    top: f64,
    page: Painted,
    controls: StickyControls,
    follower: ScrollFollower,
    params: FollowParams,
    frame_ms: f64,
    expand_delay_ms: f64,
}

impl Screen {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(rows: usize, config: &ScrollConfig) -> Self {
        let params = follow_params(config);
        Self {
            rows: rows.max(CONTROLS_ROWS + 2),
            top: 0.0,
            page: Painted::default(),
            controls: StickyControls::new(),
            follower: ScrollFollower::default(),
            params,
            frame_ms: config.frame_ms as f64,
            expand_delay_ms: if params.reduced_motion {
                0.0
            } else {
                config.expand_delay_ms as f64
            },
        }
    }

    #[must_use]
    pub const fn page(&self) -> &Painted {
        &self.page
    }

    #[must_use]
    pub fn top_row(&self) -> usize {
        px_to_row(self.top)
    }

    /// Replace the page, keeping the scroll position in range.
    pub fn repaint(&mut self, page: Painted) {
        self.page = page;
        self.set_top(self.top);
    }

    fn max_top(&self) -> f64 {
        row_to_px(self.page.lines.len().saturating_sub(self.rows))
    }

    fn in_flow_controls_visible(&self) -> bool {
        self.top_row() < CONTROLS_ROWS
    }

    fn set_top(&mut self, px: f64) {
        self.top = px.clamp(0.0, self.max_top());
        let visible = self.in_flow_controls_visible();
        self.controls.on_intersection(visible);
        self.controls.on_scroll(self.top, visible);
    }

    pub fn focus_controls(&mut self, focused: bool) {
        let visible = self.in_flow_controls_visible();
        self.controls.on_focus(focused, visible);
    }

    fn header_target(&self, line: usize, viewport: Viewport) -> f64 {
        let offset = sticky_top_offset(&self.controls, row_to_px(CONTROLS_ROWS), viewport);
        target_top(row_to_px(line) - self.top, 0.0, self.top, offset)
    }

    /// Follow a rule's header while the page changes under it.
    ///
    /// `before` is the page as it looked when the request was made; the
    /// current page takes over once the expand delay has passed.
    pub fn follow(&mut self, id: &RecordId, before: &Painted, viewport: Viewport) {
        let ticket = self.follower.begin(id.clone(), 0.0, self.params);
        let mut now = 0.0;
        for frame in 1..=MAX_FRAMES {
            now += self.frame_ms;
            let layout = if now < self.expand_delay_ms { before } else { &self.page };
            let target = layout.header_line(id).map(|line| self.header_target(line, viewport));
            match self.follower.tick(ticket, now, self.top, target) {
                Some(FollowTick::Continue { top }) => self.set_top(top),
                Some(FollowTick::Finish { top, behavior }) => {
                    self.set_top(top);
                    tracing::debug!(rule = %id, frames = frame, ?behavior, "scroll follow finished");
                    return;
                }
                Some(FollowTick::Lost) | None => {
                    tracing::debug!(rule = %id, "scroll follow lost its target");
                    return;
                }
            }
        }
        self.follower.cancel();
    }

    /// Jump straight to a rule's header.
    pub fn snap_to(&mut self, id: &RecordId, viewport: Viewport) {
        self.follower.cancel();
        if let Some(line) = self.page.header_line(id) {
            self.set_top(self.header_target(line, viewport));
        }
    }

    /// Center the first highlighted line of a rule, or fall back to its
    /// header when nothing is highlighted.
    pub fn center_first_match(&mut self, id: &RecordId, viewport: Viewport) {
        let Some(line) = self.page.first_mark_line(id) else {
            self.snap_to(id, viewport);
            return;
        };
        let client_height = row_to_px(self.rows);
        self.set_top(center_target(row_to_px(line) - self.top, ROW_PX, 0.0, self.top, client_height));
    }

    /// Scroll just enough to bring a rule's header on screen.
    pub fn reveal(&mut self, id: &RecordId, viewport: Viewport) {
        let Some(line) = self.page.header_line(id) else {
            return;
        };
        let first = self.top_row() + if self.controls.is_fixed_visible() { CONTROLS_ROWS } else { 0 };
        if line < first || line >= self.top_row() + self.rows {
            self.set_top(self.header_target(line, viewport));
        }
    }

    /// The visible window, with the fixed controls laid over its top once
    /// the in-flow controls have scrolled away.
    #[must_use]
    pub fn frame(&self) -> Vec<String> {
        let start = self.top_row().min(self.page.lines.len());
        let end = (start + self.rows).min(self.page.lines.len());
        let mut lines: Vec<String> = self.page.lines[start..end].to_vec();
        if self.controls.is_fixed_visible() {
            for (slot, line) in lines.iter_mut().zip(self.page.lines.iter().take(CONTROLS_ROWS)) {
                slot.clone_from(line);
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(lines: usize, headers: &[(&str, usize)]) -> Painted {
        let mut text = String::new();
        for i in 0..lines {
            text.push_str(&format!("line {i}\n"));
        }
        Painted::for_test(text.lines().map(str::to_string).collect(), headers)
    }

    fn reduced() -> ScrollConfig {
        ScrollConfig {
            reduced_motion: true,
            ..ScrollConfig::default()
        }
    }

    #[test]
    fn follow_lands_header_under_the_controls() {
        let mut screen = Screen::new(10, &ScrollConfig::default());
        let before = page(200, &[("7", 120)]);
        screen.repaint(before.clone());

        screen.follow(&RecordId::from("7"), &before, Viewport::Wide);

        // 120 rows down, minus the fixed bar (2 rows) plus 16px of air.
        let expected = 120.0 * ROW_PX - (2.0 * ROW_PX + 16.0);
        assert!((screen.top - expected).abs() < 1.0, "top = {}", screen.top);
        assert!(screen.frame()[0].starts_with("line 0"));
    }

    #[test]
    fn follow_tracks_the_layout_after_expansion() {
        let mut screen = Screen::new(10, &ScrollConfig::default());
        let before = page(200, &[("7", 60)]);
        screen.repaint(page(200, &[("7", 90)]));

        screen.follow(&RecordId::from("7"), &before, Viewport::Wide);
        assert_eq!(screen.top_row(), 87);
    }

    #[test]
    fn reduced_motion_snaps() {
        let mut screen = Screen::new(10, &reduced());
        let before = page(100, &[("1", 3)]);
        screen.repaint(before.clone());
        screen.follow(&RecordId::from("1"), &before, Viewport::Wide);
        assert_eq!(screen.top_row(), 3);
    }

    #[test]
    fn top_is_clamped_to_the_page() {
        let mut screen = Screen::new(10, &reduced());
        let before = page(12, &[("1", 11)]);
        screen.repaint(before.clone());
        screen.follow(&RecordId::from("1"), &before, Viewport::Wide);
        assert_eq!(screen.top_row(), 2);
        assert_eq!(screen.frame().len(), 10);
    }

    #[test]
    fn vanished_target_stops_the_follow() {
        let mut screen = Screen::new(10, &ScrollConfig::default());
        let before = page(50, &[]);
        screen.repaint(before.clone());
        screen.follow(&RecordId::from("9"), &before, Viewport::Wide);
        assert_eq!(screen.top_row(), 0);
    }
}
