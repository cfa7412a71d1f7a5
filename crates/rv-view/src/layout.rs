//! Sticky search controls and the offset they impose on scroll targets.

use rv_search::Viewport;

/// Visibility of the fixed copy of the search controls that appears once
/// the in-flow controls scroll out of view.
///
/// While the controls hold focus the fixed copy is never hidden, so typing
/// does not lose the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickyControls {
    show_fixed: bool,
    focused: bool,
    at_top: bool,
}

/// Scroll positions at or above this count as the top of the page.
const AT_TOP_PX: f64 = 4.0;

impl StickyControls {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            show_fixed: false,
            focused: false,
            at_top: true,
        }
    }

    /// The in-flow controls entered or left the viewport.
    pub const fn on_intersection(&mut self, in_flow_visible: bool) {
        if !in_flow_visible {
            self.show_fixed = true;
        } else if !self.focused {
            self.show_fixed = false;
        }
    }

    pub fn on_scroll(&mut self, scroll_top: f64, in_flow_visible: bool) {
        self.at_top = scroll_top <= AT_TOP_PX;
        self.settle(in_flow_visible);
    }

    pub fn on_focus(&mut self, focused: bool, in_flow_visible: bool) {
        self.focused = focused;
        self.settle(in_flow_visible);
    }

    const fn settle(&mut self, in_flow_visible: bool) {
        if self.focused || !self.show_fixed {
            return;
        }
        if self.at_top || in_flow_visible {
            self.show_fixed = false;
        }
    }

    /// Whether the fixed bar is drawn.
    #[must_use]
    pub const fn is_fixed_visible(&self) -> bool {
        self.show_fixed && !self.at_top
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }
}

/// Distance kept between the top of the scroller and a followed header.
///
/// `fixed_height` is the measured height of the fixed bar; zero means it
/// has not been measured yet.
#[must_use]
pub fn sticky_top_offset(controls: &StickyControls, fixed_height: f64, viewport: Viewport) -> f64 {
    if controls.show_fixed && fixed_height > 0.0 {
        return fixed_height + 16.0;
    }
    if viewport.is_narrow() { 96.0 } else { 12.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_bar_appears_when_controls_scroll_away() {
        let mut controls = StickyControls::new();
        controls.on_scroll(300.0, false);
        controls.on_intersection(false);
        assert!(controls.is_fixed_visible());

        controls.on_intersection(true);
        assert!(!controls.is_fixed_visible());
    }

    #[test]
    fn focus_keeps_the_fixed_bar() {
        let mut controls = StickyControls::new();
        controls.on_scroll(300.0, false);
        controls.on_intersection(false);
        controls.on_focus(true, false);
        controls.on_intersection(true);
        assert!(controls.is_fixed_visible());

        controls.on_focus(false, true);
        assert!(!controls.is_fixed_visible());
    }

    #[test]
    fn returning_to_top_hides_the_fixed_bar() {
        let mut controls = StickyControls::new();
        controls.on_scroll(300.0, false);
        controls.on_intersection(false);
        controls.on_scroll(0.0, false);
        assert!(!controls.is_fixed_visible());
    }

    #[test]
    fn offset_follows_bar_and_viewport() {
        let mut controls = StickyControls::new();
        assert_eq!(sticky_top_offset(&controls, 0.0, Viewport::Wide), 12.0);
        assert_eq!(sticky_top_offset(&controls, 0.0, Viewport::Narrow), 96.0);

        controls.on_scroll(300.0, false);
        controls.on_intersection(false);
        assert_eq!(sticky_top_offset(&controls, 48.0, Viewport::Wide), 64.0);
        assert_eq!(sticky_top_offset(&controls, 0.0, Viewport::Wide), 12.0);
    }
}
