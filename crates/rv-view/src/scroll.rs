//! Scroll-follow: keep a rule header pinned under the sticky controls while
//! the layout around it is still moving.
//!
//! Each frame re-reads the target and closes a fraction of the remaining
//! distance, `k = 1 - exp(-dt / tau)`, capped per frame. The follow ends once
//! the error stays under `epsilon_px` for `stable_frames` frames in a row or
//! the time budget runs out, and then snaps to the target.

use rv_core::RecordId;
use serde::{Deserialize, Serialize};

/// How a front-end should apply a scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowParams {
    pub tau_ms: f64,
    pub max_ms: f64,
    pub stable_frames: u32,
    pub epsilon_px: f64,
    pub max_dt_ms: f64,
    pub max_delta_px: f64,
    /// Residual error above which the final snap is smooth.
    pub smooth_finish_px: f64,
    pub reduced_motion: bool,
}

impl Default for FollowParams {
    fn default() -> Self {
        Self {
            tau_ms: 170.0,
            max_ms: 700.0,
            stable_frames: 8,
            epsilon_px: 1.5,
            max_dt_ms: 32.0,
            max_delta_px: 90.0,
            smooth_finish_px: 6.0,
            reduced_motion: false,
        }
    }
}

/// One exponential-decay step from `current` towards `target`.
#[must_use]
pub fn follow_step(current: f64, target: f64, dt_ms: f64, params: &FollowParams) -> f64 {
    let dt = dt_ms.min(params.max_dt_ms).max(1.0);
    let k = 1.0 - (-dt / params.tau_ms).exp();
    let delta = ((target - current) * k).clamp(-params.max_delta_px, params.max_delta_px);
    (current + delta).round()
}

/// Result of one follow frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowTick {
    /// Scroll instantly to `top` and schedule another frame.
    Continue { top: f64 },
    /// Final position; the follow is over.
    Finish { top: f64, behavior: ScrollBehavior },
    /// The target vanished from the layout; the follow is over.
    Lost,
}

impl FollowTick {
    #[must_use]
    pub const fn is_done(&self) -> bool {
        !matches!(self, Self::Continue { .. })
    }
}

/// A single follow animation.
#[derive(Debug, Clone)]
pub struct ScrollFollow {
    params: FollowParams,
    started_ms: f64,
    last_ms: f64,
    stable: u32,
}

impl ScrollFollow {
    #[must_use]
    pub const fn start(now_ms: f64, params: FollowParams) -> Self {
        Self {
            params,
            started_ms: now_ms,
            last_ms: now_ms,
            stable: 0,
        }
    }

    /// Advance one frame. `target` is re-measured by the caller every frame.
    pub fn tick(&mut self, now_ms: f64, current: f64, target: Option<f64>) -> FollowTick {
        let Some(target) = target else {
            return FollowTick::Lost;
        };
        let target = target.round();
        if self.params.reduced_motion {
            return FollowTick::Finish {
                top: target,
                behavior: ScrollBehavior::Instant,
            };
        }

        let dt = (now_ms - self.last_ms).max(1.0);
        self.last_ms = now_ms;

        let err = target - current;
        if err.abs() < self.params.epsilon_px {
            self.stable += 1;
        } else {
            self.stable = 0;
        }

        if self.stable >= self.params.stable_frames || now_ms - self.started_ms > self.params.max_ms {
            let behavior = if err.abs() > self.params.smooth_finish_px {
                ScrollBehavior::Smooth
            } else {
                ScrollBehavior::Instant
            };
            return FollowTick::Finish { top: target, behavior };
        }

        FollowTick::Continue {
            top: follow_step(current, target, dt, &self.params),
        }
    }
}

/// Handle for one [`ScrollFollower::begin`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowTicket(u64);

/// Runs at most one follow at a time; the latest request wins.
#[derive(Debug, Default)]
pub struct ScrollFollower {
    generation: u64,
    active: Option<(FollowTicket, RecordId, ScrollFollow)>,
}

impl ScrollFollower {
    /// Start following `target`, superseding any follow in progress.
    pub fn begin(&mut self, target: RecordId, now_ms: f64, params: FollowParams) -> FollowTicket {
        self.generation += 1;
        let ticket = FollowTicket(self.generation);
        if let Some((_, previous, _)) = &self.active {
            tracing::debug!(%previous, next = %target, "scroll follow superseded");
        }
        self.active = Some((ticket, target, ScrollFollow::start(now_ms, params)));
        ticket
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    #[must_use]
    pub fn is_current(&self, ticket: FollowTicket) -> bool {
        self.active.as_ref().is_some_and(|(t, _, _)| *t == ticket)
    }

    /// The rule being followed, if any.
    #[must_use]
    pub fn target(&self) -> Option<&RecordId> {
        self.active.as_ref().map(|(_, id, _)| id)
    }

    /// Advance the follow behind `ticket`. Returns `None` when that follow
    /// has been superseded, cancelled, or already finished.
    pub fn tick(&mut self, ticket: FollowTicket, now_ms: f64, current: f64, target: Option<f64>) -> Option<FollowTick> {
        if !self.is_current(ticket) {
            return None;
        }
        let (_, _, follow) = self.active.as_mut()?;
        let tick = follow.tick(now_ms, current, target);
        if tick.is_done() {
            self.active = None;
        }
        Some(tick)
    }
}

/// Scroll position that puts an element's top just under the sticky
/// controls, from offsets measured relative to the scroller.
#[must_use]
pub fn target_top(element_top: f64, scroller_top: f64, scroll_top: f64, sticky_offset: f64) -> f64 {
    (element_top - scroller_top + scroll_top - sticky_offset).round().max(0.0)
}

/// Scroll position that centers a highlighted match inside the scroller.
#[must_use]
pub fn center_target(mark_top: f64, mark_height: f64, scroller_top: f64, scroll_top: f64, client_height: f64) -> f64 {
    let mark_center = mark_top - scroller_top + scroll_top + mark_height / 2.0;
    (mark_center - client_height / 2.0).round().max(0.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FRAME: f64 = 16.0;

    fn run(follow: &mut ScrollFollow, mut current: f64, target: f64) -> (FollowTick, f64, usize) {
        let mut now = 0.0;
        for frame in 1..1000 {
            now += FRAME;
            match follow.tick(now, current, Some(target)) {
                FollowTick::Continue { top } => current = top,
                done => return (done, now, frame),
            }
        }
        unreachable!("follow never finished");
    }

    #[test]
    fn step_moves_a_fraction_of_the_error() {
        let params = FollowParams::default();
        let next = follow_step(0.0, 100.0, 16.0, &params);
        let expected = (100.0 * (1.0 - (-16.0_f64 / 170.0).exp())).round();
        assert_eq!(next, expected);
        assert!(next > 0.0 && next < 100.0);
    }

    #[test]
    fn step_caps_delta_and_dt() {
        let params = FollowParams::default();
        assert_eq!(follow_step(0.0, 10_000.0, 16.0, &params), 90.0);
        assert_eq!(follow_step(10_000.0, 0.0, 16.0, &params), 9_910.0);
        // A long stall counts as a single capped frame.
        assert_eq!(follow_step(0.0, 500.0, 5_000.0, &params), follow_step(0.0, 500.0, 32.0, &params));
    }

    #[test]
    fn step_at_target_stays_put() {
        let params = FollowParams::default();
        assert_eq!(follow_step(240.0, 240.0, 16.0, &params), 240.0);
    }

    #[test]
    fn settled_target_finishes_after_stable_frames() {
        let mut follow = ScrollFollow::start(0.0, FollowParams::default());
        let (tick, _, frames) = run(&mut follow, 300.0, 300.0);
        assert_eq!(
            tick,
            FollowTick::Finish {
                top: 300.0,
                behavior: ScrollBehavior::Instant
            }
        );
        assert_eq!(frames, 8);
    }

    #[test]
    fn far_target_times_out_with_smooth_snap() {
        let mut follow = ScrollFollow::start(0.0, FollowParams::default());
        let (tick, now, _) = run(&mut follow, 0.0, 20_000.0);
        assert_eq!(
            tick,
            FollowTick::Finish {
                top: 20_000.0,
                behavior: ScrollBehavior::Smooth
            }
        );
        assert!(now > 700.0);
    }

    #[test]
    fn follow_ends_within_budget() {
        let mut follow = ScrollFollow::start(0.0, FollowParams::default());
        let (tick, now, _) = run(&mut follow, 0.0, 400.0);
        assert!(matches!(tick, FollowTick::Finish { top, .. } if top == 400.0));
        assert!(now <= 700.0 + FRAME);
    }

    #[test]
    fn missing_target_is_lost() {
        let mut follow = ScrollFollow::start(0.0, FollowParams::default());
        assert_eq!(follow.tick(16.0, 0.0, None), FollowTick::Lost);
    }

    #[test]
    fn reduced_motion_snaps_on_first_frame() {
        let params = FollowParams {
            reduced_motion: true,
            ..FollowParams::default()
        };
        let mut follow = ScrollFollow::start(0.0, params);
        assert_eq!(
            follow.tick(16.0, 0.0, Some(900.4)),
            FollowTick::Finish {
                top: 900.0,
                behavior: ScrollBehavior::Instant
            }
        );
    }

    #[test]
    fn superseded_follow_is_ignored() {
        let mut follower = ScrollFollower::default();
        let first = follower.begin(RecordId::from("1"), 0.0, FollowParams::default());
        let second = follower.begin(RecordId::from("2"), 5.0, FollowParams::default());

        assert_eq!(follower.tick(first, 16.0, 0.0, Some(500.0)), None);
        assert!(matches!(
            follower.tick(second, 21.0, 0.0, Some(500.0)),
            Some(FollowTick::Continue { .. })
        ));
        assert_eq!(follower.target(), Some(&RecordId::from("2")));
    }

    #[test]
    fn finished_follow_releases_the_follower() {
        let params = FollowParams {
            reduced_motion: true,
            ..FollowParams::default()
        };
        let mut follower = ScrollFollower::default();
        let ticket = follower.begin(RecordId::from("1"), 0.0, params);
        assert!(follower.tick(ticket, 16.0, 0.0, Some(10.0)).is_some());
        assert!(!follower.is_current(ticket));
        assert_eq!(follower.tick(ticket, 32.0, 10.0, Some(10.0)), None);
    }

    #[test]
    fn targets_account_for_sticky_offset_and_clamp() {
        assert_eq!(target_top(400.0, 100.0, 50.0, 12.0), 338.0);
        assert_eq!(target_top(100.0, 100.0, 0.0, 96.0), 0.0);
        assert_eq!(center_target(900.0, 20.0, 100.0, 0.0, 600.0), 510.0);
        assert_eq!(center_target(120.0, 20.0, 100.0, 0.0, 600.0), 0.0);
    }
}
