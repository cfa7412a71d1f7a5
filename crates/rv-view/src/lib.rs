//! # rv-view
//!
//! Headless view state for the rule list. The [`ViewController`] owns the
//! loaded rules, the search term, the selected subtheme, the single
//! expanded rule, keyboard focus, and the search-result cursor. Every
//! transition returns the [`Effect`]s a front-end has to carry out (focus
//! moves, scroll requests, telemetry), so the logic runs without a display.
//!
//! Scroll animation lives in [`scroll`]: a stateless exponential-decay step
//! plus a last-request-wins follower. [`render`] turns controller state into
//! list-item view-models with highlight segments.

pub mod controller;
pub mod effect;
pub mod expansion;
pub mod keyboard;
pub mod layout;
pub mod render;
pub mod scroll;
pub mod store;
pub mod telemetry;

pub use controller::ViewController;
pub use effect::Effect;
pub use expansion::{Activation, Expansion};
pub use keyboard::Key;
pub use layout::{StickyControls, sticky_top_offset};
pub use render::{ListStatus, ListView, RuleListItem, render_list};
pub use rv_search::Viewport;
pub use scroll::{FollowParams, FollowTick, ScrollBehavior, ScrollFollow, ScrollFollower};
pub use store::RuleStore;
pub use telemetry::ReportedTerms;
