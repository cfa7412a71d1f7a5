//! # rv-search
//!
//! Search primitives for Ruleview. Everything here is pure and operates on
//! borrowed snapshots:
//! - [`filter_rules`]: subtheme restriction plus case-insensitive substring search
//! - [`excerpt`]: bounded text windows around term occurrences
//! - [`highlight`]: plain/matched segmentation for rendering
//! - [`fuzzy`]: `nucleo`-backed fuzzy search over the static policies document

pub mod excerpt;
pub mod filter;
pub mod fuzzy;
pub mod highlight;

mod error;
mod needle;

pub use error::SearchError;
pub use filter::{FilterQuery, MatchField, Viewport, filter_rules, first_match_field};
pub use fuzzy::{PolicyField, PolicyHit, PolicyIndex, PolicyQuery, Synonyms};
pub use highlight::{Segment, highlight};
pub use needle::Needle;
