//! # rv-core
//!
//! Core types, text derivation, and error types for Ruleview.
//!
//! This crate provides the foundational types shared across all Ruleview crates:
//! - Rule, card, and bullet snapshots as served by the rules API
//! - Policy documents consumed by the fuzzy-search variant
//! - The failed-search telemetry payload
//! - Record identifiers that accept both numeric and string JSON ids
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod ids;
pub mod links;
pub mod text;

pub use entities::{
    Answer, Bullet, Card, Policy, PolicyDocument, Rule, RulesResponse, SearchLogEntry,
};
pub use errors::CoreError;
pub use ids::RecordId;
