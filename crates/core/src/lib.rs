//! # WhenWhere Core
//!
//! Domain logic for the WhenWhere event scheduler: the data model for
//! time-slot and location voting, the drag-to-select week grid engine,
//! and the aggregation that turns submitted availability into a result
//! (winning slots, winning location, weekly heatmap).
//!
//! Everything in this crate is pure and synchronous. Aggregation
//! functions are total over well-formed input: empty events produce
//! "no winner" outputs rather than errors, so they can be re-run on
//! every render without side effects.

/// Availability tallying, slot ranking, location votes, and the heatmap
pub mod aggregate;
/// Error taxonomy shared across the workspace
pub mod errors;
/// Domain model types and API request/response shapes
pub mod models;
/// Combines the aggregators into the final result view-model
pub mod result;
/// Pointer-driven week-grid selection engine
pub mod selection;
