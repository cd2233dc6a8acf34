//! In-memory task collection.
//!
//! # Responsibility
//! - Hold tasks in insertion order behind 1-based external indices.
//! - Enforce the duplicate policy on insertion.
//!
//! # Invariants
//! - Indices accepted and reported are always `1..=size`.
//! - Only the engine mutates the collection.

pub mod task_list;
