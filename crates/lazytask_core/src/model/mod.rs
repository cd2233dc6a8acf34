//! Task domain model shared by parser, codec, store and engine.
//!
//! # Responsibility
//! - Define the closed set of task variants (todo/deadline/event).
//! - Own date/time interpretation of user-entered time text.
//!
//! # Invariants
//! - Raw time text is always retained, even when a structured moment exists.
//! - Task fields never contain the persistence delimiter `|`.

pub mod moment;
pub mod task;
