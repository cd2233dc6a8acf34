//! GUI bridge for LazyTask.

pub mod api;
