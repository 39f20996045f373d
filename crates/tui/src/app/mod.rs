//! Core application state and behavior for the interactive session.
//!
//! The [`App`] type aggregates the query editor, search coordination and the
//! selection cursor. Supporting modules partition the implementation into
//! focused pieces: key handling, rendering, search coordination and results.

mod actions;
mod render;
mod results;
mod search;
mod state;

pub use state::{App, Selection, SessionOutcome, SessionState};
