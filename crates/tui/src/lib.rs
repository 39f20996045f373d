//! Inline terminal session for `frzy`.
//!
//! The session owns the controlling terminal while the user edits a query:
//! raw key bytes are decoded into [`Key`]s, applied to the [`App`] state
//! machine and the current ranking is drawn into a small region below the
//! cursor. [`run`] hands back a [`SessionOutcome`] once the user confirms or
//! cancels, with the terminal restored.
//!
//! [`filter`] ranks candidates without a terminal for `--show-matches`.

mod app;
pub mod components;
mod config;
mod filter;
pub mod input;
mod runtime;

pub use app::{App, Selection, SessionOutcome, SessionState};
pub use config::{DEFAULT_LINES, DEFAULT_PROMPT, DEFAULT_TTY, SessionConfig, default_workers};
pub use filter::{FilteredMatch, filter, format_filtered};
pub use input::{Key, KeyDecoder, QueryEditor};
pub use runtime::run;
