//! UI building blocks used by the session renderer.

/// Prompt line and match-count summary.
pub mod prompt;
/// Result row construction and highlighting.
pub mod rows;

pub use prompt::{PromptContext, info_line, render_prompt};
pub use rows::{RowSpec, build_row, score_label};
