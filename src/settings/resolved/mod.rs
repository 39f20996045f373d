use std::path::PathBuf;

use frzy_tui::SessionConfig;

use crate::source::Delimiter;

mod errors;
mod sources;
mod summary;
pub(super) mod validation;

pub(crate) use errors::SettingsError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedConfig {
	pub(crate) prompt: String,
	pub(crate) lines: usize,
	pub(crate) show_scores: bool,
	pub(crate) show_info: bool,
	pub(crate) workers: usize,
	pub(crate) delimiter: Delimiter,
	pub(crate) initial_query: String,
	/// Query for non-interactive filtering, if requested.
	pub(crate) show_matches: Option<String>,
	/// Number of silent ranking passes over `show_matches`, if requested.
	pub(crate) benchmark: Option<usize>,
	pub(crate) tty: PathBuf,
}

impl ResolvedConfig {
	/// Options for the interactive session.
	pub(crate) fn session_config(&self) -> SessionConfig {
		SessionConfig {
			prompt: self.prompt.clone(),
			lines: self.lines,
			show_scores: self.show_scores,
			show_info: self.show_info,
			workers: self.workers,
			initial_query: self.initial_query.clone(),
			tty: self.tty.clone(),
		}
	}

	/// Print a human readable summary of the effective configuration to stderr.
	pub(crate) fn print_summary(&self) {
		summary::print_summary(self);
	}
}
