use serde::Deserialize;

use crate::cli::CliArgs;

/// `[ui]` values prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
	pub(super) prompt: Option<String>,
	pub(super) lines: Option<i64>,
	pub(super) show_scores: Option<bool>,
	pub(super) show_info: Option<bool>,
}

impl UiSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(prompt) = cli.prompt.clone() {
			self.prompt = Some(prompt);
		}
		if let Some(lines) = cli.lines {
			self.lines = Some(i64::try_from(lines).unwrap_or(i64::MAX));
		}
		// Flags can only switch these on.
		if cli.show_scores {
			self.show_scores = Some(true);
		}
		if cli.show_info {
			self.show_info = Some(true);
		}
	}
}
