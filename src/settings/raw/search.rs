use std::path::PathBuf;

use serde::Deserialize;

use crate::cli::CliArgs;

/// `[search]` values prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) workers: Option<i64>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(workers) = cli.workers {
			self.workers = Some(i64::try_from(workers).unwrap_or(i64::MAX));
		}
	}
}

/// `[input]` values prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct InputSection {
	pub(super) delimiter: Option<String>,
	pub(super) tty: Option<PathBuf>,
}

impl InputSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if cli.read_null {
			self.delimiter = Some("nul".to_owned());
		}
		if let Some(tty) = cli.tty.clone() {
			self.tty = Some(tty);
		}
	}
}
