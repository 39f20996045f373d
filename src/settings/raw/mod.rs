use std::path::PathBuf;

use anyhow::{Error, Result};
use frzy_tui::{DEFAULT_LINES, DEFAULT_PROMPT, DEFAULT_TTY, default_workers};
use serde::Deserialize;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource, validation};
use super::sources::EnvSource;
use crate::cli::CliArgs;
use crate::source::Delimiter;

mod search;
mod ui;

use search::{InputSection, SearchSection};
use ui::UiSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	ui: UiSection,
	search: SearchSection,
	input: InputSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.ui.apply_cli_overrides(cli);
		self.search.apply_cli_overrides(cli);
		self.input.apply_cli_overrides(cli);
	}

	/// Validate the raw values and fill in defaults.
	pub(super) fn resolve(self, cli: &CliArgs, env: &EnvSource) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			lines: detect_source(env, cli.lines.is_some(), "FRZY_UI__LINES", "--lines", "ui.lines"),
			workers: detect_source(
				env,
				cli.workers.is_some(),
				"FRZY_SEARCH__WORKERS",
				"--workers",
				"search.workers",
			),
			delimiter: detect_source(
				env,
				cli.read_null,
				"FRZY_INPUT__DELIMITER",
				"--read-null",
				"input.delimiter",
			),
		};

		let lines = match self.ui.lines {
			Some(lines) => validation::at_least_one("ui.lines", lines, sources.lines).map_err(Error::new)?,
			None => DEFAULT_LINES,
		};
		let workers = match self.search.workers {
			Some(workers) => {
				validation::at_least_one("search.workers", workers, sources.workers).map_err(Error::new)?
			}
			None => default_workers(),
		};
		let delimiter = match self.input.delimiter {
			Some(name) => validation::delimiter(&name, sources.delimiter).map_err(Error::new)?,
			None => Delimiter::default(),
		};
		let benchmark = match cli.benchmark {
			Some(runs) => Some(
				validation::at_least_one(
					"benchmark",
					i64::try_from(runs).unwrap_or(i64::MAX),
					SettingSource::CliFlag("--benchmark"),
				)
				.map_err(Error::new)?,
			),
			None => None,
		};

		Ok(ResolvedConfig {
			prompt: self.ui.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_owned()),
			lines,
			show_scores: self.ui.show_scores.unwrap_or(false),
			show_info: self.ui.show_info.unwrap_or(false),
			workers,
			delimiter,
			initial_query: cli.query.clone().unwrap_or_default(),
			show_matches: cli.show_matches.clone(),
			benchmark,
			tty: self.input.tty.unwrap_or_else(|| PathBuf::from(DEFAULT_TTY)),
		})
	}
}

fn detect_source(
	env: &EnvSource,
	cli_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> SettingSource {
	if cli_present {
		SettingSource::CliFlag(cli_flag)
	} else if env.is_set(env_var) {
		SettingSource::Environment(env_var)
	} else {
		SettingSource::ConfigKey(key)
	}
}
