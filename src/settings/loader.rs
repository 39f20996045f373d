use anyhow::{Context, Result};

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::{EnvSource, build_config};
use crate::cli::CliArgs;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	load_with_env(cli, &EnvSource::system())
}

pub(super) fn load_with_env(cli: &CliArgs, env: &EnvSource) -> Result<ResolvedConfig> {
	let builder = build_config(cli, env)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.context("failed to deserialize configuration")?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli, env)
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::path::Path;

	use clap::Parser;
	use tempfile::TempDir;

	use super::*;
	use crate::settings::resolved::SettingsError;
	use crate::source::Delimiter;

	fn write_config(dir: &TempDir, contents: &str) -> String {
		let path = dir.path().join("frzy.toml");
		fs::write(&path, contents).expect("write config");
		path.display().to_string()
	}

	fn cli(config: &str, extra: &[&str]) -> CliArgs {
		let mut args = vec!["frzy", "--no-config", "--config", config];
		args.extend_from_slice(extra);
		CliArgs::try_parse_from(args).expect("parses")
	}

	fn settings_error(err: &anyhow::Error) -> &SettingsError {
		err.downcast_ref::<SettingsError>().expect("settings error")
	}

	const FILE: &str = r#"
[ui]
prompt = "$ "
lines = 4
show_info = true

[search]
workers = 2

[input]
delimiter = "nul"
"#;

	#[test]
	fn file_values_are_applied() {
		let dir = TempDir::new().expect("tempdir");
		let path = write_config(&dir, FILE);

		let config = load_with_env(&cli(&path, &[]), &EnvSource::empty()).expect("loads");
		assert_eq!(config.prompt, "$ ");
		assert_eq!(config.lines, 4);
		assert!(config.show_info);
		assert!(!config.show_scores);
		assert_eq!(config.workers, 2);
		assert_eq!(config.delimiter, Delimiter::Nul);
	}

	#[test]
	fn environment_beats_files_and_flags_beat_both() {
		let dir = TempDir::new().expect("tempdir");
		let path = write_config(&dir, FILE);
		let env = EnvSource::from_pairs(&[("FRZY_UI__LINES", "6"), ("FRZY_UI__PROMPT", "% ")]);

		let config = load_with_env(&cli(&path, &[]), &env).expect("loads");
		assert_eq!(config.lines, 6);
		assert_eq!(config.prompt, "% ");

		let config = load_with_env(&cli(&path, &["-l", "3", "-p", "> "]), &env).expect("loads");
		assert_eq!(config.lines, 3);
		assert_eq!(config.prompt, "> ");
	}

	#[test]
	fn defaults_apply_without_sources() {
		let cli = CliArgs::try_parse_from(["frzy", "--no-config"]).expect("parses");
		let config = load_with_env(&cli, &EnvSource::empty()).expect("loads");
		assert_eq!(config.prompt, frzy_tui::DEFAULT_PROMPT);
		assert_eq!(config.lines, frzy_tui::DEFAULT_LINES);
		assert_eq!(config.workers, frzy_tui::default_workers());
		assert_eq!(config.delimiter, Delimiter::Newline);
		assert!(config.show_matches.is_none());
	}

	#[test]
	fn read_null_flag_selects_nul() {
		let cli = CliArgs::try_parse_from(["frzy", "--no-config", "-0"]).expect("parses");
		let config = load_with_env(&cli, &EnvSource::empty()).expect("loads");
		assert_eq!(config.delimiter, Delimiter::Nul);
	}

	#[test]
	fn zero_lines_in_file_is_rejected() {
		let dir = TempDir::new().expect("tempdir");
		let path = write_config(&dir, "[ui]\nlines = 0\n");

		let err = load_with_env(&cli(&path, &[]), &EnvSource::empty()).unwrap_err();
		let settings = settings_error(&err);
		assert_eq!(settings.key, "ui.lines");
		let message = err.to_string();
		assert!(message.contains("value: 0"), "{message}");
		assert!(message.contains("configuration key"), "{message}");
	}

	#[test]
	fn zero_workers_from_environment_is_rejected() {
		let dir = TempDir::new().expect("tempdir");
		let path = write_config(&dir, "");
		let env = EnvSource::from_pairs(&[("FRZY_SEARCH__WORKERS", "0")]);

		let err = load_with_env(&cli(&path, &[]), &env).unwrap_err();
		assert_eq!(settings_error(&err).key, "search.workers");
		assert!(err.to_string().contains("environment variable"));
	}

	#[test]
	fn zero_lines_flag_names_the_flag() {
		let cli = CliArgs::try_parse_from(["frzy", "--no-config", "-l", "0"]).expect("parses");
		let err = load_with_env(&cli, &EnvSource::empty()).unwrap_err();
		assert!(err.to_string().contains("CLI flag `--lines`"));
	}

	#[test]
	fn unknown_delimiter_is_rejected() {
		let dir = TempDir::new().expect("tempdir");
		let path = write_config(&dir, "[input]\ndelimiter = \"tab\"\n");

		let err = load_with_env(&cli(&path, &[]), &EnvSource::empty()).unwrap_err();
		assert_eq!(settings_error(&err).key, "input.delimiter");
	}

	#[test]
	fn missing_explicit_config_file_fails() {
		let dir = TempDir::new().expect("tempdir");
		let missing = dir.path().join("absent.toml");
		assert!(!Path::new(&missing).exists());

		let cli = cli(&missing.display().to_string(), &[]);
		assert!(load_with_env(&cli, &EnvSource::empty()).is_err());
	}

	#[test]
	fn tty_comes_from_the_input_section_unless_flagged() {
		let dir = TempDir::new().expect("tempdir");
		let path = write_config(&dir, "[input]\ntty = \"/dev/pts/7\"\n");

		let config = load_with_env(&cli(&path, &[]), &EnvSource::empty()).expect("loads");
		assert_eq!(config.tty, Path::new("/dev/pts/7"));
		assert_eq!(config.session_config().tty, Path::new("/dev/pts/7"));

		let config = load_with_env(&cli(&path, &["-t", "/dev/pts/9"]), &EnvSource::empty()).expect("loads");
		assert_eq!(config.tty, Path::new("/dev/pts/9"));

		let bare = CliArgs::try_parse_from(["frzy", "--no-config"]).expect("parses");
		let config = load_with_env(&bare, &EnvSource::empty()).expect("loads");
		assert_eq!(config.tty, Path::new(frzy_tui::DEFAULT_TTY));
	}

	#[test]
	fn zero_benchmark_runs_are_rejected() {
		let cli = CliArgs::try_parse_from(["frzy", "--no-config", "-e", "a", "--benchmark=0"]).expect("parses");
		let err = load_with_env(&cli, &EnvSource::empty()).unwrap_err();
		assert_eq!(settings_error(&err).key, "benchmark");

		let cli = CliArgs::try_parse_from(["frzy", "--no-config", "-e", "a", "-b=3"]).expect("parses");
		let config = load_with_env(&cli, &EnvSource::empty()).expect("loads");
		assert_eq!(config.benchmark, Some(3));
	}
}
