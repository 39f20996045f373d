use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File, Map};

use crate::app_dirs;
use crate::cli::CliArgs;

const ENV_PREFIX: &str = "frzy";

/// Where `FRZY_*` variables are read from.
pub(super) struct EnvSource {
	vars: Option<Map<String, String>>,
}

impl EnvSource {
	/// The process environment.
	pub(super) fn system() -> Self {
		Self { vars: None }
	}

	#[cfg(test)]
	pub(super) fn empty() -> Self {
		Self::from_pairs(&[])
	}

	#[cfg(test)]
	pub(super) fn from_pairs(pairs: &[(&str, &str)]) -> Self {
		let vars = pairs
			.iter()
			.map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
			.collect();
		Self { vars: Some(vars) }
	}

	/// Whether `name` is set in this environment.
	pub(super) fn is_set(&self, name: &str) -> bool {
		match &self.vars {
			Some(vars) => vars.contains_key(name),
			None => env::var_os(name).is_some(),
		}
	}

	fn environment(&self) -> Environment {
		Environment::with_prefix(ENV_PREFIX)
			.prefix_separator("_")
			.separator("__")
			.try_parsing(true)
			.source(self.vars.clone())
	}
}

/// Build a [`Config`] from the default locations, explicit files and the
/// environment, in increasing priority.
pub(super) fn build_config(cli: &CliArgs, env: &EnvSource) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			log::debug!("config candidate {}", path.display());
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		log::debug!("config file {}", path.display());
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(env.environment());

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

/// Default configuration files, lowest priority first.
pub(super) fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".frzy.toml"));
		files.push(current_dir.join("frzy.toml"));
	}

	files
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_files_include_current_directory_variants() {
		let files = default_config_files();
		assert!(files.iter().any(|path| path.ends_with(".frzy.toml")));
		assert!(files.iter().any(|path| path.ends_with("frzy.toml")));
	}

	#[test]
	fn injected_environment_is_consulted() {
		let env = EnvSource::from_pairs(&[("FRZY_UI__LINES", "3")]);
		assert!(env.is_set("FRZY_UI__LINES"));
		assert!(!env.is_set("FRZY_SEARCH__WORKERS"));
	}
}
