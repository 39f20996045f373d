//! File logging bootstrap.
//!
//! The terminal belongs to the session, so records never go to the tty. With
//! `FRZY_LOG` set (env_logger filter syntax) they are appended to
//! `frzy.log` in the cache directory, or to `FRZY_LOG_FILE`.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::{Env, Target};

use crate::app_dirs;

const LOG_ENV: &str = "FRZY_LOG";
const LOG_FILE_ENV: &str = "FRZY_LOG_FILE";
const LOG_FILE_NAME: &str = "frzy.log";

/// Install the file logger when `FRZY_LOG` asks for one.
pub(crate) fn initialize() -> Result<()> {
	if env::var_os(LOG_ENV).is_none_or(|filter| filter.is_empty()) {
		return Ok(());
	}

	let path = log_path()?;
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;

	env_logger::Builder::from_env(Env::new().filter(LOG_ENV))
		.target(Target::Pipe(Box::new(file)))
		.format_timestamp_millis()
		.try_init()
		.context("failed to install logger")?;

	log::debug!("frzy {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
	Ok(())
}

fn log_path() -> Result<PathBuf> {
	match env::var_os(LOG_FILE_ENV) {
		Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
		_ => Ok(app_dirs::get_cache_dir()?.join(LOG_FILE_NAME)),
	}
}
