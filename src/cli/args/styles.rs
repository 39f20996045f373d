use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

use crate::app_dirs;

/// Version banner followed by the directories frzy reads and writes.
pub(super) fn long_version() -> &'static str {
	let mut details = format!("frzy {}\n", env!("CARGO_PKG_VERSION"));
	let dirs = [
		("config", app_dirs::get_config_dir()),
		("data", app_dirs::get_data_dir()),
		("cache", app_dirs::get_cache_dir()),
	];
	for (label, dir) in dirs {
		let _ = writeln!(details, "{label} directory: {}", describe(dir));
	}

	Box::leak(details.into_boxed_str())
}

fn describe(dir: Result<PathBuf>) -> String {
	match dir {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	}
}

/// Colours for `--help`.
pub(super) fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}
