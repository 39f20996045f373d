use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

/// Prompt shown in front of the query when none is configured.
pub const DEFAULT_PROMPT: &str = "> ";

/// Number of result rows shown when none is configured.
pub const DEFAULT_LINES: usize = 10;

/// Terminal device the session draws on when none is configured.
pub const DEFAULT_TTY: &str = "/dev/tty";

/// Everything the session needs to know about how to present itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
	/// Text drawn in front of the query.
	pub prompt: String,
	/// Number of result rows below the prompt. Always at least one.
	pub lines: usize,
	/// Prefix every row with its score.
	pub show_scores: bool,
	/// Draw a `[matched/total]` line under the prompt.
	pub show_info: bool,
	/// Threads used per ranking pass.
	pub workers: usize,
	/// Query the session starts with.
	pub initial_query: String,
	/// Terminal device read for keys and drawn on.
	pub tty: PathBuf,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			prompt: DEFAULT_PROMPT.to_owned(),
			lines: DEFAULT_LINES,
			show_scores: false,
			show_info: false,
			workers: default_workers(),
			initial_query: String::new(),
			tty: PathBuf::from(DEFAULT_TTY),
		}
	}
}

impl SessionConfig {
	/// Height of the drawn region: prompt, optional info line and result rows.
	#[must_use]
	pub fn height(&self) -> u16 {
		let rows = 1 + usize::from(self.show_info) + self.lines.max(1);
		u16::try_from(rows).unwrap_or(u16::MAX)
	}
}

/// Host parallelism, or one when it cannot be determined.
#[must_use]
pub fn default_workers() -> usize {
	thread::available_parallelism().map_or(1, NonZeroUsize::get)
}
