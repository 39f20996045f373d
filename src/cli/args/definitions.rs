use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `frzy` binary.
#[derive(Parser, Debug)]
#[command(
	name = "frzy",
	version,
	long_version = long_version(),
	about = "Pick a line from stdin with an inline fuzzy finder",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short = 'l',
		long,
		value_name = "N",
		help = "Number of result rows to show (default: 10)"
	)]
	pub(crate) lines: Option<usize>,
	#[arg(
		short = 'p',
		long,
		value_name = "TEXT",
		help = "Prompt shown before the query (default: \"> \")"
	)]
	pub(crate) prompt: Option<String>,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		help = "Start with this query (default: empty)"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		short = 'e',
		long = "show-matches",
		value_name = "QUERY",
		help = "Print the ranked matches for QUERY and exit"
	)]
	pub(crate) show_matches: Option<String>,
	#[arg(
		short = 'b',
		long,
		value_name = "N",
		num_args = 0..=1,
		require_equals = true,
		default_missing_value = "100",
		requires = "show_matches",
		help = "Rank the --show-matches query N times without printing (default N: 100)"
	)]
	pub(crate) benchmark: Option<usize>,
	#[arg(
		short = 's',
		long = "show-scores",
		help = "Show the score of each match (default: disabled)"
	)]
	pub(crate) show_scores: bool,
	#[arg(
		short = 'i',
		long = "show-info",
		help = "Show the number of matches and candidates (default: disabled)"
	)]
	pub(crate) show_info: bool,
	#[arg(
		short = 'j',
		long,
		value_name = "N",
		help = "Threads used for ranking (default: available parallelism)"
	)]
	pub(crate) workers: Option<usize>,
	#[arg(
		short = '0',
		long = "read-null",
		help = "Read NUL-delimited candidates (default: newline-delimited)"
	)]
	pub(crate) read_null: bool,
	#[arg(
		short = 't',
		long,
		value_name = "TTY",
		help = "Terminal device to draw on (default: /dev/tty)"
	)]
	pub(crate) tty: Option<PathBuf>,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the selection"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "FRZY_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long = "print-config",
		help = "Print the resolved configuration to stderr before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
}
