mod app_dirs;
mod cli;
mod logging;
mod settings;
mod source;
mod workflow;

use std::process::ExitCode;

use anyhow::Result;
use cli::{CliArgs, parse_cli};
use workflow::SearchWorkflow;

/// Exit status for errors.
const FAILURE: u8 = 2;

fn main() -> ExitCode {
	let cli = parse_cli();

	match run(cli) {
		Ok(status) => status,
		Err(err) => {
			log::error!("{err:#}");
			eprintln!("Error: {err}");
			for cause in err.chain().skip(1) {
				eprintln!("  caused by: {cause}");
			}
			ExitCode::from(FAILURE)
		}
	}
}

fn run(cli: CliArgs) -> Result<ExitCode> {
	logging::initialize()?;
	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	SearchWorkflow::from_config(resolved, cli.output).run()
}
