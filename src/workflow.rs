//! Reads candidates and runs either the interactive session or the
//! non-interactive filter.

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use frzy_stream::search::{Candidates, Dataset};
use frzy_tui::{SessionOutcome, filter, format_filtered};

use crate::cli::{OutputFormat, print_json, print_plain};
use crate::settings::ResolvedConfig;
use crate::source::read_candidates;

/// Exit status of a cancelled session.
const CANCELLED: u8 = 1;

/// Coordinates reading the candidate list and producing output.
pub(crate) struct SearchWorkflow {
	config: ResolvedConfig,
	format: OutputFormat,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig, format: OutputFormat) -> Self {
		Self { config, format }
	}

	pub(crate) fn run(self) -> Result<ExitCode> {
		let candidates = read_candidates(io::stdin().lock(), self.config.delimiter)
			.context("failed to read candidates from stdin")?;
		let mut out = io::stdout().lock();

		if let Some(query) = &self.config.show_matches {
			if let Some(runs) = self.config.benchmark {
				self.benchmark(&candidates, query, runs);
				return Ok(ExitCode::SUCCESS);
			}
			self.print_matches(&mut out, &candidates, query)?;
			return Ok(ExitCode::SUCCESS);
		}

		log::debug!("starting session over {} candidates", candidates.len());
		let outcome = frzy_tui::run(candidates, self.config.session_config())?;
		log::debug!("session ended, accepted: {}", outcome.accepted);
		self.print_outcome(&mut out, &outcome)?;

		Ok(if outcome.accepted {
			ExitCode::SUCCESS
		} else {
			ExitCode::from(CANCELLED)
		})
	}

	fn print_matches(&self, out: &mut impl Write, candidates: &Candidates, query: &str) -> Result<()> {
		for found in filter(candidates, query, self.config.workers) {
			writeln!(out, "{}", format_filtered(&found, query, self.config.show_scores))
				.context("failed to write matches")?;
		}
		out.flush().context("failed to write matches")
	}

	/// Rank `query` `runs` times and log how long it took. Prints nothing.
	fn benchmark(&self, candidates: &Candidates, query: &str, runs: usize) -> usize {
		let started = Instant::now();
		let mut matched = 0;
		for _ in 0..runs {
			matched = filter(candidates, query, self.config.workers).len();
		}
		log::info!(
			"ranked {query:?} {runs} times over {} candidates in {:?} ({matched} matches)",
			candidates.len(),
			started.elapsed()
		);
		matched
	}

	fn print_outcome(&self, out: &mut impl Write, outcome: &SessionOutcome) -> Result<()> {
		match self.format {
			OutputFormat::Plain => print_plain(out, outcome)?,
			OutputFormat::Json => print_json(out, outcome)?,
		}
		out.flush().context("failed to write selection")
	}
}
