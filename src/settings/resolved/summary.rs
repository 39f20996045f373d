use std::io::{self, Write};

use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	if let Err(err) = write_summary(&mut io::stderr().lock(), config) {
		log::warn!("failed to print configuration: {err}");
	}
}

fn write_summary(out: &mut impl Write, config: &ResolvedConfig) -> io::Result<()> {
	writeln!(out, "Effective configuration:")?;
	writeln!(out, "  Prompt: {:?}", config.prompt)?;
	writeln!(out, "  Lines: {}", config.lines)?;
	writeln!(out, "  Show scores: {}", bool_to_word(config.show_scores))?;
	writeln!(out, "  Show info: {}", bool_to_word(config.show_info))?;
	writeln!(out, "  Workers: {}", config.workers)?;
	writeln!(out, "  Delimiter: {}", config.delimiter)?;
	writeln!(out, "  Terminal: {}", config.tty.display())?;
	if !config.initial_query.is_empty() {
		writeln!(out, "  Initial query: {}", config.initial_query)?;
	}
	if let Some(query) = &config.show_matches {
		writeln!(out, "  Show matches for: {query}")?;
	}
	if let Some(runs) = config.benchmark {
		writeln!(out, "  Benchmark runs: {runs}")?;
	}
	Ok(())
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
