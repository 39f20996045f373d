//! Reading the candidate list from stdin.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use anyhow::{Context, Result};
use frzy_stream::search::Candidates;

/// Record separator of the candidate stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Delimiter {
	#[default]
	Newline,
	Nul,
}

impl Delimiter {
	fn byte(self) -> u8 {
		match self {
			Self::Newline => b'\n',
			Self::Nul => b'\0',
		}
	}
}

impl FromStr for Delimiter {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"newline" | "lf" => Ok(Self::Newline),
			"nul" | "null" => Ok(Self::Nul),
			_ => Err("expected \"newline\" or \"nul\"".to_owned()),
		}
	}
}

impl fmt::Display for Delimiter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Newline => "newline",
			Self::Nul => "nul",
		})
	}
}

/// Split `reader` into candidates.
///
/// Empty records are skipped and invalid UTF-8 is replaced. In newline mode a
/// trailing `\r` is dropped from each record.
pub(crate) fn read_candidates<R: BufRead>(reader: R, delimiter: Delimiter) -> Result<Candidates> {
	let mut lines = Vec::new();
	for record in reader.split(delimiter.byte()) {
		let mut record = record.context("failed to read candidates")?;
		if delimiter == Delimiter::Newline && record.last() == Some(&b'\r') {
			record.pop();
		}
		if record.is_empty() {
			continue;
		}
		let line = match String::from_utf8(record) {
			Ok(line) => line,
			Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
		};
		lines.push(line);
	}
	log::debug!("read {} candidates ({delimiter} delimited)", lines.len());
	Ok(Candidates::from(lines))
}
