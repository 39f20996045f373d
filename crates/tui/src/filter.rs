//! Non-interactive ranking for `--show-matches`.

use frzy_match::Score;
use frzy_stream::search::{CancelToken, Candidates, Dataset, rank};

/// A candidate that matched the filter query.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredMatch<'a> {
	pub text: &'a str,
	pub index: usize,
	pub score: Score,
}

/// Rank `candidates` against `query` on the calling thread plus `workers`
/// scoped helpers, best first.
#[must_use]
pub fn filter<'a>(candidates: &'a Candidates, query: &str, workers: usize) -> Vec<FilteredMatch<'a>> {
	let ranked = rank(candidates, query, workers, &CancelToken::never()).unwrap_or_default();
	log::debug!("filter {query:?}: {} of {} matched", ranked.len(), candidates.len());
	ranked
		.into_iter()
		.filter_map(|found| {
			let text = candidates.get(found.index)?;
			Some(FilteredMatch {
				text,
				index: found.index,
				score: found.score,
			})
		})
		.collect()
}

/// One output line, optionally prefixed with a tab-separated score.
#[must_use]
pub fn format_filtered(found: &FilteredMatch<'_>, query: &str, show_scores: bool) -> String {
	if !show_scores {
		return found.text.to_owned();
	}
	if query.is_empty() {
		format!("inf\t{}", found.text)
	} else {
		format!("{:.6}\t{}", found.score, found.text)
	}
}
