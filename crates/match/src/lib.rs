//! Fuzzy subsequence scoring for short lines of text.
//!
//! A query matches a candidate when every query character appears in the
//! candidate in order, ignoring case. Matches are then ranked by how well the
//! matched characters line up with word boundaries and with each other:
//!
//! ```
//! use frzy_match::score;
//!
//! let good = score("app/models/order", "amor").unwrap();
//! let poor = score("app/models/zrder", "amor").unwrap();
//! assert!(good > poor);
//! assert_eq!(score("tags", "ass"), None);
//! ```

pub mod bonus;
mod scorer;

pub use scorer::{Positions, Scorer};

/// Match quality. Higher is better.
pub type Score = f64;

/// Score of an exact match, and of any candidate under an empty query.
pub const SCORE_MAX: Score = 1.0;

/// Longest candidate or query, in characters, that can be scored.
///
/// Longer inputs never match.
pub const MATCH_MAX_LEN: usize = 1024;

/// Whether `query` is a case-insensitive subsequence of `candidate`.
#[must_use]
pub fn has_match(candidate: &str, query: &str) -> bool {
	Scorer::new(query).has_match(candidate)
}

/// Score `candidate` against `query`, or `None` if it does not match.
///
/// Build a [`Scorer`] instead when scoring many candidates for one query.
#[must_use]
pub fn score(candidate: &str, query: &str) -> Option<Score> {
	Scorer::new(query).score(candidate)
}

/// Score `candidate` and report the character indices the match used.
#[must_use]
pub fn match_positions(candidate: &str, query: &str) -> Option<Positions> {
	Scorer::new(query).positions(candidate)
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	proptest! {
		#[test]
		fn empty_query_matches_everything(candidate in ".{0,64}") {
			prop_assert_eq!(score(&candidate, ""), Some(SCORE_MAX));
		}

		#[test]
		fn empty_candidate_matches_nothing(query in ".{1,16}") {
			prop_assert_eq!(score("", &query), None);
		}

		#[test]
		fn longer_query_never_matches(candidate in "[a-z]{0,16}", extra in "[a-z]{1,4}") {
			let query = format!("{candidate}{extra}");
			prop_assert_eq!(score(&candidate, &query), None);
		}

		#[test]
		fn candidate_matches_itself_exactly(candidate in "[ -~]{1,1024}") {
			prop_assert_eq!(score(&candidate, &candidate), Some(SCORE_MAX));
		}

		#[test]
		fn positions_are_ascending_and_in_bounds(
			candidate in "[a-zA-Z/._ -]{1,48}",
			picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..6),
		) {
			let chars: Vec<char> = candidate.chars().collect();
			let mut indices: Vec<usize> = picks.iter().map(|p| p.index(chars.len())).collect();
			indices.sort_unstable();
			indices.dedup();
			let query: String = indices.iter().map(|&i| chars[i]).collect();

			let found = match_positions(&candidate, &query).expect("subsequence matches");
			prop_assert_eq!(found.indices.len(), query.chars().count());
			prop_assert!(found.indices.windows(2).all(|w| w[0] < w[1]));
			prop_assert!(found.indices.iter().all(|&i| i < chars.len()));
			prop_assert!(found.score <= SCORE_MAX);
		}
	}
}
