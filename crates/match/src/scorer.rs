use crate::bonus::{
	self, LEADING_CONTEXT, SCORE_GAP_INNER, SCORE_GAP_LEADING, SCORE_GAP_TRAILING,
	SCORE_MATCH_CEILING, SCORE_MATCH_CONSECUTIVE,
};
use crate::{MATCH_MAX_LEN, SCORE_MAX, Score};

/// Sentinel for cells that cannot be part of an alignment.
const SCORE_MIN: Score = Score::NEG_INFINITY;

/// Score of a match together with the candidate character indices it used.
#[derive(Clone, Debug, PartialEq)]
pub struct Positions {
	/// Normalised score, as returned by [`Scorer::score`].
	pub score: Score,
	/// Ascending character (not byte) indices into the candidate.
	pub indices: Vec<usize>,
}

/// Scores candidates against one query.
///
/// The scorer owns its dynamic-programming matrices and reuses them between
/// calls, so a search worker should build one scorer per query and feed it
/// every candidate of its chunk.
#[derive(Clone, Debug)]
pub struct Scorer {
	needle: Vec<char>,
	haystack: Vec<char>,
	bonus: Vec<Score>,
	/// Best score of an alignment whose last query char matches at (i, j).
	matched: Vec<Score>,
	/// Best score of an alignment of query[..=i] within candidate[..=j].
	best: Vec<Score>,
}

impl Scorer {
	/// Prepare a scorer for `query`. Matching ignores case.
	#[must_use]
	pub fn new(query: &str) -> Self {
		Self {
			needle: query.chars().map(fold).collect(),
			haystack: Vec::new(),
			bonus: Vec::new(),
			matched: Vec::new(),
			best: Vec::new(),
		}
	}

	/// Whether every query character occurs in `candidate`, in order.
	///
	/// This ignores the length bound, so it can be true for candidates that
	/// [`Scorer::score`] rejects.
	#[must_use]
	pub fn has_match(&self, candidate: &str) -> bool {
		let mut remaining = self.needle.iter();
		let mut wanted = remaining.next();
		for ch in candidate.chars() {
			let Some(&needle) = wanted else {
				break;
			};
			if fold(ch) == needle {
				wanted = remaining.next();
			}
		}
		wanted.is_none()
	}

	/// Score `candidate`, or `None` when it does not match.
	///
	/// An empty query matches everything with [`SCORE_MAX`], as does a
	/// candidate equal to the query up to case. Every other match scores
	/// strictly below [`SCORE_MAX`]. Scores only order candidates of the same
	/// query and carry no meaning across queries.
	pub fn score(&mut self, candidate: &str) -> Option<Score> {
		let n = self.needle.len();
		if n == 0 {
			return Some(SCORE_MAX);
		}
		if !self.load(candidate) {
			return None;
		}
		if n == self.haystack.len() {
			return Some(SCORE_MAX);
		}

		let raw = self.fill();
		Some(self.normalise(raw))
	}

	/// Score `candidate` and recover which characters the best alignment used.
	pub fn positions(&mut self, candidate: &str) -> Option<Positions> {
		let n = self.needle.len();
		if n == 0 {
			return Some(Positions {
				score: SCORE_MAX,
				indices: Vec::new(),
			});
		}
		if !self.load(candidate) {
			return None;
		}
		if n == self.haystack.len() {
			return Some(Positions {
				score: SCORE_MAX,
				indices: (0..n).collect(),
			});
		}

		let raw = self.fill();
		Some(Positions {
			score: self.normalise(raw),
			indices: self.backtrack(),
		})
	}

	/// Copy `candidate` into the scratch buffers. Returns false when it
	/// cannot match or exceeds the length bound.
	fn load(&mut self, candidate: &str) -> bool {
		if self.needle.len() > MATCH_MAX_LEN || !self.has_match(candidate) {
			return false;
		}

		self.haystack.clear();
		self.bonus.clear();
		let mut prev = LEADING_CONTEXT;
		for ch in candidate.chars() {
			if self.haystack.len() == MATCH_MAX_LEN {
				return false;
			}
			self.bonus.push(bonus::compute(prev, ch));
			self.haystack.push(fold(ch));
			prev = ch;
		}
		true
	}

	fn fill(&mut self) -> Score {
		let n = self.needle.len();
		let m = self.haystack.len();

		self.matched.clear();
		self.matched.resize(n * m, SCORE_MIN);
		self.best.clear();
		self.best.resize(n * m, SCORE_MIN);

		for i in 0..n {
			let row = i * m;
			let gap = if i == n - 1 {
				SCORE_GAP_TRAILING
			} else {
				SCORE_GAP_INNER
			};
			let mut running = SCORE_MIN;

			for j in 0..m {
				if self.needle[i] == self.haystack[j] {
					let score = if i == 0 {
						j as Score * SCORE_GAP_LEADING + self.bonus[j]
					} else if j > 0 {
						let diagonal = row - m + j - 1;
						// The consecutive bonus replaces the boundary bonus.
						(self.best[diagonal] + self.bonus[j])
							.max(self.matched[diagonal] + SCORE_MATCH_CONSECUTIVE)
					} else {
						SCORE_MIN
					};
					self.matched[row + j] = score;
					running = score.max(running + gap);
				} else {
					running += gap;
				}
				self.best[row + j] = running;
			}
		}

		self.best[n * m - 1]
	}

	/// Walk the filled matrices back from the final cell.
	///
	/// Among equally good alignments this picks the one that matches as late
	/// in the candidate as possible.
	fn backtrack(&self) -> Vec<usize> {
		let n = self.needle.len();
		let m = self.haystack.len();
		let mut indices = vec![0; n];
		let mut match_required = false;
		let mut j = m;

		for i in (0..n).rev() {
			while j > 0 {
				j -= 1;
				let cell = i * m + j;
				let matched = self.matched[cell];
				if matched != SCORE_MIN && (match_required || matched == self.best[cell]) {
					// A consecutive bonus here means the previous query char
					// must sit on the previous candidate char.
					match_required = i > 0
						&& j > 0 && self.best[cell]
						== self.matched[cell - m - 1] + SCORE_MATCH_CONSECUTIVE;
					indices[i] = j;
					break;
				}
			}
		}

		indices
	}

	fn normalise(&self, raw: Score) -> Score {
		raw / (self.needle.len() as Score * SCORE_MATCH_CEILING)
	}
}

fn fold(ch: char) -> char {
	if ch.is_ascii() {
		ch.to_ascii_lowercase()
	} else {
		ch.to_lowercase().next().unwrap_or(ch)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::bonus::{
		SCORE_MATCH_CAPITAL, SCORE_MATCH_DOT, SCORE_MATCH_SLASH, SCORE_MATCH_WORD,
	};
	use crate::{has_match, match_positions, score};

	const SCORE_TOLERANCE: Score = 0.000_001;

	/// Scale a raw alignment score the way the scorer does for `query_len`.
	fn normalised(raw: Score, query_len: usize) -> Score {
		raw / (query_len as Score * SCORE_MATCH_CEILING)
	}

	fn assert_score(candidate: &str, query: &str, raw: Score) {
		let expected = normalised(raw, query.chars().count());
		let actual = score(candidate, query).expect("candidate should match");
		assert!(
			(actual - expected).abs() < SCORE_TOLERANCE,
			"score({candidate:?}, {query:?}) = {actual}, expected {expected}"
		);
	}

	fn positions_of(candidate: &str, query: &str) -> Vec<usize> {
		match_positions(candidate, query)
			.expect("candidate should match")
			.indices
	}

	#[test]
	fn exact_and_partial_matches_are_detected() {
		assert!(has_match("a", "a"));
		assert!(has_match("ab", "a"));
		assert!(has_match("ba", "a"));
		assert!(has_match("a|b|c", "abc"));
		assert!(has_match("", ""));
		assert!(has_match("a", ""));
	}

	#[test]
	fn missing_characters_do_not_match() {
		assert!(!has_match("", "a"));
		assert!(!has_match("b", "a"));
		assert!(!has_match("tags", "ass"));
		assert_eq!(score("tags", "ass"), None);
		assert_eq!(score("b", "a"), None);
	}

	#[test]
	fn prefers_starts_of_words() {
		// App/Models/Order beats App/MOdels/zRder
		assert!(score("app/models/order", "amor") > score("app/models/zrder", "amor"));
		assert!(score("app/models/order", "amo") > score("app/models/foo", "amo"));
	}

	#[test]
	fn prefers_consecutive_letters() {
		assert!(score("app/m/foo", "amo") < score("app/models/foo", "amo"));
	}

	#[test]
	fn prefers_contiguous_over_letter_following_period() {
		assert!(score("Gemfile.lock", "gemfil") < score("Gemfile", "gemfil"));
	}

	#[test]
	fn prefers_shorter_matches() {
		assert!(score("abcdef", "abce") > score("abc de", "abce"));
		assert!(score(" a b c    ", "abc") > score(" a  b  c ", "abc"));
	}

	#[test]
	fn prefers_shorter_candidates() {
		assert!(score("tests", "test") > score("testing", "test"));
	}

	#[test]
	fn prefers_start_of_candidate() {
		assert!(score("testing", "test") > score("/testing", "test"));
	}

	#[test]
	fn exact_match_scores_the_ceiling() {
		assert_eq!(score("abc", "abc"), Some(SCORE_MAX));
		assert_eq!(score("abC", "aBc"), Some(SCORE_MAX));
	}

	#[test]
	fn empty_query_scores_the_ceiling() {
		assert_eq!(score("", ""), Some(SCORE_MAX));
		assert_eq!(score("a", ""), Some(SCORE_MAX));
		assert_eq!(score("bb", ""), Some(SCORE_MAX));
	}

	#[test]
	fn non_exact_matches_stay_below_the_ceiling() {
		for (candidate, query) in [("ab", "a"), ("/a", "a"), ("a/b", "ab"), ("foo bar", "fb")] {
			let value = score(candidate, query).expect("match");
			assert!(value < SCORE_MAX, "{candidate:?} scored {value}");
		}
	}

	#[test]
	fn reused_scorer_agrees_with_positions() {
		let mut scorer = Scorer::new("amo");
		for candidate in ["app/models/order", "a_m_o", "xamox"] {
			let scored = scorer.score(candidate).expect("match");
			let found = scorer.positions(candidate).expect("match");
			assert!((scored - found.score).abs() < SCORE_TOLERANCE, "{candidate:?}");
			assert!(scored < SCORE_MAX);
		}
	}

	#[test]
	fn weak_matches_are_still_matches() {
		for candidate in ["a", "ab", "ba", "bab", "babababab"] {
			assert!(score(candidate, "a").is_some(), "{candidate:?}");
		}
		assert!(score("babababab", "bab") < score("bab", "bab"));
	}

	#[test]
	fn gaps_are_penalised() {
		assert_score("*a", "a", SCORE_GAP_LEADING);
		assert_score("*ba", "a", SCORE_GAP_LEADING * 2.0);
		assert_score("**a*", "a", SCORE_GAP_LEADING * 2.0 + SCORE_GAP_TRAILING);
		assert_score("**a**", "a", SCORE_GAP_LEADING * 2.0 + SCORE_GAP_TRAILING * 2.0);
		assert_score(
			"**aa**",
			"aa",
			SCORE_GAP_LEADING * 2.0 + SCORE_MATCH_CONSECUTIVE + SCORE_GAP_TRAILING * 2.0,
		);
		assert_score(
			"**a*a**",
			"aa",
			SCORE_GAP_LEADING * 2.0 + SCORE_GAP_INNER + SCORE_GAP_TRAILING * 2.0,
		);
	}

	#[test]
	fn consecutive_runs_are_rewarded() {
		assert_score("*aa", "aa", SCORE_GAP_LEADING + SCORE_MATCH_CONSECUTIVE);
		assert_score("*aaa", "aaa", SCORE_GAP_LEADING + SCORE_MATCH_CONSECUTIVE * 2.0);
		assert_score(
			"*a*aa",
			"aaa",
			SCORE_GAP_LEADING + SCORE_GAP_INNER + SCORE_MATCH_CONSECUTIVE,
		);
	}

	#[test]
	fn slash_bonus() {
		assert_score("/a", "a", SCORE_GAP_LEADING + SCORE_MATCH_SLASH);
		assert_score("*/a", "a", SCORE_GAP_LEADING * 2.0 + SCORE_MATCH_SLASH);
		assert_score(
			"*/aa",
			"aa",
			SCORE_GAP_LEADING * 2.0 + SCORE_MATCH_SLASH + SCORE_MATCH_CONSECUTIVE,
		);
	}

	#[test]
	fn word_bonus() {
		assert_score("-a", "a", SCORE_GAP_LEADING + SCORE_MATCH_WORD);
		assert_score("_a", "a", SCORE_GAP_LEADING + SCORE_MATCH_WORD);
		assert_score(" a", "a", SCORE_GAP_LEADING + SCORE_MATCH_WORD);
	}

	#[test]
	fn capital_bonus() {
		assert_score("bA", "a", SCORE_GAP_LEADING + SCORE_MATCH_CAPITAL);
		assert_score("baA", "a", SCORE_GAP_LEADING * 2.0 + SCORE_MATCH_CAPITAL);
		assert_score(
			"baAa",
			"aa",
			SCORE_GAP_LEADING * 2.0 + SCORE_MATCH_CAPITAL + SCORE_MATCH_CONSECUTIVE,
		);
	}

	#[test]
	fn dot_bonus() {
		assert_score(".a", "a", SCORE_GAP_LEADING + SCORE_MATCH_DOT);
		assert_score("*a.a", "a", SCORE_GAP_LEADING * 3.0 + SCORE_MATCH_DOT);
	}

	#[test]
	fn long_inputs_are_rejected() {
		let long = "a".repeat(4095);
		assert_eq!(score(&long, "aa"), None);
		assert_eq!(score("aa", &long), None);
		assert_eq!(score(&long, &long), None);

		let bounded = "a".repeat(MATCH_MAX_LEN);
		assert_eq!(score(&bounded, &bounded), Some(SCORE_MAX));
	}

	#[test]
	fn positions_follow_consecutive_runs() {
		assert_eq!(positions_of("app/models/foo", "amo"), vec![0, 4, 5]);
	}

	#[test]
	fn positions_prefer_start_of_word() {
		// The 'o' of "order" wins because 'r' can follow it consecutively.
		assert_eq!(positions_of("app/models/order", "amor"), vec![0, 4, 11, 12]);
	}

	#[test]
	fn positions_without_bonuses() {
		assert_eq!(positions_of("tags", "as"), vec![1, 3]);
		assert_eq!(positions_of("examples.txt", "as"), vec![2, 7]);
	}

	#[test]
	fn positions_with_several_word_starts() {
		assert_eq!(positions_of("a/a/b/c/c", "abc"), vec![0, 4, 6]);
	}

	#[test]
	fn positions_of_exact_match() {
		assert_eq!(positions_of("foo", "foo"), vec![0, 1, 2]);
	}

	#[test]
	fn positions_count_characters_not_bytes() {
		assert_eq!(positions_of("Français", "çs"), vec![4, 7]);
		assert_eq!(positions_of("日本語", "語"), vec![2]);
	}

	#[test]
	fn positions_score_matches_plain_score() {
		let mut scorer = Scorer::new("amo");
		let plain = scorer.score("app/models/order");
		let with_positions = scorer.positions("app/models/order").map(|p| p.score);
		assert_eq!(plain, with_positions);
	}

	#[test]
	fn scorer_reuses_buffers_across_candidates() {
		let mut scorer = Scorer::new("ab");
		assert!(scorer.score("a very long candidate with a b in it").is_some());
		assert_eq!(scorer.score("ab"), Some(SCORE_MAX));
		assert_eq!(scorer.score("ba"), None);
		assert!(scorer.score("xab").is_some());
	}
}
