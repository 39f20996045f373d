//! Scoring weights and the per-character bonus table.
//!
//! Every candidate character gets a bonus that depends on the character right
//! before it. The character before index 0 is treated as `/`, so the first
//! character of a candidate scores like the start of a path segment.

use crate::Score;

/// Penalty per unmatched character before the first match.
pub const SCORE_GAP_LEADING: Score = -0.015;
/// Penalty per unmatched character between two matches.
pub const SCORE_GAP_INNER: Score = -0.01;
/// Penalty per unmatched character after the last match.
pub const SCORE_GAP_TRAILING: Score = -0.005;

/// Bonus for a match directly following another match.
pub const SCORE_MATCH_CONSECUTIVE: Score = 0.85;
/// Bonus for a match right after `/`.
pub const SCORE_MATCH_SLASH: Score = 0.9;
/// Bonus for a match right after ` `, `-` or `_`.
pub const SCORE_MATCH_WORD: Score = 0.8;
/// Bonus for an uppercase match right after a lowercase letter.
pub const SCORE_MATCH_CAPITAL: Score = 0.7;
/// Bonus for a match right after `.`.
pub const SCORE_MATCH_DOT: Score = 0.6;

/// Largest amount a single matched character can contribute.
pub(crate) const SCORE_MATCH_CEILING: Score = SCORE_MATCH_SLASH;

/// Character assumed to precede the first candidate character.
pub(crate) const LEADING_CONTEXT: char = '/';

/// Bonus for matching `ch` when it follows `prev` in the candidate.
#[must_use]
pub fn compute(prev: char, ch: char) -> Score {
	if !ch.is_alphanumeric() {
		return 0.0;
	}

	match prev {
		'/' => SCORE_MATCH_SLASH,
		' ' | '-' | '_' => SCORE_MATCH_WORD,
		'.' => SCORE_MATCH_DOT,
		_ if ch.is_uppercase() && prev.is_lowercase() => SCORE_MATCH_CAPITAL,
		_ => 0.0,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn separators_reward_the_following_character() {
		assert_eq!(compute('/', 'a'), SCORE_MATCH_SLASH);
		assert_eq!(compute('-', 'a'), SCORE_MATCH_WORD);
		assert_eq!(compute('_', 'a'), SCORE_MATCH_WORD);
		assert_eq!(compute(' ', '7'), SCORE_MATCH_WORD);
		assert_eq!(compute('.', 'a'), SCORE_MATCH_DOT);
	}

	#[test]
	fn camel_case_humps_earn_capital_bonus() {
		assert_eq!(compute('b', 'A'), SCORE_MATCH_CAPITAL);
		assert_eq!(compute('B', 'A'), 0.0);
		assert_eq!(compute('1', 'A'), 0.0);
	}

	#[test]
	fn separators_themselves_never_score() {
		assert_eq!(compute('/', '/'), 0.0);
		assert_eq!(compute('a', '.'), 0.0);
		assert_eq!(compute(' ', '-'), 0.0);
	}

	#[test]
	fn consecutive_run_is_the_strongest_non_boundary_bonus() {
		assert!(SCORE_MATCH_CONSECUTIVE > SCORE_MATCH_CAPITAL);
		assert!(SCORE_MATCH_CONSECUTIVE <= SCORE_MATCH_CEILING);
		assert!(SCORE_GAP_LEADING < SCORE_GAP_INNER);
		assert!(SCORE_GAP_INNER < SCORE_GAP_TRAILING);
	}
}
