use super::ranker::Match;

/// Ranked matches for one query generation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankedResults {
	/// Generation of the query that produced these results. Zero before the
	/// first search.
	pub generation: u64,
	/// Query the candidates were ranked against.
	pub query: String,
	/// Matches, best first.
	pub matches: Vec<Match>,
	/// Number of candidates that were considered.
	pub total: usize,
}

impl RankedResults {
	/// Number of matching candidates.
	#[must_use]
	pub fn len(&self) -> usize {
		self.matches.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.matches.is_empty()
	}

	/// Match at `rank`, where zero is the best.
	#[must_use]
	pub fn get(&self, rank: usize) -> Option<&Match> {
		self.matches.get(rank)
	}

	/// Matches in ranked order.
	pub fn iter(&self) -> std::slice::Iter<'_, Match> {
		self.matches.iter()
	}

	/// Rank of the candidate at `index`, if it matched.
	#[must_use]
	pub fn rank_of(&self, index: usize) -> Option<usize> {
		self.matches.iter().position(|m| m.index == index)
	}
}

impl<'a> IntoIterator for &'a RankedResults {
	type Item = &'a Match;
	type IntoIter = std::slice::Iter<'a, Match>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
