use std::cmp::{Ordering as CmpOrdering, Reverse};
use std::collections::BinaryHeap;
use std::ops::Range;
use std::panic;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::thread;

use frzy_match::{SCORE_MAX, Score, Scorer};

use super::dataset::Dataset;

/// Number of candidates scored between two cancellation checks.
pub const MATCH_CHUNK_SIZE: usize = 512;

/// A candidate that matched the query.
#[derive(Clone, Copy, Debug)]
pub struct Match {
	/// Position of the candidate in the input.
	pub index: usize,
	/// Score assigned by the scorer.
	pub score: Score,
}

/// Orders by rank: higher scores first, then input order.
impl Ord for Match {
	fn cmp(&self, other: &Self) -> CmpOrdering {
		other
			.score
			.total_cmp(&self.score)
			.then_with(|| self.index.cmp(&other.index))
	}
}

impl PartialOrd for Match {
	fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for Match {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == CmpOrdering::Equal
	}
}

impl Eq for Match {}

/// Check if this query has been superseded by a newer one.
pub fn should_abort(id: u64, latest_query_id: &AtomicU64) -> bool {
	latest_query_id.load(AtomicOrdering::Acquire) != id
}

/// Generation token handed to every ranking pass.
#[derive(Clone, Copy, Debug)]
pub struct CancelToken<'a> {
	id: u64,
	latest: Option<&'a AtomicU64>,
}

impl<'a> CancelToken<'a> {
	/// Token for generation `id`, stale once `latest` moves past it.
	#[must_use]
	pub fn new(id: u64, latest: &'a AtomicU64) -> Self {
		Self {
			id,
			latest: Some(latest),
		}
	}

	/// Token that never goes stale.
	#[must_use]
	pub fn never() -> Self {
		Self {
			id: 0,
			latest: None,
		}
	}

	/// Whether a newer generation has been submitted.
	#[must_use]
	pub fn is_stale(&self) -> bool {
		self.latest
			.is_some_and(|latest| should_abort(self.id, latest))
	}
}

/// Rank every candidate of `dataset` against `query`.
///
/// The dataset is split into one contiguous chunk per worker. Each chunk is
/// scored on its own thread with a private [`Scorer`] and sorted locally, then
/// the sorted chunks are merged. The result does not depend on `workers`.
///
/// Returns `None` when `cancel` went stale before the ranking finished.
pub fn rank<D>(dataset: &D, query: &str, workers: usize, cancel: &CancelToken<'_>) -> Option<Vec<Match>>
where
	D: Dataset + Sync + ?Sized,
{
	let total = dataset.len();
	if total == 0 {
		return Some(Vec::new());
	}
	if query.is_empty() {
		return Some(
			(0..total)
				.map(|index| Match {
					index,
					score: SCORE_MAX,
				})
				.collect(),
		);
	}

	let workers = workers.clamp(1, total);
	if workers == 1 {
		return score_range(dataset, query, 0..total, cancel);
	}

	let chunk = total.div_ceil(workers);
	let parts = thread::scope(|scope| {
		let mut pending = Vec::with_capacity(workers);
		for (worker, start) in (0..total).step_by(chunk).enumerate() {
			let range = start..(start + chunk).min(total);
			let spawned = thread::Builder::new()
				.name(format!("frzy-rank-{worker}"))
				.spawn_scoped(scope, {
					let range = range.clone();
					move || score_range(dataset, query, range, cancel)
				});
			match spawned {
				Ok(handle) => pending.push(Part::Spawned(handle)),
				Err(err) => {
					log::warn!("failed to spawn ranking thread {worker}, scoring inline: {err}");
					pending.push(Part::Inline(range));
				}
			}
		}

		pending
			.into_iter()
			.map(|part| match part {
				Part::Spawned(handle) => handle
					.join()
					.unwrap_or_else(|payload| panic::resume_unwind(payload)),
				Part::Inline(range) => score_range(dataset, query, range, cancel),
			})
			.collect::<Option<Vec<_>>>()
	})?;

	if cancel.is_stale() {
		return None;
	}
	Some(merge(parts))
}

enum Part<'scope> {
	Spawned(thread::ScopedJoinHandle<'scope, Option<Vec<Match>>>),
	Inline(Range<usize>),
}

fn score_range<D>(
	dataset: &D,
	query: &str,
	range: Range<usize>,
	cancel: &CancelToken<'_>,
) -> Option<Vec<Match>>
where
	D: Dataset + ?Sized,
{
	let mut scorer = Scorer::new(query);
	let mut matches = Vec::new();

	for (step, index) in range.enumerate() {
		if step % MATCH_CHUNK_SIZE == 0 && cancel.is_stale() {
			return None;
		}
		if let Some(score) = scorer.score(dataset.key_for(index)) {
			matches.push(Match { index, score });
		}
	}

	matches.sort_unstable();
	Some(matches)
}

/// K-way merge of individually sorted runs.
fn merge(mut parts: Vec<Vec<Match>>) -> Vec<Match> {
	if parts.len() == 1 {
		return parts.pop().unwrap_or_default();
	}

	let total = parts.iter().map(Vec::len).sum();
	let mut merged = Vec::with_capacity(total);
	let mut heads: BinaryHeap<Reverse<(Match, usize, usize)>> = parts
		.iter()
		.enumerate()
		.filter_map(|(part, run)| run.first().map(|&first| Reverse((first, part, 0))))
		.collect();

	while let Some(Reverse((entry, part, position))) = heads.pop() {
		merged.push(entry);
		if let Some(&next) = parts[part].get(position + 1) {
			heads.push(Reverse((next, part, position + 1)));
		}
	}

	merged
}

#[cfg(test)]
mod tests {
	use super::*;

	fn numbers(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
		range.map(|n| n.to_string()).collect()
	}

	fn texts<'a>(dataset: &'a [String], matches: &[Match]) -> Vec<&'a str> {
		matches.iter().map(|m| dataset[m.index].as_str()).collect()
	}

	#[test]
	fn empty_dataset_yields_no_matches() {
		let dataset: Vec<String> = Vec::new();
		assert_eq!(rank(&dataset, "a", 4, &CancelToken::never()), Some(Vec::new()));
	}

	#[test]
	fn empty_query_keeps_input_order() {
		let dataset = vec!["b".to_owned(), "a".to_owned(), "c".to_owned()];
		let ranked = rank(&dataset, "", 2, &CancelToken::never()).unwrap();
		assert_eq!(texts(&dataset, &ranked), ["b", "a", "c"]);
		assert!(ranked.iter().all(|m| m.score == SCORE_MAX));
	}

	#[test]
	fn skips_candidates_that_do_not_match() {
		let dataset = vec!["foo".to_owned(), "bar".to_owned(), "fob".to_owned()];
		let ranked = rank(&dataset, "fo", 2, &CancelToken::never()).unwrap();
		assert_eq!(texts(&dataset, &ranked), ["foo", "fob"]);
	}

	#[test]
	fn equal_scores_keep_input_order() {
		let dataset = vec!["xa".to_owned(), "ya".to_owned(), "za".to_owned(), "wa".to_owned()];
		for workers in [1, 2, 3, 8] {
			let ranked = rank(&dataset, "a", workers, &CancelToken::never()).unwrap();
			let indices: Vec<_> = ranked.iter().map(|m| m.index).collect();
			assert_eq!(indices, [0, 1, 2, 3], "workers = {workers}");
		}
	}

	#[test]
	fn ranking_does_not_depend_on_worker_count() {
		let dataset: Vec<String> = (0..5_000)
			.map(|n| format!("src/module_{}/file{}.rs", n % 37, n))
			.collect();
		let single = rank(&dataset, "m3f1", 1, &CancelToken::never()).unwrap();
		assert!(!single.is_empty());

		for workers in [2, 7, 64, 300] {
			let parallel = rank(&dataset, "m3f1", workers, &CancelToken::never()).unwrap();
			assert_eq!(parallel.len(), single.len(), "workers = {workers}");
			for (a, b) in single.iter().zip(&parallel) {
				assert_eq!(a.index, b.index);
				assert_eq!(a.score.to_bits(), b.score.to_bits());
			}
		}
	}

	#[test]
	fn shortest_numbers_rank_first() {
		let dataset = numbers(1..=100_000);
		for workers in [1, 200] {
			let ranked = rank(&dataset, "34", workers, &CancelToken::never()).unwrap();
			assert_eq!(texts(&dataset, &ranked[..3]), ["34", "340", "341"], "workers = {workers}");
		}
	}

	#[test]
	fn counts_every_subsequence_match() {
		let dataset: Vec<String> = (0..100_000).map(|n| n.to_string()).collect();
		let ranked = rank(&dataset, "12", 4, &CancelToken::never()).unwrap();
		assert_eq!(ranked.len(), 8_146);
	}

	#[test]
	fn stale_token_abandons_the_pass() {
		let latest = AtomicU64::new(2);
		let dataset = numbers(1..=10);
		assert_eq!(rank(&dataset, "1", 1, &CancelToken::new(1, &latest)), None);
		assert_eq!(rank(&dataset, "1", 4, &CancelToken::new(1, &latest)), None);
		assert!(rank(&dataset, "1", 4, &CancelToken::new(2, &latest)).is_some());
	}

	#[test]
	fn merge_interleaves_sorted_runs() {
		let run = |entries: &[(usize, Score)]| -> Vec<Match> {
			entries
				.iter()
				.map(|&(index, score)| Match { index, score })
				.collect()
		};
		let merged = merge(vec![
			run(&[(0, 0.9), (1, 0.2)]),
			run(&[(2, 0.9), (3, 0.5)]),
			run(&[]),
			run(&[(4, 0.7)]),
		]);
		let indices: Vec<_> = merged.iter().map(|m| m.index).collect();
		assert_eq!(indices, [0, 2, 4, 3, 1]);
	}
}
