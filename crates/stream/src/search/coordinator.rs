//! Generation-gated coordination between the UI thread and the search dispatcher.
//!
//! The [`SearchCoordinator`] owns the candidate list and the latest published
//! result set. Every [`submit`](SearchCoordinator::submit) bumps the query
//! generation; results are only published when they belong to the newest
//! generation, so a slow pass for an old query can never overwrite a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use super::dataset::{Candidates, Dataset};
use super::ranker::{CancelToken, rank};
use super::results::RankedResults;
use super::worker::{self, Dispatcher, SearchCommand, SearchResult};

enum Backend {
	Threaded(Dispatcher),
	/// Used when the dispatcher thread could not be started. Queries run on
	/// the caller's thread the next time results are pumped.
	Inline { pending: Option<(u64, String)> },
}

/// Owns the candidates and publishes ranked results for the newest query.
pub struct SearchCoordinator {
	candidates: Candidates,
	workers: usize,
	latest_query_id: Arc<AtomicU64>,
	next_query_id: u64,
	results: RankedResults,
	in_flight: bool,
	backend: Option<Backend>,
}

impl SearchCoordinator {
	/// Start a coordinator that ranks with `workers` threads per pass.
	///
	/// No query runs until [`submit`](Self::submit) is called; until then
	/// [`results`](Self::results) is empty.
	#[must_use]
	pub fn new(candidates: Candidates, workers: usize) -> Self {
		let workers = workers.max(1);
		let latest_query_id = Arc::new(AtomicU64::new(0));
		let backend = if candidates.is_empty() {
			// Nothing to rank, so no thread to run it on.
			Backend::Inline { pending: None }
		} else {
			match worker::spawn(candidates.clone(), workers, Arc::clone(&latest_query_id)) {
				Ok(dispatcher) => Backend::Threaded(dispatcher),
				Err(err) => {
					log::warn!("failed to spawn search dispatcher, searching inline: {err}");
					Backend::Inline { pending: None }
				}
			}
		};
		let total = candidates.len();

		Self {
			candidates,
			workers,
			latest_query_id,
			next_query_id: 0,
			results: RankedResults {
				total,
				..RankedResults::default()
			},
			in_flight: false,
			backend: Some(backend),
		}
	}

	/// Candidate list being searched.
	#[must_use]
	pub fn candidates(&self) -> &Candidates {
		&self.candidates
	}

	/// Most recently published result set.
	#[must_use]
	pub fn results(&self) -> &RankedResults {
		&self.results
	}

	/// Generation of the most recent submission.
	#[must_use]
	pub fn latest_generation(&self) -> u64 {
		self.next_query_id
	}

	/// Whether a submitted query has not been published yet.
	#[must_use]
	pub fn is_in_flight(&self) -> bool {
		self.in_flight
	}

	/// Queue a ranking pass for `query` and return its generation.
	///
	/// Never blocks on earlier passes; those are abandoned and their output
	/// discarded.
	pub fn submit(&mut self, query: impl Into<String>) -> u64 {
		let query = query.into();
		self.next_query_id = self.next_query_id.saturating_add(1);
		let id = self.next_query_id;
		self.in_flight = true;
		self.latest_query_id.store(id, AtomicOrdering::Release);
		log::debug!("submitting search generation {id} for {query:?}");

		match &mut self.backend {
			Some(Backend::Threaded(dispatcher)) => {
				if dispatcher.tx.send(SearchCommand::Query { id, query: query.clone() }).is_err() {
					log::warn!("search dispatcher hung up, searching inline");
					self.backend = Some(Backend::Inline {
						pending: Some((id, query)),
					});
				}
			}
			Some(Backend::Inline { pending }) => *pending = Some((id, query)),
			None => {}
		}
		id
	}

	/// Apply any finished results. Returns `true` when a new result set was
	/// published.
	pub fn pump(&mut self) -> bool {
		let mut received = Vec::new();
		match &mut self.backend {
			Some(Backend::Threaded(dispatcher)) => loop {
				match dispatcher.rx.try_recv() {
					Ok(result) => received.push(result),
					Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
				}
			},
			Some(Backend::Inline { pending }) => {
				if let Some((id, query)) = pending.take() {
					return self.run_inline(id, query);
				}
			}
			None => {}
		}

		let mut published = false;
		for result in received {
			published |= self.accept(result);
		}
		published
	}

	/// Block until the newest submission is published or `timeout` elapses.
	/// Returns `true` if nothing is left in flight.
	pub fn wait_for_latest(&mut self, timeout: Duration) -> bool {
		let deadline = Instant::now() + timeout;
		self.pump();
		while self.in_flight {
			let Some(Backend::Threaded(dispatcher)) = &self.backend else {
				self.pump();
				return !self.in_flight;
			};
			let remaining = deadline.saturating_duration_since(Instant::now());
			match dispatcher.rx.recv_timeout(remaining) {
				Ok(result) => {
					self.accept(result);
				}
				Err(RecvTimeoutError::Timeout) => return false,
				Err(RecvTimeoutError::Disconnected) => {
					log::warn!("search dispatcher stopped before publishing");
					return false;
				}
			}
		}
		true
	}

	/// Rank `query` on the calling thread and publish the result.
	pub fn search(&mut self, query: impl Into<String>) -> &RankedResults {
		let query = query.into();
		self.next_query_id = self.next_query_id.saturating_add(1);
		let id = self.next_query_id;
		self.latest_query_id.store(id, AtomicOrdering::Release);
		self.run_inline(id, query);
		&self.results
	}

	fn run_inline(&mut self, id: u64, query: String) -> bool {
		let cancel = CancelToken::new(id, &self.latest_query_id);
		let Some(matches) = rank(&self.candidates, &query, self.workers, &cancel) else {
			return false;
		};
		self.publish(RankedResults {
			generation: id,
			query,
			matches,
			total: self.candidates.len(),
		})
	}

	fn accept(&mut self, result: SearchResult) -> bool {
		if result.id != self.latest_query_id.load(AtomicOrdering::Acquire) {
			log::debug!("ignoring stale search generation {}", result.id);
			return false;
		}
		self.publish(result.payload)
	}

	fn publish(&mut self, results: RankedResults) -> bool {
		if results.generation != self.next_query_id {
			return false;
		}
		log::debug!(
			"publishing search generation {} with {}/{} matches",
			results.generation,
			results.len(),
			results.total
		);
		self.results = results;
		self.in_flight = false;
		true
	}
}

impl Drop for SearchCoordinator {
	fn drop(&mut self) {
		if let Some(Backend::Threaded(dispatcher)) = self.backend.take() {
			// Abandon any running pass before waiting for the thread.
			self.latest_query_id.store(u64::MAX, AtomicOrdering::Release);
			let _ = dispatcher.tx.send(SearchCommand::Shutdown);
			if dispatcher.handle.join().is_err() {
				log::warn!("search dispatcher panicked");
			}
		}
	}
}
