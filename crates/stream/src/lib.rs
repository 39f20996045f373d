//! Background ranking of candidates that keeps an interactive prompt responsive.
//!
//! The base types wrap an [`mpsc`] channel so the search dispatcher can hand
//! finished result sets back to the UI thread tagged with the generation of
//! the query that produced them.
//!
//! `frzy_stream::search` builds the actual pipeline on top: a chunked,
//! multi-threaded ranker and a [`SearchCoordinator`](search::SearchCoordinator)
//! that only ever publishes results for the newest query.
//!
//! ```
//! use std::time::Duration;
//!
//! use frzy_stream::search::{Candidates, SearchCoordinator};
//!
//! let candidates = Candidates::from(vec!["foo".to_owned(), "bar".to_owned()]);
//! let mut coordinator = SearchCoordinator::new(candidates, 2);
//! coordinator.submit("fo");
//! coordinator.wait_for_latest(Duration::from_secs(5));
//!
//! let results = coordinator.results();
//! assert_eq!(results.query, "fo");
//! assert_eq!(results.len(), 1);
//! ```
//!
//! [`mpsc`]: std::sync::mpsc

use std::sync::mpsc::Sender;

/// Message emitted by a background thread and delivered to the UI layer.
#[derive(Debug)]
pub struct StreamEnvelope<P> {
	/// Generation of the request this message answers.
	pub id: u64,
	/// Payload delivered to the consumer.
	pub payload: P,
}

/// Handle for producing stream messages backed by an [`mpsc::Sender`].
///
/// [`mpsc::Sender`]: std::sync::mpsc::Sender
pub struct DataStream<'a, P> {
	tx: &'a Sender<StreamEnvelope<P>>,
	id: u64,
}

impl<'a, P: Send + 'static> DataStream<'a, P> {
	/// Create a new handle backed by the provided sender.
	#[must_use]
	pub fn new(tx: &'a Sender<StreamEnvelope<P>>, id: u64) -> Self {
		Self { tx, id }
	}

	/// Emit a payload to the consumer. Returns `false` once the receiver is gone.
	pub fn send(&self, payload: P) -> bool {
		self.tx.send(StreamEnvelope { id: self.id, payload }).is_ok()
	}
}

/// Candidate storage, parallel ranking and the generation-gated coordinator.
pub mod search;

#[cfg(test)]
mod tests {
	use std::sync::mpsc;

	use super::*;

	#[test]
	fn envelope_carries_stream_identity() {
		let (tx, rx) = mpsc::channel::<StreamEnvelope<usize>>();
		assert!(DataStream::new(&tx, 7).send(3));

		let envelope = rx.recv().unwrap();
		assert_eq!(envelope.id, 7);
		assert_eq!(envelope.payload, 3);
	}

	#[test]
	fn send_reports_hang_up() {
		let (tx, rx) = mpsc::channel::<StreamEnvelope<()>>();
		drop(rx);
		assert!(!DataStream::new(&tx, 1).send(()));
	}
}
