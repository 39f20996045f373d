//! Background dispatcher thread that runs ranking passes off the UI thread.

use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use super::dataset::{Candidates, Dataset};
use super::ranker::{CancelToken, rank};
use super::results::RankedResults;
use crate::{DataStream, StreamEnvelope};

/// Finished result set delivered back to the coordinator.
pub type SearchResult = StreamEnvelope<RankedResults>;

/// Commands understood by the dispatcher thread.
#[derive(Debug)]
pub(crate) enum SearchCommand {
	/// Rank the candidates against `query`.
	Query {
		/// Generation assigned by the coordinator.
		id: u64,
		query: String,
	},
	/// Stop the dispatcher thread.
	Shutdown,
}

/// Channels and thread handle of a running dispatcher.
pub(crate) struct Dispatcher {
	pub(crate) tx: Sender<SearchCommand>,
	pub(crate) rx: Receiver<SearchResult>,
	pub(crate) handle: JoinHandle<()>,
}

/// Launch the dispatcher thread.
pub(crate) fn spawn(
	candidates: Candidates,
	workers: usize,
	latest_query_id: Arc<AtomicU64>,
) -> io::Result<Dispatcher> {
	let (command_tx, command_rx) = mpsc::channel();
	let (result_tx, result_rx) = mpsc::channel();

	let handle = thread::Builder::new()
		.name("frzy-search".into())
		.spawn(move || worker_loop(&candidates, workers, &command_rx, &result_tx, &latest_query_id))?;

	Ok(Dispatcher {
		tx: command_tx,
		rx: result_rx,
		handle,
	})
}

fn worker_loop(
	candidates: &Candidates,
	workers: usize,
	command_rx: &Receiver<SearchCommand>,
	result_tx: &Sender<SearchResult>,
	latest_query_id: &AtomicU64,
) {
	while let Ok(command) = command_rx.recv() {
		let Some((id, query)) = newest_query(command, command_rx) else {
			break;
		};
		if !run_query(candidates, workers, id, query, result_tx, latest_query_id) {
			break;
		}
	}
	log::debug!("search dispatcher stopped");
}

/// Skip queued queries that were superseded while the previous pass ran.
fn newest_query(mut command: SearchCommand, command_rx: &Receiver<SearchCommand>) -> Option<(u64, String)> {
	loop {
		match command_rx.try_recv() {
			Ok(next) => {
				if let SearchCommand::Query { id, .. } = &command {
					log::debug!("dropping queued search generation {id}");
				}
				command = next;
			}
			Err(TryRecvError::Empty) => break,
			Err(TryRecvError::Disconnected) => return None,
		}
		if matches!(command, SearchCommand::Shutdown) {
			return None;
		}
	}

	match command {
		SearchCommand::Query { id, query } => Some((id, query)),
		SearchCommand::Shutdown => None,
	}
}

/// Rank one query and publish it unless it went stale. Returns `false` once
/// the coordinator is gone.
pub(crate) fn run_query(
	candidates: &Candidates,
	workers: usize,
	id: u64,
	query: String,
	result_tx: &Sender<SearchResult>,
	latest_query_id: &AtomicU64,
) -> bool {
	let cancel = CancelToken::new(id, latest_query_id);
	let Some(matches) = rank(candidates, &query, workers, &cancel) else {
		log::debug!("search generation {id} superseded mid-pass");
		return true;
	};
	if cancel.is_stale() {
		log::debug!("discarding finished search generation {id}");
		return true;
	}

	let results = RankedResults {
		generation: id,
		query,
		matches,
		total: candidates.len(),
	};
	DataStream::new(result_tx, id).send(results)
}
