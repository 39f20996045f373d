//! Chunked parallel ranking and the coordinator that publishes its results.

mod coordinator;
mod dataset;
mod ranker;
mod results;
mod worker;

pub use coordinator::SearchCoordinator;
pub use dataset::{Candidates, Dataset};
pub use ranker::{CancelToken, MATCH_CHUNK_SIZE, Match, rank, should_abort};
pub use results::RankedResults;
pub use worker::SearchResult;
