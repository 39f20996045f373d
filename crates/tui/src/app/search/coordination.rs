use std::time::Duration;

use crate::app::state::App;

/// Upper bound on how long confirming waits for the current query to finish.
const CONFIRM_WAIT: Duration = Duration::from_secs(10);

impl App {
	/// Send a search request for the current query text.
	pub(crate) fn request_search(&mut self) {
		let query = self.editor.text();
		self.search.submit(query);
	}

	/// Apply finished results. Returns `true` when the visible state changed.
	pub(crate) fn pump_search_results(&mut self) -> bool {
		if !self.search.pump() {
			return false;
		}
		self.sync_selection();
		true
	}

	/// Block until the newest query has been ranked, so the selection matches
	/// what the user typed.
	pub(crate) fn settle_search(&mut self) {
		if self.search.is_in_flight() {
			if !self.search.wait_for_latest(CONFIRM_WAIT) {
				log::warn!("search did not settle before confirming, using shown results");
			}
			self.sync_selection();
		}
	}

	pub(crate) fn sync_selection(&mut self) {
		self.results
			.sync(self.search.results(), self.rows);
	}
}
