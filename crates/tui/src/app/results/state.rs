//! Selection cursor over the visible window of ranked results.

use frzy_stream::search::RankedResults;

/// Tracks which visible row is selected and whether the user moved it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResultsState {
	/// Selected row, counted from the top of the window. `None` when there
	/// are no results.
	selected: Option<usize>,
	/// Candidate index under the cursor, used to follow it across result sets.
	selected_index: Option<usize>,
	/// Number of rows currently shown.
	visible: usize,
	/// Set once the user moves the cursor; cleared when the cursor snaps back
	/// to the top.
	navigated: bool,
}

impl ResultsState {
	pub(crate) fn selected(&self) -> Option<usize> {
		self.selected
	}

	pub(crate) fn visible(&self) -> usize {
		self.visible
	}

	/// Re-anchor the cursor after a new result set was published.
	///
	/// An explicitly chosen candidate keeps the cursor while it stays inside
	/// the window; otherwise the cursor returns to the best match.
	pub(crate) fn sync(&mut self, results: &RankedResults, lines: usize) {
		self.visible = results.len().min(lines);
		if self.visible == 0 {
			self.selected = None;
			self.selected_index = None;
			return;
		}

		let kept = self
			.selected_index
			.filter(|_| self.navigated)
			.and_then(|index| results.rank_of(index))
			.filter(|&row| row < self.visible);
		match kept {
			Some(row) => self.selected = Some(row),
			None => {
				self.selected = Some(0);
				self.navigated = false;
			}
		}
		self.selected_index = self
			.selected
			.and_then(|row| results.get(row))
			.map(|m| m.index);
	}

	pub(crate) fn move_up(&mut self, results: &RankedResults) {
		if let Some(row) = self.selected.filter(|&row| row > 0) {
			self.select(results, row - 1);
		}
	}

	pub(crate) fn move_down(&mut self, results: &RankedResults) {
		if let Some(row) = self.selected.filter(|&row| row + 1 < self.visible) {
			self.select(results, row + 1);
		}
	}

	pub(crate) fn move_first(&mut self, results: &RankedResults) {
		if self.selected.is_some() {
			self.select(results, 0);
		}
	}

	pub(crate) fn move_last(&mut self, results: &RankedResults) {
		if self.selected.is_some() {
			self.select(results, self.visible - 1);
		}
	}

	fn select(&mut self, results: &RankedResults, row: usize) {
		self.selected = Some(row);
		self.selected_index = results.get(row).map(|m| m.index);
		self.navigated = true;
	}
}
