//! Core state container for the interactive session.
//!
//! [`App`] owns the query editor, the search coordinator and the selection
//! cursor. It is driven one key at a time by the runtime loop and can be
//! exercised without a terminal in tests.

use frzy_match::Score;
use frzy_stream::search::{Candidates, SearchCoordinator};

use super::results::ResultsState;
use crate::config::SessionConfig;
use crate::input::QueryEditor;

/// Lifecycle of a session. `Confirmed` and `Cancelled` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
	Editing,
	Confirmed,
	Cancelled,
}

/// What the user picked when confirming.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
	/// Chosen text.
	pub text: String,
	/// Input position of the chosen candidate. `None` when nothing matched
	/// and the query itself was taken literally.
	pub index: Option<usize>,
	/// Score of the chosen candidate under the final query.
	pub score: Option<Score>,
}

impl Selection {
	/// Whether the query was taken as the selection because nothing matched.
	#[must_use]
	pub fn is_literal(&self) -> bool {
		self.index.is_none()
	}
}

/// Result of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
	/// Whether the user confirmed rather than cancelled.
	pub accepted: bool,
	/// Query text at the time the session ended.
	pub query: String,
	/// Present exactly when `accepted` is true.
	pub selection: Option<Selection>,
}

impl SessionOutcome {
	pub(crate) fn cancelled(query: String) -> Self {
		Self {
			accepted: false,
			query,
			selection: None,
		}
	}
}

/// Aggregate state of the interactive session.
pub struct App {
	pub(crate) config: SessionConfig,
	pub(crate) editor: QueryEditor,
	pub(crate) search: SearchCoordinator,
	pub(crate) results: ResultsState,
	pub(crate) state: SessionState,
	/// Result rows the drawn region has room for. Never above `config.lines`.
	pub(crate) rows: usize,
}

impl App {
	/// Build a session over `candidates` and start searching the initial query.
	#[must_use]
	pub fn new(candidates: Candidates, config: SessionConfig) -> Self {
		let search = SearchCoordinator::new(candidates, config.workers);
		let editor = QueryEditor::new(&config.initial_query);
		let rows = config.lines;
		let mut app = Self {
			config,
			rows,
			editor,
			search,
			results: ResultsState::default(),
			state: SessionState::Editing,
		};
		app.request_search();
		app
	}

	/// Fit the result window to a drawn region `height` rows tall, so the
	/// selection cursor never lands on a row that is not drawn.
	pub fn resize(&mut self, height: u16) {
		let chrome = 1 + usize::from(self.config.show_info);
		let rows = usize::from(height)
			.saturating_sub(chrome)
			.min(self.config.lines);
		if rows != self.rows {
			self.rows = rows;
			self.sync_selection();
		}
	}

	/// Current lifecycle state.
	#[must_use]
	pub fn state(&self) -> SessionState {
		self.state
	}

	/// Current query text.
	#[must_use]
	pub fn query(&self) -> String {
		self.editor.text()
	}

	/// Visible row under the selection cursor.
	#[must_use]
	pub fn selected_row(&self) -> Option<usize> {
		self.results.selected()
	}

	/// Texts of the currently published results, best first.
	#[must_use]
	pub fn result_texts(&self) -> Vec<&str> {
		let candidates = self.search.candidates();
		self.search
			.results()
			.iter()
			.filter_map(|m| candidates.get(m.index))
			.collect()
	}

	/// Selection the cursor currently points at, if any.
	pub(crate) fn current_selection(&self) -> Option<Selection> {
		let row = self.results.selected()?;
		let found = self.search.results().get(row)?;
		let text = self.search.candidates().get(found.index)?;
		Some(Selection {
			text: text.to_owned(),
			index: Some(found.index),
			score: Some(found.score),
		})
	}
}
