use super::state::{App, Selection, SessionOutcome, SessionState};
use crate::input::Key;

impl App {
	/// Process a key and return the outcome if it ended the session.
	pub fn handle_key(&mut self, key: Key) -> Option<SessionOutcome> {
		if self.state != SessionState::Editing {
			return None;
		}

		let edited = match key {
			Key::Char(ch) => self.editor.insert(ch),
			Key::Backspace | Key::Ctrl('h') => self.editor.backspace(),
			Key::Delete => self.editor.delete(),
			Key::Ctrl('w') => self.editor.delete_word(),
			Key::Ctrl('u') => self.editor.clear(),
			Key::Ctrl('a') | Key::Home => {
				self.editor.move_home();
				false
			}
			Key::Ctrl('e') | Key::End => {
				self.editor.move_end();
				false
			}
			Key::Ctrl('b') | Key::Left => {
				self.editor.move_left();
				false
			}
			Key::Ctrl('f') | Key::Right => {
				self.editor.move_right();
				false
			}
			Key::Ctrl('p' | 'k') | Key::Up => {
				self.results.move_up(self.search.results());
				false
			}
			Key::Ctrl('n' | 'j') | Key::Down => {
				self.results.move_down(self.search.results());
				false
			}
			Key::PageUp => {
				self.results.move_first(self.search.results());
				false
			}
			Key::PageDown => {
				self.results.move_last(self.search.results());
				false
			}
			Key::Tab => self.autocomplete(),
			Key::Enter => return self.confirm(),
			Key::Esc | Key::Ctrl('c' | 'd' | 'g') => {
				self.state = SessionState::Cancelled;
				return Some(SessionOutcome::cancelled(self.editor.text()));
			}
			Key::Ctrl(_) => false,
		};

		if edited {
			self.request_search();
		}
		None
	}

	/// End the session as cancelled, e.g. when the terminal closes.
	pub fn cancel(&mut self) -> SessionOutcome {
		self.state = SessionState::Cancelled;
		SessionOutcome::cancelled(self.editor.text())
	}

	/// Replace the query with the selected candidate.
	fn autocomplete(&mut self) -> bool {
		self.settle_search();
		match self.current_selection() {
			Some(selection) => self.editor.set_text(&selection.text),
			None => false,
		}
	}

	/// Accept the selected candidate.
	///
	/// With no results, a non-empty query is taken literally; an empty query
	/// leaves the session running.
	fn confirm(&mut self) -> Option<SessionOutcome> {
		self.settle_search();
		let query = self.editor.text();
		let selection = match self.current_selection() {
			Some(selection) => selection,
			None if !query.is_empty() => Selection {
				text: query.clone(),
				index: None,
				score: None,
			},
			None => return None,
		};

		self.state = SessionState::Confirmed;
		Some(SessionOutcome {
			accepted: true,
			query,
			selection: Some(selection),
		})
	}
}
