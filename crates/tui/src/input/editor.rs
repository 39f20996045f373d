use unicode_width::UnicodeWidthChar;

/// Single-line query buffer with a cursor.
///
/// The cursor counts characters; [`cursor_column`](Self::cursor_column)
/// converts it to display columns so wide glyphs place the terminal cursor
/// correctly. Every mutating method returns whether the text changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryEditor {
	chars: Vec<char>,
	cursor: usize,
}

impl QueryEditor {
	/// Create an editor holding `text` with the cursor at the end.
	#[must_use]
	pub fn new(text: &str) -> Self {
		let chars: Vec<char> = text.chars().collect();
		let cursor = chars.len();
		Self { chars, cursor }
	}

	/// Current query text.
	#[must_use]
	pub fn text(&self) -> String {
		self.chars.iter().collect()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.chars.is_empty()
	}

	/// Cursor position in characters.
	#[must_use]
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Display width of the text before the cursor.
	#[must_use]
	pub fn cursor_column(&self) -> usize {
		self.chars[..self.cursor].iter().map(|&ch| char_width(ch)).sum()
	}

	/// Replace the whole buffer and move the cursor to the end.
	pub fn set_text(&mut self, text: &str) -> bool {
		let replacement = Self::new(text);
		let changed = replacement.chars != self.chars;
		*self = replacement;
		changed
	}

	pub fn insert(&mut self, ch: char) -> bool {
		self.chars.insert(self.cursor, ch);
		self.cursor += 1;
		true
	}

	/// Erase the character before the cursor.
	pub fn backspace(&mut self) -> bool {
		if self.cursor == 0 {
			return false;
		}
		self.cursor -= 1;
		self.chars.remove(self.cursor);
		true
	}

	/// Erase the character under the cursor.
	pub fn delete(&mut self) -> bool {
		if self.cursor == self.chars.len() {
			return false;
		}
		self.chars.remove(self.cursor);
		true
	}

	/// Erase the word before the cursor along with the whitespace around it,
	/// so `"foo bar baz"` becomes `"foo bar"`.
	pub fn delete_word(&mut self) -> bool {
		let end = self.cursor;
		let mut start = end;
		while start > 0 && self.chars[start - 1].is_whitespace() {
			start -= 1;
		}
		while start > 0 && !self.chars[start - 1].is_whitespace() {
			start -= 1;
		}
		while start > 0 && self.chars[start - 1].is_whitespace() {
			start -= 1;
		}
		if start == end {
			return false;
		}
		self.chars.drain(start..end);
		self.cursor = start;
		true
	}

	pub fn clear(&mut self) -> bool {
		let changed = !self.chars.is_empty();
		self.chars.clear();
		self.cursor = 0;
		changed
	}

	pub fn move_left(&mut self) {
		self.cursor = self.cursor.saturating_sub(1);
	}

	pub fn move_right(&mut self) {
		self.cursor = (self.cursor + 1).min(self.chars.len());
	}

	pub fn move_home(&mut self) {
		self.cursor = 0;
	}

	pub fn move_end(&mut self) {
		self.cursor = self.chars.len();
	}
}

/// Display width of `ch`; control characters take no space.
pub(crate) fn char_width(ch: char) -> usize {
	ch.width().unwrap_or(0)
}
