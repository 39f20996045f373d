//! Byte-level decoding of terminal input into logical keys.
//!
//! The decoder is fed one byte at a time from the raw tty. It assembles UTF-8
//! characters, recognises the CSI (`ESC [`) and SS3 (`ESC O`) encodings of the
//! navigation keys and strips bracketed-paste markers. Anything it cannot
//! make sense of is dropped without disturbing later input.

use std::time::Duration;

/// How long a lone ESC waits for the rest of an escape sequence.
pub const KEY_TIMEOUT: Duration = Duration::from_millis(25);

const MAX_SEQUENCE_LEN: usize = 16;

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
	/// Printable character.
	Char(char),
	/// Control chord, e.g. `Ctrl('w')` for 0x17.
	Ctrl(char),
	Enter,
	Tab,
	/// DEL (0x7f).
	Backspace,
	/// Forward delete (`ESC [3~`).
	Delete,
	Esc,
	Up,
	Down,
	Left,
	Right,
	Home,
	End,
	PageUp,
	PageDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
	Ground,
	Utf8 { bytes: [u8; 4], len: usize, need: usize },
	Escape,
	Csi(Vec<u8>),
	/// Overlong CSI sequence, swallowed up to its final byte.
	CsiDiscard,
	Ss3,
}

/// Incremental decoder from raw tty bytes to [`Key`]s.
#[derive(Debug, Clone)]
pub struct KeyDecoder {
	state: State,
	in_paste: bool,
}

impl Default for KeyDecoder {
	fn default() -> Self {
		Self::new()
	}
}

impl KeyDecoder {
	#[must_use]
	pub fn new() -> Self {
		Self {
			state: State::Ground,
			in_paste: false,
		}
	}

	/// Whether a partial sequence is buffered. Call [`flush`](Self::flush)
	/// once [`KEY_TIMEOUT`] passes without more input.
	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.state != State::Ground
	}

	/// Whether the decoder is inside a bracketed paste.
	#[must_use]
	pub fn in_paste(&self) -> bool {
		self.in_paste
	}

	/// Resolve a buffered partial sequence after the key timeout.
	///
	/// A lone ESC becomes [`Key::Esc`]; any other partial sequence is dropped.
	pub fn flush(&mut self) -> Option<Key> {
		let state = std::mem::replace(&mut self.state, State::Ground);
		(state == State::Escape && !self.in_paste).then_some(Key::Esc)
	}

	/// Decode every byte of `bytes`, appending keys to `out`.
	pub fn feed_all(&mut self, bytes: &[u8], out: &mut Vec<Key>) {
		out.extend(bytes.iter().filter_map(|&byte| self.feed(byte)));
	}

	/// Decode one byte.
	pub fn feed(&mut self, byte: u8) -> Option<Key> {
		match std::mem::replace(&mut self.state, State::Ground) {
			State::Ground => self.ground(byte),
			State::Utf8 {
				mut bytes,
				len,
				need,
			} => {
				if !(0x80..=0xbf).contains(&byte) {
					// Truncated sequence: drop it and start over with this byte.
					return self.ground(byte);
				}
				bytes[len] = byte;
				if len + 1 < need {
					self.state = State::Utf8 {
						bytes,
						len: len + 1,
						need,
					};
					return None;
				}
				let ch = std::str::from_utf8(&bytes[..need]).ok()?.chars().next()?;
				Some(Key::Char(ch))
			}
			State::Escape => match byte {
				b'[' => {
					self.state = State::Csi(Vec::new());
					None
				}
				b'O' => {
					self.state = State::Ss3;
					None
				}
				0x1b => {
					// The previous ESC stood alone.
					self.state = State::Escape;
					(!self.in_paste).then_some(Key::Esc)
				}
				_ => None,
			},
			State::Csi(mut params) => match byte {
				0x20..=0x3f if params.len() < MAX_SEQUENCE_LEN => {
					params.push(byte);
					self.state = State::Csi(params);
					None
				}
				0x20..=0x3f => {
					self.state = State::CsiDiscard;
					None
				}
				0x40..=0x7e => self.csi(&params, byte),
				_ => None,
			},
			State::CsiDiscard => match byte {
				0x20..=0x3f => {
					self.state = State::CsiDiscard;
					None
				}
				0x40..=0x7e => None,
				_ => self.ground(byte),
			},
			State::Ss3 => self.filter_paste(ss3(byte)),
		}
	}

	fn ground(&mut self, byte: u8) -> Option<Key> {
		match byte {
			0x1b => {
				self.state = State::Escape;
				None
			}
			0x20..=0x7e => Some(Key::Char(char::from(byte))),
			0x00..=0x1f | 0x7f => self.filter_paste(control(byte)),
			0xc2..=0xdf => self.start_utf8(byte, 2),
			0xe0..=0xef => self.start_utf8(byte, 3),
			0xf0..=0xf4 => self.start_utf8(byte, 4),
			_ => None,
		}
	}

	fn start_utf8(&mut self, lead: u8, need: usize) -> Option<Key> {
		let mut bytes = [0; 4];
		bytes[0] = lead;
		self.state = State::Utf8 {
			bytes,
			len: 1,
			need,
		};
		None
	}

	fn csi(&mut self, params: &[u8], last: u8) -> Option<Key> {
		let key = match (params, last) {
			([], b'A') => Key::Up,
			([], b'B') => Key::Down,
			([], b'C') => Key::Right,
			([], b'D') => Key::Left,
			([], b'H') => Key::Home,
			([], b'F') => Key::End,
			(b"1" | b"7", b'~') => Key::Home,
			(b"4" | b"8", b'~') => Key::End,
			(b"3", b'~') => Key::Delete,
			(b"5", b'~') => Key::PageUp,
			(b"6", b'~') => Key::PageDown,
			(b"200", b'~') => {
				self.in_paste = true;
				return None;
			}
			(b"201", b'~') => {
				self.in_paste = false;
				return None;
			}
			_ => return None,
		};
		self.filter_paste(Some(key))
	}

	/// Pasted text only ever inserts characters.
	fn filter_paste(&self, key: Option<Key>) -> Option<Key> {
		key.filter(|key| !self.in_paste || matches!(key, Key::Char(_)))
	}
}

fn control(byte: u8) -> Option<Key> {
	match byte {
		b'\r' => Some(Key::Enter),
		b'\t' => Some(Key::Tab),
		0x7f => Some(Key::Backspace),
		0x01..=0x1a => Some(Key::Ctrl(char::from(b'a' + byte - 1))),
		_ => None,
	}
}

fn ss3(byte: u8) -> Option<Key> {
	match byte {
		b'A' => Some(Key::Up),
		b'B' => Some(Key::Down),
		b'C' => Some(Key::Right),
		b'D' => Some(Key::Left),
		b'H' => Some(Key::Home),
		b'F' => Some(Key::End),
		_ => None,
	}
}
