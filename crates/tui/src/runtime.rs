//! Terminal ownership and the session event loop.
//!
//! The session draws into a fixed region of the controlling terminal below
//! the cursor instead of switching to the alternate screen. Everything is
//! read from and written to the controlling terminal (`/dev/tty` unless
//! configured otherwise), so stdin and stdout stay free for the
//! candidate list and the selection.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::ops::Range;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use frzy_stream::search::Candidates;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::{execute, terminal};
use ratatui::layout::{Position, Rect};
use ratatui::{Terminal, TerminalOptions, Viewport};

use crate::App;
use crate::app::SessionOutcome;
use crate::config::SessionConfig;
use crate::input::{KEY_TIMEOUT, Key, KeyDecoder, reader};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const CURSOR_REPORT_TIMEOUT: Duration = Duration::from_millis(500);

/// Construct an [`App`] for `candidates` and run it on the controlling
/// terminal until the user confirms or cancels.
pub fn run(candidates: Candidates, config: SessionConfig) -> Result<SessionOutcome> {
	let mut app = App::new(candidates, config);
	app.run()
}

impl App {
	/// Take over the controlling terminal and pump the event loop until the
	/// session ends. The terminal is restored on every exit path.
	pub fn run(&mut self) -> Result<SessionOutcome> {
		let path = &self.config.tty;
		let tty = OpenOptions::new()
			.read(true)
			.write(true)
			.open(path)
			.with_context(|| format!("failed to open {}", path.display()))?;
		let input = tty.try_clone().context("failed to duplicate tty handle")?;

		let raw = RawMode::enable()?;
		let keys = reader::spawn(input)?;
		let (mut guard, typed_ahead) = TerminalGuard::enter(tty, raw, &keys, self.config.height())?;
		log::debug!("drawing session in {:?}", guard.area);
		self.resize(guard.area.height);

		let mut decoder = KeyDecoder::new();
		let mut pending = Vec::new();
		decoder.feed_all(&typed_ahead, &mut pending);
		self.event_loop(&mut guard, &keys, decoder, pending)
	}

	fn event_loop(
		&mut self,
		guard: &mut TerminalGuard,
		keys: &Receiver<Vec<u8>>,
		mut decoder: KeyDecoder,
		mut pending: Vec<Key>,
	) -> Result<SessionOutcome> {
		let mut escape_since: Option<Instant> = None;

		loop {
			for key in pending.drain(..) {
				if let Some(outcome) = self.handle_key(key) {
					return Ok(outcome);
				}
			}

			self.pump_search_results();
			guard.fit_to_terminal()?;
			self.resize(guard.area.height);
			guard.terminal.draw(|frame| self.draw(frame))?;

			let timeout = escape_since.map_or(FRAME_INTERVAL, |since| {
				KEY_TIMEOUT.saturating_sub(since.elapsed())
			});
			match keys.recv_timeout(timeout) {
				Ok(bytes) => {
					decoder.feed_all(&bytes, &mut pending);
					while let Ok(bytes) = keys.try_recv() {
						decoder.feed_all(&bytes, &mut pending);
					}
				}
				Err(RecvTimeoutError::Timeout) => {}
				Err(RecvTimeoutError::Disconnected) => {
					log::warn!("terminal input closed, cancelling");
					return Ok(self.cancel());
				}
			}

			if !decoder.is_pending() || decoder.in_paste() {
				escape_since = None;
			} else if let Some(since) = escape_since {
				if since.elapsed() >= KEY_TIMEOUT {
					pending.extend(decoder.flush());
					escape_since = None;
				}
			} else {
				escape_since = Some(Instant::now());
			}
		}
	}
}

/// Raw mode for the lifetime of the value.
struct RawMode;

impl RawMode {
	fn enable() -> Result<Self> {
		terminal::enable_raw_mode().context("failed to enable raw mode")?;
		Ok(Self)
	}
}

impl Drop for RawMode {
	fn drop(&mut self) {
		if let Err(err) = terminal::disable_raw_mode() {
			log::warn!("failed to disable raw mode: {err}");
		}
	}
}

/// Owns the drawn region and erases it on drop.
struct TerminalGuard {
	terminal: Terminal<CrosstermBackend<File>>,
	area: Rect,
	// Dropped after `terminal` so the region is cleared before cooked mode.
	_raw: RawMode,
}

impl TerminalGuard {
	/// Reserve `height` rows starting at the cursor line, scrolling the
	/// screen up when they would not fit. Returns the guard and any bytes the
	/// user typed while the cursor position was being queried.
	fn enter(
		mut tty: File,
		raw: RawMode,
		keys: &Receiver<Vec<u8>>,
		height: u16,
	) -> Result<(Self, Vec<u8>)> {
		let (cols, rows) = terminal::size().context("failed to read terminal size")?;
		let height = height.min(rows).max(1);

		let (cursor, typed_ahead) = query_cursor(&mut tty, keys)?;
		let top = match cursor {
			Some(Position { x: 0, y }) => y,
			Some(Position { y, .. }) => y.saturating_add(1),
			None => {
				log::warn!("terminal did not report the cursor position, drawing at the bottom");
				rows
			}
		};

		let overflow = top.saturating_add(height).saturating_sub(rows);
		if overflow > 0 {
			// Newlines at the bottom row scroll the screen up.
			tty.write_all(&b"\n".repeat(usize::from(overflow)))
				.context("failed to make room for the session")?;
		}
		let top = top.min(rows.saturating_sub(height));
		let area = Rect::new(0, top, cols, height);

		execute!(tty, EnableBracketedPaste).context("failed to enable bracketed paste")?;
		let terminal = Terminal::with_options(CrosstermBackend::new(tty), TerminalOptions {
			viewport: Viewport::Fixed(area),
		})
		.context("failed to set up terminal")?;

		Ok((
			Self {
				terminal,
				area,
				_raw: raw,
			},
			typed_ahead,
		))
	}

	/// Follow terminal resizes. Width follows the terminal; the region keeps
	/// its top row unless it no longer fits.
	fn fit_to_terminal(&mut self) -> Result<()> {
		let (cols, rows) = terminal::size().context("failed to read terminal size")?;
		let height = self.area.height.min(rows).max(1);
		let top = self.area.y.min(rows.saturating_sub(height));
		let area = Rect::new(0, top, cols, height);
		if area != self.area {
			log::debug!("terminal resized, region now {area:?}");
			self.terminal.resize(area)?;
			self.area = area;
		}
		Ok(())
	}
}

impl Drop for TerminalGuard {
	fn drop(&mut self) {
		if let Err(err) = self.terminal.clear() {
			log::warn!("failed to clear session region: {err}");
		}
		let origin = self.area.as_position();
		let backend = self.terminal.backend_mut();
		if let Err(err) = execute!(backend, DisableBracketedPaste) {
			log::warn!("failed to disable bracketed paste: {err}");
		}
		if let Err(err) = self
			.terminal
			.set_cursor_position(origin)
			.and_then(|()| self.terminal.show_cursor())
		{
			log::warn!("failed to restore cursor: {err}");
		}
	}
}

/// Ask the terminal where the cursor is (`ESC [6n`) and wait for the reply on
/// the reader channel. Bytes around the reply are user input and returned.
fn query_cursor(tty: &mut File, keys: &Receiver<Vec<u8>>) -> Result<(Option<Position>, Vec<u8>)> {
	tty.write_all(b"\x1b[6n")
		.and_then(|()| tty.flush())
		.context("failed to query cursor position")?;

	let deadline = Instant::now() + CURSOR_REPORT_TIMEOUT;
	let mut buf = Vec::new();
	loop {
		if let Some((range, position)) = parse_cursor_report(&buf) {
			buf.drain(range);
			return Ok((Some(position), buf));
		}
		let remaining = deadline.saturating_duration_since(Instant::now());
		match keys.recv_timeout(remaining) {
			Ok(bytes) => buf.extend_from_slice(&bytes),
			Err(_) => return Ok((None, buf)),
		}
	}
}

/// Find a `ESC [ row ; col R` report in `buf`. Returns its byte range and the
/// zero-based position.
fn parse_cursor_report(buf: &[u8]) -> Option<(Range<usize>, Position)> {
	let mut from = 0;
	while let Some(offset) = buf[from..].windows(2).position(|w| w == b"\x1b[") {
		let start = from + offset;
		let body = &buf[start + 2..];
		if let Some(end) = body.iter().position(|b| !(b.is_ascii_digit() || *b == b';')) {
			if body[end] == b'R' {
				let text = std::str::from_utf8(&body[..end]).ok()?;
				if let Some((row, col)) = text.split_once(';') {
					if let (Ok(row), Ok(col)) = (row.parse::<u16>(), col.parse::<u16>()) {
						let position = Position::new(col.saturating_sub(1), row.saturating_sub(1));
						return Some((start..start + 2 + end + 1, position));
					}
				}
			}
		}
		from = start + 1;
	}
	None
}
