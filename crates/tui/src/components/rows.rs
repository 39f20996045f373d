use std::mem;

use frzy_match::Score;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "…";

/// Style of matched characters.
#[must_use]
pub fn highlight_style() -> Style {
	Style::default().fg(Color::Yellow)
}

/// Style of the selected row.
#[must_use]
pub fn selected_style() -> Style {
	Style::default().add_modifier(Modifier::REVERSED)
}

/// Fixed-width score column, e.g. `"( 0.87) "`.
///
/// Every candidate matches an empty query equally, so that case shows `inf`.
#[must_use]
pub fn score_label(query: &str, score: Score) -> String {
	if query.is_empty() {
		"(  inf) ".to_owned()
	} else {
		format!("({score:5.2}) ")
	}
}

/// One result row, fitted into `width` columns.
pub struct RowSpec<'a> {
	pub text: &'a str,
	/// Character indices to highlight, ascending.
	pub positions: &'a [usize],
	pub score_label: Option<String>,
	pub selected: bool,
}

/// Build the line for a result row.
#[must_use]
pub fn build_row(row: RowSpec<'_>, width: usize) -> Line<'static> {
	let mut spans = Vec::new();
	let mut remaining = width;

	if let Some(label) = row.score_label {
		let (label, used) = label.unicode_truncate(remaining);
		remaining -= used;
		spans.push(Span::raw(label.to_owned()));
	}

	let base = if row.selected {
		selected_style()
	} else {
		Style::default()
	};
	let (text, positions) = truncate_with_highlight(row.text, row.positions, remaining);
	spans.extend(highlight_spans(&text, positions, base));

	Line::from(spans)
}

/// Split `text` into spans, patching [`highlight_style`] onto `positions`.
fn highlight_spans(text: &str, positions: &[usize], base: Style) -> Vec<Span<'static>> {
	let mut next = positions.iter().copied().peekable();
	let mut buffer = String::new();
	let mut highlighted = false;
	let mut spans = Vec::new();
	let style_for = |highlighted: bool| {
		if highlighted {
			base.patch(highlight_style())
		} else {
			base
		}
	};

	for (idx, ch) in text.chars().enumerate() {
		let should_highlight = next.peek() == Some(&idx);
		if should_highlight {
			next.next();
		}
		if should_highlight != highlighted {
			if !buffer.is_empty() {
				spans.push(Span::styled(mem::take(&mut buffer), style_for(highlighted)));
			}
			highlighted = should_highlight;
		}
		buffer.push(ch);
	}

	if !buffer.is_empty() {
		spans.push(Span::styled(buffer, style_for(highlighted)));
	}
	spans
}

fn truncate_with_highlight<'a>(text: &str, positions: &'a [usize], max_width: usize) -> (String, &'a [usize]) {
	if text.width() <= max_width {
		return (text.to_owned(), positions);
	}
	if max_width <= ELLIPSIS.width() {
		return (ELLIPSIS.unicode_truncate(max_width).0.to_owned(), &[]);
	}

	let (slice, _) = text.unicode_truncate(max_width - ELLIPSIS.width());
	let limit = slice.chars().count();
	let kept = positions.partition_point(|&idx| idx < limit);
	(format!("{slice}{ELLIPSIS}"), &positions[..kept])
}

#[cfg(test)]
mod tests {
	use super::*;

	fn plain(line: &Line<'_>) -> String {
		line.spans.iter().map(|span| span.content.as_ref()).collect()
	}

	#[test]
	fn score_labels_have_fixed_width() {
		assert_eq!(score_label("", 1.0), "(  inf) ");
		assert_eq!(score_label("a", 0.8666), "( 0.87) ");
		assert_eq!(score_label("a", -0.05), "(-0.05) ");
	}

	#[test]
	fn highlights_matched_characters() {
		let line = build_row(
			RowSpec {
				text: "app/models/foo",
				positions: &[0, 4, 5],
				score_label: None,
				selected: false,
			},
			40,
		);
		let pieces: Vec<_> = line
			.spans
			.iter()
			.map(|span| (span.content.as_ref(), span.style == highlight_style()))
			.collect();
		assert_eq!(pieces, [
			("a", true),
			("pp/", false),
			("mo", true),
			("dels/foo", false)
		]);
	}

	#[test]
	fn selected_rows_are_reversed() {
		let line = build_row(
			RowSpec {
				text: "ab",
				positions: &[1],
				score_label: Some("( 0.50) ".into()),
				selected: true,
			},
			40,
		);
		assert_eq!(line.spans[0].style, Style::default());
		assert!(line.spans[1].style.add_modifier.contains(Modifier::REVERSED));
		assert_eq!(line.spans[2].style.fg, Some(Color::Yellow));
		assert!(line.spans[2].style.add_modifier.contains(Modifier::REVERSED));
	}

	#[test]
	fn long_rows_are_truncated_by_display_width() {
		let row = |text| RowSpec {
			text,
			positions: &[0, 5],
			score_label: None,
			selected: false,
		};
		assert_eq!(plain(&build_row(row("abcdefgh"), 5)), "abcd…");
		assert_eq!(plain(&build_row(row("日本語テキスト"), 6)), "日本…");
		assert_eq!(plain(&build_row(row("abc"), 1)), "…");
		assert_eq!(plain(&build_row(row("abc"), 0)), "");
	}

	#[test]
	fn score_prefix_counts_against_the_width() {
		let line = build_row(
			RowSpec {
				text: "abcdef",
				positions: &[],
				score_label: Some("( 0.50) ".into()),
				selected: false,
			},
			11,
		);
		assert_eq!(plain(&line), "( 0.50) ab…");
	}
}
