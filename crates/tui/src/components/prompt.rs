use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::input::QueryEditor;

/// Inputs for drawing the prompt line.
pub struct PromptContext<'a> {
	pub prompt: &'a str,
	pub editor: &'a QueryEditor,
	pub area: Rect,
}

/// Draw the prompt and query, and place the terminal cursor in the query.
///
/// A query wider than the area scrolls left so the cursor stays on screen.
pub fn render_prompt(frame: &mut Frame, ctx: PromptContext<'_>) {
	if ctx.area.is_empty() {
		return;
	}

	let column = ctx.prompt.width() + ctx.editor.cursor_column();
	let max_x = usize::from(ctx.area.width - 1);
	let offset = u16::try_from(column.saturating_sub(max_x)).unwrap_or(u16::MAX);

	let line = Line::from(vec![
		Span::raw(ctx.prompt.to_owned()),
		Span::raw(ctx.editor.text()),
	]);
	frame.render_widget(Paragraph::new(line).scroll((0, offset)), ctx.area);

	let x = u16::try_from(column.min(max_x)).unwrap_or(ctx.area.width - 1);
	frame.set_cursor_position(Position::new(ctx.area.x + x, ctx.area.y));
}

/// `[matched/total]` summary line.
#[must_use]
pub fn info_line(matched: usize, total: usize) -> Line<'static> {
	Line::from(format!("[{matched}/{total}]"))
}
