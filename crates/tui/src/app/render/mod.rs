use frzy_match::Scorer;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::App;
use crate::components::{PromptContext, RowSpec, build_row, info_line, render_prompt, score_label};

impl App {
	/// Draw the prompt, the optional info line and the visible result rows.
	pub fn draw(&self, frame: &mut Frame) {
		let info_height = u16::from(self.config.show_info);
		let [prompt_area, info_area, rows_area] = Layout::vertical([
			Constraint::Length(1),
			Constraint::Length(info_height),
			Constraint::Fill(1),
		])
		.areas(frame.area());

		render_prompt(frame, PromptContext {
			prompt: &self.config.prompt,
			editor: &self.editor,
			area: prompt_area,
		});

		if self.config.show_info {
			let results = self.search.results();
			frame.render_widget(
				Paragraph::new(info_line(results.len(), results.total)),
				info_area,
			);
		}

		self.render_rows(frame, rows_area);
	}

	fn render_rows(&self, frame: &mut Frame, area: Rect) {
		let results = self.search.results();
		let candidates = self.search.candidates();
		// Highlight against the query these results were ranked for.
		let mut scorer = Scorer::new(&results.query);
		let width = usize::from(area.width);
		let visible = self.rows.min(usize::from(area.height));

		let lines: Vec<Line<'static>> = results
			.iter()
			.take(visible)
			.enumerate()
			.filter_map(|(row, found)| {
				let text = candidates.get(found.index)?;
				let positions = scorer
					.positions(text)
					.map(|found| found.indices)
					.unwrap_or_default();
				let entry = RowSpec {
					text,
					positions: &positions,
					score_label: self
						.config
						.show_scores
						.then(|| score_label(&results.query, found.score)),
					selected: self.results.selected() == Some(row),
				};
				Some(build_row(entry, width))
			})
			.collect();

		frame.render_widget(Paragraph::new(lines), area);
	}
}
