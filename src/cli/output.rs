use std::io::Write;

use anyhow::{Context, Result};
use frzy_tui::SessionOutcome;
use serde_json::json;

/// Print the confirmed selection on its own line. Cancelled sessions print
/// nothing.
pub(crate) fn print_plain(out: &mut impl Write, outcome: &SessionOutcome) -> Result<()> {
	if let Some(selection) = &outcome.selection {
		writeln!(out, "{}", selection.text).context("failed to write selection")?;
	}
	Ok(())
}

/// Format the confirmed selection as a JSON object.
pub(crate) fn format_outcome_json(outcome: &SessionOutcome) -> Option<serde_json::Value> {
	let selection = outcome.selection.as_ref()?;
	let payload = if selection.is_literal() {
		json!({
			"query": outcome.query,
			"selection": null,
			"index": null,
			"score": null,
			"literal": true,
			"text": selection.text,
		})
	} else {
		json!({
			"query": outcome.query,
			"selection": selection.text,
			"index": selection.index,
			"score": selection.score,
		})
	};
	Some(payload)
}

/// Print the JSON representation of the confirmed selection.
pub(crate) fn print_json(out: &mut impl Write, outcome: &SessionOutcome) -> Result<()> {
	if let Some(payload) = format_outcome_json(outcome) {
		writeln!(out, "{}", serde_json::to_string(&payload)?).context("failed to write selection")?;
	}
	Ok(())
}
