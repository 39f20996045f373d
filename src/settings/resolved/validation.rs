use crate::source::Delimiter;

use super::{SettingSource, SettingsError};

/// Accept counts of one or more.
pub(crate) fn at_least_one(
	key: &'static str,
	value: i64,
	origin: SettingSource,
) -> Result<usize, SettingsError> {
	match usize::try_from(value) {
		Ok(count) if count >= 1 => Ok(count),
		_ => Err(SettingsError::invalid(
			key,
			value.to_string(),
			origin,
			"must be at least 1",
		)),
	}
}

pub(crate) fn delimiter(value: &str, origin: SettingSource) -> Result<Delimiter, SettingsError> {
	value
		.parse()
		.map_err(|reason: String| SettingsError::invalid("input.delimiter", value, origin, reason))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_below_one_are_rejected() {
		let origin = SettingSource::CliFlag("--lines");
		assert_eq!(at_least_one("ui.lines", 3, origin).unwrap(), 3);

		let err = at_least_one("ui.lines", 0, origin).unwrap_err();
		assert_eq!(err.key, "ui.lines");
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("CLI flag"));

		assert!(at_least_one("search.workers", -2, origin).is_err());
	}

	#[test]
	fn delimiter_errors_name_the_origin() {
		let origin = SettingSource::Environment("FRZY_INPUT__DELIMITER");
		assert_eq!(delimiter("nul", origin).unwrap(), Delimiter::Nul);

		let err = delimiter("comma", origin).unwrap_err();
		assert_eq!(err.origin, origin);
		assert!(err.to_string().contains("environment variable"));
	}
}
