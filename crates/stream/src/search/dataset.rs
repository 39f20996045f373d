use std::sync::Arc;

/// Represents a collection that can be searched via fuzzy matching.
pub trait Dataset {
	/// Total number of entries in the dataset.
	fn len(&self) -> usize;

	/// Returns true if the dataset contains no entries.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Return the searchable key associated with `index`.
	fn key_for(&self, index: usize) -> &str;
}

impl<T> Dataset for &T
where
	T: Dataset + ?Sized,
{
	fn len(&self) -> usize {
		<T as Dataset>::len(*self)
	}

	fn key_for(&self, index: usize) -> &str {
		<T as Dataset>::key_for(*self, index)
	}
}

impl Dataset for [String] {
	fn len(&self) -> usize {
		<[String]>::len(self)
	}

	fn key_for(&self, index: usize) -> &str {
		&self[index]
	}
}

impl Dataset for Vec<String> {
	fn len(&self) -> usize {
		Vec::len(self)
	}

	fn key_for(&self, index: usize) -> &str {
		&self[index]
	}
}

/// Immutable candidate list shared between the UI and every search thread.
///
/// Cloning only bumps a reference count.
#[derive(Clone, Debug, Default)]
pub struct Candidates {
	lines: Arc<[String]>,
}

impl Candidates {
	/// Text of the candidate at `index`, if it exists.
	#[must_use]
	pub fn get(&self, index: usize) -> Option<&str> {
		self.lines.get(index).map(String::as_str)
	}

	/// Iterate over candidate texts in input order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.lines.iter().map(String::as_str)
	}
}

impl Dataset for Candidates {
	fn len(&self) -> usize {
		self.lines.len()
	}

	fn key_for(&self, index: usize) -> &str {
		&self.lines[index]
	}
}

impl From<Vec<String>> for Candidates {
	fn from(lines: Vec<String>) -> Self {
		Self {
			lines: lines.into(),
		}
	}
}

impl FromIterator<String> for Candidates {
	fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
		iter.into_iter().collect::<Vec<_>>().into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clones_share_storage() {
		let candidates: Candidates = ["alpha", "beta"].into_iter().map(String::from).collect();
		let clone = candidates.clone();

		assert!(Arc::ptr_eq(&candidates.lines, &clone.lines));
		assert_eq!(clone.len(), 2);
		assert_eq!(clone.key_for(1), "beta");
		assert_eq!(clone.get(2), None);
		assert_eq!(clone.iter().collect::<Vec<_>>(), ["alpha", "beta"]);
	}

	#[test]
	fn default_is_empty() {
		assert!(Candidates::default().is_empty());
	}
}
