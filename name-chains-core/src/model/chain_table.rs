use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::frequency::FrequencyVector;

/// Normalizes a raw input line into a name: lowercase, surrounding
/// whitespace stripped. Internal whitespace, digits and punctuation are kept.
pub fn normalize_name(raw: &str) -> String {
	raw.to_lowercase().trim().to_owned()
}

/// A character that followed a window but has no slot in a
/// `FrequencyVector`. The window key is still kept in the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedChar {
	/// The rejected character.
	pub character: char,
	/// The normalized name it was found in.
	pub name: String,
	/// The window it followed.
	pub key: String,
}

impl fmt::Display for SkippedChar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "non-alphabetical character '{}' found in {}, ignoring...", self.character, self.name)
	}
}

/// Variable-order character chain table.
///
/// Maps every window (substring) seen in the corpus to the counts of the
/// letters that followed it. Windows of every length from 1 to `len - 1`
/// are recorded, so the same table serves lookups of any context order.
///
/// # Responsibilities
/// - Accumulate next-character counts for every window of every name
/// - Report characters that cannot be counted without aborting
/// - Merge with a table built from another part of the corpus
///
/// # Invariants
/// - Every key is a non-empty substring of some normalized name
/// - Counts only grow; nothing is reset or overwritten
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ChainTable {
	chains: BTreeMap<String, FrequencyVector>,
}

impl ChainTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds one raw name to the table, logging skipped characters as warnings.
	///
	/// Returns the number of windows examined.
	pub fn add_name(&mut self, raw: &str) -> usize {
		self.add_name_with(raw, |skipped| log::warn!("{skipped}"))
	}

	/// Adds one raw name to the table, handing skipped characters to `on_skip`.
	///
	/// The name is normalized first. For each window length `g` in
	/// `1..len` and each start `s` with `s + g < len`, the window
	/// `name[s..s + g]` gets the character at `s + g` recorded against it.
	/// Positions are counted in characters, not bytes.
	///
	/// Returns the number of windows examined.
	pub fn add_name_with<F>(&mut self, raw: &str, mut on_skip: F) -> usize
	where
		F: FnMut(&SkippedChar),
	{
		let name = normalize_name(raw);
		let chars: Vec<char> = name.chars().collect();
		let len = chars.len();

		let mut windows = 0;
		for gram in 1..len {
			for start in 0..len - gram {
				let key: String = chars[start..start + gram].iter().collect();
				let next_char = chars[start + gram];

				// Key is kept even when the next char is rejected
				let vector = self.chains.entry(key).or_default();
				if let Err(character) = vector.record(next_char) {
					on_skip(&SkippedChar {
						character,
						name: name.clone(),
						key: chars[start..start + gram].iter().collect(),
					});
				}
				windows += 1;
			}
		}
		windows
	}

	/// Returns the counts recorded for `key`, if it was ever seen.
	pub fn get(&self, key: &str) -> Option<&FrequencyVector> {
		self.chains.get(key)
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.chains.len()
	}

	/// True when no window has been recorded yet.
	pub fn is_empty(&self) -> bool {
		self.chains.is_empty()
	}

	/// Keys in lexicographic order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.chains.keys().map(String::as_str)
	}

	/// Keys with their counts, in lexicographic key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &FrequencyVector)> {
		self.chains.iter().map(|(key, vector)| (key.as_str(), vector))
	}

	/// Merges another table into this one.
	///
	/// Vectors of matching keys are summed slot by slot, missing keys are
	/// cloned. Merging is commutative, so partial tables can arrive in any
	/// order.
	pub fn merge(&mut self, other: &Self) {
		for (key, vector) in &other.chains {
			if let Some(existing) = self.chains.get_mut(key) {
				existing.merge(vector);
			} else {
				self.chains.insert(key.clone(), *vector);
			}
		}
	}
}
