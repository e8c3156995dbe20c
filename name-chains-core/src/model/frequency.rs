use serde::{Deserialize, Serialize};

/// Number of slots in a frequency vector, one per letter `a`..=`z`.
pub const ALPHABET_LEN: usize = 26;

/// Next-character counts observed after one chain key.
///
/// Slot `i` counts how many times the letter `'a' + i` followed the key
/// across the whole corpus. Serialized as a plain JSON array of 26 integers.
///
/// ## Invariants
/// - Always exactly `ALPHABET_LEN` slots
/// - Slots start at zero and are only ever incremented (or summed on merge)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FrequencyVector {
	counts: [u64; ALPHABET_LEN],
}

impl FrequencyVector {
	/// Creates an all-zero vector.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the slot index of `c`, or `None` if it is not an ASCII
	/// lowercase letter.
	pub fn slot(c: char) -> Option<usize> {
		if c.is_ascii_lowercase() {
			Some((c as u8 - b'a') as usize)
		} else {
			None
		}
	}

	/// Records one occurrence of `next_char` following the key.
	///
	/// # Errors
	/// Returns the rejected character if it has no slot.
	pub fn record(&mut self, next_char: char) -> Result<(), char> {
		let slot = Self::slot(next_char).ok_or(next_char)?;
		self.counts[slot] += 1;
		Ok(())
	}

	/// Count for `letter`, zero for characters without a slot.
	pub fn get(&self, letter: char) -> u64 {
		Self::slot(letter).map_or(0, |slot| self.counts[slot])
	}

	/// Total number of recorded transitions.
	pub fn total(&self) -> u64 {
		self.counts.iter().sum()
	}

	/// All 26 counts, slot 0 being `a`.
	pub fn counts(&self) -> &[u64; ALPHABET_LEN] {
		&self.counts
	}

	/// Adds the counts of `other` slot by slot.
	///
	/// Used to combine partial tables built on separate threads.
	pub fn merge(&mut self, other: &Self) {
		for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
			*mine += theirs;
		}
	}
}
