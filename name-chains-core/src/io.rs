use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ChainsError, ReadError};
use crate::model::chain_table::ChainTable;

/// Suffix appended to the input stem to name the output document.
pub const OUTPUT_SUFFIX: &str = "_chains.json";

/// How the extension of the input filename is removed before the output
/// suffix is appended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtensionPolicy {
	/// Drop the last four characters if the fourth from the end is a `.`.
	///
	/// Only three-letter extensions are recognised, so `names.json` keeps
	/// its extension. Matches the names of existing `*_chains.json` files.
	#[default]
	FixedWidth,

	/// Drop whatever follows the last `.` of the file name component.
	Generic,
}

/// Reads a text file and returns its lines, each trimmed of surrounding
/// whitespace.
///
/// - Reads the entire file into memory
/// - Splits on `\n`, `\r\n` and a lone `\r`
/// - Empty lines are kept as empty names
///
/// # Errors
/// Categorized `ReadError` for missing files, permission problems,
/// invalid UTF-8 and anything else.
pub fn read_names<P: AsRef<Path>>(filename: P) -> Result<Vec<String>, ReadError> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents
		.replace("\r\n", "\n")
		.split_terminator(['\n', '\r'])
		.map(|line| line.trim().to_owned())
		.collect())
}

/// Builds the output path for an input file.
///
/// Examples (`FixedWidth`):
/// - `names.txt` → `names_chains.json`
/// - `data` → `data_chains.json`
/// - `names.json` → `names.json_chains.json`
///
/// Examples (`Generic`):
/// - `data/names.json` → `data/names_chains.json`
///
/// # Errors
/// `Generic` fails with `InvalidInput` when the path has no file name.
pub fn build_output_path<P: AsRef<Path>>(input_path: P, policy: ExtensionPolicy) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	match policy {
		ExtensionPolicy::FixedWidth => {
			let input = input_path.to_string_lossy();
			let chars: Vec<char> = input.chars().collect();
			let stem: String = if chars.len() >= 4 && chars[chars.len() - 4] == '.' {
				chars[..chars.len() - 4].iter().collect()
			} else {
				input.into_owned()
			};
			Ok(PathBuf::from(format!("{stem}{OUTPUT_SUFFIX}")))
		}
		ExtensionPolicy::Generic => {
			let file_stem = input_path
				.file_stem()
				.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

			let mut file_name = file_stem.to_os_string();
			file_name.push(OUTPUT_SUFFIX);

			let parent = input_path.parent().unwrap_or_else(|| Path::new(""));
			Ok(parent.join(file_name))
		}
	}
}

/// Serializes `table` as a JSON object to `path`, replacing any existing
/// file.
///
/// The document is written to a temporary file in the same directory and
/// renamed over `path` once complete, so a failed write leaves no partial
/// output and keeps any previous file intact.
///
/// # Errors
/// `ChainsError::Write` for any I/O failure, including one raised while
/// serializing.
pub fn write_chains<P: AsRef<Path>>(path: P, table: &ChainTable) -> Result<(), ChainsError> {
	let path = path.as_ref();
	let write_error = |source| ChainsError::Write { path: path.to_owned(), source };

	let parent = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
	write_json(temp.as_file_mut(), table, path)?;
	temp.persist(path).map_err(|err| write_error(err.error))?;
	Ok(())
}

/// Streams `table` as JSON into `writer`.
///
/// I/O errors surfacing through `serde_json` are reported as
/// `ChainsError::Write` against `path`.
fn write_json<W: Write>(writer: W, table: &ChainTable, path: &Path) -> Result<(), ChainsError> {
	let write_error = |source| ChainsError::Write { path: path.to_owned(), source };

	let mut writer = BufWriter::new(writer);
	if let Err(err) = serde_json::to_writer(&mut writer, table) {
		return Err(if err.is_io() { write_error(io::Error::from(err)) } else { ChainsError::Json(err) });
	}
	writer.flush().map_err(write_error)
}

/// Loads a table previously written by `write_chains`.
///
/// Vectors that do not hold exactly 26 counts are rejected.
pub fn read_chains<P: AsRef<Path>>(path: P) -> Result<ChainTable, ChainsError> {
	let file = File::open(path).map_err(ReadError::from)?;
	Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fixed(input: &str) -> PathBuf {
		build_output_path(input, ExtensionPolicy::FixedWidth).unwrap()
	}

	fn generic(input: &str) -> PathBuf {
		build_output_path(input, ExtensionPolicy::Generic).unwrap()
	}

	#[test]
	fn fixed_width_strips_three_letter_extensions() {
		assert_eq!(fixed("names.txt"), PathBuf::from("names_chains.json"));
		assert_eq!(fixed("data/female_2023.csv"), PathBuf::from("data/female_2023_chains.json"));
	}

	#[test]
	fn fixed_width_keeps_everything_else() {
		assert_eq!(fixed("data"), PathBuf::from("data_chains.json"));
		assert_eq!(fixed("names.json"), PathBuf::from("names.json_chains.json"));
		assert_eq!(fixed("ab"), PathBuf::from("ab_chains.json"));
		assert_eq!(fixed("a.b"), PathBuf::from("a.b_chains.json"));
	}

	#[test]
	fn fixed_width_counts_characters() {
		assert_eq!(fixed("prénoms.txt"), PathBuf::from("prénoms_chains.json"));
	}

	#[test]
	fn generic_strips_any_extension() {
		assert_eq!(generic("names.txt"), PathBuf::from("names_chains.json"));
		assert_eq!(generic("names.json"), PathBuf::from("names_chains.json"));
		assert_eq!(generic("data"), PathBuf::from("data_chains.json"));
		assert_eq!(generic("in/names.tar.gz"), PathBuf::from("in/names.tar_chains.json"));
	}

	#[test]
	fn read_names_splits_on_every_line_ending() {
		let dir = tempfile::tempdir().unwrap();
		let input = dir.path().join("names.txt");

		std::fs::write(&input, "Ann\rAna\r").unwrap();
		assert_eq!(read_names(&input).unwrap(), vec!["Ann", "Ana"]);

		std::fs::write(&input, "Ann\r\nAna\rBob\n\nEve").unwrap();
		assert_eq!(read_names(&input).unwrap(), vec!["Ann", "Ana", "Bob", "", "Eve"]);
	}

	#[cfg(target_os = "linux")]
	#[test]
	fn full_disk_is_a_write_error() {
		let names: Vec<String> = (0..2000).map(|i| format!("name{i}abcdefgh")).collect();
		let table = crate::model::corpus::build_chains(&names);
		assert!(serde_json::to_vec(&table).unwrap().len() > 8 * 1024);

		let full = File::options().write(true).open("/dev/full").unwrap();
		let err = write_json(full, &table, Path::new("/dev/full")).unwrap_err();
		assert!(matches!(err, ChainsError::Write { .. }), "{err}");
		assert!(err.to_string().starts_with("Could not write /dev/full"));
	}

	#[test]
	fn failed_write_leaves_nothing_behind() {
		let dir = tempfile::tempdir().unwrap();
		// Renaming a file over a non-empty directory fails
		let target = dir.path().join("names_chains.json");
		std::fs::create_dir(&target).unwrap();
		std::fs::write(target.join("keep"), "").unwrap();

		let table = crate::model::corpus::build_chains(&["Ann"]);
		let err = write_chains(&target, &table).unwrap_err();
		assert!(matches!(err, ChainsError::Write { .. }));

		let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
		assert_eq!(entries.len(), 1);
		assert!(target.join("keep").exists());
	}

	#[test]
	fn write_replaces_previous_document() {
		let dir = tempfile::tempdir().unwrap();
		let target = dir.path().join("names_chains.json");
		std::fs::write(&target, "stale").unwrap();

		let table = crate::model::corpus::build_chains(&["Ann", "Ana"]);
		write_chains(&target, &table).unwrap();
		assert_eq!(read_chains(&target).unwrap(), table);
		assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
	}

	#[test]
	fn generic_needs_a_file_name() {
		let err = build_output_path("..", ExtensionPolicy::Generic).unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
	}
}
