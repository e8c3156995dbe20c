use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use name_chains_core::io::{build_output_path, read_names, write_chains, ExtensionPolicy};
use name_chains_core::{build_chains_with, BuildOptions};

/// Build character-level Markov chains from a list of names.
///
/// Writes `<input-stem>_chains.json` next to the input file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
	/// Text file with one name per line
	filename: PathBuf,
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(Env::default().default_filter_or("info"))
		.format_timestamp(None)
		.init();

	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(err) => match err.kind() {
			ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
			_ => {
				error!("Filename argument expected");
				// Usage text is best effort, the exit status carries the failure
				let _ = err.print();
				return ExitCode::FAILURE;
			}
		},
	};

	match run(&cli.filename) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{err}");
			ExitCode::FAILURE
		}
	}
}

/// Reads the names, builds the whole table in memory, then writes it.
///
/// An empty name list ends the run without writing anything.
fn run(filename: &Path) -> Result<(), Box<dyn Error>> {
	let names = read_names(filename)?;
	if names.is_empty() {
		info!("No names in {}, nothing to write", filename.display());
		return Ok(());
	}

	info!("Generating markov chains...");
	let table = build_chains_with(&names, &BuildOptions::parallel());
	info!("{} chains from {} names", table.len(), names.len());

	info!("Writing to json file...");
	let output = build_output_path(filename, ExtensionPolicy::FixedWidth)?;
	write_chains(&output, &table)?;
	info!("File written: {}", output.display());

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use name_chains_core::io::read_chains;
	use tempfile::tempdir;

	#[test]
	fn exactly_one_filename_is_required() {
		assert!(Cli::try_parse_from(["name-chains"]).is_err());
		assert!(Cli::try_parse_from(["name-chains", "a.txt", "b.txt"]).is_err());

		let cli = Cli::try_parse_from(["name-chains", "names.txt"]).unwrap();
		assert_eq!(cli.filename, PathBuf::from("names.txt"));
	}

	#[test]
	fn run_writes_chains_next_to_input() {
		let dir = tempdir().unwrap();
		let input = dir.path().join("names.txt");
		std::fs::write(&input, "Ann\nAna\n").unwrap();

		run(&input).unwrap();

		let table = read_chains(dir.path().join("names_chains.json")).unwrap();
		assert_eq!(table.get("a").unwrap().get('n'), 2);
		assert_eq!(table.len(), 3);
	}

	#[test]
	fn missing_input_writes_nothing() {
		let dir = tempdir().unwrap();
		let input = dir.path().join("absent.txt");

		let err = run(&input).unwrap_err();
		assert_eq!(err.to_string(), "File not found");
		assert!(!dir.path().join("absent_chains.json").exists());
	}

	#[test]
	fn empty_input_writes_nothing() {
		let dir = tempdir().unwrap();
		let input = dir.path().join("empty.txt");
		std::fs::write(&input, "").unwrap();

		run(&input).unwrap();
		assert!(!dir.path().join("empty_chains.json").exists());
	}
}
