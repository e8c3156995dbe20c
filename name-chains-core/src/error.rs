use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read the list of names.
///
/// Each variant is one category of input-access failure; the `Display`
/// text is the message shown to the user.
#[derive(Debug, Error)]
pub enum ReadError {
	#[error("File not found")]
	NotFound,

	#[error("You do not have read permission")]
	PermissionDenied,

	#[error("Encoding error while reading file")]
	Encoding,

	#[error("Unexpected error occurred: {0}")]
	Other(#[source] io::Error),
}

impl From<io::Error> for ReadError {
	fn from(err: io::Error) -> Self {
		match err.kind() {
			io::ErrorKind::NotFound => ReadError::NotFound,
			io::ErrorKind::PermissionDenied => ReadError::PermissionDenied,
			io::ErrorKind::InvalidData => ReadError::Encoding,
			_ => ReadError::Other(err),
		}
	}
}

/// Errors of the read → build → write pipeline.
#[derive(Debug, Error)]
pub enum ChainsError {
	#[error(transparent)]
	Read(#[from] ReadError),

	#[error("Could not write {}: {source}", .path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("Invalid chains document: {0}")]
	Json(#[from] serde_json::Error),
}
