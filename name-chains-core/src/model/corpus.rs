use std::sync::mpsc;
use std::thread;

use super::chain_table::ChainTable;

/// Number of chunks handed to each worker thread.
const CHUNKS_PER_WORKER: usize = 8;

/// Options controlling how a corpus is folded into a `ChainTable`.
///
/// The result never depends on these settings, only the speed does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
	/// Worker threads. `1` builds on the calling thread, `0` uses one
	/// worker per logical CPU.
	pub threads: usize,

	/// Corpora smaller than this are always built on the calling thread.
	pub parallel_threshold: usize,
}

impl Default for BuildOptions {
	fn default() -> Self {
		Self { threads: 1, parallel_threshold: 10_000 }
	}
}

impl BuildOptions {
	/// Options using every logical CPU for large corpora.
	pub fn parallel() -> Self {
		Self { threads: 0, ..Self::default() }
	}

	fn worker_count(&self) -> usize {
		if self.threads == 0 { num_cpus::get() } else { self.threads }
	}
}

/// Builds one table from all `names`, sequentially.
pub fn build_chains<S: AsRef<str>>(names: &[S]) -> ChainTable {
	let mut table = ChainTable::new();
	for name in names {
		table.add_name(name.as_ref());
	}
	table
}

/// Builds one table from all `names` according to `options`.
///
/// # Behavior
/// - Small corpora, or `threads == 1`, go through `build_chains`.
/// - Otherwise the names are split into `workers * 8` chunks, each chunk
///   is built into a private table on its own thread, and the partial
///   tables are merged as they come back over a channel.
///
/// Diagnostics from different workers may interleave; the table does not
/// depend on the order.
pub fn build_chains_with<S>(names: &[S], options: &BuildOptions) -> ChainTable
where
	S: AsRef<str> + Sync,
{
	let workers = options.worker_count();
	if workers <= 1 || names.len() < options.parallel_threshold.max(2) {
		return build_chains(names);
	}

	let chunks = workers * CHUNKS_PER_WORKER;
	let chunk_size = names.len().div_ceil(chunks);
	log::debug!("building {} names in chunks of {} on {} workers", names.len(), chunk_size, workers);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for chunk in names.chunks(chunk_size) {
			let tx = tx.clone();
			scope.spawn(move || {
				let partial = build_chains(chunk);
				// rx lives until the scope ends, so this cannot fail
				let _ = tx.send(partial);
			});
		}
		drop(tx);

		let mut table = ChainTable::new();
		for partial in rx.iter() {
			table.merge(&partial);
		}
		table
	})
}
