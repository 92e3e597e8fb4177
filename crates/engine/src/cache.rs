//! The translation-unit cache: the sole path into the parser backend.
//!
//! Every backend call in the crate goes through here, and every instance
//! is owned by a single `Mutex`, so the backend's single-entrancy
//! requirement is structural rather than a convention callers must
//! remember.

use rustc_hash::FxHashMap;

use crate::backend::ParserBackend;
use crate::types::{CompletionData, Diagnostic, Severity, UnsavedFile};

pub(crate) struct TranslationUnitCache<B: ParserBackend> {
	backend: B,
	handles: FxHashMap<String, B::Handle>,
}

impl<B: ParserBackend> TranslationUnitCache<B> {
	pub(crate) fn new(backend: B) -> Self {
		Self { backend, handles: FxHashMap::default() }
	}

	/// Ensures `path` has a live handle, parsing from scratch on a cache
	/// miss and reparsing on a hit. A cold open is immediately followed by
	/// one reparse: the first parse of a translation unit only builds the
	/// preamble, and completion results from that first parse are
	/// unreliable until it has been reparsed once.
	pub(crate) fn update(&mut self, path: &str, unsaved: &[UnsavedFile], flags: &[String]) {
		if let Some(handle) = self.handles.get_mut(path) {
			if let Err(err) = self.backend.reparse(handle, unsaved) {
				tracing::warn!(path, error = %err, "tu.reparse_failed");
			}
			return;
		}

		match self.backend.open(path, unsaved, flags) {
			Ok(mut handle) => {
				if let Err(err) = self.backend.reparse(&mut handle, unsaved) {
					tracing::warn!(path, error = %err, "tu.cold_open_reparse_failed");
				}
				self.handles.insert(path.to_string(), handle);
				tracing::debug!(path, "tu.cache_miss");
			}
			Err(err) => {
				tracing::warn!(path, error = %err, "tu.open_failed");
			}
		}
	}

	/// Runs completion against whatever handle is currently cached for
	/// `path`, without reparsing first. Empty if `path` has no handle yet.
	pub(crate) fn complete(&self, path: &str, line: u32, column: u32, unsaved: &[UnsavedFile]) -> Vec<CompletionData> {
		match self.handles.get(path) {
			Some(handle) => self.backend.complete(handle, path, line, column, unsaved),
			None => Vec::new(),
		}
	}

	/// Diagnostics for the last successful parse of `path`, with `Ignored`
	/// entries filtered out. Empty if `path` has no handle yet.
	pub(crate) fn diagnostics(&self, path: &str) -> Vec<Diagnostic> {
		match self.handles.get(path) {
			Some(handle) => self.backend.diagnostics(handle).into_iter().filter(|d| d.severity != Severity::Ignored).collect(),
			None => Vec::new(),
		}
	}

	pub(crate) fn has_handle(&self, path: &str) -> bool {
		self.handles.contains_key(path)
	}

	/// Closes every open handle. The backend's own index resource is
	/// released when the cache (and the backend it owns) is dropped.
	pub(crate) fn dispose(&mut self) {
		for (path, handle) in self.handles.drain() {
			tracing::debug!(path, "tu.disposed");
			self.backend.close(handle);
		}
	}
}
