//! An in-memory [`ParserBackend`] double, shipped with the crate rather
//! than gated behind `#[cfg(test)]` so downstream integration tests (and
//! this crate's own `tests/` scenarios) can script backend behavior
//! without linking a real C-family parser.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::ParserBackend;
use crate::error::BackendError;
use crate::types::{CompletionData, Diagnostic, UnsavedFile};

/// The opaque per-file state a real backend would hand back from `open`.
/// Exposed so tests can assert on how many times a given path was reparsed.
#[derive(Debug)]
pub struct FakeHandle {
	pub path: String,
	pub parse_count: u32,
}

#[derive(Default)]
struct Counters {
	open_calls: AtomicUsize,
	reparse_calls: AtomicUsize,
	complete_calls: AtomicUsize,
	diagnostics_calls: AtomicUsize,
	close_calls: AtomicUsize,
	in_flight: AtomicUsize,
	max_observed_in_flight: AtomicUsize,
	reentered: AtomicBool,
}

/// A cheaply-cloneable handle onto a [`FakeParserBackend`]'s call counters,
/// retained by a test after the backend itself has been moved into an
/// `Engine`.
#[derive(Clone, Default)]
pub struct FakeBackendProbe {
	counters: Arc<Counters>,
}

impl FakeBackendProbe {
	pub fn open_calls(&self) -> usize {
		self.counters.open_calls.load(Ordering::SeqCst)
	}

	pub fn reparse_calls(&self) -> usize {
		self.counters.reparse_calls.load(Ordering::SeqCst)
	}

	pub fn complete_calls(&self) -> usize {
		self.counters.complete_calls.load(Ordering::SeqCst)
	}

	pub fn close_calls(&self) -> usize {
		self.counters.close_calls.load(Ordering::SeqCst)
	}

	/// The largest number of backend calls this fake ever observed
	/// overlapping. The engine's design guarantees this never exceeds 1.
	pub fn max_observed_concurrent_entries(&self) -> usize {
		self.counters.max_observed_in_flight.load(Ordering::SeqCst)
	}

	pub fn was_ever_reentered(&self) -> bool {
		self.counters.reentered.load(Ordering::SeqCst)
	}
}

/// A scriptable [`ParserBackend`] backed by plain maps instead of a real
/// parser. Every method increments a call counter, observable through a
/// [`FakeBackendProbe`] taken before the backend is handed to an `Engine`.
#[derive(Default)]
pub struct FakeParserBackend {
	completions: Mutex<FxHashMap<String, Vec<CompletionData>>>,
	diagnostics: Mutex<FxHashMap<String, Vec<Diagnostic>>>,
	fail_open_for: Mutex<FxHashMap<String, ()>>,
	parse_delay: Mutex<Option<Duration>>,
	counters: Arc<Counters>,
	history: Mutex<VecDeque<String>>,
}

impl FakeParserBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// A cloneable probe onto this backend's call counters. Take this
	/// before moving the backend into an `Engine`.
	pub fn probe(&self) -> FakeBackendProbe {
		FakeBackendProbe { counters: self.counters.clone() }
	}

	/// Scripts the candidates `complete` returns for `path`.
	pub fn set_completions(&self, path: &str, data: Vec<CompletionData>) {
		self.completions.lock().insert(path.to_string(), data);
	}

	/// Scripts the diagnostics `diagnostics` returns for `path`.
	pub fn set_diagnostics(&self, path: &str, data: Vec<Diagnostic>) {
		self.diagnostics.lock().insert(path.to_string(), data);
	}

	/// Makes the next `open` call for `path` fail with `ParseFailure`.
	pub fn fail_next_open(&self, path: &str) {
		self.fail_open_for.lock().insert(path.to_string(), ());
	}

	/// Makes every `open`/`reparse` call sleep for `delay`, widening the
	/// window in which a concurrent completion worker could observe the
	/// backend mutex held.
	pub fn simulate_parse_delay(&self, delay: Duration) {
		*self.parse_delay.lock() = Some(delay);
	}

	fn enter(&self, label: &str) -> EntryGuard<'_> {
		let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
		self.counters.max_observed_in_flight.fetch_max(now, Ordering::SeqCst);
		if now > 1 {
			self.counters.reentered.store(true, Ordering::SeqCst);
		}
		self.history.lock().push_back(label.to_string());
		if let Some(delay) = *self.parse_delay.lock() {
			std::thread::sleep(delay);
		}
		EntryGuard { backend: self }
	}
}

struct EntryGuard<'a> {
	backend: &'a FakeParserBackend,
}

impl Drop for EntryGuard<'_> {
	fn drop(&mut self) {
		self.backend.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
	}
}

impl ParserBackend for FakeParserBackend {
	type Handle = FakeHandle;

	fn create_index() -> Result<Self, BackendError> {
		Ok(Self::default())
	}

	fn open(&self, path: &str, _unsaved: &[UnsavedFile], _flags: &[String]) -> Result<Self::Handle, BackendError> {
		let _guard = self.enter("open");
		self.counters.open_calls.fetch_add(1, Ordering::SeqCst);
		if self.fail_open_for.lock().remove(path).is_some() {
			return Err(BackendError::ParseFailure { path: path.to_string() });
		}
		Ok(FakeHandle { path: path.to_string(), parse_count: 1 })
	}

	fn reparse(&self, handle: &mut Self::Handle, _unsaved: &[UnsavedFile]) -> Result<(), BackendError> {
		let _guard = self.enter("reparse");
		self.counters.reparse_calls.fetch_add(1, Ordering::SeqCst);
		handle.parse_count += 1;
		Ok(())
	}

	fn complete(&self, handle: &Self::Handle, _path: &str, _line: u32, _column: u32, _unsaved: &[UnsavedFile]) -> Vec<CompletionData> {
		let _guard = self.enter("complete");
		self.counters.complete_calls.fetch_add(1, Ordering::SeqCst);
		self.completions.lock().get(&handle.path).cloned().unwrap_or_default()
	}

	fn diagnostics(&self, handle: &Self::Handle) -> Vec<Diagnostic> {
		let _guard = self.enter("diagnostics");
		self.counters.diagnostics_calls.fetch_add(1, Ordering::SeqCst);
		self.diagnostics.lock().get(&handle.path).cloned().unwrap_or_default()
	}

	fn close(&self, handle: Self::Handle) {
		let _guard = self.enter("close");
		self.counters.close_calls.fetch_add(1, Ordering::SeqCst);
		drop(handle);
	}
}
