//! The engine facade: the crate's single public entry point, tying the
//! translation-unit cache, the three background workers, and the ranking
//! snapshot together.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use ccengine_matcher::{CandidateRepository, InMemoryCandidateRepository};
use ccengine_worker::{Gate, Slot};
use parking_lot::RwLock;

use crate::backend::ParserBackend;
use crate::cache::TranslationUnitCache;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::future::CompletionFuture;
use crate::shared::Shared;
use crate::tasks::{CompleteTask, ParseTask, SortTask};
use crate::types::{CompletionData, Diagnostic, UnsavedFile};
use crate::workers;

struct WorkerHandles {
	parse: JoinHandle<()>,
	complete: JoinHandle<()>,
	sort: Vec<JoinHandle<()>>,
}

/// The concurrent code-completion engine.
///
/// `B` is the parser backend implementation; production callers use a real
/// one, tests use [`crate::backend::fake::FakeParserBackend`]. Cloning is
/// cheap ([`Engine::clone`] shares the same workers and state) so a host
/// can hand a clone to each editor-side callback without coordinating
/// lifetimes itself.
pub struct Engine<B: ParserBackend + 'static> {
	shared: Arc<Shared<B>>,
	threads: Arc<Mutex<Option<WorkerHandles>>>,
	threading_enabled: Arc<AtomicBool>,
}

impl<B: ParserBackend + 'static> Clone for Engine<B> {
	fn clone(&self) -> Self {
		Self { shared: self.shared.clone(), threads: self.threads.clone(), threading_enabled: self.threading_enabled.clone() }
	}
}

impl<B: ParserBackend + 'static> Engine<B> {
	/// Creates the engine, asking the backend to build its process-wide
	/// index. The only construction-time failure the engine surfaces.
	pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
		let backend = B::create_index().map_err(EngineError::IndexCreation)?;
		Ok(Self::with_backend(backend, config))
	}

	/// Builds the engine around an already-constructed backend, skipping
	/// `create_index`. Used by tests that need to pre-script a
	/// [`crate::backend::fake::FakeParserBackend`] before wiring it in.
	pub fn with_backend(backend: B, config: EngineConfig) -> Self {
		let repository: Arc<dyn CandidateRepository> = Arc::new(InMemoryCandidateRepository::new());
		let shared = Arc::new(Shared {
			cache: Mutex::new(TranslationUnitCache::new(backend)),
			parse_slot: Slot::new(),
			complete_slot: Slot::new(),
			sort_slot: Slot::new(),
			ready_gate: Gate::new(),
			snapshot: RwLock::new(Vec::new()),
			repository,
			config,
		});
		let threading_enabled = Arc::new(AtomicBool::new(false));
		let engine = Self { shared, threads: Arc::new(Mutex::new(None)), threading_enabled };
		if config.threading_enabled_initially {
			engine.enable_threading();
		}
		engine
	}

	/// Spawns the parse, completion, and sort-pool worker threads. A no-op
	/// if already enabled. Before this is called, every `_async` method
	/// degrades to a non-exceptional no-op or resolved-empty future.
	pub fn enable_threading(&self) {
		let mut guard = self.threads.lock().unwrap();
		if guard.is_some() {
			return;
		}
		let parse = {
			let shared = self.shared.clone();
			std::thread::spawn(move || workers::parse::run(shared))
		};
		let complete = {
			let shared = self.shared.clone();
			std::thread::spawn(move || workers::complete::run(shared))
		};
		let sort_pool_size = self.shared.config.sort_pool_size();
		let sort = (0..sort_pool_size)
			.map(|_| {
				let shared = self.shared.clone();
				std::thread::spawn(move || workers::sort_pool::run(shared))
			})
			.collect();
		*guard = Some(WorkerHandles { parse, complete, sort });
		self.threading_enabled.store(true, Ordering::SeqCst);
		tracing::info!(sort_pool_size, "engine.threading_enabled");
	}

	pub fn threading_enabled(&self) -> bool {
		self.threading_enabled.load(Ordering::SeqCst)
	}

	/// Synchronously parses (or reparses) `path` and blocks until it is
	/// applied. Bypasses the parse worker entirely; safe to call whether
	/// or not threading is enabled, and safe to interleave with it since
	/// both paths go through the same cache mutex.
	pub fn update_translation_unit(&self, path: &str, unsaved: &[UnsavedFile], flags: &[String]) {
		self.shared.apply_parse(path, unsaved, flags);
	}

	/// Submits a parse task to the background worker. Superseded by any
	/// later call for the same or a different path before the worker gets
	/// to it, per the mailbox's overwrite semantics. A silent no-op if
	/// threading has not been enabled.
	pub fn update_translation_unit_async(&self, path: &str, unsaved: &[UnsavedFile], flags: &[String]) {
		if !self.threading_enabled() {
			tracing::trace!(path, "parse.submit_skipped_threading_disabled");
			return;
		}
		self.shared.parse_slot.set(ParseTask { path: path.to_string(), unsaved: unsaved.to_vec(), flags: flags.to_vec() });
	}

	/// Synchronously runs completion at `line`/`column`, against whatever
	/// state `path`'s translation unit is currently in. Never reparses.
	pub fn candidates_for_location(&self, path: &str, line: u32, column: u32, unsaved: &[UnsavedFile]) -> Vec<CompletionData> {
		let cache = self.shared.cache.lock().unwrap();
		cache.complete(path, line, column, unsaved)
	}

	/// Submits a completion-then-rank (empty query, new cursor position) or
	/// rank-only (non-empty query, refinement) request and returns a
	/// future the caller can block on or poll. If threading is disabled,
	/// returns a future already resolved to an empty list rather than
	/// submitting anything.
	///
	/// Empty query: the sort gate is interrupted and closed, the new sort
	/// task is queued, and only then is the completion task queued.
	/// Submission order is load-bearing here: queuing the sort task
	/// first is what keeps a sort-pool thread from picking up the new
	/// query against a stale (pre-completion) snapshot in the common case
	/// where no worker is mid-iteration when the call is made; see the
	/// crate's end-to-end tests for the scenario this guards against. If
	/// the parser is currently busy (a parse is queued or executing),
	/// this degrades to a resolved-empty future instead of queuing a
	/// completion that would just get dropped by the completion worker's
	/// own yield-to-parse check; the caller is expected to retry.
	///
	/// Non-empty query: only the sort task is queued; ranking runs
	/// against whatever snapshot the most recent empty-query completion
	/// already published, with no fresh backend call.
	pub fn candidates_for_query_and_location_async(
		&self,
		path: &str,
		line: u32,
		column: u32,
		unsaved: &[UnsavedFile],
		query: &str,
	) -> CompletionFuture<Vec<CompletionData>> {
		if !self.threading_enabled() {
			return CompletionFuture::resolved(Vec::new());
		}
		if query.is_empty() {
			if self.shared.parse_in_flight() {
				tracing::trace!(path, "query.busy_skip_empty_query");
				return CompletionFuture::resolved(Vec::new());
			}
			let (future, resolver) = CompletionFuture::pending();
			self.shared.ready_gate.interrupt();
			self.shared.ready_gate.set_ready(false);
			self.shared.sort_slot.set(SortTask { query: query.to_string(), resolver });
			self.shared.complete_slot.set(CompleteTask { path: path.to_string(), line, column, unsaved: unsaved.to_vec() });
			future
		} else {
			let (future, resolver) = CompletionFuture::pending();
			self.shared.sort_slot.set(SortTask { query: query.to_string(), resolver });
			future
		}
	}

	/// Diagnostics for the last successful parse of `path`. A non-blocking
	/// probe: tries the parser mutex rather than waiting for it, and
	/// returns empty if it is currently held (e.g. by an in-flight parse)
	/// rather than stalling the caller behind one.
	pub fn diagnostics(&self, path: &str) -> Vec<Diagnostic> {
		match self.shared.cache.try_lock() {
			Ok(cache) => cache.diagnostics(path),
			Err(_) => Vec::new(),
		}
	}

	/// Non-blocking probe for whether the parser is currently busy with a
	/// parse (queued or executing). Tries the cache mutex rather than
	/// waiting for it, so callers (e.g. a status-bar indicator) never
	/// stall behind a slow parse.
	pub fn updating_translation_unit(&self) -> bool {
		self.shared.parse_in_flight() || self.shared.cache.try_lock().is_err()
	}

	/// Joins every worker thread and releases cached translation units.
	/// Idempotent: safe to call more than once, and safe to call from
	/// `Drop`.
	pub fn shutdown(&self) {
		let handles = self.threads.lock().unwrap().take();
		let Some(handles) = handles else {
			return;
		};
		self.shared.parse_slot.close();
		self.shared.complete_slot.close();
		self.shared.sort_slot.close();
		self.shared.ready_gate.interrupt();
		self.shared.ready_gate.set_ready(true);
		let _ = handles.parse.join();
		let _ = handles.complete.join();
		for handle in handles.sort {
			let _ = handle.join();
		}
		self.shared.cache.lock().unwrap().dispose();
		self.threading_enabled.store(false, Ordering::SeqCst);
		tracing::info!("engine.shutdown");
	}
}

impl<B: ParserBackend + 'static> Drop for Engine<B> {
	fn drop(&mut self) {
		// Only the last clone actually owns the workers; Arc::strong_count
		// on `threads` tells us whether this is it.
		if Arc::strong_count(&self.threads) == 1 {
			self.shutdown();
		}
	}
}
