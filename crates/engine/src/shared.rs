//! State shared between the facade and its background workers. Every
//! field here is reached through an `Arc<Shared<B>>` clone handed to each
//! worker thread at spawn time.

use std::sync::Mutex;

use ccengine_matcher::CandidateRepository;
use ccengine_worker::{Gate, Slot};
use parking_lot::RwLock;

use crate::backend::ParserBackend;
use crate::cache::TranslationUnitCache;
use crate::config::EngineConfig;
use crate::tasks::{CompleteTask, ParseTask, SortTask};
use crate::types::{CompletionData, UnsavedFile};

pub(crate) struct Shared<B: ParserBackend> {
	/// Guards every call into the parser backend and the translation-unit
	/// cache together: the backend's single-entrancy requirement and the
	/// cache's internal consistency are the same invariant.
	pub(crate) cache: Mutex<TranslationUnitCache<B>>,
	pub(crate) parse_slot: Slot<ParseTask>,
	pub(crate) complete_slot: Slot<CompleteTask>,
	pub(crate) sort_slot: Slot<SortTask>,
	pub(crate) ready_gate: Gate,
	pub(crate) snapshot: RwLock<Vec<CompletionData>>,
	pub(crate) repository: std::sync::Arc<dyn CandidateRepository>,
	pub(crate) config: EngineConfig,
}

impl<B: ParserBackend> Shared<B> {
	/// True if a parse is queued or currently executing. The completion
	/// worker consults this to yield to parsing rather than racing it.
	pub(crate) fn parse_in_flight(&self) -> bool {
		if self.parse_slot.has_pending() {
			return true;
		}
		match self.cache.try_lock() {
			Ok(_guard) => false,
			Err(_) => true,
		}
	}

	/// Parses (or reparses) `path` under the cache mutex. Shared by the
	/// synchronous facade method and the parse worker.
	pub(crate) fn apply_parse(&self, path: &str, unsaved: &[UnsavedFile], flags: &[String]) {
		self.cache.lock().unwrap().update(path, unsaved, flags);
	}
}
