use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::candidate::{Candidate, CandidateHandle};

/// The candidate repository's contract: canonicalize raw strings into
/// interned, reference-counted handles. Implementations must be thread-safe
/// and idempotent (interning the same string twice returns the same handle).
///
/// The engine treats this as an external collaborator that a host may
/// substitute its own implementation of; [`InMemoryCandidateRepository`] is
/// the reference implementation shipped alongside it so the engine and the
/// ranking algorithm are independently testable.
pub trait CandidateRepository: Send + Sync {
	fn get_candidates_for_strings(&self, texts: &[String]) -> Vec<CandidateHandle>;
}

/// An append-only, thread-safe intern table.
#[derive(Default)]
pub struct InMemoryCandidateRepository {
	interned: RwLock<FxHashMap<Box<str>, CandidateHandle>>,
}

impl InMemoryCandidateRepository {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of distinct strings interned so far. Exposed for tests and
	/// metrics; not part of the `CandidateRepository` contract.
	pub fn len(&self) -> usize {
		self.interned.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl CandidateRepository for InMemoryCandidateRepository {
	fn get_candidates_for_strings(&self, texts: &[String]) -> Vec<CandidateHandle> {
		let mut out = Vec::with_capacity(texts.len());
		for text in texts {
			if let Some(handle) = self.interned.read().get(text.as_str()) {
				out.push(Arc::clone(handle));
				continue;
			}
			let mut guard = self.interned.write();
			let handle = guard.entry(text.as_str().into()).or_insert_with(|| {
				tracing::trace!(text, "candidate.interned");
				Arc::new(Candidate::new(text))
			});
			out.push(Arc::clone(handle));
		}
		out
	}
}
