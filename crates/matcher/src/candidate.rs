use std::sync::Arc;

use crate::bitset::LetterBitset;
use crate::result::{MatchResult, query_match_result};

/// An interned candidate insertion-text string plus its precomputed
/// letter-bitset. Immutable once created; cheap to clone via `Arc`.
#[derive(Debug)]
pub struct Candidate {
	text: Box<str>,
	bits: LetterBitset,
}

/// A reference-counted handle to an interned [`Candidate`]. Repeated interning
/// of the same text yields handles pointing at the same allocation.
pub type CandidateHandle = Arc<Candidate>;

impl Candidate {
	pub(crate) fn new(text: &str) -> Self {
		Self {
			text: text.into(),
			bits: LetterBitset::from_str(text),
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn bits(&self) -> LetterBitset {
		self.bits
	}

	/// Sound, cheap necessary condition: if this returns `false`, the full
	/// subsequence check is guaranteed to also reject the candidate.
	pub fn matches_query_bits(&self, query_bits: LetterBitset) -> bool {
		self.bits.contains_all(query_bits)
	}

	pub fn query_match_result(&self, query: &str) -> MatchResult {
		query_match_result(&self.text, query)
	}
}
