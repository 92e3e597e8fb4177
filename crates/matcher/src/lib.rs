//! Letter-bitset prefiltering and subsequence ranking for the completion
//! engine's candidate repository.
//!
//! This crate implements the fuzzy-match candidate repository contract:
//! interning raw strings into [`CandidateHandle`]s, computing a
//! 26-bit [`LetterBitset`] per candidate as a cheap prefilter, and scoring
//! subsequence matches with a deterministic, total-order [`MatchResult`]
//! comparator. It has no knowledge of the engine's threading machinery or of
//! `CompletionData`; [`rank_indices`] operates purely on strings so its
//! invariants (soundness of the prefilter, idempotency of ranking) can be
//! tested in isolation.

mod bitset;
mod candidate;
mod ranking;
mod repository;
mod result;

pub use bitset::LetterBitset;
pub use candidate::{Candidate, CandidateHandle};
pub use ranking::rank_indices;
pub use repository::{CandidateRepository, InMemoryCandidateRepository};
pub use result::{MatchResult, query_match_result};
