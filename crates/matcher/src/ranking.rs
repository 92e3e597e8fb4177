use crate::bitset::LetterBitset;
use crate::repository::CandidateRepository;

/// Ranks `texts` against `query` and returns the indices of the matching
/// entries, in best-match-first order.
///
/// This is the pure, repository-agnostic half of the ranking algorithm:
/// given a snapshot of candidate strings and a query, it
/// interns every string, prunes with the letter-bitset, scores the
/// survivors, and sorts them. The caller (the engine) owns projecting these
/// indices back onto its richer `CompletionData` snapshot.
pub fn rank_indices<R: CandidateRepository + ?Sized>(repo: &R, texts: &[String], query: &str) -> Vec<usize> {
	let query_bits = LetterBitset::from_str(query);
	let handles = repo.get_candidates_for_strings(texts);

	let mut scored: Vec<(usize, crate::result::MatchResult)> = Vec::new();
	for (index, handle) in handles.iter().enumerate() {
		if !handle.matches_query_bits(query_bits) {
			continue;
		}
		let result = handle.query_match_result(query);
		if result.is_subsequence {
			scored.push((index, result));
		}
	}

	scored.sort_by(|(a_idx, a_result), (b_idx, b_result)| a_result.cmp(b_result).then_with(|| texts[*a_idx].cmp(&texts[*b_idx])));
	scored.into_iter().map(|(index, _)| index).collect()
}
