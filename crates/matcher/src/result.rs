use std::cmp::Reverse;

/// Outcome of matching one candidate's text against one query.
///
/// Implements [`Ord`] so that a set of results for the *same query* can be
/// sorted directly; the comparator assumes `query_len` (and therefore the
/// denominator of "ratio of consecutive matches") is identical across the
/// whole set being compared, which always holds for one ranking pass, so the
/// ratio comparison reduces to comparing the consecutive-match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
	pub is_subsequence: bool,
	/// Count of matched query characters that immediately followed the
	/// previous matched character in the candidate text.
	pub consecutive_matches: u32,
	/// Byte offset of the first matched character, or 0 for an empty query.
	pub first_match_index: u32,
	pub candidate_len: u32,
}

impl MatchResult {
	fn sort_key(&self) -> (Reverse<u32>, u32, u32) {
		(Reverse(self.consecutive_matches), self.first_match_index, self.candidate_len)
	}
}

impl PartialOrd for MatchResult {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for MatchResult {
	/// Ascending order is "better match first": higher consecutive-match
	/// ratio, then earlier first match, then shorter candidate. Lexicographic
	/// tie-break on the insertion text is applied by the caller, since this
	/// type does not carry the text.
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.sort_key().cmp(&other.sort_key())
	}
}

/// Tests whether `query` (case-insensitive, ASCII) is a subsequence of
/// `candidate`, and if so, scores the match.
///
/// An empty query is trivially a subsequence of everything, with a
/// `first_match_index` of 0 and no consecutive-match credit (there is
/// nothing to be consecutive with).
pub fn query_match_result(candidate: &str, query: &str) -> MatchResult {
	if query.is_empty() {
		return MatchResult {
			is_subsequence: true,
			consecutive_matches: 0,
			first_match_index: 0,
			candidate_len: candidate.len() as u32,
		};
	}

	let haystack = candidate.as_bytes();
	let needle = query.as_bytes();

	let mut first_match_index: Option<u32> = None;
	let mut consecutive_matches: u32 = 0;
	let mut last_match_pos: Option<usize> = None;
	let mut needle_idx = 0usize;

	for (pos, &byte) in haystack.iter().enumerate() {
		if needle_idx >= needle.len() {
			break;
		}
		if byte.to_ascii_lowercase() == needle[needle_idx].to_ascii_lowercase() {
			if first_match_index.is_none() {
				first_match_index = Some(pos as u32);
			}
			if let Some(prev) = last_match_pos {
				if prev + 1 == pos {
					consecutive_matches += 1;
				}
			}
			last_match_pos = Some(pos);
			needle_idx += 1;
		}
	}

	let is_subsequence = needle_idx == needle.len();
	MatchResult {
		is_subsequence,
		consecutive_matches: if is_subsequence { consecutive_matches } else { 0 },
		first_match_index: first_match_index.unwrap_or(0),
		candidate_len: candidate.len() as u32,
	}
}
