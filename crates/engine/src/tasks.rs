//! Task payloads carried through the parse/complete/sort mailboxes.

use crate::future::CompletionResolver;
use crate::types::{CompletionData, UnsavedFile};

pub(crate) struct ParseTask {
	pub path: String,
	pub unsaved: Vec<UnsavedFile>,
	pub flags: Vec<String>,
}

pub(crate) struct CompleteTask {
	pub path: String,
	pub line: u32,
	pub column: u32,
	pub unsaved: Vec<UnsavedFile>,
}

pub(crate) struct SortTask {
	pub query: String,
	pub resolver: CompletionResolver<Vec<CompletionData>>,
}
