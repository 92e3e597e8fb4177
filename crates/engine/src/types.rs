//! Data types exchanged across the engine's public API and its backend
//! boundary.

/// A buffer that overrides the on-disk contents of a file for the duration
/// of a single backend call. Mirrors the "unsaved files" concept every
/// libclang-style completion API takes so the backend can see editor state
/// that has not been written to disk yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsavedFile {
	pub path: String,
	pub contents: Vec<u8>,
}

impl UnsavedFile {
	pub fn new(path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
		Self { path: path.into(), contents: contents.into() }
	}

	pub fn length(&self) -> usize {
		self.contents.len()
	}
}

/// The kind hint a backend attaches to a completion candidate, used by
/// front ends to pick an icon; never consulted by ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
	Function,
	Variable,
	Type,
	Macro,
	Keyword,
	Other,
}

/// One candidate as returned by the backend's code-complete call, before
/// ranking against a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionData {
	pub insertion_text: String,
	pub menu_text: String,
	pub extra_menu_info: String,
	pub detailed_info: String,
	pub kind: CompletionKind,
}

/// Diagnostic severity. `Ignored` is the backend's way of saying "don't
/// surface this one"; every other variant is shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
	Ignored,
	Note,
	Warning,
	Error,
	Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub location: String,
	pub severity: Severity,
	pub text: String,
}
