//! The parser backend boundary.
//!
//! `ParserBackend` is an abstraction over an opaque, single-threaded
//! C-family parser (for test mockability): exactly one caller may be
//! inside any of its methods at a time, which is why every call into it
//! is routed through the translation-unit cache's mutex rather than taken
//! directly.

use crate::error::BackendError;
use crate::types::{CompletionData, Diagnostic, UnsavedFile};

/// Abstract engine for parsing and querying translation units (for test
/// mockability).
///
/// A real implementation wraps a single-threaded, non-reentrant parser
/// library; `Handle` is whatever opaque translation-unit pointer or index
/// that library hands back. The engine never interprets a `Handle`, only
/// stores and forwards it.
pub trait ParserBackend: Send + Sync + Sized {
	type Handle: Send;

	/// Creates the backend's process-wide index. Called once, at engine
	/// construction; failure here is the only construction-time error the
	/// engine surfaces.
	fn create_index() -> Result<Self, BackendError>;

	/// Parses `path` from scratch, applying `unsaved` over the on-disk
	/// contents and `flags` as compiler arguments.
	fn open(&self, path: &str, unsaved: &[UnsavedFile], flags: &[String]) -> Result<Self::Handle, BackendError>;

	/// Re-parses an already-open translation unit in place.
	fn reparse(&self, handle: &mut Self::Handle, unsaved: &[UnsavedFile]) -> Result<(), BackendError>;

	/// Runs code completion at `line`/`column` against the most recently
	/// parsed state of `handle`. Does not reparse first; a stale handle
	/// yields stale (but never incorrect-for-its-state) results.
	fn complete(&self, handle: &Self::Handle, path: &str, line: u32, column: u32, unsaved: &[UnsavedFile]) -> Vec<CompletionData>;

	/// Returns the diagnostics attached to the last successful parse of
	/// `handle`.
	fn diagnostics(&self, handle: &Self::Handle) -> Vec<Diagnostic>;

	/// Releases a single translation unit. Never fails: a backend that
	/// cannot release a handle should leak it rather than propagate an
	/// error the engine has nowhere useful to send.
	fn close(&self, handle: Self::Handle);
}

pub mod fake;
