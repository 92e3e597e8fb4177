//! Error types. Only two classes of failure ever cross an API boundary as
//! an `Err`: construction-time failure to stand up the parser backend, and
//! a backend call that could not produce a translation unit. Everything
//! else (stale queries, threading disabled, a busy parser) is a
//! non-exceptional, silently-degraded result and never an `Err`.

use thiserror::Error;

/// Failure from a single call into the parser backend.
#[derive(Debug, Error)]
pub enum BackendError {
	#[error("backend returned no translation unit for {path}")]
	ParseFailure { path: String },
}

/// Failure constructing an [`crate::Engine`].
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("failed to create the parser backend's global index")]
	IndexCreation(#[source] BackendError),
}
