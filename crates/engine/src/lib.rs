//! A concurrent code-completion engine wrapping a single-threaded,
//! non-reentrant C-family parser backend.
//!
//! The facade ([`Engine`]) is the only thing callers need: it owns a
//! translation-unit cache behind a single mutex, three background worker
//! threads (parse, complete, sort), and a query-ranking pipeline built on
//! `ccengine-matcher`. Every public method works whether or not
//! [`Engine::enable_threading`] has been called; before it has, the
//! `_async` methods degrade to no-ops or resolved-empty futures rather
//! than submitting work nothing will ever collect.

mod backend;
mod cache;
mod config;
mod error;
mod facade;
mod future;
mod shared;
mod tasks;
mod types;
mod workers;

pub use backend::fake::{FakeBackendProbe, FakeHandle, FakeParserBackend};
pub use backend::ParserBackend;
pub use config::EngineConfig;
pub use error::{BackendError, EngineError};
pub use facade::Engine;
pub use future::{CompletionFuture, CompletionResolver};
pub use types::{CompletionData, CompletionKind, Diagnostic, Severity, UnsavedFile};
