//! Shared concurrency primitives for the completion engine's background workers.
//!
//! The centerpiece is [`Slot`], a single-cell mailbox with overwrite-on-write
//! semantics: writers never block, and the single reader either receives the
//! most recently written value or a cancellation signal, never a queue of
//! stale ones. This is deliberately not a channel — an unbounded queue would
//! let a burst of keystrokes pile up instead of collapsing to "do the latest
//! thing".

mod gate;
mod slot;

pub use gate::{Gate, GateWake};
pub use slot::{Signal, Slot};
