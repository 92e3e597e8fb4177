//! The three background workers: parse, complete, and the sort pool.
//!
//! Each is a plain OS thread running `loop { slot.get() ... }` — no
//! cooperative scheduler, no async runtime. Grounded on the indexer's
//! `thread::spawn`-per-worker shape, generalized from the filesystem
//! watcher's single worker to three cooperating ones.

pub(crate) mod complete;
pub(crate) mod parse;
pub(crate) mod sort_pool;
