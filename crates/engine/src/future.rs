//! A single-shot, resolve-exactly-once future.
//!
//! Grounded on the `Executor`/`Promise` pattern: a shared
//! `Mutex`+`Condvar` cell that a worker resolves once and a caller either
//! blocks on ([`CompletionFuture::get`]) or polls without blocking
//! ([`CompletionFuture::poll`]).

use std::sync::{Arc, Condvar, Mutex};

struct Shared<T> {
	value: Mutex<Option<T>>,
	ready: Condvar,
}

/// The consumer-facing half of a resolve-exactly-once value.
pub struct CompletionFuture<T> {
	shared: Arc<Shared<T>>,
}

/// The producer-facing half; dropped after a single call to `resolve`.
pub struct CompletionResolver<T> {
	shared: Arc<Shared<T>>,
}

impl<T> CompletionFuture<T> {
	/// Creates a linked future/resolver pair, both initially pending.
	pub fn pending() -> (Self, CompletionResolver<T>) {
		let shared = Arc::new(Shared { value: Mutex::new(None), ready: Condvar::new() });
		(Self { shared: shared.clone() }, CompletionResolver { shared })
	}

	/// Creates a future that is already resolved with `value`. Used when an
	/// async call is rejected outright (threading disabled, parser busy)
	/// instead of submitted, so the caller still gets a future back rather
	/// than a special-cased return type.
	pub fn resolved(value: T) -> Self {
		let shared = Arc::new(Shared { value: Mutex::new(Some(value)), ready: Condvar::new() });
		Self { shared }
	}

	/// Blocks the calling thread until the future resolves, then consumes
	/// it. Safe to call at most once — resolution is a one-shot take, not a
	/// broadcast.
	pub fn get(self) -> T {
		let mut guard = self.shared.value.lock().unwrap();
		while guard.is_none() {
			guard = self.shared.ready.wait(guard).unwrap();
		}
		guard.take().expect("checked Some above")
	}
}

impl<T: Clone> CompletionFuture<T> {
	/// Non-blocking peek: `None` if still pending, `Some(value)` once
	/// resolved. May be called repeatedly; each call after resolution
	/// returns a fresh clone of the same value.
	pub fn poll(&self) -> Option<T> {
		self.shared.value.lock().unwrap().clone()
	}
}

impl<T> CompletionResolver<T> {
	/// Resolves the linked future, waking a blocked `get` if one is
	/// waiting. Consumes the resolver so it cannot be resolved twice.
	pub fn resolve(self, value: T) {
		*self.shared.value.lock().unwrap() = Some(value);
		self.shared.ready.notify_all();
	}
}

impl<T: Default> Drop for CompletionResolver<T> {
	/// A resolver dropped without ever calling `resolve` means the task it
	/// belonged to was superseded in its mailbox before a worker collected
	/// it. Resolving to the type's default rather than leaving the future
	/// pending forever is what makes that cancellation concrete: a blocked
	/// `get()` unblocks with an empty result instead of hanging.
	fn drop(&mut self) {
		let mut guard = self.shared.value.lock().unwrap();
		if guard.is_none() {
			*guard = Some(T::default());
			self.shared.ready.notify_all();
		}
	}
}
