use std::sync::{Condvar, Mutex};

/// What a blocked [`Slot::get`] call woke up to.
#[derive(Debug)]
pub enum Signal<T> {
	/// A value was present; it has been removed from the slot.
	Task(T),
	/// [`Slot::interrupt_wait`] was called while no value was present.
	Interrupted,
	/// [`Slot::close`] was called; the slot will never yield another value.
	Closed,
}

struct State<T> {
	task: Option<T>,
	interrupt: bool,
	closed: bool,
}

/// A single-cell mailbox with overwrite-on-write semantics.
///
/// `set` never blocks and never fails: it replaces whatever was in the cell,
/// silently dropping (and thereby cancelling) any value that had not yet been
/// collected by [`Slot::get`]. Exactly one consumer is expected to call `get`
/// in a loop; concurrent writers race harmlessly because only the most recent
/// write can ever be observed.
pub struct Slot<T> {
	state: Mutex<State<T>>,
	cond: Condvar,
}

impl<T> Default for Slot<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Slot<T> {
	pub fn new() -> Self {
		Self {
			state: Mutex::new(State {
				task: None,
				interrupt: false,
				closed: false,
			}),
			cond: Condvar::new(),
		}
	}

	/// Replaces the slot's contents, dropping any value not yet collected.
	pub fn set(&self, task: T) {
		let mut state = self.state.lock().unwrap();
		if state.closed {
			tracing::trace!("slot.set on closed slot, dropping task");
			return;
		}
		if state.task.replace(task).is_some() {
			tracing::trace!("slot.set superseded an uncollected task");
		}
		self.cond.notify_one();
	}

	/// Blocks until a value is present, the slot is interrupted, or the slot
	/// is closed. A value is removed from the slot before being returned, so
	/// each `set` is delivered to at most one `get` call.
	pub fn get(&self) -> Signal<T> {
		let mut state = self.state.lock().unwrap();
		loop {
			if let Some(task) = state.task.take() {
				return Signal::Task(task);
			}
			if state.closed {
				return Signal::Closed;
			}
			if state.interrupt {
				state.interrupt = false;
				return Signal::Interrupted;
			}
			state = self.cond.wait(state).unwrap();
		}
	}

	/// Wakes a blocked `get` with a cancellation signal rather than a value.
	/// A no-op if no thread is currently waiting; the flag is consumed by the
	/// next `get` call regardless, so callers should not rely on the signal
	/// reaching a specific call.
	pub fn interrupt_wait(&self) {
		let mut state = self.state.lock().unwrap();
		state.interrupt = true;
		self.cond.notify_all();
	}

	/// Permanently closes the slot; every blocked and future `get` returns
	/// [`Signal::Closed`]. Used to unwind a worker thread during shutdown.
	pub fn close(&self) {
		let mut state = self.state.lock().unwrap();
		state.closed = true;
		self.cond.notify_all();
	}

	/// Non-consuming check for whether a value is currently queued. Used by
	/// the completion worker to detect a pending parse without taking it.
	pub fn has_pending(&self) -> bool {
		self.state.lock().unwrap().task.is_some()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::thread;
	use std::time::Duration;

	use super::*;

	#[test]
	fn set_then_get_delivers_the_value() {
		let slot: Slot<u32> = Slot::new();
		slot.set(7);
		match slot.get() {
			Signal::Task(v) => assert_eq!(v, 7),
			other => panic!("expected Task, got {other:?}"),
		}
	}

	#[test]
	fn overwrite_drops_the_previous_value() {
		let slot: Slot<u32> = Slot::new();
		slot.set(1);
		slot.set(2);
		match slot.get() {
			Signal::Task(v) => assert_eq!(v, 2),
			other => panic!("expected Task, got {other:?}"),
		}
	}

	#[test]
	fn get_blocks_until_a_value_arrives() {
		let slot = Arc::new(Slot::<u32>::new());
		let reader = {
			let slot = Arc::clone(&slot);
			thread::spawn(move || slot.get())
		};
		thread::sleep(Duration::from_millis(20));
		slot.set(42);
		match reader.join().unwrap() {
			Signal::Task(v) => assert_eq!(v, 42),
			other => panic!("expected Task, got {other:?}"),
		}
	}

	#[test]
	fn interrupt_wakes_a_blocked_reader_without_a_value() {
		let slot = Arc::new(Slot::<u32>::new());
		let reader = {
			let slot = Arc::clone(&slot);
			thread::spawn(move || slot.get())
		};
		thread::sleep(Duration::from_millis(20));
		slot.interrupt_wait();
		match reader.join().unwrap() {
			Signal::Interrupted => {}
			other => panic!("expected Interrupted, got {other:?}"),
		}
	}

	#[test]
	fn close_unblocks_readers_forever() {
		let slot: Slot<u32> = Slot::new();
		slot.close();
		assert!(matches!(slot.get(), Signal::Closed));
		assert!(matches!(slot.get(), Signal::Closed));
	}

	#[test]
	fn set_after_close_is_silently_dropped() {
		let slot: Slot<u32> = Slot::new();
		slot.close();
		slot.set(99);
		assert!(matches!(slot.get(), Signal::Closed));
	}

	#[test]
	fn has_pending_reflects_uncollected_value() {
		let slot: Slot<u32> = Slot::new();
		assert!(!slot.has_pending());
		slot.set(5);
		assert!(slot.has_pending());
		slot.get();
		assert!(!slot.has_pending());
	}
}
