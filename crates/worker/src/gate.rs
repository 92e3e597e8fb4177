use std::sync::{Condvar, Mutex};

/// What a blocked [`Gate::wait_ready`] call woke up to.
#[derive(Debug, PartialEq, Eq)]
pub enum GateWake {
	/// The gate was open (or became open while waiting).
	Ready,
	/// [`Gate::interrupt`] fired a newer epoch than the one observed when the
	/// wait started.
	Interrupted,
}

struct State {
	ready: bool,
	interrupt_epoch: u64,
}

/// A boolean condition, guarded by a mutex/condvar pair, that can also be
/// woken with a cancellation signal independent of the boolean's value.
///
/// This models the engine's `ready_mutex` + `ready_cond` pair: the completion
/// worker flips the gate open when it publishes a snapshot, and the facade
/// flips it closed and interrupts waiters when a fresh, not-yet-published
/// snapshot is about to supersede it.
pub struct Gate {
	state: Mutex<State>,
	cond: Condvar,
}

impl Default for Gate {
	fn default() -> Self {
		Self::new()
	}
}

impl Gate {
	pub fn new() -> Self {
		Self {
			state: Mutex::new(State {
				ready: false,
				interrupt_epoch: 0,
			}),
			cond: Condvar::new(),
		}
	}

	/// Sets the gate's boolean state and wakes every waiter so they can
	/// re-check it.
	pub fn set_ready(&self, ready: bool) {
		let mut state = self.state.lock().unwrap();
		state.ready = ready;
		self.cond.notify_all();
	}

	/// Wakes every current waiter with a cancellation signal, regardless of
	/// the boolean's value.
	pub fn interrupt(&self) {
		let mut state = self.state.lock().unwrap();
		state.interrupt_epoch = state.interrupt_epoch.wrapping_add(1);
		self.cond.notify_all();
	}

	/// Blocks until the gate is ready or an interrupt fires after this call
	/// began waiting. A pre-existing interrupt that fired before the call
	/// started does not retroactively cancel it — only `ready` matters unless
	/// a *new* interrupt arrives while blocked.
	pub fn wait_ready(&self) -> GateWake {
		let mut state = self.state.lock().unwrap();
		let observed_epoch = state.interrupt_epoch;
		loop {
			if state.ready {
				return GateWake::Ready;
			}
			if state.interrupt_epoch != observed_epoch {
				return GateWake::Interrupted;
			}
			state = self.cond.wait(state).unwrap();
		}
	}

	pub fn is_ready(&self) -> bool {
		self.state.lock().unwrap().ready
	}
}
