use std::sync::Arc;
use std::time::Duration;

use ccengine_worker::Signal;

use crate::backend::ParserBackend;
use crate::shared::Shared;

/// Runs code completion at the most recently submitted location and
/// publishes the result to the shared snapshot. Waits out a queued parse
/// before running (rather than dropping the task) so completion never
/// runs against state a pending parse is about to replace; once no parse
/// is queued, `cache.lock()` naturally blocks behind one already
/// executing.
pub(crate) fn run<B: ParserBackend + 'static>(shared: Arc<Shared<B>>) {
	loop {
		match shared.complete_slot.get() {
			Signal::Task(task) => {
				while shared.parse_slot.has_pending() {
					std::thread::sleep(Duration::from_millis(1));
				}
				let candidates = {
					let cache = shared.cache.lock().unwrap();
					cache.complete(&task.path, task.line, task.column, &task.unsaved)
				};
				let count = candidates.len();
				*shared.snapshot.write() = candidates;
				shared.ready_gate.set_ready(true);
				tracing::debug!(path = %task.path, count, "completion.published");
			}
			Signal::Interrupted => continue,
			Signal::Closed => return,
		}
	}
}
