use std::sync::Arc;

use ccengine_worker::Signal;

use crate::backend::ParserBackend;
use crate::shared::Shared;

/// Applies parse tasks to the translation-unit cache as they arrive.
/// Always wins any race with the completion worker for the cache mutex:
/// parsing never yields to completion, only the reverse.
pub(crate) fn run<B: ParserBackend + 'static>(shared: Arc<Shared<B>>) {
	loop {
		match shared.parse_slot.get() {
			Signal::Task(task) => {
				shared.apply_parse(&task.path, &task.unsaved, &task.flags);
				tracing::debug!(path = %task.path, "parse.applied");
			}
			Signal::Interrupted => continue,
			Signal::Closed => return,
		}
	}
}
