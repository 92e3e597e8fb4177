use std::sync::Arc;

use ccengine_worker::{GateWake, Signal};

use crate::backend::ParserBackend;
use crate::shared::Shared;

/// Ranks the current snapshot against the most recently submitted query
/// and resolves the caller's future. Every thread in the sort pool runs
/// this same loop, racing on `sort_slot`; the slot's overwrite semantics
/// mean only the most recent query per wake is ever ranked.
pub(crate) fn run<B: ParserBackend + 'static>(shared: Arc<Shared<B>>) {
	loop {
		match shared.ready_gate.wait_ready() {
			GateWake::Interrupted => continue,
			GateWake::Ready => {}
		}
		match shared.sort_slot.get() {
			Signal::Task(task) => {
				// One read-lock acquisition for the whole ranking pass: dropping
				// and re-taking the guard between building `texts` and projecting
				// `order` back onto the snapshot would let a completion worker
				// publish a shorter snapshot in between, leaving `order` holding
				// indices out of bounds for the new snapshot.
				let snapshot = shared.snapshot.read();
				let texts: Vec<String> = snapshot.iter().map(|c| c.insertion_text.clone()).collect();
				let order = ccengine_matcher::rank_indices(shared.repository.as_ref(), &texts, &task.query);
				let ranked: Vec<_> = order.into_iter().map(|i| snapshot[i].clone()).collect();
				drop(snapshot);
				tracing::debug!(query = %task.query, matches = ranked.len(), "sort.ranked");
				task.resolver.resolve(ranked);
			}
			Signal::Interrupted => continue,
			Signal::Closed => return,
		}
	}
}
