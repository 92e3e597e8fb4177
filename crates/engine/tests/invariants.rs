use std::time::Duration;

use ccengine::{CompletionData, CompletionKind, Engine, EngineConfig, FakeParserBackend};
use proptest::prelude::*;

fn candidate(text: &str) -> CompletionData {
	CompletionData {
		insertion_text: text.to_string(),
		menu_text: text.to_string(),
		extra_menu_info: String::new(),
		detailed_info: String::new(),
		kind: CompletionKind::Variable,
	}
}

proptest! {
	#![proptest_config(ProptestConfig { cases: 12, .. ProptestConfig::default() })]

	/// The parser backend is never entered from more than one thread at a
	/// time, regardless of how many parse/update/query calls race it.
	#[test]
	fn backend_single_entrancy_holds_under_concurrent_calls(queries in proptest::collection::vec("[a-z]{0,4}", 1..6)) {
		let backend = FakeParserBackend::new();
		backend.set_completions("a.c", vec![candidate("alpha"), candidate("beta")]);
		let engine = Engine::with_backend(backend, EngineConfig { min_async_threads: 2, max_async_threads: 3, threading_enabled_initially: true });
		engine.update_translation_unit("a.c", &[], &[]);
		// Seed the snapshot with one empty-query round so a refinement query
		// later in `queries` has something to rank against instead of
		// racing a sort pool that never opens its ready gate.
		let _ = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "").get();

		let mut futures = Vec::new();
		for query in &queries {
			engine.update_translation_unit_async("a.c", &[], &[]);
			futures.push(engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], query));
		}
		for future in futures {
			let _ = future.get();
		}
		engine.shutdown();
	}
}

/// A plain (non-property) regression check for the same invariant, reading
/// the fake backend's own concurrency bookkeeping directly.
#[test]
fn backend_reports_at_most_one_concurrent_entry() {
	let backend = FakeParserBackend::new();
	backend.set_completions("a.c", vec![candidate("alpha")]);
	backend.simulate_parse_delay(Duration::from_millis(5));
	let probe = backend.probe();
	let engine = Engine::with_backend(backend, EngineConfig { min_async_threads: 2, max_async_threads: 3, threading_enabled_initially: true });
	// A non-empty query only ever ranks an existing snapshot; seed
	// one with an empty-query round before refining it repeatedly below.
	let _ = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "").get();

	for _ in 0..10 {
		engine.update_translation_unit_async("a.c", &[], &[]);
		let _ = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "a").get();
	}
	engine.shutdown();

	assert_eq!(probe.max_observed_concurrent_entries(), 1);
	assert!(!probe.was_ever_reentered());
}
