use deferred_fetch::app::walkthrough::{
    AwaitedSequence, ChainedContinuations, ConcurrentCallbacks, Walkthrough,
};
use deferred_fetch::core::SIMULATED_DELAY;
use deferred_fetch::{DelaySimulator, RecordingSink, WalkthroughSequence};
use std::sync::Arc;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_concurrent_callbacks_finish_after_one_delay() {
    let sink = RecordingSink::new();
    let walkthrough = ConcurrentCallbacks::new(vec!["a".to_string(), "b".to_string()]);
    let start = Instant::now();

    walkthrough
        .run(&DelaySimulator::default(), Arc::new(sink.clone()))
        .await;

    let mut messages = sink.messages();
    messages.sort();
    assert_eq!(messages, vec!["No Promise: a", "No Promise: b"]);
    assert!(start.elapsed() >= SIMULATED_DELAY);
    assert!(start.elapsed() < SIMULATED_DELAY * 2);
}

#[tokio::test(start_paused = true)]
async fn test_awaited_sequence_is_strictly_ordered() {
    let sink = RecordingSink::new();
    let start = Instant::now();

    AwaitedSequence
        .run(&DelaySimulator::default(), Arc::new(sink.clone()))
        .await;

    assert_eq!(
        sink.messages(),
        vec![
            "Promise: Hello World",
            "Promise: Hello World 2",
            "Done!",
            "test",
        ]
    );
    // 第二個計時器要等第一個完成後才開始
    assert!(start.elapsed() >= SIMULATED_DELAY * 2);
}

#[tokio::test(start_paused = true)]
async fn test_chained_continuations_log_test_first() {
    let sink = RecordingSink::new();

    ChainedContinuations
        .run(&DelaySimulator::default(), Arc::new(sink.clone()))
        .await;

    assert_eq!(
        sink.messages(),
        vec![
            "test",
            "Promise: Hello World",
            "Promise: Hello World 2",
            "Done!",
        ]
    );
    assert!(sink.errors().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_default_sequence_transcript() {
    let sink = RecordingSink::new();
    let sequence = WalkthroughSequence::with_defaults(DelaySimulator::default());

    let results = sequence.run_all(Arc::new(sink.clone())).await;

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "concurrent-callbacks",
            "chained-continuations",
            "awaited-sequence",
            "awaited-rejection",
            "unawaited-handle",
        ]
    );

    let messages = sink.messages();
    assert_eq!(messages.len(), 4 + 4 + 4 + 2 + 2);
    assert!(messages[..4].iter().all(|m| m == "No Promise: Hello World"));
    assert_eq!(messages[4], "test");
    assert_eq!(sink.errors(), vec!["Promise Error: Hello World"]);
    assert_eq!(messages.last().map(String::as_str), Some("Done!"));
}
