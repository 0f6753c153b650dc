use super::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_timeout_cancels_job() {
    let scheduler = scheduler(1, Some(Duration::from_millis(20)));
    let results = scheduler.run_batch(vec![ComparisonJob::new("slow", slow_request())]).await;
    assert_eq!(results[0].outcome, JobOutcome::TimedOut);

    // the worker gives its slot back once it sees the flag
    let mut waited = 0;
    while scheduler.available_slots() == 0 && waited < 200 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        waited += 1;
    }
    assert_eq!(scheduler.available_slots(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_explicit_cancellation() {
    let scheduler = scheduler(1, None);
    let handle = scheduler.submit(ComparisonJob::new("slow", slow_request()));
    assert_eq!(handle.label(), "slow");
    handle.cancel();
    let result = handle.join().await;
    assert_eq!(result.outcome, JobOutcome::Cancelled);
}

/// Tests that a job cancelled while queued behind a busy slot stops without waiting for it
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_while_waiting_for_slot() {
    logging::init_logging();
    logging::log("TEST", "=== Starting test_cancel_while_waiting_for_slot ===");

    let scheduler = scheduler(1, None);
    let running = scheduler.submit(ComparisonJob::new("running", slow_request()));
    while scheduler.available_slots() > 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    let queued = scheduler.submit(ComparisonJob::new("queued", slow_request()));
    queued.cancel();

    let result = tokio::time::timeout(Duration::from_secs(2), queued.join())
        .await
        .expect("queued job should not wait for the busy slot");
    assert_eq!(result.label, "queued");
    assert_eq!(result.outcome, JobOutcome::Cancelled);

    running.cancel();
    assert_eq!(running.join().await.outcome, JobOutcome::Cancelled);
    assert_eq!(scheduler.available_slots(), 1);
}
