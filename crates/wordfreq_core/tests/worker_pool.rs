use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;
use std::time::Duration;

use pretty_assertions::assert_eq;
use wordfreq_core::{CancelFlag, Concurrency, FrequencyError, WorkerPool};

fn pool(workers: usize) -> WorkerPool {
    WorkerPool::new(Concurrency::try_from(workers).unwrap())
}

#[test]
fn results_follow_input_order_not_completion_order() {
    wordfreq_logging::initialize_for_tests();
    let inputs: Vec<u64> = (0..12).collect();
    // Early inputs sleep longest, so they finish last.
    let results = pool(4)
        .run_all(&inputs, |&n| {
            thread::sleep(Duration::from_millis(5 * (12 - n)));
            Ok::<_, Infallible>(n * 10)
        })
        .unwrap();
    assert_eq!(results, (0..12_u64).map(|n| n * 10).collect::<Vec<_>>());
}

#[test]
fn never_runs_more_than_worker_count_at_once() {
    let running = AtomicUsize::new(0);
    let peak = AtomicUsize::new(0);
    let inputs: Vec<usize> = (0..20).collect();

    pool(3)
        .run_all(&inputs, |_| {
            let now = running.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(2));
            running.fetch_sub(1, Ordering::SeqCst);
            Ok::<_, Infallible>(())
        })
        .unwrap();

    assert!(peak.load(Ordering::SeqCst) <= 3);
}

#[test]
fn more_workers_than_inputs() {
    let results = pool(16)
        .run_all(&["a", "b"], |s| Ok::<_, Infallible>(s.to_uppercase()))
        .unwrap();
    assert_eq!(results, ["A", "B"]);
}

#[test]
fn empty_input_yields_empty_output() {
    let inputs: [u8; 0] = [];
    let results = pool(2)
        .run_all(&inputs, |&b| Ok::<_, Infallible>(b))
        .unwrap();
    assert!(results.is_empty());
}

#[test]
fn failure_reports_fragment_index_and_discards_results() {
    let inputs: Vec<u32> = (0..8).collect();
    let err = pool(1)
        .run_all(&inputs, |&n| if n == 5 { Err("out of memory") } else { Ok(n) })
        .unwrap_err();
    assert_eq!(
        err,
        FrequencyError::PartialComputationFailure {
            fragment_index: 5,
            cause: "out of memory".to_string(),
        }
    );
}

#[test]
fn lowest_failed_index_wins() {
    let inputs: Vec<u32> = (0..6).collect();
    // Every worker holds exactly one input before any of them fails.
    let all_started = Barrier::new(6);
    let err = pool(6)
        .run_all(&inputs, |&n| {
            all_started.wait();
            if n == 4 {
                Err(format!("bad {n}"))
            } else if n == 2 {
                // Let fragment 4 fail first.
                thread::sleep(Duration::from_millis(50));
                Err(format!("bad {n}"))
            } else {
                Ok(n)
            }
        })
        .unwrap_err();
    assert_eq!(
        err,
        FrequencyError::PartialComputationFailure {
            fragment_index: 2,
            cause: "bad 2".to_string(),
        }
    );
}

#[test]
fn panicking_work_becomes_failure() {
    let inputs = [1, 2, 3];
    let err = pool(2)
        .run_all(&inputs, |&n: &i32| {
            if n == 2 {
                panic!("boom");
            }
            Ok::<_, Infallible>(n)
        })
        .unwrap_err();
    match err {
        FrequencyError::PartialComputationFailure {
            fragment_index,
            cause,
        } => {
            assert_eq!(fragment_index, 1);
            assert!(cause.contains("boom"), "{cause}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn cancel_during_run_returns_cancelled() {
    let cancel = CancelFlag::new();
    let inputs: Vec<usize> = (0..50).collect();
    let processed = AtomicUsize::new(0);

    let result = pool(2).with_cancel_flag(cancel.clone()).run_all(&inputs, |&n| {
        if n == 3 {
            cancel.cancel();
        }
        processed.fetch_add(1, Ordering::SeqCst);
        Ok::<_, Infallible>(n)
    });

    assert_eq!(result, Err(FrequencyError::Cancelled));
    assert!(processed.load(Ordering::SeqCst) < inputs.len());
}
