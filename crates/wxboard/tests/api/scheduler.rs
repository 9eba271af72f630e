use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use wxboard::{run_every, CycleError, LocationError};

use crate::helpers::test_logger;

#[tokio::test(start_paused = true)]
async fn rearms_after_each_cycle_completes() {
    let origin = Instant::now();
    let starts = Arc::new(Mutex::new(Vec::new()));
    let shutdown = CancellationToken::new();

    let recorded = starts.clone();
    let stopper = shutdown.clone();
    tokio::join!(
        run_every(
            test_logger(),
            "test",
            Duration::from_secs(30),
            shutdown.clone(),
            move || {
                let recorded = recorded.clone();
                async move {
                    recorded.lock().unwrap().push(origin.elapsed().as_secs());
                    sleep(Duration::from_secs(2)).await;
                    Ok(())
                }
            },
        ),
        async move {
            sleep(Duration::from_secs(100)).await;
            stopper.cancel();
        },
    );

    assert_eq!(*starts.lock().unwrap(), vec![0, 32, 64, 96]);
}

#[tokio::test(start_paused = true)]
async fn failing_cycle_is_retried_next_period() {
    let calls = Arc::new(Mutex::new(0));
    let shutdown = CancellationToken::new();

    let counter = calls.clone();
    let stopper = shutdown.clone();
    tokio::join!(
        run_every(
            test_logger(),
            "test",
            Duration::from_secs(30),
            shutdown.clone(),
            move || {
                *counter.lock().unwrap() += 1;
                async { Err::<(), _>(CycleError::Location(LocationError::Unavailable)) }
            },
        ),
        async move {
            sleep(Duration::from_secs(65)).await;
            stopper.cancel();
        },
    );

    assert_eq!(*calls.lock().unwrap(), 3);
}

#[tokio::test(start_paused = true)]
async fn cancellation_abandons_a_cycle_in_flight() {
    let finished = Arc::new(Mutex::new(false));
    let shutdown = CancellationToken::new();

    let flag = finished.clone();
    let stopper = shutdown.clone();
    tokio::join!(
        run_every(
            test_logger(),
            "test",
            Duration::from_secs(30),
            shutdown.clone(),
            move || {
                let flag = flag.clone();
                async move {
                    sleep(Duration::from_secs(10)).await;
                    *flag.lock().unwrap() = true;
                    Ok(())
                }
            },
        ),
        async move {
            sleep(Duration::from_secs(5)).await;
            stopper.cancel();
        },
    );

    assert!(!*finished.lock().unwrap());
}
