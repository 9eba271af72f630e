use slog::{debug, error, info, Logger};
use std::{future::Future, time::Duration};
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::CycleError;

/// Runs `cycle` right away and then again `period` after each run finishes, until `shutdown`.
///
/// A failed cycle is logged and the loop carries on; nothing but the token stops it.
/// Cancelling also abandons a cycle that is still in flight.
pub async fn run_every<F, Fut>(
    logger: Logger,
    name: &str,
    period: Duration,
    shutdown: CancellationToken,
    mut cycle: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), CycleError>>,
{
    info!(logger, "{} refresh every {}s", name, period.as_secs());
    loop {
        let started = Instant::now();
        tokio::select! {
            _ = shutdown.cancelled() => break,
            outcome = cycle() => match outcome {
                Ok(()) => debug!(logger, "{} refresh done in {:?}", name, started.elapsed()),
                Err(err) => error!(
                    logger,
                    "{} refresh failed, next try in {}s: {}",
                    name,
                    period.as_secs(),
                    err
                ),
            },
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = sleep(period) => {}
        }
    }
    info!(logger, "{} refresh stopped", name);
}
