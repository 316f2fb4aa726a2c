use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};

use crate::http_probe::prelude::*;

/// How many probes may be waiting on the network at the same time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Concurrency {
    /// One task per location, all in flight at once.
    #[default]
    Unbounded,
    /// At most this many requests in flight.
    Bounded(NonZeroUsize),
}

impl Concurrency {
    pub fn from_limit(limit: Option<NonZeroUsize>) -> Self {
        match limit {
            Some(n) => Concurrency::Bounded(n),
            None => Concurrency::Unbounded,
        }
    }
}

/// Probe every location concurrently and stream the outcomes back.
///
/// The receiver yields outcomes in the order they complete and is closed
/// exactly once, after every spawned probe has finished. An empty `locations`
/// closes it straight away. Must be called from within a tokio runtime.
pub fn dispatch<T: Transport>(
    prober: Prober<T>,
    locations: Vec<String>,
    concurrency: Concurrency,
) -> mpsc::Receiver<Outcome> {
    let (tx, rx) = mpsc::channel(locations.len().max(1));
    tokio::spawn(fan_out(Arc::new(prober), locations, concurrency, tx));
    rx
}

async fn fan_out<T: Transport>(
    prober: Arc<Prober<T>>,
    locations: Vec<String>,
    concurrency: Concurrency,
    tx: mpsc::Sender<Outcome>,
) {
    let permits = match concurrency {
        Concurrency::Unbounded => None,
        Concurrency::Bounded(n) => Some(Arc::new(Semaphore::new(n.get()))),
    };

    let expected = locations.len();
    let mut handles = Vec::with_capacity(expected);

    for location in locations {
        let prober = prober.clone();
        let permits = permits.clone();
        let tx = tx.clone();
        let unit_location = location.clone();

        let handle = tokio::spawn(async move {
            // Held until the outcome is pushed. The semaphore is never closed.
            let _permit = match &permits {
                Some(permits) => permits.clone().acquire_owned().await.ok(),
                None => None,
            };
            let outcome = prober.probe(&unit_location).await;
            if tx.send(outcome).await.is_err() {
                log::debug!("Receiver dropped, discarding outcome for {unit_location}");
            }
        });

        handles.push((location, handle));
    }

    let mut completed = 0;
    for (location, handle) in handles {
        if let Err(source) = handle.await {
            log::warn!("Probe task for {location} ended abnormally: {source}");
            let outcome = Outcome::failure(
                location.clone(),
                ProbeError::Aborted { location, source },
            );
            let _ = tx.send(outcome).await;
        }
        completed += 1;
    }
    debug_assert_eq!(completed, expected);
    log::debug!("All {completed} probes finished, closing outcome stream");

    // Last sender: every task has dropped its clone by now, and the
    // stand-in outcomes for aborted tasks above were sent through it.
    drop(tx);
}
