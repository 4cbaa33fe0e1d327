use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::Logger;
use crate::{channel::UpdateSender, clock::Clock, record::UpdateRecord, Result};

/// Spawn the clock ticker. The clock moves into the task, which is the only
/// place it is ever mutated.
///
/// Sleeps a fixed `tick` between increments; time spent enqueueing (or
/// blocked on a full channel) is not compensated, so the clock drifts behind
/// wall time when the renderer stalls.
pub fn spawn_ticker(
    mut clock: Clock,
    tx: UpdateSender,
    tick: Duration,
    logger: Arc<Logger>,
) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("meteoclock-ticker".into())
        .spawn(move || loop {
            if let Some(record) = clock.tick() {
                let record = UpdateRecord::Time(record);
                logger.info(format!("ticker: {record}"));
                if let Err(err) = tx.enqueue(record) {
                    logger.error(format!("ticker: {err}; stopping"));
                    return;
                }
            }
            thread::sleep(tick);
        })?;
    Ok(handle)
}
