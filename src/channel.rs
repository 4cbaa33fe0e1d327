//! Bounded update channel between the producer tasks and the render dispatcher.
//!
//! Full channels block the producer and empty channels block the consumer,
//! both without a timeout. Records are never dropped or merged; a slow
//! renderer stalls the producers instead.

use crossbeam::channel::{self, Receiver, Sender};

use crate::{record::UpdateRecord, Error, Result};

pub const DEFAULT_QUEUE_CAPACITY: usize = 5;

/// Producer half. Clone one per producer task.
#[derive(Clone)]
pub struct UpdateSender {
    inner: Sender<UpdateRecord>,
}

/// Consumer half. There is exactly one.
pub struct UpdateReceiver {
    inner: Receiver<UpdateRecord>,
}

/// Create a channel holding at most `capacity` records.
pub fn bounded(capacity: usize) -> Result<(UpdateSender, UpdateReceiver)> {
    if capacity == 0 {
        return Err(Error::InvalidArgs(
            "update channel capacity must be at least 1".into(),
        ));
    }
    let (tx, rx) = channel::bounded(capacity);
    Ok((UpdateSender { inner: tx }, UpdateReceiver { inner: rx }))
}

impl UpdateSender {
    /// Append a record, blocking while the channel is full.
    pub fn enqueue(&self, record: UpdateRecord) -> Result<()> {
        self.inner.send(record).map_err(|_| Error::ChannelClosed)
    }
}

impl UpdateReceiver {
    /// Remove the oldest record, blocking while the channel is empty.
    pub fn dequeue(&self) -> Result<UpdateRecord> {
        self.inner.recv().map_err(|_| Error::ChannelClosed)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{TimeRecord, WeatherRecord};
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };
    use std::thread;
    use std::time::Duration;

    fn minute(minute: u8) -> UpdateRecord {
        UpdateRecord::Time(TimeRecord {
            day: 1,
            month: 1,
            year: 2025,
            hour: 9,
            minute,
        })
    }

    fn weather(code: i32) -> UpdateRecord {
        UpdateRecord::Weather(WeatherRecord {
            temperature_f: 50.0,
            precipitation_in: 0.0,
            weather_code: code,
        })
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(bounded(0).is_err());
    }

    #[test]
    fn preserves_global_order_across_producers() {
        let (ticker, rx) = bounded(8).unwrap();
        let poller = ticker.clone();
        ticker.enqueue(minute(1)).unwrap();
        poller.enqueue(weather(3)).unwrap();
        ticker.enqueue(minute(2)).unwrap();
        poller.enqueue(weather(61)).unwrap();
        ticker.enqueue(minute(3)).unwrap();

        let drained: Vec<_> = (0..5).map(|_| rx.dequeue().unwrap()).collect();
        assert_eq!(
            drained,
            vec![minute(1), weather(3), minute(2), weather(61), minute(3)]
        );
        assert!(rx.is_empty());
    }

    #[test]
    fn full_channel_blocks_until_dequeue() {
        let (tx, rx) = bounded(1).unwrap();
        tx.enqueue(minute(0)).unwrap();

        let returned = Arc::new(AtomicBool::new(false));
        let flag = returned.clone();
        let producer = thread::spawn(move || {
            tx.enqueue(minute(1)).unwrap();
            flag.store(true, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(50));
        assert!(!returned.load(Ordering::SeqCst), "enqueue returned while full");
        assert_eq!(rx.len(), 1);

        assert_eq!(rx.dequeue().unwrap(), minute(0));
        producer.join().unwrap();
        assert!(returned.load(Ordering::SeqCst));
        assert_eq!(rx.dequeue().unwrap(), minute(1));
    }

    #[test]
    fn nothing_is_dropped_under_contention() {
        let (tx, rx) = bounded(2).unwrap();
        let producers: Vec<_> = (0..4u8)
            .map(|p| {
                let tx = tx.clone();
                thread::spawn(move || {
                    for i in 0..25u8 {
                        tx.enqueue(minute(p * 25 + i)).unwrap();
                    }
                })
            })
            .collect();
        drop(tx);

        let mut seen = Vec::new();
        while let Ok(record) = rx.dequeue() {
            if let UpdateRecord::Time(t) = record {
                seen.push(t.minute);
            }
        }
        for handle in producers {
            handle.join().unwrap();
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..100u8).collect::<Vec<_>>());
    }

    #[test]
    fn reports_closed_channel() {
        let (tx, rx) = bounded(1).unwrap();
        drop(rx);
        assert!(matches!(tx.enqueue(minute(0)), Err(Error::ChannelClosed)));
    }
}
