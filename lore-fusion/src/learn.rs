//! Background learning hook.
//!
//! Each answered query produces a [`QueryRecord`] that is pushed onto a
//! bounded channel and consumed by a detached worker, which appends it to
//! a ring-buffer log for later analysis. The request path never blocks on
//! this and never observes a failure: a full queue drops the record with
//! a debug line.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::debug;

use lore_core::models::QueryRecord;

/// Ring-buffer log of answered queries.
#[derive(Debug, Default)]
pub struct QueryLog {
    entries: Vec<QueryRecord>,
    max_entries: usize,
}

impl QueryLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn push(&mut self, record: QueryRecord) {
        if self.entries.len() >= self.max_entries && !self.entries.is_empty() {
            self.entries.remove(0);
        }
        self.entries.push(record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> Vec<QueryRecord> {
        self.entries.clone()
    }
}

/// Fire-and-forget learning pipeline: bounded queue + detached worker.
pub struct LearningHook {
    tx: mpsc::Sender<QueryRecord>,
    log: Arc<Mutex<QueryLog>>,
    worker: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl LearningHook {
    /// Spawn the worker. Requires a running tokio runtime.
    pub fn spawn(queue_size: usize, log_capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<QueryRecord>(queue_size.max(1));
        let log = Arc::new(Mutex::new(QueryLog::new(log_capacity)));

        let worker_log = Arc::clone(&log);
        let worker = tokio::spawn(async move {
            while let Some(record) = rx.recv().await {
                debug!(query = %record.query, results = record.result_count, "recorded query");
                if let Ok(mut log) = worker_log.lock() {
                    log.push(record);
                }
            }
        });

        Self {
            tx,
            log,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Enqueue a record. Never blocks; a full queue drops the record.
    pub fn record(&self, record: QueryRecord) {
        if self.tx.try_send(record).is_err() {
            debug!("learning queue full, dropping record");
        }
    }

    /// Snapshot of everything the worker has logged so far.
    pub fn log_snapshot(&self) -> Vec<QueryRecord> {
        self.log
            .lock()
            .map(|log| log.snapshot())
            .unwrap_or_default()
    }

    /// Stop the worker.
    pub fn shutdown(&self) {
        if let Ok(mut guard) = self.worker.lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_evicts_oldest_beyond_capacity() {
        let mut log = QueryLog::new(2);
        log.push(QueryRecord::new("a", 0, vec![], 1.0));
        log.push(QueryRecord::new("b", 0, vec![], 1.0));
        log.push(QueryRecord::new("c", 0, vec![], 1.0));
        let queries: Vec<String> = log.snapshot().into_iter().map(|r| r.query).collect();
        assert_eq!(queries, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn worker_drains_records() {
        let hook = LearningHook::spawn(8, 100);
        hook.record(QueryRecord::new("metro", 3, vec!["remote-docs".into()], 2.0));

        // Give the detached worker a moment to drain.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let snapshot = hook.log_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].query, "metro");
        hook.shutdown();
    }

    #[tokio::test]
    async fn full_queue_drops_silently() {
        let hook = LearningHook::spawn(1, 100);
        hook.shutdown();
        // Worker gone: the first record fills the queue, the rest drop.
        for i in 0..10 {
            hook.record(QueryRecord::new(format!("q{i}"), 0, vec![], 1.0));
        }
    }
}
