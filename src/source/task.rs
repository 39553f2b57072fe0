// SPDX-License-Identifier: Apache-2.0

//! Shared per-watch context.
//!
//! One [`WatchTask`] exists per logical watch (pipeline + source); every job
//! belonging to that watch holds an `Arc` reference to it. The task supplies
//! naming, the epoch stamped on records, configuration, the event pool, the
//! sink receiving completed records, and the hand-off queue through which
//! discovery delivers ready jobs to reader workers.

use std::sync::Arc;

use crate::bounded_channel::{self, BoundedReceiver, BoundedSender};
use crate::source::config::FileSourceConfig;
use crate::source::event::{EventPool, LogEvent};
use crate::source::job::Job;

/// Sink invoked with every completed record.
pub type EventSink = Arc<dyn Fn(LogEvent) + Send + Sync>;

pub struct WatchTask {
    pipeline_name: String,
    source_name: String,
    epoch: u64,
    config: FileSourceConfig,
    event_pool: EventPool,
    sink: EventSink,
    job_tx: BoundedSender<Job>,
}

impl WatchTask {
    /// Create the task and the receiving end of its job hand-off queue.
    /// The receiver goes to the reader worker pool; the task keeps the
    /// sender for [`Job::enqueue`].
    pub fn new(
        pipeline_name: impl Into<String>,
        source_name: impl Into<String>,
        epoch: u64,
        config: FileSourceConfig,
        sink: EventSink,
    ) -> (Arc<WatchTask>, BoundedReceiver<Job>) {
        let (job_tx, job_rx) = bounded_channel::bounded(config.queue_capacity);
        let event_pool = EventPool::new(config.event_pool_size);

        let task = Arc::new(WatchTask {
            pipeline_name: pipeline_name.into(),
            source_name: source_name.into(),
            epoch,
            config,
            event_pool,
            sink,
            job_tx,
        });

        (task, job_rx)
    }

    pub fn pipeline_name(&self) -> &str {
        &self.pipeline_name
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn config(&self) -> &FileSourceConfig {
        &self.config
    }

    pub fn event_pool(&self) -> &EventPool {
        &self.event_pool
    }

    /// Deliver a completed record to the sink.
    pub fn deliver(&self, event: LogEvent) {
        (self.sink)(event)
    }

    pub(crate) fn job_sender(&self) -> &BoundedSender<Job> {
        &self.job_tx
    }
}
