// SPDX-License-Identifier: Apache-2.0

//! File source: per-file tracking jobs and line-level record production.
//!
//! A [`Job`] tracks one physical file through its lifecycle. Discovery
//! creates jobs, hands them to reader workers over the task's bounded queue,
//! and signals stop/delete/rename through the job's shared cells while a
//! reader holds it. The reader owns the file handle and cursor exclusively
//! and emits one [`LogEvent`] per line via [`Job::produce_event`].

pub mod config;
pub mod error;
pub mod event;
pub mod file_id;
pub mod fingerprint;
pub mod job;
pub mod line_count;
pub mod pattern;
pub mod state;
pub mod task;

pub use config::FileSourceConfig;
pub use error::{Error, Result};
pub use event::{EventPool, LogEvent};
pub use file_id::{watch_job_id, FileId};
pub use job::{Job, JobHandle, JobStatus};
pub use pattern::{Pattern, PatternError};
pub use state::{State, SYSTEM_STATE_KEY};
pub use task::{EventSink, WatchTask};
