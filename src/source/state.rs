// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known key under which the per-line [`State`] snapshot is attached to
/// every emitted record's header.
pub const SYSTEM_STATE_KEY: &str = "systemState";

/// Immutable per-line metadata snapshot attached to one emitted record.
///
/// Offsets are byte positions in the file: `offset` is where the line's
/// content begins, `next_offset` is the resume point after the line's
/// delimiter. `content_bytes` includes the one delimiter byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Opaque generation marker stamped by the watch task.
    pub epoch: u64,
    pub pipeline_name: String,
    pub source_name: String,
    /// Byte offset of the first content byte of the line.
    pub offset: u64,
    /// Byte offset to resume reading from (one past the delimiter).
    pub next_offset: u64,
    /// Logical line number in the file, 1-based.
    pub line_number: u64,
    pub filename: String,
    pub collect_time: DateTime<Utc>,
    /// Line length in bytes, including the delimiter.
    pub content_bytes: u64,
    pub job_uid: String,
    pub job_index: u32,
    pub watch_uid: String,
    /// Globally unique within a watch scope: `watch_uid + "-" + end_offset`.
    pub event_uid: String,
}
