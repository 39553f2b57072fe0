// SPDX-License-Identifier: Apache-2.0

//! The per-file tracking unit.
//!
//! A [`Job`] owns the file handle and the read cursor for one physical file.
//! It is an owned value: discovery creates it, pushes it through the task's
//! hand-off queue, and a reader worker holds it exclusively while reading.
//! Only `status` and `filename` are shared across actors, through atomic
//! cells exposed as a [`JobHandle`]; the holder reconciles them at explicit
//! [`Job::sync`] points, bounding staleness to one read cycle without any
//! locks on the hot path.

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::File;
use std::io::{self, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tracing::{debug, error, warn};

use crate::bounded_channel::Disconnected;
use crate::source::error::{Error, Result};
use crate::source::file_id::{watch_job_id, FileId};
use crate::source::fingerprint;
use crate::source::line_count;
use crate::source::state::State;
use crate::source::task::WatchTask;

/// Lifecycle status of a job.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Active = 1,
    Delete = 2,
    Stop = 3,
    /// Stronger than `Stop`: the reader should lay the job down without
    /// finishing any in-flight batch.
    StopImmediately = 999,
}

impl JobStatus {
    fn from_raw(raw: u32) -> JobStatus {
        match raw {
            1 => JobStatus::Active,
            2 => JobStatus::Delete,
            999 => JobStatus::StopImmediately,
            _ => JobStatus::Stop,
        }
    }
}

/// Process-wide job index counter. Monotonic for the process lifetime,
/// never reused, no teardown.
static NEXT_JOB_INDEX: AtomicU32 = AtomicU32::new(0);

fn next_job_index() -> u32 {
    NEXT_JOB_INDEX.fetch_add(1, Ordering::Relaxed) + 1
}

/// The cross-actor cells. One actor writes while the other reads; everything
/// else on the job is owned by whichever actor currently holds it.
struct JobCells {
    status: AtomicU32,
    filename: ArcSwap<PathBuf>,
}

impl JobCells {
    fn load_status(&self) -> JobStatus {
        JobStatus::from_raw(self.status.load(Ordering::Acquire))
    }

    fn store_status(&self, status: JobStatus) {
        self.status.store(status as u32, Ordering::Release);
    }
}

/// Cloneable view of a job's shared cells, for the actor that does not
/// currently hold the job (typically discovery signaling a reader).
#[derive(Clone)]
pub struct JobHandle {
    uid: Arc<str>,
    index: u32,
    cells: Arc<JobCells>,
}

impl JobHandle {
    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn status(&self) -> JobStatus {
        self.cells.load_status()
    }

    pub fn filename(&self) -> Arc<PathBuf> {
        self.cells.filename.load_full()
    }

    /// Signal the holder to lay the job down at its next sync point.
    pub fn stop(&self) {
        self.cells.store_status(JobStatus::Stop);
    }

    pub fn stop_immediately(&self) {
        self.cells.store_status(JobStatus::StopImmediately);
    }

    pub fn delete(&self) {
        self.cells.store_status(JobStatus::Delete);
    }

    /// Publish a new path for the tracked file. The holder picks it up at
    /// its next sync point.
    pub fn rename_to(&self, new_filename: PathBuf) {
        self.cells.filename.store(Arc::new(new_filename));
    }
}

/// The stateful tracking unit for one file.
pub struct Job {
    uid: String,
    watch_uid: OnceLock<String>,
    index: u32,
    filename: Arc<PathBuf>,
    cells: Arc<JobCells>,
    file: Option<File>,
    status: JobStatus,
    end_offset: u64,
    next_offset: u64,
    current_line_number: u64,
    current_lines: u64,
    eof_count: u32,
    last_active_time: Option<Instant>,
    delete_time: Option<Instant>,
    rename_time: Option<Instant>,
    identifier: Option<String>,

    task: Arc<WatchTask>,
}

impl Job {
    /// Create a job for a discovered file. The uid is derived once from the
    /// file's identity and never changes for the job's lifetime.
    pub fn new(task: Arc<WatchTask>, filename: impl Into<PathBuf>, file_id: FileId) -> Job {
        Self::with_uid(task, filename, file_id.to_string())
    }

    /// Create a job with a known uid, e.g. when discovery rebuilds jobs from
    /// a checkpoint registry.
    pub fn with_uid(task: Arc<WatchTask>, filename: impl Into<PathBuf>, uid: String) -> Job {
        let filename = Arc::new(filename.into());
        let cells = Arc::new(JobCells {
            status: AtomicU32::new(JobStatus::Stop as u32),
            filename: ArcSwap::new(filename.clone()),
        });

        Job {
            uid,
            watch_uid: OnceLock::new(),
            index: next_job_index(),
            filename,
            cells,
            file: None,
            status: JobStatus::Stop,
            end_offset: 0,
            next_offset: 0,
            current_line_number: 0,
            current_lines: 0,
            eof_count: 0,
            last_active_time: None,
            delete_time: None,
            rename_time: None,
            identifier: None,
            task,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// The watch scope id `pipeline:source:uid`, computed once and cached.
    /// Supports repeated collection of the same file by different sources.
    pub fn watch_uid(&self) -> &str {
        self.watch_uid.get_or_init(|| {
            watch_job_id(
                self.task.pipeline_name(),
                self.task.source_name(),
                &self.uid,
            )
        })
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn end_offset(&self) -> u64 {
        self.end_offset
    }

    /// The resume point: byte offset the next read starts from.
    pub fn next_offset(&self) -> u64 {
        self.next_offset
    }

    pub fn current_line_number(&self) -> u64 {
        self.current_line_number
    }

    /// Lifetime count of lines produced by this job instance.
    pub fn current_lines(&self) -> u64 {
        self.current_lines
    }

    pub fn eof_count(&self) -> u32 {
        self.eof_count
    }

    pub fn last_active_time(&self) -> Option<Instant> {
        self.last_active_time
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// A cross-actor view of this job's shared cells.
    pub fn handle(&self) -> JobHandle {
        JobHandle {
            uid: Arc::from(self.uid.as_str()),
            index: self.index,
            cells: self.cells.clone(),
        }
    }

    /// Open and validate the file, position the cursor, and mark the job
    /// active. Idempotent: with a handle already held, only the status,
    /// EOF counter, and activity timestamp are refreshed.
    ///
    /// A failure leaves the job without a handle and without side effects on
    /// the cursor. [`Error::IdentityChanged`] is fatal for this job instance:
    /// the path now refers to a different file and the caller must retire
    /// the job.
    pub fn activate(&mut self) -> Result<()> {
        if self.file.is_none() {
            let mut file = File::open(self.filename.as_path()).map_err(|e| {
                if e.kind() == io::ErrorKind::PermissionDenied {
                    error!(filename = ?self.filename, "no permission to open file");
                }
                Error::Open {
                    path: self.filename.as_path().to_path_buf(),
                    source: e,
                }
            })?;

            let new_uid = FileId::from_file(&file)
                .map_err(|e| Error::Stat {
                    path: self.filename.as_path().to_path_buf(),
                    source: e,
                })?
                .to_string();
            if new_uid != self.uid {
                // the handle opened above is dropped here, before the error
                // returns, so a retired job never leaks a descriptor
                return Err(Error::IdentityChanged {
                    path: self.filename.as_path().to_path_buf(),
                    expected: self.uid.clone(),
                    actual: new_uid,
                });
            }

            if self.next_offset != 0 {
                file.seek(SeekFrom::Start(self.next_offset))
                    .map_err(|e| Error::Seek {
                        path: self.filename.as_path().to_path_buf(),
                        offset: self.next_offset,
                        source: e,
                    })?;

                // reseed the line number from the delimiters before the
                // resume point; paid once, never during steady-state reads
                if self.current_line_number == 0 {
                    self.current_line_number =
                        line_count::count_lines_to(self.filename.as_path(), self.next_offset)
                            .map_err(|e| Error::LineCount {
                                path: self.filename.as_path().to_path_buf(),
                                source: e,
                            })?;
                }
            }

            self.file = Some(file);
        }

        self.change_status_to(JobStatus::Active);
        self.eof_count = 0;
        self.last_active_time = Some(Instant::now());
        Ok(())
    }

    /// Close the file handle if one is held. Safe to call repeatedly; close
    /// errors are never propagated.
    pub fn release(&mut self) {
        if self.file.take().is_some() {
            debug!(filename = ?self.filename, uid = %self.uid, "job released");
        }
    }

    /// Set both the working copy and the shared cell.
    pub fn change_status_to(&mut self, status: JobStatus) {
        self.status = status;
        self.cells.store_status(status);
    }

    /// Mark the job stopped. The handle stays open: a stopped job may be
    /// resumed.
    pub fn stop(&mut self) {
        self.change_status_to(JobStatus::Stop);
    }

    pub fn stop_immediately(&mut self) {
        self.change_status_to(JobStatus::StopImmediately);
    }

    pub fn delete(&mut self) {
        self.change_status_to(JobStatus::Delete);
        self.delete_time = Some(Instant::now());
    }

    /// Deleted means either the current status says so or the sticky
    /// delete timestamp was ever set; the status can be overwritten later
    /// while the timestamp remains a historical marker.
    pub fn is_delete(&self) -> bool {
        self.status == JobStatus::Delete || self.delete_time.is_some()
    }

    /// Record a new path for the tracked file (same identity, new name).
    pub fn rename_to(&mut self, new_filename: PathBuf) {
        let filename = Arc::new(new_filename);
        self.filename = filename.clone();
        self.cells.filename.store(filename);
        self.rename_time = Some(Instant::now());
    }

    pub fn is_rename(&self) -> bool {
        self.rename_time.is_some()
    }

    /// Reconcile the working copies of status and filename from the shared
    /// cells. Called by the holder at safe points between reads to observe
    /// changes signaled through a [`JobHandle`].
    pub fn sync(&mut self) {
        self.status = self.cells.load_status();
        self.filename = self.cells.filename.load_full();
    }

    /// Advance the resume point. A zero offset is ignored, so an unseeded
    /// checkpoint value can never rewind the cursor.
    pub fn set_next_offset(&mut self, offset: u64) {
        if offset > 0 {
            self.next_offset = offset;
        }
    }

    /// Record one end-of-file observation; reset by the next activation.
    pub fn mark_eof(&mut self) -> u32 {
        self.eof_count += 1;
        self.eof_count
    }

    /// Compute and cache the content fingerprint. A no-op success once set:
    /// the fingerprint is an identity aid for discovery-time deduplication
    /// and is never recomputed, even if the file content later changes.
    pub fn generate_identifier(&mut self) -> Result<()> {
        if self.identifier.is_some() {
            return Ok(());
        }

        let size = self.task.config().fingerprint_size;
        let digest = fingerprint::compute(self.filename.as_path(), size)?;
        self.identifier = Some(digest);
        Ok(())
    }

    /// Two jobs are logically the same file under the same watch scope:
    /// equal watch uid AND equal fingerprint. A job is always the same as
    /// itself by reference identity.
    pub fn is_same(&self, other: &Job) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.watch_uid() != other.watch_uid() {
            return false;
        }
        self.identifier == other.identifier
    }

    /// The open handle, for the reading actor that currently owns this job.
    /// `None` while the job is inactive.
    pub fn file_mut(&mut self) -> Option<&mut File> {
        self.file.as_mut()
    }

    /// Hand this job to the reader pool through the task's queue. Blocks
    /// while the queue is full, which is what throttles discovery when
    /// readers fall behind. On disconnect the job is handed back.
    pub fn enqueue(self) -> std::result::Result<(), Job> {
        let task = Arc::clone(&self.task);
        match task.job_sender().send_blocking(self) {
            Ok(()) => Ok(()),
            Err(Disconnected(job)) => {
                warn!(uid = %job.uid, "job hand-off queue disconnected");
                Err(job)
            }
        }
    }

    /// Turn one raw line into a positioned, uniquely-identified record and
    /// deliver it to the task's sink.
    ///
    /// `end_offset` is the byte offset of the line delimiter and `body` is
    /// exactly the bytes between the job's previous resume point and that
    /// delimiter; calls must follow file-read order, this is the single
    /// place offset bookkeeping happens.
    pub fn produce_event(&mut self, end_offset: u64, collect_time: DateTime<Utc>, body: &[u8]) {
        let next_offset = end_offset + 1;
        let content_bytes = body.len() as u64;
        let start_offset = end_offset - content_bytes;

        self.current_line_number += 1;
        self.current_lines += 1;
        self.end_offset = end_offset;
        self.next_offset = next_offset;

        let watch_uid = self.watch_uid();
        let offset_str = end_offset.to_string();
        let mut event_uid = String::with_capacity(watch_uid.len() + 1 + offset_str.len());
        event_uid.push_str(watch_uid);
        event_uid.push('-');
        event_uid.push_str(&offset_str);

        let state = State {
            epoch: self.task.epoch(),
            pipeline_name: self.task.pipeline_name().to_string(),
            source_name: self.task.source_name().to_string(),
            offset: start_offset,
            next_offset,
            line_number: self.current_line_number,
            filename: self.filename.display().to_string(),
            collect_time,
            // content plus the one delimiter byte
            content_bytes: content_bytes + 1,
            job_uid: self.uid.clone(),
            job_index: self.index,
            watch_uid: watch_uid.to_string(),
            event_uid,
        };

        let mut event = self.task.event_pool().get();
        event.fill(state, body);
        self.task.deliver(event);
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("uid", &self.uid)
            .field("index", &self.index)
            .field("filename", &self.filename)
            .field("status", &self.status)
            .field("next_offset", &self.next_offset)
            .field("current_line_number", &self.current_line_number)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::config::FileSourceConfig;
    use crate::source::event::LogEvent;
    use crate::source::task::EventSink;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    type Collected = Arc<Mutex<Vec<LogEvent>>>;

    fn collecting_task(config: FileSourceConfig) -> (Arc<WatchTask>, Collected) {
        let collected: Collected = Arc::new(Mutex::new(Vec::new()));
        let events = collected.clone();
        let sink: EventSink = Arc::new(move |event| {
            events.lock().unwrap().push(event);
        });
        let (task, _job_rx) = WatchTask::new("pipe", "src", 1, config, sink);
        (task, collected)
    }

    fn temp_log(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    fn job_for(task: &Arc<WatchTask>, file: &NamedTempFile) -> Job {
        let file_id = FileId::from_path(file.path()).unwrap();
        Job::new(task.clone(), file.path(), file_id)
    }

    #[test]
    fn test_index_unique_and_monotonic() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"x\n");

        let a = job_for(&task, &file);
        let b = job_for(&task, &file);
        assert!(b.index() > a.index());
        assert_ne!(a.index(), b.index());
    }

    #[test]
    fn test_watch_uid_cached() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"x\n");
        let job = job_for(&task, &file);

        let expected = format!("pipe:src:{}", job.uid());
        assert_eq!(job.watch_uid(), expected);
        assert_eq!(job.watch_uid(), expected);
    }

    #[test]
    fn test_set_next_offset_ignores_zero() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"x\n");
        let mut job = job_for(&task, &file);

        job.set_next_offset(0);
        assert_eq!(job.next_offset(), 0);

        job.set_next_offset(42);
        assert_eq!(job.next_offset(), 42);

        job.set_next_offset(0);
        assert_eq!(job.next_offset(), 42);
    }

    #[test]
    fn test_produce_event_positions() {
        let (task, collected) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"hello\nworld\n");
        let mut job = job_for(&task, &file);

        job.produce_event(5, Utc::now(), b"hello");

        assert_eq!(job.next_offset(), 6);
        assert_eq!(job.end_offset(), 5);
        assert_eq!(job.current_line_number(), 1);
        assert_eq!(job.current_lines(), 1);

        let events = collected.lock().unwrap();
        let state = events[0].state().unwrap();
        assert_eq!(state.offset, 0);
        assert_eq!(state.next_offset, 6);
        assert_eq!(state.content_bytes, 6);
        assert_eq!(state.line_number, 1);
        assert_eq!(state.event_uid, format!("{}-5", job.watch_uid()));
        assert_eq!(events[0].body(), b"hello");
    }

    #[test]
    fn test_produce_event_mid_file() {
        let (task, collected) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"0123456789\n");
        let mut job = job_for(&task, &file);

        job.produce_event(10, Utc::now(), b"hello");

        assert_eq!(job.next_offset(), 11);
        let events = collected.lock().unwrap();
        let state = events[0].state().unwrap();
        assert_eq!(state.offset, 5);
        assert_eq!(state.content_bytes, 6);
        assert_eq!(state.event_uid, format!("{}-10", job.watch_uid()));
    }

    #[test]
    fn test_activate_and_release() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"a\nb\n");
        let mut job = job_for(&task, &file);

        assert!(job.last_active_time().is_none());
        job.activate().unwrap();
        assert_eq!(job.status(), JobStatus::Active);
        assert!(job.file_mut().is_some());
        assert!(job.last_active_time().is_some());

        // stop leaves the handle open, release closes it, twice is fine
        job.stop();
        assert!(job.file_mut().is_some());
        job.release();
        assert!(job.file_mut().is_none());
        job.release();
        assert!(job.file_mut().is_none());
    }

    #[test]
    fn test_activate_resets_eof_count() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"a\n");
        let mut job = job_for(&task, &file);

        job.activate().unwrap();
        job.mark_eof();
        job.mark_eof();
        assert_eq!(job.eof_count(), 2);

        job.activate().unwrap();
        assert_eq!(job.eof_count(), 0);
    }

    #[test]
    fn test_activate_resume_recounts_lines() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"one\ntwo\nthree\nfour\n");
        let mut job = job_for(&task, &file);

        // resume inside line three: two delimiters before the offset
        job.set_next_offset(9);
        job.activate().unwrap();
        assert_eq!(job.current_line_number(), 2);
    }

    #[test]
    fn test_activate_resume_keeps_seeded_line_number() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"one\ntwo\nthree\n");
        let mut job = job_for(&task, &file);

        job.set_next_offset(8);
        job.produce_event(7, Utc::now(), b"two");
        job.release();

        // line number already seeded, activation must not recount
        let before = job.current_line_number();
        job.activate().unwrap();
        assert_eq!(job.current_line_number(), before);
    }

    #[test]
    fn test_activate_identity_mismatch_drops_handle() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"a\n");
        let mut job = Job::with_uid(task, file.path(), "999-999".to_string());

        match job.activate() {
            Err(Error::IdentityChanged { expected, .. }) => {
                assert_eq!(expected, "999-999");
            }
            other => panic!("expected IdentityChanged, got {:?}", other.map(|_| ())),
        }
        assert!(job.file_mut().is_none());
        assert_ne!(job.status(), JobStatus::Active);
    }

    #[test]
    fn test_activate_missing_file() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let mut job = Job::with_uid(task, "/nonexistent/filetail-test.log", "1-1".to_string());

        assert!(matches!(job.activate(), Err(Error::Open { .. })));
        assert!(job.file_mut().is_none());
    }

    #[test]
    fn test_delete_signals_stick() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"a\n");
        let mut job = job_for(&task, &file);

        assert!(!job.is_delete());
        job.delete();
        assert!(job.is_delete());
        assert_eq!(job.status(), JobStatus::Delete);

        // the status can be overwritten afterwards; the timestamp is sticky
        job.stop();
        assert!(job.is_delete());
    }

    #[test]
    fn test_rename_updates_both_copies() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"a\n");
        let mut job = job_for(&task, &file);
        let handle = job.handle();

        assert!(!job.is_rename());
        job.rename_to(PathBuf::from("/var/log/rotated.log"));
        assert!(job.is_rename());
        assert_eq!(job.filename(), Path::new("/var/log/rotated.log"));
        assert_eq!(*handle.filename(), PathBuf::from("/var/log/rotated.log"));
    }

    #[test]
    fn test_handle_signals_observed_at_sync() {
        let (task, _) = collecting_task(FileSourceConfig::default());
        let file = temp_log(b"a\n");
        let mut job = job_for(&task, &file);
        let handle = job.handle();

        job.activate().unwrap();
        assert_eq!(job.status(), JobStatus::Active);

        handle.stop();
        // not visible until the holder syncs
        assert_eq!(job.status(), JobStatus::Active);
        job.sync();
        assert_eq!(job.status(), JobStatus::Stop);

        handle.rename_to(PathBuf::from("/tmp/renamed.log"));
        job.sync();
        assert_eq!(job.filename(), Path::new("/tmp/renamed.log"));

        handle.stop_immediately();
        job.sync();
        assert_eq!(job.status(), JobStatus::StopImmediately);

        // a delete signaled through the handle flips only the status; the
        // holder still reports deleted without a local delete timestamp
        handle.delete();
        job.sync();
        assert_eq!(job.status(), JobStatus::Delete);
        assert!(job.is_delete());
    }

    #[test]
    fn test_generate_identifier_threshold_and_cache() {
        let mut config = FileSourceConfig::default();
        config.fingerprint_size = 16;
        let (task, _) = collecting_task(config);

        let file = temp_log(b"tiny");
        let mut job = job_for(&task, &file);

        assert!(matches!(
            job.generate_identifier(),
            Err(Error::FingerprintTooSmall { .. })
        ));
        assert!(job.identifier().is_none());

        // grow the file past the prefix, then it fingerprints
        let mut f = std::fs::OpenOptions::new()
            .append(true)
            .open(file.path())
            .unwrap();
        f.write_all(b" but now it is long enough\n").unwrap();
        f.flush().unwrap();

        job.generate_identifier().unwrap();
        let first = job.identifier().unwrap().to_string();

        // rewrite the prefix entirely; the cached identifier must not move
        std::fs::write(file.path(), b"completely different content here\n").unwrap();
        job.generate_identifier().unwrap();
        assert_eq!(job.identifier().unwrap(), first);
    }

    #[test]
    fn test_is_same() {
        let mut config = FileSourceConfig::default();
        config.fingerprint_size = 16;
        let (task, _) = collecting_task(config);

        let file = temp_log(b"the same file content, long enough\n");
        let mut a = job_for(&task, &file);
        let mut b = job_for(&task, &file);

        // reference identity short-circuits
        let a_ref = &a;
        assert!(a_ref.is_same(a_ref));

        a.generate_identifier().unwrap();
        b.generate_identifier().unwrap();
        assert!(a.is_same(&b));
        assert!(b.is_same(&a));

        // same watch scope, different fingerprint
        let other = temp_log(b"other file content that is different\n");
        let mut c = job_for(&task, &other);
        c.generate_identifier().unwrap();
        assert!(!a.is_same(&c));

        // same fingerprint, different watch scope
        let sink: EventSink = Arc::new(|_| {});
        let (other_task, _rx) = {
            let mut config = FileSourceConfig::default();
            config.fingerprint_size = 16;
            WatchTask::new("pipe", "other-src", 1, config, sink)
        };
        let file_id = FileId::from_path(file.path()).unwrap();
        let mut d = Job::new(other_task, file.path(), file_id);
        d.generate_identifier().unwrap();
        assert!(!a.is_same(&d));
    }

    #[test]
    fn test_enqueue_hands_job_to_queue() {
        let sink: EventSink = Arc::new(|_| {});
        let (task, job_rx) = WatchTask::new("pipe", "src", 1, FileSourceConfig::default(), sink);
        let file = temp_log(b"a\n");
        let job = job_for(&task, &file);
        let uid = job.uid().to_string();

        job.enqueue().unwrap();
        let received = job_rx.try_recv().unwrap();
        assert_eq!(received.uid(), uid);
    }

    #[test]
    fn test_enqueue_returns_job_on_disconnect() {
        let sink: EventSink = Arc::new(|_| {});
        let (task, job_rx) = WatchTask::new("pipe", "src", 1, FileSourceConfig::default(), sink);
        drop(job_rx);

        let file = temp_log(b"a\n");
        let job = job_for(&task, &file);
        let uid = job.uid().to_string();

        let returned = job.enqueue().unwrap_err();
        assert_eq!(returned.uid(), uid);
    }
}
