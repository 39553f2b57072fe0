// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the file source. All are file-scoped: the job never
/// retries internally, and every failure is returned to the reading actor,
/// which owns retry/backoff/abandon policy.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to stat {path:?}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to seek {path:?} to offset {offset}: {source}")]
    Seek {
        path: PathBuf,
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("failed to recount lines in {path:?}: {source}")]
    LineCount {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path now refers to a different underlying file (rotation,
    /// truncation, recreation). The job no longer tracks a valid file and
    /// must be retired by the caller.
    #[error("file identity for {path:?} changed from {expected} to {actual}")]
    IdentityChanged {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// The file is still shorter than the configured fingerprint prefix.
    /// Not permanent: defer and retry once the file has grown.
    #[error("file size is smaller than the fingerprint prefix: {size} < {required}")]
    FingerprintTooSmall { size: u64, required: u64 },

    #[error("short read while fingerprinting: {read} < {required}")]
    FingerprintShortRead { read: usize, required: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
