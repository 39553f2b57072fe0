// SPDX-License-Identifier: Apache-2.0

//! Content fingerprint: a hex-encoded SHA-256 digest of the first N bytes of
//! a file, used by discovery to recognize a file by content across rescans
//! (e.g. after rotation). It is an identity aid, not an integrity check.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::source::error::{Error, Result};

/// Digest exactly `size` bytes from the start of the file at `path`.
///
/// Fails with [`Error::FingerprintTooSmall`] while the file is shorter than
/// `size`; the caller should defer and retry once the file has grown.
pub fn compute(path: &Path, size: usize) -> Result<String> {
    let metadata = std::fs::metadata(path).map_err(|e| Error::Stat {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file_size = metadata.len();
    if file_size < size as u64 {
        return Err(Error::FingerprintTooSmall {
            size: file_size,
            required: size as u64,
        });
    }

    let mut file = File::open(path).map_err(|e| Error::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut buf = vec![0u8; size];
    let mut read = 0;
    while read < size {
        let n = file.read(&mut buf[read..]).map_err(|e| Error::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        read += n;
    }
    if read < size {
        return Err(Error::FingerprintShortRead {
            read,
            required: size,
        });
    }

    Ok(hex::encode(Sha256::digest(&buf)))
}
