// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Count line delimiters in the first `limit` bytes of the file at `path`.
///
/// Used to reseed the line number when a job resumes at a non-zero offset
/// with an unseeded counter. O(limit), paid once at activation and never
/// during steady-state reading.
pub fn count_lines_to(path: &Path, limit: u64) -> io::Result<u64> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(64 * 1024, file.take(limit));

    let mut count = 0u64;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        count += buf.iter().filter(|&&b| b == b'\n').count() as u64;
        let len = buf.len();
        reader.consume(len);
    }
    Ok(count)
}
