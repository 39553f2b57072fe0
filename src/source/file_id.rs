// SPDX-License-Identifier: Apache-2.0

//! Platform-independent file identity based on inode (Unix) or file index
//! (Windows).
//!
//! The inode/file index is stable across renames, so the identity survives
//! log rotation. It is NOT stable across file recreation: a deleted and
//! recreated path gets a new identity.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

/// A unique identifier for a physical file, independent of its path.
///
/// On Unix this is the device ID + inode number; on Windows the volume
/// serial number + file index. Its textual form, `"<inode>-<device>"`, is
/// the job uid carried on every emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    /// Device ID (Unix) or volume serial number (Windows)
    dev: u64,
    /// Inode number (Unix) or file index (Windows)
    ino: u64,
}

impl FileId {
    pub fn new(dev: u64, ino: u64) -> Self {
        Self { dev, ino }
    }

    /// Derive the identity from an open file handle.
    #[cfg(unix)]
    pub fn from_file(file: &File) -> io::Result<Self> {
        use std::os::unix::fs::MetadataExt;

        let metadata = file.metadata()?;
        Ok(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    /// Derive the identity from an open file handle.
    #[cfg(windows)]
    pub fn from_file(file: &File) -> io::Result<Self> {
        use std::os::windows::io::AsRawHandle;
        use windows_sys::Win32::Foundation::HANDLE;
        use windows_sys::Win32::Storage::FileSystem::{
            GetFileInformationByHandle, BY_HANDLE_FILE_INFORMATION,
        };

        let handle = file.as_raw_handle() as HANDLE;
        let mut info: BY_HANDLE_FILE_INFORMATION = unsafe { std::mem::zeroed() };

        let result = unsafe { GetFileInformationByHandle(handle, &mut info) };
        if result == 0 {
            return Err(io::Error::last_os_error());
        }

        let file_index = ((info.nFileIndexHigh as u64) << 32) | (info.nFileIndexLow as u64);

        Ok(Self {
            dev: info.dwVolumeSerialNumber as u64,
            ino: file_index,
        })
    }

    /// Derive the identity from a path by opening the file.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::from_file(&file)
    }

    pub fn dev(&self) -> u64 {
        self.dev
    }

    pub fn ino(&self) -> u64 {
        self.ino
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.ino, self.dev)
    }
}

/// Build the watch scope id: `pipeline:source:uid`.
///
/// The same physical file watched by two different pipeline/source pairs is
/// tracked as two independent logical jobs; the watch scope is what keeps
/// them apart.
pub fn watch_job_id(pipeline_name: &str, source_name: &str, job_uid: &str) -> String {
    let mut id = String::with_capacity(pipeline_name.len() + source_name.len() + job_uid.len() + 2);
    id.push_str(pipeline_name);
    id.push(':');
    id.push_str(source_name);
    id.push(':');
    id.push_str(job_uid);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_same_file_same_id_across_paths() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"identity test").unwrap();
        file.flush().unwrap();

        let id1 = FileId::from_path(file.path()).unwrap();

        // a hard link is the same inode under a different name
        let link = file.path().with_extension("lnk");
        std::fs::hard_link(file.path(), &link).unwrap();
        let id2 = FileId::from_path(&link).unwrap();
        std::fs::remove_file(&link).unwrap();

        assert_eq!(id1, id2);
        assert_eq!(id1.to_string(), id2.to_string());
    }

    #[test]
    fn test_different_files_different_ids() {
        let file1 = NamedTempFile::new().unwrap();
        let file2 = NamedTempFile::new().unwrap();

        let id1 = FileId::from_path(file1.path()).unwrap();
        let id2 = FileId::from_path(file2.path()).unwrap();

        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_stable_across_append() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"before").unwrap();
        file.flush().unwrap();

        let id1 = FileId::from_path(file.path()).unwrap();

        let mut f = std::fs::OpenOptions::new()
            .append(true)
            .open(file.path())
            .unwrap();
        f.write_all(b" after").unwrap();
        f.flush().unwrap();

        let id2 = FileId::from_path(file.path()).unwrap();
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_uid_format() {
        let id = FileId::new(123, 456);
        assert_eq!(id.to_string(), "456-123");
    }

    #[test]
    fn test_watch_job_id_scopes() {
        let uid = "456-123";
        let a = watch_job_id("pipe", "src", uid);
        assert_eq!(a, "pipe:src:456-123");

        // different pipeline/source pairs over the same file id must differ
        let b = watch_job_id("pipe", "other", uid);
        let c = watch_job_id("other", "src", uid);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }
}
