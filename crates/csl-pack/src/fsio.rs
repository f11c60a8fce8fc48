//! # File I/O Helpers
//!
//! Reading maps `NotFound` to [`PackError::NotFound`] and everything else to
//! [`PackError::Read`]. Writing goes through a hidden sibling temp file and a
//! rename, so a destination either keeps its old contents or receives the
//! complete new ones.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::PackError;

/// Read a whole file.
pub fn read_file(path: &Path) -> Result<Vec<u8>, PackError> {
    fs::read(path).map_err(|e| PackError::from_read(path, e))
}

/// Open a file for reading.
pub fn open_file(path: &Path) -> Result<File, PackError> {
    File::open(path).map_err(|e| PackError::from_read(path, e))
}

/// Replace `path` with `bytes` using write-fsync-rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PackError> {
    let write_err = |e: io::Error| PackError::Write {
        path: path.to_path_buf(),
        source: e,
    };
    let (mut file, temp_path) = create_temp_sibling(path).map_err(write_err)?;

    let result = (|| -> io::Result<()> {
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(e));
    }
    Ok(())
}

/// `path` with `suffix` appended to its final component.
///
/// `a.txt` + `.cslx` gives `a.txt.cslx`; unlike `Path::with_extension`
/// nothing is replaced.
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

/// Create a fresh hidden temp file next to `path`.
///
/// Opened with `create_new`, so an existing file is never truncated; a taken
/// name moves on to the next attempt number.
fn create_temp_sibling(path: &Path) -> io::Result<(File, PathBuf)> {
    let pid = std::process::id();
    for attempt in 0..TEMP_ATTEMPTS {
        let temp_path = temp_sibling(path, pid, attempt);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
        {
            Ok(file) => return Ok((file, temp_path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free temp file name next to {}", path.display()),
    ))
}

const TEMP_ATTEMPTS: u32 = 64;

fn temp_sibling(path: &Path, pid: u32, attempt: u32) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| path.as_os_str()));
    name.push(format!(".{pid}-{attempt}.csl-tmp"));
    path.with_file_name(name)
}
