//! # Info
//!
//! Reports what a file is without changing anything. A container (by
//! `.cslx` extension or by magic) is summarized from its header alone; the
//! payload is never read or decompressed. Any other file is hashed in a
//! single streaming pass.
//!
//! [`read_header`] is the header-only path on its own, for callers that
//! need the stored digest before committing to a full unpack.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csl_core::Sha256Accumulator;

use crate::error::{FormatError, PackError};
use crate::format::{self, ContainerHeader, MAX_HEADER_LEN};
use crate::fsio;
use crate::report::{ContainerSummary, InfoReport, RawFileSummary};

/// Describe the file at `path`.
pub fn info(path: &Path) -> Result<InfoReport, PackError> {
    let (mut file, file_len, head) = open_with_head(path)?;

    if format::has_container_extension(path) || format::has_magic(&head) {
        let header = checked_header(path, &head, file_len)?;
        return Ok(InfoReport::Container(ContainerSummary::from_header(
            path, &header,
        )));
    }

    let mut acc = Sha256Accumulator::new();
    acc.update(&head);
    io::copy(&mut file, &mut acc).map_err(|e| PackError::from_read(path, e))?;
    let size = acc.len();
    let digest = acc.finalize();
    tracing::debug!(path = %path.display(), size, "hashed raw file");

    Ok(InfoReport::Raw(RawFileSummary {
        path: path.to_path_buf(),
        size,
        algorithm: digest.algorithm.to_string(),
        digest: digest.to_hex(),
    }))
}

/// Read the header of the container at `path` and check that the file
/// length matches it. The payload is not read.
pub fn read_header(path: &Path) -> Result<ContainerHeader, PackError> {
    let (_, file_len, head) = open_with_head(path)?;
    checked_header(path, &head, file_len)
}

/// Open `path` and read up to [`MAX_HEADER_LEN`] bytes from its start.
fn open_with_head(path: &Path) -> Result<(File, u64, Vec<u8>), PackError> {
    let read_err = |e: io::Error| PackError::from_read(path, e);

    let mut file = fsio::open_file(path)?;
    let file_len = file.metadata().map_err(read_err)?.len();

    let mut head = Vec::with_capacity(MAX_HEADER_LEN.min(file_len as usize));
    (&mut file)
        .take(MAX_HEADER_LEN as u64)
        .read_to_end(&mut head)
        .map_err(read_err)?;
    Ok((file, file_len, head))
}

fn checked_header(path: &Path, head: &[u8], file_len: u64) -> Result<ContainerHeader, PackError> {
    let (header, header_len) = ContainerHeader::decode(head)?;
    let declared = header.container_len().ok_or(FormatError::LengthMismatch {
        declared: u64::MAX,
        actual: file_len,
    })?;
    if declared != file_len {
        return Err(FormatError::LengthMismatch {
            declared,
            actual: file_len,
        }
        .into());
    }
    tracing::debug!(
        path = %path.display(),
        header_len,
        payload_len = header.payload_len,
        "read container header"
    );
    Ok(header)
}
