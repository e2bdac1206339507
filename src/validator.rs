//! Per-candidate validation: structural parse, whole-archive integrity,
//! first-entry extraction, digest comparison.

use std::io::{Cursor, Read};

use sha2::{Digest, Sha256};
use zip::ZipArchive;

use crate::error::ArchiveError;
use crate::types::ExpectedDigest;

/// Decides whether `bytes` is the correct full reconstruction.
///
/// Each step short-circuits to a plain reject. Rejection is the expected
/// outcome for almost every candidate, so nothing here builds an error value
/// or retains a buffer past the call. Reading an entry to its end drives the
/// reader's CRC-32 check, so one pass over all entries doubles as the
/// archive's integrity test.
pub fn check_candidate(bytes: &[u8], expected: &ExpectedDigest) -> bool {
    let Ok(mut archive) = ZipArchive::new(Cursor::new(bytes)) else {
        return false;
    };

    if archive.len() == 0 {
        return false;
    }

    let mut first_content = Vec::new();
    let mut scratch = Vec::new();

    for index in 0..archive.len() {
        let Ok(mut entry) = archive.by_index(index) else {
            return false;
        };

        // entry 0 is the verification target; the rest are integrity-only
        let sink = if index == 0 {
            &mut first_content
        } else {
            &mut scratch
        };
        sink.clear();

        if entry.read_to_end(sink).is_err() {
            return false;
        }
    }

    let digest = Sha256::digest(&first_content);
    expected.matches(digest.as_slice())
}

/// First stored entry of a valid archive, as the search would verify it.
#[derive(Debug, Clone)]
pub struct FirstEntry {
    pub name: String,
    pub sha256: String,
}

/// Opens an intact archive and reports the name and content digest of its
/// first entry. Unlike [`check_candidate`] this surfaces failures, since the
/// caller expects the input to be valid.
pub fn inspect_first_entry(bytes: &[u8]) -> Result<FirstEntry, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    if archive.len() == 0 {
        return Err(ArchiveError::NoEntries);
    }

    let mut entry = archive.by_index(0)?;
    let mut content = Vec::new();
    entry.read_to_end(&mut content)?;

    Ok(FirstEntry {
        name: entry.name().to_string(),
        sha256: hex::encode(Sha256::digest(&content)),
    })
}
