use std::io::{Cursor, Write};

use sha2::{Digest, Sha256};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// In-memory archive with one stored (uncompressed) entry.
pub fn stored_archive(name: &str, content: &[u8]) -> Vec<u8> {
    build_archive(&[(name, content)], CompressionMethod::Stored, None)
}

/// In-memory archive with one deflated entry.
#[allow(dead_code)]
pub fn deflated_archive(name: &str, content: &[u8]) -> Vec<u8> {
    build_archive(&[(name, content)], CompressionMethod::Deflated, None)
}

/// In-memory archive carrying a trailing end-of-directory comment.
#[allow(dead_code)]
pub fn commented_archive(name: &str, content: &[u8], comment: &str) -> Vec<u8> {
    build_archive(&[(name, content)], CompressionMethod::Stored, Some(comment))
}

#[allow(dead_code)]
pub fn multi_entry_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    build_archive(entries, CompressionMethod::Stored, None)
}

fn build_archive(
    entries: &[(&str, &[u8])],
    method: CompressionMethod,
    comment: Option<&str>,
) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    if let Some(comment) = comment {
        writer.set_comment(comment);
    }

    let options = FileOptions::default().compression_method(method);
    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
