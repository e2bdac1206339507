mod common;

use common::{deflated_archive, multi_entry_archive, sha256_hex, stored_archive};

use zipmend::error::ArchiveError;
use zipmend::types::ExpectedDigest;
use zipmend::validator::{check_candidate, inspect_first_entry};

const CONTENT: &[u8] = b"ABCDEFGHIJ";

#[test]
fn test_accepts_stored_entry_with_matching_digest() {
    let archive = stored_archive("data.txt", CONTENT);
    let expected = ExpectedDigest::new(sha256_hex(CONTENT));

    assert!(check_candidate(&archive, &expected));
}

#[test]
fn test_accepts_deflated_entry_with_matching_digest() {
    let archive = deflated_archive("data.txt", CONTENT);
    let expected = ExpectedDigest::new(sha256_hex(CONTENT));

    assert!(check_candidate(&archive, &expected));
}

#[test]
fn test_digest_comparison_is_case_insensitive() {
    let archive = stored_archive("data.txt", CONTENT);
    let expected = ExpectedDigest::new(sha256_hex(CONTENT).to_uppercase());

    assert!(check_candidate(&archive, &expected));
}

#[test]
fn test_rejects_digest_differing_in_one_character() {
    let archive = stored_archive("data.txt", CONTENT);

    let mut digest = sha256_hex(CONTENT);
    let flipped = if digest.starts_with('0') { "1" } else { "0" };
    digest.replace_range(0..1, flipped);
    let expected = ExpectedDigest::new(digest);

    assert!(!check_candidate(&archive, &expected));
}

#[test]
fn test_malformed_digest_never_matches() {
    let archive = stored_archive("data.txt", CONTENT);

    let truncated_hex = ExpectedDigest::new(&sha256_hex(CONTENT)[..63]);
    assert!(!truncated_hex.is_well_formed());
    assert!(!check_candidate(&archive, &truncated_hex));

    let not_hex = ExpectedDigest::new("z".repeat(64));
    assert!(!not_hex.is_well_formed());
    assert!(!check_candidate(&archive, &not_hex));
}

#[test]
fn test_rejects_garbage_bytes() {
    let expected = ExpectedDigest::new(sha256_hex(CONTENT));

    assert!(!check_candidate(b"this is not a zip archive", &expected));
    assert!(!check_candidate(&[], &expected));
}

#[test]
fn test_rejects_truncated_archive() {
    let archive = stored_archive("data.txt", CONTENT);
    let expected = ExpectedDigest::new(sha256_hex(CONTENT));

    let truncated = &archive[..archive.len() - 4];
    assert!(!check_candidate(truncated, &expected));
}

#[test]
fn test_rejects_archive_without_entries() {
    let empty = multi_entry_archive(&[]);
    let expected = ExpectedDigest::new(sha256_hex(CONTENT));

    assert!(!check_candidate(&empty, &expected));
    assert!(matches!(
        inspect_first_entry(&empty),
        Err(ArchiveError::NoEntries)
    ));
}

#[test]
fn test_rejects_corrupted_entry_content() {
    let mut archive = stored_archive("data.txt", CONTENT);

    // flip one byte of the stored entry data; the reconstruction still
    // parses but the entry's CRC-32 no longer matches
    let pos = archive
        .windows(CONTENT.len())
        .position(|window| window == CONTENT)
        .unwrap();
    archive[pos] ^= 0xFF;

    let mut mangled = CONTENT.to_vec();
    mangled[0] ^= 0xFF;
    let expected = ExpectedDigest::new(sha256_hex(&mangled));

    assert!(!check_candidate(&archive, &expected));
}

#[test]
fn test_first_entry_is_the_verification_target() {
    let archive = multi_entry_archive(&[("first.txt", CONTENT), ("second.txt", b"other data")]);

    let first = ExpectedDigest::new(sha256_hex(CONTENT));
    let second = ExpectedDigest::new(sha256_hex(b"other data"));

    assert!(check_candidate(&archive, &first));
    assert!(!check_candidate(&archive, &second));
}

#[test]
fn test_inspect_first_entry_reports_name_and_digest() {
    let archive = stored_archive("payload.bin", CONTENT);

    let entry = inspect_first_entry(&archive).unwrap();
    assert_eq!(entry.name, "payload.bin");
    assert_eq!(entry.sha256, sha256_hex(CONTENT));
}
