/// SHA-256 digest the recovered entry's content must hash to.
///
/// The caller-supplied hex string is decoded once at construction. A string
/// that is not exactly 64 hex characters decodes to `None` and can never
/// match; comparison against raw digest bytes makes the match
/// case-insensitive without per-candidate string work.
#[derive(Debug, Clone)]
pub struct ExpectedDigest {
    text: String,
    raw: Option<[u8; 32]>,
}

impl ExpectedDigest {
    pub fn new(hex_digest: impl Into<String>) -> Self {
        let text = hex_digest.into();
        let raw = hex::decode(&text)
            .ok()
            .and_then(|bytes| <[u8; 32]>::try_from(bytes).ok());
        Self { text, raw }
    }

    /// Whether the supplied string decodes to a full 256-bit digest.
    pub fn is_well_formed(&self) -> bool {
        self.raw.is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn matches(&self, digest: &[u8]) -> bool {
        match &self.raw {
            Some(raw) => raw[..] == *digest,
            None => false,
        }
    }
}

/// Terminal result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(RecoveredArchive),
    NotFound,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// A reconstruction that passed structural, integrity and digest checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredArchive {
    /// The trailing bytes the search recovered.
    pub suffix: Vec<u8>,
    /// The full archive, truncated input plus recovered suffix.
    pub bytes: Vec<u8>,
}
