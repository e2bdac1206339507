use thiserror::Error;

/// Fatal configuration problems, rejected before any work is scheduled.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("truncated archive is empty (0 bytes)")]
    EmptyInput,

    #[error("missing byte count must be at least 1")]
    NoMissingBytes,

    #[error("worker count must be at least 1")]
    NoWorkers,
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive has no entries")]
    NoEntries,

    #[error("invalid archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
