//! Error taxonomy.
//!
//! Two tiers, matching how the tool recovers:
//! - [`SpecError`]: bad pattern on the command line. Fatal; reported before
//!   any file is touched.
//! - [`FileError`]: something went wrong with one file. Recoverable; the
//!   batch reports it, flips the failure flag, and moves on.

use std::path::PathBuf;

use thiserror::Error;

/// Pattern compilation failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("unknown field code `%{0}` in pattern")]
    UnknownField(char),
}

/// Per-file failure. None of these abort the batch.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot open: {0}")]
    Open(std::io::Error),

    #[error("filename does not match pattern `{0}`")]
    NoMatch(String),

    /// Writing ID3 into this container is known to corrupt it, so the save
    /// is refused before any bytes are written.
    #[error("refusing to save tags into a .{0} container")]
    SaveRefused(String),

    #[error("cannot save tags: {0}")]
    Save(id3::Error),

    #[error("rename target already exists: {}", .0.display())]
    Collision(PathBuf),

    #[error("rename failed: {0}")]
    Rename(std::io::Error),
}
