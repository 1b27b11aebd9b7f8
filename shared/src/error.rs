use std::path::PathBuf;

use thiserror::Error;

/// Everything a command can refuse to do. The `Display` strings double as the
/// user-facing rejection messages, the handler sends them back verbatim.
#[derive(Debug, Error)]
pub enum GobError {
    #[error("{0} is already in the list")]
    GameAlreadyExists(String),
    #[error("{0} is not in the list")]
    GameNotFound(String),
    #[error("game name cannot be empty")]
    EmptyGameName,
    #[error("preference `{0}` not recognized, valid preferences are: wontplay, dontown, prefnot, nopref, wantplay, clear")]
    PreferenceNotRecognized(String),
    #[error("player count {min}-{max} is not a valid range, expected 1 <= min <= max")]
    InvalidPlayerRange { min: i64, max: i64 },
    #[error("nobody to suggest for")]
    NoParticipants,
    #[error("you already have a rating menu open, finish that one first")]
    MenuAlreadyActive,
    #[error("could not load data file {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("data file {} uses unsupported format version {version}", path.display())]
    UnsupportedVersion { path: PathBuf, version: u32 },
    #[error("something went wrong saving your data, recent changes may not survive a restart")]
    Persistence(#[source] std::io::Error),
}
