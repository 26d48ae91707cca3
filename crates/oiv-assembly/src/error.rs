use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("invalid youtube link kind '{0}', expected 'user' or 'channel'")]
    InvalidYoutubeLinkKind(String),

    #[error("author `youtube` requires `youtube_link_kind`")]
    MissingYoutubeLinkKind,

    #[error("author `youtube_link_kind` requires `youtube`")]
    MissingYoutube,

    #[error("invalid color '{0}', expected 8 hex digits in AARRGGBB order")]
    InvalidColor(String),

    #[error("i/o error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

pub type AssemblyResult<T> = Result<T, AssemblyError>;
