use std::{io, path::PathBuf, result};

use read_fonts::types::Tag;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write collection: {0}")]
    Write(#[from] io::Error),

    #[error("read of {width} bytes at offset {offset} overruns {len}-byte buffer")]
    OutOfBounds { offset: usize, width: usize, len: usize },

    #[error("table directory of {num_tables} records needs {needed} bytes, font has {len}")]
    TruncatedDirectory { num_tables: u16, needed: usize, len: usize },

    #[error("table '{tag}' at offset {offset} with length {length} overruns {len}-byte font")]
    TableOutOfBounds { tag: Tag, offset: u32, length: u32, len: usize },

    #[error("no fonts provided for the collection")]
    NoFonts,

    #[error("collection does not fit 32-bit offsets")]
    OffsetOverflow,

    #[error("tables share digest {digest} but their bytes differ")]
    DigestCollision { digest: String },

    #[error("not a font collection: signature '{0}'")]
    NotACollection(Tag),

    #[error("wrote {actual} bytes where the layout expected {expected}")]
    LayoutMismatch { expected: u64, actual: u64 },
}

impl Error {
    /// Whether the error comes from malformed input rather than I/O.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::OutOfBounds { .. }
                | Error::TruncatedDirectory { .. }
                | Error::TableOutOfBounds { .. }
                | Error::NotACollection(_)
        )
    }
}

pub type Result<T> = result::Result<T, Error>;
