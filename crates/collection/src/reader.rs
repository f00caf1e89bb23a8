//! Loading input fonts and reading big-endian integers out of them.

use std::{
    fs::read,
    ops::Deref,
    path::{Path, PathBuf},
};

use read_fonts::FontData;

use crate::{Error, Result};

/// The raw bytes of one input font, kept alive for the whole merge.
#[derive(Debug, Clone)]
pub struct FontBuffer {
    path: PathBuf,
    data: Vec<u8>,
}

impl FontBuffer {
    /// Wrap bytes that did not come from disk (tests, pipelines).
    pub fn from_bytes(name: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        Self { path: name.into(), data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Deref for FontBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for FontBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Read a whole font file into memory.
pub fn load(path: impl AsRef<Path>) -> Result<FontBuffer> {
    let path = path.as_ref();
    let data = read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    log::debug!("Loaded {} ({} bytes)", path.display(), data.len());
    Ok(FontBuffer { path: path.to_path_buf(), data })
}

pub fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    FontData::new(data)
        .read_at::<u16>(offset)
        .map_err(|_| out_of_bounds(data, offset, 2))
}

pub fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    FontData::new(data)
        .read_at::<u32>(offset)
        .map_err(|_| out_of_bounds(data, offset, 4))
}

fn out_of_bounds(data: &[u8], offset: usize, width: usize) -> Error {
    Error::OutOfBounds { offset, width, len: data.len() }
}
