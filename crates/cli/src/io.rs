//! Shared font I/O utilities.

use std::{
    fs::create_dir_all,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use font_collection::{FontBuffer, load};
use log::debug;
use tempfile::{Builder, NamedTempFile};

/// A font file handle for I/O operations.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read font data from the file.
    pub fn read(&self) -> Result<FontBuffer> {
        load(&self.path).with_context(|| format!("Failed to read font: {}", self.path.display()))
    }

    /// Stream data into the file through `f`.
    ///
    /// Output goes to a uniquely named temporary file next to the target,
    /// which replaces the target only once `f` succeeds. On failure the
    /// temporary file is dropped and the target is left untouched.
    pub fn write_with<T>(
        &self,
        f: impl FnOnce(&mut BufWriter<NamedTempFile>) -> Result<T>,
    ) -> Result<T> {
        self.ensure_parent_dir()?;
        let temp = Builder::new()
            .prefix(".fontglue-")
            .suffix(".tmp")
            .tempfile_in(self.dir())
            .with_context(|| format!("Failed to create temporary file in {}", self.dir().display()))?;
        debug!("Writing {} via {}", self.path.display(), temp.path().display());

        let mut writer = BufWriter::new(temp);
        let value = f(&mut writer)?;
        let temp = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .with_context(|| format!("Failed to write font: {}", self.path.display()))?;
        temp.as_file()
            .sync_all()
            .with_context(|| format!("Failed to write font: {}", self.path.display()))?;
        temp.persist(&self.path)
            .with_context(|| format!("Failed to write font: {}", self.path.display()))?;
        Ok(value)
    }

    /// Directory the file lives in; `.` for a bare file name.
    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    /// Create parent directory if it doesn't exist.
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }
}

impl AsRef<Path> for FontFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

pub fn read_font(path: impl AsRef<Path>) -> Result<FontBuffer> {
    FontFile::new(path.as_ref()).read()
}
