//! Collection geometry, computed before any table is placed.

use log::debug;

use crate::{Error, Result, directory::TableDirectory};

/// `ttcf` + major/minor version + numFonts.
pub const COLLECTION_HEADER_LEN: u32 = 12;

/// Where each part of a collection goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Collection header plus the directory offset array.
    pub header_size: u32,
    /// Offset of each font's sfnt header and table directory, in input order.
    pub directory_offsets: Vec<u32>,
    /// First byte after the last directory; the first table goes here.
    pub body_start: u32,
    /// Table records across all fonts.
    pub total_tables: usize,
}

impl LayoutPlan {
    pub fn compute(directories: &[TableDirectory]) -> Result<Self> {
        Self::from_table_counts(directories.iter().map(TableDirectory::num_tables))
    }

    pub fn from_table_counts(counts: impl IntoIterator<Item = u16>) -> Result<Self> {
        let counts: Vec<u16> = counts.into_iter().collect();
        if counts.is_empty() {
            return Err(Error::NoFonts);
        }

        let header_size = u32::try_from(counts.len())
            .ok()
            .and_then(|n| n.checked_mul(4))
            .and_then(|n| n.checked_add(COLLECTION_HEADER_LEN))
            .ok_or(Error::OffsetOverflow)?;

        let mut cursor = header_size;
        let mut directory_offsets = Vec::with_capacity(counts.len());
        for &count in &counts {
            directory_offsets.push(cursor);
            let block = 12 + u32::from(count) * 16;
            cursor = cursor.checked_add(block).ok_or(Error::OffsetOverflow)?;
        }

        let total_tables = counts.iter().map(|&c| usize::from(c)).sum();
        debug!(
            "Layout: {} fonts, {total_tables} table records, header {header_size} bytes, body at {cursor}",
            counts.len()
        );

        Ok(Self { header_size, directory_offsets, body_start: cursor, total_tables })
    }

    pub fn font_count(&self) -> usize {
        self.directory_offsets.len()
    }
}
