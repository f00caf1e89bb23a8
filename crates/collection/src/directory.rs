//! Table directory parsing
//!
//! An sfnt starts with a 12-byte header (sfnt version, numTables,
//! searchRange, entrySelector, rangeShift) followed by one 16-byte record
//! per table. Nothing here copies table bytes; records and table data are
//! views into the caller's buffer.

use read_fonts::types::Tag;

use crate::{
    Error, Result,
    reader::{read_u16, read_u32},
};

pub const SFNT_HEADER_LEN: usize = 12;
pub const TABLE_RECORD_LEN: usize = 16;

/// One entry of a font's table directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

/// Number of tables declared by the sfnt header at the start of `data`.
pub fn table_count(data: &[u8]) -> Result<u16> {
    read_u16(data, 4)
}

/// Read the `index`th record of the directory at the start of `data`.
pub fn table_record(data: &[u8], index: usize) -> Result<TableRecord> {
    read_record(data, SFNT_HEADER_LEN + index * TABLE_RECORD_LEN)
}

fn read_record(data: &[u8], pos: usize) -> Result<TableRecord> {
    Ok(TableRecord {
        tag: Tag::from_u32(read_u32(data, pos)?),
        checksum: read_u32(data, pos + 4)?,
        offset: read_u32(data, pos + 8)?,
        length: read_u32(data, pos + 12)?,
    })
}

/// A bounds-checked view of one font's table directory.
///
/// The directory may start at a non-zero `base`, as it does inside a
/// collection. Table offsets are always relative to the start of `data`.
#[derive(Copy, Clone, Debug)]
pub struct TableDirectory<'a> {
    data: &'a [u8],
    base: usize,
    num_tables: u16,
}

impl<'a> TableDirectory<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        Self::at(data, 0)
    }

    /// Parse the directory whose sfnt header starts at `base`.
    ///
    /// Fails unless the header and every record fit in `data`.
    pub fn at(data: &'a [u8], base: usize) -> Result<Self> {
        let num_tables = read_u16(data, base + 4)?;
        let needed = base + directory_len(num_tables);
        if needed > data.len() {
            return Err(Error::TruncatedDirectory { num_tables, needed, len: data.len() });
        }
        Ok(Self { data, base, num_tables })
    }

    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }

    /// The 12 header bytes, copied verbatim into a collection.
    pub fn sfnt_header(&self) -> &'a [u8] {
        &self.data[self.base..self.base + SFNT_HEADER_LEN]
    }

    pub fn sfnt_version(&self) -> Tag {
        let h = self.sfnt_header();
        Tag::from_be_bytes([h[0], h[1], h[2], h[3]])
    }

    /// Size of the header plus all records.
    pub fn len(&self) -> usize {
        directory_len(self.num_tables)
    }

    pub fn is_empty(&self) -> bool {
        self.num_tables == 0
    }

    pub fn record(&self, index: usize) -> Result<TableRecord> {
        read_record(self.data, self.base + SFNT_HEADER_LEN + index * TABLE_RECORD_LEN)
    }

    pub fn records(self) -> impl Iterator<Item = Result<TableRecord>> + 'a {
        (0..self.num_tables as usize).map(move |i| self.record(i))
    }

    /// The bytes a record points at.
    pub fn table_data(&self, record: &TableRecord) -> Result<&'a [u8]> {
        let start = record.offset as usize;
        start
            .checked_add(record.length as usize)
            .and_then(|end| self.data.get(start..end))
            .ok_or(Error::TableOutOfBounds {
                tag: record.tag,
                offset: record.offset,
                length: record.length,
                len: self.data.len(),
            })
    }
}

/// Bytes taken by a directory of `num_tables` records, header included.
pub fn directory_len(num_tables: u16) -> usize {
    SFNT_HEADER_LEN + num_tables as usize * TABLE_RECORD_LEN
}
