//! Listing the contents of a collection.

use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    path::Path,
};

use anyhow::{Context, Result};
use font_collection::{Collection, TableRecord};
use read_fonts::types::Tag;

use crate::io::read_font;

/// What a collection holds, font by font.
#[derive(Debug, Clone)]
pub struct CollectionReport {
    pub version: (u16, u16),
    pub fonts: Vec<FontEntry>,
    pub len: usize,
}

#[derive(Debug, Clone)]
pub struct FontEntry {
    pub directory_offset: u32,
    pub sfnt_version: Tag,
    pub tables: Vec<TableEntry>,
}

#[derive(Debug, Clone)]
pub struct TableEntry {
    pub record: TableRecord,
    /// Earlier font whose table body this record points at. Empty tables
    /// occupy no bytes and are never shared.
    pub shared_with: Option<usize>,
}

impl CollectionReport {
    pub fn new(data: &[u8]) -> font_collection::Result<Self> {
        let collection = Collection::new(data)?;
        let mut owners: HashMap<(u32, u32), usize> = HashMap::new();
        let mut fonts = Vec::with_capacity(collection.len());

        for (index, dir) in collection.fonts().enumerate() {
            let dir = dir?;
            let tables = dir
                .records()
                .map(|record| -> font_collection::Result<TableEntry> {
                    let record = record?;
                    let shared_with = if record.length == 0 {
                        None
                    } else {
                        let owner = *owners.entry((record.offset, record.length)).or_insert(index);
                        (owner != index).then_some(owner)
                    };
                    Ok(TableEntry { record, shared_with })
                })
                .collect::<font_collection::Result<Vec<_>>>()?;
            fonts.push(FontEntry {
                directory_offset: collection.directory_offsets()[index],
                sfnt_version: dir.sfnt_version(),
                tables,
            });
        }

        Ok(Self { version: collection.version(), fonts, len: data.len() })
    }

    pub fn shared_records(&self) -> usize {
        self.fonts
            .iter()
            .flat_map(|f| &f.tables)
            .filter(|t| t.shared_with.is_some())
            .count()
    }
}

impl Display for CollectionReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.version;
        writeln!(
            f,
            "ttcf {major}.{minor}, {} fonts, {} bytes, {} shared table records",
            self.fonts.len(),
            self.len,
            self.shared_records()
        )?;
        for (index, font) in self.fonts.iter().enumerate() {
            writeln!(
                f,
                "# Font {index} at {} (sfnt 0x{:08X}, {} tables)",
                font.directory_offset,
                u32::from_be_bytes(font.sfnt_version.to_be_bytes()),
                font.tables.len()
            )?;
            for TableEntry { record, shared_with } in &font.tables {
                write!(
                    f,
                    "  {}  0x{:08X}  {:>10}  {:>10}",
                    record.tag, record.checksum, record.offset, record.length
                )?;
                match shared_with {
                    Some(owner) => writeln!(f, "  shared with font {owner}")?,
                    None => writeln!(f)?,
                }
            }
        }
        Ok(())
    }
}

pub fn inspect_collection(path: &Path) -> Result<CollectionReport> {
    let data = read_font(path)?;
    CollectionReport::new(&data).with_context(|| format!("Failed to inspect {}", path.display()))
}
