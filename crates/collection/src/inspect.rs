//! Reading a collection back
//!
//! Used to list what a collection contains and to check that fonts really
//! share table bodies.

use read_fonts::types::Tag;

use crate::{
    Error, Result,
    directory::TableDirectory,
    layout::COLLECTION_HEADER_LEN,
    merger::TTC_TAG,
    reader::{read_u16, read_u32},
};

/// A parsed `ttcf` header over the whole collection file.
#[derive(Clone, Debug)]
pub struct Collection<'a> {
    data: &'a [u8],
    major_version: u16,
    minor_version: u16,
    directory_offsets: Vec<u32>,
}

impl<'a> Collection<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let tag = Tag::from_u32(read_u32(data, 0)?);
        if tag != TTC_TAG {
            return Err(Error::NotACollection(tag));
        }
        let major_version = read_u16(data, 4)?;
        let minor_version = read_u16(data, 6)?;
        let num_fonts = read_u32(data, 8)?;

        let directory_offsets = (0..num_fonts as usize)
            .map(|i| read_u32(data, COLLECTION_HEADER_LEN as usize + i * 4))
            .collect::<Result<_>>()?;

        Ok(Self { data, major_version, minor_version, directory_offsets })
    }

    pub fn version(&self) -> (u16, u16) {
        (self.major_version, self.minor_version)
    }

    pub fn len(&self) -> usize {
        self.directory_offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directory_offsets.is_empty()
    }

    pub fn directory_offsets(&self) -> &[u32] {
        &self.directory_offsets
    }

    /// The table directory of the `index`th font.
    pub fn font(&self, index: usize) -> Result<TableDirectory<'a>> {
        let offset = self.directory_offsets.get(index).ok_or(Error::OutOfBounds {
            offset: COLLECTION_HEADER_LEN as usize + index * 4,
            width: 4,
            len: self.data.len(),
        })?;
        TableDirectory::at(self.data, *offset as usize)
    }

    pub fn fonts(&self) -> impl Iterator<Item = Result<TableDirectory<'a>>> + '_ {
        (0..self.len()).map(|i| self.font(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Merger;

    fn one_table_font(body: &[u8]) -> Vec<u8> {
        let mut data = vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0, 0x10, 0, 0, 0, 0];
        data.extend_from_slice(b"glyf");
        data.extend_from_slice(&0xCAFEu32.to_be_bytes());
        data.extend_from_slice(&28u32.to_be_bytes());
        data.extend_from_slice(&(body.len() as u32).to_be_bytes());
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn test_read_back_merged() {
        let a = one_table_font(b"outline");
        let b = one_table_font(b"outline");
        let c = one_table_font(b"other");
        let out = Merger::default().merge(&[&a, &b, &c]).unwrap();

        let collection = Collection::new(&out).unwrap();
        assert_eq!(collection.version(), (1, 0));
        assert_eq!(collection.len(), 3);

        let fonts: Vec<_> = collection.fonts().collect::<Result<_>>().unwrap();
        let records: Vec<_> = fonts.iter().map(|f| f.record(0).unwrap()).collect();
        assert_eq!(records[0].offset, records[1].offset);
        assert_ne!(records[0].offset, records[2].offset);
        assert!(records.iter().all(|r| r.checksum == 0xCAFE));

        assert_eq!(fonts[1].table_data(&records[1]).unwrap(), b"outline");
        assert_eq!(fonts[2].table_data(&records[2]).unwrap(), b"other");
    }

    #[test]
    fn test_not_a_collection() {
        let font = one_table_font(b"x");
        let err = Collection::new(&font).unwrap_err();
        assert!(matches!(err, Error::NotACollection(tag) if tag == Tag::new(b"\0\x01\0\0")));
    }

    #[test]
    fn test_truncated_offset_array() {
        let mut data = b"ttcf".to_vec();
        data.extend_from_slice(&[0, 1, 0, 0, 0, 0, 0, 5]);
        data.extend_from_slice(&[0, 0, 0, 32]);
        assert!(matches!(Collection::new(&data), Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn test_font_index_out_of_range() {
        let out = Merger::default().merge(&[&one_table_font(b"x")]).unwrap();
        let collection = Collection::new(&out).unwrap();
        assert!(collection.font(0).is_ok());
        assert!(collection.font(1).is_err());
    }
}
