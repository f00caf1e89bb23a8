//! Main Merger implementation

use std::io::Write;

use log::{info, warn};
use read_fonts::types::Tag;

use crate::{
    Error, Result,
    cache::TableCache,
    directory::{TableDirectory, TableRecord},
    layout::LayoutPlan,
    options::Options,
    types::MergeStats,
    writer::BinaryWriter,
};

pub const TTC_TAG: Tag = Tag::new(b"ttcf");
pub const MAJOR_VERSION: u16 = 1;
pub const MINOR_VERSION: u16 = 0;

/// Builds a collection out of standalone fonts
#[derive(Default)]
pub struct Merger {
    options: Options,
}

/// A table record with its offset already moved into the collection body
struct PlacedRecord {
    record: TableRecord,
    offset: u32,
}

impl Merger {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Merge fonts into an in-memory collection
    pub fn merge(&self, fonts: &[&[u8]]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.merge_into(fonts, &mut out)?;
        Ok(out)
    }

    /// Merge fonts and stream the collection into `sink`
    ///
    /// Every input is parsed and every table placed before the first byte
    /// is written, so malformed input never produces partial output here.
    pub fn merge_into<W: Write>(&self, fonts: &[&[u8]], sink: W) -> Result<MergeStats> {
        if fonts.is_empty() {
            return Err(Error::NoFonts);
        }

        let directories: Vec<TableDirectory> = fonts
            .iter()
            .map(|&data| TableDirectory::new(data))
            .collect::<Result<_>>()?;
        for (index, dir) in directories.iter().enumerate() {
            if dir.is_empty() {
                warn!("Font {index} has no tables");
            }
        }

        let plan = LayoutPlan::compute(&directories)?;
        let mut cache = TableCache::new(plan.body_start, plan.total_tables)
            .verify_digests(self.options.verify_digests);

        let placed: Vec<Vec<PlacedRecord>> = directories
            .iter()
            .map(|dir| place_tables(dir, &mut cache))
            .collect::<Result<_>>()?;

        let mut writer = BinaryWriter::new(sink);
        write_header(&mut writer, &plan)?;
        for (dir, records) in directories.iter().zip(&placed) {
            write_directory(&mut writer, dir, records)?;
        }
        expect_position(&writer, plan.body_start)?;

        for entry in cache.entries() {
            writer.write_bytes(entry.data)?;
        }
        expect_position(&writer, cache.body_end())?;
        writer.flush()?;

        let stats = MergeStats {
            fonts: fonts.len(),
            tables: plan.total_tables,
            unique_tables: cache.len(),
            body_len: u64::from(cache.body_len()),
            bytes_saved: cache.bytes_saved(),
            total_len: writer.position(),
        };
        info!("Built collection: {stats}");
        Ok(stats)
    }
}

fn place_tables<'a>(
    dir: &TableDirectory<'a>,
    cache: &mut TableCache<'a>,
) -> Result<Vec<PlacedRecord>> {
    dir.records()
        .map(|record| -> Result<PlacedRecord> {
            let record = record?;
            let offset = cache.intern(dir.table_data(&record)?)?;
            Ok(PlacedRecord { record, offset })
        })
        .collect()
}

fn write_header<W: Write>(writer: &mut BinaryWriter<W>, plan: &LayoutPlan) -> Result<()> {
    writer.write_tag(TTC_TAG)?;
    writer.write_u16(MAJOR_VERSION)?;
    writer.write_u16(MINOR_VERSION)?;
    writer.write_u32(plan.font_count() as u32)?;
    for &offset in &plan.directory_offsets {
        writer.write_u32(offset)?;
    }
    expect_position(writer, plan.header_size)
}

/// The sfnt header goes out verbatim; of each record only the offset changes.
fn write_directory<W: Write>(
    writer: &mut BinaryWriter<W>,
    dir: &TableDirectory,
    records: &[PlacedRecord],
) -> Result<()> {
    writer.write_bytes(dir.sfnt_header())?;
    for PlacedRecord { record, offset } in records {
        writer.write_tag(record.tag)?;
        writer.write_u32(record.checksum)?;
        writer.write_u32(*offset)?;
        writer.write_u32(record.length)?;
    }
    Ok(())
}

fn expect_position<W: Write>(writer: &BinaryWriter<W>, expected: u32) -> Result<()> {
    let actual = writer.position();
    if actual == u64::from(expected) {
        Ok(())
    } else {
        Err(Error::LayoutMismatch { expected: expected.into(), actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A font whose tables are the given byte strings, in directory order.
    fn raw_font(tables: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
        let num_tables = tables.len() as u16;
        let mut data = vec![0x00, 0x01, 0x00, 0x00];
        data.extend_from_slice(&num_tables.to_be_bytes());
        data.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

        let mut offset = 12 + 16 * tables.len() as u32;
        for (i, (tag, body)) in tables.iter().enumerate() {
            data.extend_from_slice(*tag);
            data.extend_from_slice(&(0x1000 + i as u32).to_be_bytes());
            data.extend_from_slice(&offset.to_be_bytes());
            data.extend_from_slice(&(body.len() as u32).to_be_bytes());
            offset += body.len() as u32;
        }
        for (_, body) in tables {
            data.extend_from_slice(body);
        }
        data
    }

    fn be32(data: &[u8], at: usize) -> u32 {
        u32::from_be_bytes(data[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn test_merger_no_fonts() {
        let merger = Merger::default();
        assert!(matches!(merger.merge(&[]), Err(Error::NoFonts)));
    }

    #[test]
    fn test_identical_single_table_fonts() {
        let font = raw_font(&[(b"glyf", b"0123456789")]);
        let out = Merger::default().merge(&[&font, &font]).unwrap();

        assert_eq!(&out[..4], b"ttcf");
        assert_eq!(&out[4..8], &[0, 1, 0, 0]);
        assert_eq!(be32(&out, 8), 2);
        // header 20, two 28-byte blocks
        assert_eq!(be32(&out, 12), 20);
        assert_eq!(be32(&out, 16), 48);
        assert_eq!(be32(&out, 20 + 12 + 8), 76);
        assert_eq!(be32(&out, 48 + 12 + 8), 76);
        assert_eq!(out.len(), 76 + 10);
        assert_eq!(&out[76..], b"0123456789");
    }

    #[test]
    fn test_disjoint_fonts() {
        let a = raw_font(&[(b"cmap", b"aaaa"), (b"glyf", b"bbbbbb")]);
        let b = raw_font(&[(b"cmap", b"cccc"), (b"hmtx", b"dd")]);
        let mut out = Vec::new();
        let stats = Merger::default().merge_into(&[&a, &b], &mut out).unwrap();

        let body_start = 20 + (12 + 32) * 2;
        assert_eq!(stats.body_len, 16);
        assert_eq!(stats.unique_tables, 4);
        assert_eq!(stats.bytes_saved, 0);
        assert_eq!(stats.total_len, out.len() as u64);
        assert_eq!(out.len(), body_start + 16);
        assert_eq!(&out[body_start..], b"aaaabbbbbbccccdd");
    }

    #[test]
    fn test_records_keep_tag_checksum_and_length() {
        let a = raw_font(&[(b"head", b"HEAD"), (b"name", b"shared-name")]);
        let b = raw_font(&[(b"name", b"shared-name")]);
        let out = Merger::default().merge(&[&a, &b]).unwrap();

        let second = be32(&out, 16) as usize;
        assert_eq!(&out[second..second + 12], &b[..12]);
        assert_eq!(&out[second + 12..second + 20], &b[12..20]);
        assert_eq!(&out[second + 24..second + 28], &b[24..28]);

        let first = be32(&out, 12) as usize;
        let shared_in_a = be32(&out, first + 12 + 16 + 8);
        let shared_in_b = be32(&out, second + 12 + 8);
        assert_eq!(shared_in_a, shared_in_b);
    }

    #[test]
    fn test_truncated_input_writes_nothing() {
        let good = raw_font(&[(b"glyf", b"data")]);
        let bad = &good[..good.len() - 1];
        let mut out = Vec::new();
        let err = Merger::default().merge_into(&[&good, bad], &mut out).unwrap_err();
        assert!(matches!(err, Error::TableOutOfBounds { .. }));
        assert!(out.is_empty());
    }
}
