//! # Font Collection
//!
//! Glue standalone TrueType/OpenType fonts into a single `ttcf` collection.
//!
//! Fonts in a family usually carry byte-identical tables (`glyf`, `cmap`,
//! `GSUB`, ...). Each distinct table body is stored once, and every font's
//! table directory points at that shared copy.
//!
//! ## Example
//!
//! ```no_run
//! use font_collection::{Merger, Options};
//!
//! let regular = std::fs::read("Font-Regular.ttf").unwrap();
//! let bold = std::fs::read("Font-Bold.ttf").unwrap();
//! let merger = Merger::new(Options::new());
//! let ttc = merger.merge(&[&regular, &bold]).unwrap();
//! std::fs::write("Font.ttc", ttc).unwrap();
//! ```

mod cache;
mod directory;
mod error;
mod inspect;
mod layout;
mod merger;
mod options;
mod reader;
mod types;
mod writer;

pub use cache::{CacheEntry, Digest, TableCache};
pub use directory::{TableDirectory, TableRecord, directory_len, table_count, table_record};
pub use error::{Error, Result};
pub use inspect::Collection;
pub use layout::LayoutPlan;
pub use merger::{MAJOR_VERSION, MINOR_VERSION, Merger, TTC_TAG};
pub use options::Options;
pub use reader::{FontBuffer, load, read_u16, read_u32};
pub use types::MergeStats;
pub use writer::BinaryWriter;

/// Merge fonts from raw byte slices using default options.
pub fn merge_fonts_bytes(fonts: &[&[u8]]) -> Result<Vec<u8>> {
    Merger::default().merge(fonts)
}
