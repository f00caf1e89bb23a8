//! Content-addressed table storage
//!
//! Every table body written to a collection goes through [`TableCache`].
//! Tables are identified by the MD5 digest of their bytes: the first table
//! seen with a given digest claims the next free offset in the body, and
//! every later table with that digest reuses it.

use std::fmt::{self, Display, Formatter};

use indexmap::{IndexMap, map::Entry};
use log::debug;
use md5::{Digest as _, Md5};

use crate::{Error, Result};

/// 128-bit content hash of a table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Digest([u8; 16]);

impl Digest {
    pub fn of(data: &[u8]) -> Self {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&Md5::digest(data));
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

/// A distinct table body and where it lives in the output.
#[derive(Copy, Clone, Debug)]
pub struct CacheEntry<'a> {
    pub digest: Digest,
    pub data: &'a [u8],
    pub offset: u32,
}

impl CacheEntry<'_> {
    pub fn length(&self) -> u32 {
        self.data.len() as u32
    }
}

/// Deduplicating allocator for the collection body.
///
/// Entries borrow the input buffers, so those buffers must outlive the
/// cache and the final write of [`TableCache::entries`].
#[derive(Debug)]
pub struct TableCache<'a> {
    entries: IndexMap<Digest, CacheEntry<'a>>,
    body_start: u32,
    cursor: u32,
    verify: bool,
    hits: usize,
    bytes_saved: u64,
}

impl<'a> TableCache<'a> {
    /// Create a cache whose first table will be placed at `body_start`.
    pub fn new(body_start: u32, capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            body_start,
            cursor: body_start,
            verify: false,
            hits: 0,
            bytes_saved: 0,
        }
    }

    /// Compare bytes on every digest match instead of trusting the digest.
    pub fn verify_digests(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Return the output offset for `data`, allocating one if these bytes
    /// have not been seen before.
    pub fn intern(&mut self, data: &'a [u8]) -> Result<u32> {
        let digest = Digest::of(data);
        match self.entries.entry(digest) {
            Entry::Occupied(entry) => {
                let existing = entry.get();
                if self.verify && existing.data != data {
                    return Err(Error::DigestCollision { digest: digest.to_string() });
                }
                self.hits += 1;
                self.bytes_saved += data.len() as u64;
                debug!("Reusing {} bytes at offset {} ({digest})", data.len(), existing.offset);
                Ok(existing.offset)
            }
            Entry::Vacant(entry) => {
                let length = u32::try_from(data.len()).map_err(|_| Error::OffsetOverflow)?;
                let offset = self.cursor;
                self.cursor = offset.checked_add(length).ok_or(Error::OffsetOverflow)?;
                entry.insert(CacheEntry { digest, data, offset });
                debug!("Placing {length} bytes at offset {offset} ({digest})");
                Ok(offset)
            }
        }
    }

    /// Distinct tables in the order they were first seen.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry<'a>> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn body_start(&self) -> u32 {
        self.body_start
    }

    /// Offset just past the last allocated table.
    pub fn body_end(&self) -> u32 {
        self.cursor
    }

    pub fn body_len(&self) -> u32 {
        self.cursor - self.body_start
    }

    /// Number of `intern` calls answered from an existing entry.
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn bytes_saved(&self) -> u64 {
        self.bytes_saved
    }
}
