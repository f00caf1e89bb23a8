use std::fmt::{Display, Formatter, Result};

/// Summary of a finished merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub fonts: usize,
    /// Table records written across all fonts.
    pub tables: usize,
    /// Distinct table bodies stored in the collection.
    pub unique_tables: usize,
    pub body_len: u64,
    /// Bytes that would have been stored again without sharing.
    pub bytes_saved: u64,
    pub total_len: u64,
}

impl MergeStats {
    pub fn shared_tables(&self) -> usize {
        self.tables - self.unique_tables
    }
}

impl Display for MergeStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{} fonts, {} tables ({} shared), {} bytes ({} saved)",
            self.fonts,
            self.tables,
            self.shared_tables(),
            self.total_len,
            self.bytes_saved
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_display() {
        let stats = MergeStats {
            fonts: 2,
            tables: 20,
            unique_tables: 12,
            body_len: 1000,
            bytes_saved: 640,
            total_len: 1396,
        };
        assert_eq!(stats.shared_tables(), 8);
        assert_eq!(stats.to_string(), "2 fonts, 20 tables (8 shared), 1396 bytes (640 saved)");
    }
}
