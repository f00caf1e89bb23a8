//! Options for building a collection

/// Options for building a collection
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Confirm digest matches byte-for-byte before sharing a table
    pub verify_digests: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify_digests(mut self, verify: bool) -> Self {
        self.verify_digests = verify;
        self
    }
}
