//! fontglue CLI library.

pub mod cli;
pub mod inspect;
pub mod io;
pub mod merge;

pub use font_collection::{MergeStats, Options};
