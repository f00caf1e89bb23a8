use std::path::Path;

use anyhow::{Context, Result};
use font_collection::{FontBuffer, MergeStats, Merger, Options};
use log::info;

use crate::io::FontFile;

/// Glue `inputs` into one collection at `output`, in input order.
///
/// All inputs stay loaded until the collection is written; nothing is
/// written to `output` unless the whole merge succeeds.
pub fn merge_fonts(
    inputs: &[impl AsRef<Path>],
    output: &Path,
    options: Options,
) -> Result<MergeStats> {
    info!("Merging {} fonts into {}", inputs.len(), output.display());

    let buffers: Vec<FontBuffer> = inputs
        .iter()
        .map(|path| FontFile::new(path.as_ref()).read())
        .collect::<Result<_>>()?;

    let font_refs: Vec<&[u8]> = buffers.iter().map(FontBuffer::as_bytes).collect();

    let merger = Merger::new(options);
    FontFile::new(output).write_with(|writer| {
        merger.merge_into(&font_refs, writer).with_context(|| {
            let names: Vec<_> = buffers.iter().map(|b| b.path().display().to_string()).collect();
            format!("Failed to merge {}", names.join(", "))
        })
    })
}
