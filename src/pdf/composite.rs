//! The compositor: stamp a header PDF's first page onto a target PDF
//!
//! A single-shot, stateless transformation: two input buffers and a scale
//! factor in, one merged buffer out. Nothing is shared between calls and no
//! partial output is ever produced on failure.

use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::{self, PageSize};
use crate::pdf::{codec, inspect};

/// Overlay the first page of `header_bytes` onto the first page of
/// `target_bytes`, scaled uniformly by `scale`
///
/// The header page is anchored to the target page's top-left corner. The
/// target's page count and existing content are untouched apart from the
/// overlay drawn on its first page; the input buffers are never modified.
///
/// # Errors
///
/// - [`Error::InvalidScale`] if `scale` is non-positive or non-finite
///   (checked before anything is decoded)
/// - [`Error::Decode`] if either buffer is not a well-formed PDF
/// - [`Error::MissingPage`] if either document has no pages
/// - [`Error::Encode`] if the merged document fails to serialize
///
/// # Example
///
/// ```no_run
/// use pdf_stamp::pdf::composite;
///
/// let target = std::fs::read("report.pdf").unwrap();
/// let header = std::fs::read("letterhead.pdf").unwrap();
/// let merged = composite(&target, &header, 1.0).expect("Failed to composite");
/// ```
pub fn composite(target_bytes: &[u8], header_bytes: &[u8], scale: f32) -> Result<Vec<u8>> {
    // Caller error, checked before decoding anything
    if !geometry::is_valid_scale(scale) {
        return Err(Error::InvalidScale(scale));
    }

    let mut target = codec::decode(target_bytes)?;
    let header = codec::decode(header_bytes)?;

    // The target takes ownership of the header page's content and resources;
    // the header document is read-only and dropped after this.
    let embedded = codec::embed_page(&mut target, &header, 0)?;

    let first_page_id = target
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or(Error::MissingPage)?;

    let target_size = inspect::page_size(&target, first_page_id)?;
    let header_size = PageSize::new(embedded.width, embedded.height);
    let rect = geometry::placement(target_size, header_size, scale);

    codec::draw_embedded(&mut target, first_page_id, &embedded, rect)?;

    codec::encode(&mut target)
}

/// File-based convenience wrapper around [`composite`]
pub fn composite_files(
    target_path: &Path,
    header_path: &Path,
    scale: f32,
    output_path: &Path,
) -> Result<()> {
    let target_bytes = std::fs::read(target_path)?;
    let header_bytes = std::fs::read(header_path)?;

    let merged = composite(&target_bytes, &header_bytes, scale)?;

    std::fs::write(output_path, merged)?;
    Ok(())
}
