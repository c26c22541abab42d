//! Output packaging.
//!
//! Two independent output shapes over the same artifact type:
//!
//! - **Individual mode**: the ordered artifact sequence itself is the result.
//!   Each artifact carries its 1-based index, deterministic name, and encoded
//!   bytes, ready for gallery display and per-artifact save.
//!
//! - **Archive mode**: [`build_archive`] bundles the artifacts into a single
//!   ZIP, serialized to one byte sequence, with a filename derived from the
//!   source filename stem. The archive is created fresh per export and never
//!   mutated afterwards.
//!
//! Entry names keep their positional meaning: a slice skipped at render time
//! leaves a gap in the index sequence rather than shifting later names down.
//! An empty artifact set still produces a (degenerate, empty) archive.

use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::PackageError;

/// File extension of encoded slices.
pub const SLICE_EXT: &str = "jpg";

/// File extension of the bundled archive.
pub const ARCHIVE_EXT: &str = "zip";

/// Suffix appended to the source filename stem when naming the archive.
pub const ARCHIVE_SUFFIX: &str = "_slices";

/// One encoded slice, ready to hand to the user.
#[derive(Debug, Clone)]
pub struct SliceArtifact {
    /// 1-based index matching left-to-right position in the source image.
    pub index: u32,

    /// Entry and download name, `slice_{index}.jpg`.
    pub name: String,

    /// Encoded JPEG bytes.
    pub data: Bytes,
}

impl SliceArtifact {
    /// Wrap encoded slice bytes with their deterministic name.
    pub fn new(index: u32, data: Bytes) -> Self {
        Self {
            index,
            name: artifact_name(index),
            data,
        }
    }
}

/// Deterministic artifact name for a 1-based slice index.
pub fn artifact_name(index: u32) -> String {
    format!("slice_{index}.{SLICE_EXT}")
}

/// Archive filename derived from the source filename stem.
pub fn archive_name(stem: &str) -> String {
    format!("{stem}{ARCHIVE_SUFFIX}.{ARCHIVE_EXT}")
}

/// A serialized archive ready for a save-as action.
#[derive(Debug, Clone)]
pub struct Archive {
    /// Download filename, `{stem}_slices.zip`.
    pub filename: String,

    /// The serialized ZIP bytes.
    pub data: Bytes,
}

/// Bundle artifacts into a single ZIP archive.
///
/// Entries are written under their artifact names, in the order given (which
/// is planner order for artifacts coming out of the render loop).
///
/// # Errors
///
/// Returns an error if writing an entry or serializing the finished archive
/// fails. Unlike per-slice render failures, this aborts the export.
pub fn build_archive(stem: &str, artifacts: &[SliceArtifact]) -> Result<Archive, PackageError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for artifact in artifacts {
        writer
            .start_file(artifact.name.as_str(), options.clone())
            .map_err(|e| PackageError::Write(e.to_string()))?;
        writer
            .write_all(&artifact.data)
            .map_err(|e| PackageError::Write(e.to_string()))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| PackageError::Serialize(e.to_string()))?;

    Ok(Archive {
        filename: archive_name(stem),
        data: Bytes::from(cursor.into_inner()),
    })
}

// =============================================================================
// Tests
// =============================================================================
