//! # panoslice
//!
//! Core slicing pipeline for a panorama splitter: take one source image,
//! plan N equal-width vertical slices (N between 2 and 5), render each slice
//! as a fixed-quality JPEG, and hand the results back either as an ordered
//! set of in-memory artifacts or as a single ZIP archive ready for download.
//!
//! The presentation layer (upload zone, overlay drawing, gallery markup,
//! save dialogs) is an external collaborator: it delivers uploaded bytes to
//! [`Session::load_image`] and renders whatever artifacts the exports
//! produce.
//!
//! ## Architecture
//!
//! - [`source`] - input boundary, decodes uploads into an immutable raster
//! - [`plan`] - pure slice planning and the boundary-overlay data
//! - [`render`] - crop-and-encode of one planned region
//! - [`package`] - artifact naming and ZIP bundling
//! - [`session`] - state machine and the two export entry points
//! - [`error`] - one error type per pipeline stage
//!
//! ## Example
//!
//! ```no_run
//! use panoslice::Session;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let upload: Vec<u8> = std::fs::read("pano.jpg")?;
//!
//! let mut session = Session::new();
//! session.load_image("pano.jpg", &upload)?;
//! session.set_slice_count(3)?;
//!
//! // boundary overlay for the preview
//! let guides = session.boundary_guides()?;
//!
//! // gallery of individually saveable slices
//! let artifacts = session.export_individual()?;
//! println!("{} slices", artifacts.len());
//!
//! // or one bundled download
//! let archive = session.export_archive()?;
//! std::fs::write(&archive.filename, &archive.data)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod package;
pub mod plan;
pub mod render;
pub mod session;
pub mod source;

// Re-export commonly used types
pub use error::{ExportError, InputError, PackageError, RenderError};
pub use package::{
    archive_name, artifact_name, build_archive, Archive, SliceArtifact, ARCHIVE_EXT,
    ARCHIVE_SUFFIX, SLICE_EXT,
};
pub use plan::{Region, SliceCount, SlicePlan, MAX_SLICES, MIN_SLICES};
pub use render::{SliceRenderer, SLICE_JPEG_QUALITY};
pub use session::{Session, SessionState};
pub use source::{SourceFormat, SourceImage};
