use thiserror::Error;

/// Errors raised while accepting a source image or export parameters.
///
/// These are all rejected before any pipeline work starts; session state is
/// left unchanged.
#[derive(Debug, Clone, Error)]
pub enum InputError {
    /// An export or overlay query was made with no image loaded
    #[error("no source image loaded")]
    NoImage,

    /// The uploaded bytes are not a supported raster format (JPEG or PNG)
    #[error("unsupported image format: {reason}")]
    UnsupportedFormat { reason: String },

    /// The uploaded bytes claimed a supported format but failed to decode
    #[error("image decode failed: {0}")]
    Decode(String),

    /// Decoded image has a zero dimension
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Slice count outside the fixed menu (2-5)
    #[error("invalid slice count: {count} (expected 2-5)")]
    InvalidSliceCount { count: u32 },
}

/// Per-slice render/encode errors.
///
/// A render error fails only the slice it occurred on; the export continues
/// with the remaining slices and the failure is logged.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Planned region has a zero dimension
    #[error("slice {index} has empty region: {width}x{height}")]
    EmptyRegion {
        index: u32,
        width: u32,
        height: u32,
    },

    /// Planned region extends past the source image bounds
    #[error(
        "slice {index} region ({x},{y}) {width}x{height} exceeds source {source_width}x{source_height}"
    )]
    RegionOutOfBounds {
        index: u32,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
    },

    /// JPEG encoder rejected the cropped pixels
    #[error("slice {index} encode failed: {message}")]
    Encode { index: u32, message: String },
}

/// Archive construction and serialization errors.
///
/// Unlike render errors these are fatal to the whole export attempt.
#[derive(Debug, Clone, Error)]
pub enum PackageError {
    /// Writing an entry into the archive failed
    #[error("archive entry write failed: {0}")]
    Write(String),

    /// Serializing the finished archive failed
    #[error("archive serialization failed: {0}")]
    Serialize(String),
}

/// Top-level error returned by the export entry points.
///
/// Internal step failures are caught here; nothing escapes to corrupt session
/// state, and the processing flag is always cleared on exit.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Package(#[from] PackageError),

    /// A second export was initiated while one was already in flight
    #[error("an export is already in progress")]
    ExportInFlight,
}
