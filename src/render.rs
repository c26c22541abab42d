//! Slice rendering.
//!
//! This module crops one planned region out of the source image and encodes
//! it as JPEG at a fixed quality.
//!
//! # Design Decisions
//!
//! - **Crop, never scale**: the output surface has exactly the region's pixel
//!   dimensions; source pixels map 1:1 into it.
//!
//! - **Fixed quality**: every slice is encoded at [`SLICE_JPEG_QUALITY`].
//!   Deterministic encoder settings make repeated exports of the same image
//!   byte-for-byte identical.
//!
//! - **Reused output buffer**: the encoder writes into a buffer that is kept
//!   across slices to avoid reallocating per slice. It is cleared before each
//!   encode so a previous slice of a different size cannot bleed through.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;

use crate::error::RenderError;
use crate::plan::Region;
use crate::source::SourceImage;

/// JPEG quality (1-100) used for every exported slice.
///
/// Matches the reference encoder setting of 0.9.
pub const SLICE_JPEG_QUALITY: u8 = 90;

/// Renders planned regions into encoded JPEG slices.
#[derive(Debug, Default)]
pub struct SliceRenderer {
    // shared across slices; only one export is ever in flight
    encode_buf: Vec<u8>,
}

impl SliceRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Crop `region` out of `source` and encode it as JPEG.
    ///
    /// `index` is the 1-based slice index, used only for error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the region has a zero dimension, extends past the
    /// source bounds, or the encoder rejects the pixels. The caller is
    /// expected to skip the slice and continue; nothing here is fatal to the
    /// rest of the export.
    pub fn render(
        &mut self,
        source: &SourceImage,
        index: u32,
        region: Region,
    ) -> Result<Bytes, RenderError> {
        if region.width == 0 || region.height == 0 {
            return Err(RenderError::EmptyRegion {
                index,
                width: region.width,
                height: region.height,
            });
        }

        let (source_width, source_height) = source.dimensions();
        if region.x + region.width > source_width || region.y + region.height > source_height {
            return Err(RenderError::RegionOutOfBounds {
                index,
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                source_width,
                source_height,
            });
        }

        let cropped = source
            .as_dynamic()
            .crop_imm(region.x, region.y, region.width, region.height);

        // JPEG has no alpha channel; PNG sources may carry one
        let rgb = cropped.to_rgb8();

        // drop whatever the previous slice left behind
        self.encode_buf.clear();

        let mut encoder = JpegEncoder::new_with_quality(&mut self.encode_buf, SLICE_JPEG_QUALITY);
        encoder
            .encode_image(&rgb)
            .map_err(|e| RenderError::Encode {
                index,
                message: e.to_string(),
            })?;

        Ok(Bytes::copy_from_slice(&self.encode_buf))
    }
}

// =============================================================================
// Tests
// =============================================================================
