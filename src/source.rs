//! Source image acquisition.
//!
//! The input boundary of the pipeline: raw uploaded bytes come in, a decoded
//! immutable raster comes out. Only JPEG and PNG uploads are accepted;
//! anything else is rejected before any session state changes.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::InputError;

/// Raster formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
}

impl SourceFormat {
    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(SourceFormat::Jpeg),
            ImageFormat::Png => Some(SourceFormat::Png),
            _ => None,
        }
    }
}

/// A decoded source image plus the filename metadata the packager needs.
///
/// The raster is immutable once decoded. A session holds at most one
/// `SourceImage` at a time; loading a new one replaces it wholesale and
/// invalidates every plan and artifact derived from the old one.
#[derive(Debug, Clone)]
pub struct SourceImage {
    name: String,
    format: SourceFormat,
    image: DynamicImage,
}

impl SourceImage {
    /// Decode an uploaded file into a source image.
    ///
    /// The format is detected from the content, not the filename. The
    /// filename is kept only to derive the archive name later.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not recognizable as JPEG or PNG,
    /// if decoding fails, or if the decoded raster has a zero dimension.
    pub fn from_bytes(name: impl Into<String>, data: &[u8]) -> Result<Self, InputError> {
        let name = name.into();

        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| InputError::Decode(e.to_string()))?;

        let format = match reader.format() {
            Some(detected) => SourceFormat::from_image_format(detected).ok_or_else(|| {
                InputError::UnsupportedFormat {
                    reason: format!("{detected:?}"),
                }
            })?,
            None => {
                return Err(InputError::UnsupportedFormat {
                    reason: "unrecognized image data".to_string(),
                })
            }
        };

        let image = reader
            .decode()
            .map_err(|e| InputError::Decode(e.to_string()))?;

        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(InputError::InvalidDimensions { width, height });
        }

        Ok(Self {
            name,
            format,
            image,
        })
    }

    /// Width of the decoded raster in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height of the decoded raster in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Original filename as uploaded.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Detected source format.
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Filename stem, used to derive the archive filename.
    ///
    /// Everything before the last `.`; the whole name if there is no
    /// extension or the name starts with the only `.`.
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }

    pub(crate) fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

// =============================================================================
// Tests
// =============================================================================
