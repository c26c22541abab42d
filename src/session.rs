//! Session state and the export entry points.
//!
//! The session owns the single active source image, the slice-count
//! selection, and the artifacts from the most recent individual export. It is
//! the top-level boundary from the error-handling design: step failures are
//! caught here, and the processing flag is always cleared on exit, success or
//! failure.
//!
//! # State machine
//!
//! ```text
//! Idle ──load_image──▶ Loaded ──export──▶ Processing ──▶ Loaded
//!                        ▲                                 │
//!                        └──────── load_image (reset) ◀────┘
//! ```
//!
//! Loading a new image from any state moves to `Loaded` and discards all
//! prior artifacts. Only one export may be in flight at a time; the calling
//! layer is expected to disable its controls while `Processing`, and the
//! session additionally rejects a reentrant export with a typed error.

use tracing::{debug, warn};

use crate::error::{ExportError, InputError};
use crate::package::{build_archive, Archive, SliceArtifact};
use crate::plan::{SliceCount, SlicePlan};
use crate::render::SliceRenderer;
use crate::source::SourceImage;

/// Lifecycle of one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No image loaded
    #[default]
    Idle,
    /// Image present; exports may run and prior artifacts may be on display
    Loaded,
    /// An export is in flight; the calling layer should disable controls
    Processing,
}

/// Holds the active source image, the slice-count selection, and the
/// artifacts from the most recent individual export.
#[derive(Debug, Default)]
pub struct Session {
    source: Option<SourceImage>,
    slice_count: SliceCount,
    state: SessionState,
    renderer: SliceRenderer,
    artifacts: Vec<SliceArtifact>,
}

impl Session {
    /// Create an empty session in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current slice-count selection.
    pub fn slice_count(&self) -> SliceCount {
        self.slice_count
    }

    /// The active source image, if any.
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Artifacts from the most recent individual export, in slice order.
    /// Empty until an individual export succeeds, and cleared whenever a new
    /// image is loaded.
    pub fn artifacts(&self) -> &[SliceArtifact] {
        &self.artifacts
    }

    /// Decode and install a new source image.
    ///
    /// On success the session moves to `Loaded` from any state and all prior
    /// artifacts are discarded; this is a reset, not a merge. On failure the
    /// session is left exactly as it was.
    pub fn load_image(&mut self, name: impl Into<String>, data: &[u8]) -> Result<(), InputError> {
        let source = SourceImage::from_bytes(name, data)?;
        debug!(
            name = source.name(),
            width = source.width(),
            height = source.height(),
            "source image loaded"
        );
        self.source = Some(source);
        self.artifacts.clear();
        self.state = SessionState::Loaded;
        Ok(())
    }

    /// Change the slice-count selection.
    ///
    /// This only affects what [`boundary_guides`](Self::boundary_guides)
    /// reports and what the next export produces; an artifact set already on
    /// display is untouched.
    pub fn set_slice_count(&mut self, count: u32) -> Result<(), InputError> {
        self.slice_count = SliceCount::new(count)?;
        Ok(())
    }

    /// The current slice plan, recomputed on demand from the active image and
    /// selection.
    pub fn plan(&self) -> Result<SlicePlan, InputError> {
        let source = self.source.as_ref().ok_or(InputError::NoImage)?;
        SlicePlan::new(source.width(), source.height(), self.slice_count)
    }

    /// Interior boundary x-offsets for the preview overlay.
    pub fn boundary_guides(&self) -> Result<Vec<u32>, InputError> {
        Ok(self.plan()?.boundaries())
    }

    /// Run an export and keep the artifacts for gallery display.
    ///
    /// Returns the ordered artifact sequence. Per-slice render failures are
    /// logged and skipped, so the result may hold fewer than N artifacts.
    pub fn export_individual(&mut self) -> Result<&[SliceArtifact], ExportError> {
        self.begin_export()?;
        let result = self.render_slices();
        self.finish_export();

        let artifacts = result?;
        debug!(count = artifacts.len(), "individual export finished");
        self.artifacts = artifacts;
        Ok(&self.artifacts)
    }

    /// Run an export and bundle the artifacts into a single ZIP archive.
    ///
    /// Returns the serialized archive for the caller's save-as action. The
    /// gallery artifact set from a previous individual export is untouched.
    pub fn export_archive(&mut self) -> Result<Archive, ExportError> {
        self.begin_export()?;
        let rendered = self.render_slices();
        let outcome = match rendered {
            Ok(artifacts) => {
                let stem = self.source.as_ref().map(SourceImage::stem).unwrap_or("image");
                build_archive(stem, &artifacts).map_err(ExportError::from)
            }
            Err(e) => Err(e),
        };
        self.finish_export();

        let archive = outcome?;
        debug!(
            filename = %archive.filename,
            bytes = archive.data.len(),
            "archive export finished"
        );
        Ok(archive)
    }

    /// Validate preconditions and enter `Processing`.
    fn begin_export(&mut self) -> Result<(), ExportError> {
        if self.state == SessionState::Processing {
            return Err(ExportError::ExportInFlight);
        }
        if self.source.is_none() {
            return Err(InputError::NoImage.into());
        }
        self.state = SessionState::Processing;
        Ok(())
    }

    /// Leave `Processing`. Runs on every exit path, success or failure.
    fn finish_export(&mut self) {
        self.state = if self.source.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Idle
        };
    }

    /// The shared plan-and-render loop behind both export entry points.
    ///
    /// Slices render strictly in planner order; a failing slice is logged and
    /// skipped while the rest continue.
    fn render_slices(&mut self) -> Result<Vec<SliceArtifact>, ExportError> {
        let source = self.source.as_ref().ok_or(InputError::NoImage)?;
        let plan = SlicePlan::new(source.width(), source.height(), self.slice_count)
            .map_err(ExportError::from)?;

        let mut artifacts = Vec::with_capacity(plan.len());
        for (i, region) in plan.regions().iter().enumerate() {
            let index = i as u32 + 1;
            match self.renderer.render(source, index, *region) {
                Ok(data) => artifacts.push(SliceArtifact::new(index, data)),
                Err(err) => warn!(index, error = %err, "slice skipped"),
            }
        }
        Ok(artifacts)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(name: &str, width: u32, height: u32) -> (String, Vec<u8>) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 200])
        });
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        (name.to_string(), buf)
    }

    fn loaded_session(width: u32, height: u32) -> Session {
        let mut session = Session::new();
        let (name, data) = encode_png("pano.png", width, height);
        session.load_image(name, &data).unwrap();
        session
    }

    #[test]
    fn test_starts_idle() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.source().is_none());
        assert!(session.artifacts().is_empty());
        assert_eq!(session.slice_count().get(), 3);
    }

    #[test]
    fn test_load_image_moves_to_loaded() {
        let session = loaded_session(120, 40);
        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.source().unwrap().dimensions(), (120, 40));
    }

    #[test]
    fn test_load_failure_leaves_state_unchanged() {
        let mut session = Session::new();
        let result = session.load_image("junk.bin", &[1, 2, 3, 4]);
        assert!(result.is_err());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.source().is_none());

        // and from Loaded: a bad upload keeps the old image
        let mut session = loaded_session(120, 40);
        assert!(session.load_image("junk.bin", &[1, 2, 3, 4]).is_err());
        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.source().unwrap().dimensions(), (120, 40));
    }

    #[test]
    fn test_export_without_image_rejected() {
        let mut session = Session::new();
        let result = session.export_individual();
        assert!(matches!(
            result,
            Err(ExportError::Input(InputError::NoImage))
        ));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_export_individual_produces_n_artifacts() {
        let mut session = loaded_session(300, 100);
        session.set_slice_count(3).unwrap();

        let artifacts = session.export_individual().unwrap();
        assert_eq!(artifacts.len(), 3);
        assert_eq!(artifacts[0].name, "slice_1.jpg");
        assert_eq!(artifacts[1].name, "slice_2.jpg");
        assert_eq!(artifacts[2].name, "slice_3.jpg");

        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn test_export_archive_named_from_stem() {
        let mut session = loaded_session(300, 100);
        session.set_slice_count(3).unwrap();

        let archive = session.export_archive().unwrap();
        assert_eq!(archive.filename, "pano_slices.zip");
        assert!(!archive.data.is_empty());
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn test_exports_are_idempotent() {
        let mut session = loaded_session(301, 77);
        session.set_slice_count(4).unwrap();

        let first: Vec<_> = session
            .export_individual()
            .unwrap()
            .iter()
            .map(|a| a.data.clone())
            .collect();
        let second: Vec<_> = session
            .export_individual()
            .unwrap()
            .iter()
            .map(|a| a.data.clone())
            .collect();
        assert_eq!(first, second);

        let archive_a = session.export_archive().unwrap();
        let archive_b = session.export_archive().unwrap();
        assert_eq!(archive_a.data, archive_b.data);
    }

    #[test]
    fn test_slice_count_change_keeps_existing_artifacts() {
        let mut session = loaded_session(300, 100);
        session.set_slice_count(3).unwrap();
        session.export_individual().unwrap();
        assert_eq!(session.artifacts().len(), 3);

        session.set_slice_count(5).unwrap();
        // selection changed, overlay changes, artifacts do not
        assert_eq!(session.artifacts().len(), 3);
        assert_eq!(session.boundary_guides().unwrap().len(), 4);
    }

    #[test]
    fn test_new_image_clears_artifacts() {
        let mut session = loaded_session(300, 100);
        session.export_individual().unwrap();
        assert!(!session.artifacts().is_empty());

        let (name, data) = encode_png("other.png", 80, 80);
        session.load_image(name, &data).unwrap();
        assert!(session.artifacts().is_empty());
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn test_archive_export_keeps_gallery() {
        let mut session = loaded_session(300, 100);
        session.export_individual().unwrap();
        assert_eq!(session.artifacts().len(), 3);

        session.export_archive().unwrap();
        assert_eq!(session.artifacts().len(), 3);
    }

    #[test]
    fn test_narrow_image_partial_success() {
        // 3px wide across 4 slices: three zero-width regions are skipped,
        // only the remainder-absorbing last slice renders
        let mut session = loaded_session(3, 10);
        session.set_slice_count(4).unwrap();

        let artifacts = session.export_individual().unwrap();
        assert_eq!(artifacts.len(), 1);
        // skipped indices leave a gap, not a renumbering
        assert_eq!(artifacts[0].index, 4);
        assert_eq!(artifacts[0].name, "slice_4.jpg");
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn test_boundary_guides() {
        let mut session = loaded_session(300, 100);
        session.set_slice_count(3).unwrap();
        assert_eq!(session.boundary_guides().unwrap(), vec![100, 200]);

        let idle = Session::new();
        assert!(matches!(
            idle.boundary_guides(),
            Err(InputError::NoImage)
        ));
    }
}
