use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("the canvas has not been shown on screen yet")]
    NotRealized,

    #[error("the window is minimized, so the canvas cannot be read back")]
    Minimized,

    #[error("the captured region is empty ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },
}

/// Reads back the pixels currently displayed in a screen region.
///
/// This is the only piece that knows about the host windowing system; the
/// rest of the pipeline only sees the returned raster. A capturer must fail
/// rather than hand back blank or stale pixels when the region cannot be read.
pub trait RegionCapturer {
    fn capture(&self) -> Result<RgbaImage, CaptureError>;
}
