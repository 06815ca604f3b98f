use eframe::egui::Rect;
use image::RgbaImage;
use inkling::{CaptureError, RegionCapturer};

use crate::canvas::CanvasSurface;

/// Reads back the canvas region as egui last laid it out.
pub struct CanvasCapturer<'a> {
    surface: &'a CanvasSurface,
    on_screen: Option<Rect>,
    minimized: bool,
}

impl<'a> CanvasCapturer<'a> {
    /// `on_screen` is the rect the canvas occupied in the last frame, or
    /// `None` if it has not been painted yet.
    pub fn new(surface: &'a CanvasSurface, on_screen: Option<Rect>, minimized: bool) -> Self {
        Self {
            surface,
            on_screen,
            minimized,
        }
    }
}

impl RegionCapturer for CanvasCapturer<'_> {
    fn capture(&self) -> Result<RgbaImage, CaptureError> {
        if self.minimized {
            return Err(CaptureError::Minimized);
        }
        let rect = self.on_screen.ok_or(CaptureError::NotRealized)?;
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return Err(CaptureError::EmptyRegion {
                width: rect.width().max(0.0) as u32,
                height: rect.height().max(0.0) as u32,
            });
        }
        Ok(self.surface.pixels().clone())
    }
}
