use crate::canvas::CanvasSurface;
use crate::capture::CanvasCapturer;
use crate::dialog;
use crate::ui;

use eframe::egui::{self, Pos2, Rect, TextureHandle, TextureOptions};
use eframe::{App, Frame};
use inkling::{CANVAS_SIDE, InklingConfig, Notice, Recognizer, UploadOutcome};
use tracing::{debug, error};

/// The main application struct.
/// Every button and canvas handler works on this one state object.
pub struct InklingApp {
    // --- Core State ---
    /// Loaded model and label mapping.
    pub recognizer: Recognizer,
    /// The bitmap the user draws on.
    pub canvas: CanvasSurface,

    // --- UI State ---
    /// GPU copy of the canvas bitmap, refreshed when the bitmap changes.
    pub canvas_texture: Option<TextureHandle>,
    /// Where the canvas was laid out in the last frame.
    pub canvas_rect: Option<Rect>,
    /// Last pointer sample of the stroke in progress, in canvas coordinates.
    pub last_stroke: Option<Pos2>,
    /// The modal message currently waiting for acknowledgement.
    pub notice: Option<Notice>,
}

impl App for InklingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ui::draw_control_strip(self, ctx);
        ui::draw_canvas(self, ctx);
        ui::draw_notice(self, ctx);
    }
}

impl InklingApp {
    pub fn new(recognizer: Recognizer, config: &InklingConfig) -> Self {
        Self {
            recognizer,
            canvas: CanvasSurface::new(CANVAS_SIDE, config.brush_radius),
            canvas_texture: None,
            canvas_rect: None,
            last_stroke: None,
            notice: None,
        }
    }

    /// "Clear" button.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.last_stroke = None;
        debug!("canvas cleared");
    }

    /// "Predict" button: capture, classify and open the result notice.
    pub fn predict(&mut self, ctx: &egui::Context) {
        let minimized = ctx.input(|i| i.viewport().minimized.unwrap_or(false));
        self.predict_with(minimized);
    }

    pub fn predict_with(&mut self, minimized: bool) {
        let capturer = CanvasCapturer::new(&self.canvas, self.canvas_rect, minimized);
        let notice = match self.recognizer.recognize_region(&capturer) {
            Ok(recognition) => recognition.notice,
            Err(e) => {
                error!(error = %e, "prediction failed");
                Notice::error(e)
            }
        };
        self.notice = Some(notice);
    }

    /// "Upload" button: ask for a file and show it on the canvas.
    pub fn upload(&mut self) {
        let selection = dialog::pick_upload_file();
        self.apply_upload(UploadOutcome::from_selection(
            selection.as_deref(),
            CANVAS_SIDE,
        ));
    }

    /// Shows a loaded upload; cancelled or broken uploads leave the canvas as is.
    pub fn apply_upload(&mut self, outcome: UploadOutcome) {
        if let Some(image) = outcome.into_image() {
            self.canvas.show_image(&image);
        }
    }

    /// Extends the current stroke to `pos`, given in canvas coordinates.
    pub fn stroke_to(&mut self, pos: Pos2) {
        match self.last_stroke {
            Some(last) => self.canvas.stroke_line((last.x, last.y), (pos.x, pos.y)),
            None => self.canvas.stroke(pos.x, pos.y),
        }
        self.last_stroke = Some(pos);
    }

    pub fn end_stroke(&mut self) {
        self.last_stroke = None;
    }

    /// Uploads the canvas bitmap to the GPU when it changed.
    pub fn sync_texture(&mut self, ctx: &egui::Context) {
        let dirty = self.canvas.take_dirty();
        if let Some(texture) = &mut self.canvas_texture {
            if dirty {
                texture.set(self.canvas.color_image(), TextureOptions::LINEAR);
            }
        } else {
            self.canvas_texture =
                Some(ctx.load_texture("canvas", self.canvas.color_image(), TextureOptions::LINEAR));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Vec2;
    use image::{Rgb, RgbImage};
    use inkling::{Classifier, ClassifierError, InputTensor, LabelMapping};
    use std::path::Path;

    struct Fixed(Vec<f32>);

    impl Classifier for Fixed {
        fn predict(&self, _input: &InputTensor) -> Result<Vec<f32>, ClassifierError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> String {
            "fixed".to_string()
        }
    }

    fn app(scores: Vec<f32>) -> InklingApp {
        let labels = LabelMapping::from_json_str(r#"{"0":"A","1":"B"}"#).unwrap();
        let recognizer = Recognizer::new(Box::new(Fixed(scores)), labels).unwrap();
        InklingApp::new(recognizer, &InklingConfig::default())
    }

    fn laid_out(app: &mut InklingApp) {
        app.canvas_rect = Some(Rect::from_min_size(Pos2::ZERO, Vec2::splat(300.0)));
    }

    #[test]
    fn test_predict_shows_label() {
        let mut app = app(vec![0.9, 0.1]);
        laid_out(&mut app);
        app.stroke_to(Pos2::new(150.0, 80.0));
        app.stroke_to(Pos2::new(150.0, 220.0));
        app.end_stroke();

        app.predict_with(false);
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.title(), "Prediction");
        assert_eq!(notice.body(), "I believe it's the A");
    }

    #[test]
    fn test_predict_on_blank_canvas() {
        let mut app = app(vec![0.1, 0.9]);
        laid_out(&mut app);
        app.predict_with(false);
        assert_eq!(app.notice.unwrap().label(), Some("B"));
    }

    #[test]
    fn test_predict_before_layout_reports_capture_error() {
        let mut app = app(vec![0.9, 0.1]);
        app.predict_with(false);
        let notice = app.notice.unwrap();
        assert_eq!(notice.title(), "Error");
        assert!(notice.body().contains("not been shown"));
    }

    #[test]
    fn test_clear_resets_canvas() {
        let mut app = app(vec![0.9, 0.1]);
        app.stroke_to(Pos2::new(10.0, 10.0));
        app.stroke_to(Pos2::new(200.0, 30.0));
        app.clear();
        assert!(app.canvas.is_blank());
        assert!(app.last_stroke.is_none());
    }

    #[test]
    fn test_failed_upload_leaves_canvas_unchanged() {
        let mut app = app(vec![0.9, 0.1]);
        app.stroke_to(Pos2::new(42.0, 42.0));
        let before = app.canvas.pixels().clone();

        app.apply_upload(UploadOutcome::from_selection(
            Some(Path::new("no/such/file.png")),
            CANVAS_SIDE,
        ));
        app.apply_upload(UploadOutcome::Cancelled);

        assert_eq!(app.canvas.pixels(), &before);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_upload_shows_resized_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glyph.jpg");
        RgbImage::from_pixel(500, 500, Rgb([255, 255, 255]))
            .save(&path)
            .unwrap();

        let mut app = app(vec![0.9, 0.1]);
        app.apply_upload(UploadOutcome::from_selection(Some(&path), CANVAS_SIDE));

        assert_eq!(app.canvas.pixels().dimensions(), (300, 300));
        assert!(!app.canvas.is_blank());
        let centre = app.canvas.pixels().get_pixel(150, 150).0;
        assert!(centre[..3].iter().all(|&c| c > 240), "{centre:?}");
    }

    #[test]
    fn test_sync_texture_uploads_once_per_change() {
        let mut app = app(vec![0.9, 0.1]);
        let ctx = egui::Context::default();
        app.sync_texture(&ctx);
        assert!(app.canvas_texture.is_some());
        assert!(!app.canvas.take_dirty());
    }
}
