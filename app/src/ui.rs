use crate::app::InklingApp;

use eframe::egui::{self, Align, Color32, Id, Layout, Modal, PointerButton, Pos2, Rect, Sense, Vec2};

/// Draws the button strip under the canvas: Clear on the left, Upload and
/// Predict on the right.
pub fn draw_control_strip(app: &mut InklingApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Clear").clicked() {
                app.clear();
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Upload").clicked() {
                    app.upload();
                }
                if ui.button("Predict").clicked() {
                    app.predict(ui.ctx());
                }
            });
        });
    });
}

/// Draws the canvas and turns primary-button drags into strokes.
pub fn draw_canvas(app: &mut InklingApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::default().fill(Color32::BLACK))
        .show(ctx, |ui| {
            app.sync_texture(ctx);

            let side = app.canvas.side() as f32;
            let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::drag());
            app.canvas_rect = Some(response.rect);

            if let Some(texture) = &app.canvas_texture {
                painter.image(
                    texture.id(),
                    response.rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }

            match response.interact_pointer_pos() {
                Some(pointer) if response.dragged_by(PointerButton::Primary) => {
                    app.stroke_to((pointer - response.rect.min).to_pos2());
                }
                _ => app.end_stroke(),
            }
        });
}

/// Shows the pending notice as a modal until the user presses OK.
pub fn draw_notice(app: &mut InklingApp, ctx: &egui::Context) {
    let Some(notice) = &app.notice else {
        return;
    };

    let mut acknowledged = false;
    let modal = Modal::new(Id::new("notice")).show(ctx, |ui| {
        ui.set_width(220.0);
        ui.heading(notice.title());
        ui.label(notice.body());
        ui.separator();
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("OK").clicked() {
                acknowledged = true;
            }
        });
    });

    if acknowledged || modal.should_close() {
        app.notice = None;
    }
}
