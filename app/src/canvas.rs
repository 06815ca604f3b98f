use eframe::egui::ColorImage;
use image::{Rgba, RgbaImage};

const INK: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLANK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// The drawable bitmap behind the on-screen canvas.
///
/// Every pixel the user sees in the canvas region comes from here, so the
/// bitmap is also what a capture reads back.
pub struct CanvasSurface {
    pixels: RgbaImage,
    brush_radius: f32,
    dirty: bool,
}

impl CanvasSurface {
    pub fn new(side: u32, brush_radius: f32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(side, side, BLANK),
            brush_radius,
            dirty: true,
        }
    }

    pub fn side(&self) -> u32 {
        self.pixels.width()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Paints one filled ink dab centred on (x, y), clipped to the bitmap.
    pub fn stroke(&mut self, x: f32, y: f32) {
        let w = self.pixels.width() as f32;
        let h = self.pixels.height() as f32;
        let r = self.brush_radius;
        let r_sq = r * r;

        let min_x = (x - r).max(0.0) as u32;
        let max_x = (x + r).min(w - 1.0) as u32;
        let min_y = (y - r).max(0.0) as u32;
        let max_y = (y + r).min(h - 1.0) as u32;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f32 - x;
                let dy = py as f32 - y;
                if dx * dx + dy * dy <= r_sq {
                    self.pixels.put_pixel(px, py, INK);
                    self.dirty = true;
                }
            }
        }
    }

    /// Dabs along the segment between two pointer samples, half a radius apart.
    pub fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32)) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        let spacing = (self.brush_radius / 2.0).max(1.0);
        let steps = (length / spacing).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stroke(from.0 + dx * t, from.1 + dy * t);
        }
    }

    /// Discards every stroke and any uploaded image.
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = BLANK;
        }
        self.dirty = true;
    }

    /// Draws `image` anchored at the top-left corner, alpha-blended over
    /// whatever the canvas currently shows.
    pub fn show_image(&mut self, image: &RgbaImage) {
        let width = image.width().min(self.pixels.width());
        let height = image.height().min(self.pixels.height());
        for y in 0..height {
            for x in 0..width {
                let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
                let under = self.pixels.get_pixel(x, y).0;
                let blend = |top: u8, bottom: u8| -> u8 {
                    ((top as u32 * a as u32 + bottom as u32 * (255 - a as u32) + 127) / 255) as u8
                };
                self.pixels.put_pixel(
                    x,
                    y,
                    Rgba([blend(r, under[0]), blend(g, under[1]), blend(b, under[2]), 255]),
                );
            }
        }
        self.dirty = true;
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| *p == BLANK)
    }

    /// Returns whether the bitmap changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn color_image(&self) -> ColorImage {
        let size = [self.pixels.width() as usize, self.pixels.height() as usize];
        ColorImage::from_rgba_unmultiplied(size, self.pixels.as_raw())
    }
}
