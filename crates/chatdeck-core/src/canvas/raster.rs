use std::io::Cursor;

use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};

use super::color::Rgba;
use crate::constants::canvas::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use crate::error::Result;

const TRANSPARENT: Rgba = image::Rgba([0, 0, 0, 0]);

/// Freehand drawing surface.
///
/// Strokes live on their own layer above the background colour and an
/// optional background image, so changing the background never erases ink.
#[derive(Debug, Clone)]
pub struct Canvas {
    strokes: RgbaImage,
    background: Rgba,
    background_image: Option<RgbaImage>,
    stroke_color: Rgba,
    stroke_width: u32,
    last_point: Option<(i32, i32)>,
    dirty: bool,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba, stroke_color: Rgba, stroke_width: u32) -> Self {
        Self {
            strokes: RgbaImage::from_pixel(width.max(1), height.max(1), TRANSPARENT),
            background,
            background_image: None,
            stroke_color,
            stroke_width: stroke_width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH),
            last_point: None,
            dirty: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.strokes.width()
    }

    pub fn height(&self) -> u32 {
        self.strokes.height()
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub fn stroke_color(&self) -> Rgba {
        self.stroke_color
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn has_background_image(&self) -> bool {
        self.background_image.is_some()
    }

    /// True until the first stroke lands on the canvas.
    pub fn is_blank(&self) -> bool {
        !self.dirty
    }

    pub fn set_stroke_width(&mut self, width: u32) -> u32 {
        self.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
        self.stroke_width
    }

    pub fn set_stroke_color(&mut self, color: Rgba) {
        self.stroke_color = color;
    }

    pub fn set_background(&mut self, color: Rgba) {
        self.background = color;
    }

    /// Decode `bytes` and stretch it over the whole canvas.
    pub fn set_background_image(&mut self, bytes: &[u8]) -> Result<()> {
        let decoded = image::load_from_memory(bytes)?;
        let resized = decoded
            .resize_exact(self.width(), self.height(), FilterType::Triangle)
            .to_rgba8();
        self.background_image = Some(resized);
        Ok(())
    }

    pub fn clear_background_image(&mut self) {
        self.background_image = None;
    }

    /// Erase all ink. Background settings are kept.
    pub fn clear(&mut self) {
        for p in self.strokes.pixels_mut() {
            *p = TRANSPARENT;
        }
        self.last_point = None;
        self.dirty = false;
    }

    pub fn begin_stroke(&mut self, x: i32, y: i32) {
        self.stamp(x, y);
        self.last_point = Some((x, y));
    }

    /// Continue the current stroke to `(x, y)`; starts a new one if none is open.
    pub fn stroke_to(&mut self, x: i32, y: i32) {
        let Some((x0, y0)) = self.last_point else {
            self.begin_stroke(x, y);
            return;
        };

        if let Some(((ax, ay), (bx, by))) = self.clip_segment((x0, y0), (x, y)) {
            // Bresenham
            let dx = (bx - ax).abs();
            let dy = -(by - ay).abs();
            let sx = if ax < bx { 1 } else { -1 };
            let sy = if ay < by { 1 } else { -1 };
            let mut err = dx + dy;
            let (mut cx, mut cy) = (ax, ay);
            loop {
                self.stamp(cx, cy);
                if cx == bx && cy == by {
                    break;
                }
                let e2 = 2 * err;
                if e2 >= dy {
                    err += dy;
                    cx += sx;
                }
                if e2 <= dx {
                    err += dx;
                    cy += sy;
                }
            }
        }
        self.last_point = Some((x, y));
    }

    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }

    /// Composited colour at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let ink = *self.strokes.get_pixel(x, y);
        if ink[3] > 0 {
            return Some(ink);
        }
        let base = match &self.background_image {
            Some(img) => blend(*img.get_pixel(x, y), self.background),
            None => self.background,
        };
        Some(base)
    }

    /// Colour standing in for the pixel block `[x0, x1) × [y0, y1)` when the
    /// canvas is shown at lower resolution. Ink anywhere in the block wins so
    /// thin strokes stay visible; otherwise the block's top-left pixel is used.
    pub fn sample(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Option<Rgba> {
        if x0 >= self.width() || y0 >= self.height() {
            return None;
        }
        let x1 = x1.clamp(x0 + 1, self.width());
        let y1 = y1.clamp(y0 + 1, self.height());
        for y in y0..y1 {
            for x in x0..x1 {
                let ink = *self.strokes.get_pixel(x, y);
                if ink[3] > 0 {
                    return Some(ink);
                }
            }
        }
        self.pixel(x0, y0)
    }

    /// Flatten background, background image and ink into one image.
    pub fn render(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            self.pixel(x, y).unwrap_or(self.background)
        })
    }

    /// PNG encoding of [`Canvas::render`]; this is what gets sent as a drawing.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.render().write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    /// Cut the segment `a`-`b` down to the canvas grown by the brush radius.
    /// Endpoints of the result fit comfortably in `i32`, so tracing it cannot
    /// overflow. `None` when the segment misses the canvas entirely.
    fn clip_segment(&self, a: (i32, i32), b: (i32, i32)) -> Option<((i32, i32), (i32, i32))> {
        let r = (self.stroke_width / 2) as f64;
        let (min_x, min_y) = (-r, -r);
        let (max_x, max_y) = (self.width() as f64 + r, self.height() as f64 + r);
        let (ax, ay) = (a.0 as f64, a.1 as f64);
        let (dx, dy) = (b.0 as f64 - ax, b.1 as f64 - ay);

        // Liang-Barsky
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in [(-dx, ax - min_x), (dx, max_x - ax), (-dy, ay - min_y), (dy, max_y - ay)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }
        let at = |t: f64| ((ax + t * dx).round() as i32, (ay + t * dy).round() as i32);
        Some((at(t0), at(t1)))
    }

    fn stamp(&mut self, cx: i32, cy: i32) {
        let w = self.stroke_width as i32;
        let r = w / 2;
        let r2 = (w * w) / 4;
        let (width, height) = (self.width() as i32, self.height() as i32);
        if cx < -r || cy < -r || cx > width + r || cy > height + r {
            return;
        }
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r2.max(0) {
                    continue;
                }
                let (px, py) = (cx + dx, cy + dy);
                if px < 0 || py < 0 || px >= width || py >= height {
                    continue;
                }
                self.strokes.put_pixel(px as u32, py as u32, self.stroke_color);
                self.dirty = true;
            }
        }
    }
}

/// Alpha-composite `top` over an opaque `bottom`.
fn blend(top: Rgba, bottom: Rgba) -> Rgba {
    let a = top[3] as u32;
    let mix = |t: u8, b: u8| ((t as u32 * a + b as u32 * (255 - a)) / 255) as u8;
    image::Rgba([
        mix(top[0], bottom[0]),
        mix(top[1], bottom[1]),
        mix(top[2], bottom[2]),
        255,
    ])
}
