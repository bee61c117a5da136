use chatdeck_core::{Canvas, Rgba};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Draws a [`Canvas`] with half-block cells: each terminal cell shows two
/// vertically stacked canvas blocks, the top as foreground of `▀` and the
/// bottom as background.
pub struct CanvasView<'a> {
    canvas: &'a Canvas,
}

impl<'a> CanvasView<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (w, h) = (self.canvas.width(), self.canvas.height());
        let cols = area.width as u32;
        let rows = area.height as u32 * 2;

        for cy in 0..area.height {
            for cx in 0..area.width {
                let (x0, x1) = span(cx as u32, cols, w);
                let top = span(cy as u32 * 2, rows, h);
                let bottom = span(cy as u32 * 2 + 1, rows, h);
                let fg = self.canvas.sample(x0, top.0, x1, top.1);
                let bg = self.canvas.sample(x0, bottom.0, x1, bottom.1);

                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_symbol("▀");
                    if let Some(p) = fg {
                        cell.set_fg(to_color(p));
                    }
                    if let Some(p) = bg {
                        cell.set_bg(to_color(p));
                    }
                }
            }
        }
    }
}

/// Pixel range `[start, end)` covered by block `i` of `blocks` over `pixels`.
fn span(i: u32, blocks: u32, pixels: u32) -> (u32, u32) {
    let start = i * pixels / blocks;
    let end = ((i + 1) * pixels / blocks).max(start + 1);
    (start, end)
}

fn to_color(p: Rgba) -> Color {
    Color::Rgb(p[0], p[1], p[2])
}

pub fn to_hex(p: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", p[0], p[1], p[2])
}

/// Canvas pixel under the terminal cell `(col, row)` of a view drawn in
/// `area`. Positions outside the view are clamped to its edge so a drag
/// that leaves the canvas keeps drawing along the border.
pub fn cell_to_pixel(area: Rect, canvas: &Canvas, col: u16, row: u16) -> (i32, i32) {
    let cols = area.width.max(1) as u32;
    let rows = area.height.max(1) as u32 * 2;
    let cx = col.clamp(area.x, area.x + area.width.max(1) - 1) - area.x;
    let cy = row.clamp(area.y, area.y + area.height.max(1) - 1) - area.y;

    let x = (cx as u32 * 2 + 1) * canvas.width() / (cols * 2);
    // Centre of the cell, i.e. the boundary between its two half-blocks.
    let y = (cy as u32 * 2 + 1) * canvas.height() / rows;
    (x as i32, y as i32)
}

pub fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatdeck_core::parse_hex_color;

    fn canvas() -> Canvas {
        Canvas::new(
            60,
            30,
            parse_hex_color("#ffffff").unwrap(),
            parse_hex_color("#ff0000").unwrap(),
            1,
        )
    }

    #[test]
    fn test_span_covers_every_pixel() {
        let mut covered = 0;
        for i in 0..7 {
            let (a, b) = span(i, 7, 60);
            assert!(b > a);
            covered += b - a;
        }
        assert_eq!(covered, 60);
    }

    #[test]
    fn test_cell_to_pixel_maps_and_clamps() {
        let c = canvas();
        let area = Rect::new(10, 5, 30, 15);
        assert_eq!(cell_to_pixel(area, &c, 10, 5), (1, 1));
        assert_eq!(cell_to_pixel(area, &c, 39, 19), (59, 29));
        assert_eq!(cell_to_pixel(area, &c, 0, 0), (1, 1));
        assert_eq!(cell_to_pixel(area, &c, 200, 200), (59, 29));
    }

    #[test]
    fn test_render_shows_ink() {
        let mut c = canvas();
        c.begin_stroke(0, 0);
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        CanvasView::new(&c).render(area, &mut buf);

        let first = &buf[(0, 0)];
        assert_eq!(first.symbol(), "▀");
        assert_eq!(first.fg, Color::Rgb(255, 0, 0));
        assert_eq!(first.bg, Color::Rgb(255, 255, 255));
        assert_eq!(buf[(5, 2)].fg, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(parse_hex_color("#e40").unwrap()), "#ee4400");
    }
}
