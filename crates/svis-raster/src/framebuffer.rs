//! In-memory RGB framebuffer with the drawing primitives used by the map renderer

use crate::color::Rgb;
use crate::error::{RasterError, RasterResult};
use crate::font::{glyph, GLYPH_SIZE};

/// Crosshair arm length and the gap left around the centre pixel
const CROSSHAIR_ARM: i32 = 5;
const CROSSHAIR_GAP: i32 = 3;

/// Row-major grid of pixels, row 0 at the top
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Framebuffer {
    /// Black framebuffer; both dimensions must be non-zero
    pub fn new(width: usize, height: usize) -> RasterResult<Self> {
        if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height, pixels: vec![Rgb::BLACK; width * height] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgb::BLACK);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Number of pixels that are not black
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != Rgb::BLACK).count()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Write one pixel; out-of-bounds writes are ignored
    #[inline]
    pub fn point(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Filled disk of every pixel within `radius` of the centre, clipped to bounds
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb) {
        if radius < 0 {
            return;
        }
        let r = i64::from(radius);
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let (w, h) = (self.width as i64, self.height as i64);

        let y_lo = (cy - r).max(0);
        let y_hi = (cy + r).min(h - 1);
        let x_lo = (cx - r).max(0);
        let x_hi = (cx + r).min(w - 1);

        for y in y_lo..=y_hi {
            let dy = y - cy;
            for x in x_lo..=x_hi {
                let dx = x - cx;
                if dx * dx + dy * dy <= r * r {
                    self.pixels[(y * w + x) as usize] = color;
                }
            }
        }
    }

    /// Integer Bresenham line. A segment with any negative endpoint
    /// coordinate is skipped entirely. Returns the number of steps taken,
    /// never more than twice the longer screen dimension.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) -> usize {
        if x0 < 0 || y0 < 0 || x1 < 0 || y1 < 0 {
            return 0;
        }

        let max_steps = 2 * self.width.max(self.height);
        let (mut x, mut y) = (i64::from(x0), i64::from(y0));
        let (x1, y1) = (i64::from(x1), i64::from(y1));

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut steps = 0;
        loop {
            if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
                self.pixels[y as usize * self.width + x as usize] = color;
            }
            if (x == x1 && y == y1) || steps >= max_steps {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            steps += 1;
        }
        steps
    }

    /// Fixed-advance 8x8 text with its top-left corner at (x, y).
    /// Characters without a glyph leave a blank cell.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        let mut pen_x = x;
        for c in text.chars() {
            if let Some(rows) = glyph(c) {
                for (row, bits) in (0..).zip(rows.iter()) {
                    for col in 0..GLYPH_SIZE {
                        if (*bits >> col) & 1 == 1 {
                            self.point(pen_x + col, y + row, color);
                        }
                    }
                }
            }
            pen_x = pen_x.saturating_add(GLYPH_SIZE);
        }
    }

    /// Four short arms around the screen centre, leaving the centre itself clear
    pub fn draw_crosshair(&mut self, color: Rgb) {
        let cx = (self.width / 2) as i32;
        let cy = (self.height / 2) as i32;
        for d in CROSSHAIR_GAP..CROSSHAIR_GAP + CROSSHAIR_ARM {
            self.point(cx, cy - d, color);
            self.point(cx, cy + d, color);
            self.point(cx - d, cy, color);
            self.point(cx + d, cy, color);
        }
    }
}
