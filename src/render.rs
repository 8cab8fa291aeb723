use std::path::Path;

use crate::grid::Grid;
use crate::histogram::Histogram;

// Sequential ramp, dark for empty cells
const RAMP: [[u8; 4]; 5] = [
    [12, 7, 40, 255],
    [80, 18, 123, 255],
    [182, 54, 121, 255],
    [251, 136, 97, 255],
    [252, 253, 191, 255],
];

/// Color for `t` in [0, 1], blended between the two nearest ramp stops.
fn ramp(t: f64) -> [u8; 4] {
    let pos = t.clamp(0.0, 1.0) * (RAMP.len() - 1) as f64;
    let i = (pos.floor() as usize).min(RAMP.len() - 2);
    let frac = pos - i as f64;
    let (lo, hi) = (RAMP[i], RAMP[i + 1]);
    let mut color = [255u8; 4];
    for (c, out) in color.iter_mut().take(3).enumerate() {
        let (a, b) = (f64::from(lo[c]), f64::from(hi[c]));
        *out = (a + (b - a) * frac).round() as u8;
    }
    color
}

/// Map a field linearly from its min to its max. Row `r`, column `c` becomes pixel (c, r).
pub fn render_field(field: &Grid<f64>) -> Vec<u8> {
    let (min, max) = field.min_max().unwrap_or((0.0, 0.0));
    let range = max - min;
    let mut rgba = vec![0u8; field.rows * field.cols * 4];
    for (i, &v) in field.data.iter().enumerate() {
        let t = if range > 0.0 { (v - min) / range } else { 0.0 };
        rgba[i * 4..i * 4 + 4].copy_from_slice(&ramp(t));
    }
    rgba
}

/// Histogram with X to the right and Y pointing up. Returns (rgba, width, height).
pub fn render_histogram(hist: &Histogram) -> (Vec<u8>, usize, usize) {
    let w = hist.x.len();
    let h = hist.y.len();
    let mut image = Grid::new(h, w);
    for ix in 0..w {
        for iy in 0..h {
            image.set(h - 1 - iy, ix, hist.counts.get(ix, iy));
        }
    }
    (render_field(&image), w, h)
}

pub fn save_png(path: &Path, rgba: &[u8], w: usize, h: usize) -> image::ImageResult<()> {
    image::save_buffer(path, rgba, w as u32, h as u32, image::ColorType::Rgba8)
}
