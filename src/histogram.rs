//! Binary-collision density: count points per cell, rescale by a power of ten, export.

use std::io::Write;
use std::path::Path;

use crate::axis::Axis;
use crate::collisions::CollisionPoint;
use crate::error::{AxisName, Error, Result, Stage};
use crate::grid::Grid;
use crate::text;

pub struct Histogram {
    pub x: Axis,
    pub y: Axis,
    /// Indexed `[x][y]`.
    pub counts: Grid<f64>,
}

impl Histogram {
    pub fn new(x: Axis, y: Axis) -> Self {
        let counts = Grid::new(x.len(), y.len());
        Self { x, y, counts }
    }

    /// Locate the cell of a point without counting it.
    pub fn cell(&self, p: &CollisionPoint, event: u64) -> Result<(usize, usize)> {
        let i = self.x.bin_index(p.x).ok_or(Error::OutOfRange {
            axis: AxisName::X,
            event,
            value: p.x,
        })?;
        let j = self.y.bin_index(p.y).ok_or(Error::OutOfRange {
            axis: AxisName::Y,
            event,
            value: p.y,
        })?;
        Ok((i, j))
    }

    /// Count one event's points. Stops at the first point outside the binning range.
    pub fn count(&mut self, points: &[CollisionPoint], event: u64) -> Result<()> {
        for p in points {
            let (i, j) = self.cell(p, event)?;
            self.counts.add(i, j, 1.0);
        }
        Ok(())
    }

    /// Divide by `10^k` with the smallest `k >= 1` that brings the maximum below 1.
    /// Returns `k`.
    pub fn normalize(&mut self) -> i32 {
        let k = decade_exponent(self.counts.max_from(0.0));
        self.counts.scale_down(10f64.powi(k));
        k
    }

    /// `x y value` per cell, X-major.
    pub fn write<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for (ix, x) in self.x.points.iter().enumerate() {
            for (iy, y) in self.y.points.iter().enumerate() {
                writeln!(out, "{x:5.2} {y:5.2} {:7.6}", self.counts.get(ix, iy))?;
            }
        }
        Ok(())
    }

    pub fn export(&self, path: &Path) -> Result<()> {
        let mut out = text::create(Stage::HistogramExport, path)?;
        self.write(&mut out)
            .and_then(|_| out.flush())
            .map_err(|e| Error::io(Stage::HistogramExport, path, e))
    }
}

/// Starts at 1 and adds one per factor of ten in `max`.
fn decade_exponent(mut max: f64) -> i32 {
    let mut k = 1;
    while max >= 10.0 {
        k += 1;
        max /= 10.0;
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxisRange;
    use approx::assert_relative_eq;

    fn unit_histogram() -> Histogram {
        let r = AxisRange::new(0.0, 2.0, 1.0);
        Histogram::new(
            Axis::generate(AxisName::X, &r).unwrap(),
            Axis::generate(AxisName::Y, &r).unwrap(),
        )
    }

    fn pt(x: f64, y: f64) -> CollisionPoint {
        CollisionPoint { x, y }
    }

    #[test]
    fn counts_points_per_cell() {
        let mut h = unit_histogram();
        h.count(&[pt(0.1, 1.9), pt(0.5, 2.2), pt(1.2, 0.0)], 1).unwrap();
        h.count(&[pt(-0.2, 2.4)], 2).unwrap();
        assert_eq!(h.counts.get(0, 2), 3.0);
        assert_eq!(h.counts.get(1, 0), 1.0);
        assert_eq!(h.counts.data.iter().sum::<f64>(), 4.0);
    }

    #[test]
    fn out_of_range_is_axis_specific() {
        let mut h = unit_histogram();
        let err = h.count(&[pt(3.0, 0.0)], 4).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { axis: AxisName::X, event: 4, .. }));

        let err = h.count(&[pt(0.0, -0.5)], 5).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { axis: AxisName::Y, event: 5, .. }));
        assert_eq!(err.exit_code(), -6);
    }

    #[test]
    fn normalizes_by_power_of_ten() {
        let mut h = unit_histogram();
        h.counts.set(1, 1, 45.0);
        h.counts.set(0, 0, 9.0);
        assert_eq!(h.normalize(), 2);
        assert_relative_eq!(h.counts.get(1, 1), 0.45);
        assert_relative_eq!(h.counts.get(0, 0), 0.09);
    }

    #[test]
    fn small_and_empty_histograms() {
        let mut h = unit_histogram();
        assert_eq!(h.normalize(), 1);
        assert!(h.counts.data.iter().all(|&v| v == 0.0));

        h.counts.set(2, 0, 5.0);
        assert_eq!(h.normalize(), 1);
        assert_relative_eq!(h.counts.get(2, 0), 0.5);
    }

    #[test]
    fn decades() {
        assert_eq!(decade_exponent(0.0), 1);
        assert_eq!(decade_exponent(9.99), 1);
        assert_eq!(decade_exponent(10.0), 2);
        assert_eq!(decade_exponent(999.0), 3);
        assert_eq!(decade_exponent(1000.0), 4);
    }

    #[test]
    fn fixed_width_rows() {
        let mut h = unit_histogram();
        h.counts.set(0, 1, 0.45);
        let mut buf = Vec::new();
        h.write(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], " 0.00  0.00 0.000000");
        assert_eq!(lines[1], " 0.00  1.00 0.450000");
        assert_eq!(lines[8], " 2.00  2.00 0.000000");
    }

    #[test]
    fn negative_labels_fill_width() {
        let r = AxisRange::new(-10.0, -10.0, 1.0);
        let mut h = Histogram::new(
            Axis::generate(AxisName::X, &r).unwrap(),
            Axis::generate(AxisName::Y, &AxisRange::new(-1.0, -1.0, 1.0)).unwrap(),
        );
        h.counts.set(0, 0, 1.0);
        let mut buf = Vec::new();
        h.write(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "-10.00 -1.00 1.000000\n");
    }
}
