use crate::config::AxisRange;
use crate::error::{AxisName, Error, Result};

/// Bin edges and sample points for one histogram axis.
///
/// Both sequences come from repeated addition of the bin width, so the last element may
/// sit a rounding error away from the nominal bound. That drift is part of the binning.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub name: AxisName,
    pub edges: Vec<f64>,
    pub points: Vec<f64>,
}

impl Axis {
    pub fn generate(name: AxisName, range: &AxisRange) -> Result<Self> {
        let w = range.bin_width;
        if !w.is_finite() || w <= 0.0 {
            return Err(Error::InvalidAxis {
                axis: name,
                reason: format!("bin width must be a positive number, got {w}"),
            });
        }
        if !range.low.is_finite() || !range.high.is_finite() {
            return Err(Error::InvalidAxis {
                axis: name,
                reason: format!("range [{}, {}] is not finite", range.low, range.high),
            });
        }

        let stalled = || Error::InvalidAxis {
            axis: name,
            reason: format!(
                "bin width {w} is too small to advance across [{}, {}]",
                range.low, range.high
            ),
        };
        let half = w.abs() / 2.0;
        let edges = accumulate_steps(range.low - half, range.high + half, w).ok_or_else(stalled)?;
        let points = accumulate_steps(range.low, range.high, w).ok_or_else(stalled)?;
        if points.is_empty() {
            return Err(Error::InvalidAxis {
                axis: name,
                reason: format!("range [{}, {}] holds no grid points", range.low, range.high),
            });
        }

        Ok(Self {
            name,
            edges,
            points,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bin holding `value`: one below the first edge that is not less than it.
    ///
    /// A value equal to an edge lands in the lower bin. Returns None below the first edge,
    /// past the last edge, or past the last grid point.
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let i = self.edges.iter().position(|&edge| value <= edge)?;
        let bin = i.checked_sub(1)?;
        (bin < self.points.len()).then_some(bin)
    }
}

/// `start, start + step, ...` while the running sum stays `<= end`.
///
/// None when adding `step` no longer changes the running sum before `end` is passed.
fn accumulate_steps(start: f64, end: f64, step: f64) -> Option<Vec<f64>> {
    let mut out = Vec::new();
    let mut v = start;
    while v <= end {
        out.push(v);
        let next = v + step;
        if next == v {
            return None;
        }
        v = next;
    }
    Some(out)
}
