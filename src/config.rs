use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, Result};

pub const DENSITY_OUTPUT: &str = "sdavg.dat";
pub const HISTOGRAM_OUTPUT: &str = "bcdensity.dat";

/// Range and bin width for one histogram axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisRange {
    pub low: f64,
    pub high: f64,
    pub bin_width: f64,
}

impl AxisRange {
    pub fn new(low: f64, high: f64, bin_width: f64) -> Self {
        Self {
            low,
            high,
            bin_width,
        }
    }
}

/// Everything one averaging run needs. Built from the command line.
#[derive(Clone, Debug, Serialize)]
pub struct Params {
    pub src_dir: PathBuf,
    pub event_low: u64,
    pub event_high: u64,
    pub x: AxisRange,
    pub y: AxisRange,

    /// Directory receiving `sdavg.dat` and `bcdensity.dat`.
    pub out_dir: PathBuf,
    pub preview_dir: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl Params {
    pub fn new(src_dir: impl Into<PathBuf>, events: (u64, u64), x: AxisRange, y: AxisRange) -> Self {
        Self {
            src_dir: src_dir.into(),
            event_low: events.0,
            event_high: events.1,
            x,
            y,
            out_dir: PathBuf::from("."),
            preview_dir: None,
            report: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_high < self.event_low {
            return Err(Error::InvalidParam(format!(
                "eventIDHigh ({}) is below eventIDLow ({})",
                self.event_high, self.event_low
            )));
        }
        Ok(())
    }

    /// Inclusive on both ends, so always at least 1 for a valid range.
    pub fn event_count(&self) -> u64 {
        self.event_high - self.event_low + 1
    }

    pub fn events(&self) -> std::ops::RangeInclusive<u64> {
        self.event_low..=self.event_high
    }

    /// `{src_dir}/{event}.dat`
    pub fn density_path(&self, event: u64) -> PathBuf {
        self.src_dir.join(format!("{event}.dat"))
    }

    /// `{src_dir}/bcp{event}.dat`
    pub fn collision_path(&self, event: u64) -> PathBuf {
        self.src_dir.join(format!("bcp{event}.dat"))
    }

    pub fn density_output(&self) -> PathBuf {
        self.out_dir.join(DENSITY_OUTPUT)
    }

    pub fn histogram_output(&self) -> PathBuf {
        self.out_dir.join(HISTOGRAM_OUTPUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(low: u64, high: u64) -> Params {
        Params::new(
            "runs/pbpb",
            (low, high),
            AxisRange::new(-1.0, 1.0, 0.5),
            AxisRange::new(-1.0, 1.0, 0.5),
        )
    }

    #[test]
    fn event_file_names() {
        let p = params(3, 5);
        assert_eq!(p.density_path(4), PathBuf::from("runs/pbpb/4.dat"));
        assert_eq!(p.collision_path(4), PathBuf::from("runs/pbpb/bcp4.dat"));
        assert_eq!(p.density_output(), PathBuf::from("./sdavg.dat"));
        assert_eq!(p.histogram_output(), PathBuf::from("./bcdensity.dat"));
    }

    #[test]
    fn trailing_slash_is_equivalent() {
        let mut p = params(0, 0);
        p.src_dir = PathBuf::from("runs/pbpb/");
        assert_eq!(p.density_path(0), PathBuf::from("runs/pbpb/0.dat"));
    }

    #[test]
    fn event_range_is_inclusive() {
        let p = params(3, 5);
        assert_eq!(p.event_count(), 3);
        assert_eq!(p.events().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert!(params(7, 7).validate().is_ok());
        assert_eq!(params(7, 7).event_count(), 1);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = params(5, 3).validate().unwrap_err();
        assert_eq!(err.exit_code(), -1);
    }
}
