use std::path::PathBuf;

use clap::Parser;

use crate::config::{AxisRange, Params};

/// Average TRENTo entropy-density grids and bin binary collision points over an event range.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, allow_negative_numbers = true)]
pub struct Args {
    /// Directory holding `{id}.dat` and `bcp{id}.dat` per event
    pub src_dir: PathBuf,

    /// First event ID (inclusive)
    #[arg(value_name = "eventIDLow")]
    pub event_low: u64,

    /// Last event ID (inclusive)
    #[arg(value_name = "eventIDHigh")]
    pub event_high: u64,

    #[arg(value_name = "xRangeLow", allow_hyphen_values = true)]
    pub x_low: f64,

    #[arg(value_name = "xRangeHigh", allow_hyphen_values = true)]
    pub x_high: f64,

    /// Histogram bin width along x
    #[arg(value_name = "xBinW", allow_hyphen_values = true)]
    pub x_bin_width: f64,

    #[arg(value_name = "yRangeLow", allow_hyphen_values = true)]
    pub y_low: f64,

    #[arg(value_name = "yRangeHigh", allow_hyphen_values = true)]
    pub y_high: f64,

    /// Histogram bin width along y
    #[arg(value_name = "yBinW", allow_hyphen_values = true)]
    pub y_bin_width: f64,

    /// Directory for sdavg.dat and bcdensity.dat
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Also save PNG previews of both outputs into this directory
    #[arg(long)]
    pub preview_dir: Option<PathBuf>,

    /// Write a JSON run report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl Args {
    pub fn into_params(self) -> Params {
        let mut params = Params::new(
            self.src_dir,
            (self.event_low, self.event_high),
            AxisRange::new(self.x_low, self.x_high, self.x_bin_width),
            AxisRange::new(self.y_low, self.y_high, self.y_bin_width),
        );
        params.out_dir = self.out_dir;
        params.preview_dir = self.preview_dir;
        params.report = self.report;
        params
    }
}
