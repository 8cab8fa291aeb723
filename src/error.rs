use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an I/O or parse failure happened in. Decides the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Sizing,
    Density,
    Collisions,
    DensityExport,
    HistogramExport,
    Preview,
    Report,
}

impl Stage {
    pub fn exit_code(self) -> i32 {
        match self {
            Stage::Sizing => -2,
            Stage::Density => -4,
            Stage::Collisions => -5,
            Stage::DensityExport => -8,
            Stage::HistogramExport => -10,
            Stage::Preview => -11,
            Stage::Report => -12,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Sizing => "grid sizing",
            Stage::Density => "entropy density",
            Stage::Collisions => "collision points",
            Stage::DensityExport => "density export",
            Stage::HistogramExport => "histogram export",
            Stage::Preview => "preview export",
            Stage::Report => "report export",
        };
        f.write_str(name)
    }
}

/// Histogram axis, used to tell X and Y range failures apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisName {
    X,
    Y,
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisName::X => f.write_str("x"),
            AxisName::Y => f.write_str("y"),
        }
    }
}

/// Every failure is fatal to the run; variants carry enough context to locate the bad input.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad command-line argument or parameter combination.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// File could not be opened, read or written.
    #[error("{stage}: unable to access {}: {source}", .path.display())]
    Io {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Token that is not a number, or a line missing tokens.
    #[error("{stage}: {}:{line}: {reason}", .path.display())]
    Parse {
        stage: Stage,
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// First density file has no rows.
    #[error("grid sizing: {} contains no rows", .path.display())]
    EmptyGrid { path: PathBuf },

    /// First density file has rows of differing length.
    #[error("grid sizing: not all row sizes in {} are the same (found {widths:?})", .path.display())]
    RaggedGrid { path: PathBuf, widths: Vec<usize> },

    /// Later density file disagrees with the sized grid.
    #[error(
        "entropy density for event {event}: expected {}x{} grid, found {found}",
        .expected.0,
        .expected.1
    )]
    ShapeMismatch {
        event: u64,
        expected: (usize, usize),
        found: String,
    },

    /// Axis parameters that cannot produce a usable binning.
    #[error("{axis} axis: {reason}")]
    InvalidAxis { axis: AxisName, reason: String },

    /// Collision point outside the histogram range on one axis.
    #[error("event {event}: {axis} point value {value} outside histogram's range")]
    OutOfRange {
        axis: AxisName,
        event: u64,
        value: f64,
    },

    #[error("preview export: {0}")]
    Image(#[from] image::ImageError),

    #[error("report export: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(stage: Stage, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            stage,
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidParam(_) => -1,
            Error::Io { stage, .. } | Error::Parse { stage, .. } => stage.exit_code(),
            Error::EmptyGrid { .. } | Error::RaggedGrid { .. } => -2,
            Error::InvalidAxis { .. } => -3,
            Error::ShapeMismatch { .. } => -4,
            Error::OutOfRange { .. } => -6,
            Error::Image(_) => Stage::Preview.exit_code(),
            Error::Json(_) => Stage::Report.exit_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_pipeline_stage() {
        let e = Error::io(
            Stage::Collisions,
            "bcp3.dat",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(e.exit_code(), -5);
        assert_eq!(Error::InvalidParam("x".into()).exit_code(), -1);
        assert_eq!(
            Error::RaggedGrid {
                path: "1.dat".into(),
                widths: vec![2, 3],
            }
            .exit_code(),
            -2
        );
    }

    #[test]
    fn out_of_range_names_axis() {
        let e = Error::OutOfRange {
            axis: AxisName::Y,
            event: 7,
            value: 12.5,
        };
        let msg = format!("{e}");
        assert!(msg.contains("y point value 12.5"));
        assert!(msg.contains("event 7"));
        assert_eq!(e.exit_code(), -6);
    }
}
