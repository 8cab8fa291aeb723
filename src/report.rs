use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::config::Params;
use crate::error::{Error, Result, Stage};
use crate::{Summary, text};

#[derive(Serialize)]
struct Report<'a> {
    params: &'a Params,
    #[serde(flatten)]
    summary: &'a Summary,
}

pub fn to_json(params: &Params, summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Report { params, summary })?)
}

/// Write the parameters and summary of a finished run as pretty JSON.
pub fn write_report(path: &Path, params: &Params, summary: &Summary) -> Result<()> {
    let json = to_json(params, summary)?;
    let mut out = text::create(Stage::Report, path)?;
    writeln!(out, "{json}")
        .and_then(|_| out.flush())
        .map_err(|e| Error::io(Stage::Report, path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timing;
    use crate::config::AxisRange;

    #[test]
    fn report_has_params_and_summary() {
        let params = Params::new(
            "runs",
            (1, 4),
            AxisRange::new(-5.0, 5.0, 0.5),
            AxisRange::new(-5.0, 5.0, 0.5),
        );
        let summary = Summary {
            events: 4,
            density_shape: (100, 100),
            histogram_shape: (21, 21),
            collision_points: 812,
            decade_exponent: 3,
            timings: vec![Timing {
                name: "TOTAL",
                ms: 1.5,
            }],
        };

        let json = to_json(&params, &summary).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["params"]["event_high"], 4);
        assert_eq!(v["params"]["x"]["bin_width"], 0.5);
        assert_eq!(v["collision_points"], 812);
        assert_eq!(v["density_shape"][0], 100);
        assert_eq!(v["timings"][0]["name"], "TOTAL");
    }
}
