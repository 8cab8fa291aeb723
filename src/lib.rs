pub mod axis;
pub mod cli;
pub mod collisions;
pub mod config;
pub mod density;
pub mod error;
pub mod grid;
pub mod histogram;
pub mod render;
pub mod report;
pub mod text;

use std::time::Instant;

use serde::Serialize;

use axis::Axis;
use config::Params;
use error::{AxisName, Error, Result, Stage};
use grid::Grid;
use histogram::Histogram;

#[derive(Clone, Debug, Serialize)]
pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// What one run produced.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub events: u64,
    /// `(rows, cols)` of the averaged density grid.
    pub density_shape: (usize, usize),
    /// `(x points, y points)` of the collision histogram.
    pub histogram_shape: (usize, usize),
    pub collision_points: usize,
    /// Histogram was divided by `10^decade_exponent`.
    pub decade_exponent: i32,
    pub timings: Vec<Timing>,
}

fn elapsed_ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

/// Average the density grids and bin the collision points of every event in range,
/// then write `sdavg.dat` and `bcdensity.dat` to the output directory.
///
/// Any failure aborts the whole run; outputs are written only after every event succeeded.
pub fn run(params: &Params) -> Result<Summary> {
    params.validate()?;
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Grid shape from the first event
    let t = Instant::now();
    let first = params.density_path(params.event_low);
    let (rows, cols) = density::measure_grid(&first)?;
    let mut density_sum: Grid<f64> = Grid::new(rows, cols);
    log::info!("density grid {}x{} from {}", rows, cols, first.display());
    timings.push(Timing {
        name: "grid_size",
        ms: elapsed_ms(t),
    });

    // 2. Bin edges and sample points
    let t = Instant::now();
    let x_axis = Axis::generate(AxisName::X, &params.x)?;
    let y_axis = Axis::generate(AxisName::Y, &params.y)?;
    let mut hist = Histogram::new(x_axis, y_axis);
    log::info!(
        "histogram {}x{} cells ({} x edges, {} y edges)",
        hist.x.len(),
        hist.y.len(),
        hist.x.edges.len(),
        hist.y.edges.len()
    );
    timings.push(Timing {
        name: "binning",
        ms: elapsed_ms(t),
    });

    // 3. Per-event density sum and collision counting
    let t = Instant::now();
    let mut collision_points = 0;
    for event in params.events() {
        density::accumulate(&mut density_sum, &params.density_path(event), event)?;
        let points = collisions::load(&params.collision_path(event))?;
        hist.count(&points, event)?;
        log::debug!("event {}: {} collision points", event, points.len());
        collision_points += points.len();
    }
    timings.push(Timing {
        name: "events",
        ms: elapsed_ms(t),
    });

    // 4. Averaged density
    let t = Instant::now();
    density::normalize(&mut density_sum, params.event_count());
    let density_out = params.density_output();
    density::export(&density_sum, &density_out)?;
    log::info!("wrote {}", density_out.display());
    timings.push(Timing {
        name: "density_export",
        ms: elapsed_ms(t),
    });

    // 5. Collision density
    let t = Instant::now();
    let decade_exponent = hist.normalize();
    let hist_out = params.histogram_output();
    hist.export(&hist_out)?;
    log::info!(
        "wrote {} (scaled by 1e-{})",
        hist_out.display(),
        decade_exponent
    );
    timings.push(Timing {
        name: "histogram_export",
        ms: elapsed_ms(t),
    });

    // 6. Optional previews
    if let Some(dir) = &params.preview_dir {
        let t = Instant::now();
        write_previews(dir, &density_sum, &hist)?;
        timings.push(Timing {
            name: "preview",
            ms: elapsed_ms(t),
        });
    }

    timings.push(Timing {
        name: "TOTAL",
        ms: elapsed_ms(total_start),
    });

    Ok(Summary {
        events: params.event_count(),
        density_shape: (rows, cols),
        histogram_shape: hist.counts.shape(),
        collision_points,
        decade_exponent,
        timings,
    })
}

fn write_previews(dir: &std::path::Path, density: &Grid<f64>, hist: &Histogram) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| Error::io(Stage::Preview, dir, e))?;

    let path = dir.join("sdavg.png");
    render::save_png(&path, &render::render_field(density), density.cols, density.rows)?;
    log::info!("saved {}", path.display());

    let path = dir.join("bcdensity.png");
    let (rgba, w, h) = render::render_histogram(hist);
    render::save_png(&path, &rgba, w, h)?;
    log::info!("saved {}", path.display());
    Ok(())
}
