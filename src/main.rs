use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use trentoavg::cli::Args;
use trentoavg::report;

/// Negative codes wrap to 255, 254, ... as the process exit status.
fn exit_with(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return exit_with(-1);
        }
        Err(e) => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };
    let params = args.into_params();

    log::info!(
        "events {}..={} from {}",
        params.event_low,
        params.event_high,
        params.src_dir.display()
    );

    let summary = match trentoavg::run(&params) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("{e}. Aborting...");
            return exit_with(e.exit_code());
        }
    };

    log::info!(
        "{} events, {} collision points",
        summary.events,
        summary.collision_points
    );
    eprintln!("\nTimings:");
    for t in &summary.timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    if let Some(path) = &params.report {
        if let Err(e) = report::write_report(path, &params, &summary) {
            log::error!("{e}. Aborting...");
            return exit_with(e.exit_code());
        }
        log::info!("wrote {}", path.display());
    }

    ExitCode::SUCCESS
}
