//! Elemental Map command-line driver
//!
//! Runs one map build and prints the result:
//!
//! ```text
//! elemental-map                  # generate from the default seed
//! elemental-map settings.json    # build as described by a settings file
//! ```

use std::path::Path;
use std::process::ExitCode;

use elemental_map::settings::{MapSettings, MapSource};
use elemental_map::terrain::build_map;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Elemental Map starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match MapSettings::load(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => MapSettings {
            source: MapSource::Seed,
            ..MapSettings::default()
        },
    };

    match settings.source {
        MapSource::File => log::info!("Loading map from {}", settings.map_path().display()),
        MapSource::Seed => log::info!(
            "Generating {}x{} map with seed: {}",
            settings.width,
            settings.height,
            settings.seed
        ),
    }

    let build = match build_map(&settings) {
        Ok(build) => build,
        Err(e) => {
            log::error!("Map build failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", build.grid.to_text());
    println!();
    println!("Buildable plots: {}", build.buildable_plots.len());
    println!("Buildable zones: {:?}", build.zones);
    if build.report.is_empty() {
        println!("Adjacency: ok");
    } else {
        println!("Adjacency findings: {}", build.report.len());
        for finding in &build.report.findings {
            println!("  {}", finding);
        }
    }
    if !build.report.overwritten.is_empty() {
        println!(
            "Findings overwritten by buildable zones: {}",
            build.report.overwritten.len()
        );
    }

    ExitCode::SUCCESS
}
