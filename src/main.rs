use std::fs::File;
use std::path::Path;
use std::process;

use clap::{crate_authors, crate_description, crate_version, App, Arg};
use failure::Error;
use log::{error, info};
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};

use crate::datasets::{DatasetResolver, FixedDelay};
use crate::output::OutputDocument;
use crate::settings::Settings;
use crate::territory::TerritoryClassifier;

mod datasets;
mod output;
mod pipeline;
mod samples;
mod settings;
mod territory;
#[cfg(test)]
mod test_utils;

fn main() {
    let matches = App::new("SoilData Enricher")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::new("settings")
                .index(1)
                .value_name("SETTINGS")
                .help("Specify an additional settings file")
                .takes_value(true),
        )
        .get_matches();

    let settings_path = matches.value_of("settings").map(Path::new);
    let settings = Settings::new(settings_path).expect("Unable to use config file.");

    initialize_logger(Path::new(&settings.general.log_file), &settings)
        .expect("Unable to initialize logger.");

    let points = match samples::read_source_points(Path::new(&settings.samples.file)) {
        Ok(points) => points,
        Err(e) => {
            error!("Unable to read soil samples: {}", e);
            process::exit(1);
        }
    };
    info!(
        "Read {} sample points from `{}`.",
        points.len(),
        settings.samples.file
    );

    let points = points
        .into_iter()
        .skip(
            settings
                .debug
                .point_start
                .filter(|_| settings.general.debug)
                .unwrap_or(usize::MIN),
        )
        .take(
            settings
                .debug
                .point_limit
                .filter(|_| settings.general.debug)
                .unwrap_or(usize::MAX),
        )
        .collect::<Vec<_>>();

    let classifier = TerritoryClassifier::load(&settings.boundaries);

    let mut resolver = DatasetResolver::new(
        &settings.datasets.search_url,
        Box::new(FixedDelay::from_millis(settings.datasets.request_delay_ms)),
    );

    let codes = pipeline::distinct_dataset_codes(&points);
    info!("Resolving metadata for {} distinct datasets.", codes.len());
    pipeline::resolve_all_datasets(&mut resolver, &codes);

    let enriched = pipeline::enrich_points(
        &points,
        &classifier,
        &mut resolver,
        &settings.datasets.landing_page_url,
    );

    let document = OutputDocument::new(&settings.samples.file, codes.len(), enriched);
    match document.write_to_path(Path::new(&settings.output.file)) {
        Ok(_) => info!(
            "Wrote {} enriched points to `{}`.",
            document.points.len(),
            settings.output.file
        ),
        Err(e) => {
            error!("Unable to write output file: {}", e);
            process::exit(1);
        }
    }
}

/// Initialize the logger.
fn initialize_logger(file_path: &Path, settings: &Settings) -> Result<(), Error> {
    let log_level = if settings.general.debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Ok(file) = File::create(file_path) {
        loggers.push(WriteLogger::new(
            log_level,
            simplelog::Config::default(),
            file,
        ));
    }

    CombinedLogger::init(loggers)?;

    Ok(())
}
