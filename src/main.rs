mod config;
mod loader;
mod logger;
mod model;
mod processor;
mod report;

use std::process;
use std::time::Instant;

use config::Config;
use logger::{ReportLog, ReportSink};
use model::error::ProcessorError;
use model::product::PriceCatalog;
use crate::processor::SalesProcessor;

fn main() {
    logger::init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ProcessorError> {
    let config = Config::from_env()?;

    // Both inputs must load before anything is written.
    let report = compute_report(&config)?;
    println!("{report}");

    let log = ReportLog::open(&config.report_path)?;
    log.append(&report)?;
    println!("Results appended in {}", log.path().display());

    Ok(())
}

fn compute_report(config: &Config) -> Result<String, ProcessorError> {
    let catalog_records = loader::load_records(&config.catalog_path)?;
    let sales = loader::load_records(&config.sales_path)?;
    let catalog = PriceCatalog::from_records(&catalog_records)?;

    let started = Instant::now();
    let result = SalesProcessor::new(&catalog).reconcile(&sales);
    let elapsed = started.elapsed();

    Ok(report::format_report(
        result.total_cost,
        elapsed,
        &result.error_messages(),
        &chrono::Local::now(),
    ))
}
