use clap::Parser;
use prepa::core::catalog::load_catalog;
use prepa::core::config::{self, CliOverrides};
use prepa::core::registry::ContentRegistry;
use prepa::core::state::App;
use prepa::report::check_report;
use prepa::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prepa", about = "Brevet and Bac exam preparation")]
struct Args {
    /// Catalog of exams and subjects (matieres.json)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Directory holding the year pages
    #[arg(long)]
    content: Option<PathBuf>,

    /// Most recent year offered for every subject
    #[arg(long)]
    latest_year: Option<i32>,

    /// Validate the catalog and content pages, print a report and exit
    #[arg(long)]
    check: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to prepa.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("prepa.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::other(e)
    })?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            catalog: args.catalog,
            content_dir: args.content,
            latest_year: args.latest_year,
        },
    );
    log::info!("Prepa starting up with {:?}", resolved);

    let catalog = load_catalog(&resolved.catalog).map_err(|e| {
        log::error!("{}", e);
        std::io::Error::other(e)
    })?;
    let registry = ContentRegistry::discover(&resolved.content_dir, &catalog, resolved.latest_year);

    if args.check {
        let report = check_report(&catalog, &registry, resolved.latest_year);
        print!("{}", report.text);
        if !report.is_complete() {
            std::process::exit(1);
        }
        return Ok(());
    }

    tui::run(App::from_config(catalog, &resolved), registry)
}
