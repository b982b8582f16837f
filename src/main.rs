//! Binary entry point: resolve settings, open the catalog file, run the
//! terminal loop, and write the catalog back on the way out.
use anyhow::Context;
use clap::Parser;
use log::error;

use book_catalog::config::{Cli, Config};
use book_catalog::logging::init_logging;
use book_catalog::{run_app, App, CatalogSession};

/// A corrupt catalog file aborts before anything is written back. A failed
/// save on exit is reported as a warning and the process still exits
/// normally.
fn main() -> anyhow::Result<()> {
    let config = Config::resolve(Cli::parse())?;

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err:#}");
    }

    let session = CatalogSession::open(&config.catalog_path)
        .with_context(|| format!("failed to open {}", config.catalog_path.display()))?;

    let mut app = App::new(session);
    let result = run_app(&mut app);

    if let Err(err) = app.into_session().close() {
        error!("event=app_exit_save status=error error={err:#}");
        eprintln!(
            "warning: changes could not be saved to {}: {:#}",
            config.catalog_path.display(),
            anyhow::Error::from(err)
        );
    }

    result
}
