//! Obesity risk estimator
//!
//! Main entry point for the terminal application.

use anyhow::Result;

use obesity_risk::logging::init_logging;
use obesity_risk::tui::App;

fn main() -> Result<()> {
    let _guard = init_logging()?;

    tracing::info!("Starting obesity risk estimator...");

    // Refuse to start without a usable model.
    let mut app = App::new()?;
    app.run()?;

    tracing::info!("Shutdown complete.");
    Ok(())
}
