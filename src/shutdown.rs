//! Ctrl+C handling.
//!
//! The first interrupt asks the run to stop after the current repository,
//! which leaves a report with complete rows. A second interrupt exits at
//! once.

use orglangs_github::CancellationFlag;
use tracing::{error, warn};

/// Exit status used when interrupted.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Spawns the Ctrl+C listener that sets `flag`.
pub fn install_handler(flag: CancellationFlag) {
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to install Ctrl+C handler");
            return;
        }
        warn!("Shutdown requested, finishing current repository. Press Ctrl+C again to force quit.");
        flag.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Force quit!");
            std::process::exit(i32::from(INTERRUPTED_EXIT_CODE));
        }
    });
}
