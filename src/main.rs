use std::sync::Arc;

use wetterdeck_core::{AppError, Config};
use wetterdeck_notify::{DesktopBackend, ReminderScheduler};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!("startup failed: {e}");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Initialize core
    wetterdeck_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    std::fs::create_dir_all(&config.config_dir)?;

    tracing::info!("Wetterdeck service started");
    tracing::debug!(
        "UI preferences: {}x{}, dark mode {}",
        config.ui.window_width,
        config.ui.window_height,
        config.ui.dark_mode
    );

    // Re-arm the daily reminder for this session, if the user enabled it.
    let backend = Arc::new(DesktopBackend::new());
    let scheduler = ReminderScheduler::new(&config.config_dir, backend);
    scheduler.restore_from_storage();

    println!("Wetterdeck - Personal Weather Dashboard Service");
    println!("\nConfiguration:");
    println!("  Config directory: {}", config.config_dir.display());
    println!(
        "  Daily reminder:   {}",
        if scheduler.is_enabled() { "enabled" } else { "disabled" }
    );

    // Park until interrupted; dropping the scheduler tears the timers
    // down without touching the persisted record.
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    Ok(())
}
