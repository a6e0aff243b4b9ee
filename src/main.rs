//! Brick Breaker entry point
//!
//! Sets up logging and settings, then hands over to the terminal shell.

use std::fs::File;

use brick_breaker::Settings;

/// Log file path; stderr is unusable while the game owns the terminal
const LOG_FILE_ENV: &str = "BRICK_BREAKER_LOG";

fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Ok(path) = std::env::var(LOG_FILE_ENV) {
        match File::create(&path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", path, e),
        }
    }

    builder.init();
}

fn main() {
    init_logging();
    log::info!("Brick Breaker starting...");

    let settings = Settings::load();

    if let Err(e) = brick_breaker::shell::run(&settings) {
        log::error!("Terminal error: {}", e);
        eprintln!("brick-breaker: {}", e);
        std::process::exit(1);
    }
}
