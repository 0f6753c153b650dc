use std::env;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

static ENABLE_LOGGING: AtomicBool = AtomicBool::new(false);
static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();

/// Initializes logging based on environment variables:
/// - INTERSIM_LOGGING: enables/disables logging (true/false, unset means false)
/// - INTERSIM_LOG_FILE: when set, log lines are appended to this file instead of stdout
///
/// When enabled, a `tracing` fmt subscriber is installed as well so that the
/// structured events emitted by the comparator and scheduler are printed.
/// To enable logging in tests, run: INTERSIM_LOGGING=true cargo test -- --nocapture
pub fn init_logging() {
    match env::var("INTERSIM_LOGGING") {
        Ok(value) => match value.as_str() {
            "true" => ENABLE_LOGGING.store(true, Ordering::SeqCst),
            "false" => ENABLE_LOGGING.store(false, Ordering::SeqCst),
            _ => panic!("\nError: INTERSIM_LOGGING environment variable must be 'true' or 'false'\n\nTo run the program, use one of:\n  INTERSIM_LOGGING=true cargo run\n  INTERSIM_LOGGING=false cargo run\n"),
        },
        Err(_) => ENABLE_LOGGING.store(false, Ordering::SeqCst),
    }

    if !ENABLE_LOGGING.load(Ordering::SeqCst) {
        return;
    }

    if let Ok(path) = env::var("INTERSIM_LOG_FILE") {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                let _ = LOG_FILE.set(Mutex::new(file));
            }
            Err(e) => eprintln!("Failed to open log file {}: {}", path, e),
        }
    }

    // Called once per test, so a subscriber may already be installed
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn is_enabled() -> bool {
    ENABLE_LOGGING.load(Ordering::SeqCst)
}

pub fn log(prefix: &str, message: &str) {
    if !ENABLE_LOGGING.load(Ordering::SeqCst) {
        return;
    }
    let line = format!("  [{}]   {}", prefix, message);
    match LOG_FILE.get() {
        Some(file) => {
            let mut file = match file.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Err(e) = writeln!(file, "{}", line) {
                eprintln!("Failed to write to log file: {}", e);
            }
        }
        None => println!("{}", line),
    }
}
