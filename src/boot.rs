use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::AppConfig;

/// Run all boot checks. Call this before Rocket launches.
/// Verifies provider credentials eagerly (instead of failing lazily on the
/// first request), prepares the failure dump directory, and aborts when a
/// required credential is absent.
pub fn run(config: &AppConfig) {
    info!("Vega planner boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Provider credentials ────────────────────────
    for name in config.missing_credentials() {
        error!("  MISSING credential: {}", name);
        errors += 1;
    }

    // ── 2. Failure dump directory ──────────────────────
    let dir = Path::new(&config.failure_dir);
    if !dir.exists() {
        match fs::create_dir_all(dir) {
            Ok(_) => info!("  Created failure dump directory: {}", config.failure_dir),
            Err(e) => {
                error!(
                    "  FAILED to create failure dump directory {}: {}",
                    config.failure_dir, e
                );
                errors += 1;
            }
        }
    }

    if dir.exists() {
        let test_file = dir.join(".write_test");
        match fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                warn!(
                    "  Failure dump directory not writable: {} (raw payloads will not be saved)",
                    e
                );
                warnings += 1;
            }
        }
    }

    // ── 3. CORS origins ────────────────────────────────
    if config.allowed_origins.is_empty() {
        warn!("  No allowed CORS origins configured; browser clients will be blocked");
        warnings += 1;
    }

    // ── Summary ─────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}
