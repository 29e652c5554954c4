use anyhow::Result;
use shiftbell::cli;
use shiftbell::config::Config;
use shiftbell::context::{AppContext, StandardContext};
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Handle help flag
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        cli::print_help("shiftbell");
        return Ok(());
    }

    // Optional --root <path> override for config and data directories.
    let mut override_root: Option<PathBuf> = None;
    let mut i = 1;
    while i < args.len() {
        if (args[i] == "--root" || args[i] == "-r") && i + 1 < args.len() {
            override_root = Some(PathBuf::from(&args[i + 1]));
            i += 1;
        }
        i += 1;
    }

    let ctx = Arc::new(StandardContext::new(override_root));

    // Log to a file; the terminal belongs to the TUI.
    if let Some(log_path) = ctx.get_log_path()
        && let Ok(file) = std::fs::File::create(&log_path)
    {
        let _ = WriteLogger::init(LevelFilter::Info, LogConfig::default(), file);
    }

    let cfg = match Config::load(ctx.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            // A missing config is a fresh install; anything else is a
            // syntax/permission problem the user should fix.
            if !Config::is_missing_config_error(&e) {
                eprintln!("Error loading configuration:\n{}", e);
                std::process::exit(1);
            }
            let defaults = Config::default();
            if let Err(save_err) = defaults.save(ctx.as_ref()) {
                log::warn!("could not write default config: {}", save_err);
            }
            defaults
        }
    };

    shiftbell::tui::run(ctx, cfg).await
}
