use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::log_store::LogStore;
use crate::ui::messages::{success, warning};
use crate::utils::path::display_absolute;
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode)
///  - the CSV log with its header row, if missing
pub fn handle(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    let Commands::Init { projects } = &cli.command else {
        return Ok(());
    };

    //
    // 1️⃣ Merge projects given on the command line
    //
    let mut cfg = cfg.clone();
    for p in projects.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        if !cfg.projects.iter().any(|existing| existing == p) {
            cfg.projects.push(p.to_string());
        }
    }

    println!("⚙️  Initializing rTimePrompt…");

    //
    // 2️⃣ Config file
    //
    if !cli.test {
        cfg.save_to(config_path)?;
        success(format!("Config file: {}", config_path.display()));
    }

    //
    // 3️⃣ CSV log
    //
    let store = LogStore::new(cfg.log_path());
    if store.ensure_initialized()? {
        success(format!(
            "Created new timetracking CSV file: {}",
            display_absolute(store.path())
        ));
    } else {
        success(format!("CSV file: {}", display_absolute(store.path())));
    }

    if cfg.project_names().is_empty() {
        warning("No projects configured yet. Add some with `rtimeprompt init --project <NAME>`.");
    }

    println!("🎉 rTimePrompt initialization completed!");
    Ok(())
}
