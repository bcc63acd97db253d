use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::session::{COMMAND_HELP, Session, SessionOptions};
use crate::errors::AppResult;
use crate::store::log_store::LogStore;
use crate::ui::messages::{header, info, success, warning};
use crate::ui::terminal::{TerminalConsumer, spawn_stdin_reader};
use crate::utils::path::display_absolute;
use std::sync::Arc;

/// Start the scheduler session and serve prompts until the user quits.
pub fn handle(cfg: &Config) -> AppResult<()> {
    //
    // 1. Projects and log file
    //
    let projects = cfg.require_projects()?;
    let store = LogStore::new(cfg.log_path());
    if store.ensure_initialized()? {
        success("Created new timetracking CSV file");
    }

    //
    // 2. Describe the schedule
    //
    let table = cfg.schedule();
    header("Time Tracking Scheduler");
    info("The scheduler is running for business days (Monday-Friday)");
    match (table.checkpoints().first(), table.checkpoints().last()) {
        (Some(first), Some(last)) => info(format!(
            "Prompts will appear at {} checkpoints from {} to {}",
            table.checkpoints().len(),
            first,
            last
        )),
        _ => warning("No checkpoints configured: only manual test prompts will appear"),
    }
    info(format!("CSV file location: {}", display_absolute(store.path())));
    println!("{COMMAND_HELP}\n");

    //
    // 3. Foreground loop on this thread, scheduler in the background
    //
    let input = spawn_stdin_reader()?;
    let consumer = TerminalConsumer::new(input.clone());
    let options = SessionOptions {
        projects,
        table,
        poll_interval: cfg.poll_interval(),
        catch_up_missed: cfg.catch_up_missed,
    };
    let mut session = Session::new(options, store, consumer, Arc::new(SystemClock));
    session.start_scheduler()?;

    let served = session.serve(&input);
    session.shutdown();
    served?;

    success("Scheduler stopped");
    Ok(())
}
