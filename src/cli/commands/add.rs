use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::consumer::PromptConsumer;
use crate::core::policy::{is_tracked_day, round_down_to_half_hour, weekday_name};
use crate::errors::{AppError, AppResult};
use crate::models::prompt::{PromptOutcome, PromptRequest};
use crate::models::time_entry::TimeEntry;
use crate::store::log_store::LogStore;
use crate::ui::messages::{error, info, success};
use crate::ui::terminal::{TerminalConsumer, spawn_stdin_reader};
use crate::utils::date;
use crate::utils::time::parse_optional_time;
use chrono::Duration;

/// Create a single time tracking entry.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Add {
        project,
        date,
        start,
        end,
    } = cmd
    else {
        return Ok(());
    };

    //
    // 1. Date (default = today) and business-day check
    //
    let d = match date {
        Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?,
        None => date::today(),
    };
    if !is_tracked_day(d) {
        info(format!("{} is a {}. Skipping timetracking.", d, weekday_name(d)));
        return Ok(());
    }

    //
    // 2. Times given on the command line
    //
    let start_t = parse_optional_time(start.as_ref())?;
    let end_t = parse_optional_time(end.as_ref())?;

    let store = LogStore::new(cfg.log_path());
    if store.ensure_initialized()? {
        info("Created new timetracking CSV file");
    }

    //
    // 3. Fully specified: no interaction
    //
    if let (Some(p), Some(s), Some(e)) = (project, start_t, end_t) {
        let entry = TimeEntry::new(p, d.and_time(s), d.and_time(e))?;
        let record = store.append(&entry)?;
        success(format!(
            "Entry added: {} on {} at {}",
            record.subject, record.start_date, record.start_time
        ));
        return Ok(());
    }

    //
    // 4. Ask for what is missing: defaults are the current half hour
    //
    let given = project.as_deref().map(str::trim).filter(|p| !p.is_empty());
    let configured = match given {
        Some(_) => cfg.project_names(),
        None => cfg.require_projects()?,
    };
    let mut projects: Vec<String> = given.map(str::to_string).into_iter().collect();
    for p in configured {
        if !projects.contains(&p) {
            projects.push(p);
        }
    }

    let rounded = round_down_to_half_hour(chrono::Local::now().naive_local());
    let default_start = d.and_time(start_t.unwrap_or(rounded.time()));
    let default_end = match end_t {
        Some(e) => d.and_time(e),
        None => default_start + Duration::minutes(30),
    };
    let request = PromptRequest {
        projects: &projects,
        date: d,
        default_start,
        default_end,
    };

    let mut consumer = TerminalConsumer::new(spawn_stdin_reader()?);
    loop {
        match consumer.present(&request)? {
            PromptOutcome::Cancelled => {
                info("Entry cancelled, nothing written.");
                return Ok(());
            }
            PromptOutcome::Accepted { project, start, end } => {
                match TimeEntry::new(&project, start, end) {
                    Ok(entry) => {
                        let record = store.append(&entry)?;
                        success(format!(
                            "Entry added: {} on {} at {}",
                            record.subject, record.start_date, record.start_time
                        ));
                        return Ok(());
                    }
                    Err(e) => error(e),
                }
            }
        }
    }
}
