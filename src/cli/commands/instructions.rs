use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::path::display_absolute;

const STEPS: [&str; 7] = [
    "Go to calendar.google.com",
    "Click on the gear icon (Settings) in the top-right corner",
    "Select 'Settings'",
    "In the left sidebar, click 'Import & export'",
    "Click 'Select file from your computer' and select your CSV file",
    "Choose the calendar to import events to",
    "Click 'Import'",
];

/// Print how to import the CSV log into Google Calendar.
pub fn handle(cfg: &Config) -> AppResult<()> {
    header("Import Instructions");
    println!("How to import the CSV file into Google Calendar:\n");
    for (i, step) in STEPS.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    println!(
        "\nYour CSV file is located at:\n{}",
        display_absolute(&cfg.log_path())
    );
    Ok(())
}
