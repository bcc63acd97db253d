pub mod prompt;
pub mod time_entry;
pub mod time_of_day;
