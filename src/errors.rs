//! Unified application error type.
//! All modules (core, store, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use chrono::NaiveDateTime;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV log error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid checkpoint: {0}")]
    InvalidCheckpoint(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Project name must not be empty")]
    EmptyProject,

    #[error("End time must be after start time ({start} -> {end})")]
    EndNotAfterStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Runtime errors
    // ---------------------------
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

pub type AppResult<T> = Result<T, AppError>;
