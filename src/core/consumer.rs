use crate::core::status::SchedulerStatus;
use crate::errors::AppResult;
use crate::models::prompt::{Notice, PromptOutcome, PromptRequest};

/// The interactive side of the application: renders an entry prompt, shows
/// notices and the scheduler status. Only ever called from the foreground
/// thread.
pub trait PromptConsumer {
    /// Block until the user accepts or cancels.
    fn present(&mut self, request: &PromptRequest<'_>) -> AppResult<PromptOutcome>;

    fn notify(&mut self, notice: Notice);

    fn show_status(&mut self, _status: &SchedulerStatus) {}
}
