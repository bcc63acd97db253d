pub mod clock;
pub mod consumer;
pub mod dispatcher;
pub mod policy;
pub mod schedule;
pub mod scheduler;
pub mod session;
pub mod status;
