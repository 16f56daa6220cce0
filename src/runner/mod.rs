//! Daily run orchestration.

mod daily;

pub use daily::{DailyRunner, RunError, RunReport};
