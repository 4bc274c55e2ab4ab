mod driver;
mod loader;
mod results;
mod runner;
mod timer;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use driver::{SessionDriver, SessionInput, Step};
pub use loader::SessionLoader;
pub use results::{
    ResultQuery, ResultsView, format_duration, parse_int_prefix, performance_message,
};
pub use runner::SessionRunner;
pub use timer::{TICK_PERIOD, spawn_ticker};
