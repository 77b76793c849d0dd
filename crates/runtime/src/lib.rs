mod config;
pub mod logging;

pub use config::{DEFAULT_TARGET, PROGRAM_LOG_LEVEL, PROGRAM_NAME};

pub use logging::init;
