pub const PROGRAM_NAME: &str = "lsx";
pub const PROGRAM_LOG_LEVEL: &str = "LSX_LOG_LEVEL";

/// Target listed when no paths are given on the command line.
pub const DEFAULT_TARGET: &str = ".";
