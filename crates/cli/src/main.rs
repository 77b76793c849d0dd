use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

mod commands;

use lsx_fs::ListingRequest;
use lsx_runtime::logging;

#[derive(Debug, Parser)]
#[command(name = "lsx", version, about = "List directory contents")]
pub struct Cli {
    /// Do not ignore entries starting with `.`
    #[arg(short = 'a')]
    pub all: bool,

    /// Use the long listing format
    #[arg(short = 'l')]
    pub long: bool,

    /// Files and directories to list (default: the current directory)
    pub paths: Vec<PathBuf>,
}

impl Cli {
    pub fn into_request(self) -> ListingRequest {
        ListingRequest {
            show_hidden: self.all,
            long_format: self.long,
            targets: self.paths,
        }
    }
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    commands::list::run(cli.into_request())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
