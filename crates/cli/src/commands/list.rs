use std::process::ExitCode;

use anyhow::Result;
use log::{debug, error};
use lsx_fs::{Lister, ListingRequest};
use lsx_runtime::PROGRAM_NAME;

/// Per-target problems are reported inline and still exit successfully;
/// only a run that cannot continue exits with failure.
pub fn run(request: ListingRequest) -> ExitCode {
    match execute(&request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("{PROGRAM_NAME}: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(request: &ListingRequest) -> Result<()> {
    debug!(
        "[list] show_hidden={} long_format={} targets={:?}",
        request.show_hidden, request.long_format, request.targets
    );

    let mut lister = Lister::stdout();
    lister.run(request)?;

    Ok(())
}
