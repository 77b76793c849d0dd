use std::{
    env,
    io::{self, Write},
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
};

use log::{debug, info};
use lsx_runtime::{DEFAULT_TARGET, PROGRAM_NAME};

use crate::{
    classify::stat_target,
    enumerate::{Entries, enumerate},
    error::ListError,
    metadata::{EntryKind, EntryMetadata},
    render::{IdentityResolver, Renderer, SystemIdentities},
};

/// What to list and how, as handed over by the argument parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRequest {
    /// Include entries whose names start with `.`
    pub show_hidden: bool,
    /// Use the long record format
    pub long_format: bool,
    /// Targets in command-line order, exactly as given. Empty means the
    /// current directory.
    pub targets: Vec<PathBuf>,
}

/// Path a directory target is enumerated from.
///
/// Absolute targets are used verbatim; relative ones are joined onto the
/// current working directory. Failing to determine that directory is fatal.
pub fn normalize_target(target: &Path) -> Result<PathBuf, ListError> {
    if target.is_absolute() {
        return Ok(target.to_path_buf());
    }

    let cwd = env::current_dir().map_err(ListError::WorkingDirectoryUnavailable)?;
    Ok(resolve_against(&cwd, target))
}

/// How a directory is opened for listing.
type OpenDir = fn(&Path, bool) -> Result<Entries, ListError>;

/// `target` if absolute, otherwise `base/target`. No `..` folding is done.
pub fn resolve_against(base: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        base.join(target)
    }
}

/// Drives a listing run: listing text goes to `out`, per-target
/// diagnostics to `err`.
pub struct Lister<W: Write, E: Write, R: IdentityResolver = SystemIdentities> {
    out: W,
    err: E,
    renderer: Renderer<R>,
    open_dir: OpenDir,
}

impl<W: Write, E: Write> Lister<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self::with_renderer(out, err, Renderer::new())
    }
}

impl Lister<io::Stdout, io::Stderr> {
    /// Lister bound to the process's stdout and stderr.
    pub fn stdout() -> Self {
        Lister::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write, R: IdentityResolver> Lister<W, E, R> {
    pub fn with_renderer(out: W, err: E, renderer: Renderer<R>) -> Self {
        Self {
            out,
            err,
            renderer,
            open_dir: enumerate,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    /// List every target in order.
    ///
    /// Problems with individual targets are reported on the error stream and
    /// the run moves on; only errors that make the rest of the run
    /// meaningless (no working directory, broken output) are returned.
    pub fn run(&mut self, request: &ListingRequest) -> Result<(), ListError> {
        if request.targets.is_empty() {
            self.list_target(Path::new(DEFAULT_TARGET), request, false)?;
        } else {
            let with_header = request.targets.len() > 1;
            for target in &request.targets {
                self.list_target(target, request, with_header)?;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn list_target(
        &mut self,
        target: &Path,
        request: &ListingRequest,
        with_header: bool,
    ) -> Result<(), ListError> {
        let res = stat_target(target).and_then(|metadata| {
            match EntryKind::from(metadata.file_type()) {
                EntryKind::Directory => {
                    if with_header {
                        self.out.write_all(target.as_os_str().as_bytes())?;
                        self.out.write_all(b":\n")?;
                    }
                    let dir_path = normalize_target(target)?;
                    self.list_directory(&dir_path, request.show_hidden, request.long_format)
                }
                // The hidden filter only applies to directory contents.
                EntryKind::File => {
                    let meta = EntryMetadata::from_metadata(&metadata, target.as_os_str());
                    self.write_line(&meta, request.long_format, b"\n")
                }
                EntryKind::Other => Err(ListError::UnsupportedKind {
                    path: target.to_path_buf(),
                }),
            }
        });

        match res {
            Err(e) if e.is_recoverable() => self.report(&e),
            other => other,
        }
    }

    /// List the contents of one directory followed by a blank line.
    ///
    /// Bare mode writes every name followed by a space on a single line;
    /// long mode writes one record per line. Entries that cannot be stat'ed
    /// are skipped.
    pub fn list_directory(
        &mut self,
        dir_path: &Path,
        show_hidden: bool,
        long_format: bool,
    ) -> Result<(), ListError> {
        let mut read_error = None;

        for entry in (self.open_dir)(dir_path, show_hidden)? {
            let name = match entry {
                Ok(name) => name,
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            };

            let display_path = dir_path.join(&name);
            let meta = match EntryMetadata::resolve(&display_path, name) {
                Ok(meta) => meta,
                Err(source) => {
                    let e = ListError::EntryStat {
                        path: display_path,
                        source,
                    };
                    info!("[list] skipping entry: {e}");
                    continue;
                }
            };

            let terminator: &[u8] = if long_format { b"\n" } else { b" " };
            self.write_line(&meta, long_format, terminator)?;
        }

        if !long_format {
            writeln!(self.out)?;
        }
        writeln!(self.out)?;

        match read_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Rendered entry bytes followed by `terminator`. Names go out
    /// unmodified, whether or not they are UTF-8.
    fn write_line(
        &mut self,
        meta: &EntryMetadata,
        long_format: bool,
        terminator: &[u8],
    ) -> Result<(), ListError> {
        let line = self.renderer.render(meta, long_format);
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(terminator)?;
        Ok(())
    }

    fn report(&mut self, e: &ListError) -> Result<(), ListError> {
        debug!("[list] reporting {e:?}");
        writeln!(self.err, "{PROGRAM_NAME}: {e}")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
