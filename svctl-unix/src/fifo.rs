//! FIFO utilities.
//!
//! runsv keeps the read ends of `supervise/ok` and `supervise/control`
//! open while it is alive. Opening the write end with `O_NONBLOCK` fails
//! with `ENXIO` when nobody reads, instead of blocking until a supervisor
//! shows up.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use nix::sys::stat::Mode;

/// Open `path` write-only without blocking on a missing reader.
pub fn open_writer(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
}

/// Open the read end of a FIFO without waiting for a writer.
pub fn open_reader(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
}

/// Create a FIFO with mode 0600, the way runsv creates its own.
pub fn make_fifo(path: &Path) -> Result<(), nix::Error> {
    nix::unistd::mkfifo(path, Mode::S_IRUSR | Mode::S_IWUSR)
}

/// True if `err` means "FIFO exists but has no reader".
pub fn is_no_reader(err: &std::io::Error) -> bool {
    err.raw_os_error() == Some(libc::ENXIO)
}

#[cfg(test)]
mod tests;
