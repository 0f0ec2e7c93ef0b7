// This file is part of clash, a simple POSIX-style shell.
// Copyright (C) 2025 WATANABE Yuki
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Interaction with the underlying system
//!
//! This module wraps the system calls the evaluator needs behind synchronous
//! functions. Descriptors are passed around as [`OwnedFd`] so that every
//! descriptor the shell opens has exactly one owner and is closed when that
//! owner is dropped.

use crate::semantics::ExitStatus;
use nix::fcntl::OFlag;
use nix::libc;
use nix::sys::stat::Mode;
use nix::sys::wait::WaitStatus;
use nix::unistd::AccessFlags;
use std::convert::Infallible;
use std::ffi::{CStr, CString};
use std::io::Read;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};
use std::path::Path;

pub use nix::errno::Errno;
pub use nix::unistd::{ForkResult, Pid};

/// Result of a system call
pub type Result<T> = std::result::Result<T, Errno>;

/// Creates an anonymous pipe.
///
/// Returns the read end and the write end, in that order.
pub fn pipe() -> Result<(OwnedFd, OwnedFd)> {
    nix::unistd::pipe()
}

/// Creates a new child process.
///
/// # Safety
///
/// After a fork of a multi-threaded process, the child may only call
/// async-signal-safe functions until it execs. The clash evaluator is
/// single-threaded, and the child branch restricts itself to descriptor
/// duplication and `exec`.
pub unsafe fn fork() -> Result<ForkResult> {
    unsafe { nix::unistd::fork() }
}

/// Waits for the given child process to terminate.
///
/// The wait status is decoded into an [`ExitStatus`]: the exit code for a
/// normal exit, or 128 plus the signal number for a signaled child.
pub fn wait_child(pid: Pid) -> Result<ExitStatus> {
    loop {
        match nix::sys::wait::waitpid(pid, None)? {
            WaitStatus::Exited(_, code) => return Ok(ExitStatus(code)),
            WaitStatus::Signaled(_, signal, _) => return Ok(ExitStatus(128 + signal as i32)),
            _ => (),
        }
    }
}

/// Duplicates the process's current standard output.
pub fn save_stdout() -> Result<OwnedFd> {
    std::io::stdout()
        .as_fd()
        .try_clone_to_owned()
        .map_err(|error| Errno::from_raw(error.raw_os_error().unwrap_or(0)))
}

/// Installs `fd` as the process's standard input.
pub fn replace_stdin<F: AsFd>(fd: F) -> Result<()> {
    dup2(fd.as_fd(), libc::STDIN_FILENO)
}

/// Installs `fd` as the process's standard output.
pub fn replace_stdout<F: AsFd>(fd: F) -> Result<()> {
    dup2(fd.as_fd(), libc::STDOUT_FILENO)
}

fn dup2(fd: BorrowedFd, target: libc::c_int) -> Result<()> {
    loop {
        match unsafe { libc::dup2(fd.as_raw_fd(), target) } {
            -1 => {
                let errno = Errno::last();
                if errno != Errno::EINTR {
                    return Err(errno);
                }
            }
            _ => return Ok(()),
        }
    }
}

/// Opens a file for reading.
pub fn open_input(path: &Path) -> Result<OwnedFd> {
    nix::fcntl::open(path, OFlag::O_RDONLY, Mode::empty())
}

/// Opens a file for writing, creating or truncating it with mode 0644.
pub fn open_output(path: &Path) -> Result<OwnedFd> {
    let flags = OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC;
    nix::fcntl::open(path, flags, Mode::from_bits_truncate(0o644))
}

/// Reads everything remaining on `fd` until end of file.
pub fn drain(fd: OwnedFd) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match std::fs::File::from(fd).read_to_end(&mut bytes) {
        Ok(_) => Ok(bytes),
        Err(error) => Err(Errno::from_raw(error.raw_os_error().unwrap_or(0))),
    }
}

/// Changes the process's working directory.
pub fn chdir(path: &Path) -> Result<()> {
    nix::unistd::chdir(path)
}

/// Replaces the current process image.
///
/// The new program inherits the current environment. Returns only on
/// failure.
pub fn execv(path: &CStr, argv: &[CString]) -> Result<Infallible> {
    nix::unistd::execv(path, argv)
}

/// Whether `path` names a regular file.
pub fn is_regular_file(path: &Path) -> bool {
    match nix::sys::stat::stat(path) {
        Ok(stat) => stat.st_mode & libc::S_IFMT == libc::S_IFREG,
        Err(_) => false,
    }
}

/// Whether `path` names an executable regular file.
pub fn is_executable_file(path: &Path) -> bool {
    is_regular_file(path) && nix::unistd::access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn pipe_transports_written_bytes() {
        let (reader, writer) = pipe().unwrap();
        let mut file = std::fs::File::from(writer);
        file.write_all(b"hello").unwrap();
        drop(file);
        assert_eq!(drain(reader).unwrap(), b"hello");
    }

    #[test]
    fn drain_of_closed_empty_pipe_is_empty() {
        let (reader, writer) = pipe().unwrap();
        drop(writer);
        assert_eq!(drain(reader).unwrap(), b"");
    }

    #[test]
    fn executable_file_test() {
        assert!(is_executable_file(Path::new("/bin/sh")));
        assert!(!is_executable_file(Path::new("/dev/null")));
        assert!(!is_executable_file(Path::new("/no/such/file")));

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain");
        std::fs::write(&plain, "data").unwrap();
        assert!(is_regular_file(&plain));
        assert!(!is_executable_file(&plain));
    }
}
