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

//! Definition of errors that abort an evaluation
//!
//! An [`Error`] ends the evaluation of the current script and surfaces to
//! the driver, which prints it and keeps the session alive. Built-in
//! failures are not errors in this sense: they are reported where they
//! occur and the remaining commands still run.

use clash_env::system::Errno;
use clash_syntax::SyntaxError;
use clash_syntax::process::ProcessError;
use thiserror::Error;

/// Cause of an aborted evaluation
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The script text is ill-formed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A redirection target could not be opened.
    #[error("{target}: {}", .errno.desc())]
    Redirect {
        /// Filename that was being opened
        target: String,
        /// Reason the open failed
        errno: Errno,
    },

    /// No executable was found for a command name.
    #[error("{0}: command not found")]
    CommandNotFound(String),

    /// The named file exists but may not be executed.
    #[error("{0}: Permission denied")]
    PermissionDenied(String),

    /// An underlying system call failed.
    #[error("system error: {}", .0.desc())]
    System(#[from] Errno),
}

impl From<ProcessError<Error>> for Error {
    fn from(error: ProcessError<Error>) -> Error {
        match error {
            ProcessError::Syntax(error) => Error::Syntax(error),
            ProcessError::Expand(error) => error,
        }
    }
}
