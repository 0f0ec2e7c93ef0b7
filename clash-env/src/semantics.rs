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

//! Type definitions for command execution semantics

use std::fmt::{self, Display};

/// Number that summarizes how a command finished
///
/// The value is always a decoded exit code, never a raw wait status word. A
/// child killed by a signal is recorded as 128 plus the signal number.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub i32);

impl ExitStatus {
    /// Exit status of a successful command
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    /// Exit status of a failed command
    pub const FAILURE: ExitStatus = ExitStatus(1);

    /// Exit status when a command was found but could not be executed
    pub const NOEXEC: ExitStatus = ExitStatus(126);

    /// Exit status when a command was not found
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);

    /// Whether the status is zero
    #[must_use]
    pub fn is_successful(self) -> bool {
        self.0 == 0
    }
}

impl Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for ExitStatus {
    fn from(value: i32) -> ExitStatus {
        ExitStatus(value)
    }
}

/// Request to divert the control flow of the session
///
/// A built-in returns a `Divert` when the session should stop reading and
/// executing further commands.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Divert {
    /// Terminate the session with the given exit status.
    Exit(ExitStatus),
}
