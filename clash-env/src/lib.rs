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

//! This crate defines the clash shell execution environment.
//!
//! A session's state lives in an [`Env`] instance: the variable bindings
//! (including positional and special parameters), the command search path
//! with its resolution cache, and the last exit status. The evaluator owns
//! the `Env` exclusively; child processes never share it.
//!
//! The [`system`] module is the session's only gateway to the underlying
//! operating system. It wraps the `nix` crate with synchronous functions
//! that deal in owned file descriptors, so that a descriptor opened by the
//! evaluator is closed on every exit path.

pub mod path;
pub mod semantics;
pub mod system;
pub mod variable;

use self::path::SearchPath;
use self::semantics::ExitStatus;
use self::variable::VariableSet;

/// Whole shell execution environment
#[derive(Clone, Debug)]
pub struct Env {
    /// Variables defined in the environment
    pub variables: VariableSet,

    /// Directories searched for external commands, with the resolution cache
    pub search_path: SearchPath,

    /// Exit status of the last executed command
    ///
    /// This mirrors the `?` variable, which holds the same value as a
    /// decimal string. Use [`set_exit_status`](Self::set_exit_status) to
    /// keep the two in step.
    pub exit_status: ExitStatus,
}

impl Env {
    /// Creates an environment for a new session.
    ///
    /// The variable bindings are seeded with the positional parameters and
    /// the search path is taken from the `PATH` value of the ambient
    /// environment.
    #[must_use]
    pub fn new(name: &str, params: &[String]) -> Env {
        let path = std::env::var("PATH").ok();
        Env {
            variables: VariableSet::new(name, params),
            search_path: SearchPath::new(path.as_deref()),
            exit_status: ExitStatus::SUCCESS,
        }
    }

    /// Records the exit status of a completed command.
    ///
    /// Updates both the `exit_status` field and the `?` variable.
    pub fn set_exit_status(&mut self, status: ExitStatus) {
        self.exit_status = status;
        self.variables.assign("?", status.to_string());
    }
}
