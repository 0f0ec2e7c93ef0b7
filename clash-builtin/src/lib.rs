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

//! Implementations of the built-in utilities
//!
//! A built-in runs inside the evaluator process without forking, because it
//! must mutate the session itself: the working directory, the variable
//! bindings, the ambient environment, or the session's lifetime. Four
//! built-ins exist: [`cd`], [`exit`], [`export`], and [`unset`].
//!
//! A built-in receives the mutable [`Env`] and its operand words and
//! returns a [`Result`] carrying its exit status and an optional request to
//! divert the session. Diagnostics are printed to standard error directly,
//! prefixed with the shell name; a failing built-in does not stop the
//! remaining commands of the current evaluation.

use clash_env::Env;
use clash_env::semantics::{Divert, ExitStatus};
use std::ops::ControlFlow::{self, Continue};

pub mod cd;
pub mod exit;
pub mod export;
pub mod unset;

/// Result of running a built-in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use = "the exit status and divert request must be applied to the session"]
pub struct Result {
    /// Exit status of the built-in
    pub exit_status: ExitStatus,

    /// Control-flow request for the session
    pub divert: ControlFlow<Divert>,
}

impl Result {
    /// Creates a result with the given exit status and no divert request.
    pub fn new(exit_status: ExitStatus) -> Result {
        Result {
            exit_status,
            divert: Continue(()),
        }
    }
}

impl Default for Result {
    fn default() -> Result {
        Result::new(ExitStatus::SUCCESS)
    }
}

/// Type of built-in entry points
pub type Main = fn(&mut Env, &[String]) -> Result;

/// Returns the built-in with the given name, if any.
#[must_use]
pub fn find(name: &str) -> Option<Main> {
    match name {
        "cd" => Some(cd::main),
        "exit" => Some(exit::main),
        "export" => Some(export::main),
        "unset" => Some(unset::main),
        _ => None,
    }
}
