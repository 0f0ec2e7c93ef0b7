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

//! Evaluation semantics of the clash shell language.
//!
//! The entry point is [`eval`], which runs one script in a session
//! environment: it divides the script into [`Command`]s with their pipe
//! wiring, expands and word-splits each command, and dispatches it as an
//! assignment, a built-in, or an external program. [`capture`] wraps `eval`
//! to collect the standard output of a substituted script, which makes the
//! evaluator re-entrant: backquote substitution inside a script evaluates
//! another script within the same session.

pub mod capture;
pub mod command;
pub mod expansion;
pub mod redir;

mod error;
mod execute;

pub use command::Command;
pub use error::Error;
pub use execute::eval;
