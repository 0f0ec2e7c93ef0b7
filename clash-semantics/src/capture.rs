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

//! Output-capturing sub-evaluator
//!
//! Backquote substitution needs the output of a script run within the same
//! session. [`capture`] duplicates the process's standard output aside,
//! installs a pipe's write end in its place, evaluates the script, restores
//! standard output, and drains the pipe.
//!
//! Draining is safe from deadlock at that point: the evaluator has waited
//! for every child it spawned, so the read end held here is the only
//! remaining reference to the pipe and end-of-file is guaranteed. (A child
//! that writes more than the pipe capacity in one go still blocks before
//! the evaluator returns; callers substituting very large outputs should
//! redirect to a file instead.)
//!
//! Standard output is process-wide state, so `capture` must not run
//! concurrently with anything else using it.

use crate::Error;
use clash_env::Env;
use std::ops::ControlFlow::{Break, Continue};

/// Evaluates a script, collecting what it writes to standard output.
///
/// An `exit` in the substituted script ends that script only; its status is
/// recorded in `$?` and the enclosing session continues.
pub fn capture(env: &mut Env, script: &str) -> Result<Vec<u8>, Error> {
    let (reader, writer) = clash_env::system::pipe()?;
    let saved = clash_env::system::save_stdout()?;
    clash_env::system::replace_stdout(&writer)?;
    drop(writer);

    let result = crate::eval(env, script);

    // Restore before inspecting the result so standard output is intact on
    // the error path too.
    let restored = clash_env::system::replace_stdout(&saved);
    drop(saved);

    match result {
        Ok(Continue(())) => {}
        Ok(Break(status)) => env.set_exit_status(status),
        Err(error) => return Err(error),
    }
    restored?;

    Ok(clash_env::system::drain(reader)?)
}
