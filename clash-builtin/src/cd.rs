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

//! Cd built-in
//!
//! The **`cd`** built-in changes the working directory of the shell process.
//!
//! # Synopsis
//!
//! ```sh
//! cd directory
//! ```
//!
//! # Errors
//!
//! It is an error if the operand is missing, if more than one operand is
//! given, or if the underlying `chdir` call fails. A `chdir` failure is
//! reported as `cd: directory: <reason>`.
//!
//! # Exit status
//!
//! Zero on success, one on error.

use crate::Result;
use clash_env::Env;
use clash_env::semantics::ExitStatus;
use clash_env::system;
use std::path::Path;

/// Entry point of the `cd` built-in
pub fn main(_env: &mut Env, args: &[String]) -> Result {
    let directory = match args {
        [directory] => directory,
        [] => {
            eprintln!("clash: cd: missing operand");
            return Result::new(ExitStatus::FAILURE);
        }
        _ => {
            eprintln!("clash: cd: too many arguments");
            return Result::new(ExitStatus::FAILURE);
        }
    };

    match system::chdir(Path::new(directory)) {
        Ok(()) => Result::default(),
        Err(errno) => {
            eprintln!("clash: cd: {directory}: {}", errno.desc());
            Result::new(ExitStatus::FAILURE)
        }
    }
}
