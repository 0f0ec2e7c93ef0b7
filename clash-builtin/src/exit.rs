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

//! Exit built-in
//!
//! The **`exit`** built-in ends the session.
//!
//! # Synopsis
//!
//! ```sh
//! exit [exit_status]
//! ```
//!
//! # Semantics
//!
//! The built-in does not terminate the process itself; it returns a
//! [`Divert::Exit`] request, and the caller stops reading commands and exits
//! with the given status. The *exit_status* operand defaults to zero.
//!
//! # Errors
//!
//! An operand that is not a non-negative decimal integer is reported as
//! `exit: operand: numeric argument required` and the session continues with
//! exit status one.

use crate::Result;
use clash_env::Env;
use clash_env::semantics::{Divert, ExitStatus};
use std::ops::ControlFlow::Break;

/// Entry point of the `exit` built-in
pub fn main(_env: &mut Env, args: &[String]) -> Result {
    let status = match args {
        [] => ExitStatus::SUCCESS,
        [operand] => match operand.parse() {
            Ok(code) if code >= 0 => ExitStatus(code),
            _ => {
                eprintln!("clash: exit: {operand}: numeric argument required");
                return Result::new(ExitStatus::FAILURE);
            }
        },
        _ => {
            eprintln!("clash: exit: too many arguments");
            return Result::new(ExitStatus::FAILURE);
        }
    };
    Result {
        exit_status: status,
        divert: Break(Divert::Exit(status)),
    }
}
