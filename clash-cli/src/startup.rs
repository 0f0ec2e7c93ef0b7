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

//! Choosing the input mode from the command line
//!
//! clash accepts exactly three shapes of command line:
//!
//! - no arguments: read commands from standard input;
//! - one argument: read commands from the named script file;
//! - `-c` followed by one argument: evaluate the argument as a script.
//!
//! Anything else is rejected.

use thiserror::Error;

/// How the session obtains its script text
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Input {
    /// Read commands from standard input.
    Stdin,
    /// Read commands from a script file.
    File(String),
    /// Evaluate a single script string.
    Command(String),
}

/// Error for a command line matching none of the accepted shapes
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("Invalid arguments")]
pub struct InvalidArguments;

/// Selects the input mode from the arguments after the program name.
pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Input, InvalidArguments> {
    let mut args = args.into_iter();
    match (args.next(), args.next(), args.next()) {
        (None, _, _) => Ok(Input::Stdin),
        (Some(flag), Some(script), None) if flag == "-c" => Ok(Input::Command(script)),
        (Some(file), None, _) => Ok(Input::File(file)),
        _ => Err(InvalidArguments),
    }
}
