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

//! Commands with their standard I/O wiring
//!
//! The [`commands`] function combines the text-level
//! [splitter](clash_syntax::split) with pipe creation: each `|`-adjacent
//! pair of commands gets one OS pipe, the write end wired into the left
//! command and the read end into the right one. Wiring the pipes before any
//! expansion keeps the descriptor plumbing a straight-line operation.

use crate::Error;
use clash_env::system;
use std::os::fd::OwnedFd;

/// One command of an evaluation
///
/// The descriptors are `None` while the command reads from or writes to the
/// process's own standard input and output. A `Some` descriptor was opened
/// by the evaluator (for a pipe or a redirection), and the evaluator closes
/// it by dropping the `Command` once the consuming child has been spawned.
#[derive(Debug)]
pub struct Command {
    /// Script text of this command
    ///
    /// Holds the raw text when the command is created and is replaced by the
    /// processed text before word splitting.
    pub text: String,

    /// Where the command reads its standard input from
    pub input: Option<OwnedFd>,

    /// Where the command writes its standard output to
    pub output: Option<OwnedFd>,

    /// Whether this command is part of a `|`-chain
    pub in_pipeline: bool,
}

impl Command {
    fn new(text: String) -> Command {
        Command {
            text,
            input: None,
            output: None,
            in_pipeline: false,
        }
    }
}

/// Divides a script into commands and wires up their pipes.
pub fn commands(script: &str) -> Result<Vec<Command>, Error> {
    let raw = clash_syntax::split::split(script)?;

    let mut pipe_to_next = Vec::with_capacity(raw.len());
    let mut commands = Vec::with_capacity(raw.len());
    for raw_command in raw {
        pipe_to_next.push(raw_command.pipe_to_next);
        commands.push(Command::new(raw_command.text));
    }

    for i in 0..commands.len() {
        if pipe_to_next[i] && i + 1 < commands.len() {
            let (reader, writer) = system::pipe()?;
            commands[i].output = Some(writer);
            commands[i].in_pipeline = true;
            commands[i + 1].input = Some(reader);
            commands[i + 1].in_pipeline = true;
        }
    }

    Ok(commands)
}
