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

//! Command splitter
//!
//! The [`split`] function divides a script into commands at `;`, newline,
//! and `|` boundaries. Nothing is expanded here; the scanner only tracks
//! enough quoting state to know which separator characters are literal.
//! Splitting before expansion keeps a substitution result containing `;` or
//! `|` from introducing new command boundaries into its parent.

use crate::SyntaxError;
use bitflags::bitflags;

bitflags! {
    /// Quoting state of the splitter
    ///
    /// A separator character terminates a command only while the whole set
    /// is empty.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    struct Scan: u8 {
        /// The previous character was an unquoted backslash.
        const BACKSLASHED = 1 << 0;
        /// Inside a single-quoted region
        const SINGLE_QUOTED = 1 << 1;
        /// Inside a double-quoted region
        const DOUBLE_QUOTED = 1 << 2;
        /// Inside a backquoted command substitution
        const BACKQUOTED = 1 << 3;
        /// Inside the braces of a `${name}` reference
        const BRACE_NAME = 1 << 4;
    }
}

/// One `;`/newline/`|`-delimited unit of script text
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawCommand {
    /// Trimmed text of the command, with all quoting and substitution
    /// syntax still present
    pub text: String,
    /// Whether a `|` separates this command from the next one
    pub pipe_to_next: bool,
}

/// Divides a script into commands.
///
/// Commands are separated by `;`, newline, or `|` occurring outside any
/// quotation, command substitution, or braced variable name. Leading and
/// trailing whitespace is removed from each command, and commands whose text
/// is empty are dropped. An empty command adjacent to a `|` is an error
/// because both sides of a pipe must name a process.
pub fn split(script: &str) -> Result<Vec<RawCommand>, SyntaxError> {
    let mut commands = Vec::new();
    let mut accum = String::new();
    let mut flags = Scan::default();
    let mut should_pipe = false;

    let mut chars = script.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if !flags.intersects(Scan::SINGLE_QUOTED | Scan::BRACE_NAME) => {
                flags.toggle(Scan::BACKSLASHED);
                accum.push(c);
                continue;
            }
            '\'' if !flags.intersects(
                Scan::BACKSLASHED | Scan::DOUBLE_QUOTED | Scan::BRACE_NAME,
            ) =>
            {
                flags.toggle(Scan::SINGLE_QUOTED);
            }
            '"' if !flags.intersects(
                Scan::BACKSLASHED | Scan::SINGLE_QUOTED | Scan::BRACE_NAME,
            ) =>
            {
                flags.toggle(Scan::DOUBLE_QUOTED);
            }
            '`' if !flags.intersects(
                Scan::BACKSLASHED | Scan::SINGLE_QUOTED | Scan::BRACE_NAME,
            ) =>
            {
                flags.toggle(Scan::BACKQUOTED);
            }
            '$' if !flags.intersects(
                Scan::BACKSLASHED | Scan::SINGLE_QUOTED | Scan::BRACE_NAME,
            ) && chars.peek() == Some(&'{') =>
            {
                flags.insert(Scan::BRACE_NAME);
            }
            '}' => {
                flags.remove(Scan::BRACE_NAME);
            }
            ';' | '\n' | '|' if flags.is_empty() => {
                flush(&mut commands, &mut accum, should_pipe, c == '|')?;
                should_pipe = c == '|';
                continue;
            }
            _ => {}
        }
        flags.remove(Scan::BACKSLASHED);
        accum.push(c);
    }

    if flags.contains(Scan::SINGLE_QUOTED) {
        return Err(SyntaxError::UnclosedSingleQuote);
    }
    if flags.contains(Scan::DOUBLE_QUOTED) {
        return Err(SyntaxError::UnclosedDoubleQuote);
    }
    if flags.contains(Scan::BACKQUOTED) {
        return Err(SyntaxError::UnclosedBackquote);
    }
    if flags.contains(Scan::BACKSLASHED) {
        return Err(SyntaxError::TrailingBackslash);
    }
    if flags.contains(Scan::BRACE_NAME) {
        return Err(SyntaxError::UnclosedBraceParam);
    }

    flush(&mut commands, &mut accum, should_pipe, false)?;
    Ok(commands)
}

/// Ends the currently accumulated command at a separator or at end of input.
fn flush(
    commands: &mut Vec<RawCommand>,
    accum: &mut String,
    should_pipe: bool,
    is_pipe: bool,
) -> Result<(), SyntaxError> {
    let text = accum.trim();
    if text.is_empty() {
        if should_pipe || is_pipe {
            return Err(SyntaxError::IncompletePipeline);
        }
    } else {
        if should_pipe {
            if let Some(previous) = commands.last_mut() {
                previous.pipe_to_next = true;
            }
        }
        commands.push(RawCommand {
            text: text.to_owned(),
            pipe_to_next: false,
        });
    }
    accum.clear();
    Ok(())
}
