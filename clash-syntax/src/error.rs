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

//! Definition of errors that happen in the scanners

use thiserror::Error;

/// Types of syntax errors
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[non_exhaustive]
pub enum SyntaxError {
    /// A single quotation lacks a closing `'`.
    #[error("unterminated single quote")]
    UnclosedSingleQuote,
    /// A double quotation lacks a closing `"`.
    #[error("unterminated double quote")]
    UnclosedDoubleQuote,
    /// A command substitution lacks a closing backquote.
    #[error("unterminated command substitution")]
    UnclosedBackquote,
    /// A `${` lacks a closing `}`.
    #[error("unterminated braces for variable name")]
    UnclosedBraceParam,
    /// A braced variable reference contains no name.
    #[error("empty variable name")]
    EmptyParam,
    /// A backslash is the last character of the input.
    #[error("backslash appears as last character of line")]
    TrailingBackslash,
    /// A `|` lacks a command on one of its sides.
    #[error("incomplete pipeline")]
    IncompletePipeline,
    /// A redirection operator lacks a target filename.
    #[error("missing redirection target")]
    MissingRedirOperand,
}
