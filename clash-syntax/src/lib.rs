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

//! This crate implements the scanners that turn clash script text into
//! executable commands.
//!
//! Evaluation of a script is a layered rescan of the same text, and each
//! layer lives in its own module:
//!
//! 1. [`split`] divides a script into commands at unquoted `;`, newline, and
//!    `|` boundaries.
//! 2. [`process`] expands variable and command substitutions in one command
//!    and erases double quotation, leaving a *processed* string whose only
//!    remaining meta-characters are the backslash and the single quote.
//! 3. [`words`] divides a processed string into argument fields and
//!    redirections.
//!
//! The scanners are pure text transformations. Substitution values are
//! obtained through the [`Expand`](process::Expand) trait, so this crate
//! depends on neither the shell execution environment nor the underlying
//! system.

pub mod process;
pub mod split;
pub mod words;

mod error;

pub use error::SyntaxError;
