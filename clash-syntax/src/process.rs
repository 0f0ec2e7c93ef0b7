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

//! Special-syntax processor
//!
//! The [`process`] function rewrites one command so that the only remaining
//! meta-characters are the backslash and the single quote:
//!
//! - Variable references (`$name`, `${name}`, `$#`, `$*`, `$?`) are replaced
//!   by their values.
//! - Backquoted command substitutions are replaced by the captured output of
//!   the substituted script, reduced to a single line.
//! - Double-quoted regions become single-quoted regions. An internal `'` is
//!   emitted as `\'` and an internal `\` as `\\`; the word splitter undoes
//!   exactly those two escapes inside a quoted region.
//! - Single-quoted regions are copied verbatim.
//!
//! Collapsing both kinds of quotation into one leaves the word splitter with
//! a single quoting rule.
//!
//! Substitution values come from an implementation of [`Expand`], keeping
//! this module independent of the execution environment.

use crate::SyntaxError;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// Interface for resolving substitutions during processing
///
/// The processor itself does not store variables or run commands. The caller
/// of [`process`] must provide an implementation of this trait, which is
/// used whenever a `$` reference or a backquoted script is encountered.
pub trait Expand {
    /// Object returned when a command substitution fails
    type Error;

    /// Returns the value of the named variable, or `None` if it is not set.
    fn variable(&self, name: &str) -> Option<String>;

    /// Runs the given script and returns the bytes it wrote to its standard
    /// output.
    fn command_output(&mut self, script: &str) -> Result<Vec<u8>, Self::Error>;
}

/// Error in processing a command
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ProcessError<E> {
    /// The command text itself is ill-formed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A command substitution could not be evaluated.
    #[error("{0}")]
    Expand(E),
}

/// Scanner states of the processor
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Outside any quotation
    Unquoted,
    /// Right after a backslash, outside any quotation
    UnquotedEscape,
    /// Inside a single-quoted region
    SingleQuoted,
    /// Inside a double-quoted region
    DoubleQuoted,
    /// Right after a backslash, inside a double-quoted region
    DoubleQuotedEscape,
}

/// Processes backslashes, quotations, and substitutions in one command.
///
/// The result contains the same words as the input, but with all `$` and
/// backquote substitutions consumed and all double quotation rewritten as
/// single quotation. A backslash survives into the output only where the
/// word splitter still needs it: before the word-significant characters
/// (space, tab, `<`, `>`) and inside quoted regions before `'` or `\`.
pub fn process<E: Expand>(raw: &str, env: &mut E) -> Result<String, ProcessError<E::Error>> {
    let mut out = String::with_capacity(raw.len());
    let mut state = State::Unquoted;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Unquoted => match c {
                '\\' => state = State::UnquotedEscape,
                '\'' => {
                    out.push('\'');
                    state = State::SingleQuoted;
                }
                '"' => {
                    out.push('\'');
                    state = State::DoubleQuoted;
                }
                '$' => substitute_variable(&mut chars, env, &mut out)?,
                '`' => substitute_command(&mut chars, env, &mut out)?,
                _ => out.push(c),
            },
            State::UnquotedEscape => {
                if matches!(c, ' ' | '\t' | '<' | '>') {
                    out.push('\\');
                }
                out.push(c);
                state = State::Unquoted;
            }
            State::SingleQuoted => {
                out.push(c);
                if c == '\'' {
                    state = State::Unquoted;
                }
            }
            State::DoubleQuoted => match c {
                '\\' => state = State::DoubleQuotedEscape,
                '"' => {
                    out.push('\'');
                    state = State::Unquoted;
                }
                '\'' => out.push_str("\\'"),
                '$' => substitute_variable(&mut chars, env, &mut out)?,
                '`' => substitute_command(&mut chars, env, &mut out)?,
                _ => out.push(c),
            },
            State::DoubleQuotedEscape => {
                match c {
                    '$' | '`' | '"' => out.push(c),
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("\\'"),
                    _ => {
                        out.push('\\');
                        out.push(c);
                    }
                }
                state = State::DoubleQuoted;
            }
        }
    }

    match state {
        State::Unquoted => Ok(out),
        State::UnquotedEscape | State::DoubleQuotedEscape => {
            Err(SyntaxError::TrailingBackslash.into())
        }
        State::SingleQuoted => Err(SyntaxError::UnclosedSingleQuote.into()),
        State::DoubleQuoted => Err(SyntaxError::UnclosedDoubleQuote.into()),
    }
}

/// Scans a variable name after a `$` and appends the variable's value.
///
/// A `$` followed by a character that cannot start a name is dropped from
/// the output; the following character is then handled by the caller as
/// usual. The value of an unset variable is the empty string.
fn substitute_variable<E: Expand>(
    chars: &mut Peekable<Chars>,
    env: &E,
    out: &mut String,
) -> Result<(), ProcessError<E::Error>> {
    let mut name = String::new();
    match chars.peek() {
        Some(&(c @ ('#' | '*' | '?'))) => {
            chars.next();
            name.push(c);
        }
        Some('{') => {
            chars.next();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => name.push(c),
                    None => return Err(SyntaxError::UnclosedBraceParam.into()),
                }
            }
            if name.is_empty() {
                return Err(SyntaxError::EmptyParam.into());
            }
        }
        Some(c) if c.is_ascii_alphanumeric() => {
            // A name that starts with a digit is a positional parameter and
            // extends only over further digits.
            let digits_only = c.is_ascii_digit();
            while let Some(&c) = chars.peek() {
                let extends = if digits_only {
                    c.is_ascii_digit()
                } else {
                    c.is_ascii_alphanumeric()
                };
                if !extends {
                    break;
                }
                name.push(c);
                chars.next();
            }
        }
        _ => return Ok(()),
    }
    out.push_str(&env.variable(&name).unwrap_or_default());
    Ok(())
}

/// Scans a backquoted script, runs it, and appends its output.
fn substitute_command<E: Expand>(
    chars: &mut Peekable<Chars>,
    env: &mut E,
    out: &mut String,
) -> Result<(), ProcessError<E::Error>> {
    let mut script = String::new();
    loop {
        match chars.next() {
            Some('\\') if chars.peek() == Some(&'`') => {
                chars.next();
                script.push_str("\\`");
            }
            Some('`') => break,
            Some(c) => script.push(c),
            None => return Err(SyntaxError::UnclosedBackquote.into()),
        }
    }
    let output = env.command_output(&script).map_err(ProcessError::Expand)?;
    out.push_str(&normalize_output(&output));
    Ok(())
}

/// Reduces captured command output to a single line.
///
/// One trailing newline is removed; every remaining newline and tab becomes
/// a single space.
fn normalize_output(bytes: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    text.replace(['\n', '\t'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;
    use std::convert::Infallible;

    /// Canned variables and substitution outputs for the tests
    #[derive(Default)]
    struct DummyEnv {
        variables: HashMap<String, String>,
        outputs: HashMap<String, String>,
    }

    impl DummyEnv {
        fn with_variable(mut self, name: &str, value: &str) -> Self {
            self.variables.insert(name.to_owned(), value.to_owned());
            self
        }

        fn with_output(mut self, script: &str, output: &str) -> Self {
            self.outputs.insert(script.to_owned(), output.to_owned());
            self
        }
    }

    impl Expand for DummyEnv {
        type Error = Infallible;

        fn variable(&self, name: &str) -> Option<String> {
            self.variables.get(name).cloned()
        }

        fn command_output(&mut self, script: &str) -> Result<Vec<u8>, Infallible> {
            Ok(self
                .outputs
                .get(script)
                .cloned()
                .unwrap_or_default()
                .into_bytes())
        }
    }

    fn process_with(env: &mut DummyEnv, raw: &str) -> String {
        process(raw, env).unwrap()
    }

    #[test]
    fn plain_text_is_unchanged() {
        let mut env = DummyEnv::default();
        assert_eq!(process_with(&mut env, "echo abc def"), "echo abc def");
    }

    #[test]
    fn single_quoted_region_is_verbatim() {
        let mut env = DummyEnv::default().with_variable("x", "abc");
        assert_eq!(process_with(&mut env, "'$x `cmd` \\'"), "'$x `cmd` \\'");
    }

    #[test]
    fn double_quotes_become_single_quotes() {
        let mut env = DummyEnv::default();
        assert_eq!(process_with(&mut env, "\"abc\""), "'abc'");
        assert_eq!(process_with(&mut env, "\"do'nt\""), "'do\\'nt'");
        assert_eq!(process_with(&mut env, "\"a b\"c\"d e\""), "'a b'c'd e'");
    }

    #[test]
    fn variable_substitution_unquoted() {
        let mut env = DummyEnv::default().with_variable("x", "abc");
        assert_eq!(process_with(&mut env, "$x"), "abc");
        assert_eq!(process_with(&mut env, "a${x}b"), "aabcb");
        assert_eq!(process_with(&mut env, "$x$x"), "abcabc");
    }

    #[test]
    fn variable_substitution_in_double_quotes() {
        let mut env = DummyEnv::default().with_variable("x", "a c");
        assert_eq!(process_with(&mut env, "\"$x\""), "'a c'");
        assert_eq!(process_with(&mut env, "\"1${x}2\""), "'1a c2'");
    }

    #[test]
    fn unset_variable_is_empty() {
        let mut env = DummyEnv::default();
        assert_eq!(process_with(&mut env, "a$novar.b"), "a.b");
        assert_eq!(process_with(&mut env, "a${novar}b"), "ab");
    }

    #[test]
    fn special_one_character_names() {
        let mut env = DummyEnv::default()
            .with_variable("?", "42")
            .with_variable("#", "2")
            .with_variable("*", "a b");
        assert_eq!(process_with(&mut env, "$?"), "42");
        assert_eq!(process_with(&mut env, "$#"), "2");
        assert_eq!(process_with(&mut env, "$*"), "a b");
    }

    #[test]
    fn digit_initial_name_extends_only_over_digits() {
        let mut env = DummyEnv::default()
            .with_variable("1", "one")
            .with_variable("12", "twelve");
        assert_eq!(process_with(&mut env, "$12"), "twelve");
        assert_eq!(process_with(&mut env, "$1x"), "onex");
    }

    #[test]
    fn dollar_without_name_is_dropped() {
        let mut env = DummyEnv::default();
        assert_eq!(process_with(&mut env, "a$ b"), "a b");
        assert_eq!(process_with(&mut env, "a$"), "a");
        assert_eq!(process_with(&mut env, "$-"), "-");
    }

    #[test]
    fn escaped_dollar_is_literal() {
        let mut env = DummyEnv::default().with_variable("x", "abc");
        assert_eq!(process_with(&mut env, "\\$x"), "$x");
        assert_eq!(process_with(&mut env, "\"\\$x\""), "'$x'");
    }

    #[test]
    fn command_substitution_unquoted() {
        let mut env = DummyEnv::default().with_output("echo a", "a\n");
        assert_eq!(process_with(&mut env, "`echo a`"), "a");
    }

    #[test]
    fn command_substitution_output_is_one_line() {
        let mut env = DummyEnv::default().with_output("x", "a\nb\tc\n");
        assert_eq!(process_with(&mut env, "`x`"), "a b c");
    }

    #[test]
    fn command_substitution_in_double_quotes() {
        let mut env = DummyEnv::default().with_output("echo x y", "x y\n");
        assert_eq!(process_with(&mut env, "\"a `echo x y` b\""), "'a x y b'");
    }

    #[test]
    fn escaped_backquote_does_not_close_the_substitution() {
        let mut env = DummyEnv::default().with_output("echo \\` z", "` z\n");
        assert_eq!(process_with(&mut env, "`echo \\` z`"), "` z");
    }

    #[test]
    fn word_significant_escapes_are_preserved() {
        let mut env = DummyEnv::default();
        assert_eq!(process_with(&mut env, "a\\ b"), "a\\ b");
        assert_eq!(process_with(&mut env, "a\\<b\\>c"), "a\\<b\\>c");
        assert_eq!(process_with(&mut env, "a\\\tb"), "a\\\tb");
    }

    #[test]
    fn other_unquoted_escapes_drop_the_backslash() {
        let mut env = DummyEnv::default();
        assert_eq!(process_with(&mut env, "a\\;b"), "a;b");
        assert_eq!(process_with(&mut env, "a\\\\b"), "a\\b");
        assert_eq!(process_with(&mut env, "\\ab"), "ab");
    }

    #[test]
    fn double_quoted_escapes() {
        let mut env = DummyEnv::default();
        assert_eq!(process_with(&mut env, "\"\\`\\\"\""), "'`\"'");
        assert_eq!(process_with(&mut env, "\"\\\\\""), "'\\\\'");
        assert_eq!(process_with(&mut env, "\"\\a\""), "'\\a'");
    }

    #[test]
    fn processing_is_idempotent_without_substitutions() {
        let mut env = DummyEnv::default();
        for text in ["a\\ b 'c d'", "plain", "'\\'", "x\\<'<'"] {
            let once = process_with(&mut env, text);
            let twice = process_with(&mut env, &once);
            assert_eq!(once, twice, "text = {text:?}");
        }
    }

    #[test]
    fn empty_brace_name() {
        let mut env = DummyEnv::default();
        assert_matches!(
            process("${}", &mut env),
            Err(ProcessError::Syntax(SyntaxError::EmptyParam))
        );
    }

    #[test]
    fn unterminated_brace_name() {
        let mut env = DummyEnv::default();
        assert_matches!(
            process("${abc", &mut env),
            Err(ProcessError::Syntax(SyntaxError::UnclosedBraceParam))
        );
    }

    #[test]
    fn unterminated_quotations() {
        let mut env = DummyEnv::default();
        assert_matches!(
            process("'abc", &mut env),
            Err(ProcessError::Syntax(SyntaxError::UnclosedSingleQuote))
        );
        assert_matches!(
            process("\"abc", &mut env),
            Err(ProcessError::Syntax(SyntaxError::UnclosedDoubleQuote))
        );
        assert_matches!(
            process("`abc", &mut env),
            Err(ProcessError::Syntax(SyntaxError::UnclosedBackquote))
        );
    }

    #[test]
    fn trailing_backslash() {
        let mut env = DummyEnv::default();
        assert_matches!(
            process("abc\\", &mut env),
            Err(ProcessError::Syntax(SyntaxError::TrailingBackslash))
        );
        assert_matches!(
            process("\"abc\\", &mut env),
            Err(ProcessError::Syntax(SyntaxError::TrailingBackslash))
        );
    }
}
