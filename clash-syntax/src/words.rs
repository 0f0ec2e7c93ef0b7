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

//! Word splitter
//!
//! The [`split_words`] function divides a [processed](crate::process)
//! command into argument fields and redirections. The input contains only
//! two meta-characters: the backslash, which escapes the next character, and
//! the quote, which delimits a literal region. Both quote characters are
//! handled alike because the processor re-emits a bare `"` for one escape
//! sequence.

use crate::SyntaxError;
use std::iter::Peekable;
use std::str::Chars;

/// Result of splitting a processed command into words
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Words {
    /// Argument fields in order of appearance
    pub fields: Vec<String>,
    /// Redirections in order of appearance
    pub redirects: Vec<Redirect>,
}

/// One `<file` or `>file` redirection
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redirect {
    /// Which standard descriptor the redirection replaces
    pub kind: RedirKind,
    /// The filename word that followed the operator
    pub target: String,
}

/// Direction of a redirection
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RedirKind {
    /// `<file`: read standard input from a file
    Input,
    /// `>file`: write standard output to a file
    Output,
}

/// Divides a processed command into fields and redirections.
///
/// Words break at unquoted, unescaped spaces, tabs, `<`, and `>`. A word is
/// kept even when empty if any part of it was quoted. The word after a `<`
/// or `>` operator becomes the redirection target instead of a field; a
/// second operator or the end of the input before that word is
/// [`MissingRedirOperand`](SyntaxError::MissingRedirOperand).
pub fn split_words(processed: &str) -> Result<Words, SyntaxError> {
    let mut words = Words::default();
    let mut pending = None;
    let mut word = String::new();
    let mut quoted = false;

    let mut chars = processed.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                quoted = true;
                scan_region(c, &mut chars, &mut word)?;
            }
            '\\' => {
                if let Some(escaped) = chars.next() {
                    word.push(escaped);
                }
            }
            ' ' | '\t' => flush(&mut words, &mut pending, &mut word, &mut quoted),
            '<' | '>' => {
                flush(&mut words, &mut pending, &mut word, &mut quoted);
                if pending.is_some() {
                    return Err(SyntaxError::MissingRedirOperand);
                }
                pending = Some(if c == '<' {
                    RedirKind::Input
                } else {
                    RedirKind::Output
                });
            }
            _ => word.push(c),
        }
    }

    flush(&mut words, &mut pending, &mut word, &mut quoted);
    if pending.is_some() {
        return Err(SyntaxError::MissingRedirOperand);
    }
    Ok(words)
}

/// Scans a quoted region, appending its contents to the current word.
///
/// Inside the region every character is literal, except that a backslash
/// escapes the region's own quote character or another backslash. This
/// undoes the escapes the processor inserts when rewriting a double-quoted
/// region.
fn scan_region(
    quote: char,
    chars: &mut Peekable<Chars>,
    word: &mut String,
) -> Result<(), SyntaxError> {
    loop {
        match chars.next() {
            Some('\\') if matches!(chars.peek(), Some(&c) if c == quote || c == '\\') => {
                if let Some(escaped) = chars.next() {
                    word.push(escaped);
                }
            }
            Some(c) if c == quote => return Ok(()),
            Some(c) => word.push(c),
            None => {
                return Err(if quote == '\'' {
                    SyntaxError::UnclosedSingleQuote
                } else {
                    SyntaxError::UnclosedDoubleQuote
                });
            }
        }
    }
}

/// Ends the current word, directing it to the field list or to a pending
/// redirection.
fn flush(words: &mut Words, pending: &mut Option<RedirKind>, word: &mut String, quoted: &mut bool) {
    if word.is_empty() && !*quoted {
        return;
    }
    let target = std::mem::take(word);
    *quoted = false;
    match pending.take() {
        Some(kind) => words.redirects.push(Redirect { kind, target }),
        None => words.fields.push(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn fields(processed: &str) -> Vec<String> {
        let words = split_words(processed).unwrap();
        assert_eq!(words.redirects, []);
        words.fields
    }

    #[test]
    fn empty_input() {
        assert_eq!(split_words("").unwrap(), Words::default());
        assert_eq!(split_words(" \t ").unwrap(), Words::default());
    }

    #[test]
    fn unquoted_fields() {
        assert_eq!(fields("echo abc def"), ["echo", "abc", "def"]);
        assert_eq!(fields("  a\t\tb  "), ["a", "b"]);
    }

    #[test]
    fn quoted_regions_join_the_surrounding_word() {
        assert_eq!(fields("a'b c'd"), ["ab cd"]);
        assert_eq!(fields("1'abc'2'def'3"), ["1abc2def3"]);
    }

    #[test]
    fn quoted_empty_words_are_kept() {
        assert_eq!(fields("'' \"\""), ["", ""]);
        assert_eq!(fields("a ''"), ["a", ""]);
    }

    #[test]
    fn escaped_separators_do_not_break_words() {
        assert_eq!(fields("a\\ b"), ["a b"]);
        assert_eq!(fields("a\\<b"), ["a<b"]);
        assert_eq!(fields("\\>"), [">"]);
    }

    #[test]
    fn escaped_quote_in_region() {
        assert_eq!(fields("'don\\'t'"), ["don't"]);
        assert_eq!(fields("'a\\\\b'"), ["a\\b"]);
    }

    #[test]
    fn backslash_before_other_characters_in_region_is_literal() {
        assert_eq!(fields("'a\\nb'"), ["a\\nb"]);
    }

    #[test]
    fn double_quotes_behave_like_single_quotes() {
        assert_eq!(fields("\"a b\""), ["a b"]);
        assert_eq!(fields("\"a'b\""), ["a'b"]);
    }

    #[test]
    fn separators_inside_regions_are_literal() {
        assert_eq!(fields("'a <b> c'"), ["a <b> c"]);
    }

    #[test]
    fn input_redirection() {
        let words = split_words("cat < file").unwrap();
        assert_eq!(words.fields, ["cat"]);
        assert_eq!(
            words.redirects,
            [Redirect {
                kind: RedirKind::Input,
                target: "file".to_owned(),
            }]
        );
    }

    #[test]
    fn output_redirection_attached_to_words() {
        let words = split_words("echo>foo abc").unwrap();
        assert_eq!(words.fields, ["echo", "abc"]);
        assert_eq!(
            words.redirects,
            [Redirect {
                kind: RedirKind::Output,
                target: "foo".to_owned(),
            }]
        );
    }

    #[test]
    fn both_redirections_without_fields() {
        let words = split_words("<in>out").unwrap();
        assert_eq!(words.fields, Vec::<String>::new());
        assert_eq!(
            words.redirects,
            [
                Redirect {
                    kind: RedirKind::Input,
                    target: "in".to_owned(),
                },
                Redirect {
                    kind: RedirKind::Output,
                    target: "out".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn later_redirection_of_the_same_kind_wins() {
        let words = split_words("< a < b cmd").unwrap();
        assert_eq!(words.fields, ["cmd"]);
        assert_eq!(words.redirects.len(), 2);
        assert_eq!(words.redirects[1].target, "b");
    }

    #[test]
    fn missing_redirection_target_at_end_of_input() {
        assert_matches!(split_words("a <"), Err(SyntaxError::MissingRedirOperand));
        assert_matches!(split_words("a < "), Err(SyntaxError::MissingRedirOperand));
    }

    #[test]
    fn missing_redirection_target_between_operators() {
        assert_matches!(split_words("a < < b"), Err(SyntaxError::MissingRedirOperand));
        assert_matches!(split_words("a <> b"), Err(SyntaxError::MissingRedirOperand));
    }

    #[test]
    fn unterminated_region() {
        assert_matches!(split_words("'abc"), Err(SyntaxError::UnclosedSingleQuote));
        assert_matches!(split_words("\"abc"), Err(SyntaxError::UnclosedDoubleQuote));
    }
}
