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

//! Variable bindings of a session
//!
//! All variables of a session live in one flat [`VariableSet`]; there is no
//! nested scope. Besides user-assigned variables, the set holds the
//! positional parameters (`0`, `1`, …), the parameter count `#`, the joined
//! parameters `*`, and the last exit status `?`, all as plain string
//! bindings so that substitution can look them up uniformly.

use itertools::Itertools;
use std::collections::HashMap;

/// Collection of the variables defined in a session
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VariableSet {
    bindings: HashMap<String, String>,
}

impl VariableSet {
    /// Creates a variable set seeded with positional and special parameters.
    ///
    /// `name` becomes the value of `0`; `params` become `1` through *N*.
    /// `#` is the parameter count, `*` the parameters joined with spaces,
    /// and `?` starts out as `0`.
    #[must_use]
    pub fn new(name: &str, params: &[String]) -> VariableSet {
        let mut bindings = HashMap::with_capacity(params.len() + 4);
        bindings.insert("0".to_owned(), name.to_owned());
        for (i, param) in params.iter().enumerate() {
            bindings.insert((i + 1).to_string(), param.clone());
        }
        bindings.insert("#".to_owned(), params.len().to_string());
        bindings.insert("*".to_owned(), params.iter().join(" "));
        bindings.insert("?".to_owned(), "0".to_owned());
        VariableSet { bindings }
    }

    /// Returns the value of a variable, or `None` if it is not set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    /// Defines a variable, replacing any existing value.
    pub fn assign<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Removes a variable, returning its old value if it was set.
    pub fn unset(&mut self, name: &str) -> Option<String> {
        self.bindings.remove(name)
    }
}

/// Whether `name` may appear on the left-hand side of an assignment.
///
/// Only names made of an ASCII letter followed by ASCII letters and digits
/// are assignable. Positional and special parameters fail this test; they
/// are only ever written by the session initializer.
#[must_use]
pub fn is_assignable_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_parameters() {
        let params = ["alpha".to_owned(), "beta gamma".to_owned()];
        let variables = VariableSet::new("clash", &params);
        assert_eq!(variables.get("0"), Some("clash"));
        assert_eq!(variables.get("1"), Some("alpha"));
        assert_eq!(variables.get("2"), Some("beta gamma"));
        assert_eq!(variables.get("3"), None);
        assert_eq!(variables.get("#"), Some("2"));
        assert_eq!(variables.get("*"), Some("alpha beta gamma"));
        assert_eq!(variables.get("?"), Some("0"));
    }

    #[test]
    fn seeded_without_parameters() {
        let variables = VariableSet::new("clash", &[]);
        assert_eq!(variables.get("#"), Some("0"));
        assert_eq!(variables.get("*"), Some(""));
        assert_eq!(variables.get("1"), None);
    }

    #[test]
    fn assign_and_unset() {
        let mut variables = VariableSet::new("clash", &[]);
        variables.assign("x", "abc");
        assert_eq!(variables.get("x"), Some("abc"));

        variables.assign("x", "def");
        assert_eq!(variables.get("x"), Some("def"));

        assert_eq!(variables.unset("x"), Some("def".to_owned()));
        assert_eq!(variables.get("x"), None);
        assert_eq!(variables.unset("x"), None);
    }

    #[test]
    fn assignable_names() {
        assert!(is_assignable_name("x"));
        assert!(is_assignable_name("abc"));
        assert!(is_assignable_name("a1b2"));
        assert!(!is_assignable_name(""));
        assert!(!is_assignable_name("1"));
        assert!(!is_assignable_name("1a"));
        assert!(!is_assignable_name("a-b"));
        assert!(!is_assignable_name("a_b"));
        assert!(!is_assignable_name("?"));
        assert!(!is_assignable_name("#"));
    }
}
