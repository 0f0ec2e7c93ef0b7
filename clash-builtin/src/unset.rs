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

//! Unset built-in
//!
//! The **`unset`** built-in removes variables.
//!
//! # Synopsis
//!
//! ```sh
//! unset name…
//! ```
//!
//! # Semantics
//!
//! Each named variable is removed from both the session bindings and the
//! ambient environment. Names that are not set anywhere are silently
//! ignored.
//!
//! # Exit status
//!
//! Always zero.

use crate::Result;
use clash_env::Env;

/// Entry point of the `unset` built-in
pub fn main(env: &mut Env, args: &[String]) -> Result {
    for name in args {
        env.variables.unset(name);
        // `remove_var` rejects names the environment cannot represent.
        if !name.is_empty() && !name.contains('=') {
            // The session is single-threaded; nothing reads the environment
            // concurrently.
            unsafe { std::env::remove_var(name) };
        }
    }
    Result::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_is_removed_from_bindings_and_environment() {
        let mut env = Env::new("clash", &[]);
        env.variables.assign("CLASH_UNSET_TEST_A", "value");
        unsafe { std::env::set_var("CLASH_UNSET_TEST_A", "value") };

        let result = main(&mut env, &["CLASH_UNSET_TEST_A".to_owned()]);

        assert_eq!(result, Result::default());
        assert_eq!(env.variables.get("CLASH_UNSET_TEST_A"), None);
        assert_eq!(
            std::env::var("CLASH_UNSET_TEST_A"),
            Err(std::env::VarError::NotPresent)
        );
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut env = Env::new("clash", &[]);
        let args = ["CLASH_UNSET_TEST_B".to_owned(), "".to_owned()];
        let result = main(&mut env, &args);
        assert_eq!(result, Result::default());
    }
}
