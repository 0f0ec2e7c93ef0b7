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

//! Export built-in
//!
//! The **`export`** built-in copies variables into the ambient environment
//! so that subsequently executed external commands inherit them.
//!
//! # Synopsis
//!
//! ```sh
//! export name…
//! ```
//!
//! # Semantics
//!
//! Each operand naming a variable of the session is set in the process
//! environment with its current value. Operands that name no variable are
//! silently ignored.
//!
//! # Exit status
//!
//! Always zero.

use crate::Result;
use clash_env::Env;

/// Entry point of the `export` built-in
pub fn main(env: &mut Env, args: &[String]) -> Result {
    for name in args {
        // `set_var` rejects names the environment cannot represent.
        if name.is_empty() || name.contains('=') {
            continue;
        }
        if let Some(value) = env.variables.get(name) {
            // The session is single-threaded; nothing reads the environment
            // concurrently.
            unsafe { std::env::set_var(name, value) };
        }
    }
    Result::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_variable_is_copied_to_the_environment() {
        let mut env = Env::new("clash", &[]);
        env.variables.assign("CLASH_EXPORT_TEST_A", "value a");

        let result = main(&mut env, &["CLASH_EXPORT_TEST_A".to_owned()]);

        assert_eq!(result, Result::default());
        assert_eq!(
            std::env::var("CLASH_EXPORT_TEST_A").as_deref(),
            Ok("value a")
        );
        unsafe { std::env::remove_var("CLASH_EXPORT_TEST_A") };
    }

    #[test]
    fn unknown_variable_is_ignored() {
        let mut env = Env::new("clash", &[]);
        let result = main(&mut env, &["CLASH_EXPORT_TEST_B".to_owned()]);

        assert_eq!(result, Result::default());
        assert_eq!(
            std::env::var("CLASH_EXPORT_TEST_B"),
            Err(std::env::VarError::NotPresent)
        );
    }
}
