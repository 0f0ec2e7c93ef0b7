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

//! Connection between the processor and the session
//!
//! [`Expander`] implements the [`Expand`] trait on top of the session
//! environment: variable references resolve against the session's bindings,
//! and command substitutions run the substituted script through the
//! [capturing sub-evaluator](crate::capture).

use crate::Error;
use crate::capture;
use clash_env::Env;
use clash_syntax::process::Expand;

/// Substitution source backed by a session environment
#[derive(Debug)]
pub struct Expander<'a> {
    /// The session to resolve substitutions in
    pub env: &'a mut Env,
}

impl Expand for Expander<'_> {
    type Error = Error;

    fn variable(&self, name: &str) -> Option<String> {
        self.env.variables.get(name).map(str::to_owned)
    }

    fn command_output(&mut self, script: &str) -> Result<Vec<u8>, Error> {
        capture::capture(self.env, script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_resolve_against_the_session() {
        let mut env = Env::new("clash", &[]);
        env.variables.assign("x", "abc");
        let expander = Expander { env: &mut env };

        assert_eq!(expander.variable("x"), Some("abc".to_owned()));
        assert_eq!(expander.variable("?"), Some("0".to_owned()));
        assert_eq!(expander.variable("novar"), None);
    }
}
