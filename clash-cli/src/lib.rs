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

//! Command-line frontend of the clash shell
//!
//! This crate implements the read-eval loop around the evaluator: it picks
//! the input mode from the command line, feeds script text to
//! [`clash_semantics::eval`], prints evaluation errors as
//! `clash: <message>` on standard error, and turns the final `?` value (or
//! the operand of `exit`) into the process exit code. Evaluation errors
//! never end the session; only end of input and `exit` do.

pub mod startup;

use self::startup::Input;
use clash_env::Env;
use clash_env::semantics::ExitStatus;
use clash_semantics::eval;
use std::io::{BufRead, IsTerminal, Write};
use std::ops::ControlFlow::{self, Break, Continue};
use std::process::ExitCode;

/// Evaluates one script, reporting any error to standard error.
fn run(env: &mut Env, script: &str) -> ControlFlow<ExitStatus> {
    match eval(env, script) {
        Ok(flow) => flow,
        Err(error) => {
            eprintln!("clash: {error}");
            Continue(())
        }
    }
}

/// Reads and evaluates lines from standard input until end of input.
///
/// A `% ` prompt is printed before each line when standard input is a
/// terminal.
fn read_eval_loop(env: &mut Env) -> ExitStatus {
    let prompting = std::io::stdin().is_terminal();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if prompting {
            print!("% ");
            let _ = std::io::stdout().flush();
        }
        match lines.next() {
            Some(Ok(line)) => {
                if let Break(status) = run(env, &line) {
                    return status;
                }
            }
            Some(Err(error)) => {
                eprintln!("clash: {error}");
                return ExitStatus::FAILURE;
            }
            None => return env.exit_status,
        }
    }
}

/// Entry point of the shell process
#[must_use]
pub fn main() -> ExitCode {
    let input = match startup::parse(std::env::args().skip(1)) {
        Ok(input) => input,
        Err(error) => {
            eprintln!("clash: {error}");
            return ExitCode::from(2);
        }
    };

    let name = match &input {
        Input::File(file) => file.as_str(),
        Input::Stdin | Input::Command(_) => "clash",
    };
    let mut env = Env::new(name, &[]);

    let status = match input {
        Input::Stdin => read_eval_loop(&mut env),
        Input::File(file) => match std::fs::read_to_string(&file) {
            Ok(script) => match run(&mut env, &script) {
                Continue(()) => env.exit_status,
                Break(status) => status,
            },
            Err(error) => {
                eprintln!("clash: {file}: {error}");
                ExitStatus::NOT_FOUND
            }
        },
        Input::Command(script) => match run(&mut env, &script) {
            Continue(()) => env.exit_status,
            Break(status) => status,
        },
    };

    ExitCode::from((status.0 & 0xff) as u8)
}
