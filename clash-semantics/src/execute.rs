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

//! Command dispatch and execution
//!
//! [`eval`] drives one script through the whole pipeline: splitting,
//! processing, word splitting, redirection, and dispatch. A command is,
//! in order of precedence, a variable assignment, a built-in, or an
//! external program.
//!
//! External programs run in forked children. A lone command is waited for
//! immediately; pipeline members only contribute their process ID to the
//! evaluation's reap list, so all stages of a pipeline run concurrently.
//! The reap loop runs even when the evaluation is cut short by an error or
//! an `exit`, so no spawned child is left behind, and the last reaped
//! status becomes `$?`.

use crate::Command;
use crate::Error;
use crate::command;
use crate::expansion::Expander;
use crate::redir;
use clash_env::Env;
use clash_env::semantics::{Divert, ExitStatus};
use clash_env::system::{self, Errno, ForkResult, Pid};
use clash_env::variable;
use clash_syntax::process::process;
use clash_syntax::words::split_words;
use std::ffi::{CStr, CString};
use std::ops::ControlFlow::{self, Break, Continue};
use std::os::unix::ffi::OsStrExt;

/// Evaluates one script in the given session environment.
///
/// Returns `Break` with the requested exit status when an `exit` built-in
/// ends the session. An `Err` aborts the remaining commands of this script
/// but leaves the session usable.
pub fn eval(env: &mut Env, script: &str) -> Result<ControlFlow<ExitStatus>, Error> {
    let mut pipeline = Vec::new();
    let mut result = Ok(Continue(()));

    for command in command::commands(script)? {
        match dispatch(env, command, &mut pipeline) {
            Ok(Continue(())) => {}
            other => {
                result = other;
                break;
            }
        }
    }

    let mut last = None;
    for pid in pipeline {
        if let Ok(status) = system::wait_child(pid) {
            last = Some(status);
        }
    }
    if let Some(status) = last {
        env.set_exit_status(status);
    }

    result
}

/// Executes a single command.
fn dispatch(
    env: &mut Env,
    mut command: Command,
    pipeline: &mut Vec<Pid>,
) -> Result<ControlFlow<ExitStatus>, Error> {
    command.text = process(&command.text, &mut Expander { env: &mut *env })?;
    let words = split_words(&command.text)?;
    redir::apply(&mut command, &words.redirects)?;
    let fields = words.fields;

    let Some(name) = fields.first() else {
        // Redirections without a command still open (and create) their
        // targets; the descriptors are closed again right here.
        return Ok(Continue(()));
    };

    if fields.len() == 1 {
        if let Some((name, value)) = assignment(&fields[0]) {
            env.variables.assign(name, value);
            return Ok(Continue(()));
        }
    }

    if let Some(builtin) = clash_builtin::find(name) {
        let result = builtin(env, &fields[1..]);
        env.set_exit_status(result.exit_status);
        return Ok(match result.divert {
            Continue(()) => Continue(()),
            Break(Divert::Exit(status)) => Break(status),
        });
    }

    run_external(env, command, &fields, pipeline)
}

/// Recognizes a `NAME=VALUE` word.
///
/// The name must start with an ASCII letter and continue with ASCII letters
/// and digits; anything else is not an assignment and falls through to
/// command execution.
fn assignment(word: &str) -> Option<(&str, &str)> {
    let (name, value) = word.split_once('=')?;
    variable::is_assignable_name(name).then_some((name, value))
}

/// Locates and forks an external program.
fn run_external(
    env: &mut Env,
    command: Command,
    fields: &[String],
    pipeline: &mut Vec<Pid>,
) -> Result<ControlFlow<ExitStatus>, Error> {
    let name = &fields[0];
    let path = match env.search_path.resolve(name) {
        Ok(path) => path,
        Err(clash_env::path::SearchError::NotFound) => {
            env.set_exit_status(ExitStatus::NOT_FOUND);
            return Err(Error::CommandNotFound(name.clone()));
        }
        Err(clash_env::path::SearchError::PermissionDenied) => {
            env.set_exit_status(ExitStatus::NOEXEC);
            return Err(Error::PermissionDenied(name.clone()));
        }
    };

    // The argv vector must be complete before forking; the child restricts
    // itself to descriptor wiring and `exec`.
    let path = CString::new(path.as_os_str().as_bytes()).map_err(|_| Errno::EINVAL)?;
    let mut argv = Vec::with_capacity(fields.len());
    argv.push(path.clone());
    for field in &fields[1..] {
        argv.push(CString::new(field.as_str()).map_err(|_| Errno::EINVAL)?);
    }

    let fork_result = unsafe { system::fork() }?;
    match fork_result {
        ForkResult::Child => {
            let status = exec_child(&command, &path, &argv);
            std::process::exit(status)
        }
        ForkResult::Parent { child } => {
            let in_pipeline = command.in_pipeline;
            // Closes this command's pipe and redirection descriptors in the
            // parent. Leaving a pipe write end open here would keep the
            // reading child from ever seeing end-of-file.
            drop(command);

            if in_pipeline {
                pipeline.push(child);
            } else {
                let status = system::wait_child(child)?;
                env.set_exit_status(status);
            }
            Ok(Continue(()))
        }
    }
}

/// Runs in the forked child: wires descriptors and execs.
///
/// Returns the exit status for the child only if something failed.
fn exec_child(command: &Command, path: &CStr, argv: &[CString]) -> i32 {
    if let Some(fd) = &command.input {
        if system::replace_stdin(fd).is_err() {
            return 126;
        }
    }
    if let Some(fd) = &command.output {
        if system::replace_stdout(fd).is_err() {
            return 126;
        }
    }

    let errno = match system::execv(path, argv) {
        Err(errno) => errno,
        Ok(infallible) => match infallible {},
    };
    eprintln!("clash: {}: {}", path.to_string_lossy(), errno.desc());
    if errno == Errno::EACCES { 126 } else { 127 }
}
