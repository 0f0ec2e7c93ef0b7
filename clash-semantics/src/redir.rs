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

//! Opening redirection targets
//!
//! The word splitter only parses redirections; this module performs them.
//! `<file` opens the file read-only; `>file` opens it write-only with
//! create and truncate, mode 0644. The opened descriptor is installed in
//! the command, closing whatever descriptor held that slot before, so a
//! later redirection of the same direction wins.

use crate::Command;
use crate::Error;
use clash_env::system;
use clash_syntax::words::{RedirKind, Redirect};
use std::path::Path;

/// Applies parsed redirections to a command's descriptors.
pub fn apply(command: &mut Command, redirects: &[Redirect]) -> Result<(), Error> {
    for redirect in redirects {
        let path = Path::new(&redirect.target);
        match redirect.kind {
            RedirKind::Input => {
                let fd = system::open_input(path).map_err(|errno| Error::Redirect {
                    target: redirect.target.clone(),
                    errno,
                })?;
                command.input = Some(fd);
            }
            RedirKind::Output => {
                let fd = system::open_output(path).map_err(|errno| Error::Redirect {
                    target: redirect.target.clone(),
                    errno,
                })?;
                command.output = Some(fd);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clash_env::system::Errno;

    fn dummy_command() -> Command {
        let mut commands = crate::command::commands("x").unwrap();
        commands.remove(0)
    }

    fn redirect(kind: RedirKind, target: &Path) -> Redirect {
        Redirect {
            kind,
            target: target.to_str().unwrap().to_owned(),
        }
    }

    #[test]
    fn output_creates_and_input_reopens_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("target.txt");
        let mut command = dummy_command();

        apply(&mut command, &[redirect(RedirKind::Output, &file)]).unwrap();
        assert!(command.output.is_some());
        assert!(file.exists());

        apply(&mut command, &[redirect(RedirKind::Input, &file)]).unwrap();
        assert!(command.input.is_some());
    }

    #[test]
    fn output_truncates_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("target.txt");
        std::fs::write(&file, "old contents").unwrap();
        let mut command = dummy_command();

        apply(&mut command, &[redirect(RedirKind::Output, &file)]).unwrap();
        assert_eq!(std::fs::read(&file).unwrap(), b"");
    }

    #[test]
    fn missing_input_file_reports_the_os_error() {
        let mut command = dummy_command();
        let missing = Path::new("/no/such/file.txt");

        let result = apply(&mut command, &[redirect(RedirKind::Input, missing)]);
        assert_matches!(result, Err(Error::Redirect { target, errno }) => {
            assert_eq!(target, "/no/such/file.txt");
            assert_eq!(errno, Errno::ENOENT);
        });
    }

    #[test]
    fn later_redirection_replaces_the_earlier_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        let mut command = dummy_command();

        let redirects = [
            redirect(RedirKind::Output, &first),
            redirect(RedirKind::Output, &second),
        ];
        apply(&mut command, &redirects).unwrap();

        assert!(first.exists());
        assert!(second.exists());
        assert!(command.output.is_some());
    }
}
