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

//! Locating external commands
//!
//! A [`SearchPath`] holds the directories derived from `PATH` at session
//! start and a cache of previous resolutions. The directory list keeps the
//! left-to-right order of `PATH`, so the first directory providing an
//! executable wins deterministically. The cache is never invalidated within
//! a session: a command that moves after its first use keeps resolving to
//! the remembered path.

use crate::system;
use thiserror::Error;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `PATH` value used when the ambient environment does not define one
pub const DEFAULT_PATH: &str = "/usr/local/bin:/usr/local/sbin:/usr/bin:/usr/sbin:/bin:/sbin";

/// Reason a command name did not resolve to an executable
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub enum SearchError {
    /// No executable of the given name exists in the search path.
    #[error("command not found")]
    NotFound,
    /// The named file exists but may not be executed.
    #[error("permission denied")]
    PermissionDenied,
}

/// Command search directories and resolution cache
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchPath {
    dirs: Vec<String>,
    cache: HashMap<String, PathBuf>,
}

impl SearchPath {
    /// Creates a search path from a `PATH` value.
    ///
    /// The value is split on `:`; an empty component stands for the current
    /// directory. `.` is appended when no component names it, so the current
    /// directory is always searched. When `path` is `None`,
    /// [`DEFAULT_PATH`] is used.
    #[must_use]
    pub fn new(path: Option<&str>) -> SearchPath {
        let path = path.unwrap_or(DEFAULT_PATH);
        let mut dirs: Vec<String> = path
            .split(':')
            .map(|dir| if dir.is_empty() { "." } else { dir }.to_owned())
            .collect();
        if !dirs.iter().any(|dir| dir == ".") {
            dirs.push(".".to_owned());
        }
        SearchPath {
            dirs,
            cache: HashMap::new(),
        }
    }

    /// Resolves a command name to the path of an executable file.
    ///
    /// A name beginning with `/` is used as is and must name an executable
    /// regular file. Any other name is looked up in the cache first, then in
    /// the search directories in order; the first directory containing an
    /// executable of that name wins. Successful absolute resolutions are
    /// cached for the rest of the session.
    pub fn resolve(&mut self, name: &str) -> Result<PathBuf, SearchError> {
        if name.starts_with('/') {
            let path = PathBuf::from(name);
            return if system::is_executable_file(&path) {
                Ok(path)
            } else if system::is_regular_file(&path) {
                Err(SearchError::PermissionDenied)
            } else {
                Err(SearchError::NotFound)
            };
        }

        if let Some(path) = self.cache.get(name) {
            return Ok(path.clone());
        }

        for dir in &self.dirs {
            let candidate = Path::new(dir).join(name);
            if system::is_executable_file(&candidate) {
                if candidate.is_absolute() {
                    self.cache.insert(name.to_owned(), candidate.clone());
                }
                return Ok(candidate);
            }
        }
        Err(SearchError::NotFound)
    }
}
