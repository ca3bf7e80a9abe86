// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use papaya::HashSet;

/// Artifacts already printed inside a parent during a batch. Shared by every print
/// invocation of one printer; insertion is atomic, so invocations may run in parallel.
#[derive(Debug)]
pub struct VisitedSet {
    names: HashSet<String>,
}

impl Default for VisitedSet {
    fn default() -> Self {
        Self::new()
    }
}

impl VisitedSet {
    pub fn new() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    /// Mark `name` as visited. Returns true if it was not marked before.
    pub fn mark(&self, name: &str) -> bool {
        self.names.pin().insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.pin().contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
