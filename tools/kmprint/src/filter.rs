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

//! Class name filters in the usual `pkg.**,!pkg.internal.*` form.

use eyre::eyre;
use kmp_model::names::{PACKAGE_SEPARATOR, internal_class_name};
use regex::Regex;

#[derive(Debug)]
struct Pattern {
    regex: Regex,
    negated: bool,
}

/// A comma-separated list of class name patterns. `**` matches any run of characters, `*`
/// any run within one package, `?` a single character other than the package separator.
/// A leading `!` negates a pattern. The first pattern that matches decides; when none do,
/// the name is accepted only if the last pattern was negated.
#[derive(Debug)]
pub struct ClassNameFilter {
    patterns: Vec<Pattern>,
}

impl ClassNameFilter {
    pub fn parse(filter: &str) -> Result<Self, eyre::Report> {
        let patterns = filter
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                let (negated, p) = match p.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, p),
                };
                let regex = Regex::new(&wildcard_regex(&internal_class_name(p)))
                    .map_err(|e| eyre!("Invalid class name filter {:?}: {}", p, e))?;
                Ok(Pattern { regex, negated })
            })
            .collect::<Result<Vec<_>, eyre::Report>>()?;
        if patterns.is_empty() {
            return Err(eyre!("Empty class name filter {:?}", filter));
        }
        Ok(Self { patterns })
    }

    /// Matches an internal (`pkg/Name`) class name.
    pub fn matches(&self, internal_name: &str) -> bool {
        let mut accepted = false;
        for pattern in &self.patterns {
            if pattern.regex.is_match(internal_name) {
                return !pattern.negated;
            }
            accepted = pattern.negated;
        }
        accepted
    }
}

fn wildcard_regex(pattern: &str) -> String {
    let not_separator = format!("[^{}]", regex::escape(&PACKAGE_SEPARATOR.to_string()));
    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str(".*");
            }
            '*' => {
                out.push_str(&not_separator);
                out.push('*');
            }
            '?' => out.push_str(&not_separator),
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    out.push('$');
    out
}
