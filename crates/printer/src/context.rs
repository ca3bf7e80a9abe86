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

use std::collections::HashMap;

use kmp_model::names::{INNER_CLASS_SEPARATOR, internal_package_name, internal_short_class_name};
use kmp_model::{Artifact, Metadata, MetadataKind, NodeKind};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

lazy_static! {
    static ref DEFAULT_KOTLIN_IMPORT: Regex = Regex::new(
        r"^kotlin/(?:(?:annotation|collections|comparisons|io|ranges|sequences|test|jvm)/)?([^/]*)$"
    )
    .unwrap();
    static ref DEFAULT_JAVA_IMPORT: Regex = Regex::new(r"^java/lang/([^/]*)$").unwrap();
}

pub const INVALID_CLASS_NAME: &str = "EmptyClassName /* Invalid metadata */";

/// A scope-opening node currently being printed.
#[derive(Debug, Clone, Copy)]
pub struct ContextFrame<'a> {
    pub artifact: &'a Artifact,
    pub metadata: &'a Metadata,
    pub kind: NodeKind,
}

impl<'a> ContextFrame<'a> {
    pub fn new(artifact: &'a Artifact, metadata: &'a Metadata) -> Self {
        Self {
            artifact,
            metadata,
            kind: NodeKind::from(&metadata.kind),
        }
    }
}

/// Naming scope for one print invocation: the nesting of scopes being printed, the type
/// parameters visible in them and the package of the outermost one.
#[derive(Debug, Default)]
pub struct Context<'a> {
    frames: Vec<ContextFrame<'a>>,
    type_parameters: HashMap<u32, String>,
    package: String,
}

impl<'a> Context<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ContextFrame<'a>) {
        if self.frames.is_empty() {
            self.package = internal_package_name(&frame.artifact.name).to_string();
            self.type_parameters.clear();
        }
        let previous = self.frames.last().map(|f| f.kind);
        let crosses_file_boundary = match (previous, frame.kind) {
            (Some(NodeKind::FileFacade), _) => true,
            (Some(NodeKind::MultiFileFacade), NodeKind::MultiFilePart) => true,
            _ => false,
        };
        if crosses_file_boundary {
            self.type_parameters.clear();
        }
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> ContextFrame<'a> {
        match self.frames.pop() {
            Some(frame) => frame,
            None => panic!("context frame stack underflow"),
        }
    }

    /// The innermost frame. Leaf nodes are only ever printed inside a scope.
    pub fn current(&self) -> &ContextFrame<'a> {
        match self.frames.last() {
            Some(frame) => frame,
            None => panic!("no context frame for leaf node"),
        }
    }

    pub fn is_top(&self) -> bool {
        self.frames.len() == 1
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Internal package name of the outermost artifact, e.g. `pkg/sub`.
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn register_type_parameter(&mut self, id: u32, name: &str) {
        self.type_parameters.insert(id, name.to_string());
    }

    pub fn resolve_type_parameter(&self, id: u32) -> String {
        match self.type_parameters.get(&id) {
            Some(name) => name.clone(),
            None => format!("X /* unknown {id} */"),
        }
    }

    /// Shorten an internal class name to what reads correctly at the current nesting point.
    /// `nesting_replacement` stands in for the `$` of nested class names.
    pub fn resolve_name(&self, qualified: &str, nesting_replacement: &str) -> String {
        if qualified.is_empty() {
            return INVALID_CLASS_NAME.to_string();
        }

        let mut name = qualified;
        for frame in self.frames.iter().rev() {
            match &frame.metadata.kind {
                MetadataKind::Class(class) => {
                    if let Some(rest) = name
                        .strip_prefix(class.class_name.as_str())
                        .and_then(|rest| rest.strip_prefix(INNER_CLASS_SEPARATOR))
                    {
                        name = rest;
                    }
                }
                MetadataKind::FileFacade(_) => {
                    if let Some(rest) = name
                        .strip_prefix(frame.artifact.name.as_str())
                        .and_then(|rest| rest.strip_prefix(INNER_CLASS_SEPARATOR))
                    {
                        name = rest;
                    }
                }
                _ => {}
            }
        }

        if !self.package.is_empty() {
            let short = internal_short_class_name(qualified);
            if let Some(rest) = name
                .strip_prefix(self.package.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
            {
                if rest == short {
                    name = rest;
                }
            }
        }

        let name = if let Some(captures) = DEFAULT_KOTLIN_IMPORT
            .captures(name)
            .or_else(|| DEFAULT_JAVA_IMPORT.captures(name))
        {
            captures.get(1).map_or(name, |m| m.as_str())
        } else {
            name
        };

        let mut resolved = name
            .replace(INNER_CLASS_SEPARATOR, nesting_replacement)
            .replace('/', ".");
        if !resolved.chars().next().is_some_and(is_identifier_start) {
            resolved.insert(0, '_');
        }
        trace!("Resolved {qualified} as {resolved}");
        resolved
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}
