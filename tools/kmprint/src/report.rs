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

//! The JSON summary written with `--json`.

use std::collections::BTreeMap;

use kmp_model::names::{external_class_name, external_package_name, external_short_class_name};
use kmp_model::{Artifact, MetadataKind};
use serde::Serialize;

const METADATA_KINDS: [&str; 5] = [
    "class",
    "fileFacade",
    "syntheticClass",
    "multiFileClassFacade",
    "multiFileClassPart",
];

#[derive(Debug, Serialize)]
pub struct Report {
    pub input: String,
    pub statistics: Statistics,
    pub metadata: BTreeMap<String, MetadataEntry>,
}

#[derive(Debug, Serialize)]
pub struct Statistics {
    pub java: JavaStatistics,
    pub kotlin: KotlinStatistics,
}

#[derive(Debug, Default, Serialize)]
pub struct JavaStatistics {
    pub classes: usize,
}

#[derive(Debug, Serialize)]
pub struct KotlinStatistics {
    pub metadata: BTreeMap<&'static str, usize>,
    pub functions: FunctionStatistics,
}

#[derive(Debug, Default, Serialize)]
pub struct FunctionStatistics {
    pub normal: usize,
    pub synthetic: usize,
}

#[derive(Debug, Serialize)]
pub struct MetadataEntry {
    pub package: String,
    pub name: String,
    pub kind: &'static str,
    pub printed: String,
}

impl Report {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            statistics: Statistics {
                java: JavaStatistics::default(),
                kotlin: KotlinStatistics {
                    metadata: METADATA_KINDS.iter().map(|kind| (*kind, 0)).collect(),
                    functions: FunctionStatistics::default(),
                },
            },
            metadata: BTreeMap::new(),
        }
    }

    /// Count an artifact that passed the class filter, and record its text if it was printed.
    pub fn record(&mut self, artifact: &Artifact, printed: Option<&str>) {
        self.statistics.java.classes += 1;
        let Some(metadata) = &artifact.metadata else {
            return;
        };

        let kotlin = &mut self.statistics.kotlin;
        *kotlin.metadata.entry(metadata.kind.label()).or_default() += 1;
        match &metadata.kind {
            MetadataKind::SyntheticClass(synthetic) => {
                kotlin.functions.synthetic += synthetic.functions.len();
            }
            kind => {
                kotlin.functions.normal += kind.declarations().map_or(0, |d| d.functions.len());
            }
        }

        if let Some(printed) = printed {
            let external = external_class_name(&artifact.name);
            self.metadata.insert(
                external.clone(),
                MetadataEntry {
                    package: external_package_name(&artifact.name),
                    name: external_short_class_name(&external).to_string(),
                    kind: metadata.kind.label(),
                    printed: printed.to_string(),
                },
            );
        }
    }

    pub fn kotlin_metadata_count(&self) -> usize {
        self.statistics.kotlin.metadata.values().sum()
    }
}
