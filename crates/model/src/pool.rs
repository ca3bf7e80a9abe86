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

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io::Read;
use std::ops::Bound;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::jvm::Artifact;
use crate::names::{INNER_CLASS_SEPARATOR, PACKAGE_SEPARATOR};

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Failed to read artifact pool: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse artifact pool: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Artifact {0} is defined more than once")]
    DuplicateArtifact(String),
}

/// Serialized form of a pool.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PoolDocument {
    pub artifacts: Vec<Artifact>,
}

/// Every artifact of a batch, ordered by internal name.
#[derive(Debug, Default, Clone)]
pub struct ArtifactPool {
    artifacts: BTreeMap<String, Artifact>,
}

impl ArtifactPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_artifacts(
        artifacts: impl IntoIterator<Item = Artifact>,
    ) -> Result<Self, PoolError> {
        let mut pool = Self::new();
        for artifact in artifacts {
            pool.insert(artifact)?;
        }
        Ok(pool)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, PoolError> {
        let document: PoolDocument = serde_json::from_reader(reader)?;
        Self::from_artifacts(document.artifacts)
    }

    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        let document: PoolDocument = serde_json::from_str(json)?;
        Self::from_artifacts(document.artifacts)
    }

    pub fn load(path: &Path) -> Result<Self, PoolError> {
        let file = std::fs::File::open(path)?;
        let pool = Self::from_reader(std::io::BufReader::new(file))?;
        debug!("Loaded {} artifacts from {:?}", pool.len(), path);
        Ok(pool)
    }

    pub fn insert(&mut self, artifact: Artifact) -> Result<(), PoolError> {
        match self.artifacts.entry(artifact.name.clone()) {
            Entry::Occupied(_) => Err(PoolError::DuplicateArtifact(artifact.name)),
            Entry::Vacant(slot) => {
                slot.insert(artifact);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Artifacts named `<enclosing>$...` in the same package, in name order. This covers
    /// nested classes at any depth as well as compiler-generated lambdas and objects.
    pub fn inner_artifacts<'a>(&'a self, enclosing: &str) -> impl Iterator<Item = &'a Artifact> {
        let prefix = format!("{enclosing}{INNER_CLASS_SEPARATOR}");
        let depth = prefix.len();
        self.artifacts
            .range::<str, _>((Bound::Excluded(prefix.as_str()), Bound::Unbounded))
            .map(|(_, artifact)| artifact)
            .take_while(move |artifact| artifact.name.starts_with(&prefix))
            .filter(move |artifact| !artifact.name[depth..].contains(PACKAGE_SEPARATOR))
    }
}

impl<'a> IntoIterator for &'a ArtifactPool {
    type Item = &'a Artifact;
    type IntoIter = std::collections::btree_map::Values<'a, String, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.values()
    }
}
