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

use strum::Display;

use crate::jvm::Artifact;
use crate::metadata::{
    ClassMetadata, Constructor, DeclarationContainer, Function, KotlinAnnotation, KotlinType,
    Metadata, MetadataKind, MultiFileFacadeMetadata, MultiFilePartMetadata, Property,
    SyntheticClassMetadata, TypeAlias, TypeParameter, ValueParameter, VersionRequirement,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display)]
pub enum NodeKind {
    Class,
    FileFacade,
    SyntheticClass,
    MultiFileFacade,
    MultiFilePart,
    Constructor,
    Function,
    Property,
    TypeAlias,
    Type,
    TypeParameter,
    ValueParameter,
    Annotation,
    VersionRequirement,
}

impl From<&MetadataKind> for NodeKind {
    fn from(kind: &MetadataKind) -> Self {
        match kind {
            MetadataKind::Class(_) => NodeKind::Class,
            MetadataKind::FileFacade(_) => NodeKind::FileFacade,
            MetadataKind::SyntheticClass(_) => NodeKind::SyntheticClass,
            MetadataKind::MultiFileFacade(_) => NodeKind::MultiFileFacade,
            MetadataKind::MultiFilePart(_) => NodeKind::MultiFilePart,
        }
    }
}

/// A scope-opening node together with the artifact it was decoded from.
#[derive(Debug)]
pub struct Scoped<'a, T> {
    pub artifact: &'a Artifact,
    pub metadata: &'a Metadata,
    pub node: &'a T,
}

// Derived impls would demand `T: Copy`; only references are held.
impl<T> Clone for Scoped<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Scoped<'_, T> {}

/// A borrowed view of one node of an artifact's metadata tree.
#[derive(Debug, Clone, Copy)]
pub enum MetadataNode<'a> {
    Class(Scoped<'a, ClassMetadata>),
    FileFacade(Scoped<'a, DeclarationContainer>),
    SyntheticClass(Scoped<'a, SyntheticClassMetadata>),
    MultiFileFacade(Scoped<'a, MultiFileFacadeMetadata>),
    MultiFilePart(Scoped<'a, MultiFilePartMetadata>),
    Constructor(&'a Constructor),
    Function(&'a Function),
    Property(&'a Property),
    TypeAlias(&'a TypeAlias),
    Type(&'a KotlinType),
    TypeParameter(&'a TypeParameter),
    ValueParameter {
        index: usize,
        parameter: &'a ValueParameter,
    },
    Annotation(&'a KotlinAnnotation),
    VersionRequirement(&'a VersionRequirement),
}

impl<'a> MetadataNode<'a> {
    /// The root node of an artifact, if it carries metadata.
    pub fn root(artifact: &'a Artifact) -> Option<Self> {
        let metadata = artifact.metadata.as_ref()?;
        Some(match &metadata.kind {
            MetadataKind::Class(node) => MetadataNode::Class(Scoped {
                artifact,
                metadata,
                node,
            }),
            MetadataKind::FileFacade(node) => MetadataNode::FileFacade(Scoped {
                artifact,
                metadata,
                node,
            }),
            MetadataKind::SyntheticClass(node) => MetadataNode::SyntheticClass(Scoped {
                artifact,
                metadata,
                node,
            }),
            MetadataKind::MultiFileFacade(node) => MetadataNode::MultiFileFacade(Scoped {
                artifact,
                metadata,
                node,
            }),
            MetadataKind::MultiFilePart(node) => MetadataNode::MultiFilePart(Scoped {
                artifact,
                metadata,
                node,
            }),
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            MetadataNode::Class(_) => NodeKind::Class,
            MetadataNode::FileFacade(_) => NodeKind::FileFacade,
            MetadataNode::SyntheticClass(_) => NodeKind::SyntheticClass,
            MetadataNode::MultiFileFacade(_) => NodeKind::MultiFileFacade,
            MetadataNode::MultiFilePart(_) => NodeKind::MultiFilePart,
            MetadataNode::Constructor(_) => NodeKind::Constructor,
            MetadataNode::Function(_) => NodeKind::Function,
            MetadataNode::Property(_) => NodeKind::Property,
            MetadataNode::TypeAlias(_) => NodeKind::TypeAlias,
            MetadataNode::Type(_) => NodeKind::Type,
            MetadataNode::TypeParameter(_) => NodeKind::TypeParameter,
            MetadataNode::ValueParameter { .. } => NodeKind::ValueParameter,
            MetadataNode::Annotation(_) => NodeKind::Annotation,
            MetadataNode::VersionRequirement(_) => NodeKind::VersionRequirement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Metadata, MetadataKind};

    #[test]
    fn test_root_kind_follows_metadata() {
        let artifact = Artifact::new("pkg/FooKt").with_metadata(Metadata::new(
            [1, 9, 0],
            MetadataKind::FileFacade(DeclarationContainer::default()),
        ));
        let node = MetadataNode::root(&artifact).unwrap();
        assert_eq!(node.kind(), NodeKind::FileFacade);
        let copied = node;
        assert_eq!(copied.kind(), node.kind());
        assert!(MetadataNode::root(&Artifact::new("pkg/Plain")).is_none());
    }
}
