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

//! The decoded form of Kotlin metadata and the JVM artifacts carrying it, as consumed by
//! `kmp-printer`. Produced by an external decoder and loaded here from JSON.

pub use crate::bitenum::BitEnum;
pub use crate::jvm::{
    Artifact, ConstantValue, ElementValue, ElementValueKind, JvmAnnotation, JvmField,
    JvmFieldSignature, JvmMethod, JvmMethodSignature,
};
pub use crate::metadata::{
    AnnotationArgument, AnnotationValue, ClassMetadata, Constructor, DeclarationContainer,
    Function, KotlinAnnotation, KotlinType, Metadata, MetadataKind, MetadataVersion,
    MultiFileFacadeMetadata, MultiFilePartMetadata, Property, PropertyAccessor,
    SyntheticClassMetadata, TypeAlias, TypeArgument, TypeParameter, ValueParameter,
    VersionRequirement,
};
pub use crate::node::{MetadataNode, NodeKind, Scoped};
pub use crate::pool::{ArtifactPool, PoolDocument, PoolError};

mod bitenum;
pub mod descriptor;
pub mod flags;
mod jvm;
mod metadata;
pub mod names;
mod node;
mod pool;
