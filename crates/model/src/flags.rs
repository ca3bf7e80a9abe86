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

//! Flag vocabularies carried by metadata nodes. Multi-valued modifiers are `BitEnum` sets
//! over the `*Flag` enums; mutually exclusive ones (visibility, modality, kinds) are plain
//! enums.

use enum_primitive_derive::Primitive;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Visibility {
    Internal,
    Private,
    Protected,
    #[default]
    Public,
    PrivateToThis,
    Local,
}

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum Modality {
    #[default]
    Final,
    Open,
    Abstract,
    Sealed,
}

/// How a callable member came to exist.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKind {
    #[default]
    Declaration,
    FakeOverride,
    Delegation,
    Synthesized,
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    Object,
    CompanionObject,
}

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "snake_case")]
pub enum SyntheticFlavor {
    #[default]
    Regular,
    Lambda,
    DefaultImpls,
    WhenMappings,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Primitive,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ClassFlag {
    Inner = 0,
    Data = 1,
    Value = 2,
    Fun = 3,
    Expect = 4,
    External = 5,
    CompiledInCompatibilityMode = 6,
    HasMethodBodiesInInterface = 7,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Primitive,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ConstructorFlag {
    Secondary = 0,
    HasAnnotations = 1,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Primitive,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FunctionFlag {
    Inline = 0,
    Infix = 1,
    Operator = 2,
    Tailrec = 3,
    External = 4,
    Suspend = 5,
    Expect = 6,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Primitive,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum PropertyFlag {
    Var = 0,
    Const = 1,
    Lateinit = 2,
    External = 3,
    Delegated = 4,
    Expect = 5,
    MovedFromInterfaceCompanion = 6,
    HasConstant = 7,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Primitive,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum AccessorFlag {
    External = 0,
    Inline = 1,
    /// No body was written for the accessor.
    Default = 2,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Primitive,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum TypeFlag {
    Nullable = 0,
    Suspend = 1,
    DefinitelyNonNull = 2,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Primitive,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum TypeParameterFlag {
    Reified = 0,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Primitive,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ValueParameterFlag {
    HasDefaultValue = 0,
    Crossinline = 1,
    Noinline = 2,
}

/// JVM access flags. Discriminants are the bit positions used in class files, so a
/// `BitEnum<AccessFlag>` holds the same value as the raw `access_flags` word.
#[derive(
    Debug,
    Clone,
    Copy,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Primitive,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum AccessFlag {
    Public = 0,
    Private = 1,
    Protected = 2,
    Static = 3,
    Final = 4,
    Synchronized = 5,
    Bridge = 6,
    Varargs = 7,
    Native = 8,
    Abstract = 10,
    Strict = 11,
    Synthetic = 12,
}
