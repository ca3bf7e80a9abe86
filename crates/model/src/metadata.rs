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

//! The decoded Kotlin metadata tree attached to an artifact.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::bitenum::BitEnum;
use crate::flags::{
    AccessorFlag, ClassFlag, ClassKind, ConstructorFlag, FunctionFlag, MemberKind, Modality,
    PropertyFlag, SyntheticFlavor, TypeFlag, TypeParameterFlag, ValueParameterFlag, Variance,
    Visibility,
};
use crate::jvm::{JvmFieldSignature, JvmMethodSignature};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataVersion(pub [u32; 3]);

impl Display for MetadataVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [major, minor, patch] = self.0;
        write!(f, "{major}.{minor}.{patch}")
    }
}

/// The `kotlin.Metadata` annotation of an artifact, decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: MetadataVersion,
    #[serde(flatten)]
    pub kind: MetadataKind,
}

impl Metadata {
    pub fn new(version: [u32; 3], kind: MetadataKind) -> Self {
        Self {
            version: MetadataVersion(version),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MetadataKind {
    Class(ClassMetadata),
    FileFacade(DeclarationContainer),
    SyntheticClass(SyntheticClassMetadata),
    MultiFileFacade(MultiFileFacadeMetadata),
    MultiFilePart(MultiFilePartMetadata),
}

impl MetadataKind {
    /// Kinds that are normally printed inside their owner rather than on their own.
    pub fn is_embedded(&self) -> bool {
        matches!(
            self,
            MetadataKind::SyntheticClass(_) | MetadataKind::MultiFilePart(_)
        )
    }

    /// Stable key used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            MetadataKind::Class(_) => "class",
            MetadataKind::FileFacade(_) => "fileFacade",
            MetadataKind::SyntheticClass(_) => "syntheticClass",
            MetadataKind::MultiFileFacade(_) => "multiFileClassFacade",
            MetadataKind::MultiFilePart(_) => "multiFileClassPart",
        }
    }

    /// Functions and properties declared directly on this kind, if it is a declaration container.
    pub fn declarations(&self) -> Option<&DeclarationContainer> {
        match self {
            MetadataKind::Class(class) => Some(&class.declarations),
            MetadataKind::FileFacade(container) => Some(container),
            MetadataKind::MultiFilePart(part) => Some(&part.declarations),
            MetadataKind::SyntheticClass(_) | MetadataKind::MultiFileFacade(_) => None,
        }
    }
}

/// Members shared by classes, file facades and multi-file parts.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarationContainer {
    #[serde(default)]
    pub functions: Vec<Function>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub local_delegated_properties: Vec<Property>,
    #[serde(default)]
    pub type_aliases: Vec<TypeAlias>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetadata {
    pub class_name: String,
    #[serde(default, rename = "class_kind")]
    pub kind: ClassKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modality: Modality,
    #[serde(default)]
    pub flags: BitEnum<ClassFlag>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub super_types: Vec<KotlinType>,
    #[serde(default)]
    pub context_receivers: Vec<KotlinType>,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
    /// Short names, relative to `class_name`.
    #[serde(default)]
    pub nested_class_names: Vec<String>,
    #[serde(default)]
    pub companion_object_name: Option<String>,
    /// Internal names.
    #[serde(default)]
    pub sealed_subclass_names: Vec<String>,
    #[serde(default)]
    pub enum_entry_names: Vec<String>,
    #[serde(default)]
    pub underlying_property_name: Option<String>,
    #[serde(default)]
    pub underlying_property_type: Option<KotlinType>,
    #[serde(default)]
    pub anonymous_object_origin_name: Option<String>,
    #[serde(default)]
    pub version_requirement: Option<VersionRequirement>,
    #[serde(flatten)]
    pub declarations: DeclarationContainer,
}

impl ClassMetadata {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Default::default()
        }
    }

    pub fn companion_class_name(&self) -> Option<String> {
        self.companion_object_name
            .as_ref()
            .map(|name| format!("{}${name}", self.class_name))
    }

    /// Internal names of nested classes, excluding the companion.
    pub fn nested_class_internal_names(&self) -> impl Iterator<Item = String> + '_ {
        self.nested_class_names
            .iter()
            .filter(|name| self.companion_object_name.as_ref() != Some(*name))
            .map(|name| format!("{}${name}", self.class_name))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticClassMetadata {
    #[serde(default)]
    pub flavor: SyntheticFlavor,
    #[serde(default)]
    pub functions: Vec<Function>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiFileFacadeMetadata {
    /// Internal names of the parts.
    #[serde(default)]
    pub part_class_names: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiFilePartMetadata {
    pub facade_name: String,
    #[serde(flatten)]
    pub declarations: DeclarationContainer,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionRequirement {
    pub major: u32,
    pub minor: u32,
    #[serde(default)]
    pub patch: u32,
}

impl VersionRequirement {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Display for VersionRequirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub flags: BitEnum<ConstructorFlag>,
    #[serde(default)]
    pub value_parameters: Vec<ValueParameter>,
    #[serde(default)]
    pub version_requirement: Option<VersionRequirement>,
    #[serde(default)]
    pub jvm_signature: Option<JvmMethodSignature>,
}

impl Constructor {
    pub fn primary(value_parameters: Vec<ValueParameter>) -> Self {
        Self {
            value_parameters,
            ..Default::default()
        }
    }

    pub fn secondary(value_parameters: Vec<ValueParameter>) -> Self {
        Self {
            flags: BitEnum::new_with(ConstructorFlag::Secondary),
            value_parameters,
            ..Default::default()
        }
    }

    pub fn is_secondary(&self) -> bool {
        self.flags.contains(ConstructorFlag::Secondary)
    }

    pub fn is_parameterless(&self) -> bool {
        self.value_parameters.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modality: Modality,
    #[serde(default)]
    pub member_kind: MemberKind,
    #[serde(default)]
    pub flags: BitEnum<FunctionFlag>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub receiver_type: Option<KotlinType>,
    #[serde(default)]
    pub context_receivers: Vec<KotlinType>,
    #[serde(default)]
    pub value_parameters: Vec<ValueParameter>,
    pub return_type: KotlinType,
    #[serde(default)]
    pub version_requirement: Option<VersionRequirement>,
    #[serde(default)]
    pub jvm_signature: Option<JvmMethodSignature>,
}

impl Function {
    pub fn new(name: impl Into<String>, return_type: KotlinType) -> Self {
        Self {
            name: name.into(),
            return_type,
            ..Default::default()
        }
    }
}

/// Modifiers of a property getter or setter, and the JVM method implementing it.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAccessor {
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modality: Modality,
    #[serde(default)]
    pub flags: BitEnum<AccessorFlag>,
    #[serde(default)]
    pub signature: Option<JvmMethodSignature>,
}

impl PropertyAccessor {
    pub fn with_signature(signature: JvmMethodSignature) -> Self {
        Self {
            signature: Some(signature),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modality: Modality,
    #[serde(default)]
    pub member_kind: MemberKind,
    #[serde(default)]
    pub flags: BitEnum<PropertyFlag>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub receiver_type: Option<KotlinType>,
    #[serde(default)]
    pub context_receivers: Vec<KotlinType>,
    #[serde(rename = "type")]
    pub ty: KotlinType,
    #[serde(default)]
    pub getter: Option<PropertyAccessor>,
    #[serde(default)]
    pub setter: Option<PropertyAccessor>,
    #[serde(default)]
    pub setter_parameter: Option<ValueParameter>,
    #[serde(default)]
    pub version_requirement: Option<VersionRequirement>,
    #[serde(default)]
    pub backing_field: Option<JvmFieldSignature>,
    /// The `$annotations` method carrying the property's JVM annotations.
    #[serde(default)]
    pub synthetic_method_for_annotations: Option<JvmMethodSignature>,
    #[serde(default)]
    pub synthetic_method_for_delegate: Option<JvmMethodSignature>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: KotlinType) -> Self {
        Self {
            name: name.into(),
            ty,
            ..Default::default()
        }
    }

    pub fn is_var(&self) -> bool {
        self.flags.contains(PropertyFlag::Var)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub annotations: Vec<KotlinAnnotation>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    pub underlying_type: KotlinType,
    #[serde(default)]
    pub expanded_type: Option<KotlinType>,
    #[serde(default)]
    pub version_requirement: Option<VersionRequirement>,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, underlying_type: KotlinType) -> Self {
        Self {
            name: name.into(),
            underlying_type,
            ..Default::default()
        }
    }
}

/// A type use. Exactly one of `class_name`, `alias_name` or `type_parameter_id` is
/// normally set; a type with none of them prints as an invalid name.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct KotlinType {
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub alias_name: Option<String>,
    #[serde(default)]
    pub type_parameter_id: Option<u32>,
    #[serde(default)]
    pub flags: BitEnum<TypeFlag>,
    #[serde(default)]
    pub variance: Variance,
    #[serde(default)]
    pub arguments: Vec<TypeArgument>,
    #[serde(default)]
    pub annotations: Vec<KotlinAnnotation>,
}

impl KotlinType {
    pub fn class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Default::default()
        }
    }

    pub fn alias(alias_name: impl Into<String>) -> Self {
        Self {
            alias_name: Some(alias_name.into()),
            ..Default::default()
        }
    }

    pub fn type_parameter(id: u32) -> Self {
        Self {
            type_parameter_id: Some(id),
            ..Default::default()
        }
    }

    pub fn nullable(mut self) -> Self {
        self.flags.set(TypeFlag::Nullable);
        self
    }

    pub fn with_flag(mut self, flag: TypeFlag) -> Self {
        self.flags.set(flag);
        self
    }

    pub fn with_variance(mut self, variance: Variance) -> Self {
        self.variance = variance;
        self
    }

    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = TypeArgument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    pub fn with_annotation(mut self, annotation: KotlinAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn is_nullable(&self) -> bool {
        self.flags.contains(TypeFlag::Nullable)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeArgument {
    Star,
    Type(KotlinType),
}

impl From<KotlinType> for TypeArgument {
    fn from(ty: KotlinType) -> Self {
        TypeArgument::Type(ty)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub variance: Variance,
    #[serde(default)]
    pub flags: BitEnum<TypeParameterFlag>,
    #[serde(default)]
    pub upper_bounds: Vec<KotlinType>,
    #[serde(default)]
    pub annotations: Vec<KotlinAnnotation>,
}

impl TypeParameter {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueParameter {
    pub name: String,
    #[serde(default)]
    pub flags: BitEnum<ValueParameterFlag>,
    #[serde(rename = "type")]
    pub ty: KotlinType,
    /// Set only for `vararg` parameters; `ty` then holds the array type.
    #[serde(default)]
    pub vararg_element_type: Option<KotlinType>,
}

impl ValueParameter {
    pub fn new(name: impl Into<String>, ty: KotlinType) -> Self {
        Self {
            name: name.into(),
            ty,
            ..Default::default()
        }
    }

    pub fn vararg(mut self, element_type: KotlinType) -> Self {
        self.vararg_element_type = Some(element_type);
        self
    }
}

/// An annotation recorded inside the metadata itself (on types, type parameters and
/// type aliases).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct KotlinAnnotation {
    pub class_name: String,
    #[serde(default)]
    pub arguments: Vec<AnnotationArgument>,
}

impl KotlinAnnotation {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            arguments: vec![],
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.arguments.push(AnnotationArgument {
            name: name.into(),
            value,
        });
        self
    }

    pub fn argument(&self, name: &str) -> Option<&AnnotationValue> {
        self.arguments
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationArgument {
    pub name: String,
    pub value: AnnotationValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AnnotationValue {
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    UByte(u8),
    UShort(u16),
    UInt(u32),
    ULong(u64),
    String(String),
    Class {
        class_name: String,
        #[serde(default)]
        array_dimensions: u32,
    },
    Enum {
        class_name: String,
        entry_name: String,
    },
    Annotation(KotlinAnnotation),
    Array(Vec<AnnotationValue>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_class_metadata() {
        let json = r#"{
            "version": [1, 9, 0],
            "kind": "class",
            "class_name": "pkg/Outer",
            "flags": ["data"],
            "nested_class_names": ["Inner", "Companion"],
            "companion_object_name": "Companion",
            "properties": [
                { "name": "x", "type": { "class_name": "kotlin/Int" } }
            ]
        }"#;
        let metadata: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.version.to_string(), "1.9.0");
        let MetadataKind::Class(class) = &metadata.kind else {
            panic!("expected class metadata, got {:?}", metadata.kind);
        };
        assert!(class.flags.contains(ClassFlag::Data));
        assert_eq!(class.declarations.properties[0].name, "x");
        assert_eq!(
            class.companion_class_name().as_deref(),
            Some("pkg/Outer$Companion")
        );
        assert_eq!(
            class.nested_class_internal_names().collect::<Vec<_>>(),
            vec!["pkg/Outer$Inner".to_string()]
        );
    }

    #[test]
    fn test_annotation_values_deserialize() {
        let json = r#"{
            "class_name": "kotlin/ParameterName",
            "arguments": [ { "name": "name", "value": { "type": "string", "value": "x" } } ]
        }"#;
        let annotation: KotlinAnnotation = serde_json::from_str(json).unwrap();
        assert_eq!(
            annotation.argument("name"),
            Some(&AnnotationValue::String("x".to_string()))
        );
    }

    #[test]
    fn test_embedded_kinds() {
        assert!(MetadataKind::SyntheticClass(Default::default()).is_embedded());
        assert!(MetadataKind::MultiFilePart(Default::default()).is_embedded());
        assert!(!MetadataKind::FileFacade(Default::default()).is_embedded());
    }
}
