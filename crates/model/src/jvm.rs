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

//! The class-file side of an artifact: members with descriptors, and the annotations
//! recorded in its runtime annotation attributes.

use serde::{Deserialize, Serialize};

use crate::bitenum::BitEnum;
use crate::flags::AccessFlag;
use crate::metadata::Metadata;
use crate::names::external_class_name;

/// One compiled class, identified by its internal name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    #[serde(default)]
    pub access: BitEnum<AccessFlag>,
    #[serde(default)]
    pub methods: Vec<JvmMethod>,
    #[serde(default)]
    pub fields: Vec<JvmField>,
    #[serde(default)]
    pub annotations: Vec<JvmAnnotation>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl Artifact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: BitEnum::new_with(AccessFlag::Public),
            methods: vec![],
            fields: vec![],
            annotations: vec![],
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_method(mut self, method: JvmMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_field(mut self, field: JvmField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_annotation(mut self, annotation: JvmAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn external_name(&self) -> String {
        external_class_name(&self.name)
    }

    pub fn find_method(&self, name: &str, descriptor: &str) -> Option<&JvmMethod> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }

    pub fn find_field(&self, name: &str, descriptor: &str) -> Option<&JvmField> {
        self.fields
            .iter()
            .find(|f| f.name == name && f.descriptor == descriptor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JvmMethod {
    pub name: String,
    pub descriptor: String,
    #[serde(default)]
    pub access: BitEnum<AccessFlag>,
    #[serde(default)]
    pub annotations: Vec<JvmAnnotation>,
}

impl JvmMethod {
    pub fn new(
        access: BitEnum<AccessFlag>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            access,
            annotations: vec![],
        }
    }

    pub fn with_annotation(mut self, annotation: JvmAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JvmField {
    pub name: String,
    pub descriptor: String,
    #[serde(default)]
    pub access: BitEnum<AccessFlag>,
    #[serde(default)]
    pub constant_value: Option<ConstantValue>,
    #[serde(default)]
    pub annotations: Vec<JvmAnnotation>,
}

impl JvmField {
    pub fn new(
        access: BitEnum<AccessFlag>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            access,
            constant_value: None,
            annotations: vec![],
        }
    }

    pub fn with_constant(mut self, value: ConstantValue) -> Self {
        self.constant_value = Some(value);
        self
    }
}

/// A reference from metadata to a JVM method. `owner` is the internal name of the class
/// holding the method when it is not the artifact the metadata came from (e.g. the
/// `DefaultImpls` class of an interface).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JvmMethodSignature {
    #[serde(default)]
    pub owner: Option<String>,
    pub name: String,
    pub descriptor: String,
}

impl JvmMethodSignature {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            owner: None,
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JvmFieldSignature {
    pub name: String,
    pub descriptor: String,
}

impl JvmFieldSignature {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// An entry of a `RuntimeVisibleAnnotations`/`RuntimeInvisibleAnnotations` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JvmAnnotation {
    pub type_descriptor: String,
    #[serde(default)]
    pub elements: Vec<ElementValue>,
}

impl JvmAnnotation {
    pub fn new(type_descriptor: impl Into<String>) -> Self {
        Self {
            type_descriptor: type_descriptor.into(),
            elements: vec![],
        }
    }

    pub fn with_element(mut self, name: impl Into<String>, value: ElementValueKind) -> Self {
        self.elements.push(ElementValue {
            name: Some(name.into()),
            value,
        });
        self
    }
}

/// A named annotation element. Array members carry no name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementValue {
    #[serde(default)]
    pub name: Option<String>,
    pub value: ElementValueKind,
}

impl ElementValue {
    pub fn unnamed(value: ElementValueKind) -> Self {
        Self { name: None, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ElementValueKind {
    Constant {
        value: ConstantValue,
    },
    EnumConstant {
        type_descriptor: String,
        constant_name: String,
    },
    /// A class literal; `descriptor` is either a primitive tag or a class type.
    Class {
        descriptor: String,
    },
    Annotation {
        annotation: JvmAnnotation,
    },
    Array {
        values: Vec<ElementValue>,
    },
}

/// A constant pool entry as it appears in annotation elements and `ConstantValue`
/// attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ConstantValue {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Class(String),
}
