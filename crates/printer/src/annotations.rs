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

//! Annotations, in both forms they reach the printer: JVM attribute annotations on the
//! class file members, and annotations recorded inside the metadata.

use kmp_model::descriptor::{internal_class_name_from_type, is_internal_primitive_type};
use kmp_model::{
    AnnotationValue, ConstantValue, ElementValue, ElementValueKind, JvmAnnotation,
    KotlinAnnotation,
};
use tracing::warn;

use crate::session::RenderSession;

/// Where an annotation goes relative to what it annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// On the same line, followed by the declaration.
    Inline,
    /// On a line of its own, indented to the declaration.
    Block,
}

/// The JVM's own limit on array type dimensions.
const MAX_ARRAY_DIMENSIONS: u32 = 255;

const HIDDEN_JVM_ANNOTATIONS: [&str; 3] = [
    "Lkotlin/Metadata;",
    "Lorg/jetbrains/annotations/NotNull;",
    "Lorg/jetbrains/annotations/Nullable;",
];

pub fn is_printable(annotation: &JvmAnnotation) -> bool {
    !HIDDEN_JVM_ANNOTATIONS.contains(&annotation.type_descriptor.as_str())
}

fn primitive_class_literal(descriptor: &str) -> &'static str {
    match descriptor {
        "Z" => "Boolean::class",
        "B" => "Byte::class",
        "C" => "Char::class",
        "S" => "Short::class",
        "I" => "Int::class",
        "F" => "Float::class",
        "J" => "Long::class",
        "D" => "Double::class",
        _ => "Unit::class",
    }
}

/// A constant pool value as it would be written in source.
pub fn constant_to_string(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Integer(v) => v.to_string(),
        ConstantValue::Long(v) => v.to_string(),
        ConstantValue::Float(v) => format!("{v:?}"),
        ConstantValue::Double(v) => format!("{v:?}"),
        ConstantValue::String(s) => format!("\"{s}\""),
        ConstantValue::Class(name) => name.clone(),
    }
}

impl<'p> RenderSession<'p> {
    /// Print every annotation that is not compiler bookkeeping.
    pub(crate) fn jvm_annotations(&mut self, annotations: &[JvmAnnotation], placement: Placement) {
        for annotation in annotations.iter().filter(|a| is_printable(a)) {
            self.jvm_annotation(annotation, placement, 0);
        }
    }

    fn jvm_annotation(&mut self, annotation: &JvmAnnotation, placement: Placement, level: usize) {
        if level == 0 {
            match placement {
                Placement::Block => self.out.write_indented("@"),
                Placement::Inline => self.out.write("@"),
            }
        }
        let name = self.context.resolve_name(
            internal_class_name_from_type(&annotation.type_descriptor),
            ".",
        );
        self.out.write(&name);
        if !annotation.elements.is_empty() {
            self.out.write("(");
            for element in &annotation.elements {
                self.jvm_element(element, placement, level + 1);
            }
            self.out.write(")");
        }
        if level == 0 && placement == Placement::Block {
            self.out.newline();
        }
    }

    fn jvm_element(&mut self, element: &ElementValue, placement: Placement, level: usize) {
        if !matches!(self.out.previous_char(), Some('(' | '{')) {
            self.out.write(", ");
        }
        if let Some(name) = element.name.as_deref().filter(|name| *name != "value") {
            self.out.write(name);
            self.out.write(" = ");
        }
        match &element.value {
            ElementValueKind::Constant { value } => self.out.write(&constant_to_string(value)),
            ElementValueKind::EnumConstant {
                type_descriptor,
                constant_name,
            } => {
                let name =
                    self.context
                        .resolve_name(internal_class_name_from_type(type_descriptor), ".");
                self.out.write(&format!("{name}.{constant_name}"));
            }
            ElementValueKind::Class { descriptor } => {
                let internal = if is_internal_primitive_type(descriptor) {
                    primitive_class_literal(descriptor)
                } else {
                    internal_class_name_from_type(descriptor)
                };
                let name = self.context.resolve_name(internal, ".");
                self.out.write(&name);
            }
            ElementValueKind::Annotation { annotation } => {
                self.jvm_annotation(annotation, placement, level)
            }
            ElementValueKind::Array { values } => {
                self.out.write("{");
                for value in values {
                    self.jvm_element(value, placement, level);
                }
                self.out.write("}");
            }
        }
    }

    pub(crate) fn kotlin_annotations(
        &mut self,
        annotations: &[KotlinAnnotation],
        placement: Placement,
    ) {
        for annotation in annotations {
            self.kotlin_annotation(annotation, placement);
        }
    }

    pub(crate) fn kotlin_annotation(&mut self, annotation: &KotlinAnnotation, placement: Placement) {
        match placement {
            Placement::Block => self.out.write_indented("@"),
            Placement::Inline => self.out.write("@"),
        }
        self.kotlin_annotation_body(annotation);
        match placement {
            Placement::Block => self.out.newline(),
            Placement::Inline => self.out.write(" "),
        }
    }

    fn kotlin_annotation_body(&mut self, annotation: &KotlinAnnotation) {
        let name = self.context.resolve_name(&annotation.class_name, ".");
        self.out.write(&name);
        if annotation.arguments.is_empty() {
            return;
        }
        self.out.write("(");
        for argument in &annotation.arguments {
            if !matches!(self.out.previous_char(), Some('(' | '[')) {
                self.out.write(", ");
            }
            self.out.write(&argument.name);
            self.out.write(" = ");
            self.kotlin_annotation_value(&argument.value);
        }
        self.out.write(")");
    }

    fn kotlin_annotation_value(&mut self, value: &AnnotationValue) {
        let literal = match value {
            AnnotationValue::Byte(v) => v.to_string(),
            AnnotationValue::Char(v) => v.to_string(),
            AnnotationValue::Short(v) => v.to_string(),
            AnnotationValue::Int(v) => v.to_string(),
            AnnotationValue::Long(v) => v.to_string(),
            AnnotationValue::Float(v) => format!("{v:?}"),
            AnnotationValue::Double(v) => format!("{v:?}"),
            AnnotationValue::Boolean(v) => v.to_string(),
            AnnotationValue::UByte(v) => v.to_string(),
            AnnotationValue::UShort(v) => v.to_string(),
            AnnotationValue::UInt(v) => v.to_string(),
            AnnotationValue::ULong(v) => v.to_string(),
            AnnotationValue::String(s) => format!("\"{s}\""),
            AnnotationValue::Class {
                class_name,
                array_dimensions,
            } => {
                let name = self.context.resolve_name(class_name, ".");
                if *array_dimensions > MAX_ARRAY_DIMENSIONS {
                    warn!("Class literal {class_name} has {array_dimensions} array dimensions");
                    format!("{name}::class /* invalid array dimensions: {array_dimensions} */")
                } else {
                    let dimensions = *array_dimensions as usize;
                    format!(
                        "{}{name}{}::class",
                        "Array<".repeat(dimensions),
                        ">".repeat(dimensions)
                    )
                }
            }
            AnnotationValue::Enum {
                class_name,
                entry_name,
            } => {
                let name = self.context.resolve_name(class_name, ".");
                format!("{name}.{entry_name}")
            }
            AnnotationValue::Annotation(annotation) => {
                self.kotlin_annotation_body(annotation);
                return;
            }
            AnnotationValue::Array(values) => {
                self.out.write("[");
                for (index, element) in values.iter().enumerate() {
                    if index > 0 {
                        self.out.write(", ");
                    }
                    self.kotlin_annotation_value(element);
                }
                self.out.write("]");
                return;
            }
        };
        self.out.write(&literal);
    }
}
