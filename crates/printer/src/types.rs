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

use itertools::{Itertools, Position};
use kmp_model::flags::{TypeFlag, Variance};
use kmp_model::{AnnotationValue, KotlinType, MetadataNode, TypeArgument};
use lazy_static::lazy_static;
use regex::Regex;

use crate::annotations::Placement;
use crate::context::INVALID_CLASS_NAME;
use crate::flags::type_flags;
use crate::session::RenderSession;

lazy_static! {
    static ref FUNCTION_TYPE: Regex = Regex::new(r"^kotlin/Function(\d+)$").unwrap();
}

const FUNCTION_TYPE_PREFIX: &str = "kotlin/Function";
const EXTENSION_FUNCTION_TYPE: &str = "kotlin/ExtensionFunctionType";
const PARAMETER_NAME: &str = "kotlin/ParameterName";

fn is_function_type(ty: &KotlinType) -> bool {
    ty.class_name
        .as_deref()
        .is_some_and(|name| name.starts_with(FUNCTION_TYPE_PREFIX))
}

/// Number of value parameters of a `kotlin/FunctionN` type; the last type argument is the
/// return type.
fn function_parameter_count(class_name: &str) -> usize {
    FUNCTION_TYPE
        .captures(class_name)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}

impl<'p> RenderSession<'p> {
    pub(crate) fn kotlin_type(&mut self, ty: &'p KotlinType) {
        let mut extension = false;
        let mut parameter_name = None;
        for annotation in &ty.annotations {
            match annotation.class_name.as_str() {
                EXTENSION_FUNCTION_TYPE => extension = true,
                PARAMETER_NAME => {
                    if let Some(AnnotationValue::String(name)) = annotation.argument("name") {
                        parameter_name = Some(name.as_str());
                    }
                }
                _ => self.kotlin_annotation(annotation, Placement::Inline),
            }
        }

        self.out.write(type_flags(ty.flags));
        if let Some(name) = parameter_name {
            self.out.write(&format!("{name}: "));
        }
        if ty.variance != Variance::Invariant {
            self.out.write(&format!("{} ", ty.variance));
        }

        if let Some(class_name) = ty.class_name.as_deref().filter(|_| is_function_type(ty)) {
            self.function_type(ty, class_name, extension);
            return;
        }

        let name = if let Some(id) = ty.type_parameter_id {
            self.context.resolve_type_parameter(id)
        } else if let Some(name) = ty.alias_name.as_deref().or(ty.class_name.as_deref()) {
            self.context.resolve_name(name, ".")
        } else {
            INVALID_CLASS_NAME.to_string()
        };
        self.out.write(&name);
        for (position, argument) in ty.arguments.iter().with_position() {
            match position {
                Position::First | Position::Only => self.out.write("<"),
                Position::Middle | Position::Last => self.out.write(", "),
            }
            self.type_argument(argument);
            if matches!(position, Position::Last | Position::Only) {
                self.out.write(">");
            }
        }
        if ty.is_nullable() {
            self.out.write("?");
        }
        if ty.flags.contains(TypeFlag::DefinitelyNonNull) {
            self.out.write(" & Any");
        }
    }

    /// `(A, B) -> R`, or `T.(A) -> R` for extension function types.
    fn function_type(&mut self, ty: &'p KotlinType, class_name: &str, extension: bool) {
        let parameter_count = function_parameter_count(class_name);
        if ty.is_nullable() {
            self.out.write("(");
        }
        for (index, argument) in ty.arguments.iter().enumerate() {
            if index == 0 && !extension {
                self.out.write("(");
            } else if index == 1 && extension {
                self.out.write(".(");
            }
            if index == parameter_count {
                self.out.write(") -> ");
            } else if (index > 0 && !extension) || (index > 1 && extension) {
                self.out.write(", ");
            }
            self.type_argument(argument);
        }
        if ty.is_nullable() {
            self.out.write(")?");
        }
        if ty.flags.contains(TypeFlag::DefinitelyNonNull) {
            self.out.write(" & Any");
        }
    }

    fn type_argument(&mut self, argument: &'p TypeArgument) {
        match argument {
            TypeArgument::Star => self.out.write("*"),
            TypeArgument::Type(ty) => self.visit(MetadataNode::Type(ty)),
        }
    }

    /// `Receiver.`, parenthesised when the receiver is itself a function type.
    pub(crate) fn receiver_type(&mut self, ty: &'p KotlinType) {
        let function = is_function_type(ty);
        if function {
            self.out.write("(");
        }
        self.visit(MetadataNode::Type(ty));
        self.out.write(if function { ")." } else { "." });
    }
}
